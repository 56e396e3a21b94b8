//! `bitmap_*` commands.

use super::{BuiltinCommand, write_bool};
use crate::bitmap::{BITMAP_ERROR, Bitmap};
use crate::command::ExitCode;
use crate::env::Environment;
use anyhow::{Context, Result};
use argh::FromArgs;
use std::io::Write;

#[derive(FromArgs)]
/// Set a bit to true.
pub struct Mark {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// bit index.
    pub idx: usize,
}

impl BuiltinCommand for Mark {
    fn name() -> &'static str {
        "bitmap_mark"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.bitmap_mut(&self.name)?.mark(self.idx)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Set a bit to false.
pub struct Reset {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// bit index.
    pub idx: usize,
}

impl BuiltinCommand for Reset {
    fn name() -> &'static str {
        "bitmap_reset"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.bitmap_mut(&self.name)?.reset(self.idx)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Toggle a bit.
pub struct Flip {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// bit index.
    pub idx: usize,
}

impl BuiltinCommand for Flip {
    fn name() -> &'static str {
        "bitmap_flip"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.bitmap_mut(&self.name)?.flip(self.idx)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print whether every bit in the range is set.
pub struct All {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// first bit of the range.
    pub start: usize,
    #[argh(positional)]
    /// number of bits in the range.
    pub count: usize,
}

impl BuiltinCommand for All {
    fn name() -> &'static str {
        "bitmap_all"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bmp = env.registry.bitmap_mut(&self.name)?;
        write_bool(stdout, bmp.all(self.start, self.count)?)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print whether some bit in the range is set.
pub struct Any {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// first bit of the range.
    pub start: usize,
    #[argh(positional)]
    /// number of bits in the range.
    pub count: usize,
}

impl BuiltinCommand for Any {
    fn name() -> &'static str {
        "bitmap_any"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bmp = env.registry.bitmap_mut(&self.name)?;
        write_bool(stdout, bmp.any(self.start, self.count)?)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print whether no bit in the range is set.
pub struct NoneSet {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// first bit of the range.
    pub start: usize,
    #[argh(positional)]
    /// number of bits in the range.
    pub count: usize,
}

impl BuiltinCommand for NoneSet {
    fn name() -> &'static str {
        "bitmap_none"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bmp = env.registry.bitmap_mut(&self.name)?;
        write_bool(stdout, bmp.none(self.start, self.count)?)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print whether a bit is set.
pub struct Test {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// bit index.
    pub idx: usize,
}

impl BuiltinCommand for Test {
    fn name() -> &'static str {
        "bitmap_test"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bit = env.registry.bitmap_mut(&self.name)?.test(self.idx)?;
        write_bool(stdout, bit)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Set a bit to the given value.
pub struct Set {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// bit index.
    pub idx: usize,
    #[argh(positional)]
    /// true or false.
    pub value: bool,
}

impl BuiltinCommand for Set {
    fn name() -> &'static str {
        "bitmap_set"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry
            .bitmap_mut(&self.name)?
            .set(self.idx, self.value)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Set every bit to the given value.
pub struct SetAll {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// true or false.
    pub value: bool,
}

impl BuiltinCommand for SetAll {
    fn name() -> &'static str {
        "bitmap_set_all"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.bitmap_mut(&self.name)?.set_all(self.value);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Set COUNT bits starting at START to the given value.
pub struct SetMultiple {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// first bit of the range.
    pub start: usize,
    #[argh(positional)]
    /// number of bits in the range.
    pub count: usize,
    #[argh(positional)]
    /// true or false.
    pub value: bool,
}

impl BuiltinCommand for SetMultiple {
    fn name() -> &'static str {
        "bitmap_set_multiple"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry
            .bitmap_mut(&self.name)?
            .set_multiple(self.start, self.count, self.value)?;
        Ok(0)
    }
}

fn write_index(stdout: &mut dyn Write, found: Option<usize>) -> Result<()> {
    writeln!(stdout, "{}", found.unwrap_or(BITMAP_ERROR))?;
    Ok(())
}

#[derive(FromArgs)]
/// Print how many bits in the range equal the value.
pub struct Count {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// first bit of the range.
    pub start: usize,
    #[argh(positional)]
    /// number of bits in the range.
    pub count: usize,
    #[argh(positional)]
    /// bit value to count.
    pub value: bool,
}

impl BuiltinCommand for Count {
    fn name() -> &'static str {
        "bitmap_count"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bmp = env.registry.bitmap_mut(&self.name)?;
        writeln!(stdout, "{}", bmp.count(self.start, self.count, self.value)?)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print whether any bit in the range equals the value.
pub struct Contains {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// first bit of the range.
    pub start: usize,
    #[argh(positional)]
    /// number of bits in the range.
    pub count: usize,
    #[argh(positional)]
    /// bit value to look for.
    pub value: bool,
}

impl BuiltinCommand for Contains {
    fn name() -> &'static str {
        "bitmap_contains"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bmp = env.registry.bitmap_mut(&self.name)?;
        write_bool(stdout, bmp.contains(self.start, self.count, self.value)?)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the index of the first bit in the range equal to the value.
pub struct Scan {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// first bit of the range.
    pub start: usize,
    #[argh(positional)]
    /// number of bits in the range.
    pub count: usize,
    #[argh(positional)]
    /// bit value to look for.
    pub value: bool,
}

impl BuiltinCommand for Scan {
    fn name() -> &'static str {
        "bitmap_scan"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bmp = env.registry.bitmap_mut(&self.name)?;
        write_index(stdout, bmp.scan(self.start, self.count, self.value)?)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Like bitmap_scan, then flip the bit that was found.
pub struct ScanAndFlip {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// first bit of the range.
    pub start: usize,
    #[argh(positional)]
    /// number of bits in the range.
    pub count: usize,
    #[argh(positional)]
    /// bit value to look for.
    pub value: bool,
}

impl BuiltinCommand for ScanAndFlip {
    fn name() -> &'static str {
        "bitmap_scan_and_flip"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bmp = env.registry.bitmap_mut(&self.name)?;
        write_index(stdout, bmp.scan_and_flip(self.start, self.count, self.value)?)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the number of bits in a bitmap.
pub struct Size {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
}

impl BuiltinCommand for Size {
    fn name() -> &'static str {
        "bitmap_size"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        writeln!(stdout, "{}", env.registry.bitmap_mut(&self.name)?.size())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Grow a bitmap by ADDITIONAL bits, all false.
pub struct Expand {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
    #[argh(positional)]
    /// number of bits to add.
    pub additional: usize,
}

impl BuiltinCommand for Expand {
    fn name() -> &'static str {
        "bitmap_expand"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let bmp: &mut Bitmap = env.registry.bitmap_mut(&self.name)?;
        let capacity = bmp
            .size()
            .checked_add(self.additional)
            .with_context(|| format!("{} can't grow by {} bits", self.name, self.additional))?;
        bmp.expand(capacity)
            .with_context(|| format!("can't expand {}", self.name))?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print a hex dump of the bitmap storage.
pub struct Dump {
    #[argh(positional)]
    /// bitmap name.
    pub name: String,
}

impl BuiltinCommand for Dump {
    fn name() -> &'static str {
        "bitmap_dump"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        write!(stdout, "{}", env.registry.bitmap_mut(&self.name)?.hex_dump())?;
        Ok(0)
    }
}
