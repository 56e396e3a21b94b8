//! `list_*` commands.

use super::BuiltinCommand;
use crate::command::ExitCode;
use crate::env::Environment;
use crate::error::ContainerError;
use crate::list::{ElemId, List};
use crate::registry::ListPair;
use anyhow::{Context, Result, bail};
use argh::FromArgs;
use std::io::Write;

fn less(a: &i32, b: &i32) -> bool {
    a < b
}

/// Handle at `index`, where `index == size` names the end sentinel.
fn position(list: &List<i32>, index: usize) -> Result<ElemId> {
    match list.nth(index) {
        Some(id) => Ok(id),
        None if index == list.size() => Ok(list.end()),
        None => bail!("position {index} is past the end of a list of {}", list.size()),
    }
}

fn element(list: &List<i32>, index: usize) -> Result<ElemId> {
    list.nth(index)
        .ok_or(ContainerError::NotFound)
        .with_context(|| format!("no element at position {index}"))
}

fn print_elem(stdout: &mut dyn Write, list: &List<i32>, id: Option<ElemId>) -> Result<()> {
    if let Some(v) = id.and_then(|id| list.get(id)) {
        writeln!(stdout, "{v}")?;
    }
    Ok(())
}

#[derive(FromArgs)]
/// Insert a value at the front of a list.
pub struct PushFront {
    #[argh(positional)]
    /// list name.
    pub name: String,
    #[argh(positional)]
    /// value to insert.
    pub value: i32,
}

impl BuiltinCommand for PushFront {
    fn name() -> &'static str {
        "list_push_front"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.list_mut(&self.name)?.push_front(self.value);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Insert a value at the back of a list.
pub struct PushBack {
    #[argh(positional)]
    /// list name.
    pub name: String,
    #[argh(positional)]
    /// value to insert.
    pub value: i32,
}

impl BuiltinCommand for PushBack {
    fn name() -> &'static str {
        "list_push_back"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.list_mut(&self.name)?.push_back(self.value);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove the first element of a list.
pub struct PopFront {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for PopFront {
    fn name() -> &'static str {
        "list_pop_front"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.list_mut(&self.name)?.pop_front()?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove the last element of a list.
pub struct PopBack {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for PopBack {
    fn name() -> &'static str {
        "list_pop_back"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.list_mut(&self.name)?.pop_back()?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the first element of a list.
pub struct Front {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Front {
    fn name() -> &'static str {
        "list_front"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        if let Ok(v) = env.registry.list_mut(&self.name)?.front() {
            writeln!(stdout, "{v}")?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the last element of a list.
pub struct Back {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Back {
    fn name() -> &'static str {
        "list_back"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        if let Ok(v) = env.registry.list_mut(&self.name)?.back() {
            writeln!(stdout, "{v}")?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Insert a value before position POS; positions past the end append.
pub struct Insert {
    #[argh(positional)]
    /// list name.
    pub name: String,
    #[argh(positional)]
    /// zero-based position.
    pub pos: usize,
    #[argh(positional)]
    /// value to insert.
    pub value: i32,
}

impl BuiltinCommand for Insert {
    fn name() -> &'static str {
        "list_insert"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let list = env.registry.list_mut(&self.name)?;
        let before = list.nth(self.pos).unwrap_or_else(|| list.end());
        list.insert_before(before, self.value)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Insert a value keeping the list in ascending order.
pub struct InsertOrdered {
    #[argh(positional)]
    /// list name.
    pub name: String,
    #[argh(positional)]
    /// value to insert.
    pub value: i32,
}

impl BuiltinCommand for InsertOrdered {
    fn name() -> &'static str {
        "list_insert_ordered"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry
            .list_mut(&self.name)?
            .insert_ordered(self.value, less);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print whether a list is empty.
pub struct Empty {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Empty {
    fn name() -> &'static str {
        "list_empty"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let empty = env.registry.list_mut(&self.name)?.is_empty();
        super::write_bool(stdout, empty)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the number of elements in a list.
pub struct Size {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Size {
    fn name() -> &'static str {
        "list_size"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        writeln!(stdout, "{}", env.registry.list_mut(&self.name)?.size())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the largest element of a list.
pub struct Max {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Max {
    fn name() -> &'static str {
        "list_max"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let list = env.registry.list_mut(&self.name)?;
        print_elem(stdout, list, list.max(less))?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the smallest element of a list.
pub struct Min {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Min {
    fn name() -> &'static str {
        "list_min"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let list = env.registry.list_mut(&self.name)?;
        print_elem(stdout, list, list.min(less))?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Reverse a list in place.
pub struct Reverse {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Reverse {
    fn name() -> &'static str {
        "list_reverse"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.list_mut(&self.name)?.reverse();
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Shuffle a list randomly.
pub struct Shuffle {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Shuffle {
    fn name() -> &'static str {
        "list_shuffle"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let list = env.registry.list_mut(&self.name)?;
        list.shuffle(&mut env.rng);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Sort a list in ascending order.
pub struct Sort {
    #[argh(positional)]
    /// list name.
    pub name: String,
}

impl BuiltinCommand for Sort {
    fn name() -> &'static str {
        "list_sort"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.list_mut(&self.name)?.sort(less);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Move elements [FIRST, LAST) of SRC before position POS of DST.
pub struct Splice {
    #[argh(positional)]
    /// destination list name.
    pub dst: String,
    #[argh(positional)]
    /// position in the destination list.
    pub pos: usize,
    #[argh(positional)]
    /// source list name.
    pub src: String,
    #[argh(positional)]
    /// first position of the moved range.
    pub first: usize,
    #[argh(positional)]
    /// position just past the moved range.
    pub last: usize,
}

impl BuiltinCommand for Splice {
    fn name() -> &'static str {
        "list_splice"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        match env.registry.lists_pair_mut(&self.dst, &self.src)? {
            ListPair::Same(list) => {
                let before = position(list, self.pos)?;
                let first = position(list, self.first)?;
                let last = position(list, self.last)?;
                list.splice(before, first, last)?;
            }
            ListPair::Distinct(dst, src) => {
                let before = position(dst, self.pos)?;
                let first = position(src, self.first)?;
                let last = position(src, self.last)?;
                dst.splice_from(before, src, first, last)?;
            }
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Swap the values at positions I and J.
pub struct Swap {
    #[argh(positional)]
    /// list name.
    pub name: String,
    #[argh(positional)]
    /// first position.
    pub i: usize,
    #[argh(positional)]
    /// second position.
    pub j: usize,
}

impl BuiltinCommand for Swap {
    fn name() -> &'static str {
        "list_swap"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let list = env.registry.list_mut(&self.name)?;
        let a = element(list, self.i)?;
        let b = element(list, self.j)?;
        list.swap_values(a, b)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove the element at position POS.
pub struct Remove {
    #[argh(positional)]
    /// list name.
    pub name: String,
    #[argh(positional)]
    /// zero-based position.
    pub pos: usize,
}

impl BuiltinCommand for Remove {
    fn name() -> &'static str {
        "list_remove"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let list = env.registry.list_mut(&self.name)?;
        let id = element(list, self.pos)?;
        list.remove(id)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Drop adjacent duplicates, optionally collecting them into DUPS.
pub struct Unique {
    #[argh(positional)]
    /// list name.
    pub name: String,
    #[argh(positional)]
    /// list that receives the removed duplicates.
    pub dups: Option<String>,
}

impl BuiltinCommand for Unique {
    fn name() -> &'static str {
        "list_unique"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let eq = |a: &i32, b: &i32| a == b;
        match &self.dups {
            None => env.registry.list_mut(&self.name)?.unique(None, eq),
            Some(dups) => match env.registry.lists_pair_mut(&self.name, dups)? {
                ListPair::Distinct(list, dups) => list.unique(Some(dups), eq),
                ListPair::Same(_) => {
                    bail!("{} can't collect its own duplicates", self.name)
                }
            },
        }
        Ok(0)
    }
}
