//! Built-in commands known to the interpreter at compile time.
//!
//! Every command is an [`argh`] `FromArgs` struct. The lifecycle commands live
//! here; the per-container commands are grouped in the submodules.

use crate::command::{CommandFactory, ExecutableCommand, ExitCode};
use crate::env::Environment;
use crate::hash::{HashTable, hash_int, hash_int_alt};
use crate::interpreter::Factory;
use crate::registry::Instance;
use crate::{Bitmap, List};
use anyhow::{Context, Result, anyhow};
use argh::{EarlyExit, FromArgs};
use std::io::Write;
use std::str::FromStr;

pub(crate) mod bitmap;
pub(crate) mod hash;
pub(crate) mod list;

/// Built-in commands are parsed using [`argh`] (`FromArgs`) and executed
/// directly against the session's [`Environment`].
pub(crate) trait BuiltinCommand: Sized + FromArgs {
    /// Canonical name of the command, e.g. "create" or "list_sort".
    fn name() -> &'static str;

    /// Executes the command, writing its results to `stdout`.
    ///
    /// Return value follows shell conventions: 0 for success, non-zero for error.
    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode>;
}

impl<T: BuiltinCommand> ExecutableCommand for T {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        env: &mut Environment,
    ) -> Result<ExitCode> {
        match <T as BuiltinCommand>::execute(*self, stdout, env) {
            Ok(x) => Ok(x),
            // write failures belong to the caller
            Err(e) if e.downcast_ref::<std::io::Error>().is_some() => Err(e),
            Err(e) => {
                // stdout carries results only
                log::warn!("{}: {:#}", T::name(), e);
                Ok(1)
            }
        }
    }
}

struct InvalidArgs {
    output: String,
    is_error: bool,
}

impl ExecutableCommand for InvalidArgs {
    fn execute(
        self: Box<Self>,
        stdout: &mut dyn Write,
        _env: &mut Environment,
    ) -> Result<ExitCode> {
        if self.is_error {
            log::warn!("{}", self.output.trim_end());
            return Ok(1);
        }
        writeln!(stdout, "{}", self.output.trim_end())?;
        Ok(0)
    }
}

/// Negative numbers look like options to argh, so they need a `--` in front.
fn with_option_terminator<'a>(args: &[&'a str]) -> Vec<&'a str> {
    let has_negative = args
        .iter()
        .any(|a| a.starts_with('-') && a[1..].parse::<i64>().is_ok());
    let mut out = Vec::with_capacity(args.len() + 1);
    if has_negative {
        out.push("--");
    }
    out.extend_from_slice(args);
    out
}

impl<T: BuiltinCommand + 'static> CommandFactory for Factory<T> {
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand>> {
        if name == T::name() {
            let args = with_option_terminator(args);
            Some(match T::from_args(&[name], &args) {
                Ok(cmd) => Box::new(cmd),
                Err(EarlyExit { output, status }) => Box::new(InvalidArgs {
                    output,
                    is_error: status.is_err(),
                }),
            })
        } else {
            None
        }
    }
}

pub(crate) fn write_bool(stdout: &mut dyn Write, value: bool) -> Result<()> {
    writeln!(stdout, "{}", if value { "true" } else { "false" })?;
    Ok(())
}

/// Container type named on the `create` command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateKind {
    List,
    HashTable,
    Bitmap,
}

impl FromStr for CreateKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "list" => Ok(CreateKind::List),
            "hashtable" => Ok(CreateKind::HashTable),
            "bitmap" => Ok(CreateKind::Bitmap),
            other => Err(format!("unknown container type: {other}")),
        }
    }
}

/// Hash function used by a new hash table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hasher {
    Fnv,
    Alt,
}

impl FromStr for Hasher {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "fnv" => Ok(Hasher::Fnv),
            "alt" => Ok(Hasher::Alt),
            other => Err(format!("unknown hasher: {other}")),
        }
    }
}

pub(crate) fn int_table(hasher: Hasher) -> HashTable<i32> {
    let hash: fn(i32) -> u32 = match hasher {
        Hasher::Fnv => hash_int,
        Hasher::Alt => hash_int_alt,
    };
    HashTable::new(move |v: &i32| hash(*v), |a: &i32, b: &i32| a == b)
}

#[derive(FromArgs)]
/// Create a list, hash table or bitmap in the slot named by NAME.
pub struct Create {
    #[argh(positional)]
    /// container type: list, hashtable or bitmap.
    pub kind: CreateKind,

    #[argh(positional)]
    /// instance name; the number inside it selects the slot.
    pub name: String,

    #[argh(positional)]
    /// number of bits, required for bitmaps.
    pub bits: Option<usize>,

    #[argh(option, default = "Hasher::Fnv")]
    /// hash function for hash tables: fnv (default) or alt.
    pub hasher: Hasher,
}

impl BuiltinCommand for Create {
    fn name() -> &'static str {
        "create"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let instance = match self.kind {
            CreateKind::List => Instance::List(List::new()),
            CreateKind::HashTable => Instance::Hash(int_table(self.hasher)),
            CreateKind::Bitmap => {
                let bits = self
                    .bits
                    .ok_or_else(|| anyhow!("bitmap {} needs a bit count", self.name))?;
                let bmp = Bitmap::create(bits)
                    .with_context(|| format!("can't create bitmap {}", self.name))?;
                Instance::Bitmap(bmp)
            }
        };
        env.registry.create(&self.name, instance)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Destroy the container held under NAME.
pub struct Delete {
    #[argh(positional)]
    /// instance name.
    pub name: String,
}

impl BuiltinCommand for Delete {
    fn name() -> &'static str {
        "delete"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        if env.registry.delete(&self.name)?.is_none() {
            log::debug!("delete: {} was already empty", self.name);
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the contents of the container held under NAME.
pub struct DumpData {
    #[argh(positional)]
    /// instance name.
    pub name: String,
}

impl BuiltinCommand for DumpData {
    fn name() -> &'static str {
        "dumpdata"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        match env.registry.get(&self.name)? {
            Instance::List(list) => {
                let values: Vec<String> = list.iter().map(|v| v.to_string()).collect();
                writeln!(stdout, "{}", values.join(" "))?;
            }
            Instance::Hash(table) => {
                for v in table.iter() {
                    write!(stdout, "{v} ")?;
                }
                writeln!(stdout)?;
            }
            Instance::Bitmap(bmp) => writeln!(stdout, "{bmp}")?,
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Stop reading commands.
pub struct Quit {}

impl BuiltinCommand for Quit {
    fn name() -> &'static str {
        "quit"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.should_exit = true;
        Ok(0)
    }
}

/// Parses `args` the way the interpreter does and runs the command.
#[cfg(test)]
pub(crate) fn invoke<T: BuiltinCommand + 'static>(
    env: &mut Environment,
    args: &[&str],
) -> (ExitCode, String) {
    let cmd = Factory::<T>::default().try_create(T::name(), args).unwrap();
    let mut out = Vec::new();
    let code = cmd.execute(&mut out, env).unwrap();
    (code, String::from_utf8(out).unwrap())
}

/// Runs a command that must succeed and returns what it printed.
#[cfg(test)]
pub(crate) fn run<T: BuiltinCommand + 'static>(env: &mut Environment, args: &[&str]) -> String {
    let (code, out) = invoke::<T>(env, args);
    assert_eq!(code, 0, "{} {args:?}", T::name());
    out
}

/// True when the command fails without printing anything.
#[cfg(test)]
pub(crate) fn rejected<T: BuiltinCommand + 'static>(env: &mut Environment, args: &[&str]) -> bool {
    invoke::<T>(env, args) == (1, String::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::ErrorKind::BrokenPipe.into())
        }
    }

    #[test]
    fn test_negative_numbers_get_terminator() {
        assert_eq!(with_option_terminator(&["l0", "-5"]), vec!["--", "l0", "-5"]);
        assert_eq!(with_option_terminator(&["l0", "5"]), vec!["l0", "5"]);
        assert_eq!(with_option_terminator(&["--help"]), vec!["--help"]);
    }

    #[test]
    fn test_factory_parses_arguments() {
        let factory = Factory::<Create>::default();
        assert!(factory.try_create("delete", &["l0"]).is_none());

        let mut env = Environment::default();
        let cmd = factory.try_create("create", &["bitmap", "bm1", "16"]).unwrap();
        let mut out = Vec::new();
        assert_eq!(cmd.execute(&mut out, &mut env).unwrap(), 0);
        assert!(out.is_empty());
        assert!(matches!(env.registry.get("bm1"), Ok(Instance::Bitmap(b)) if b.size() == 16));
    }

    #[test]
    fn test_bad_arguments_exit_with_error() {
        let mut env = Environment::default();
        assert!(rejected::<Create>(&mut env, &["tree", "t0"]));
        assert!(rejected::<Create>(&mut env, &["list"]));
    }

    #[test]
    fn test_create_bitmap_requires_bits() {
        let mut env = Environment::default();
        assert!(rejected::<Create>(&mut env, &["bitmap", "bm0"]));
        assert!(env.registry.get("bm0").is_err());
    }

    #[test]
    fn test_create_with_alt_hasher() {
        let mut env = Environment::default();
        run::<Create>(&mut env, &["hashtable", "hash3", "--hasher", "alt"]);
        let table = env.registry.hash_mut("hash3").unwrap();
        table.insert(-4);
        assert_eq!(table.find(&-4), Some(&-4));
    }

    #[test]
    fn test_dumpdata_formats() {
        let mut env = Environment::default();
        env.registry
            .create("list0", Instance::List([3, 1, 2].into_iter().collect()))
            .unwrap();
        let mut table = int_table(Hasher::Fnv);
        table.insert(7);
        env.registry.create("hash1", Instance::Hash(table)).unwrap();
        let mut bmp = Bitmap::create(4).unwrap();
        bmp.mark(1).unwrap();
        env.registry.create("bm2", Instance::Bitmap(bmp)).unwrap();

        assert_eq!(run::<DumpData>(&mut env, &["list0"]), "3 1 2\n");
        assert_eq!(run::<DumpData>(&mut env, &["hash1"]), "7 \n");
        assert_eq!(run::<DumpData>(&mut env, &["bm2"]), "0100\n");
    }

    #[test]
    fn test_delete_and_quit() {
        let mut env = Environment::default();
        env.registry.create("l5", Instance::List(List::new())).unwrap();
        run::<Delete>(&mut env, &["l5"]);
        assert!(env.registry.get("l5").is_err());
        assert!(rejected::<DumpData>(&mut env, &["l5"]));

        run::<Quit>(&mut env, &[]);
        assert!(env.should_exit);
    }

    #[test]
    fn test_write_failure_is_not_a_command_failure() {
        let mut env = Environment::default();
        env.registry
            .create("list0", Instance::List([1].into_iter().collect()))
            .unwrap();
        let factory = Factory::<DumpData>::default();

        let cmd = factory.try_create("dumpdata", &["list0"]).unwrap();
        let err = cmd.execute(&mut ClosedPipe, &mut env).unwrap_err();
        let io_err = err.downcast_ref::<io::Error>().unwrap();
        assert_eq!(io_err.kind(), io::ErrorKind::BrokenPipe);

        // a container error still maps to exit code 1
        let cmd = factory.try_create("dumpdata", &["list9"]).unwrap();
        assert_eq!(cmd.execute(&mut ClosedPipe, &mut env).unwrap(), 1);
    }
}
