//! `hash_*` commands.

use super::BuiltinCommand;
use crate::command::ExitCode;
use crate::env::Environment;
use anyhow::Result;
use argh::FromArgs;
use std::io::Write;
use std::str::FromStr;

#[derive(FromArgs)]
/// Insert a value unless an equal one is already present.
pub struct Insert {
    #[argh(positional)]
    /// hash table name.
    pub name: String,
    #[argh(positional)]
    /// value to insert.
    pub value: i32,
}

impl BuiltinCommand for Insert {
    fn name() -> &'static str {
        "hash_insert"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        if env.registry.hash_mut(&self.name)?.insert(self.value).is_some() {
            log::debug!("hash_insert: {} already holds {}", self.name, self.value);
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Insert a value, displacing an equal one.
pub struct Replace {
    #[argh(positional)]
    /// hash table name.
    pub name: String,
    #[argh(positional)]
    /// value to insert.
    pub value: i32,
}

impl BuiltinCommand for Replace {
    fn name() -> &'static str {
        "hash_replace"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.hash_mut(&self.name)?.replace(self.value);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the value if the table holds it.
pub struct Find {
    #[argh(positional)]
    /// hash table name.
    pub name: String,
    #[argh(positional)]
    /// value to look up.
    pub value: i32,
}

impl BuiltinCommand for Find {
    fn name() -> &'static str {
        "hash_find"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        if let Some(v) = env.registry.hash_mut(&self.name)?.find(&self.value) {
            writeln!(stdout, "{v}")?;
        }
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove a value from a hash table.
pub struct Delete {
    #[argh(positional)]
    /// hash table name.
    pub name: String,
    #[argh(positional)]
    /// value to remove.
    pub value: i32,
}

impl BuiltinCommand for Delete {
    fn name() -> &'static str {
        "hash_delete"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.hash_mut(&self.name)?.delete(&self.value);
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print the number of elements in a hash table.
pub struct Size {
    #[argh(positional)]
    /// hash table name.
    pub name: String,
}

impl BuiltinCommand for Size {
    fn name() -> &'static str {
        "hash_size"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        writeln!(stdout, "{}", env.registry.hash_mut(&self.name)?.size())?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Print whether a hash table is empty.
pub struct Empty {
    #[argh(positional)]
    /// hash table name.
    pub name: String,
}

impl BuiltinCommand for Empty {
    fn name() -> &'static str {
        "hash_empty"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let empty = env.registry.hash_mut(&self.name)?.is_empty();
        super::write_bool(stdout, empty)?;
        Ok(0)
    }
}

#[derive(FromArgs)]
/// Remove every element of a hash table.
pub struct Clear {
    #[argh(positional)]
    /// hash table name.
    pub name: String,
}

impl BuiltinCommand for Clear {
    fn name() -> &'static str {
        "hash_clear"
    }

    fn execute(self, _stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        env.registry.hash_mut(&self.name)?.clear();
        Ok(0)
    }
}

/// Transformation applied by `hash_apply`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyOp {
    Square,
    Triple,
}

impl ApplyOp {
    fn apply(self, v: i32) -> i32 {
        match self {
            ApplyOp::Square => v.wrapping_mul(v),
            ApplyOp::Triple => v.wrapping_mul(v).wrapping_mul(v),
        }
    }
}

impl FromStr for ApplyOp {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "square" => Ok(ApplyOp::Square),
            "triple" => Ok(ApplyOp::Triple),
            other => Err(format!("unknown operation: {other}")),
        }
    }
}

#[derive(FromArgs)]
/// Print every element, or transform them with square or triple.
pub struct Apply {
    #[argh(positional)]
    /// hash table name.
    pub name: String,
    #[argh(positional)]
    /// square or triple; without it the elements are printed.
    pub op: Option<ApplyOp>,
}

impl BuiltinCommand for Apply {
    fn name() -> &'static str {
        "hash_apply"
    }

    fn execute(self, stdout: &mut dyn Write, env: &mut Environment) -> Result<ExitCode> {
        let table = env.registry.hash_mut(&self.name)?;
        match self.op {
            None => {
                for v in table.iter() {
                    write!(stdout, "{v} ")?;
                }
            }
            Some(op) => {
                // transformed values hash elsewhere, so rebuild
                let mut values = Vec::with_capacity(table.size());
                table.clear_with(|v| values.push(op.apply(v)));
                for v in values {
                    table.insert(v);
                }
            }
        }
        writeln!(stdout)?;
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{Hasher, int_table, rejected, run};
    use crate::registry::Instance;

    fn env_with(name: &str, values: &[i32]) -> Environment {
        let mut env = Environment::default();
        let mut table = int_table(Hasher::Fnv);
        for v in values {
            table.insert(*v);
        }
        env.registry.create(name, Instance::Hash(table)).unwrap();
        env
    }

    fn sorted(env: &mut Environment, name: &str) -> Vec<i32> {
        let table = env.registry.hash_mut(name).unwrap();
        let mut values: Vec<i32> = table.iter().copied().collect();
        values.sort();
        values
    }

    #[test]
    fn test_insert_keeps_values_unique() {
        let mut env = env_with("hash0", &[]);
        for v in ["5", "3", "5"] {
            run::<Insert>(&mut env, &["hash0", v]);
        }
        assert_eq!(run::<Size>(&mut env, &["hash0"]), "2\n");
        assert_eq!(sorted(&mut env, "hash0"), vec![3, 5]);
    }

    #[test]
    fn test_find_prints_only_hits() {
        let mut env = env_with("hash1", &[4, -2]);
        assert_eq!(run::<Find>(&mut env, &["hash1", "-2"]), "-2\n");
        assert_eq!(run::<Find>(&mut env, &["hash1", "9"]), "");
        assert!(rejected::<Find>(&mut env, &["hash7", "4"]));
    }

    #[test]
    fn test_replace_delete_clear() {
        let mut env = env_with("hash2", &[1, 2]);
        run::<Replace>(&mut env, &["hash2", "2"]);
        run::<Replace>(&mut env, &["hash2", "3"]);
        assert_eq!(sorted(&mut env, "hash2"), vec![1, 2, 3]);

        run::<Delete>(&mut env, &["hash2", "1"]);
        run::<Delete>(&mut env, &["hash2", "42"]);
        assert_eq!(sorted(&mut env, "hash2"), vec![2, 3]);
        assert_eq!(run::<Empty>(&mut env, &["hash2"]), "false\n");

        run::<Clear>(&mut env, &["hash2"]);
        assert_eq!(run::<Empty>(&mut env, &["hash2"]), "true\n");
        assert_eq!(run::<Size>(&mut env, &["hash2"]), "0\n");
    }

    #[test]
    fn test_apply_prints_elements() {
        let mut env = env_with("hash3", &[7]);
        assert_eq!(run::<Apply>(&mut env, &["hash3"]), "7 \n");
    }

    #[test]
    fn test_apply_transforms_and_collapses() {
        let mut env = env_with("hash4", &[-2, 2, 3]);
        assert_eq!(run::<Apply>(&mut env, &["hash4", "square"]), "\n");
        assert_eq!(sorted(&mut env, "hash4"), vec![4, 9]);

        run::<Apply>(&mut env, &["hash4", "triple"]);
        assert_eq!(sorted(&mut env, "hash4"), vec![64, 729]);
        let table = env.registry.hash_mut("hash4").unwrap();
        assert_eq!(table.find(&729), Some(&729));

        assert!(rejected::<Apply>(&mut env, &["hash4", "cube"]));
        assert_eq!(sorted(&mut env, "hash4"), vec![64, 729]);
    }

    #[test]
    fn test_apply_op_parsing() {
        assert_eq!("square".parse::<ApplyOp>(), Ok(ApplyOp::Square));
        assert_eq!("triple".parse::<ApplyOp>(), Ok(ApplyOp::Triple));
        assert!("cube".parse::<ApplyOp>().is_err());
    }
}
