use crate::command::{CommandFactory, ExitCode};
use crate::env::Environment;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::{BufRead, Write};

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate, i.e. implementors of `BuiltinCommand`.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

/// A line-oriented interpreter driving the container commands.
///
/// The interpreter owns an [`Environment`] (the named slots and the shuffle rng)
/// and a list of [`CommandFactory`] objects that are queried to create commands
/// by name. See [`Default`] for the commands included out of the box.
///
/// Example
/// ```
/// use container_shell::Interpreter;
/// let mut sh = Interpreter::default();
/// let mut out = Vec::new();
/// sh.execute_line("create list list0", &mut out).unwrap();
/// sh.execute_line("list_push_back list0 7", &mut out).unwrap();
/// sh.execute_line("dumpdata list0", &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "7\n");
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory>>,
}

impl Interpreter {
    /// Create a new interpreter with a custom set of command factories.
    pub fn new(commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self::with_env(Environment::default(), commands)
    }

    /// Same as [`Interpreter::new`] with a caller-provided environment.
    pub fn with_env(env: Environment, commands: Vec<Box<dyn CommandFactory>>) -> Self {
        Self { env, commands }
    }

    /// The default command set over a caller-provided environment.
    pub fn with_default_commands(env: Environment) -> Self {
        Self::with_env(env, default_commands())
    }

    /// Whether a `quit` command has been executed.
    pub fn should_exit(&self) -> bool {
        self.env.should_exit
    }

    /// Run a single command invocation by name with arguments.
    ///
    /// Returns the command's exit code, or an error if no factory knows the
    /// command or writing to `stdout` fails.
    pub fn run(
        &mut self,
        name: &str,
        args: &[&str],
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        for factory in &self.commands {
            if let Some(cmd) = factory.try_create(name, args) {
                return cmd.execute(stdout, &mut self.env);
            }
        }
        Err(anyhow::anyhow!("command not found: {}", name))
    }

    /// Splits `line` on whitespace and runs it. Blank lines are a no-op.
    pub fn execute_line(
        &mut self,
        line: &str,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<ExitCode> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(0);
        };
        let args: Vec<&str> = words.collect();
        log::trace!("dispatching {name} {args:?}");
        self.run(name, &args, stdout)
    }

    /// Reads commands from `input` until end of input or `quit`.
    ///
    /// Unknown commands are logged and skipped. Bytes that are not UTF-8 are
    /// replaced with U+FFFD, so such a line fails like any other bad argument.
    /// Only I/O failures end the loop early.
    pub fn run_script<R: BufRead>(
        &mut self,
        mut input: R,
        stdout: &mut dyn Write,
    ) -> anyhow::Result<()> {
        let mut buf = Vec::new();
        while !self.env.should_exit {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }
            let line = String::from_utf8_lossy(&buf);
            if let Err(e) = self.execute_line(&line, stdout) {
                if e.downcast_ref::<std::io::Error>().is_some() {
                    return Err(e);
                }
                log::warn!("{e:#}");
            }
        }
        stdout.flush()?;
        Ok(())
    }

    /// Interactive Read-Eval-Print Loop with line editing and history.
    pub fn repl(&mut self, prompt: &str) -> rustyline::Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut stdout = std::io::stdout();

        while !self.env.should_exit {
            match rl.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    if let Err(e) = self.execute_line(&line, &mut stdout) {
                        log::warn!("{e:#}");
                    }
                    stdout.flush()?;
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
                Err(err) => return Err(err),
            }
        }

        Ok(())
    }
}

fn default_commands() -> Vec<Box<dyn CommandFactory>> {
    use crate::builtin::{Create, Delete, DumpData, Quit, bitmap, hash, list};
    vec![
        Box::new(Factory::<Create>::default()),
        Box::new(Factory::<Delete>::default()),
        Box::new(Factory::<DumpData>::default()),
        Box::new(Factory::<Quit>::default()),
        Box::new(Factory::<list::PushFront>::default()),
        Box::new(Factory::<list::PushBack>::default()),
        Box::new(Factory::<list::PopFront>::default()),
        Box::new(Factory::<list::PopBack>::default()),
        Box::new(Factory::<list::Front>::default()),
        Box::new(Factory::<list::Back>::default()),
        Box::new(Factory::<list::Insert>::default()),
        Box::new(Factory::<list::InsertOrdered>::default()),
        Box::new(Factory::<list::Empty>::default()),
        Box::new(Factory::<list::Size>::default()),
        Box::new(Factory::<list::Max>::default()),
        Box::new(Factory::<list::Min>::default()),
        Box::new(Factory::<list::Reverse>::default()),
        Box::new(Factory::<list::Shuffle>::default()),
        Box::new(Factory::<list::Sort>::default()),
        Box::new(Factory::<list::Splice>::default()),
        Box::new(Factory::<list::Swap>::default()),
        Box::new(Factory::<list::Remove>::default()),
        Box::new(Factory::<list::Unique>::default()),
        Box::new(Factory::<hash::Insert>::default()),
        Box::new(Factory::<hash::Replace>::default()),
        Box::new(Factory::<hash::Find>::default()),
        Box::new(Factory::<hash::Delete>::default()),
        Box::new(Factory::<hash::Size>::default()),
        Box::new(Factory::<hash::Empty>::default()),
        Box::new(Factory::<hash::Clear>::default()),
        Box::new(Factory::<hash::Apply>::default()),
        Box::new(Factory::<bitmap::Mark>::default()),
        Box::new(Factory::<bitmap::Reset>::default()),
        Box::new(Factory::<bitmap::Flip>::default()),
        Box::new(Factory::<bitmap::Test>::default()),
        Box::new(Factory::<bitmap::Set>::default()),
        Box::new(Factory::<bitmap::SetAll>::default()),
        Box::new(Factory::<bitmap::SetMultiple>::default()),
        Box::new(Factory::<bitmap::All>::default()),
        Box::new(Factory::<bitmap::Any>::default()),
        Box::new(Factory::<bitmap::NoneSet>::default()),
        Box::new(Factory::<bitmap::Count>::default()),
        Box::new(Factory::<bitmap::Contains>::default()),
        Box::new(Factory::<bitmap::Scan>::default()),
        Box::new(Factory::<bitmap::ScanAndFlip>::default()),
        Box::new(Factory::<bitmap::Size>::default()),
        Box::new(Factory::<bitmap::Expand>::default()),
        Box::new(Factory::<bitmap::Dump>::default()),
    ]
}

impl Default for Interpreter {
    /// Create an interpreter with every container command:
    /// - lifecycle: `create`, `delete`, `dumpdata`, `quit`
    /// - `list_*`, `hash_*` and `bitmap_*` operations
    fn default() -> Self {
        Self::new(default_commands())
    }
}
