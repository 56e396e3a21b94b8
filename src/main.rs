use argh::FromArgs;
use container_shell::Interpreter;
use container_shell::env::Environment;
use container_shell::registry::SLOT_COUNT;
use std::io::IsTerminal;

#[derive(FromArgs)]
/// Run container commands read from stdin, one per line.
struct Args {
    #[argh(option, default = "SLOT_COUNT")]
    /// number of named container slots.
    slots: usize,

    #[argh(option)]
    /// seed for list_shuffle; random when omitted.
    seed: Option<u64>,

    #[argh(option, default = "String::from(\"> \")")]
    /// prompt shown on an interactive terminal.
    prompt: String,

    #[argh(option, default = "String::from(\"warn\")")]
    /// log filter used when RUST_LOG is not set.
    log_level: String,
}

fn main() -> anyhow::Result<()> {
    let args: Args = argh::from_env();

    let filter = env_logger::Env::default().default_filter_or(args.log_level.as_str());
    env_logger::Builder::from_env(filter)
        .format_timestamp(None)
        .init();

    let env = match args.seed {
        Some(seed) => Environment::with_seed(args.slots, seed),
        None => Environment::new(args.slots),
    };
    log::debug!("starting with {} slots", args.slots);
    let mut sh = Interpreter::with_default_commands(env);

    let stdin = std::io::stdin();
    if stdin.is_terminal() {
        sh.repl(&args.prompt)?;
    } else {
        let mut stdout = std::io::stdout().lock();
        sh.run_script(stdin.lock(), &mut stdout)?;
    }
    Ok(())
}
