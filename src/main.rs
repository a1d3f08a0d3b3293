use anyhow::Result;

use ringrank::cli::Command;
use ringrank::{handle_completions, handle_dedup, handle_normalize, handle_rank, interpret};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Rank {
            input,
            output,
            ranking,
        } => handle_rank(input, output.as_deref(), ranking),
        Command::Dedup { input, output } => handle_dedup(input, output),
        Command::Normalize { names, aliases } => handle_normalize(names, aliases),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
