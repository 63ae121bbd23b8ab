mod command;
mod config;
mod input;
mod repl;

use std::path::PathBuf;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::command::Command;
use crate::input::{InputSource, ScriptSource, StdinSource};
use crate::repl::{Reply, Repl};

/// Headless project board driven by line commands.
#[derive(Parser, Debug)]
#[command(name = "trellis", version)]
struct Cli {
    /// Settings file (missing file means defaults).
    #[arg(long, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Read commands from a file instead of stdin.
    #[arg(long)]
    script: Option<PathBuf>,

    /// Print `status` as JSON.
    #[arg(long)]
    json: bool,
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = config::load_settings(&cli.config)?;
    init_tracing(&settings.log_filter);

    let mut source: Box<dyn InputSource> = match &cli.script {
        Some(path) => Box::new(ScriptSource::from_file(path).await?),
        None => Box::new(StdinSource::new()),
    };

    // the board lives on this task only; commands run one at a time
    let mut repl = Repl::new(settings.rules, cli.json)?;
    info!(script = ?cli.script, "board ready");

    while let Some(line) = source.next_line().await? {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                eprintln!("error: {err:#}");
                continue;
            }
        };
        match repl.apply(command) {
            Ok(Reply::Output(out)) => println!("{out}"),
            Ok(Reply::Quit) => break,
            Err(err) => eprintln!("error: {err:#}"),
        }
    }

    let counts = repl.board().store().counts();
    info!(active = counts.active, finished = counts.finished, "board closed");
    Ok(())
}
