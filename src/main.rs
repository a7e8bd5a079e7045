use arcmirror::{cli, logger};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut log = logger::Logger::new();
    let behavior = cli::parse(std::env::args_os());
    cli::execute(behavior, &mut log)
}
