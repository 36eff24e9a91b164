mod cli;
mod config;
mod error;
mod logging;
mod output;

use std::io::IsTerminal;

use clap::{CommandFactory, Parser};
use tracing::debug;

use fortiswitch_api::Operation;

use crate::cli::{Cli, Command, GetArgs};
use crate::config::Settings;
use crate::error::{CliError, exit_code};
use crate::logging::LogConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    let code = run(cli).await;
    std::process::exit(code);
}

async fn run(cli: Cli) -> i32 {
    match cli.command {
        // Neither needs settings or a switch
        Command::Operations => finish(output::print_output(&Operation::names().join("\n"))),
        Command::Completions(args) => {
            let mut cmd = Cli::command();
            clap_complete::generate(args.shell, &mut cmd, "fortiswitch", &mut std::io::stdout());
            exit_code::SUCCESS
        }
        Command::Get(args) => {
            let settings = match config::load(&cli.global) {
                Ok(settings) => settings,
                Err(err) => {
                    let _guard = logging::init(&LogConfig::default()).ok().flatten();
                    return report(err);
                }
            };
            let _guard = match logging::init(&settings.log_config()) {
                Ok(guard) => guard,
                Err(err) => {
                    let _fallback = logging::init(&LogConfig::default()).ok().flatten();
                    return report(err);
                }
            };
            finish(get(&args, &settings).await)
        }
    }
}

fn finish(result: Result<(), CliError>) -> i32 {
    match result {
        Ok(()) => exit_code::SUCCESS,
        Err(err) => report(err),
    }
}

/// Log the error and return its exit code. On an interactive terminal the
/// full diagnostic with help text follows the log line.
fn report(err: CliError) -> i32 {
    err.log();
    let code = err.exit_code();
    if std::io::stderr().is_terminal() {
        eprintln!("{:?}", miette::Report::new(err));
    }
    code
}

async fn get(args: &GetArgs, settings: &Settings) -> Result<(), CliError> {
    let operation =
        Operation::parse(&args.operation).ok_or_else(|| CliError::UnsupportedOperation {
            given: args.operation.clone(),
            supported: Operation::names().join(", "),
        })?;
    let switch = settings.connection()?;

    debug!(
        operation = operation.name(),
        host = switch.endpoint().host(),
        raw = args.raw,
        "running operation"
    );

    let data = if args.raw {
        switch.fetch_raw(operation.endpoint()).await?
    } else {
        let telemetry = operation.run(&switch).await?;
        let identity = if settings.shape.needs_identity() {
            Some(switch.identity().await?)
        } else {
            None
        };
        output::shape(settings.shape, operation, telemetry, identity)
    };

    let rendered = output::render(settings.output, &data)?;
    output::print_output(&rendered)
}
