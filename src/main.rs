use anyhow::Context;
use clap::Parser;
use fenceline::cli::{self, commands, output, ux};


/// Entry point for the fenceline CLI.
///
/// - `clause`: print an IN clause with N placeholders.
/// - `query`: assemble a statement around an IN clause, verify it, then plan or execute it.
/// - `authorize`: check that a file name stays inside a base directory.
/// - `store`: write content to a file name inside a base directory.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    ux::setup_logging(args.verbose, args.quiet, args.json)
        .context("Failed to set global default subscriber")?;

    let command_name = args.command.to_string();
    let result = commands::run(args.command).await;
    let output = output::CommandOutput::from_result(command_name, result);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        ux::render_human_output(&output);
    }

    if output.status == output::CommandStatus::Error {
        std::process::exit(1);
    }

    Ok(())
}
