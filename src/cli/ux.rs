use crate::cli::output::{CommandOutput, CommandStatus};
use tracing::subscriber::SetGlobalDefaultError;


pub fn setup_logging(verbose: u8, quiet: bool, json: bool) -> Result<(), SetGlobalDefaultError> {
    if json {
        // Keep stdout clean for the JSON envelope
        return tracing::subscriber::set_global_default(tracing::subscriber::NoSubscriber::default());
    }

    let level = if quiet {
        tracing::Level::ERROR
    } else { match verbose {
        0 => tracing::Level::INFO,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    }};

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
}


pub fn render_human_output(output: &CommandOutput<serde_json::Value>) {
    match output.status {
        CommandStatus::Success => {
            if let Some(data) = &output.data {
                println!("{}", render_value(data));
            }
        }
        CommandStatus::Error => {
            if let Some(error) = &output.error {
                let message = serde_json::to_value(error)
                    .ok()
                    .and_then(|v| v["message"].as_str().map(str::to_string))
                    .unwrap_or_default();
                eprintln!("{} failed: {}", output.command, message);
            }
        }
    }
}

/// Flat `key: value` lines for objects, the bare value otherwise.
fn render_value(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::Object(map) => map
            .iter()
            .map(|(key, value)| format!("{key}: {}", render_scalar(value)))
            .collect::<Vec<_>>()
            .join("\n"),
        other => render_scalar(other),
    }
}

fn render_scalar(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
