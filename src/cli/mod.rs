pub mod commands;
pub mod error;
pub mod output;
pub mod ux;

pub use clap::{Parser, Subcommand};
use std::path::PathBuf;


#[derive(Parser)]
#[command(name = "fenceline", version, about = "Bind runtime-sized IN lists as parameters and keep file writes inside a trusted directory.")]
pub struct Cli {
    #[arg(
        short,
        long,
        action = clap::ArgAction::Count,
        help = "Set level of verbosity. [default: INFO]\n\t-v: DEBUG\n\t-vv: TRACE\n--quiet takes precedence over --verbose."
    )]
    pub verbose: u8,

    #[arg(
        short,
        long,
        action = clap::ArgAction::SetTrue,
        help = "Disable all information logs (only ERROR level logs are shown).\n--quiet takes precedence over --verbose."
    )]
    pub quiet: bool,

    #[arg(
        long,
        action = clap::ArgAction::SetTrue,
        help = "Enable JSON output format. Human readable output is disabled when this flag is set."
    )]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Parser, Debug)]
pub struct QueryArgs {
    #[arg(
        long = "db",
        help = "Database connection string, e.g.:
    postgresql://<username>:<password>@<host>:<port>/<database>\n",
        env = "DB_CONNECTION_STRING",
        hide_env_values = true
    )]
    pub db_connection_string: Option<String>,

    #[arg(long, help = "Query text placed before the IN clause. Placeholders here bind --leading values.")]
    pub prefix: String,

    #[arg(
        long = "value",
        help = "Membership value bound to the IN clause; repeat for each value. Each value is trimmed.",
    )]
    pub values: Vec<String>,

    #[arg(long, default_value = "", help = "Query text placed after the IN clause. Placeholders here bind --trailing values.")]
    pub suffix: String,

    #[arg(long, help = "Value for the next placeholder in --prefix; repeat in textual order.")]
    pub leading: Vec<String>,

    #[arg(long, help = "Value for the next placeholder in --suffix; repeat in textual order.")]
    pub trailing: Vec<String>,

    #[arg(long, help = "Name reported if placeholders and parameters disagree.")]
    pub label: Option<String>,

    #[arg(long, help = "Return the first column of every row instead of the affected row count.")]
    pub fetch: bool,

    #[arg(long, help = "Assemble and verify the statement, print it, and skip execution.")]
    pub plan: bool,
}

#[derive(Parser, Debug)]
pub struct TargetArgs {
    #[arg(
        long,
        help = "Trusted base directory writes must stay inside.",
        env = "FENCELINE_BASE_DIR",
    )]
    pub base: PathBuf,

    #[arg(long, help = "Requested file name, relative to --base.")]
    pub name: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(about = "Print an IN clause with the given number of placeholders.")]
    Clause {
        #[arg(long)]
        count: usize,
    },

    #[command(about = "Assemble a statement around an IN clause, verify it and execute it.")]
    Query {
        #[command(flatten)]
        args: QueryArgs,
    },

    #[command(about = "Resolve a file name against the base directory and check containment.")]
    Authorize {
        #[command(flatten)]
        target: TargetArgs,
    },

    #[command(about = "Write content to a file name inside the base directory.")]
    Store {
        #[command(flatten)]
        target: TargetArgs,

        #[arg(long, conflicts_with = "from", required_unless_present = "from", help = "Content to write.")]
        content: Option<String>,

        #[arg(long, help = "Read the content to write from this file.")]
        from: Option<PathBuf>,
    },
}

impl std::fmt::Display for Commands {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Commands::Clause { .. } => "clause",
            Commands::Query { .. } => "query",
            Commands::Authorize { .. } => "authorize",
            Commands::Store { .. } => "store",
        };
        write!(f, "{name}")
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_query_lists() {
        let cli = Cli::try_parse_from([
            "fenceline",
            "query",
            "--prefix", "SELECT * FROM T WHERE D = ? AND B ",
            "--value", " BR1",
            "--value", "BR2",
            "--value", "Smith, J",
            "--leading", "20240101",
            "--plan",
        ])
        .unwrap();

        match cli.command {
            Commands::Query { args } => {
                assert_eq!(args.values, vec![" BR1", "BR2", "Smith, J"]);
                assert_eq!(args.leading, vec!["20240101"]);
                assert!(args.trailing.is_empty());
                assert_eq!(args.suffix, "");
                assert!(args.plan);
            }
            other => panic!("Unexpected command: {other}"),
        }
    }

    #[test]
    fn store_requires_exactly_one_content_source() {
        let missing = Cli::try_parse_from(["fenceline", "store", "--base", "/tmp", "--name", "a.txt"]);
        assert!(missing.is_err());

        let both = Cli::try_parse_from([
            "fenceline", "store", "--base", "/tmp", "--name", "a.txt", "--content", "x", "--from", "f.txt",
        ]);
        assert!(both.is_err());
    }

    #[test]
    fn command_names_match_subcommands() {
        let cli = Cli::try_parse_from(["fenceline", "clause", "--count", "3"]).unwrap();
        assert_eq!(cli.command.to_string(), "clause");
    }
}
