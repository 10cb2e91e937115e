use clap::{Parser as ClapParser, Subcommand};
use qp8db::cli::{self, CheckOptions, CliError, FormatOptions, ScanOptions};
use std::io::{self, Read};

#[derive(ClapParser)]
#[command(name = "qp8")]
#[command(about = "qp8 - scan and parse SELECT/FROM/WHERE queries")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the scanner's chunks, one per line
    Scan {
        /// The query to scan (reads from stdin if not provided)
        query: Option<String>,
    },

    /// Parse a query and print its tree as JSON
    Check {
        /// The query to parse (reads from stdin if not provided)
        query: Option<String>,

        /// Pretty-print the output
        #[arg(short, long)]
        pretty: bool,

        /// Only validate syntax, don't print the tree
        #[arg(long)]
        syntax_only: bool,
    },

    /// Parse a query and print it in canonical form
    Format {
        /// The query to format (reads from stdin if not provided)
        query: Option<String>,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command) {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

fn run(command: Commands) -> Result<(), CliError> {
    match command {
        Commands::Scan { query } => {
            let options = ScanOptions {
                input: read_input(query)?,
            };
            for line in cli::execute_scan(&options)? {
                println!("{}", line);
            }
        }
        Commands::Check {
            query,
            pretty,
            syntax_only,
        } => {
            let options = CheckOptions {
                input: read_input(query)?,
                syntax_only,
            };
            let result = cli::execute_check(&options)?;
            println!("{}", result.render(pretty)?);
        }
        Commands::Format { query } => {
            let options = FormatOptions {
                input: read_input(query)?,
            };
            println!("{}", cli::execute_format(&options)?);
        }
    }
    Ok(())
}

/// Takes the query from the argument, or from stdin when it is piped.
///
/// Stdin is read as raw bytes so malformed UTF-8 reaches the scanner intact.
fn read_input(query: Option<String>) -> Result<Option<Vec<u8>>, CliError> {
    match query {
        Some(q) => Ok(Some(q.into_bytes())),
        None if !atty::is(atty::Stream::Stdin) => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            Ok(Some(buffer))
        }
        None => Ok(None),
    }
}
