mod disambig;
mod extract;
mod fetch;
mod lexicon;
mod page;
mod session;

use std::io::{self, BufRead, Write};

use clap::{Parser, Subcommand};

use crate::disambig::ConsoleChooser;
use crate::lexicon::Lexicon;
use crate::session::Lookup;

#[derive(Parser)]
#[command(name = "wikipop", about = "Population lookup over Spanish Wikipedia articles")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a single place and print the result
    Query {
        /// Place name to resolve
        name: String,
        /// Emit the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();
    let fetcher = fetch::HttpFetcher::new()?;
    let patterns = Lexicon::default().compile()?;
    let mut chooser = ConsoleChooser;

    match cli.command {
        Some(Commands::Query { name, json }) => {
            let result = session::lookup(&fetcher, &patterns, &mut chooser, &name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_lookup(&result);
            }
        }
        None => run_interactive(&fetcher, &patterns, &mut chooser).await?,
    }

    Ok(())
}

/// Read-loop session: prompt for a place name, look it up, print, repeat.
/// A retrieval failure on the initial load of a query ends the session with
/// a non-zero exit; an empty result just moves on to the next prompt.
async fn run_interactive(
    fetcher: &fetch::HttpFetcher,
    patterns: &lexicon::Patterns,
    chooser: &mut ConsoleChooser,
) -> anyhow::Result<()> {
    print_banner();
    let stdin = io::stdin();
    loop {
        print!("Place name ('quit' to exit): ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let name = line.trim();
        if name.is_empty() {
            continue;
        }
        if name.eq_ignore_ascii_case("quit") || name.eq_ignore_ascii_case("salir") {
            break;
        }

        let result = session::lookup(fetcher, patterns, chooser, name).await?;
        print_lookup(&result);
    }
    println!("Goodbye!");
    Ok(())
}

fn print_lookup(result: &Lookup) {
    println!("\nSource: {}", result.url);
    match &result.population {
        Some(population) => {
            println!(
                "Population of {}: {}",
                fetch::title_case(&result.query),
                population
            );
            if let Some(area) = &result.area {
                println!("Area: {area}");
            }
            if let Some(density) = &result.density {
                println!("Density: {density}");
            }
        }
        None => println!("No population information found."),
    }
    println!();
}

fn print_banner() {
    println!("==========================================");
    println!("  wikipop - population lookup (Wikipedia)");
    println!("==========================================");
}
