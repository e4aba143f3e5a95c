use clap::Parser;
use fasub_rs::json::write_json;
use fasub_rs::FastaError;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "fasta2json")]
#[command(about = "Convert FASTA records into a JSON object of header -> per-base array")]
struct Cli {
    /// FASTA file path; reads standard input when omitted or "-"
    fasta: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(short, long)]
    pretty: bool,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), FastaError> {
    let stdout = io::stdout();
    match cli.fasta.as_deref() {
        Some(path) if path.as_os_str() != "-" => {
            let file = File::open(path).map_err(|source| FastaError::Open {
                path: path.display().to_string(),
                source,
            })?;
            write_json(BufReader::new(file), stdout.lock(), cli.pretty)
        }
        _ => write_json(io::stdin().lock(), stdout.lock(), cli.pretty),
    }
}
