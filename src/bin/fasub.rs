use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use fasub_rs::{subsample, FastaError, FastaReader, SubsampleOptions, Window, LINE_WIDTH};
use std::fs::File;
use std::io::{self, BufWriter};
use std::ffi::OsString;
use std::path::PathBuf;
use std::process;

#[derive(Parser, Debug)]
#[command(name = "fasub")]
#[command(
    about = "Extract a random or ordered subsample of records from a FASTA file, optionally trimming each sequence"
)]
struct Cli {
    /// FASTA file path (must be a regular, seekable file)
    fasta: PathBuf,

    /// Number of records to sample
    n: usize,

    /// Random seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Keep file order instead of sampling randomly (overrides --seed)
    #[arg(long)]
    norand: bool,

    /// Write the records that were not sampled to this file
    #[arg(long, value_name = "PATH")]
    rest: Option<PathBuf>,

    /// 1-based start position of the output window
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u64).range(1..))]
    off: u64,

    /// Maximum output length per sequence (default: to the end)
    #[arg(long)]
    len: Option<usize>,
}

/// Options that also accept a single-dash spelling (`-seed 3`)
const LONG_OPTIONS: &[&str] = &["seed", "norand", "rest", "off", "len", "help"];

/// Rewrite `-seed` style options to `--seed` so clap can parse them
fn normalize_args<I: IntoIterator<Item = OsString>>(args: I) -> Vec<OsString> {
    args.into_iter()
        .map(|arg| {
            let long = arg
                .to_str()
                .and_then(|s| s.strip_prefix('-'))
                .filter(|name| LONG_OPTIONS.contains(name))
                .map(|name| OsString::from(format!("--{}", name)));
            long.unwrap_or(arg)
        })
        .collect()
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse_from(normalize_args(std::env::args_os()));

    if !cli.fasta.exists() {
        Cli::command()
            .error(
                ErrorKind::ValueValidation,
                format!("FASTA file not found: {}", cli.fasta.display()),
            )
            .exit();
    }

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let options = SubsampleOptions {
        seed: cli.seed,
        random: !cli.norand,
        window: Window::new(usize::try_from(cli.off)?, cli.len)?,
        line_width: LINE_WIDTH,
    };

    let mut reader = FastaReader::open(&cli.fasta)?;

    // open the rest output before anything is written
    let rest_out = match &cli.rest {
        Some(path) => {
            let file = File::create(path).map_err(|source| FastaError::Open {
                path: path.display().to_string(),
                source,
            })?;
            Some(BufWriter::new(file))
        }
        None => None,
    };

    let stdout = io::stdout();
    subsample(&mut reader, cli.n, &options, BufWriter::new(stdout.lock()), rest_out)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<OsString> {
        line.split_whitespace().map(OsString::from).collect()
    }

    #[test]
    fn test_single_dash_options() {
        let cli = Cli::try_parse_from(normalize_args(args(
            "fasub in.fa 5 -seed 7 -norand -rest rest.fa -off 3 -len 20",
        )))
        .unwrap();
        assert_eq!(cli.n, 5);
        assert_eq!(cli.seed, 7);
        assert!(cli.norand);
        assert_eq!(cli.rest, Some(PathBuf::from("rest.fa")));
        assert_eq!(cli.off, 3);
        assert_eq!(cli.len, Some(20));
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(args("fasub in.fa 2")).unwrap();
        assert_eq!(cli.seed, 1);
        assert!(!cli.norand);
        assert_eq!(cli.off, 1);
        assert_eq!(cli.len, None);
        assert!(cli.rest.is_none());
    }

    #[test]
    fn test_usage_errors() {
        assert!(Cli::try_parse_from(args("fasub in.fa")).is_err());
        assert!(Cli::try_parse_from(args("fasub in.fa many")).is_err());
        assert!(Cli::try_parse_from(normalize_args(args("fasub in.fa 2 -off 0"))).is_err());
    }

    #[test]
    fn test_normalize_leaves_other_args() {
        assert_eq!(
            normalize_args(args("fasub -x in.fa --seed 2 -len 4")),
            ["fasub", "-x", "in.fa", "--seed", "2", "--len", "4"]
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_path_argument() {
        use std::os::unix::ffi::OsStringExt;

        let path = OsString::from_vec(b"caf\xe9.fa".to_vec());
        let argv = vec![
            OsString::from("fasub"),
            path.clone(),
            OsString::from("1"),
            OsString::from("-norand"),
        ];
        let cli = Cli::try_parse_from(normalize_args(argv)).unwrap();
        assert_eq!(cli.fasta, PathBuf::from(path));
        assert!(cli.norand);
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }
}
