//!
//! `jsonlint <FILE>`: exits 0 when the file holds one
//! valid JSON document, 1 otherwise.
//!

use std::{fs::File, num::NonZeroUsize, path::PathBuf, process::ExitCode};

use anyhow::Context;
use clap::Parser;
use env_logger::{self as logger};
use log::{error, info};

use jsonlint::{validate, DuplicateKeys, Lexer, ParserOptions, Report};

#[derive(Parser, Debug)]
#[command(version, about = "Validate a JSON (RFC 8259) document")]
struct Opts {
    /// Print every token before validating.
    #[arg(long)]
    tokens: bool,

    /// Treat a repeated object key as an error.
    #[arg(long, env = "JSONLINT_REJECT_DUPLICATE_KEYS")]
    reject_duplicate_keys: bool,

    /// Deepest array/object nesting accepted [default: 512].
    #[arg(long, env = "JSONLINT_MAX_DEPTH")]
    max_depth: Option<NonZeroUsize>,

    /// The JSON file to validate.
    #[arg(value_name = "FILE")]
    file: PathBuf,
}

impl Opts {
    fn parser_options(&self) -> ParserOptions {
        let mut options = ParserOptions::default();
        if self.reject_duplicate_keys {
            options.duplicate_keys = DuplicateKeys::Reject;
        }
        if let Some(depth) = self.max_depth {
            options.max_depth = depth.get();
        }

        options
    }
}

fn open(opts: &Opts) -> anyhow::Result<File> {
    File::open(&opts.file).with_context(|| format!("failed to open {}", opts.file.display()))
}

fn print_tokens(opts: &Opts) -> anyhow::Result<()> {
    for token in Lexer::from_reader(open(opts)?) {
        match token {
            Ok(token) => println!("{token}"),
            // Validation reports it.
            Err(_) => break,
        }
    }

    Ok(())
}

///
/// `Ok(false)` when the document was read but rejected.
///
fn run(opts: &Opts) -> anyhow::Result<bool> {
    if opts.tokens {
        print_tokens(opts)?;
    }

    match validate(open(opts)?, opts.parser_options()) {
        Ok(_) => {
            info!("JSON file located in {} is valid", opts.file.display());
            Ok(true)
        }
        Err(err) => {
            error!("{}", Report::new(&opts.file, err));
            Ok(false)
        }
    }
}

fn main() -> ExitCode {
    logger::Builder::from_env(logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let opts = match Opts::try_parse() {
        Ok(opts) => opts,
        Err(err) => {
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&opts) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::Opts;
    use jsonlint::DuplicateKeys;

    #[test]
    fn defaults() {
        let opts = Opts::try_parse_from(["jsonlint", "a.json"]).unwrap();
        let options = opts.parser_options();
        assert_eq!(options.duplicate_keys, DuplicateKeys::LastWins);
        assert_eq!(options.max_depth, 512);
        assert!(!opts.tokens);
    }

    #[test]
    fn flags() {
        let opts = Opts::try_parse_from([
            "jsonlint",
            "--tokens",
            "--reject-duplicate-keys",
            "--max-depth",
            "8",
            "a.json",
        ])
        .unwrap();
        let options = opts.parser_options();
        assert_eq!(options.duplicate_keys, DuplicateKeys::Reject);
        assert_eq!(options.max_depth, 8);
        assert!(opts.tokens);
    }

    #[test]
    fn usage_errors() {
        assert!(Opts::try_parse_from(["jsonlint"]).is_err());
        assert!(Opts::try_parse_from(["jsonlint", "a.json", "b.json"]).is_err());
        assert!(Opts::try_parse_from(["jsonlint", "--max-depth", "0", "a.json"]).is_err());
    }
}
