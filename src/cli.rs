//! Command-line surface for the `taas-aaf` binary: the well-known flags via
//! `clap`'s derive API, plus the open-ended `-key value` engine option table
//! collected as trailing tokens, since clap's derive macro has no way to
//! enumerate an unbounded set of flags statically.

use std::path::PathBuf;

use clap::Parser;

use crate::error::{Error, Result};

#[derive(Debug, Parser)]
#[command(name = "taas-aaf", version, about = "Stochastic local search solver for stable AAF extensions")]
pub struct Cli {
    /// Problem to solve. Only `SE-ST` is implemented.
    #[arg(short = 'p', long = "problem")]
    pub track: Option<String>,

    /// Path to the input file, in the trivial-graph-like attack-file format.
    #[arg(short = 'f', long = "file")]
    pub file: Option<PathBuf>,

    /// Additional argument, required by some tracks (unused by SE-ST).
    #[arg(short = 'a', long = "argument")]
    pub argument: Option<String>,

    /// Print supported input formats and exit.
    #[arg(long)]
    pub formats: bool,

    /// Print supported problems and exit.
    #[arg(long)]
    pub problems: bool,

    /// Optional TOML file of engine options, overridden by any `-key value`
    /// pair given on the command line.
    #[arg(long = "config")]
    pub config_path: Option<PathBuf>,

    /// Raw `-key value` engine option pairs, consumed two tokens at a time.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub rest: Vec<String>,
}

impl Cli {
    /// Pairs up `rest` into `(key, value)` engine options, stripping the
    /// leading `-`/`--` from each key. Mirrors the original's "consume the
    /// next token as the value" pass over `argv`.
    pub fn option_pairs(&self) -> Result<Vec<(String, String)>> {
        let mut pairs = Vec::new();
        let mut tokens = self.rest.iter();
        while let Some(raw_key) = tokens.next() {
            let key = raw_key.trim_start_matches('-').to_string();
            if key.is_empty() || key == raw_key.as_str() {
                return Err(Error::InvalidOption {
                    key: raw_key.clone(),
                    value: String::new(),
                });
            }
            let value = tokens.next().ok_or_else(|| Error::InvalidOption {
                key: key.clone(),
                value: String::new(),
            })?;
            pairs.push((key, value.clone()));
        }
        Ok(pairs)
    }

    /// Neither `-p` nor `-f` was given, and the caller didn't ask for
    /// `--formats`/`--problems` either: print the full solver description
    /// and exit without running anything.
    pub fn wants_solver_information(&self) -> bool {
        !self.formats && !self.problems && (self.track.is_none() || self.file.is_none())
    }
}

pub const SUPPORTED_FORMATS: &[&str] = &["tgf"];
pub const SUPPORTED_PROBLEMS: &[&str] = &["SE-ST"];

/// Just the formats list, for `--formats` — one value per line, matching the
/// original's `printf("%s\n", info->formats)`.
pub fn formats_text() -> String {
    SUPPORTED_FORMATS.join("\n")
}

/// Just the problems list, for `--problems`.
pub fn problems_text() -> String {
    SUPPORTED_PROBLEMS.join("\n")
}

/// Name, version, and both lists together, printed when the solver is
/// invoked without enough to actually run (no `-p`/`-f`).
pub fn solver_information() -> String {
    format!(
        "taas-aaf {}\nformats: {}\nproblems: {}",
        env!("CARGO_PKG_VERSION"),
        SUPPORTED_FORMATS.join(","),
        SUPPORTED_PROBLEMS.join(","),
    )
}
