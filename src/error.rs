use thiserror::Error;

/// Errors raised by the trivial-graph parser, the CLI option collector, and
/// config-file loading. The search engine itself never returns `Error`: a
/// well-formed `Aaf` and `Config` always either find a labeling, prove
/// unsatisfiability, or time out (see `engine::Outcome`).
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("line {line}: attack references unknown argument {name:?}")]
    UnknownArgument { line: usize, name: String },

    #[error("line {line}: malformed attack line {text:?}, expected \"name1 name2\"")]
    MalformedAttackLine { line: usize, text: String },

    #[error("unsupported track {track:?}, this solver only implements SE-ST")]
    UnsupportedTrack { track: String },

    #[error("option {key}={value:?} is not a valid number")]
    InvalidOption { key: String, value: String },

    #[error("failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
