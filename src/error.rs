use std::path::PathBuf;
use thiserror::Error;

/// The rank matrix does not line up with the competitor list.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    #[error("no competitors were provided")]
    NoCompetitors,

    #[error("no judge rankings were provided")]
    NoJudges,

    #[error("judge {judge} ranked {found} competitors, expected {expected}")]
    RowLength {
        judge: usize,
        expected: usize,
        found: usize,
    },
}

/// A judge row that cannot be aggregated into a meaningful histogram.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DegenerateInputError {
    #[error("judge {judge} gave competitor {competitor} rank {rank}, ranks must be between 1 and {max}")]
    RankOutOfRange {
        judge: usize,
        competitor: usize,
        rank: u32,
        max: usize,
    },

    #[error("judge {judge} gave rank {rank} to more than one competitor")]
    DuplicateRank { judge: usize, rank: u32 },
}

/// Errors raised by the ranking engine before any placement work begins.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ScoringError {
    #[error(transparent)]
    Dimension(#[from] DimensionError),

    #[error(transparent)]
    DegenerateInput(#[from] DegenerateInputError),
}

/// Errors from reading a scorecard.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("scorecard looks like JSON but failed to parse: {0}")]
    Json(#[from] serde_json::Error),

    #[error("line {line}: unrecognised entry \"{content}\"")]
    UnknownLine { line: usize, content: String },

    #[error("line {line}: \"{value}\" is not a valid rank")]
    BadRank { line: usize, value: String },

    #[error("scorecard lists no competitors")]
    MissingCompetitors,

    #[error("scorecard lists no judges")]
    MissingJudges,
}

/// Top-level errors surfaced by the `relplace` binary.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} already exists", .0.display())]
    AlreadyExists(PathBuf),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Sheet(#[from] SheetError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),

    #[error("failed to serialize results: {0}")]
    Output(#[from] serde_json::Error),
}
