use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Fetching,
    Decoding,
    Tokenizing,
    Mapping,
    Shuffling,
    Reducing,
    Done,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Fetching => "fetch",
            Stage::Decoding => "decode",
            Stage::Tokenizing => "tokenize",
            Stage::Mapping => "map",
            Stage::Shuffling => "shuffle",
            Stage::Reducing => "reduce",
            Stage::Done => "done",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageProgress {
    pub stage: Stage,
    pub bytes: Option<u64>,
    pub tokens: Option<usize>,
    pub groups: Option<usize>,
}

impl StageProgress {
    pub fn stage(stage: Stage) -> Self {
        Self {
            stage,
            bytes: None,
            tokens: None,
            groups: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineEvent {
    Progress(StageProgress),
    Finished(RunReport),
    Failed { stage: Stage, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOutput {
    pub bytes: Vec<u8>,
    pub metadata: FetchMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchMetadata {
    pub original_url: String,
    pub final_url: String,
    pub redirect_count: usize,
    pub content_type: Option<String>,
    pub byte_len: u64,
}

/// Summary of a successful run. Never built for a failed one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub source_url: String,
    pub final_url: String,
    pub byte_len: u64,
    pub encoding: String,
    pub total_tokens: u64,
    pub distinct_words: usize,
    pub workers: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct FetchError {
    pub kind: FailureKind,
    pub message: String,
}

impl FetchError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    RedirectLimitExceeded,
    TooLarge { max_bytes: u64, actual: Option<u64> },
    UnsupportedContentType { content_type: String },
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::RedirectLimitExceeded => write!(f, "redirect limit exceeded"),
            FailureKind::TooLarge { max_bytes, actual } => {
                write!(f, "response too large (max {max_bytes}, actual {actual:?})")
            }
            FailureKind::UnsupportedContentType { content_type } => {
                write!(f, "unsupported content type {content_type}")
            }
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Why a parallel stage gave up.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StageFailure {
    #[error("worker panicked: {0}")]
    WorkerPanicked(String),
    #[error("deadline of {0:?} exceeded")]
    DeadlineExceeded(Duration),
    #[error("cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage} stage: {failure}")]
pub struct StageError {
    pub stage: Stage,
    pub failure: StageFailure,
}

impl StageError {
    pub fn new(stage: Stage, failure: StageFailure) -> Self {
        Self { stage, failure }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("map failed: {0}")]
    Map(StageError),
    #[error("reduce failed: {0}")]
    Reduce(StageError),
    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] std::io::Error),
}

impl PipelineError {
    /// The stage the run was in when it failed.
    pub fn stage(&self) -> Stage {
        match self {
            PipelineError::Fetch(_) | PipelineError::Runtime(_) => Stage::Fetching,
            PipelineError::Map(err) | PipelineError::Reduce(err) => err.stage,
        }
    }
}
