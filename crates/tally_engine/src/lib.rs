//! Word tally engine: fetching, decoding and the parallel map-reduce run.
mod decode;
mod export;
mod fetch;
mod pipeline;
mod pool;
mod progress;
mod types;

pub use decode::{decode_text, DecodedText};
pub use export::{export_counts, ExportError, ExportSummary};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use pipeline::{count_words, run_blocking, Pipeline, PipelineConfig, PipelineOutput};
pub use pool::WorkerPool;
pub use progress::{ChannelProgressSink, LogProgressSink, NullProgressSink, ProgressSink};
pub use types::{
    FailureKind, FetchError, FetchMetadata, FetchOutput, PipelineError, PipelineEvent, RunReport,
    Stage, StageError, StageFailure, StageProgress,
};
