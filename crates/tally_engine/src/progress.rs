use std::sync::mpsc;

use tally_logging::{tally_debug, tally_info, tally_trace};

use crate::{PipelineEvent, Stage};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: PipelineEvent);
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProgressSink;

impl ProgressSink for NullProgressSink {
    fn emit(&self, _event: PipelineEvent) {}
}

pub struct ChannelProgressSink {
    tx: mpsc::Sender<PipelineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: mpsc::Sender<PipelineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: PipelineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Writes events to the global logger. Download progress goes to trace since
/// it fires once per received chunk.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogProgressSink;

impl ProgressSink for LogProgressSink {
    fn emit(&self, event: PipelineEvent) {
        match event {
            PipelineEvent::Progress(progress) if progress.stage == Stage::Fetching => {
                tally_trace!("fetch: {} bytes", progress.bytes.unwrap_or(0));
            }
            PipelineEvent::Progress(progress) => {
                tally_debug!(
                    "stage={} tokens={:?} groups={:?}",
                    progress.stage,
                    progress.tokens,
                    progress.groups
                );
            }
            PipelineEvent::Finished(report) => {
                tally_info!(
                    "Counted {} tokens, {} distinct words from {} ({} bytes, {}, {} workers)",
                    report.total_tokens,
                    report.distinct_words,
                    report.final_url,
                    report.byte_len,
                    report.encoding,
                    report.workers
                );
            }
            PipelineEvent::Failed { stage, message } => {
                tally_debug!("Run failed during {} stage: {}", stage, message);
            }
        }
    }
}
