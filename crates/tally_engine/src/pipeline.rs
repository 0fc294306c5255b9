use std::sync::Arc;
use std::time::Duration;

use tally_core::{
    shuffle, Mapper, PunctuationTokenizer, Reducer, SumReducer, Tokenizer, UnitMapper, WordCounts,
};
use tally_logging::{tally_debug, tally_warn};

use crate::pool::default_workers;
use crate::{
    decode_text, FetchSettings, Fetcher, NullProgressSink, PipelineError, PipelineEvent,
    ProgressSink, ReqwestFetcher, RunReport, Stage, StageProgress, WorkerPool,
};

#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Worker count for the map and reduce stages.
    pub workers: usize,
    /// Upper bound on each of the map and reduce stages; `None` waits forever.
    pub stage_deadline: Option<Duration>,
    pub fetch: FetchSettings,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            stage_deadline: None,
            fetch: FetchSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineOutput {
    pub counts: WordCounts,
    pub report: RunReport,
}

/// Fetch, decode, tokenize, map, shuffle, reduce.
///
/// Each stage feeds the next; the first failure ends the run and no counts
/// are returned with an error.
pub struct Pipeline {
    config: PipelineConfig,
    fetcher: Arc<dyn Fetcher>,
    tokenizer: Arc<dyn Tokenizer>,
    mapper: Arc<dyn Mapper>,
    reducer: Arc<dyn Reducer>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self {
            config,
            fetcher,
            tokenizer: Arc::new(PunctuationTokenizer),
            mapper: Arc::new(UnitMapper),
            reducer: Arc::new(SumReducer),
        }
    }

    pub fn with_fetcher(mut self, fetcher: Arc<dyn Fetcher>) -> Self {
        self.fetcher = fetcher;
        self
    }

    pub fn with_tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = tokenizer;
        self
    }

    pub fn with_mapper(mut self, mapper: Arc<dyn Mapper>) -> Self {
        self.mapper = mapper;
        self
    }

    pub fn with_reducer(mut self, reducer: Arc<dyn Reducer>) -> Self {
        self.reducer = reducer;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub async fn run(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<PipelineOutput, PipelineError> {
        let result = self.run_stages(url, sink).await;
        match &result {
            Ok(output) => sink.emit(PipelineEvent::Finished(output.report.clone())),
            Err(err) => {
                tally_warn!("Word count of {} failed: {}", url, err);
                sink.emit(PipelineEvent::Failed {
                    stage: err.stage(),
                    message: err.to_string(),
                });
            }
        }
        result
    }

    async fn run_stages(
        &self,
        url: &str,
        sink: &dyn ProgressSink,
    ) -> Result<PipelineOutput, PipelineError> {
        sink.emit(PipelineEvent::Progress(StageProgress::stage(Stage::Fetching)));
        let fetched = self.fetcher.fetch(url, sink).await?;
        tally_debug!(
            "Fetched {} bytes from {} ({} redirects)",
            fetched.metadata.byte_len,
            fetched.metadata.final_url,
            fetched.metadata.redirect_count
        );

        sink.emit(PipelineEvent::Progress(StageProgress {
            bytes: Some(fetched.metadata.byte_len),
            ..StageProgress::stage(Stage::Decoding)
        }));
        let decoded = decode_text(&fetched.bytes, fetched.metadata.content_type.as_deref());

        let counts = self.count_text(&decoded.text, sink).await?;
        let report = RunReport {
            source_url: fetched.metadata.original_url,
            final_url: fetched.metadata.final_url,
            byte_len: fetched.metadata.byte_len,
            encoding: decoded.encoding_label,
            total_tokens: counts.total(),
            distinct_words: counts.len(),
            workers: self.pool().workers(),
        };
        Ok(PipelineOutput { counts, report })
    }

    /// Runs tokenize, map, shuffle and reduce over text already in hand.
    pub async fn count_text(
        &self,
        text: &str,
        sink: &dyn ProgressSink,
    ) -> Result<WordCounts, PipelineError> {
        let pool = self.pool();
        let deadline = self.config.stage_deadline;

        sink.emit(PipelineEvent::Progress(StageProgress::stage(Stage::Tokenizing)));
        let tokens = self.tokenizer.tokenize(text);
        let token_count = tokens.len();

        sink.emit(PipelineEvent::Progress(StageProgress {
            tokens: Some(token_count),
            ..StageProgress::stage(Stage::Mapping)
        }));
        let mapper = Arc::clone(&self.mapper);
        let pairs = pool
            .run(Stage::Mapping, tokens, deadline, move |token| mapper.map(token))
            .await
            .map_err(PipelineError::Map)?;

        // Barrier: every mapped pair exists before grouping starts.
        sink.emit(PipelineEvent::Progress(StageProgress {
            tokens: Some(token_count),
            ..StageProgress::stage(Stage::Shuffling)
        }));
        let shuffled = shuffle(pairs);
        let group_count = shuffled.len();
        tally_debug!("Shuffled {} pairs into {} groups", token_count, group_count);

        sink.emit(PipelineEvent::Progress(StageProgress {
            tokens: Some(token_count),
            groups: Some(group_count),
            ..StageProgress::stage(Stage::Reducing)
        }));
        let reducer = Arc::clone(&self.reducer);
        let reduced = pool
            .run(
                Stage::Reducing,
                shuffled.into_entries(),
                deadline,
                move |entry| reducer.reduce(entry),
            )
            .await
            .map_err(PipelineError::Reduce)?;

        let counts: WordCounts = reduced.into_iter().collect();
        sink.emit(PipelineEvent::Progress(StageProgress {
            tokens: Some(token_count),
            groups: Some(counts.len()),
            ..StageProgress::stage(Stage::Done)
        }));
        Ok(counts)
    }

    fn pool(&self) -> WorkerPool {
        WorkerPool::new(self.config.workers)
    }
}

/// Runs the full pipeline on a runtime owned by this call.
///
/// Must not be called from inside an async context.
pub fn run_blocking(
    url: &str,
    config: &PipelineConfig,
    sink: &dyn ProgressSink,
) -> Result<PipelineOutput, PipelineError> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(PipelineError::Runtime)?;
    let pipeline = Pipeline::new(config.clone());
    runtime.block_on(pipeline.run(url, sink))
}

/// Counts the words of the document at `url`.
pub fn count_words(url: &str, config: &PipelineConfig) -> Result<WordCounts, PipelineError> {
    run_blocking(url, config, &NullProgressSink).map(|output| output.counts)
}
