use std::any::Any;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::Duration;

use tally_logging::{tally_debug, tally_warn};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;

use crate::{Stage, StageError, StageFailure};

type ChunkResult<U> = (usize, Option<Vec<U>>);

/// Runs one pure function over a batch of items on a bounded number of
/// blocking workers.
///
/// Items are cut into at most `workers` contiguous chunks. Each worker keeps
/// its outputs local and the chunks are stitched back together in input
/// order once every worker has finished, so no state is shared between
/// workers. The first failure cancels the rest of the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkerPool {
    workers: usize,
}

impl WorkerPool {
    /// A pool of `workers` workers; zero is treated as one.
    pub fn new(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
        }
    }

    pub fn with_available_parallelism() -> Self {
        Self::new(default_workers())
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Applies `f` to every item and returns the outputs in input order.
    ///
    /// With a `deadline`, the stage fails with
    /// [`StageFailure::DeadlineExceeded`] if the workers have not all
    /// finished in time. Nothing is returned on failure, not even the chunks
    /// that completed.
    pub async fn run<T, U, F>(
        &self,
        stage: Stage,
        items: Vec<T>,
        deadline: Option<Duration>,
        f: F,
    ) -> Result<Vec<U>, StageError>
    where
        T: Send + 'static,
        U: Send + 'static,
        F: Fn(T) -> U + Send + Sync + 'static,
    {
        let chunks = split_chunks(items, self.workers);
        let chunk_count = chunks.len();
        tally_debug!("{} stage: {} chunks on {} workers", stage, chunk_count, self.workers);

        let cancel = CancellationToken::new();
        let f = Arc::new(f);
        let mut tasks: JoinSet<ChunkResult<U>> = JoinSet::new();
        for (index, chunk) in chunks.into_iter().enumerate() {
            let f = Arc::clone(&f);
            let cancel = cancel.clone();
            tasks.spawn_blocking(move || {
                let mut out = Vec::with_capacity(chunk.len());
                for item in chunk {
                    if cancel.is_cancelled() {
                        return (index, None);
                    }
                    out.push((*f)(item));
                }
                (index, Some(out))
            });
        }

        let result = match deadline {
            Some(limit) => {
                match tokio::time::timeout(limit, collect_chunks(&mut tasks, chunk_count, stage))
                    .await
                {
                    Ok(result) => result,
                    Err(_) => Err(StageError::new(
                        stage,
                        StageFailure::DeadlineExceeded(limit),
                    )),
                }
            }
            None => collect_chunks(&mut tasks, chunk_count, stage).await,
        };

        if let Err(err) = &result {
            tally_warn!("Cancelling outstanding {} work: {}", stage, err);
            cancel.cancel();
            tasks.abort_all();
        }
        result
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::with_available_parallelism()
    }
}

pub(crate) fn default_workers() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(4)
}

async fn collect_chunks<U>(
    tasks: &mut JoinSet<ChunkResult<U>>,
    chunk_count: usize,
    stage: Stage,
) -> Result<Vec<U>, StageError>
where
    U: Send + 'static,
{
    let mut slots: Vec<Option<Vec<U>>> = (0..chunk_count).map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok((index, Some(out))) => slots[index] = Some(out),
            Ok((_, None)) => return Err(StageError::new(stage, StageFailure::Cancelled)),
            Err(err) if err.is_panic() => {
                let message = panic_message(err.into_panic());
                return Err(StageError::new(stage, StageFailure::WorkerPanicked(message)));
            }
            Err(_) => return Err(StageError::new(stage, StageFailure::Cancelled)),
        }
    }
    Ok(slots.into_iter().flatten().flatten().collect())
}

fn split_chunks<T>(items: Vec<T>, workers: usize) -> Vec<Vec<T>> {
    if items.is_empty() {
        return Vec::new();
    }
    let chunk_len = items.len().div_ceil(workers);
    let mut chunks = Vec::with_capacity(items.len().div_ceil(chunk_len));
    let mut iter = items.into_iter();
    loop {
        let chunk: Vec<T> = iter.by_ref().take(chunk_len).collect();
        if chunk.is_empty() {
            break;
        }
        chunks.push(chunk);
    }
    chunks
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
