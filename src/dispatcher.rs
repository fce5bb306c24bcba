// Worker pool for wordfuzz
// Partitions the wordlist, runs one task per batch and joins them all

use std::sync::Arc;

use tokio::task::JoinSet;

use crate::cancel::Cancellation;
use crate::engine::RequestExecutor;
use crate::models::{FilterSet, Job, RequestSpec};
use crate::partition::partition_jobs;
use crate::reporting::ReportSink;
use crate::verdict::{decide_verdict, Verdict};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Partitioning,
    Running,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Cancelled,
}

/// Per-verdict tallies for one worker or a whole run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VerdictCounts {
    pub matches: usize,
    pub redirects: usize,
    pub suppressed: usize,
    pub transport_errors: usize,
}

impl VerdictCounts {
    fn record(&mut self, verdict: &Verdict) {
        match verdict {
            Verdict::Match { .. } => self.matches += 1,
            Verdict::Redirect { .. } => self.redirects += 1,
            Verdict::Suppressed => self.suppressed += 1,
            Verdict::TransportError => self.transport_errors += 1,
        }
    }

    fn merge(&mut self, other: VerdictCounts) {
        self.matches += other.matches;
        self.redirects += other.redirects;
        self.suppressed += other.suppressed;
        self.transport_errors += other.transport_errors;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub outcome: RunOutcome,
    pub workers: usize,
    pub processed: usize,
    pub total: usize,
    pub counts: VerdictCounts,
}

/// Everything a worker shares with the rest of the run.
struct RunContext<E> {
    executor: Arc<E>,
    sink: Arc<ReportSink>,
    spec: Arc<RequestSpec>,
    filters: Arc<FilterSet>,
    cancel: Cancellation,
}

impl<E> Clone for RunContext<E> {
    fn clone(&self) -> Self {
        Self {
            executor: Arc::clone(&self.executor),
            sink: Arc::clone(&self.sink),
            spec: Arc::clone(&self.spec),
            filters: Arc::clone(&self.filters),
            cancel: self.cancel.clone(),
        }
    }
}

pub struct Dispatcher<E> {
    executor: Arc<E>,
    sink: Arc<ReportSink>,
    spec: Arc<RequestSpec>,
    filters: Arc<FilterSet>,
    threads: usize,
    state: DispatchState,
}

impl<E: RequestExecutor + 'static> Dispatcher<E> {
    pub fn new(
        executor: E,
        sink: Arc<ReportSink>,
        spec: RequestSpec,
        filters: FilterSet,
        threads: usize,
    ) -> Self {
        Self {
            executor: Arc::new(executor),
            sink,
            spec: Arc::new(spec),
            filters: Arc::new(filters),
            threads: threads.max(1),
            state: DispatchState::Idle,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Process every word, or stop early once `cancel` is set.
    ///
    /// Always waits for every spawned worker before returning.
    pub async fn run(&mut self, words: Vec<Job>, cancel: &Cancellation) -> RunSummary {
        self.state = DispatchState::Partitioning;
        let total = words.len();
        let batches = partition_jobs(&words, self.threads);
        let workers = batches.len();
        log::debug!(
            "partitioned {} words into {} batches: {:?}",
            total,
            workers,
            batches.iter().map(Vec::len).collect::<Vec<_>>()
        );
        self.sink.begin(total);

        self.state = DispatchState::Running;
        let ctx = RunContext {
            executor: Arc::clone(&self.executor),
            sink: Arc::clone(&self.sink),
            spec: Arc::clone(&self.spec),
            filters: Arc::clone(&self.filters),
            cancel: cancel.clone(),
        };

        let mut tasks = JoinSet::new();
        for (id, batch) in batches.into_iter().enumerate() {
            tasks.spawn(run_worker(id, batch, ctx.clone()));
        }

        let mut counts = VerdictCounts::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(worker_counts) => counts.merge(worker_counts),
                Err(e) => log::error!("worker task failed: {}", e),
            }
        }

        let outcome = if cancel.is_cancelled() {
            self.state = DispatchState::Cancelled;
            RunOutcome::Cancelled
        } else {
            self.state = DispatchState::Completed;
            RunOutcome::Completed
        };

        let progress = self.sink.progress();
        self.state = DispatchState::Idle;
        RunSummary {
            outcome,
            workers,
            processed: progress.processed,
            total: progress.total,
            counts,
        }
    }
}

async fn run_worker<E: RequestExecutor>(
    id: usize,
    batch: Vec<Job>,
    ctx: RunContext<E>,
) -> VerdictCounts {
    log::debug!("worker {} starting with {} jobs", id, batch.len());
    let mut counts = VerdictCounts::default();

    for word in &batch {
        if ctx.cancel.is_cancelled() {
            log::info!("worker {} observed cancellation", id);
            break;
        }

        let request = ctx.spec.render(word);
        let outcome = ctx.executor.execute(&request).await;
        if let Err(e) = &outcome {
            log::trace!("{} {}: {}", request.method, request.url, e);
        }

        let verdict = decide_verdict(&outcome, &ctx.filters);
        match &verdict {
            Verdict::Match { status, size } => {
                ctx.sink
                    .report_match(&request.url, *status, *size, request.body.as_deref())
            }
            Verdict::Redirect { location, status } => ctx.sink.report_redirect(
                &request.url,
                *status,
                location,
                request.body.as_deref(),
            ),
            Verdict::Suppressed | Verdict::TransportError => {}
        }
        counts.record(&verdict);
        ctx.sink.tick();
    }

    log::debug!("worker {} finished", id);
    counts
}
