//! Concurrent collection of quotes over a list of `(currency, source)` jobs.
//!
//! `RateCollector` fans jobs out to a fixed-size pool of scoped worker threads.
//! Workers pull jobs from a shared `crossbeam_channel` queue, so the number of
//! simultaneous fetches never exceeds the pool size, and push each job's own
//! result list back on a second channel. The caller merges those lists only after
//! every worker has been joined; nothing is shared mutably between workers.
//!
//! Failures stay local to their job: a failed fetch contributes zero quotes, is
//! logged and listed in [`Collection::failed`], and sibling jobs carry on.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::thread;

use crossbeam_channel::{Receiver, Sender, unbounded};
use log::{error, info, warn};

use crate::currency::Currency;
use crate::error::ScanError;
use crate::quote::Quote;
use crate::result::Result;
use crate::source::RateSource;

/// One unit of collection work.
#[derive(Clone)]
pub struct Job {
    /// Currency to fetch.
    pub currency: Currency,
    /// Source to fetch it from.
    pub source: Arc<dyn RateSource>,
}

/// A job that produced no quotes because its fetch failed.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    /// Currency of the failed job.
    pub currency: Currency,
    /// Name of the source that failed.
    pub source: String,
    /// Human-readable failure cause.
    pub reason: String,
    /// Whether the per-request timeout fired.
    pub timed_out: bool,
}

/// Outcome of one collection cycle.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Quotes from all successful jobs; job order, then page order.
    pub quotes: Vec<Quote>,
    /// Jobs that failed.
    pub failed: Vec<FetchFailure>,
}

type JobResult = (usize, Result<Vec<Quote>>);

/// Bounded worker pool over a fixed job list.
pub struct RateCollector {
    jobs: Vec<Job>,
    workers: usize,
}

impl RateCollector {
    /// Creates a collector with no jobs and a pool of `workers` threads.
    pub fn new(workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(ScanError::Config("worker pool size must be positive".into()));
        }
        Ok(RateCollector {
            jobs: Vec::new(),
            workers,
        })
    }

    /// Adds one job per currency, all served by `source`.
    pub fn with_source(
        mut self,
        source: Arc<dyn RateSource>,
        currencies: impl IntoIterator<Item = Currency>,
    ) -> Self {
        self.jobs.extend(currencies.into_iter().map(|currency| Job {
            currency,
            source: Arc::clone(&source),
        }));
        self
    }

    /// Adds a single job.
    pub fn with_job(mut self, currency: Currency, source: Arc<dyn RateSource>) -> Self {
        self.jobs.push(Job { currency, source });
        self
    }

    /// Configured jobs, in submission order.
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    /// Pool size.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Fetches every job and returns the flat quote list.
    pub fn collect_all(&self) -> Vec<Quote> {
        self.collect().quotes
    }

    /// Fetches every job, returning quotes together with the failed jobs.
    pub fn collect(&self) -> Collection {
        if self.jobs.is_empty() {
            return Collection::default();
        }

        let (job_tx, job_rx) = unbounded::<(usize, &Job)>();
        for (index, job) in self.jobs.iter().enumerate() {
            let _ = job_tx.send((index, job));
        }
        drop(job_tx);

        let (result_tx, result_rx) = unbounded::<JobResult>();
        let pool = self.workers.min(self.jobs.len());
        info!(
            "Collecting {} jobs with {} workers",
            self.jobs.len(),
            pool
        );

        thread::scope(|scope| {
            let handles: Vec<_> = (0..pool)
                .map(|worker| {
                    let job_rx = job_rx.clone();
                    let result_tx = result_tx.clone();
                    scope.spawn(move || run_worker(worker, job_rx, result_tx))
                })
                .collect();
            drop(result_tx);

            for (worker, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() {
                    error!("{}", ScanError::WorkerPanicked(worker));
                }
            }
        });

        let mut results: Vec<Option<Result<Vec<Quote>>>> =
            (0..self.jobs.len()).map(|_| None).collect();
        for (index, outcome) in result_rx.iter() {
            results[index] = Some(outcome);
        }

        self.merge(results)
    }

    fn merge(&self, results: Vec<Option<Result<Vec<Quote>>>>) -> Collection {
        let mut collection = Collection::default();

        for (job, outcome) in self.jobs.iter().zip(results) {
            match outcome {
                Some(Ok(quotes)) => collection.quotes.extend(quotes),
                Some(Err(e)) => {
                    warn!(
                        "{} from {}: no quotes, fetch failed: {}",
                        job.currency,
                        job.source.name(),
                        e
                    );
                    collection.failed.push(FetchFailure {
                        currency: job.currency,
                        source: job.source.name().to_string(),
                        reason: e.to_string(),
                        timed_out: e.is_timeout(),
                    });
                }
                None => {
                    warn!(
                        "{} from {}: no quotes, job lost with its worker",
                        job.currency,
                        job.source.name()
                    );
                    collection.failed.push(FetchFailure {
                        currency: job.currency,
                        source: job.source.name().to_string(),
                        reason: "worker panicked".to_string(),
                        timed_out: false,
                    });
                }
            }
        }

        info!(
            "Collected {} quotes, {} of {} jobs failed",
            collection.quotes.len(),
            collection.failed.len(),
            self.jobs.len()
        );
        collection
    }
}

fn run_worker(worker: usize, jobs: Receiver<(usize, &Job)>, results: Sender<JobResult>) {
    for (index, job) in jobs.iter() {
        let outcome = catch_unwind(AssertUnwindSafe(|| job.source.fetch_quotes(job.currency)))
            .unwrap_or_else(|_| {
                error!("worker #{}: fetch of {} panicked", worker, job.currency);
                Err(ScanError::WorkerPanicked(worker))
            });
        if let Err(e) = results.send((index, outcome)) {
            error!("worker #{}: {}", worker, ScanError::ChannelSend(e.to_string()));
            break;
        }
    }
}
