//! Multi-match aggregation into a single shot table.
//!
//! Sequential by default. With a concurrency above one, a `Semaphore` bounds
//! in-flight fetches and a `JoinSet` runs one fetch-to-records unit per
//! match. Results land in slots indexed by input position, so the final
//! table follows the input order whatever order the units finish in.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::{Notify, Semaphore};
use tokio::task::JoinSet;

use understat_api::types::{MatchId, ShotRecord};

use crate::config::MAX_CONCURRENCY;
use crate::error::UnderstatError;
use crate::normalize::extract_ids;
use crate::scrape::ScrapeClient;
use crate::table::ShotTable;

/// What a batch does when one match fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OnError {
    /// Stop at the first failure and return no rows.
    #[default]
    Abort,
    /// Leave the failed match out and report it alongside the rows.
    Skip,
}

/// Shared flag that stops a running batch.
///
/// Clones observe the same flag. Checked before each match starts; a batch
/// waiting on in-flight fetches also wakes up when it is set.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
        self.notify.notify_waiters();
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        loop {
            let notified = self.notify.notified();
            if self.is_cancelled() {
                return;
            }
            notified.await;
        }
    }
}

#[derive(Clone, Debug)]
pub struct AggregateOptions {
    pub on_error: OnError,
    /// Matches in flight at once; 1 is strictly sequential.
    pub concurrency: usize,
    pub cancel: Option<CancelToken>,
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self {
            on_error: OnError::Abort,
            concurrency: 1,
            cancel: None,
        }
    }
}

impl AggregateOptions {
    pub fn on_error(mut self, on_error: OnError) -> Self {
        self.on_error = on_error;
        self
    }

    pub fn concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.clamp(1, MAX_CONCURRENCY);
        self
    }

    pub fn cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// A match left out of a skip-mode batch.
#[derive(Debug)]
pub struct MatchFailure {
    pub match_id: MatchId,
    pub error: UnderstatError,
}

#[derive(Debug)]
pub struct AggregateReport {
    pub table: ShotTable,
    /// Always empty in abort mode.
    pub failures: Vec<MatchFailure>,
}

type UnitResult = Result<Vec<ShotRecord>, UnderstatError>;

/// Runs [`ScrapeClient::match_shots`] over a list of match ids.
#[derive(Clone, Debug)]
pub struct Aggregator {
    scraper: Arc<ScrapeClient>,
    options: AggregateOptions,
}

impl Aggregator {
    pub fn new(scraper: ScrapeClient, options: AggregateOptions) -> Self {
        Self {
            scraper: Arc::new(scraper),
            options,
        }
    }

    /// Fetches and concatenates the shots of every match in `match_ids`.
    ///
    /// Rows follow the input order. In abort mode the first failure ends the
    /// batch as [`UnderstatError::Aggregation`]. In skip mode failed matches
    /// are listed in the report instead.
    pub async fn aggregate(&self, match_ids: &[MatchId]) -> Result<AggregateReport, UnderstatError> {
        tracing::info!(
            "Aggregating shots for {} matches (concurrency {}, {:?} on error)",
            match_ids.len(),
            self.options.concurrency,
            self.options.on_error
        );

        let slots = if self.options.concurrency <= 1 || match_ids.len() <= 1 {
            self.run_sequential(match_ids).await?
        } else {
            self.run_concurrent(match_ids).await?
        };

        let mut tables = Vec::with_capacity(match_ids.len());
        let mut failures = Vec::new();
        for (&match_id, slot) in match_ids.iter().zip(slots) {
            match slot {
                Some(Ok(shots)) => tables.push(ShotTable::from_records(shots)),
                Some(Err(error)) => failures.push(MatchFailure { match_id, error }),
                None => {
                    return Err(UnderstatError::TaskFailed(format!(
                        "match {} produced no result",
                        match_id
                    )))
                }
            }
        }

        let table = ShotTable::concat(tables);
        tracing::info!(
            "Aggregated {} shots from {} matches ({} skipped)",
            table.len(),
            match_ids.len() - failures.len(),
            failures.len()
        );
        Ok(AggregateReport { table, failures })
    }

    /// Listing, completed-match ids, then [`aggregate`](Self::aggregate).
    /// `limit` keeps only the first N completed matches.
    pub async fn league_shots(
        &self,
        league: &str,
        year: i32,
        limit: Option<usize>,
    ) -> Result<AggregateReport, UnderstatError> {
        let matches = self.scraper.league_matches(league, year).await?;
        let mut ids = extract_ids(&matches);
        if let Some(limit) = limit {
            ids.truncate(limit);
        }
        self.aggregate(&ids).await
    }

    async fn run_sequential(
        &self,
        match_ids: &[MatchId],
    ) -> Result<Vec<Option<UnitResult>>, UnderstatError> {
        let mut slots = Vec::with_capacity(match_ids.len());
        for &match_id in match_ids {
            if self.is_cancelled() {
                return Err(UnderstatError::Cancelled);
            }
            let result = tokio::select! {
                biased;
                _ = wait_cancelled(self.options.cancel.as_ref()) => return Err(UnderstatError::Cancelled),
                result = self.scraper.match_shots(match_id) => result,
            };
            slots.push(Some(self.settle(match_id, result)?));
        }
        Ok(slots)
    }

    async fn run_concurrent(
        &self,
        match_ids: &[MatchId],
    ) -> Result<Vec<Option<UnitResult>>, UnderstatError> {
        let semaphore = Arc::new(Semaphore::new(self.options.concurrency));
        let mut join_set = JoinSet::new();

        for (position, &match_id) in match_ids.iter().enumerate() {
            let sem = Arc::clone(&semaphore);
            let scraper = Arc::clone(&self.scraper);
            let cancel = self.options.cancel.clone();
            join_set.spawn(async move {
                let result = match sem.acquire_owned().await {
                    Err(e) => Err(UnderstatError::TaskFailed(e.to_string())),
                    Ok(_permit) if cancel.as_ref().is_some_and(CancelToken::is_cancelled) => {
                        Err(UnderstatError::Cancelled)
                    }
                    Ok(_permit) => scraper.match_shots(match_id).await,
                };
                (position, result)
            });
        }

        let mut slots: Vec<Option<UnitResult>> = match_ids.iter().map(|_| None).collect();
        loop {
            let joined = tokio::select! {
                biased;
                _ = wait_cancelled(self.options.cancel.as_ref()) => {
                    join_set.abort_all();
                    return Err(UnderstatError::Cancelled);
                }
                joined = join_set.join_next() => joined,
            };
            let Some(joined) = joined else {
                break;
            };
            let (position, result) = match joined {
                Ok(done) => done,
                Err(e) => {
                    join_set.abort_all();
                    return Err(UnderstatError::TaskFailed(e.to_string()));
                }
            };
            if matches!(result, Err(UnderstatError::Cancelled)) {
                join_set.abort_all();
                return Err(UnderstatError::Cancelled);
            }
            match self.settle(match_ids[position], result) {
                Ok(settled) => slots[position] = Some(settled),
                Err(e) => {
                    join_set.abort_all();
                    return Err(e);
                }
            }
        }
        Ok(slots)
    }

    /// Applies the error policy to one finished unit. An `Err` return ends
    /// the batch.
    fn settle(&self, match_id: MatchId, result: UnitResult) -> Result<UnitResult, UnderstatError> {
        match (result, self.options.on_error) {
            (Ok(shots), _) => Ok(Ok(shots)),
            (Err(e), OnError::Abort) => {
                tracing::error!("Match {} failed, aborting batch: {}", match_id, e);
                Err(UnderstatError::Aggregation {
                    match_id,
                    source: Box::new(e),
                })
            }
            (Err(e), OnError::Skip) => {
                tracing::warn!("Skipping match {}: {}", match_id, e);
                Ok(Err(e))
            }
        }
    }

    fn is_cancelled(&self) -> bool {
        self.options
            .cancel
            .as_ref()
            .is_some_and(CancelToken::is_cancelled)
    }
}

async fn wait_cancelled(token: Option<&CancelToken>) {
    match token {
        Some(token) => token.cancelled().await,
        None => std::future::pending().await,
    }
}
