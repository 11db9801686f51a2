//! Range checks: every ticket against a window of consecutive draws

use super::prize::{MatchResult, PrizeEngine};
use super::tier::Tier;
use crate::common::amount::Amount;
use crate::config::CheckerConfig;
use crate::draws::{Draw, DrawNumber, DrawStore};
use crate::errors::{CheckError, ConfigurationError};
use crate::ticket::Ticket;
use log::{debug, trace, warn};
use serde::Serialize;
use std::collections::BTreeMap;

/// One ticket on one draw
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LineItem {
    pub draw_number: DrawNumber,
    pub draw_date: String,
    /// Position of the ticket in the input
    pub ticket_index: usize,
    pub ticket: Ticket,
    #[serde(flatten)]
    pub result: MatchResult,
}

/// Result of a range check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    /// Ordered by draw number, then by input ticket order
    pub line_items: Vec<LineItem>,
    pub total_winnings: Amount,
    pub draws_checked: usize,
}

impl CheckReport {
    pub fn winners(&self) -> impl Iterator<Item = &LineItem> {
        self.line_items.iter().filter(|item| item.result.is_winner())
    }

    /// Number of winning line items per tier
    pub fn tier_counts(&self) -> BTreeMap<Tier, usize> {
        let mut counts = BTreeMap::new();
        for tier in self.winners().filter_map(|item| item.result.tier) {
            *counts.entry(tier).or_insert(0) += 1;
        }
        counts
    }
}

/// Runs the prize engine over a window of draws
#[derive(Debug, Clone)]
pub struct Checker {
    engine: PrizeEngine,
    worker_threads: usize,
}

impl Checker {
    pub fn new(engine: PrizeEngine) -> Self {
        Self {
            engine,
            worker_threads: 1,
        }
    }

    /// Build from configuration: prize schedule plus worker count
    pub fn from_config(config: &CheckerConfig) -> Result<Self, ConfigurationError> {
        let schedule = config.prizes.schedule()?;
        Ok(Self::new(PrizeEngine::new(schedule))
            .with_worker_threads(config.query.worker_threads))
    }

    /// Split windows across this many scoped threads (1 = sequential)
    pub fn with_worker_threads(mut self, worker_threads: usize) -> Self {
        self.worker_threads = worker_threads.max(1);
        self
    }

    pub fn engine(&self) -> &PrizeEngine {
        &self.engine
    }

    /// Check `tickets` against `num_draws` draws starting at `start`.
    ///
    /// Fails as a whole: either every line item is produced or an error is
    /// returned.
    pub fn check(
        &self,
        tickets: &[Ticket],
        store: &DrawStore,
        start: &DrawNumber,
        num_draws: usize,
        include_additional: bool,
    ) -> Result<CheckReport, CheckError> {
        if tickets.is_empty() {
            return Err(CheckError::NoValidTickets);
        }
        if num_draws == 0 {
            return Err(CheckError::InvalidRange(num_draws));
        }

        let window = store
            .window(start, num_draws)
            .ok_or_else(|| CheckError::DrawNotFound(start.clone()))?;

        debug!(
            "Checking {} tickets against {} draws from {} (requested {}, additional: {})",
            tickets.len(),
            window.len(),
            start,
            num_draws,
            include_additional
        );

        let line_items = if self.worker_threads > 1 && window.len() > 1 {
            self.check_parallel(tickets, window, include_additional)?
        } else {
            self.check_draws(tickets, window, include_additional)?
        };

        let total_winnings = line_items.iter().map(|item| item.result.total()).sum();

        Ok(CheckReport {
            line_items,
            total_winnings,
            draws_checked: window.len(),
        })
    }

    fn check_draws(
        &self,
        tickets: &[Ticket],
        draws: &[Draw],
        include_additional: bool,
    ) -> Result<Vec<LineItem>, CheckError> {
        let mut items = Vec::with_capacity(draws.len() * tickets.len());

        for draw in draws {
            for (ticket_index, ticket) in tickets.iter().enumerate() {
                let result = self
                    .engine
                    .evaluate(ticket, draw, include_additional)
                    .map_err(|e| {
                        warn!("Rejecting draw {}: {}", draw.draw_number, e);
                        e
                    })?;

                trace!(
                    "Draw {} ticket #{} [{}]: {}+{} hits -> {:?}",
                    draw.draw_number,
                    ticket_index,
                    ticket,
                    result.front_hits,
                    result.back_hits,
                    result.tier
                );

                items.push(LineItem {
                    draw_number: draw.draw_number.clone(),
                    draw_date: draw.draw_date.clone(),
                    ticket_index,
                    ticket: ticket.clone(),
                    result,
                });
            }
        }

        Ok(items)
    }

    /// Contiguous chunks of the window on scoped threads, rejoined in order
    fn check_parallel(
        &self,
        tickets: &[Ticket],
        draws: &[Draw],
        include_additional: bool,
    ) -> Result<Vec<LineItem>, CheckError> {
        let chunk_size = (draws.len() + self.worker_threads - 1) / self.worker_threads;

        let chunk_results = crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = draws
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move |_| self.check_draws(tickets, chunk, include_additional))
                })
                .collect();

            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|panic| std::panic::resume_unwind(panic))
                })
                .collect::<Vec<_>>()
        })
        .unwrap_or_else(|panic| std::panic::resume_unwind(panic));

        let mut items = Vec::with_capacity(draws.len() * tickets.len());
        for chunk in chunk_results {
            items.extend(chunk?);
        }
        Ok(items)
    }
}

impl Default for Checker {
    fn default() -> Self {
        Self::new(PrizeEngine::default())
    }
}
