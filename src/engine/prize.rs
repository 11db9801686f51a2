//! Prize resolution: match counting and payout lookup

use super::tier::{resolve_tier, Tier};
use crate::common::amount::{parse_stake_amount, Amount};
use crate::draws::{Draw, PrizeEntry};
use crate::errors::DataIntegrityError;
use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Statutory payouts (yuan) for the fixed-amount tiers
pub const STATUTORY_FIXED_AMOUNTS: [(Tier, u64); 7] = [
    (Tier::Third, 10_000),
    (Tier::Fourth, 3_000),
    (Tier::Fifth, 300),
    (Tier::Sixth, 200),
    (Tier::Seventh, 100),
    (Tier::Eighth, 15),
    (Tier::Ninth, 5),
];

/// Where a tier's base payout comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "amount", rename_all = "snake_case")]
pub enum PayoutSource {
    /// Same amount for every draw
    Fixed(Amount),
    /// Pari-mutuel amount reported in the draw's own prize table
    FromSource,
}

/// Payout source for every tier
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrizeSchedule {
    sources: BTreeMap<Tier, PayoutSource>,
}

impl PrizeSchedule {
    /// Tiers listed in `fixed` pay that amount, all others read the draw
    pub fn new(fixed: impl IntoIterator<Item = (Tier, Amount)>) -> Self {
        let mut sources: BTreeMap<Tier, PayoutSource> = Tier::ALL
            .iter()
            .map(|tier| (*tier, PayoutSource::FromSource))
            .collect();
        for (tier, amount) in fixed {
            sources.insert(tier, PayoutSource::Fixed(amount));
        }
        Self { sources }
    }

    /// The statutory schedule: tier1/tier2 pari-mutuel, tier3..tier9 fixed
    pub fn statutory() -> Self {
        Self::new(
            STATUTORY_FIXED_AMOUNTS
                .iter()
                .map(|(tier, yuan)| (*tier, Amount::from_yuan(*yuan))),
        )
    }

    pub fn source(&self, tier: Tier) -> PayoutSource {
        self.sources
            .get(&tier)
            .copied()
            .unwrap_or(PayoutSource::FromSource)
    }
}

impl Default for PrizeSchedule {
    fn default() -> Self {
        Self::statutory()
    }
}

/// Outcome of one ticket against one draw
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub front_hits: usize,
    pub back_hits: usize,
    pub tier: Option<Tier>,
    pub base_amount: Amount,
    pub additional_amount: Amount,
}

impl MatchResult {
    pub fn is_winner(&self) -> bool {
        self.tier.is_some()
    }

    /// Base plus additional; zero for a losing ticket
    pub fn total(&self) -> Amount {
        if self.is_winner() {
            self.base_amount + self.additional_amount
        } else {
            Amount::ZERO
        }
    }
}

/// Classifies tickets against draws and prices the result
#[derive(Debug, Clone, Default)]
pub struct PrizeEngine {
    schedule: PrizeSchedule,
}

impl PrizeEngine {
    pub fn new(schedule: PrizeSchedule) -> Self {
        Self { schedule }
    }

    pub fn schedule(&self) -> &PrizeSchedule {
        &self.schedule
    }

    /// Front and back hits of a ticket on a draw
    pub fn match_counts(ticket: &Ticket, draw: &Draw) -> (usize, usize) {
        let front_hits = ticket
            .front()
            .iter()
            .filter(|n| draw.front_area.contains(*n))
            .count();
        let back_hits = ticket
            .back()
            .iter()
            .filter(|n| draw.back_area.contains(*n))
            .count();
        (front_hits, back_hits)
    }

    pub fn resolve_tier(front_hits: usize, back_hits: usize) -> Option<Tier> {
        resolve_tier(front_hits, back_hits)
    }

    /// Base and additional payout for a tier, read from the schedule and the
    /// draw's prize table. No tier pays nothing.
    pub fn resolve_amount(
        &self,
        tier: Option<Tier>,
        prizes: &BTreeMap<String, PrizeEntry>,
        include_additional: bool,
    ) -> Result<(Amount, Amount), DataIntegrityError> {
        let tier = match tier {
            Some(tier) => tier,
            None => return Ok((Amount::ZERO, Amount::ZERO)),
        };

        let base = match self.schedule.source(tier) {
            PayoutSource::Fixed(amount) => amount,
            PayoutSource::FromSource => stake_amount(prizes, tier.prize_key())?,
        };

        let additional = if include_additional && tier.has_additional_bonus() {
            stake_amount(prizes, &tier.additional_prize_key())?
        } else {
            Amount::ZERO
        };

        Ok((base, additional))
    }

    /// Match, classify and price one ticket on one draw
    pub fn evaluate(
        &self,
        ticket: &Ticket,
        draw: &Draw,
        include_additional: bool,
    ) -> Result<MatchResult, DataIntegrityError> {
        let (front_hits, back_hits) = Self::match_counts(ticket, draw);
        let tier = Self::resolve_tier(front_hits, back_hits);
        let (base_amount, additional_amount) = self
            .resolve_amount(tier, &draw.prizes, include_additional)
            .map_err(|e| e.in_draw(&draw.draw_number))?;

        Ok(MatchResult {
            front_hits,
            back_hits,
            tier,
            base_amount,
            additional_amount,
        })
    }
}

/// Cleaned stake amount of a prize row; a missing row pays nothing
fn stake_amount(
    prizes: &BTreeMap<String, PrizeEntry>,
    key: &str,
) -> Result<Amount, DataIntegrityError> {
    match prizes.get(key) {
        None => Ok(Amount::ZERO),
        Some(entry) => parse_stake_amount(&entry.stake_amount).map_err(|reason| {
            DataIntegrityError::MalformedAmount {
                draw: None,
                key: key.to_string(),
                raw: entry.stake_amount.clone(),
                reason,
            }
        }),
    }
}
