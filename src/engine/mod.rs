//! Ticket matching and prize resolution

pub mod checker;
pub mod prize;
pub mod tier;

pub use checker::{CheckReport, Checker, LineItem};
pub use prize::{MatchResult, PayoutSource, PrizeEngine, PrizeSchedule, STATUTORY_FIXED_AMOUNTS};
pub use tier::{resolve_tier, winning_combinations, Tier};
