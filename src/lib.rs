//! dlt-checker - Super Lotto (大乐透) ticket checking
//!
//! Matches player tickets against a window of historical draws, resolves the
//! prize tier of every (ticket, draw) pair and prices it from the statutory
//! schedule or the draw's own pari-mutuel prize table.

pub mod common;
pub mod config;
pub mod draws;
pub mod engine;
pub mod errors;
pub mod report;
pub mod ticket;

pub use common::amount::{Amount, AmountError};
pub use common::config::ConfigLoader;
pub use config::CheckerConfig;
pub use draws::{Draw, DrawNumber, DrawProvider, DrawStore, JsonFileDrawProvider, PrizeEntry};
pub use engine::{
    resolve_tier, CheckReport, Checker, LineItem, MatchResult, PayoutSource, PrizeEngine,
    PrizeSchedule, Tier,
};
pub use errors::{CheckError, ConfigurationError, DataIntegrityError, DltError, DltResult};
pub use ticket::{parse_tickets, Ticket, TicketError};
