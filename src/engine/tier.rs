//! Prize tiers and the match-count lookup table

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Largest possible number of front-area hits
pub const MAX_FRONT_HITS: usize = 5;
/// Largest possible number of back-area hits
pub const MAX_BACK_HITS: usize = 2;

/// Named prize level, `tier1` (jackpot) down to `tier9`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Tier {
    #[serde(rename = "tier1")]
    First,
    #[serde(rename = "tier2")]
    Second,
    #[serde(rename = "tier3")]
    Third,
    #[serde(rename = "tier4")]
    Fourth,
    #[serde(rename = "tier5")]
    Fifth,
    #[serde(rename = "tier6")]
    Sixth,
    #[serde(rename = "tier7")]
    Seventh,
    #[serde(rename = "tier8")]
    Eighth,
    #[serde(rename = "tier9")]
    Ninth,
}

impl Tier {
    pub const ALL: [Tier; 9] = [
        Tier::First,
        Tier::Second,
        Tier::Third,
        Tier::Fourth,
        Tier::Fifth,
        Tier::Sixth,
        Tier::Seventh,
        Tier::Eighth,
        Tier::Ninth,
    ];

    /// Canonical name used in configuration and JSON
    pub fn name(&self) -> &'static str {
        match self {
            Tier::First => "tier1",
            Tier::Second => "tier2",
            Tier::Third => "tier3",
            Tier::Fourth => "tier4",
            Tier::Fifth => "tier5",
            Tier::Sixth => "tier6",
            Tier::Seventh => "tier7",
            Tier::Eighth => "tier8",
            Tier::Ninth => "tier9",
        }
    }

    /// Key of this tier in a draw's prize table
    pub fn prize_key(&self) -> &'static str {
        match self {
            Tier::First => "一等奖",
            Tier::Second => "二等奖",
            Tier::Third => "三等奖",
            Tier::Fourth => "四等奖",
            Tier::Fifth => "五等奖",
            Tier::Sixth => "六等奖",
            Tier::Seventh => "七等奖",
            Tier::Eighth => "八等奖",
            Tier::Ninth => "九等奖",
        }
    }

    /// Key of the additional-bet (追加) bonus for this tier
    pub fn additional_prize_key(&self) -> String {
        format!("{}(追加)", self.prize_key())
    }

    /// tier7 and tier9 have no additional-bet bonus
    pub fn has_additional_bonus(&self) -> bool {
        !matches!(self, Tier::Seventh | Tier::Ninth)
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Tier {
    type Err = String;

    /// Accepts either the canonical name or the data source's prize key
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Tier::ALL
            .iter()
            .copied()
            .find(|tier| tier.name() == s || tier.prize_key() == s)
            .ok_or_else(|| format!("unknown prize tier '{}'", s))
    }
}

/// Map front/back hit counts to a prize tier.
///
/// Several pairs share a tier (two pairs pay tier8, four pay tier9); each
/// pair is listed on its own.
pub fn resolve_tier(front_hits: usize, back_hits: usize) -> Option<Tier> {
    match (front_hits, back_hits) {
        (5, 2) => Some(Tier::First),
        (5, 1) => Some(Tier::Second),
        (5, 0) => Some(Tier::Third),
        (4, 2) => Some(Tier::Fourth),
        (4, 1) => Some(Tier::Fifth),
        (3, 2) => Some(Tier::Sixth),
        (4, 0) => Some(Tier::Seventh),
        (3, 1) | (2, 2) => Some(Tier::Eighth),
        (3, 0) | (1, 2) | (2, 1) | (0, 2) => Some(Tier::Ninth),
        _ => None,
    }
}

/// Every winning (front_hits, back_hits) pair with its tier, best tier first
pub fn winning_combinations() -> Vec<((usize, usize), Tier)> {
    let mut combinations: Vec<_> = (0..=MAX_FRONT_HITS)
        .flat_map(|front| (0..=MAX_BACK_HITS).map(move |back| (front, back)))
        .filter_map(|pair| resolve_tier(pair.0, pair.1).map(|tier| (pair, tier)))
        .collect();
    combinations.sort_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)));
    combinations
}
