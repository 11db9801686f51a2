//! Player tickets
//!
//! A ticket is one single bet: five front numbers and two back numbers,
//! held in the same zero-padded two-digit form the draws use.

use crate::draws::{BACK_AREA_MAX, BACK_AREA_SIZE, FRONT_AREA_MAX, FRONT_AREA_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Reasons ticket numbers were rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("{area} has {actual} numbers, expected {expected}")]
    WrongCount {
        area: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{area} number {value} is outside 1..={max}")]
    OutOfRange {
        area: &'static str,
        value: u8,
        max: u8,
    },

    #[error("{area} number {value} appears more than once")]
    Duplicate { area: &'static str, value: u8 },

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("line {line}: {source}")]
    Line {
        line: usize,
        #[source]
        source: Box<TicketError>,
    },
}

/// Five front and two back numbers, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "TicketNumbers", into = "TicketNumbers")]
pub struct Ticket {
    front: BTreeSet<String>,
    back: BTreeSet<String>,
}

/// Plain numeric form used on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TicketNumbers {
    pub front: Vec<u8>,
    pub back: Vec<u8>,
}

impl Ticket {
    pub fn new(front: &[u8], back: &[u8]) -> Result<Self, TicketError> {
        Ok(Self {
            front: normalize_area("front area", front, FRONT_AREA_SIZE, FRONT_AREA_MAX)?,
            back: normalize_area("back area", back, BACK_AREA_SIZE, BACK_AREA_MAX)?,
        })
    }

    /// Front numbers as two-digit strings, ascending
    pub fn front(&self) -> &BTreeSet<String> {
        &self.front
    }

    /// Back numbers as two-digit strings, ascending
    pub fn back(&self) -> &BTreeSet<String> {
        &self.back
    }
}

fn normalize_area(
    area: &'static str,
    numbers: &[u8],
    size: usize,
    max: u8,
) -> Result<BTreeSet<String>, TicketError> {
    if numbers.len() != size {
        return Err(TicketError::WrongCount {
            area,
            expected: size,
            actual: numbers.len(),
        });
    }

    let mut normalized = BTreeSet::new();
    for &value in numbers {
        if !(1..=max).contains(&value) {
            return Err(TicketError::OutOfRange { area, value, max });
        }
        if !normalized.insert(format!("{:02}", value)) {
            return Err(TicketError::Duplicate { area, value });
        }
    }
    Ok(normalized)
}

impl fmt::Display for Ticket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let front: Vec<&str> = self.front.iter().map(String::as_str).collect();
        let back: Vec<&str> = self.back.iter().map(String::as_str).collect();
        write!(f, "{} | {}", front.join(" "), back.join(" "))
    }
}

impl FromStr for Ticket {
    type Err = TicketError;

    /// Seven whitespace-separated numbers; a `|` or `+` may separate the areas
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let numbers = s
            .split(|c: char| c.is_whitespace() || c == '|' || c == '+')
            .filter(|token| !token.is_empty())
            .map(|token| {
                token
                    .parse::<u8>()
                    .map_err(|_| TicketError::NotANumber(token.to_string()))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        let expected = FRONT_AREA_SIZE + BACK_AREA_SIZE;
        if numbers.len() != expected {
            return Err(TicketError::WrongCount {
                area: "ticket",
                expected,
                actual: numbers.len(),
            });
        }

        let (front, back) = numbers.split_at(FRONT_AREA_SIZE);
        Ticket::new(front, back)
    }
}

impl TryFrom<TicketNumbers> for Ticket {
    type Error = TicketError;

    fn try_from(numbers: TicketNumbers) -> Result<Self, Self::Error> {
        Ticket::new(&numbers.front, &numbers.back)
    }
}

impl From<Ticket> for TicketNumbers {
    fn from(ticket: Ticket) -> Self {
        let parse = |area: &BTreeSet<String>| -> Vec<u8> {
            area.iter().filter_map(|n| n.parse().ok()).collect()
        };
        Self {
            front: parse(&ticket.front),
            back: parse(&ticket.back),
        }
    }
}

/// Parse one ticket per non-blank line; `#` starts a comment line
pub fn parse_tickets(input: &str) -> Result<Vec<Ticket>, TicketError> {
    input
        .lines()
        .enumerate()
        .filter(|(_, line)| {
            let line = line.trim();
            !line.is_empty() && !line.starts_with('#')
        })
        .map(|(index, line)| {
            line.parse().map_err(|e| TicketError::Line {
                line: index + 1,
                source: Box::new(e),
            })
        })
        .collect()
}
