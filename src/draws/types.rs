use crate::errors::DataIntegrityError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::fmt;

/// Numbers drawn in the front area
pub const FRONT_AREA_SIZE: usize = 5;
/// Numbers drawn in the back area
pub const BACK_AREA_SIZE: usize = 2;
/// Highest front-area number
pub const FRONT_AREA_MAX: u8 = 35;
/// Highest back-area number
pub const BACK_AREA_MAX: u8 = 12;

/// Draw identifier as issued by the lottery (e.g. `25001`)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawNumber(String);

impl DrawNumber {
    pub fn new(number: impl Into<String>) -> Self {
        Self(number.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DrawNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DrawNumber {
    fn from(number: &str) -> Self {
        Self::new(number.trim())
    }
}

impl From<String> for DrawNumber {
    fn from(number: String) -> Self {
        Self::new(number.trim())
    }
}

/// One row of a draw's prize table, amounts exactly as the source reported them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrizeEntry {
    pub stake_amount: String,
    /// Number of winning bets at this level
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stake_count: Option<String>,
}

impl PrizeEntry {
    pub fn new(stake_amount: impl Into<String>) -> Self {
        Self {
            stake_amount: stake_amount.into(),
            stake_count: None,
        }
    }

    pub fn with_count(mut self, stake_count: impl Into<String>) -> Self {
        self.stake_count = Some(stake_count.into());
        self
    }
}

/// A historical draw with its winning numbers and prize table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draw {
    pub draw_number: DrawNumber,
    pub draw_date: String,
    pub front_area: Vec<String>,
    pub back_area: Vec<String>,
    /// Keyed by prize level, with a separate `<level>(追加)` row per bonus
    #[serde(default)]
    pub prizes: BTreeMap<String, PrizeEntry>,
}

impl Draw {
    pub fn new(
        draw_number: impl Into<DrawNumber>,
        draw_date: impl Into<String>,
        front_area: &[&str],
        back_area: &[&str],
    ) -> Self {
        Self {
            draw_number: draw_number.into(),
            draw_date: draw_date.into(),
            front_area: front_area.iter().map(|n| n.to_string()).collect(),
            back_area: back_area.iter().map(|n| n.to_string()).collect(),
            prizes: BTreeMap::new(),
        }
    }

    /// Add or replace a prize table row
    pub fn with_prize(mut self, key: impl Into<String>, entry: PrizeEntry) -> Self {
        self.prizes.insert(key.into(), entry);
        self
    }

    pub fn prize(&self, key: &str) -> Option<&PrizeEntry> {
        self.prizes.get(key)
    }

    /// Check winning-number invariants: sizes, zero-padded format, ranges, distinctness
    pub fn validate(&self) -> Result<(), DataIntegrityError> {
        check_area("front", &self.front_area, FRONT_AREA_SIZE, FRONT_AREA_MAX)
            .and_then(|_| check_area("back", &self.back_area, BACK_AREA_SIZE, BACK_AREA_MAX))
            .map_err(|reason| DataIntegrityError::MalformedDraw {
                draw: self.draw_number.clone(),
                reason,
            })
    }
}

fn check_area(area: &str, numbers: &[String], size: usize, max: u8) -> Result<(), String> {
    if numbers.len() != size {
        return Err(format!(
            "{} area has {} numbers, expected {}",
            area,
            numbers.len(),
            size
        ));
    }

    let mut seen = HashSet::with_capacity(size);
    for number in numbers {
        let in_range = number.len() == 2
            && number.bytes().all(|b| b.is_ascii_digit())
            && number
                .parse::<u8>()
                .map(|n| (1..=max).contains(&n))
                .unwrap_or(false);
        if !in_range {
            return Err(format!(
                "{} area number '{}' is not a two-digit value in 01..{:02}",
                area, number, max
            ));
        }
        if !seen.insert(number.as_str()) {
            return Err(format!("{} area repeats number {}", area, number));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_draw() -> Draw {
        Draw::new("25001", "2025-01-01", &["01", "02", "03", "04", "05"], &["06", "07"])
    }

    #[test]
    fn test_valid_draw() {
        assert!(sample_draw().validate().is_ok());
    }

    #[test]
    fn test_wrong_area_sizes_rejected() {
        let mut draw = sample_draw();
        draw.front_area.pop();
        assert!(matches!(
            draw.validate(),
            Err(DataIntegrityError::MalformedDraw { .. })
        ));

        let mut draw = sample_draw();
        draw.back_area.push("08".to_string());
        assert!(draw.validate().is_err());
    }

    #[test]
    fn test_unpadded_and_out_of_range_numbers_rejected() {
        let mut draw = sample_draw();
        draw.front_area[0] = "1".to_string();
        assert!(draw.validate().is_err());

        let mut draw = sample_draw();
        draw.front_area[0] = "36".to_string();
        assert!(draw.validate().is_err());

        let mut draw = sample_draw();
        draw.back_area[1] = "13".to_string();
        assert!(draw.validate().is_err());

        let mut draw = sample_draw();
        draw.back_area[1] = "00".to_string();
        assert!(draw.validate().is_err());
    }

    #[test]
    fn test_repeated_number_rejected() {
        let mut draw = sample_draw();
        draw.back_area[1] = "06".to_string();
        let err = draw.validate().unwrap_err();
        assert!(err.to_string().contains("repeats"));
    }

    #[test]
    fn test_deserialize_without_prizes() {
        let json = r#"{
            "draw_number": "25002",
            "draw_date": "2025-01-04",
            "front_area": ["03", "11", "19", "27", "35"],
            "back_area": ["02", "12"]
        }"#;
        let draw: Draw = serde_json::from_str(json).unwrap();
        assert_eq!(draw.draw_number, DrawNumber::from("25002"));
        assert!(draw.prizes.is_empty());
        assert!(draw.validate().is_ok());
    }

    #[test]
    fn test_draw_numbers_order_as_issued() {
        assert!(DrawNumber::from("25001") < DrawNumber::from("25002"));
        assert_eq!(DrawNumber::from(" 25001 "), DrawNumber::from("25001"));
    }
}
