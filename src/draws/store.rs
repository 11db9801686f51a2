use super::types::{Draw, DrawNumber};
use crate::errors::DataIntegrityError;

/// Draws in ascending draw-number order, unique by draw number
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawStore {
    draws: Vec<Draw>,
}

impl DrawStore {
    /// Wrap draws that are already ascending and duplicate-free
    pub fn new(draws: Vec<Draw>) -> Result<Self, DataIntegrityError> {
        for pair in draws.windows(2) {
            let (previous, next) = (&pair[0].draw_number, &pair[1].draw_number);
            if previous == next {
                return Err(DataIntegrityError::DuplicateDraw(next.clone()));
            }
            if previous > next {
                return Err(DataIntegrityError::OutOfOrder {
                    previous: previous.clone(),
                    next: next.clone(),
                });
            }
        }

        Ok(Self { draws })
    }

    /// Sort draws by draw number first; duplicates are still rejected
    pub fn from_unsorted(mut draws: Vec<Draw>) -> Result<Self, DataIntegrityError> {
        draws.sort_by(|a, b| a.draw_number.cmp(&b.draw_number));
        Self::new(draws)
    }

    /// Keep only the `count` most recent draws
    pub fn most_recent(mut self, count: usize) -> Self {
        let excess = self.draws.len().saturating_sub(count);
        self.draws.drain(..excess);
        self
    }

    pub fn draws(&self) -> &[Draw] {
        &self.draws
    }

    pub fn len(&self) -> usize {
        self.draws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draws.is_empty()
    }

    pub fn earliest(&self) -> Option<&Draw> {
        self.draws.first()
    }

    pub fn latest(&self) -> Option<&Draw> {
        self.draws.last()
    }

    /// Index of a draw number (linear scan, stores hold one page of draws)
    pub fn position(&self, number: &DrawNumber) -> Option<usize> {
        self.draws.iter().position(|draw| &draw.draw_number == number)
    }

    /// Up to `count` consecutive draws starting at `start`.
    ///
    /// Returns `None` when `start` is unknown; a window running past the
    /// newest draw is cut short.
    pub fn window(&self, start: &DrawNumber, count: usize) -> Option<&[Draw]> {
        let index = self.position(start)?;
        let end = index.saturating_add(count).min(self.draws.len());
        Some(&self.draws[index..end])
    }
}
