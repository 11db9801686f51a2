//! Draw data providers
//!
//! The checker never fetches draws itself; a provider hands it a complete
//! `DrawStore` covering one page of recent draws.

use super::store::DrawStore;
use super::types::Draw;
use crate::errors::DltResult;
use log::{debug, info};
use std::path::{Path, PathBuf};

/// Source of historical draws
pub trait DrawProvider: Send + Sync {
    /// Load the draws, validated and in ascending order
    fn load(&self) -> DltResult<DrawStore>;
}

/// Draws held in memory, e.g. from an upstream fetcher or a test fixture
#[derive(Debug, Clone, Default)]
pub struct StaticDrawProvider {
    draws: Vec<Draw>,
}

impl StaticDrawProvider {
    pub fn new(draws: Vec<Draw>) -> Self {
        Self { draws }
    }
}

impl DrawProvider for StaticDrawProvider {
    fn load(&self) -> DltResult<DrawStore> {
        build_store(self.draws.clone(), usize::MAX)
    }
}

/// Reads a JSON array of draws from disk
#[derive(Debug, Clone)]
pub struct JsonFileDrawProvider {
    path: PathBuf,
    page_size: usize,
}

impl JsonFileDrawProvider {
    pub fn new<P: AsRef<Path>>(path: P, page_size: usize) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            page_size,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DrawProvider for JsonFileDrawProvider {
    fn load(&self) -> DltResult<DrawStore> {
        let content = std::fs::read_to_string(&self.path)?;
        let draws: Vec<Draw> = serde_json::from_str(&content)?;
        debug!("Read {} draws from {}", draws.len(), self.path.display());

        let store = build_store(draws, self.page_size)?;
        if let (Some(first), Some(last)) = (store.earliest(), store.latest()) {
            info!(
                "Loaded {} draws ({} .. {}) from {}",
                store.len(),
                first.draw_number,
                last.draw_number,
                self.path.display()
            );
        }
        Ok(store)
    }
}

fn build_store(draws: Vec<Draw>, page_size: usize) -> DltResult<DrawStore> {
    for draw in &draws {
        draw.validate()?;
    }
    Ok(DrawStore::from_unsorted(draws)?.most_recent(page_size))
}
