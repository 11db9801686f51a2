//! Historical draw data: records, the ordered store and its providers

pub mod provider;
pub mod store;
pub mod types;

pub use provider::{DrawProvider, JsonFileDrawProvider, StaticDrawProvider};
pub use store::DrawStore;
pub use types::*;
