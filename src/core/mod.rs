pub mod analyze;
pub mod combine;
pub mod engine;
pub mod rename;

#[cfg(test)]
pub(crate) mod mock_storage;

pub use crate::domain::model::Outcome;
pub use crate::domain::ports::{PlanDescription, Storage, Tool};
pub use crate::utils::error::Result;
pub use engine::ToolboxEngine;
