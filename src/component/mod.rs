//! DLM regression components
//!
//! Building blocks for dynamic linear models whose regression features are
//! tracked per observation:
//! - Cyclic state machine for two-level seasonal patterns
//! - Shared feature storage read by the estimation engine
//! - Long-seasonality component with derived features

mod base;
mod cycle;
mod long_season;

pub use base::RegressionBase;
pub use cycle::{CycleState, CyclicStateMachine};
pub use long_season::{LongSeason, LongSeasonConfig};

use serde::{Deserialize, Serialize};

/// Component tag used by the surrounding framework for dispatch
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ComponentType {
    /// Regression features supplied by the caller
    Dynamic,
    /// Regression features derived from a two-level cyclic pattern
    LongSeason,
}

impl ComponentType {
    /// Dispatch string read by the framework's data-management layer
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Dynamic => "dynamic",
            ComponentType::LongSeason => "longSeason",
        }
    }
}
