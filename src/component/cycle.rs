//! Two-counter cyclic state machine for long-seasonality patterns
//!
//! A long season cycles through `period` distinct states, holding each one
//! for `stay` consecutive observations before moving to the next:
//! `1, 1, 1, 2, 2, 2, 3, 3, 3, ...` for `period = 3, stay = 3`. The machine
//! defined here owns only that geometry; the mutable cycle position is
//! passed in and returned explicitly, so the forward/backward transitions
//! can be tested in isolation from any component that drives them.

use crate::error::{ComponentError, Result};
use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// Position inside the two-level seasonal cycle
///
/// `outer` selects the active season; `inner` counts how many observations
/// the season has already been held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CycleState {
    /// Active season index, in `[0, period)`
    pub outer: usize,
    /// Steps already spent in the active season, in `[0, stay)`
    pub inner: usize,
}

impl CycleState {
    /// State at the start of the first season
    pub fn origin() -> Self {
        Self { outer: 0, inner: 0 }
    }

    /// State `inner` steps into the `outer`-th season
    pub fn new(outer: usize, inner: usize) -> Self {
        Self { outer, inner }
    }
}

/// Transition rules for a `period x stay` cycle
///
/// `advance` steps the cycle forward by one observation and produces the
/// one-hot indicator row for it; `retreat` is the exact inverse, used when
/// the most recent observation is removed. The round trip
/// `retreat(advance(s).0) == s` holds for every state in the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CyclicStateMachine {
    period: usize,
    stay: usize,
}

impl CyclicStateMachine {
    /// Create a machine for `period` seasons of `stay` observations each
    pub fn new(period: usize, stay: usize) -> Result<Self> {
        if period == 0 {
            return Err(ComponentError::InvalidParameter {
                name: "period".to_string(),
                value: period.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if stay == 0 {
            return Err(ComponentError::InvalidParameter {
                name: "stay".to_string(),
                value: stay.to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(Self { period, stay })
    }

    /// Number of distinct seasons in one full cycle
    pub fn period(&self) -> usize {
        self.period
    }

    /// Consecutive observations each season is held
    pub fn stay(&self) -> usize {
        self.stay
    }

    /// Whether `state` lies inside the `period x stay` grid
    pub fn contains(&self, state: CycleState) -> bool {
        state.outer < self.period && state.inner < self.stay
    }

    /// Step the cycle forward by one observation
    ///
    /// The inner counter wraps modulo `stay`; the season index advances on
    /// the observation that completes a `stay`-length run. Returns the new
    /// state together with the one-hot row for the observation. With
    /// `stay == 1` every observation advances the season; with
    /// `period == 1` every row is `[1.0]`.
    pub fn advance(&self, state: CycleState) -> (CycleState, Array1<f64>) {
        let inner = (state.inner + 1) % self.stay;
        let outer = if inner == 0 {
            (state.outer + 1) % self.period
        } else {
            state.outer
        };
        (CycleState { outer, inner }, self.one_hot(outer))
    }

    /// Step the cycle backward by one observation
    ///
    /// Exact inverse of [`advance`](Self::advance): restores the state that
    /// preceded the transition which produced `state`.
    pub fn retreat(&self, state: CycleState) -> CycleState {
        if state.inner == 0 {
            CycleState {
                outer: (state.outer + self.period - 1) % self.period,
                inner: self.stay - 1,
            }
        } else {
            CycleState {
                outer: state.outer,
                inner: state.inner - 1,
            }
        }
    }

    /// One-hot indicator row selecting season `outer`
    pub fn one_hot(&self, outer: usize) -> Array1<f64> {
        let mut row = Array1::zeros(self.period);
        row[outer] = 1.0;
        row
    }

    /// Apply [`advance`](Self::advance) `count` times from `state`,
    /// collecting the generated rows
    pub fn run(&self, state: CycleState, count: usize) -> (CycleState, Vec<Array1<f64>>) {
        let mut current = state;
        let mut rows = Vec::with_capacity(count);
        for _ in 0..count {
            let (next, row) = self.advance(current);
            rows.push(row);
            current = next;
        }
        (current, rows)
    }
}
