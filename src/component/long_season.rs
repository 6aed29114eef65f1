//! Long-seasonality component with derived cyclic features
//!
//! A plain seasonality component treats every observation as one unit of
//! the cycle (`1, 2, 3, 4, 1, 2, 3, 4`). The long-seasonality component
//! groups `stay` consecutive observations into one unit and cycles through
//! `period` seasons (`1, 1, 1, 2, 2, 2, ...`), so a week-of-month pattern
//! can sit next to a day-of-week pattern in the same model. Unlike a
//! component whose features are supplied by the caller, these features are
//! derived from the running cycle: appends must continue it seamlessly,
//! and only the tail of the matrix may be removed.

use crate::component::{ComponentType, CycleState, CyclicStateMachine, RegressionBase};
use crate::error::{ComponentError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Configuration for the long-seasonality component
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongSeasonConfig {
    /// Number of distinct seasons in one full cycle
    pub period: usize,
    /// Consecutive observations each season is held
    pub stay: usize,
    /// Discount factor forwarded to the estimation engine, in `(0, 1]`
    pub discount: f64,
    /// Component name
    pub name: String,
}

impl Default for LongSeasonConfig {
    fn default() -> Self {
        Self {
            period: 4,
            stay: 7,
            discount: 0.99,
            name: "longSeason".to_string(),
        }
    }
}

impl LongSeasonConfig {
    /// Set the number of seasons
    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Set how long each season is held
    pub fn with_stay(mut self, stay: usize) -> Self {
        self.stay = stay;
        self
    }

    /// Set the discount factor
    pub fn with_discount(mut self, discount: f64) -> Self {
        self.discount = discount;
        self
    }

    /// Set the component name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

/// Long-seasonality regression component
///
/// Owns the feature matrix and the cycle position that generated it. The
/// stored state is always the state consumed to generate the row that would
/// follow the last materialized row, so [`append_new_data`](Self::append_new_data)
/// continues the cycle seamlessly and [`pop_last`](Self::pop_last) rolls it
/// back by exactly one step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LongSeason {
    base: RegressionBase,
    machine: CyclicStateMachine,
    state: CycleState,
}

impl LongSeason {
    /// Create a component tracking `n_obs` observations, cycling from the
    /// start of the first season
    pub fn new(n_obs: usize, config: LongSeasonConfig) -> Result<Self> {
        Self::from_state(n_obs, config, CycleState::origin())
    }

    /// Create a component whose cycle starts from `state`
    ///
    /// Fails when `period` or `stay` is zero, when the discount lies
    /// outside `(0, 1]`, when `state` falls outside the `period x stay`
    /// grid, or when `period` is not strictly smaller than `n_obs` (a
    /// season cannot be modeled with fewer observations than its own
    /// cardinality).
    pub fn from_state(n_obs: usize, config: LongSeasonConfig, state: CycleState) -> Result<Self> {
        let machine = CyclicStateMachine::new(config.period, config.stay)?;
        if !(config.discount > 0.0 && config.discount <= 1.0) {
            return Err(ComponentError::InvalidParameter {
                name: "discount".to_string(),
                value: config.discount.to_string(),
                reason: "must be in (0, 1]".to_string(),
            });
        }
        if !machine.contains(state) {
            return Err(ComponentError::InvalidParameter {
                name: "state".to_string(),
                value: format!("({}, {})", state.outer, state.inner),
                reason: format!("outside the {} x {} cycle", config.period, config.stay),
            });
        }

        let (state, rows) = machine.run(state, n_obs);
        let base = RegressionBase::new(
            rows,
            config.period,
            config.discount,
            config.name,
            ComponentType::LongSeason,
        );
        base.check_feature_length()?;

        Ok(Self {
            base,
            machine,
            state,
        })
    }

    /// Extend the feature matrix by `count` observations
    ///
    /// Generation continues from the stored cycle state, so the seasonal
    /// pattern runs seamlessly across the append boundary. `count == 0` is
    /// a no-op.
    pub fn append_new_data(&mut self, count: usize) {
        let (state, rows) = self.machine.run(self.state, count);
        self.base.extend_features(rows);
        self.state = state;
    }

    /// Remove the last tracked observation and roll the cycle back one step
    ///
    /// Only tail removal keeps derived features consistent: the returned
    /// matrix and state are exactly as though the last observation had
    /// never been generated. Dropping an interior date while keeping the
    /// future pattern fixed is a different operation and is not supported
    /// here; ignore the date in the base model instead. A warning pointing
    /// at that alternative is emitted on every call. Fails with
    /// [`ComponentError::EmptyMatrix`] when no observations are tracked,
    /// in which case nothing is mutated.
    pub fn pop_last(&mut self) -> Result<Array1<f64>> {
        tracing::warn!(
            component = %self.base.name(),
            "Removing the last date shifts the seasonal pattern for all future dates; \
             to drop a date while keeping the future pattern fixed, ignore it in the \
             base model instead"
        );
        let row = self.base.pop_feature().ok_or_else(|| {
            ComponentError::EmptyMatrix(
                "cannot pop from a component with no tracked observations".to_string(),
            )
        })?;
        self.state = self.machine.retreat(self.state);
        Ok(row)
    }

    /// Current cycle position: the predecessor state of the next row to be
    /// generated
    pub fn state(&self) -> CycleState {
        self.state
    }

    /// Number of distinct seasons
    pub fn period(&self) -> usize {
        self.machine.period()
    }

    /// Consecutive observations each season is held
    pub fn stay(&self) -> usize {
        self.machine.stay()
    }

    /// Number of tracked observations
    pub fn len(&self) -> usize {
        self.base.n()
    }

    /// Whether any observations are tracked
    pub fn is_empty(&self) -> bool {
        self.base.n() == 0
    }

    /// Feature rows, one per tracked observation
    pub fn features(&self) -> &[Array1<f64>] {
        self.base.features()
    }

    /// Assemble the `n x period` design matrix read by the estimator
    pub fn design_matrix(&self) -> Result<Array2<f64>> {
        self.base.design_matrix()
    }

    /// Discount factor forwarded to the estimation engine
    pub fn discount(&self) -> f64 {
        self.base.discount()
    }

    /// Component name
    pub fn name(&self) -> &str {
        self.base.name()
    }

    /// Dispatch tag (`"longSeason"`)
    pub fn component_type(&self) -> ComponentType {
        self.base.component_type()
    }

    /// The regression slot shared with the estimation engine
    pub fn base(&self) -> &RegressionBase {
        &self.base
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(period: usize, stay: usize) -> LongSeasonConfig {
        LongSeasonConfig::default()
            .with_period(period)
            .with_stay(stay)
    }

    #[test]
    fn test_construction_tracks_state_and_length() {
        let component = LongSeason::new(14, config(4, 7)).unwrap();
        assert_eq!(component.len(), 14);
        assert_eq!(component.state(), CycleState::new(2, 0));
        assert_eq!(component.period(), 4);
        assert_eq!(component.stay(), 7);
        assert_eq!(component.component_type(), ComponentType::LongSeason);
        assert_eq!(component.name(), "longSeason");
    }

    #[test]
    fn test_construction_rejects_short_history() {
        // period = 10 with only 10 observations: dimension not < n
        let err = LongSeason::new(10, config(10, 2)).unwrap_err();
        assert!(matches!(err, ComponentError::ConfigError(_)));
        // period = 4 with 10 observations is fine
        assert!(LongSeason::new(10, config(4, 2)).is_ok());
    }

    #[test]
    fn test_construction_rejects_bad_discount() {
        for discount in [0.0, -0.5, 1.5] {
            let cfg = config(2, 2).with_discount(discount);
            assert!(matches!(
                LongSeason::new(10, cfg),
                Err(ComponentError::InvalidParameter { .. })
            ));
        }
        let cfg = config(2, 2).with_discount(1.0);
        assert!(LongSeason::new(10, cfg).is_ok());
    }

    #[test]
    fn test_from_state_rejects_out_of_grid() {
        let err = LongSeason::from_state(10, config(4, 7), CycleState::new(4, 0)).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidParameter { .. }));
        let err = LongSeason::from_state(10, config(4, 7), CycleState::new(0, 7)).unwrap_err();
        assert!(matches!(err, ComponentError::InvalidParameter { .. }));
    }

    #[test]
    fn test_append_continues_cycle() {
        // Appending in two steps must equal one long construction
        let mut split = LongSeason::new(5, config(4, 7)).unwrap();
        split.append_new_data(9);
        let whole = LongSeason::new(14, config(4, 7)).unwrap();

        assert_eq!(split.len(), whole.len());
        assert_eq!(split.state(), whole.state());
        assert_eq!(split.features(), whole.features());
    }

    #[test]
    fn test_append_zero_is_noop() {
        let mut component = LongSeason::new(5, config(4, 7)).unwrap();
        let state = component.state();
        let features = component.features().to_vec();
        component.append_new_data(0);
        assert_eq!(component.len(), 5);
        assert_eq!(component.state(), state);
        assert_eq!(component.features(), features);
    }

    #[test]
    fn test_pop_restores_previous_state() {
        let mut component = LongSeason::new(7, config(4, 7)).unwrap();
        // State just wrapped into season 1
        assert_eq!(component.state(), CycleState::new(1, 0));
        let row = component.pop_last().unwrap();
        assert_eq!(component.len(), 6);
        assert_eq!(component.state(), CycleState::new(0, 6));
        // The removed row was the one that completed the first run
        assert_eq!(row[1], 1.0);
    }

    #[test]
    fn test_pop_on_empty_fails_without_mutation() {
        let mut component = LongSeason::new(2, config(1, 1)).unwrap();
        assert!(component.pop_last().is_ok());
        assert!(component.pop_last().is_ok());
        assert!(component.is_empty());
        let state = component.state();
        assert!(matches!(
            component.pop_last(),
            Err(ComponentError::EmptyMatrix(_))
        ));
        assert_eq!(component.state(), state);
        assert_eq!(component.len(), 0);
    }
}
