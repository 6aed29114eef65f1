//! Shared regression-feature storage for dynamic components

use crate::component::ComponentType;
use crate::error::{ComponentError, Result};
use ndarray::{Array1, Array2};
use serde::{Deserialize, Serialize};

/// Feature storage and metadata shared by dynamic-regression components
///
/// This is the slot the estimation engine reads: one feature row per
/// tracked observation, the regression dimension `d`, the discount factor,
/// and the name and tag the framework dispatches on. The row count `n` is
/// kept in lockstep with the stored rows by the mutators below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegressionBase {
    features: Vec<Array1<f64>>,
    n: usize,
    d: usize,
    discount: f64,
    name: String,
    component_type: ComponentType,
}

impl RegressionBase {
    /// Create a base over pre-generated feature rows of width `d`
    pub fn new(
        features: Vec<Array1<f64>>,
        d: usize,
        discount: f64,
        name: impl Into<String>,
        component_type: ComponentType,
    ) -> Self {
        let n = features.len();
        Self {
            features,
            n,
            d,
            discount,
            name: name.into(),
            component_type,
        }
    }

    /// Length-validation hook invoked by subtypes at construction
    ///
    /// The regression dimension must be strictly smaller than the number of
    /// tracked observations, otherwise the design cannot be estimated.
    pub fn check_feature_length(&self) -> Result<()> {
        if self.d >= self.n {
            return Err(ComponentError::ConfigError(format!(
                "regression dimension {} must be smaller than the {} tracked observations",
                self.d, self.n
            )));
        }
        Ok(())
    }

    /// Append feature rows, keeping `n` in lockstep
    pub fn extend_features<I>(&mut self, rows: I)
    where
        I: IntoIterator<Item = Array1<f64>>,
    {
        self.features.extend(rows);
        self.n = self.features.len();
    }

    /// Remove and return the last feature row, if any
    pub fn pop_feature(&mut self) -> Option<Array1<f64>> {
        let row = self.features.pop()?;
        self.n = self.features.len();
        Some(row)
    }

    /// Assemble the `n x d` design matrix read by the estimator
    pub fn design_matrix(&self) -> Result<Array2<f64>> {
        if self.features.is_empty() {
            return Err(ComponentError::EmptyMatrix(
                "no feature rows to assemble".to_string(),
            ));
        }
        let data: Vec<f64> = self
            .features
            .iter()
            .flat_map(|row| row.iter().copied())
            .collect();
        Array2::from_shape_vec((self.n, self.d), data).map_err(ComponentError::from)
    }

    /// Feature rows, one per tracked observation
    pub fn features(&self) -> &[Array1<f64>] {
        &self.features
    }

    /// Number of tracked observations
    pub fn n(&self) -> usize {
        self.n
    }

    /// Regression dimension (row width)
    pub fn dimension(&self) -> usize {
        self.d
    }

    /// Discount factor forwarded to the estimation engine
    pub fn discount(&self) -> f64 {
        self.discount
    }

    /// Component name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Dispatch tag
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }
}
