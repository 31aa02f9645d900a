//! Coefficient definition

use serde::{Deserialize, Serialize};

/// A fitted term of a regression model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coefficient {
    /// Term name, e.g. `x^2`
    pub name: String,
    /// Estimated value
    pub estimate: f64,
    /// Power of `x` this term multiplies
    pub power: usize,
    /// Is this the intercept?
    pub is_intercept: bool,
}

impl Coefficient {
    /// Create the coefficient for `x^power`
    pub fn new(power: usize, estimate: f64) -> Self {
        let name = match power {
            0 => "(Intercept)".to_string(),
            1 => "x".to_string(),
            p => format!("x^{}", p),
        };
        Self {
            name,
            estimate,
            power,
            is_intercept: power == 0,
        }
    }

    /// Rename the term
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}
