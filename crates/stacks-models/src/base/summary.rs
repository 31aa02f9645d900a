//! Model summary structures

use std::fmt;

use serde::{Deserialize, Serialize};

use super::coefficient::Coefficient;
use super::statistics::FitStatistics;
use crate::regression::RegressionKind;

/// Printable summary of a fitted regression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Model family
    pub kind: RegressionKind,
    /// Fitted equation, e.g. `y = 1.0000 + 2.0000*x`
    pub equation: String,
    /// Number of observations
    pub n_obs: usize,
    /// Coefficients table
    pub coefficients: Vec<Coefficient>,
    /// Fit statistics
    pub statistics: FitStatistics,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model Summary")?;
        writeln!(f, "=============")?;
        writeln!(f, "Model Type: {}", self.kind)?;
        writeln!(f, "Equation: {}", self.equation)?;
        writeln!(f, "Observations: {}", self.n_obs)?;
        writeln!(f)?;

        writeln!(f, "Coefficients:")?;
        writeln!(f, "{:<20} {:>12}", "Term", "Estimate")?;
        writeln!(f, "{:-<20} {:-<12}", "", "")?;
        for coeff in &self.coefficients {
            writeln!(f, "{:<20} {:>12.6}", coeff.name, coeff.estimate)?;
        }
        writeln!(f)?;

        writeln!(f, "Fit Statistics:")?;
        let stats = &self.statistics;
        if let Some(r2) = stats.r_squared {
            writeln!(f, "  R-squared: {:.4}", r2)?;
        }
        if let Some(adj_r2) = stats.adj_r_squared {
            writeln!(f, "  Adjusted R-squared: {:.4}", adj_r2)?;
        }
        if let Some(mse) = stats.mse {
            writeln!(f, "  MSE: {:.4}", mse)?;
        }
        if let Some(mae) = stats.mae {
            writeln!(f, "  MAE: {:.4}", mae)?;
        }
        if let Some(resid_se) = stats.residual_std_error {
            writeln!(f, "  Residual Std. Error: {:.4}", resid_se)?;
        }
        if let Some(df_resid) = stats.df_residual {
            writeln!(f, "  Residual DF: {}", df_resid)?;
        }

        Ok(())
    }
}
