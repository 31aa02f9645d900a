//! Two-sample, k-sample and goodness-of-fit tests
//!
//! Tests never fail on thin data: a group with fewer than two observations
//! produces a [`TestResult`] whose statistic and p-value are NaN, so a panel
//! of tests can be rendered even when one of them has nothing to say.

use std::fmt;

use serde::{Deserialize, Serialize};
use statrs::distribution::{ChiSquared, ContinuousCDF, FisherSnedecor, StudentsT};

use stacks_core::data::{Dataset, FieldVector};

use super::{mean, sample_variance};
use crate::base::SIGNIFICANCE_LEVEL;
use crate::error::{ModelError, Result};

/// Which test produced a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TestKind {
    WelchT,
    Anova,
    ChiSquare,
}

impl fmt::Display for TestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TestKind::WelchT => write!(f, "Welch's t-test"),
            TestKind::Anova => write!(f, "One-way ANOVA"),
            TestKind::ChiSquare => write!(f, "Chi-square goodness of fit"),
        }
    }
}

/// Effect-size measure reported alongside a test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EffectMeasure {
    CohensD,
    EtaSquared,
    CramersV,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectSize {
    pub measure: EffectMeasure,
    pub value: f64,
}

/// Outcome of a hypothesis test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    pub test: TestKind,
    pub statistic: f64,
    /// Degrees of freedom; for ANOVA the between-groups df
    pub df: f64,
    /// Within-groups df, ANOVA only
    pub df_within: Option<f64>,
    /// Two-sided p-value in `[0, 1]`, or NaN when undefined
    pub p_value: f64,
    /// `p_value < SIGNIFICANCE_LEVEL`; false when the p-value is NaN
    pub significant: bool,
    pub effect_size: EffectSize,
}

impl TestResult {
    fn new(test: TestKind, statistic: f64, df: f64, p_value: f64, effect: EffectSize) -> Self {
        let p_value = if p_value.is_nan() {
            p_value
        } else {
            p_value.clamp(0.0, 1.0)
        };
        Self {
            test,
            statistic,
            df,
            df_within: None,
            p_value,
            significant: p_value < SIGNIFICANCE_LEVEL,
            effect_size: effect,
        }
    }

    /// NaN-bearing result for inputs too small to test
    fn undefined(test: TestKind, measure: EffectMeasure) -> Self {
        let effect = EffectSize {
            measure,
            value: f64::NAN,
        };
        let mut result = Self::new(test, f64::NAN, f64::NAN, f64::NAN, effect);
        if test == TestKind::Anova {
            result.df_within = Some(f64::NAN);
        }
        result
    }

    /// True when both statistic and p-value are finite
    pub fn is_defined(&self) -> bool {
        self.statistic.is_finite() && self.p_value.is_finite()
    }
}

/// Welch's unequal-variance two-sample t-test
///
/// Uses sample variances. The Welch-Satterthwaite df is floored to an integer
/// no smaller than 1. Cohen's d uses `sqrt((var1 + var2) / 2)`.
pub fn welch_t_test(a: &FieldVector, b: &FieldVector) -> TestResult {
    if a.len() < 2 || b.len() < 2 {
        log::debug!(
            "t-test needs two observations per group, got {} and {}",
            a.len(),
            b.len()
        );
        return TestResult::undefined(TestKind::WelchT, EffectMeasure::CohensD);
    }

    let (n1, n2) = (a.len() as f64, b.len() as f64);
    let (m1, m2) = (mean(a.as_slice()), mean(b.as_slice()));
    let (v1, v2) = (sample_variance(a.as_slice()), sample_variance(b.as_slice()));

    let se1 = v1 / n1;
    let se2 = v2 / n2;
    let t = (m1 - m2) / (se1 + se2).sqrt();

    let welch_df = (se1 + se2).powi(2) / (se1.powi(2) / (n1 - 1.0) + se2.powi(2) / (n2 - 1.0));
    let df = if welch_df.is_finite() {
        welch_df.floor().max(1.0)
    } else {
        f64::NAN
    };

    let p_value = StudentsT::new(0.0, 1.0, df)
        .map(|dist| 2.0 * (1.0 - dist.cdf(t.abs())))
        .unwrap_or(f64::NAN);
    let p_value = if t.is_nan() { f64::NAN } else { p_value };

    let cohens_d = (m1 - m2) / ((v1 + v2) / 2.0).sqrt();

    TestResult::new(
        TestKind::WelchT,
        t,
        df,
        p_value,
        EffectSize {
            measure: EffectMeasure::CohensD,
            value: cohens_d,
        },
    )
}

/// One-way analysis of variance across `groups`
///
/// Needs at least two groups of at least two observations each.
pub fn one_way_anova(groups: &[FieldVector]) -> TestResult {
    if groups.len() < 2 || groups.iter().any(|g| g.len() < 2) {
        log::debug!("ANOVA needs at least two groups of two observations");
        return TestResult::undefined(TestKind::Anova, EffectMeasure::EtaSquared);
    }

    let k = groups.len();
    let n: usize = groups.iter().map(FieldVector::len).sum();
    let grand_mean = groups.iter().flat_map(FieldVector::iter).sum::<f64>() / n as f64;

    let (ssb, ssw) = groups.iter().fold((0.0, 0.0), |(ssb, ssw), group| {
        let gm = mean(group.as_slice());
        let within: f64 = group.iter().map(|v| (v - gm).powi(2)).sum();
        (
            ssb + group.len() as f64 * (gm - grand_mean).powi(2),
            ssw + within,
        )
    });

    let dfb = (k - 1) as f64;
    let dfw = (n - k) as f64;
    let f_stat = (ssb / dfb) / (ssw / dfw);

    let p_value = if f_stat.is_nan() {
        f64::NAN
    } else {
        FisherSnedecor::new(dfb, dfw)
            .map(|dist| 1.0 - dist.cdf(f_stat))
            .unwrap_or(f64::NAN)
    };

    let mut result = TestResult::new(
        TestKind::Anova,
        f_stat,
        dfb,
        p_value,
        EffectSize {
            measure: EffectMeasure::EtaSquared,
            value: ssb / (ssb + ssw),
        },
    );
    result.df_within = Some(dfw);
    result
}

/// ANOVA of `metric` across the categories of `category`
pub fn anova_by_category(dataset: &Dataset, category: &str, metric: &str) -> Result<TestResult> {
    let groups: Vec<FieldVector> = dataset.group_by(category, metric)?.into_values().collect();
    Ok(one_way_anova(&groups))
}

/// Chi-square goodness of fit of observed against expected counts
///
/// A zero expected count makes the statistic infinite or NaN; that value is
/// returned as computed.
pub fn chi_square_goodness_of_fit(observed: &[f64], expected: &[f64]) -> Result<TestResult> {
    if observed.len() != expected.len() {
        return Err(ModelError::invalid_config(format!(
            "observed has {} categories but expected has {}",
            observed.len(),
            expected.len()
        )));
    }
    if observed.len() < 2 {
        return Ok(TestResult::undefined(
            TestKind::ChiSquare,
            EffectMeasure::CramersV,
        ));
    }

    let chi_square: f64 = observed
        .iter()
        .zip(expected)
        .map(|(o, e)| (o - e).powi(2) / e)
        .sum();
    let df = (observed.len() - 1) as f64;

    let p_value = if chi_square.is_nan() {
        f64::NAN
    } else {
        ChiSquared::new(df)
            .map(|dist| 1.0 - dist.cdf(chi_square))
            .unwrap_or(f64::NAN)
    };

    // min(rows, cols) - 1 over the two count vectors, which is k - 1
    let total: f64 = observed.iter().sum();
    let cramers_v = (chi_square / (total * (observed.len() - 1) as f64)).sqrt();

    Ok(TestResult::new(
        TestKind::ChiSquare,
        chi_square,
        df,
        p_value,
        EffectSize {
            measure: EffectMeasure::CramersV,
            value: cramers_v,
        },
    ))
}
