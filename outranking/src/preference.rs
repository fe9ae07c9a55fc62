//! The six generalized criteria of PROMETHEE.
//!
//! Every function maps a direction-adjusted difference `d` to a preference
//! degree in [0, 1]. A non-positive difference never yields any preference.

use snafu::ensure;

use crate::config::{InvalidThresholdSnafu, OutrankingError};

/// A preference function with its parameters.
///
/// - `q` is the indifference threshold: differences up to `q` are negligible.
/// - `p` is the preference threshold: differences above `p` are a strict preference.
/// - `s` is the inflection point of the Gaussian function.
#[derive(PartialEq, Debug, Clone, Copy)]
pub enum PreferenceFunction {
    /// Any positive difference is a strict preference.
    Usual,
    /// Quasi-criterion.
    UShape { q: f64 },
    /// Linear preference up to `p`.
    VShape { p: f64 },
    /// Half preference between `q` and `p`, full preference above `p`.
    Level { q: f64, p: f64 },
    /// Linear preference between `q` and `p` (area of indifference).
    VShapeIndifference { q: f64, p: f64 },
    Gaussian { s: f64 },
}

impl PreferenceFunction {
    pub const NAMES: [&'static str; 6] = [
        "Usual",
        "U-Shape",
        "V-Shape",
        "Level",
        "V-Shape with Indifference",
        "Gaussian",
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PreferenceFunction::Usual => "Usual",
            PreferenceFunction::UShape { .. } => "U-Shape",
            PreferenceFunction::VShape { .. } => "V-Shape",
            PreferenceFunction::Level { .. } => "Level",
            PreferenceFunction::VShapeIndifference { .. } => "V-Shape with Indifference",
            PreferenceFunction::Gaussian { .. } => "Gaussian",
        }
    }

    /// The (q, p, s) parameters used by this function.
    pub fn parameters(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        match *self {
            PreferenceFunction::Usual => (None, None, None),
            PreferenceFunction::UShape { q } => (Some(q), None, None),
            PreferenceFunction::VShape { p } => (None, Some(p), None),
            PreferenceFunction::Level { q, p } => (Some(q), Some(p), None),
            PreferenceFunction::VShapeIndifference { q, p } => (Some(q), Some(p), None),
            PreferenceFunction::Gaussian { s } => (None, None, Some(s)),
        }
    }

    /// The preference degree for the difference `d`.
    ///
    /// The parameters are expected to have been validated first.
    /// An undefined difference (NaN) gives no preference.
    pub fn evaluate(&self, d: f64) -> f64 {
        if d.is_nan() {
            return 0.0;
        }
        match *self {
            PreferenceFunction::Usual => {
                if d > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            PreferenceFunction::UShape { q } => {
                if d > q {
                    1.0
                } else {
                    0.0
                }
            }
            PreferenceFunction::VShape { p } => {
                if d <= 0.0 {
                    0.0
                } else if d <= p {
                    d / p
                } else {
                    1.0
                }
            }
            PreferenceFunction::Level { q, p } => {
                if d <= q {
                    0.0
                } else if d <= p {
                    0.5
                } else {
                    1.0
                }
            }
            PreferenceFunction::VShapeIndifference { q, p } => {
                if d <= q {
                    0.0
                } else if d <= p {
                    (d - q) / (p - q)
                } else {
                    1.0
                }
            }
            PreferenceFunction::Gaussian { s } => {
                if d <= 0.0 {
                    0.0
                } else {
                    1.0 - (-(d * d) / (2.0 * s * s)).exp()
                }
            }
        }
    }

    /// Checks the parameters, reporting `criterion` as the culprit.
    pub fn validate(&self, criterion: &str) -> Result<(), OutrankingError> {
        let (q, p, s) = self.parameters();
        let function = self.name();
        let fail = |reason: String| InvalidThresholdSnafu {
            criterion,
            function,
            reason,
        };

        for (label, value) in [("q", q), ("p", p), ("s", s)] {
            if let Some(x) = value {
                ensure!(x.is_finite(), fail(format!("{} = {} is not finite", label, x)));
            }
        }
        if let Some(q) = q {
            ensure!(
                q >= 0.0,
                fail(format!("the indifference threshold q = {} is negative", q))
            );
        }
        match *self {
            PreferenceFunction::VShape { p } => {
                ensure!(
                    p > 0.0,
                    fail(format!("the preference threshold p = {} must be positive", p))
                );
            }
            PreferenceFunction::Level { q, p } | PreferenceFunction::VShapeIndifference { q, p } => {
                ensure!(
                    p > q,
                    fail(format!(
                        "the preference threshold p = {} must be greater than the indifference threshold q = {}",
                        p, q
                    ))
                );
            }
            PreferenceFunction::Gaussian { s } => {
                ensure!(
                    s > 0.0,
                    fail(format!("the parameter s = {} must be positive", s))
                );
            }
            PreferenceFunction::Usual | PreferenceFunction::UShape { .. } => {}
        }
        Ok(())
    }
}
