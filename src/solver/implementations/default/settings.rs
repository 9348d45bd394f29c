use crate::algebra::*;
use crate::solver::core::{DebugFlags, SettingsError};
use derive_builder::Builder;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Settings for the [`DefaultSolver`](super::DefaultSolver)

#[derive(Builder, Debug, Clone, PartialEq)]
#[builder(build_fn(validate = "Self::validate"))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DefaultSettings<T: FloatT> {
    ///feasibility tolerance.  A negative value selects a tolerance
    ///proportional to the largest entry of `q`
    #[builder(default = "(-1.0).as_T()")]
    pub tolerance: T,

    ///scale factor for the automatic tolerance
    #[builder(default = "(1e-10).as_T()")]
    pub tol_auto_scale: T,

    ///maximum number of pivoting rounds, as a multiple of the problem size
    #[builder(default = "100")]
    pub iteration_limit: u32,

    ///change the states of all infeasible variables at once in each round
    #[builder(default = "false")]
    pub block_pivoting: bool,

    ///rounds without a new minimum infeasibility count before
    ///block pivoting is abandoned
    #[builder(default = "4")]
    pub stall_window: u32,

    ///tie breaking rule for blocking variables: "minimum" or "lexicographic"
    #[builder(default = r#""minimum".to_string()"#)]
    pub ratio_test: String,

    ///smallest admissible squared pivot when extending the basis
    #[builder(default = "(1e-10).as_T()")]
    pub pivot_perturbation: T,

    ///double the tolerance for the rest of a round after a rejected pivot
    #[builder(default = "true")]
    pub tolerance_escalation: bool,

    ///relative disagreement between updated and recomputed values that
    ///counts as a consistency failure
    #[builder(default = "(1e-6).as_T()")]
    pub consistency_tol: T,

    ///consecutive consistency failures before a numeric error is reported
    #[builder(default = "3")]
    pub consistency_strikes: u32,

    ///use the incoming variable states as the initial basis
    #[builder(default = "true")]
    pub warm_start: bool,

    ///compute residual and basis conditioning diagnostics after each solve
    #[builder(default = "false")]
    pub compute_residual: bool,

    ///verbose printing
    #[builder(default = "false")]
    pub verbose: bool,

    ///event tracing
    #[builder(default = "DebugFlags::NONE")]
    pub debug: DebugFlags,
}

impl<T> Default for DefaultSettings<T>
where
    T: FloatT,
{
    fn default() -> DefaultSettings<T> {
        DefaultSettingsBuilder::<T>::default().build().unwrap()
    }
}

impl<T> DefaultSettings<T>
where
    T: FloatT,
{
    /// check that all settings have legal values
    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_ratio_test(&self.ratio_test)?;
        validate_iteration_limit(self.iteration_limit)?;
        validate_stall_window(self.stall_window)?;
        validate_nonnegative(self.tol_auto_scale, "tol_auto_scale")?;
        validate_nonnegative(self.pivot_perturbation, "pivot_perturbation")?;
        validate_positive(self.consistency_tol, "consistency_tol")?;
        validate_strikes(self.consistency_strikes)?;
        if self.tolerance.is_nan() || self.tolerance.is_infinite() {
            return Err(SettingsError::BadFieldValue("tolerance"));
        }
        Ok(())
    }

    /// Feasibility tolerance for a problem with the given `q`
    pub(crate) fn solve_tolerance(&self, q: &[T]) -> T {
        if self.tolerance >= T::zero() {
            self.tolerance
        } else {
            self.tol_auto_scale * q.norm_inf()
        }
    }
}

// pre build checker (for auto-validation when using the builder)

impl From<SettingsError> for DefaultSettingsBuilderError {
    fn from(e: SettingsError) -> Self {
        DefaultSettingsBuilderError::ValidationError(e.to_string())
    }
}

/// Automatic pre-build settings validation
impl<T> DefaultSettingsBuilder<T>
where
    T: FloatT,
{
    pub fn validate(&self) -> Result<(), SettingsError> {
        if let Some(ref ratio_test) = self.ratio_test {
            validate_ratio_test(ratio_test)?;
        }
        if let Some(iteration_limit) = self.iteration_limit {
            validate_iteration_limit(iteration_limit)?;
        }
        if let Some(stall_window) = self.stall_window {
            validate_stall_window(stall_window)?;
        }
        if let Some(v) = self.pivot_perturbation {
            validate_nonnegative(v, "pivot_perturbation")?;
        }
        if let Some(v) = self.consistency_tol {
            validate_positive(v, "consistency_tol")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------
// individual validation functions go here
// ---------------------------------------------------------

fn validate_ratio_test(ratio_test: &str) -> Result<(), SettingsError> {
    match ratio_test {
        "minimum" => Ok(()),
        "lexicographic" => Ok(()),
        _ => Err(SettingsError::BadFieldValue("ratio_test")),
    }
}

fn validate_iteration_limit(limit: u32) -> Result<(), SettingsError> {
    match limit {
        0 => Err(SettingsError::BadFieldValue("iteration_limit")),
        _ => Ok(()),
    }
}

fn validate_stall_window(window: u32) -> Result<(), SettingsError> {
    match window {
        0 => Err(SettingsError::BadFieldValue("stall_window")),
        _ => Ok(()),
    }
}

fn validate_strikes(strikes: u32) -> Result<(), SettingsError> {
    match strikes {
        0 => Err(SettingsError::BadFieldValue("consistency_strikes")),
        _ => Ok(()),
    }
}

fn validate_nonnegative<T: FloatT>(v: T, name: &'static str) -> Result<(), SettingsError> {
    if v >= T::zero() && v.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(name))
    }
}

fn validate_positive<T: FloatT>(v: T, name: &'static str) -> Result<(), SettingsError> {
    if v > T::zero() && v.is_finite() {
        Ok(())
    } else {
        Err(SettingsError::BadFieldValue(name))
    }
}

#[test]
fn test_settings_validate() {
    // all standard settings
    let settings = DefaultSettingsBuilder::<f64>::default().build().unwrap();
    assert_eq!(settings.iteration_limit, 100);
    assert!(!settings.block_pivoting);
    assert!(settings.tolerance < 0.);

    // fail on unknown ratio test
    assert!(DefaultSettingsBuilder::<f64>::default()
        .ratio_test("foo".to_string())
        .build()
        .is_err());

    assert!(DefaultSettingsBuilder::<f64>::default()
        .ratio_test("lexicographic".to_string())
        .build()
        .is_ok());

    assert!(DefaultSettingsBuilder::<f64>::default()
        .stall_window(0)
        .build()
        .is_err());

    // directly construct bad DefaultSettings and manually check
    let settings = DefaultSettings::<f64> {
        ratio_test: "foo".to_string(),
        ..DefaultSettings::default()
    };
    assert_eq!(
        settings.validate(),
        Err(SettingsError::BadFieldValue("ratio_test"))
    );

    let settings = DefaultSettings::<f64> {
        consistency_tol: 0.,
        ..DefaultSettings::default()
    };
    assert!(settings.validate().is_err());

    let settings = DefaultSettings::<f64> {
        tolerance: f64::NAN,
        ..DefaultSettings::default()
    };
    assert!(settings.validate().is_err());
}

#[test]
fn test_solve_tolerance() {
    let q = [1., -250., 3.];
    let auto = DefaultSettings::<f64>::default();
    assert!((auto.solve_tolerance(&q) - 2.5e-8).abs() < 1e-20);

    let fixed = DefaultSettings::<f64> {
        tolerance: 1e-6,
        ..DefaultSettings::default()
    };
    assert_eq!(fixed.solve_tolerance(&q), 1e-6);
}
