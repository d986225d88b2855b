//! Empirical power-law estimator of the roaster temperature.

use crate::data_models::{EstimationResult, PreparedRow};
use crate::errors::{EstimatorError, Result};

/// Fixed coefficients of the power-law model.
///
/// `T = c0 + batch^c1 + dust^c2 + roasted^c3 - energy^c4 - balance^c5`, where
/// the dust and roasted terms are 1 when their input is exactly zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ModelParams {
    pub c0: f64,
    pub c1: f64,
    pub c2: f64,
    pub c3: f64,
    pub c4: f64,
    pub c5: f64,
}

impl ModelParams {
    /// Coefficients fitted for the roasting line.
    pub const ROASTER: Self = Self {
        c0: 1287.1,
        c1: 0.597,
        c2: -0.095,
        c3: -0.067,
        c4: 0.022,
        c5: 0.007,
    };

    pub fn estimate(
        &self,
        input_batch_sum: f64,
        dust_flow: f64,
        roasted_input: f64,
        energy: f64,
        energy_balance: f64,
    ) -> Result<f64> {
        let batch_term = power("input_batch_sum", input_batch_sum, self.c1)?;
        let dust_term = if dust_flow == 0.0 {
            1.0
        } else {
            power("dust_flow", dust_flow, self.c2)?
        };
        let roaster_term = if roasted_input == 0.0 {
            1.0
        } else {
            power("roasted_input", roasted_input, self.c3)?
        };
        let energy_term = power("energy", energy, self.c4)?;
        let balance_term = power("energy_balance", energy_balance, self.c5)?;

        Ok(self.c0 + batch_term + dust_term + roaster_term - energy_term - balance_term)
    }

    pub fn estimate_row(&self, row: &PreparedRow) -> Result<f64> {
        self.estimate(
            row.input_batch_sum(),
            row.dust_flow,
            row.roasted_input,
            row.total_thermal_power_mw,
            row.heat_balance,
        )
    }
}

impl Default for ModelParams {
    fn default() -> Self {
        Self::ROASTER
    }
}

// Real power only. A negative base with a fractional exponent has no real
// value and NaN never yields one.
fn power(term: &'static str, base: f64, exponent: f64) -> Result<f64> {
    if base.is_nan() || (base < 0.0 && exponent.fract() != 0.0) {
        return Err(EstimatorError::Domain { term, base, exponent });
    }
    Ok(base.powf(exponent))
}

/// Estimate with the roaster coefficients.
pub fn estimate(
    input_batch_sum: f64,
    dust_flow: f64,
    roasted_input: f64,
    energy: f64,
    energy_balance: f64,
) -> Result<f64> {
    ModelParams::ROASTER.estimate(input_batch_sum, dust_flow, roasted_input, energy, energy_balance)
}

/// Append an estimate to every prepared row. Stops at the first row outside
/// the model's domain.
pub fn estimate_all(params: &ModelParams, rows: Vec<PreparedRow>) -> Result<Vec<EstimationResult>> {
    rows.into_iter()
        .map(|row| match params.estimate_row(&row) {
            Ok(estimated_temperature) => Ok(EstimationResult {
                row,
                estimated_temperature,
            }),
            Err(e) => {
                log::error!("Estimation failed for row at {}: {}", row.timestamp, e);
                Err(e)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_dust_and_roasted_short_circuit() {
        let p = ModelParams::ROASTER;
        let expected = p.c0 + 10f64.powf(p.c1) + 1.0 + 1.0 - 5f64.powf(p.c4) - 2f64.powf(p.c5);
        assert_eq!(estimate(10.0, 0.0, 0.0, 5.0, 2.0).unwrap(), expected);
        assert_relative_eq!(expected, 1291.0127604315235, epsilon = 1e-9);
    }

    #[test]
    fn test_nonzero_dust_and_roasted() {
        let value = estimate(4.0, 0.5, 2.0, 3.0, 1.0).unwrap();
        assert_relative_eq!(value, 1289.3860844491555, epsilon = 1e-9);
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let a = estimate(123.4, 5.6, 7.8, 9.1, 234.5).unwrap();
        let b = estimate(123.4, 5.6, 7.8, 9.1, 234.5).unwrap();
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_negative_base_is_domain_error() {
        let err = estimate(10.0, 0.0, 0.0, 5.0, -2.0).unwrap_err();
        assert!(matches!(err, EstimatorError::Domain { term: "energy_balance", .. }));

        let err = estimate(10.0, -1.0, 0.0, 5.0, 2.0).unwrap_err();
        assert!(matches!(err, EstimatorError::Domain { term: "dust_flow", .. }));
    }

    #[test]
    fn test_nan_input_is_domain_error() {
        assert!(estimate(f64::NAN, 0.0, 0.0, 5.0, 2.0).is_err());
    }

    #[test]
    fn test_integer_exponent_accepts_negative_base() {
        let params = ModelParams { c5: 1.0, ..ModelParams::ROASTER };
        let value = params.estimate(10.0, 0.0, 0.0, 5.0, -2.0).unwrap();
        let expected = params.c0 + 10f64.powf(params.c1) + 2.0 - 5f64.powf(params.c4) + 2.0;
        assert_relative_eq!(value, expected, epsilon = 1e-9);
    }
}
