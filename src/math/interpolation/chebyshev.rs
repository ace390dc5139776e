/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::errors::MathError;

use super::{InterpolationError, TruncatedRecordSnafu};
use snafu::ensure;

/// Evaluates a Chebyshev polynomial and its time derivative by the Clenshaw
/// recurrence, given the coefficients of one interpolation record.
///
/// `normalized_time` must already be scaled to [-1, 1] over the record span;
/// `interval_radius_s` is the half-length of that span in seconds and scales
/// the derivative back to per-second units.
pub fn chebyshev_eval(
    normalized_time: f64,
    coeffs: &[f64],
    interval_radius_s: f64,
) -> Result<(f64, f64), InterpolationError> {
    if interval_radius_s.abs() < f64::EPSILON {
        return Err(InterpolationError::InterpMath {
            source: MathError::DivisionByZero {
                action: "interval radius in Chebyshev eval is zero",
            },
        });
    }
    ensure!(
        !coeffs.is_empty(),
        TruncatedRecordSnafu {
            need: 1_usize,
            got: 0_usize
        }
    );

    // Workspace arrays
    let mut w = [0.0_f64; 3];
    let mut dw = [0.0_f64; 3];

    for j in (1..coeffs.len()).rev() {
        w[2] = w[1];
        w[1] = w[0];
        w[0] = coeffs[j] + (2.0 * normalized_time * w[1] - w[2]);

        dw[2] = dw[1];
        dw[1] = dw[0];
        dw[0] = 2.0 * w[1] + (2.0 * normalized_time * dw[1] - dw[2]);
    }

    let val = coeffs[0] + (normalized_time * w[0] - w[1]);
    let deriv = (w[0] + normalized_time * dw[0] - dw[1]) / interval_radius_s;

    Ok((val, deriv))
}

#[cfg(test)]
mod chebyshev_ut {
    use super::*;

    #[test]
    fn evaluates_linear_polynomial() {
        // T0 + 2 T1 = 1 + 2x
        let coeffs = [1.0, 2.0];
        let (val, deriv) = chebyshev_eval(0.25, &coeffs, 10.0).unwrap();
        assert!((val - 1.5).abs() < 1e-15);
        assert!((deriv - 0.2).abs() < 1e-15);
    }

    #[test]
    fn evaluates_t2() {
        // T2(x) = 2x^2 - 1, T2'(x) = 4x
        let coeffs = [0.0, 0.0, 1.0];
        for x in [-1.0, -0.3, 0.0, 0.8, 1.0] {
            let (val, deriv) = chebyshev_eval(x, &coeffs, 1.0).unwrap();
            assert!((val - (2.0 * x * x - 1.0)).abs() < 1e-14);
            assert!((deriv - 4.0 * x).abs() < 1e-14);
        }
    }

    #[test]
    fn zero_radius_is_rejected() {
        assert!(chebyshev_eval(0.0, &[1.0], 0.0).is_err());
    }
}
