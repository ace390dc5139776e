/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Solvers for Kepler's equation M = E - e sin E on the elliptical domain.

use core::f64::consts::{PI, TAU};

use crate::errors::MathError;

/// Convergence tolerance of the fixed-point iteration, on the eccentric anomaly in radians.
pub const FIXED_POINT_TOL_RAD: f64 = 1e-8;

/// Convergence tolerance of the Newton-Raphson and Halley iterations, on the
/// eccentric anomaly in radians.
pub const SECOND_ORDER_TOL_RAD: f64 = 1e-14;

const FIXED_POINT_MAX_ITER: usize = 100_000;
const SECOND_ORDER_MAX_ITER: usize = 64;

/// Which iteration scheme solves Kepler's equation. All three agree within
/// their tolerances; they trade robustness for per-call cost.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum KeplerSolver {
    /// E <- M + e sin E. Linear convergence with rate e; cheap per iteration.
    FixedPoint,
    /// Newton-Raphson on f(E) = E - e sin E - M. Quadratic convergence.
    #[default]
    Newton,
    /// Halley's method, using f'' as well. Cubic convergence.
    Halley,
}

impl KeplerSolver {
    pub fn tolerance_rad(self) -> f64 {
        match self {
            Self::FixedPoint => FIXED_POINT_TOL_RAD,
            Self::Newton | Self::Halley => SECOND_ORDER_TOL_RAD,
        }
    }
}

/// Solves M = E - e sin E for the eccentric anomaly, in radians.
///
/// The mean anomaly may be any finite angle; the result lies in the same
/// revolution as the normalized input, within [0, 2π).
pub fn solve_kepler(ma_rad: f64, ecc: f64, solver: KeplerSolver) -> Result<f64, MathError> {
    if !(0.0..1.0).contains(&ecc) {
        return Err(MathError::DomainError {
            value: ecc,
            msg: "eccentricity outside [0, 1) in Kepler solver",
        });
    }
    let m = ma_rad.rem_euclid(TAU);

    let ea = match solver {
        KeplerSolver::FixedPoint => solve_fixed_point(m, ecc)?,
        KeplerSolver::Newton => solve_newton(m, ecc)?,
        KeplerSolver::Halley => solve_halley(m, ecc)?,
    };
    Ok(ea.rem_euclid(TAU))
}

fn solve_fixed_point(m: f64, ecc: f64) -> Result<f64, MathError> {
    let mut ea = m;
    // The iteration contracts with factor e per step, so the step size must
    // undershoot the tolerance by (1 - e) for the true error to meet it.
    let stop = FIXED_POINT_TOL_RAD * (1.0 - ecc).max(f64::EPSILON);
    for _ in 0..FIXED_POINT_MAX_ITER {
        let next = m + ecc * ea.sin();
        let delta = next - ea;
        ea = next;
        if delta.abs() < stop {
            return Ok(ea);
        }
    }
    Err(MathError::MaxIterationsReached {
        iter: FIXED_POINT_MAX_ITER,
        action: "solving Kepler's equation by fixed-point iteration",
    })
}

/// Starting guess for the second-order schemes. M itself is a poor seed at
/// high eccentricity; pi is always in the basin of convergence there.
fn initial_guess(m: f64, ecc: f64) -> f64 {
    if ecc > 0.8 {
        PI
    } else {
        m
    }
}

fn solve_newton(m: f64, ecc: f64) -> Result<f64, MathError> {
    let mut ea = initial_guess(m, ecc);
    for _ in 0..SECOND_ORDER_MAX_ITER {
        let (sin_ea, cos_ea) = ea.sin_cos();
        let f = ea - ecc * sin_ea - m;
        let fp = 1.0 - ecc * cos_ea;
        let delta = f / fp;
        ea -= delta;
        if delta.abs() < SECOND_ORDER_TOL_RAD {
            return Ok(ea);
        }
    }
    Err(MathError::MaxIterationsReached {
        iter: SECOND_ORDER_MAX_ITER,
        action: "solving Kepler's equation by Newton-Raphson",
    })
}

fn solve_halley(m: f64, ecc: f64) -> Result<f64, MathError> {
    let mut ea = initial_guess(m, ecc);
    for _ in 0..SECOND_ORDER_MAX_ITER {
        let (sin_ea, cos_ea) = ea.sin_cos();
        let f = ea - ecc * sin_ea - m;
        let fp = 1.0 - ecc * cos_ea;
        let fpp = ecc * sin_ea;
        let delta = 2.0 * f * fp / (2.0 * fp * fp - f * fpp);
        ea -= delta;
        if delta.abs() < SECOND_ORDER_TOL_RAD {
            return Ok(ea);
        }
    }
    Err(MathError::MaxIterationsReached {
        iter: SECOND_ORDER_MAX_ITER,
        action: "solving Kepler's equation by Halley's method",
    })
}
