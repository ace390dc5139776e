/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use snafu::prelude::*;

use crate::NaifId;

#[derive(Copy, Clone, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum MathError {
    #[snafu(display("prevented a division by zero when {action}"))]
    DivisionByZero { action: &'static str },
    #[snafu(display("{msg}: {value}"))]
    DomainError { value: f64, msg: &'static str },
    #[snafu(display("max iterations reached ({iter}) when {action}"))]
    MaxIterationsReached { iter: usize, action: &'static str },
}

/// Errors of the dynamical core. A `NonFiniteState` is fatal to the advance
/// call that produced it; the particle system is left bitwise unchanged.
#[derive(Copy, Clone, PartialEq, Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum PhysicsError {
    #[snafu(display("{source}"))]
    AppliedMath { source: MathError },
    #[snafu(display("particle {id} acquired a non-finite component while {action}"))]
    NonFiniteState { id: NaifId, action: &'static str },
    #[snafu(display("eccentricity {ecc} is outside the elliptical domain while {action}"))]
    NotElliptical { ecc: f64, action: &'static str },
    #[snafu(display("no particle named {id} in the system while {action}"))]
    NoSuchParticle { id: NaifId, action: &'static str },
    #[snafu(display("epoch outside the validity window of {what}"))]
    OutsideWindow { what: &'static str },
}

pub type PhysicsResult<T> = Result<T, PhysicsError>;

impl From<MathError> for PhysicsError {
    fn from(source: MathError) -> Self {
        Self::AppliedMath { source }
    }
}
