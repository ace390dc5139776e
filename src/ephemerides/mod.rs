/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use hifitime::Epoch;
use snafu::prelude::*;

use crate::errors::PhysicsError;
use crate::math::cartesian::StateVector;
use crate::math::Vector3;
use crate::naif::KernelError;
use crate::NaifId;

pub mod keplerian;
pub mod kernel;
pub mod lunar;
pub mod system;

#[derive(Debug, Snafu, PartialEq)]
#[snafu(visibility(pub(crate)))]
#[non_exhaustive]
pub enum EphemerisError {
    #[snafu(display("no body with NAIF id {id} is known to this provider"))]
    UnknownBody { id: NaifId },
    #[snafu(display("no body named `{name}` is known here (names are case-sensitive)"))]
    UnknownBodyName { name: String },
    #[snafu(display("{id} not covered at {epoch}: provider valid from {start} to {end}"))]
    NoCoverage {
        id: NaifId,
        epoch: Epoch,
        start: Epoch,
        end: Epoch,
    },
    #[snafu(display("{action} is not supported by this provider"))]
    Unsupported { action: &'static str },
    #[snafu(display("kernel access while {action} failed: {source}"))]
    Kernel {
        action: &'static str,
        source: KernelError,
    },
    #[snafu(display("{action} failed: {source}"))]
    EphemerisPhysics {
        action: &'static str,
        source: PhysicsError,
    },
}

/// A position/velocity provider over some validity window.
///
/// Every implementation answers in the heliocentric J2000 ecliptic frame, in
/// SI units; planetocentric data is translated before it leaves a source.
pub trait EphemerisSource {
    /// Earliest instant this source can answer for.
    fn first_valid_epoch(&self) -> Epoch;

    /// Latest instant this source can answer for.
    fn last_valid_epoch(&self) -> Epoch;

    /// The bodies this source covers.
    fn bodies(&self) -> Vec<NaifId>;

    /// Heliocentric ecliptic state of the body at the provided epoch.
    fn try_state(&self, id: NaifId, epoch: Epoch) -> Result<StateVector, EphemerisError>;

    fn try_position_m(&self, id: NaifId, epoch: Epoch) -> Result<Vector3, EphemerisError> {
        self.try_state(id, epoch).map(|s| s.position_m)
    }

    fn try_velocity_m_s(&self, id: NaifId, epoch: Epoch) -> Result<Vector3, EphemerisError> {
        self.try_state(id, epoch).map(|s| s.velocity_m_s)
    }

    /// Barycentric variant for providers that model one; everything else
    /// reports `Unsupported` so that callers may fall back to another source.
    fn try_state_barycentric(
        &self,
        _id: NaifId,
        _epoch: Epoch,
    ) -> Result<StateVector, EphemerisError> {
        Err(EphemerisError::Unsupported {
            action: "barycentric state query",
        })
    }

    /// Whether this source covers the pair (body, instant).
    fn covers(&self, id: NaifId, epoch: Epoch) -> bool {
        epoch >= self.first_valid_epoch()
            && epoch <= self.last_valid_epoch()
            && self.bodies().contains(&id)
    }
}
