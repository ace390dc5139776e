#![doc = include_str!("../README.md")]
/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

extern crate hifitime;
extern crate log;

pub mod astro;
pub mod bodies;
pub mod constants;
pub mod dynamics;
pub mod ephemerides;
pub mod errors;
pub mod math;
pub mod naif;
pub mod propagation;
pub mod time;

/// Re-export of hifitime
pub mod epochs {
    pub use core::str::FromStr;
    pub use hifitime::*;
}

pub mod prelude {
    pub use crate::astro::kepler::KeplerSolver;
    pub use crate::astro::elements::OrbitalElements;
    pub use crate::bodies::Registry;
    pub use crate::dynamics::events::EventSchedule;
    pub use crate::dynamics::StateVector;
    pub use crate::ephemerides::system::SolarSystemEphemeris;
    pub use crate::ephemerides::EphemerisSource;
    pub use crate::epochs::*;
    pub use crate::math::Vector3;
    pub use crate::naif::EphemerisKernel;
    pub use crate::propagation::SolarSystem;
    pub use crate::NaifId;
}

/// Identifies ephemeris targets and observers following the NAIF numbering scheme.
/// Spacecraft registered at runtime receive negative ids.
pub type NaifId = i32;
