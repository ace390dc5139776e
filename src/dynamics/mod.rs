/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The gravitating particle systems and their integrators.

pub mod events;
pub mod particle;
pub mod subsystem;
pub mod system;
pub mod trajectory;

pub use crate::math::cartesian::StateVector;
pub use particle::Particle;
pub use subsystem::{Oblateness, PlanetSubsystem};
pub use system::ParticleSystem;
