/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::bodies::BodyConstants;
use crate::constants::GRAVITATIONAL_CONSTANT;
use crate::math::cartesian::StateVector;
use crate::math::Vector3;
use crate::NaifId;

/// One integration history sample: the derivatives of the state at the end
/// of an accepted step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct MultistepSample {
    pub t_s: f64,
    pub velocity_m_s: Vector3,
    pub acceleration_m_s2: Vector3,
}

/// Cyclic buffer of the four most recent derivative samples, newest last,
/// as required by the four-step predictor-corrector.
#[derive(Clone, Debug, Default)]
pub struct MultistepRing {
    samples: [MultistepSample; 4],
    len: usize,
    head: usize,
}

impl MultistepRing {
    pub fn clear(&mut self) {
        self.len = 0;
        self.head = 0;
    }

    pub fn push(&mut self, sample: MultistepSample) {
        self.head = (self.head + 1) % 4;
        self.samples[self.head] = sample;
        if self.len < 4 {
            self.len += 1;
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_full(&self) -> bool {
        self.len == 4
    }

    /// Sample `age` steps back: 0 is the most recent.
    pub fn recent(&self, age: usize) -> &MultistepSample {
        debug_assert!(age < self.len);
        &self.samples[(self.head + 4 - age) % 4]
    }

    /// Moves the stored velocity samples into a frame shifted by
    /// `delta_m_s`. Accelerations are invariant under the constant-velocity
    /// frame changes of the drift correction, so they stay put.
    pub fn shift_velocities(&mut self, delta_m_s: crate::math::Vector3) {
        for sample in self.samples.iter_mut() {
            sample.velocity_m_s += delta_m_s;
        }
    }
}

/// A point mass of the particle system.
///
/// The gravitational parameter is authoritative; the stored mass is derived
/// from it (or zero). A particle with GM = 0 is massless: it feels gravity
/// but exerts none, and never appears in an acceleration summation.
#[derive(Clone, Debug)]
pub struct Particle {
    pub id: NaifId,
    pub mass_kg: f64,
    pub gm_m3_s2: f64,
    pub state: StateVector,
    pub(crate) ring: MultistepRing,
}

impl Particle {
    pub fn massive(id: NaifId, gm_m3_s2: f64, state: StateVector) -> Self {
        Self {
            id,
            mass_kg: gm_m3_s2 / GRAVITATIONAL_CONSTANT,
            gm_m3_s2,
            state,
            ring: MultistepRing::default(),
        }
    }

    pub fn massless(id: NaifId, state: StateVector) -> Self {
        Self {
            id,
            mass_kg: 0.0,
            gm_m3_s2: 0.0,
            state,
            ring: MultistepRing::default(),
        }
    }

    pub fn from_constants(body: &BodyConstants, state: StateVector) -> Self {
        Self::massive(body.id, body.gm_m3_s2(), state)
    }

    pub fn is_massive(&self) -> bool {
        self.gm_m3_s2 > 0.0
    }
}
