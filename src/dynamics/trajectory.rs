/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The spacecraft trajectory collaborator: a pure function of time with a
//! validity window, evaluated when a spacecraft is registered or re-seeded.

use hifitime::Epoch;
use indexmap::IndexMap;

use crate::astro::elements::OrbitalElements;
use crate::astro::kepler::KeplerSolver;
use crate::errors::{PhysicsError, PhysicsResult};
use crate::math::cartesian::StateVector;
use crate::time::seconds_past_j2000;

/// A heliocentric state as a pure function of time over a validity window.
pub trait Trajectory {
    fn first_valid_epoch(&self) -> Epoch;

    fn last_valid_epoch(&self) -> Epoch;

    fn state_at(&self, epoch: Epoch) -> PhysicsResult<StateVector>;

    fn covers(&self, epoch: Epoch) -> bool {
        epoch >= self.first_valid_epoch() && epoch <= self.last_valid_epoch()
    }
}

/// A two-body trajectory from fixed osculating elements about a center of
/// the provided gravitational parameter. The simplest useful trajectory;
/// real mission arcs implement [Trajectory] on their own tables.
#[derive(Clone, Debug)]
pub struct KeplerianTrajectory {
    pub elements: OrbitalElements,
    pub gm_km3_s2: f64,
    pub epoch_of_elements: Epoch,
    pub first_valid: Epoch,
    pub last_valid: Epoch,
}

impl Trajectory for KeplerianTrajectory {
    fn first_valid_epoch(&self) -> Epoch {
        self.first_valid
    }

    fn last_valid_epoch(&self) -> Epoch {
        self.last_valid
    }

    fn state_at(&self, epoch: Epoch) -> PhysicsResult<StateVector> {
        if !self.covers(epoch) {
            return Err(PhysicsError::OutsideWindow {
                what: "spacecraft trajectory",
            });
        }
        let dt_s = seconds_past_j2000(epoch) - seconds_past_j2000(self.epoch_of_elements);
        self.elements
            .propagated_by(dt_s, self.gm_km3_s2)
            .to_state(self.gm_km3_s2, KeplerSolver::Newton)
    }
}

/// Factory registration point: trajectory constructors by name, so that new
/// spacecraft kinds plug in without touching the orchestrator.
#[derive(Default)]
pub struct TrajectoryRegistry {
    factories: IndexMap<String, Box<dyn Fn() -> Box<dyn Trajectory>>>,
}

impl TrajectoryRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_trajectory<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Trajectory> + 'static,
    {
        self.factories.insert(name.to_string(), Box::new(factory));
    }

    pub fn build(&self, name: &str) -> Option<Box<dyn Trajectory>> {
        self.factories.get(name).map(|factory| factory())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(|s| s.as_str())
    }
}
