/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use core::fmt;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use crate::math::Vector3;

/// A Cartesian position and velocity pair in SI units (meters, meters per
/// second). The frame is contextual: heliocentric J2000 ecliptic everywhere,
/// except inside a planet subsystem where states are planetocentric.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct StateVector {
    pub position_m: Vector3,
    pub velocity_m_s: Vector3,
}

impl StateVector {
    pub fn new(position_m: Vector3, velocity_m_s: Vector3) -> Self {
        Self {
            position_m,
            velocity_m_s,
        }
    }

    /// A state of zero position and velocity.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Euclidean distance between the positions of this state and the other, in meters.
    pub fn distance_to_m(&self, other: &Self) -> f64 {
        (self.position_m - other.position_m).norm()
    }

    /// True if and only if every component of position and velocity is finite.
    pub fn is_finite(&self) -> bool {
        self.position_m.iter().all(|c| c.is_finite())
            && self.velocity_m_s.iter().all(|c| c.is_finite())
    }
}

impl Add for StateVector {
    type Output = StateVector;

    fn add(self, other: Self) -> Self {
        Self {
            position_m: self.position_m + other.position_m,
            velocity_m_s: self.velocity_m_s + other.velocity_m_s,
        }
    }
}

impl AddAssign for StateVector {
    fn add_assign(&mut self, other: Self) {
        *self = *self + other;
    }
}

impl Sub for StateVector {
    type Output = StateVector;

    fn sub(self, other: Self) -> Self {
        Self {
            position_m: self.position_m - other.position_m,
            velocity_m_s: self.velocity_m_s - other.velocity_m_s,
        }
    }
}

impl SubAssign for StateVector {
    fn sub_assign(&mut self, other: Self) {
        *self = *self - other;
    }
}

impl Neg for StateVector {
    type Output = StateVector;

    fn neg(self) -> Self {
        Self {
            position_m: -self.position_m,
            velocity_m_s: -self.velocity_m_s,
        }
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "[{:.3} {:.3} {:.3}] m [{:.6} {:.6} {:.6}] m/s",
            self.position_m.x,
            self.position_m.y,
            self.position_m.z,
            self.velocity_m_s.x,
            self.velocity_m_s.y,
            self.velocity_m_s.z
        )
    }
}

#[cfg(test)]
mod cartesian_ut {
    use super::*;

    #[test]
    fn algebra() {
        let a = StateVector::new(Vector3::new(1.0, 2.0, 3.0), Vector3::new(-1.0, 0.0, 1.0));
        let b = StateVector::new(Vector3::new(4.0, 4.0, 3.0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!((a + b) - b, a);
        assert_eq!(-(-a), a);
        assert_eq!(a.distance_to_m(&b), (9.0_f64 + 4.0).sqrt());
    }

    #[test]
    fn finiteness_detection() {
        let mut s = StateVector::zero();
        assert!(s.is_finite());
        s.velocity_m_s.y = f64::NAN;
        assert!(!s.is_finite());
        s.velocity_m_s.y = f64::INFINITY;
        assert!(!s.is_finite());
    }
}
