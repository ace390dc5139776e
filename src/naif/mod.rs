/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! The precomputed-kernel contract.
//!
//! HELION does not parse binary ephemeris files. It consumes any reader that
//! implements [EphemerisKernel]: a set of segments addressed by NAIF target
//! and observer ids, answering state queries in the J2000 *equatorial* frame
//! in kilometers and kilometers per day. The bundled [ChebyshevKernel] is the
//! in-memory form such a reader produces after decoding its records; parsing
//! a file into it is the reader's business, and readers are expected to open
//! their file lazily and stay pure with respect to (body, instant) afterward.

pub mod chebyshev;

pub use chebyshev::{ChebyshevKernel, ChebyshevRecord, ChebyshevSegment};

use snafu::Snafu;

use crate::constants::{J2000_JD, SECONDS_PER_DAY};
use crate::math::interpolation::InterpolationError;
use crate::math::Vector3;
use crate::NaifId;

/// One kernel segment: a contiguous span of data for one target/observer
/// pair. Epochs are UTC Julian dates, the record type follows the NAIF data
/// type numbering (2 = position Chebyshev).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SegmentSummary {
    pub target_id: NaifId,
    pub observer_id: NaifId,
    pub jd_start: f64,
    pub jd_end: f64,
    pub record_type: u32,
}

impl SegmentSummary {
    pub fn start_seconds_past_j2000(&self) -> f64 {
        (self.jd_start - J2000_JD) * SECONDS_PER_DAY
    }

    pub fn end_seconds_past_j2000(&self) -> f64 {
        (self.jd_end - J2000_JD) * SECONDS_PER_DAY
    }

    pub fn covers(&self, seconds_past_j2000: f64) -> bool {
        seconds_past_j2000 >= self.start_seconds_past_j2000()
            && seconds_past_j2000 <= self.end_seconds_past_j2000()
    }
}

#[derive(Debug, Snafu, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum KernelError {
    #[snafu(display("no segment for target {target_id} about observer {observer_id}"))]
    NoSegment {
        target_id: NaifId,
        observer_id: NaifId,
    },
    #[snafu(display(
        "target {target_id} about {observer_id} not covered at {seconds_past_j2000} s past J2000"
    ))]
    NoKernelCoverage {
        target_id: NaifId,
        observer_id: NaifId,
        seconds_past_j2000: f64,
    },
    #[snafu(display("kernel data malformed: {what}"))]
    Malformed { what: &'static str },
    #[snafu(display("interpolating a kernel record failed: {source}"))]
    KernelInterpolation { source: InterpolationError },
}

/// A precomputed ephemeris reader.
///
/// `state_at` answers in kilometers and kilometers per day, in the J2000
/// equatorial frame, target relative to observer, and must be pure with
/// respect to its arguments once the kernel is open.
pub trait EphemerisKernel {
    fn segments(&self) -> &[SegmentSummary];

    fn state_at(
        &self,
        seconds_past_j2000: f64,
        target_id: NaifId,
        observer_id: NaifId,
    ) -> Result<(Vector3, Vector3), KernelError>;
}
