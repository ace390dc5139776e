/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! In-memory Chebyshev ephemeris segments, the decoded form of NAIF
//! position-polynomial records (data type 2): per-axis coefficients over
//! fixed-length intervals, with velocity taken from the polynomial
//! derivative.

use crate::math::interpolation::chebyshev_eval;
use crate::math::Vector3;
use crate::naif::{EphemerisKernel, KernelError, SegmentSummary};
use crate::NaifId;

use super::MalformedSnafu;
use crate::constants::SECONDS_PER_DAY;
use snafu::ensure;

/// Coefficients of one interpolation record, one Chebyshev series per axis,
/// in kilometers over the record's normalized time.
#[derive(Clone, Debug, PartialEq)]
pub struct ChebyshevRecord {
    pub x_km: Vec<f64>,
    pub y_km: Vec<f64>,
    pub z_km: Vec<f64>,
}

/// One decoded segment: equal-length records spanning `[jd_start, jd_end]`
/// contiguously.
#[derive(Clone, Debug)]
pub struct ChebyshevSegment {
    summary: SegmentSummary,
    interval_s: f64,
    records: Vec<ChebyshevRecord>,
}

impl ChebyshevSegment {
    pub fn new(
        summary: SegmentSummary,
        interval_s: f64,
        records: Vec<ChebyshevRecord>,
    ) -> Result<Self, KernelError> {
        ensure!(
            interval_s > 0.0,
            MalformedSnafu {
                what: "non-positive record interval",
            }
        );
        ensure!(
            !records.is_empty(),
            MalformedSnafu {
                what: "segment without records",
            }
        );
        let span_s = summary.end_seconds_past_j2000() - summary.start_seconds_past_j2000();
        // Records must tile the summary window exactly.
        ensure!(
            (records.len() as f64 * interval_s - span_s).abs() < 1e-3,
            MalformedSnafu {
                what: "record count does not tile the segment window",
            }
        );
        for record in &records {
            ensure!(
                !record.x_km.is_empty()
                    && record.x_km.len() == record.y_km.len()
                    && record.x_km.len() == record.z_km.len(),
                MalformedSnafu {
                    what: "per-axis coefficient counts differ",
                }
            );
        }
        Ok(Self {
            summary,
            interval_s,
            records,
        })
    }

    pub fn summary(&self) -> &SegmentSummary {
        &self.summary
    }

    /// Evaluates position (km) and velocity (km/day) at the provided instant.
    fn evaluate(&self, seconds_past_j2000: f64) -> Result<(Vector3, Vector3), KernelError> {
        ensure!(
            self.summary.covers(seconds_past_j2000),
            super::NoKernelCoverageSnafu {
                target_id: self.summary.target_id,
                observer_id: self.summary.observer_id,
                seconds_past_j2000,
            }
        );
        let offset_s = seconds_past_j2000 - self.summary.start_seconds_past_j2000();
        // The final instant of the window belongs to the last record.
        let index = ((offset_s / self.interval_s) as usize).min(self.records.len() - 1);
        let record = &self.records[index];

        let radius_s = self.interval_s / 2.0;
        let midpoint_s = (index as f64 + 0.5) * self.interval_s;
        let normalized = (offset_s - midpoint_s) / radius_s;

        let mut position_km = Vector3::zeros();
        let mut velocity_km_day = Vector3::zeros();
        for (axis, coeffs) in [&record.x_km, &record.y_km, &record.z_km].into_iter().enumerate() {
            let (value_km, rate_km_s) = chebyshev_eval(normalized, coeffs, radius_s)
                .map_err(|source| KernelError::KernelInterpolation { source })?;
            position_km[axis] = value_km;
            velocity_km_day[axis] = rate_km_s * SECONDS_PER_DAY;
        }
        Ok((position_km, velocity_km_day))
    }
}

/// A complete in-memory kernel: what a file reader hands over once its
/// records are decoded.
#[derive(Clone, Debug, Default)]
pub struct ChebyshevKernel {
    summaries: Vec<SegmentSummary>,
    segments: Vec<ChebyshevSegment>,
}

impl ChebyshevKernel {
    pub fn new(segments: Vec<ChebyshevSegment>) -> Self {
        let summaries = segments.iter().map(|s| s.summary).collect();
        Self {
            summaries,
            segments,
        }
    }
}

impl EphemerisKernel for ChebyshevKernel {
    fn segments(&self) -> &[SegmentSummary] {
        &self.summaries
    }

    fn state_at(
        &self,
        seconds_past_j2000: f64,
        target_id: NaifId,
        observer_id: NaifId,
    ) -> Result<(Vector3, Vector3), KernelError> {
        let mut found_pair = false;
        for segment in &self.segments {
            let summary = segment.summary();
            if summary.target_id != target_id || summary.observer_id != observer_id {
                continue;
            }
            found_pair = true;
            if summary.covers(seconds_past_j2000) {
                return segment.evaluate(seconds_past_j2000);
            }
        }
        if found_pair {
            Err(KernelError::NoKernelCoverage {
                target_id,
                observer_id,
                seconds_past_j2000,
            })
        } else {
            Err(KernelError::NoSegment {
                target_id,
                observer_id,
            })
        }
    }
}
