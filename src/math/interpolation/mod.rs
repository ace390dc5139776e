/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

mod chebyshev;

pub use chebyshev::chebyshev_eval;

use snafu::Snafu;

use crate::errors::MathError;

#[derive(Debug, Snafu, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum InterpolationError {
    #[snafu(display("math error during interpolation: {source}"))]
    InterpMath { source: MathError },
    #[snafu(display("interpolation record truncated: need {need} coefficients, found {got}"))]
    TruncatedRecord { need: usize, got: usize },
}
