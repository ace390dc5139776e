/*
 * HELION Toolkit
 * Copyright (C) 2024-onward The HELION contributors
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

//! Scheduled exogenous state injections ("spacecraft events"): at a known
//! instant, a named particle is re-seated onto a known state, exactly.

use hifitime::Epoch;
use snafu::Snafu;

use crate::math::cartesian::StateVector;
use crate::NaifId;

#[derive(Debug, Snafu, PartialEq)]
#[snafu(visibility(pub(crate)))]
pub enum ScheduleError {
    #[snafu(display("event #{index} at {epoch} breaks the time ordering"))]
    OutOfOrder { index: usize, epoch: Epoch },
}

/// One scheduled override: at `epoch`, `target` is re-seated onto `state`
/// (heliocentric, SI), bit-for-bit.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScheduledEvent {
    pub epoch: Epoch,
    pub target: NaifId,
    pub state: StateVector,
}

/// A time-ordered event list with a consumption cursor.
#[derive(Clone, Debug, Default)]
pub struct EventSchedule {
    events: Vec<ScheduledEvent>,
    cursor: usize,
}

impl EventSchedule {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a schedule, validating the non-decreasing epoch invariant.
    pub fn new(events: Vec<ScheduledEvent>) -> Result<Self, ScheduleError> {
        for (index, pair) in events.windows(2).enumerate() {
            if pair[1].epoch < pair[0].epoch {
                return Err(ScheduleError::OutOfOrder {
                    index: index + 1,
                    epoch: pair[1].epoch,
                });
            }
        }
        Ok(Self { events, cursor: 0 })
    }

    /// Appends an event; it must not precede the current tail.
    pub fn push(&mut self, event: ScheduledEvent) -> Result<(), ScheduleError> {
        if let Some(last) = self.events.last() {
            if event.epoch < last.epoch {
                return Err(ScheduleError::OutOfOrder {
                    index: self.events.len(),
                    epoch: event.epoch,
                });
            }
        }
        self.events.push(event);
        Ok(())
    }

    /// The event at the cursor, if it is due at or before `now`.
    pub fn next_due(&self, now: Epoch) -> Option<&ScheduledEvent> {
        self.events
            .get(self.cursor)
            .filter(|event| event.epoch <= now)
    }

    /// Consumes the event at the cursor.
    pub fn advance_cursor(&mut self) {
        if self.cursor < self.events.len() {
            self.cursor += 1;
        }
    }

    /// Drops every not-yet-consumed event aimed at `target`.
    pub fn prune(&mut self, target: NaifId) {
        let cursor = self.cursor;
        let mut index = 0;
        self.events.retain(|event| {
            let keep = index < cursor || event.target != target;
            index += 1;
            keep
        });
        // Consumed events are all retained, so the cursor still points at
        // the first pending one.
        self.cursor = self.cursor.min(self.events.len());
    }

    /// Events not yet consumed.
    pub fn remaining(&self) -> usize {
        self.events.len() - self.cursor
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
