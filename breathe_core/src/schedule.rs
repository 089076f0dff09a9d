// Copyright 2026 the Breathe Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cycle schedules and phase resolution.
//!
//! A [`CycleSchedule`] describes one loop of the instructional video as a list
//! of named [`PhaseInterval`]s. Resolving a playback position folds it into the
//! cycle and returns the text of the first interval that contains it.
//!
//! Intervals are half-open (`start` inclusive, `end` exclusive), so an instant
//! exactly on a boundary belongs to the *next* phase. Gaps between intervals
//! resolve to no phase.
//!
//! Schedules are validated once, in [`CycleSchedule::new`]. Resolution never
//! fails.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// One named phase within a cycle, in seconds from the start of the cycle.
#[derive(Clone, Debug, PartialEq)]
pub struct PhaseInterval {
    /// Identifier, e.g. `"HOLD_INHALE"`. Not shown to the user.
    pub name: String,
    /// Inclusive start, in seconds.
    pub start: f64,
    /// Exclusive end, in seconds.
    pub end: f64,
    /// Instruction text displayed while this phase is active.
    pub text: String,
}

impl PhaseInterval {
    /// Creates a phase interval.
    #[must_use]
    pub fn new(name: impl Into<String>, start: f64, end: f64, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            start,
            end,
            text: text.into(),
        }
    }

    /// Returns `true` if `time_in_cycle` lies in `[start, end)`.
    #[inline]
    #[must_use]
    pub fn contains(&self, time_in_cycle: f64) -> bool {
        time_in_cycle >= self.start && time_in_cycle < self.end
    }

    fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// One interval of a cycle, in a form that fits in a `const`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhaseEntry {
    /// Identifier, for diagnostics.
    pub name: &'static str,
    /// Inclusive start, in seconds.
    pub start: f64,
    /// Exclusive end, in seconds.
    pub end: f64,
    /// Instruction text displayed while this phase is active.
    pub text: &'static str,
}

impl From<&PhaseEntry> for PhaseInterval {
    fn from(entry: &PhaseEntry) -> Self {
        Self::new(entry.name, entry.start, entry.end, entry.text)
    }
}

/// Length of the [`BREATHING_BOX`] cycle, in seconds.
pub const BREATHING_BOX_CYCLE: f64 = 16.0;

/// The 4-3-7-2 inhale / hold / exhale / hold cycle the default instructional
/// video is cut to.
pub const BREATHING_BOX: [PhaseEntry; 4] = [
    PhaseEntry {
        name: "INHALE",
        start: 0.0,
        end: 4.0,
        text: "Inhale...",
    },
    PhaseEntry {
        name: "HOLD_INHALE",
        start: 4.0,
        end: 7.0,
        text: "Hold",
    },
    PhaseEntry {
        name: "EXHALE",
        start: 7.0,
        end: 14.0,
        text: "Exhale...",
    },
    PhaseEntry {
        name: "HOLD_EXHALE",
        start: 14.0,
        end: 16.0,
        text: "Hold",
    },
];

/// Reasons a schedule is rejected by [`CycleSchedule::new`].
#[derive(Clone, Debug, PartialEq)]
pub enum ScheduleError {
    /// No intervals were supplied.
    Empty,
    /// The cycle duration is not a finite positive number.
    InvalidCycleDuration(f64),
    /// An interval has `start >= end` or a non-finite bound.
    EmptyInterval {
        /// Name of the offending interval.
        name: String,
    },
    /// An interval reaches outside `[0, cycle_duration]`.
    OutOfRange {
        /// Name of the offending interval.
        name: String,
        /// The cycle duration it was checked against.
        cycle_duration: f64,
    },
    /// Two intervals share some instant.
    Overlap {
        /// Name of the earlier-declared interval.
        first: String,
        /// Name of the later-declared interval.
        second: String,
    },
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "cycle schedule has no phases"),
            Self::InvalidCycleDuration(d) => {
                write!(f, "cycle duration must be finite and positive, got {d}")
            }
            Self::EmptyInterval { name } => {
                write!(f, "phase {name} must have finite bounds with start < end")
            }
            Self::OutOfRange {
                name,
                cycle_duration,
            } => write!(f, "phase {name} lies outside the {cycle_duration}s cycle"),
            Self::Overlap { first, second } => {
                write!(f, "phases {first} and {second} overlap")
            }
        }
    }
}

impl core::error::Error for ScheduleError {}

/// A validated, immutable cycle schedule.
///
/// Construct with [`new`](Self::new) or [`breathing_box`](Self::breathing_box).
#[derive(Clone, Debug, PartialEq)]
pub struct CycleSchedule {
    intervals: Vec<PhaseInterval>,
    cycle_duration: f64,
}

impl CycleSchedule {
    /// Validates and builds a schedule.
    ///
    /// Intervals are stored in start order. Validation rules out overlaps, so
    /// the order never changes what a position resolves to.
    ///
    /// # Errors
    ///
    /// Returns a [`ScheduleError`] if the cycle duration is not finite and
    /// positive, if there are no intervals, or if any interval is empty,
    /// extends outside `[0, cycle_duration]`, or overlaps another.
    pub fn new(
        mut intervals: Vec<PhaseInterval>,
        cycle_duration: f64,
    ) -> Result<Self, ScheduleError> {
        if !cycle_duration.is_finite() || cycle_duration <= 0.0 {
            return Err(ScheduleError::InvalidCycleDuration(cycle_duration));
        }
        if intervals.is_empty() {
            return Err(ScheduleError::Empty);
        }

        for interval in &intervals {
            if !interval.start.is_finite()
                || !interval.end.is_finite()
                || interval.start >= interval.end
            {
                return Err(ScheduleError::EmptyInterval {
                    name: interval.name.clone(),
                });
            }
            if interval.start < 0.0 || interval.end > cycle_duration {
                return Err(ScheduleError::OutOfRange {
                    name: interval.name.clone(),
                    cycle_duration,
                });
            }
        }

        // Pairwise, before sorting, so errors name intervals in declared order.
        for (i, a) in intervals.iter().enumerate() {
            if let Some(b) = intervals[i + 1..].iter().find(|b| a.overlaps(b)) {
                return Err(ScheduleError::Overlap {
                    first: a.name.clone(),
                    second: b.name.clone(),
                });
            }
        }

        intervals.sort_by(|a, b| a.start.total_cmp(&b.start));
        Ok(Self {
            intervals,
            cycle_duration,
        })
    }

    /// Validates and builds a schedule from a `const` table.
    ///
    /// # Errors
    ///
    /// As for [`new`](Self::new).
    pub fn from_entries(
        entries: &[PhaseEntry],
        cycle_duration: f64,
    ) -> Result<Self, ScheduleError> {
        Self::new(entries.iter().map(PhaseInterval::from).collect(), cycle_duration)
    }

    /// The [`BREATHING_BOX`] cycle.
    #[must_use]
    pub fn breathing_box() -> Self {
        // The table is in start order and passes validation.
        Self {
            intervals: BREATHING_BOX.iter().map(PhaseInterval::from).collect(),
            cycle_duration: BREATHING_BOX_CYCLE,
        }
    }

    /// Returns the cycle length in seconds.
    #[inline]
    #[must_use]
    pub fn cycle_duration(&self) -> f64 {
        self.cycle_duration
    }

    /// Returns the intervals in start order.
    #[inline]
    #[must_use]
    pub fn intervals(&self) -> &[PhaseInterval] {
        &self.intervals
    }

    /// Returns the interval that starts earliest in the cycle.
    #[inline]
    #[must_use]
    pub fn first(&self) -> &PhaseInterval {
        // Non-empty by construction.
        &self.intervals[0]
    }

    /// Folds a playback position into `[0, cycle_duration)`.
    ///
    /// Returns `None` for non-finite positions.
    #[must_use]
    pub fn time_in_cycle(&self, current_time: f64) -> Option<f64> {
        if !current_time.is_finite() {
            return None;
        }
        let mut t = current_time % self.cycle_duration;
        if t < 0.0 {
            t += self.cycle_duration;
        }
        // A tiny negative remainder can round up to exactly the cycle length.
        if t >= self.cycle_duration {
            t = 0.0;
        }
        Some(t)
    }

    /// Returns the interval active at `current_time`, if any.
    #[must_use]
    pub fn phase_at(&self, current_time: f64) -> Option<&PhaseInterval> {
        let t = self.time_in_cycle(current_time)?;
        self.intervals.iter().find(|interval| interval.contains(t))
    }

    /// Returns the instruction text active at `current_time`, or `None` when
    /// the position falls in a gap.
    ///
    /// Pure: the same input always produces the same output, and positions
    /// one cycle apart resolve identically.
    #[inline]
    #[must_use]
    pub fn resolve(&self, current_time: f64) -> Option<&str> {
        self.phase_at(current_time).map(|p| p.text.as_str())
    }
}

/// Resolves `current_time` against `schedule`. Equivalent to
/// [`CycleSchedule::resolve`].
#[inline]
#[must_use]
pub fn resolve_phase(current_time: f64, schedule: &CycleSchedule) -> Option<&str> {
    schedule.resolve(current_time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn box_schedule_boundaries() {
        let s = CycleSchedule::breathing_box();
        assert_eq!(s.resolve(3.9), Some("Inhale..."));
        assert_eq!(s.resolve(4.0), Some("Hold"));
        assert_eq!(s.resolve(6.999), Some("Hold"));
        assert_eq!(s.resolve(7.0), Some("Exhale..."));
        assert_eq!(s.resolve(15.999), Some("Hold"));
        assert_eq!(s.resolve(16.0), Some("Inhale..."));
        assert_eq!(s.resolve(16.0), s.resolve(0.0));
    }

    #[test]
    fn end_is_exclusive() {
        let s = CycleSchedule::breathing_box();
        for interval in s.intervals() {
            let before = interval.end - 1.0 / 1024.0;
            assert_eq!(
                s.phase_at(before).map(|p| p.name.as_str()),
                Some(interval.name.as_str()),
                "just before end of {}",
                interval.name
            );
            assert_ne!(
                s.phase_at(interval.end).map(|p| p.name.as_str()),
                Some(interval.name.as_str()),
                "exact end of {}",
                interval.name
            );
        }
    }

    #[test]
    fn resolution_is_periodic() {
        let s = CycleSchedule::breathing_box();
        // Dyadic fractions keep `t + k * 16` exact.
        for &t in &[0.0, 0.5, 3.75, 4.0, 6.25, 9.125, 14.0, 15.5] {
            for k in -3_i32..=200 {
                let shifted = t + f64::from(k) * s.cycle_duration();
                assert_eq!(s.resolve(t), s.resolve(shifted), "t={t} k={k}");
            }
        }
    }

    #[test]
    fn gaps_resolve_to_none() {
        let s = CycleSchedule::new(
            vec![
                PhaseInterval::new("IN", 0.0, 2.0, "In"),
                PhaseInterval::new("OUT", 3.0, 5.0, "Out"),
            ],
            6.0,
        )
        .unwrap();
        assert_eq!(s.resolve(2.5), None);
        assert_eq!(s.resolve(5.0), None);
        assert_eq!(s.resolve(5.9), None);
        assert_eq!(s.resolve(6.0), Some("In"));
    }

    #[test]
    fn non_finite_time_has_no_phase() {
        let s = CycleSchedule::breathing_box();
        assert_eq!(s.resolve(f64::NAN), None);
        assert_eq!(s.resolve(f64::INFINITY), None);
    }

    #[test]
    fn negative_time_folds_forward() {
        let s = CycleSchedule::breathing_box();
        // -1s is 15s into the previous cycle.
        assert_eq!(s.time_in_cycle(-1.0), Some(15.0));
        assert_eq!(s.resolve(-1.0), Some("Hold"));
    }

    #[test]
    fn resolve_phase_matches_method() {
        let s = CycleSchedule::breathing_box();
        assert_eq!(resolve_phase(8.0, &s), s.resolve(8.0));
    }

    #[test]
    fn rejects_invalid_cycle_duration() {
        let intervals = vec![PhaseInterval::new("A", 0.0, 1.0, "a")];
        assert_eq!(
            CycleSchedule::new(intervals.clone(), 0.0),
            Err(ScheduleError::InvalidCycleDuration(0.0))
        );
        assert!(matches!(
            CycleSchedule::new(intervals, f64::NAN),
            Err(ScheduleError::InvalidCycleDuration(_))
        ));
    }

    #[test]
    fn rejects_empty_schedule() {
        assert_eq!(CycleSchedule::new(vec![], 10.0), Err(ScheduleError::Empty));
    }

    #[test]
    fn rejects_empty_interval() {
        let err = CycleSchedule::new(vec![PhaseInterval::new("A", 2.0, 2.0, "a")], 10.0);
        assert_eq!(
            err,
            Err(ScheduleError::EmptyInterval {
                name: String::from("A")
            })
        );
    }

    #[test]
    fn rejects_out_of_range() {
        let err = CycleSchedule::new(vec![PhaseInterval::new("A", 8.0, 12.0, "a")], 10.0);
        assert!(matches!(err, Err(ScheduleError::OutOfRange { .. })));
        let err = CycleSchedule::new(vec![PhaseInterval::new("A", -1.0, 2.0, "a")], 10.0);
        assert!(matches!(err, Err(ScheduleError::OutOfRange { .. })));
    }

    #[test]
    fn interval_may_end_at_cycle_end() {
        let s = CycleSchedule::new(vec![PhaseInterval::new("A", 5.0, 10.0, "a")], 10.0).unwrap();
        assert_eq!(s.resolve(9.99), Some("a"));
        assert_eq!(s.resolve(10.0), None);
    }

    #[test]
    fn rejects_overlap() {
        let err = CycleSchedule::new(
            vec![
                PhaseInterval::new("A", 0.0, 4.0, "a"),
                PhaseInterval::new("B", 6.0, 8.0, "b"),
                PhaseInterval::new("C", 3.0, 5.0, "c"),
            ],
            10.0,
        );
        assert_eq!(
            err,
            Err(ScheduleError::Overlap {
                first: String::from("A"),
                second: String::from("C"),
            })
        );
    }

    #[test]
    fn touching_intervals_do_not_overlap() {
        let s = CycleSchedule::new(
            vec![
                PhaseInterval::new("A", 0.0, 4.0, "a"),
                PhaseInterval::new("B", 4.0, 8.0, "b"),
            ],
            8.0,
        );
        assert!(s.is_ok(), "half-open intervals may share an endpoint");
    }

    #[test]
    fn breathing_box_table_validates() {
        assert_eq!(
            CycleSchedule::from_entries(&BREATHING_BOX, BREATHING_BOX_CYCLE),
            Ok(CycleSchedule::breathing_box())
        );
    }

    #[test]
    fn first_is_earliest_not_first_declared() {
        let s = CycleSchedule::new(
            vec![
                PhaseInterval::new("OUT", 5.0, 10.0, "Out"),
                PhaseInterval::new("IN", 0.0, 5.0, "In"),
            ],
            10.0,
        )
        .unwrap();
        assert_eq!(s.first().name, "IN");
        let names: Vec<_> = s.intervals().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["IN", "OUT"]);
        assert_eq!(s.resolve(7.0), Some("Out"));
        assert_eq!(s.resolve(1.0), Some("In"));
    }

    #[test]
    fn error_messages_name_the_phase() {
        use alloc::string::ToString as _;

        let msg = ScheduleError::Overlap {
            first: String::from("EXHALE"),
            second: String::from("HOLD"),
        }
        .to_string();
        assert_eq!(msg, "phases EXHALE and HOLD overlap");
    }
}
