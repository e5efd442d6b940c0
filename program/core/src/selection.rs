//! Active Day Selection
//!
//! The active-day index is the only mutable selection state of the program.
//! It starts at the index of today's date (or 0) once the schedule arrives
//! and afterwards only changes when the user picks a tab.

use crate::schedule::DaySchedule;

/// Index of the day whose date equals `today`, or 0 when there is none
///
/// With an empty day list this is still 0; callers must treat it as "no
/// active day" rather than index into the list.
pub fn initial_index(days: &[DaySchedule], today: &str) -> usize {
    days.iter().position(|d| d.date() == today).unwrap_or(0)
}

/// Holds the active-day index for a fixed number of days
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DayIndexSelector {
    active: usize,
    len: usize,
}

impl DayIndexSelector {
    /// Selector over `len` days starting at `initial`
    pub fn new(len: usize, initial: usize) -> Self {
        Self {
            active: initial,
            len,
        }
    }

    /// Current index, which may be out of range when there are no days
    pub fn active(&self) -> usize {
        self.active
    }

    /// Number of selectable days
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether there are no selectable days
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Current index if it refers to a day
    pub fn active_in_range(&self) -> Option<usize> {
        (self.active < self.len).then_some(self.active)
    }

    /// Select day `index`; returns whether it was accepted
    ///
    /// Selecting the already active day is a no-op that still succeeds.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.len {
            self.active = index;
            true
        } else {
            false
        }
    }

    /// Move to the next day, stopping at the last one
    pub fn next(&mut self) -> bool {
        self.select(self.active.saturating_add(1))
    }

    /// Move to the previous day, stopping at the first one
    pub fn previous(&mut self) -> bool {
        match self.active.checked_sub(1) {
            Some(i) => self.select(i),
            None => false,
        }
    }
}
