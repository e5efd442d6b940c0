//! Program View
//!
//! Orchestrates the schedule lifecycle for one mount of the program page:
//!
//! ```text
//! Loading ──fetch ok──▶ Ready ──tab──▶ Ready
//!    │
//!    └──fetch error──▶ Error
//! ```
//!
//! `Ready` and `Error` are terminal for a mount; a new mount (fresh
//! [`ProgramView`]) is the only way to refetch.

use crate::day_maps::{DayTitleMap, NoEventsMap};
use crate::error::FetchError;
use crate::layout::{DayContext, DayRenderer, LayoutKind};
use crate::messages::MountId;
use crate::schedule::{DaySchedule, ScheduleDocument};
use crate::selection::{initial_index, DayIndexSelector};

/// Message shown in place of the program when the schedule fetch fails
pub const SCHEDULE_ERROR_MESSAGE: &str = "Error fetching program, please try again later.";

/// Lifecycle phase of the program view
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ProgramPhase {
    /// Schedule fetch outstanding
    Loading,
    /// Schedule available (possibly with zero days)
    Ready,
    /// Schedule fetch failed; carries the user-visible message
    Error(String),
}

/// One entry of the day tab bar
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayTab<'a> {
    /// Position in the day list
    pub index: usize,
    /// Day date
    pub date: &'a str,
    /// Label from the day-title map; `None` renders blank
    pub label: Option<&'a str>,
    /// Whether this is the active day
    pub active: bool,
}

/// Schedule state for one program mount
#[derive(Debug)]
pub struct ProgramView {
    mount: MountId,
    phase: ProgramPhase,
    conference_title: Option<String>,
    time_zone: Option<String>,
    days: Vec<DaySchedule>,
    selector: DayIndexSelector,
    titles: DayTitleMap,
    no_events: NoEventsMap,
}

impl ProgramView {
    /// A freshly mounted view in the `Loading` phase
    pub fn new(titles: DayTitleMap, no_events: NoEventsMap) -> Self {
        Self {
            mount: MountId::next(),
            phase: ProgramPhase::Loading,
            conference_title: None,
            time_zone: None,
            days: Vec::new(),
            selector: DayIndexSelector::default(),
            titles,
            no_events,
        }
    }

    /// Id of this mount; fetch results must carry it
    pub fn mount(&self) -> MountId {
        self.mount
    }

    /// Current phase
    pub fn phase(&self) -> &ProgramPhase {
        &self.phase
    }

    /// Whether the schedule fetch is outstanding
    pub fn is_loading(&self) -> bool {
        self.phase == ProgramPhase::Loading
    }

    /// User-visible error, if the fetch failed
    pub fn error_message(&self) -> Option<&str> {
        match &self.phase {
            ProgramPhase::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Conference title from the schedule document
    pub fn conference_title(&self) -> Option<&str> {
        self.conference_title.as_deref()
    }

    /// Time zone the schedule's times are given in
    pub fn time_zone(&self) -> Option<&str> {
        self.time_zone.as_deref()
    }

    /// Fetched days, in document order
    pub fn days(&self) -> &[DaySchedule] {
        &self.days
    }

    /// Day-title map in use
    pub fn titles(&self) -> &DayTitleMap {
        &self.titles
    }

    /// Apply the schedule fetch result
    ///
    /// Only the first result for this mount is applied; anything for another
    /// mount, or arriving after the view left `Loading`, is discarded.
    /// Returns whether the result was applied.
    pub fn apply_schedule(
        &mut self,
        mount: MountId,
        result: Result<ScheduleDocument, FetchError>,
        today: &str,
    ) -> bool {
        if mount != self.mount {
            tracing::debug!(?mount, current = ?self.mount, "discarding schedule for stale mount");
            return false;
        }
        if !self.is_loading() {
            tracing::debug!(phase = ?self.phase, "discarding duplicate schedule result");
            return false;
        }

        match result {
            Ok(doc) => {
                let initial = initial_index(&doc.days, today);
                self.selector = DayIndexSelector::new(doc.days.len(), initial);
                self.conference_title = doc.title;
                self.time_zone = doc.time_zone;
                self.days = doc.days;
                self.phase = ProgramPhase::Ready;
                self.warn_unmapped_dates();
                tracing::debug!(days = self.days.len(), initial, today, "program ready");
            }
            Err(e) => {
                tracing::error!("Error fetching data: {}", e);
                self.phase = ProgramPhase::Error(SCHEDULE_ERROR_MESSAGE.to_string());
            }
        }
        true
    }

    fn warn_unmapped_dates(&self) {
        for date in self.titles.missing(&self.days) {
            tracing::warn!(date, "no day title configured; tab label will be blank");
        }
        for date in self.no_events.missing(&self.days) {
            tracing::warn!(date, "no empty-day text configured");
        }
    }

    /// Active index (may be out of range when there are no days)
    pub fn active_index(&self) -> usize {
        self.selector.active()
    }

    /// Activate day `index`; ignored unless the view is ready and `index` is valid
    pub fn select_day(&mut self, index: usize) -> bool {
        self.phase == ProgramPhase::Ready && self.selector.select(index)
    }

    /// Activate the next day
    pub fn next_day(&mut self) -> bool {
        self.phase == ProgramPhase::Ready && self.selector.next()
    }

    /// Activate the previous day
    pub fn previous_day(&mut self) -> bool {
        self.phase == ProgramPhase::Ready && self.selector.previous()
    }

    /// Tab bar entries; empty unless the view is ready
    pub fn tabs(&self) -> Vec<DayTab<'_>> {
        if self.phase != ProgramPhase::Ready {
            return Vec::new();
        }
        let active = self.selector.active();
        self.days
            .iter()
            .enumerate()
            .map(|(index, day)| DayTab {
                index,
                date: day.date(),
                label: self.titles.get(day.date()),
                active: index == active,
            })
            .collect()
    }

    /// The active day, if the index refers to one
    pub fn active_day(&self) -> Option<&DaySchedule> {
        self.selector
            .active_in_range()
            .and_then(|i| self.days.get(i))
    }

    /// Map-derived context for the active day
    pub fn active_context(&self) -> Option<DayContext<'_>> {
        self.active_day().map(|day| DayContext {
            date: day.date(),
            title: self.titles.get(day.date()),
            no_events: self.no_events.get(day.date()),
        })
    }

    /// Hand the active day to the renderer matching `layout`
    ///
    /// Returns whether a renderer ran; with no active day nothing is drawn.
    pub fn render_active<F, C>(
        &self,
        layout: LayoutKind,
        full: &F,
        compact: &C,
        surface: &mut F::Surface,
    ) -> bool
    where
        F: DayRenderer,
        C: DayRenderer<Surface = F::Surface>,
    {
        let (Some(day), Some(ctx)) = (self.active_day(), self.active_context()) else {
            return false;
        };
        match layout {
            LayoutKind::Full => full.render_day(day, &ctx, surface),
            LayoutKind::Compact => compact.render_day(day, &ctx, surface),
        }
        true
    }
}
