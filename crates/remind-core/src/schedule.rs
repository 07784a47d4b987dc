//! Occurrence planning: date arithmetic for an event's cadence and the
//! decisions about how many occurrence rows an event is missing or has in
//! excess. Nothing in here touches the store; the SQLite side lives in
//! [`crate::repository::occurrences`].

use chrono::{Days, Months, NaiveDate};

use crate::error::CoreError;
use crate::models::{Event, MAX_OCCURRENCE_COUNT};

/// The interval between two consecutive occurrences of an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cadence {
    pub day_offset: i64,
    pub month_offset: i64,
}

impl Cadence {
    pub fn new(day_offset: i64, month_offset: i64) -> Self {
        Self { day_offset, month_offset }
    }

    /// Returns the occurrence date following `date`.
    ///
    /// Months are added first, then days. A month step that lands past the
    /// end of the target month is clamped to its last day, so 31 January
    /// plus one month is the last day of February.
    pub fn advance(&self, date: NaiveDate) -> Result<NaiveDate, CoreError> {
        let overflow = || {
            CoreError::InvalidInput(format!(
                "Date out of range: {} plus {} month(s) and {} day(s)",
                date, self.month_offset, self.day_offset
            ))
        };

        let months = u32::try_from(self.month_offset.unsigned_abs()).map_err(|_| overflow())?;
        let shifted = if self.month_offset >= 0 {
            date.checked_add_months(Months::new(months))
        } else {
            date.checked_sub_months(Months::new(months))
        }
        .ok_or_else(overflow)?;

        let days = Days::new(self.day_offset.unsigned_abs());
        if self.day_offset >= 0 {
            shifted.checked_add_days(days)
        } else {
            shifted.checked_sub_days(days)
        }
        .ok_or_else(overflow)
    }
}

/// Dates for `n` new occurrences.
///
/// With an `anchor` (the date of the latest materialized occurrence) the
/// sequence continues after it; without one it starts at `start_date`.
/// Asking for more than [`MAX_OCCURRENCE_COUNT`] dates is an error.
pub fn upcoming_dates(
    start_date: NaiveDate,
    anchor: Option<NaiveDate>,
    cadence: Cadence,
    n: usize,
) -> Result<Vec<NaiveDate>, CoreError> {
    if n as u64 > MAX_OCCURRENCE_COUNT as u64 {
        return Err(CoreError::InvalidInput(format!(
            "Cannot schedule {} occurrences at once (limit {})",
            n, MAX_OCCURRENCE_COUNT
        )));
    }

    let mut dates = Vec::new();
    if n == 0 {
        return Ok(dates);
    }

    let mut next = match anchor {
        Some(anchor) => cadence.advance(anchor)?,
        None => start_date,
    };
    dates.push(next);
    while dates.len() < n {
        next = cadence.advance(next)?;
        dates.push(next);
    }
    Ok(dates)
}

/// Rows to add so that `existing` rows reach `count`.
#[inline]
pub fn missing_occurrences(count: i64, existing: i64) -> usize {
    usize::try_from(count.saturating_sub(existing)).unwrap_or(0)
}

/// Not-done rows to drop when `count` goes from `old_count` to `new_count`.
#[inline]
pub fn excess_occurrences(old_count: i64, new_count: i64) -> i64 {
    old_count.saturating_sub(new_count).max(0)
}

/// Rows to append once an occurrence of `event` has been marked done.
///
/// Only active, cyclic events whose start date has been reached grow, and
/// only by the gap between `count` and the not-done rows left.
pub fn top_up_after_done(event: &Event, not_done: i64, today: NaiveDate) -> usize {
    if !event.generates_occurrences() || event.start_date > today {
        return 0;
    }
    missing_occurrences(event.count, not_done)
}

/// A reconciliation an event write calls for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Newly eligible for generation: fill up to `count`.
    Activated,
    /// Went inactive: drop every not-done occurrence.
    Deactivated,
    /// `count` moved while the event kept generating.
    CountChanged { old: i64, new: i64 },
}

/// Hook for a first save: every active event gets its initial batch.
pub fn plan_insert(event: &Event) -> Option<Transition> {
    event.is_active.then_some(Transition::Activated)
}

/// Hook for saving `new` over the stored `old` row.
///
/// Deactivation wins over everything else. Becoming active (or cyclic)
/// while generating reconciles against the new `count` directly, so a
/// simultaneous count edit is not applied a second time.
pub fn plan_update(old: &Event, new: &Event) -> Option<Transition> {
    if old.is_active && !new.is_active {
        return Some(Transition::Deactivated);
    }
    if !new.generates_occurrences() {
        return None;
    }

    let became_active = !old.is_active;
    let became_cyclic = !old.is_cyclic;
    if became_active || became_cyclic {
        Some(Transition::Activated)
    } else if old.count != new.count {
        Some(Transition::CountChanged { old: old.count, new: new.count })
    } else {
        None
    }
}
