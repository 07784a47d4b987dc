use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::encode::IsNull;
use sqlx::error::BoxDynError;
use sqlx::sqlite::{Sqlite, SqliteArgumentValue, SqliteRow, SqliteTypeInfo, SqliteValueRef};
use sqlx::{Decode, Encode, FromRow, Row, Type};
use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

use crate::error::CoreError;
use crate::schedule::Cadence;

/// Fixed-width, sortable date layout used in the `StartDate` and `Date` columns.
pub const DATE_STORE_FORMAT: &str = "%Y%m%d";
/// Layout used when a date is shown to the user.
pub const DATE_DISPLAY_FORMAT: &str = "%d-%m-%Y";
/// Title given to freshly created rows until the user edits it.
pub const DEFAULT_EVENT_NAME: &str = "ENTER TITLE HERE";
/// Largest `count` an event may ask for.
pub const MAX_OCCURRENCE_COUNT: i64 = 10_000;

// ============================================================================
// Stored dates
// ============================================================================

/// A calendar date as persisted in the store (`yyyyMMdd` text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct StoreDate(pub NaiveDate);

impl StoreDate {
    pub fn parse(s: &str) -> Result<Self, chrono::ParseError> {
        NaiveDate::parse_from_str(s.trim(), DATE_STORE_FORMAT).map(StoreDate)
    }

    pub fn to_store_string(&self) -> String {
        self.0.format(DATE_STORE_FORMAT).to_string()
    }
}

impl From<NaiveDate> for StoreDate {
    fn from(date: NaiveDate) -> Self {
        StoreDate(date)
    }
}

impl From<StoreDate> for NaiveDate {
    fn from(date: StoreDate) -> Self {
        date.0
    }
}

impl fmt::Display for StoreDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DATE_DISPLAY_FORMAT))
    }
}

impl Type<Sqlite> for StoreDate {
    fn type_info() -> SqliteTypeInfo {
        <String as Type<Sqlite>>::type_info()
    }

    fn compatible(ty: &SqliteTypeInfo) -> bool {
        <String as Type<Sqlite>>::compatible(ty)
    }
}

impl<'q> Encode<'q, Sqlite> for StoreDate {
    fn encode_by_ref(&self, args: &mut Vec<SqliteArgumentValue<'q>>) -> IsNull {
        args.push(SqliteArgumentValue::Text(Cow::Owned(self.to_store_string())));
        IsNull::No
    }
}

impl<'r> Decode<'r, Sqlite> for StoreDate {
    fn decode(value: SqliteValueRef<'r>) -> Result<Self, BoxDynError> {
        let text = <&str as Decode<Sqlite>>::decode(value)?;
        Ok(StoreDate::parse(text)?)
    }
}

/// Formats a date the way the user sees it (`dd-MM-yyyy`).
pub fn display_date(date: NaiveDate) -> String {
    date.format(DATE_DISPLAY_FORMAT).to_string()
}

// ============================================================================
// Events
// ============================================================================

/// A recurrence definition: what to be reminded of and how often.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    /// Assigned by the event registry, not by the store.
    pub id: i64,
    pub name: String,
    /// Date of the first occurrence.
    pub start_date: NaiveDate,
    pub is_cyclic: bool,
    /// Total number of occurrences intended over the event's lifetime.
    pub count: i64,
    pub day_offset: i64,
    pub month_offset: i64,
    pub is_active: bool,
}

impl Event {
    /// The row handed out for a freshly added, not yet saved event.
    pub fn draft(id: i64, today: NaiveDate) -> Self {
        Self {
            id,
            name: DEFAULT_EVENT_NAME.to_string(),
            start_date: today,
            is_cyclic: true,
            count: 1,
            day_offset: 0,
            month_offset: 0,
            is_active: true,
        }
    }

    pub fn cadence(&self) -> Cadence {
        Cadence::new(self.day_offset, self.month_offset)
    }

    /// Whether count changes and completed occurrences may grow the schedule.
    pub fn generates_occurrences(&self) -> bool {
        self.is_active && self.is_cyclic
    }

    /// Applies a set of cell edits, rejecting values the schedule cannot honor.
    pub fn apply(&mut self, edit: EventEdit) -> Result<(), CoreError> {
        if let Some(count) = edit.count {
            if count < 0 {
                return Err(CoreError::InvalidInput(format!(
                    "Number of occurrences cannot be negative (got {})",
                    count
                )));
            }
            if count > MAX_OCCURRENCE_COUNT {
                return Err(CoreError::InvalidInput(format!(
                    "Number of occurrences cannot exceed {} (got {})",
                    MAX_OCCURRENCE_COUNT, count
                )));
            }
        }
        if let Some(name) = &edit.name {
            if name.trim().is_empty() {
                return Err(CoreError::InvalidInput("Title cannot be empty".to_string()));
            }
        }

        if let Some(name) = edit.name {
            self.name = name;
        }
        if let Some(start_date) = edit.start_date {
            self.start_date = start_date;
        }
        if let Some(is_cyclic) = edit.is_cyclic {
            self.is_cyclic = is_cyclic;
        }
        if let Some(count) = edit.count {
            self.count = count;
        }
        if let Some(day_offset) = edit.day_offset {
            self.day_offset = day_offset;
        }
        if let Some(month_offset) = edit.month_offset {
            self.month_offset = month_offset;
        }
        if let Some(is_active) = edit.is_active {
            self.is_active = is_active;
        }
        Ok(())
    }
}

impl<'r> FromRow<'r, SqliteRow> for Event {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("Id")?,
            name: row.try_get("Name")?,
            start_date: row.try_get::<StoreDate, _>("StartDate")?.into(),
            is_cyclic: row.try_get("IsCyclic")?,
            count: row.try_get("Count")?,
            day_offset: row.try_get("Day")?,
            month_offset: row.try_get("Month")?,
            is_active: row.try_get("IsActive")?,
        })
    }
}

/// Per-cell changes to an event, as forwarded by the presentation layer.
#[derive(Debug, Clone, Default)]
pub struct EventEdit {
    pub name: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub is_cyclic: Option<bool>,
    pub count: Option<i64>,
    pub day_offset: Option<i64>,
    pub month_offset: Option<i64>,
    pub is_active: Option<bool>,
}

impl EventEdit {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.start_date.is_none()
            && self.is_cyclic.is_none()
            && self.count.is_none()
            && self.day_offset.is_none()
            && self.month_offset.is_none()
            && self.is_active.is_none()
    }
}

/// The editable columns of the event table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventColumn {
    Title,
    StartDate,
    Cyclic,
    Count,
    Days,
    Months,
    Active,
}

impl EventColumn {
    pub const ALL: [EventColumn; 7] = [
        EventColumn::Title,
        EventColumn::StartDate,
        EventColumn::Cyclic,
        EventColumn::Count,
        EventColumn::Days,
        EventColumn::Months,
        EventColumn::Active,
    ];

    pub fn default_title(self) -> &'static str {
        match self {
            EventColumn::Title => "Title",
            EventColumn::StartDate => "Start Date",
            EventColumn::Cyclic => "Cyclic",
            EventColumn::Count => "Number",
            EventColumn::Days => "Days",
            EventColumn::Months => "Months",
            EventColumn::Active => "Active",
        }
    }
}

impl fmt::Display for EventColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventColumn::Title => write!(f, "title"),
            EventColumn::StartDate => write!(f, "start"),
            EventColumn::Cyclic => write!(f, "cyclic"),
            EventColumn::Count => write!(f, "count"),
            EventColumn::Days => write!(f, "days"),
            EventColumn::Months => write!(f, "months"),
            EventColumn::Active => write!(f, "active"),
        }
    }
}

#[derive(Error, Debug, PartialEq)]
#[error("Invalid event column: {0}")]
pub struct ParseEventColumnError(String);

impl FromStr for EventColumn {
    type Err = ParseEventColumnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" | "name" => Ok(EventColumn::Title),
            "start" | "start_date" | "startdate" => Ok(EventColumn::StartDate),
            "cyclic" => Ok(EventColumn::Cyclic),
            "count" | "number" => Ok(EventColumn::Count),
            "days" | "day" => Ok(EventColumn::Days),
            "months" | "month" => Ok(EventColumn::Months),
            "active" => Ok(EventColumn::Active),
            _ => Err(ParseEventColumnError(s.to_string())),
        }
    }
}

// ============================================================================
// Reminder occurrences
// ============================================================================

/// One materialized, dated occurrence of an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderEvent {
    pub id: i64,
    pub event_id: i64,
    pub date: NaiveDate,
    /// Set once, never reset.
    pub is_done: bool,
}

impl<'r> FromRow<'r, SqliteRow> for ReminderEvent {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("Id")?,
            event_id: row.try_get("EventId")?,
            date: row.try_get::<StoreDate, _>("Date")?.into(),
            is_done: row.try_get("IsDone")?,
        })
    }
}

/// A not-done occurrence joined with its event's title, as shown in the due list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DueReminder {
    pub id: i64,
    pub event_id: i64,
    pub date: NaiveDate,
    pub event_name: String,
}

impl<'r> FromRow<'r, SqliteRow> for DueReminder {
    fn from_row(row: &'r SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("Id")?,
            event_id: row.try_get("EventId")?,
            date: row.try_get::<StoreDate, _>("Date")?.into(),
            event_name: row.try_get("Name")?,
        })
    }
}

/// Snapshot of an event's materialized occurrences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OccurrenceStats {
    /// Done and not-done rows.
    pub total: i64,
    pub not_done: i64,
    /// Date of the most recently inserted row (highest id).
    pub latest_date: Option<NaiveDate>,
}

/// What a reconciliation changed in the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reconciliation {
    pub inserted: Vec<ReminderEvent>,
    pub deleted: u64,
}

impl Reconciliation {
    pub fn is_noop(&self) -> bool {
        self.inserted.is_empty() && self.deleted == 0
    }

    pub(crate) fn merge(&mut self, other: Reconciliation) {
        self.inserted.extend(other.inserted);
        self.deleted += other.deleted;
    }
}
