use chrono::{Duration, NaiveDate};
use chrono_humanize::Humanize;
use comfy_table::{Attribute, Cell, Color, Row, Table};
use remind_core::models::{display_date, DueReminder, Event, EventColumn};

fn yes_no(value: bool) -> &'static str {
    if value {
        "Yes"
    } else {
        "No"
    }
}

fn event_cell(event: &Event, column: EventColumn) -> Cell {
    match column {
        EventColumn::Title => Cell::new(&event.name),
        EventColumn::StartDate => Cell::new(display_date(event.start_date)),
        EventColumn::Cyclic => Cell::new(yes_no(event.is_cyclic)),
        EventColumn::Count => Cell::new(event.count),
        EventColumn::Days => Cell::new(event.day_offset),
        EventColumn::Months => Cell::new(event.month_offset),
        EventColumn::Active => {
            let cell = Cell::new(yes_no(event.is_active));
            if event.is_active {
                cell.fg(Color::Green)
            } else {
                cell.fg(Color::DarkGrey)
            }
        }
    }
}

/// Prints the events with the given column titles, in order.
pub fn display_events<'a>(events: &[Event], columns: impl IntoIterator<Item = (EventColumn, &'a str)>) {
    if events.is_empty() {
        println!("No events found.");
        return;
    }

    let columns: Vec<(EventColumn, &str)> = columns.into_iter().collect();
    let mut header = vec!["ID"];
    header.extend(columns.iter().map(|(_, title)| *title));

    let mut table = Table::new();
    table.set_header(header);

    for event in events {
        let mut row = Row::new();
        let mut id_cell = Cell::new(event.id);
        if !event.is_active {
            id_cell = id_cell.fg(Color::DarkGrey);
        }
        row.add_cell(id_cell);
        for (column, _) in &columns {
            row.add_cell(event_cell(event, *column));
        }
        table.add_row(row);
    }

    println!("{table}");
}

fn relative_day(date: NaiveDate, today: NaiveDate) -> String {
    let days = (date - today).num_days();
    if days == 0 {
        "today".to_string()
    } else {
        Duration::days(days).humanize()
    }
}

/// Prints the due list; overdue rows are red and today's are yellow.
pub fn display_due(reminders: &[DueReminder], today: NaiveDate) {
    if reminders.is_empty() {
        println!("Nothing due.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Event", "Date", "Due"]);

    for reminder in reminders {
        let mut row = Row::new();
        row.add_cell(Cell::new(reminder.id));
        row.add_cell(Cell::new(&reminder.event_name).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(display_date(reminder.date)));

        let due_cell = Cell::new(relative_day(reminder.date, today));
        let due_cell = if reminder.date < today {
            due_cell.fg(Color::Red)
        } else if reminder.date == today {
            due_cell.fg(Color::Yellow)
        } else {
            due_cell
        };
        row.add_cell(due_cell);
        table.add_row(row);
    }

    println!("{table}");
}

/// Prints the dates of freshly scheduled reminders, if any.
pub fn display_scheduled(dates: impl IntoIterator<Item = NaiveDate>) {
    let dates: Vec<String> = dates.into_iter().map(display_date).collect();
    if !dates.is_empty() {
        println!("Scheduled {} reminder(s): {}", dates.len(), dates.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_relative_day() {
        let today = date(2024, 3, 10);
        assert_eq!(relative_day(today, today), "today");
        assert_eq!(relative_day(date(2024, 3, 7), today), "3 days ago");
        assert_eq!(relative_day(date(2024, 3, 12), today), "in 2 days");
    }

    #[test]
    fn test_event_cells() {
        let event = Event {
            name: "Rent".to_string(),
            is_active: false,
            ..Event::draft(4, date(2024, 1, 31))
        };
        assert_eq!(event_cell(&event, EventColumn::Title).content(), "Rent");
        assert_eq!(event_cell(&event, EventColumn::StartDate).content(), "31-01-2024");
        assert_eq!(event_cell(&event, EventColumn::Cyclic).content(), "Yes");
        assert_eq!(event_cell(&event, EventColumn::Active).content(), "No");
    }
}
