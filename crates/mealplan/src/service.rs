use jardine_shared::mealplan::{PlannerState, Week};
use std::collections::BTreeMap;
use time::{Duration, OffsetDateTime, macros::format_description};

pub const WEEK_SECONDS: u64 = 7 * 24 * 60 * 60;

pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_utc()
}

/// Monday 00:00:00 of the week containing `from`.
pub fn week_start(from: OffsetDateTime) -> OffsetDateTime {
    let days_since_monday = from.weekday().number_days_from_monday();

    (from - Duration::days(days_since_monday as i64)).replace_time(time::Time::MIDNIGHT)
}

pub fn dated_label(start: u64) -> String {
    let date = i64::try_from(start)
        .ok()
        .and_then(|start| OffsetDateTime::from_unix_timestamp(start).ok())
        .and_then(|d| d.format(format_description!("[year]-[month]-[day]")).ok());

    match date {
        Some(date) => format!("Week of {date}"),
        None => format!("Week of {start}"),
    }
}

/// Planner whose weeks start on the Monday of `from`, one after another.
pub fn dated_state(from: OffsetDateTime, weeks: usize) -> PlannerState {
    let first = week_start(from).unix_timestamp().max(0) as u64;

    let weeks = (0..weeks.max(1))
        .map(|w| {
            let start = first.saturating_add(w as u64 * WEEK_SECONDS);
            Week::new(
                format!("week-{}", w + 1),
                dated_label(start),
                Some(start),
                &w.to_string(),
            )
        })
        .collect();

    PlannerState {
        weeks,
        recipes: BTreeMap::new(),
    }
}

/// Next chronological week after `weeks`, whatever their display order.
pub fn next_week(weeks: &[Week]) -> Week {
    let taken = |number: &usize| weeks.iter().any(|w| w.id == format!("week-{number}"));

    let preferred = weeks
        .iter()
        .filter_map(|w| w.id.strip_prefix("week-")?.parse::<usize>().ok())
        .max()
        .and_then(|n| n.checked_add(1))
        .unwrap_or(weeks.len() + 1);

    let number = (preferred..=usize::MAX)
        .chain(1..preferred)
        .find(|n| !taken(n))
        .unwrap_or(preferred);

    let id = format!("week-{number}");
    let next_start = weeks
        .iter()
        .filter_map(|w| w.start)
        .max()
        .and_then(|last| last.checked_add(WEEK_SECONDS));

    match next_start {
        Some(start) => Week::new(&id, dated_label(start), Some(start), &id),
        None => Week::new(&id, format!("Week {}", weeks.len() + 1), None, &id),
    }
}
