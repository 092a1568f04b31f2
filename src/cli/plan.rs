use std::io::Write;

use jardine_mealplan::Planner;
use jardine_shared::mealplan::{DayView, SpecialMode};

use super::Session;
use super::recipe::find_recipe;

/// Plain text view of one week.
pub fn render_week(planner: &Planner, week: usize) -> jardine_shared::Result<String> {
    let summary = planner.week_summary(week)?;
    let week_ref = planner.week(week)?;

    let mut text = format!("{}. {} ({summary})\n", week + 1, week_ref.label);

    for (index, day) in week_ref.days().iter().enumerate() {
        let content = match planner.resolve(day) {
            DayView::Empty => "-".to_owned(),
            DayView::Recipe(recipe) if recipe.disliked => format!("{} (disliked)", recipe.title),
            DayView::Recipe(recipe) => recipe.title.to_owned(),
            DayView::Missing(id) => format!("missing recipe {id}"),
            DayView::Special(SpecialMode::GrannyDay) => "Granny day".to_owned(),
            DayView::Special(SpecialMode::EatingOut) => "Eating out".to_owned(),
            DayView::Special(SpecialMode::None) => "-".to_owned(),
        };

        text.push_str(&format!("  {} {:<10} {content}\n", index + 1, day.name()));
    }

    Ok(text)
}

pub fn show(session: &Session, week: Option<usize>, out: &mut impl Write) -> anyhow::Result<()> {
    let planner = session.coordinator.planner();

    let weeks = match week {
        Some(week) => vec![week],
        None => (0..planner.weeks.len()).collect(),
    };

    for (i, week) in weeks.into_iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        write!(out, "{}", render_week(planner, week)?)?;
    }

    Ok(())
}

pub fn weeks(session: &Session, out: &mut impl Write) -> anyhow::Result<()> {
    let planner = session.coordinator.planner();

    for (index, week) in planner.weeks.iter().enumerate() {
        writeln!(
            out,
            "{}. {:<22} {}",
            index + 1,
            week.label,
            planner.week_summary(index)?
        )?;
    }

    Ok(())
}

pub async fn assign(
    session: &mut Session,
    week: usize,
    day: usize,
    query: &str,
    anyway: bool,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let recipe = find_recipe(session.coordinator.planner(), query)?.clone();

    if recipe.disliked && !anyway {
        anyhow::bail!(
            "{} is marked as disliked, pass --anyway to plan it",
            recipe.title
        );
    }

    session
        .coordinator
        .apply(|planner| planner.assign_recipe(week, day, &recipe.id))
        .await?;

    let day_name = session.coordinator.planner().day(week, day)?.name().to_owned();
    writeln!(out, "{} planned on {day_name} of week {}", recipe.title, week + 1)?;

    Ok(())
}

pub async fn clear(
    session: &mut Session,
    week: usize,
    day: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    session
        .coordinator
        .apply(|planner| planner.clear_day(week, day))
        .await?;

    writeln!(out, "Day {} of week {} cleared", day + 1, week + 1)?;

    Ok(())
}

pub async fn granny(
    session: &mut Session,
    week: usize,
    day: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mode = session
        .coordinator
        .apply(|planner| planner.toggle_granny_day(week, day))
        .await?;

    match mode {
        SpecialMode::GrannyDay => writeln!(out, "Granny day, no cooking needed")?,
        _ => writeln!(out, "Granny day removed")?,
    }

    Ok(())
}

pub async fn eating_out(
    session: &mut Session,
    week: usize,
    day: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let mode = session
        .coordinator
        .apply(|planner| {
            let mode = match planner.day(week, day)?.special_mode() {
                SpecialMode::EatingOut => SpecialMode::None,
                _ => SpecialMode::EatingOut,
            };
            planner.set_special_mode(week, day, mode)?;

            Ok(mode)
        })
        .await?;

    match mode {
        SpecialMode::EatingOut => writeln!(out, "Eating out")?,
        _ => writeln!(out, "Eating out removed")?,
    }

    Ok(())
}

pub async fn swap(
    session: &mut Session,
    week: usize,
    a: usize,
    b: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    session
        .coordinator
        .apply(|planner| planner.swap_days(week, a, b))
        .await?;

    write!(out, "{}", render_week(session.coordinator.planner(), week)?)?;

    Ok(())
}

pub async fn move_week(
    session: &mut Session,
    from: usize,
    to: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    session
        .coordinator
        .apply(|planner| planner.reorder_weeks(from, to))
        .await?;

    weeks(session, out)
}
