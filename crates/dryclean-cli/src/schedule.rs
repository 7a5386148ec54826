//! Pickup date picker, rendered as a month grid.

use chrono::{Datelike, Local, NaiveDate};
use dryclean_core::calendar::{is_selectable, month_grid, shift_month};

/// Renders the month `offset` months from `today`. Days before `today` are
/// shown as `.`.
pub(crate) fn render_month(today: NaiveDate, offset: i32) -> Option<String> {
    let (year, month) = shift_month(today.year(), today.month(), offset)?;
    let grid = month_grid(year, month)?;

    let mut out = format!("{year}-{month:02}\n Su Mo Tu We Th Fr Sa\n");
    for week in grid {
        for cell in week {
            match cell {
                Some(date) if is_selectable(date, today) => {
                    out.push_str(&format!(" {:>2}", date.day()));
                }
                Some(_) => out.push_str("  ."),
                None => out.push_str("   "),
            }
        }
        out.push('\n');
    }
    Some(out)
}

pub(crate) fn run_calendar(offset: i32) -> anyhow::Result<()> {
    let today = Local::now().date_naive();
    let rendered =
        render_month(today, offset).ok_or_else(|| anyhow::anyhow!("month out of range"))?;
    print!("{rendered}");
    Ok(())
}
