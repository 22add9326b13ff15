//! HTML presentation over a parsed week: the grid fragment, the page shell
//! and the status banner. Pure string building over completed documents.

use chrono::{DateTime, Datelike, NaiveDate, Utc, Weekday};

use crate::cache::MenuState;
use crate::menu::{Bucket, MealMenu, WeekMenu};

/// Data older than this (by `generated_at`) gets a staleness warning.
const STALE_AFTER_HOURS: i64 = 48;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Banner {
    pub kind: &'static str,
    pub text: &'static str,
}

const fn pastel_class(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Soups => "bg-blue-50",
        Bucket::Entrees => "bg-red-50",
        Bucket::StarchPotatoes => "bg-yellow-50",
        Bucket::Vegetables => "bg-green-50",
        Bucket::Delish => "bg-gray-100",
        Bucket::Desserts => "bg-purple-50",
    }
}

/// The grid shows "Dessert" for the single truncated dessert slot; everywhere
/// else the plural label stands.
const fn grid_label(bucket: Bucket) -> &'static str {
    match bucket {
        Bucket::Desserts => "Dessert",
        _ => bucket.label(),
    }
}

/// The dish list actually shown for one bucket of one meal, with the fixed
/// Sunday specials applied: Sunday lunch entrées become "Sunday Brunch",
/// Sunday dinner dessert becomes "Sunday Sundae!", and desserts otherwise
/// show only their first item.
fn displayed_dishes(date: NaiveDate, is_lunch: bool, bucket: Bucket, meal: &MealMenu) -> Vec<String> {
    let items = meal.bucket(bucket);
    let is_sunday = date.weekday() == Weekday::Sun;
    match bucket {
        Bucket::Entrees if is_sunday && is_lunch => vec!["Sunday Brunch".to_string()],
        Bucket::Desserts if is_sunday && !is_lunch => vec!["Sunday Sundae!".to_string()],
        Bucket::Desserts => items.iter().take(1).cloned().collect(),
        _ => items.to_vec(),
    }
}

fn meal_section(date: NaiveDate, title: &str, meal: &MealMenu, include_delish: bool) -> String {
    let is_lunch = include_delish;
    let mut parts = vec![format!(
        "<div class='mb-3'><div class='text-lg font-semibold mb-2'>{title}</div>"
    )];
    let mut empty = true;
    for bucket in Bucket::ALL {
        if bucket == Bucket::Delish && !include_delish {
            continue;
        }
        let items = displayed_dishes(date, is_lunch, bucket, meal);
        if items.is_empty() {
            continue;
        }
        empty = false;
        parts.push(format!(
            "<div class='text-sm text-gray-500 mb-1'>{}</div>",
            grid_label(bucket)
        ));
        parts.push("<div class='mb-2'>".to_string());
        for item in items {
            parts.push(format!(
                "<div class='px-2 py-1 text-sm {} rounded-lg mb-2'>{item}</div>",
                pastel_class(bucket)
            ));
        }
        parts.push("</div>".to_string());
    }
    if empty {
        parts.push("<div class='text-sm text-gray-400'>No items.</div>".to_string());
    }
    parts.push("</div>".to_string());
    parts.join("\n")
}

fn day_cell(date: NaiveDate, day: &crate::menu::DayMenu) -> String {
    let title = date.format("%A %b %e").to_string().replace("  ", " ");
    format!(
        "<div class='border rounded-2xl p-3'><div class='text-xl font-bold mb-4'>{title}</div>{}{}</div>",
        meal_section(date, "Lunch", &day.lunch, true),
        meal_section(date, "Dinner", &day.dinner, false),
    )
}

/// The Monday-to-Sunday grid fragment swapped in by HTMX refreshes.
#[must_use]
pub fn week_grid(week: &WeekMenu) -> String {
    let cells: String = week
        .meals
        .iter()
        .map(|(date, day)| day_cell(*date, day))
        .collect();
    format!(
        "<div id=\"grid\" class=\"grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-4 gap-3\">{cells}</div>"
    )
}

/// Pick the banner shown above the grid, most severe condition first.
#[must_use]
pub fn status_banner(state: &MenuState) -> Option<Banner> {
    if let Some(status) = &state.status {
        if status.error.as_deref() == Some("parse_failed") {
            return Some(Banner {
                kind: "error",
                text: "Menu format changed\u{2014}scrape failed today.",
            });
        }
        if !status.last_scrape_ok && status.error.is_some() {
            return Some(Banner {
                kind: "error",
                text: "Menu fetch failed\u{2014}showing last known menu (may be stale).",
            });
        }
    }
    let week = state.week.as_ref()?;
    let generated = DateTime::parse_from_rfc3339(&week.generated_at).ok()?;
    let age = Utc::now().signed_duration_since(generated.with_timezone(&Utc));
    if age > chrono::Duration::hours(STALE_AFTER_HOURS) {
        return Some(Banner {
            kind: "warn",
            text: "Data may be stale\u{2014}last successful scrape was >48h ago.",
        });
    }
    None
}

/// The full page: banner, grid, refresh button wired to the fragment route.
#[must_use]
pub fn page(grid: &str, banner: Option<Banner>) -> String {
    let banner_html = banner.map_or_else(String::new, |b| {
        let classes = match b.kind {
            "error" => "bg-red-100 text-red-800",
            _ => "bg-yellow-100 text-yellow-800",
        };
        format!("<div class='rounded-lg p-3 mb-4 text-sm {classes}'>{}</div>", b.text)
    });
    format!(
        r##"<!doctype html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>HUDS This Week</title>
<script src="https://cdn.tailwindcss.com"></script>
<script src="https://unpkg.com/htmx.org@1.9.12"></script>
</head>
<body class="max-w-7xl mx-auto p-4">
<div class="flex items-center justify-between mb-4">
<h1 class="text-2xl font-bold">HUDS This Week</h1>
<button class="px-3 py-1 rounded-lg border text-sm"
        hx-get="/api/week_fragment" hx-target="#grid" hx-swap="outerHTML">Refresh</button>
</div>
{banner_html}
{grid}
</body>
</html>"##
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::{DayMenu, ScrapeStatus};
    use crate::week::utc_now_iso;
    use std::collections::BTreeMap;

    fn week_with(day_builder: impl Fn(NaiveDate) -> DayMenu) -> WeekMenu {
        let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let mut meals = BTreeMap::new();
        for offset in 0..7 {
            let date = start + chrono::Duration::days(offset);
            meals.insert(date, day_builder(date));
        }
        WeekMenu {
            week_start: start,
            week_end: NaiveDate::from_ymd_opt(2025, 9, 7).unwrap(),
            generated_at: utc_now_iso(),
            meals,
        }
    }

    #[test]
    fn sunday_lunch_entrees_become_brunch() {
        let sunday = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        let mut meal = MealMenu::lunch();
        meal.push(Bucket::Entrees, "Roast Chicken".to_string());
        let shown = displayed_dishes(sunday, true, Bucket::Entrees, &meal);
        assert_eq!(shown, ["Sunday Brunch"]);
    }

    #[test]
    fn sunday_dinner_dessert_is_sundae() {
        let sunday = NaiveDate::from_ymd_opt(2025, 9, 7).unwrap();
        let meal = MealMenu::dinner();
        let shown = displayed_dishes(sunday, false, Bucket::Desserts, &meal);
        assert_eq!(shown, ["Sunday Sundae!"]);
    }

    #[test]
    fn weekday_desserts_truncate_to_first() {
        let wednesday = NaiveDate::from_ymd_opt(2025, 9, 3).unwrap();
        let mut meal = MealMenu::dinner();
        meal.push(Bucket::Desserts, "Brownie".to_string());
        meal.push(Bucket::Desserts, "Apple Pie".to_string());
        let shown = displayed_dishes(wednesday, false, Bucket::Desserts, &meal);
        assert_eq!(shown, ["Brownie"]);
    }

    #[test]
    fn grid_dessert_heading_is_singular() {
        let week = week_with(|_| {
            let mut day = DayMenu::empty();
            day.dinner.push(Bucket::Desserts, "Brownie".to_string());
            day
        });
        let grid = week_grid(&week);
        assert!(grid.contains(">Dessert<"));
        assert!(!grid.contains("Desserts"));
    }

    #[test]
    fn grid_has_seven_day_cells() {
        let week = week_with(|_| DayMenu::empty());
        let grid = week_grid(&week);
        assert_eq!(grid.matches("text-xl font-bold").count(), 7);
        assert!(grid.starts_with("<div id=\"grid\""));
    }

    #[test]
    fn empty_meal_renders_placeholder() {
        let week = week_with(|_| DayMenu::empty());
        assert!(week_grid(&week).contains("No items."));
    }

    #[test]
    fn banner_prefers_parse_failure() {
        let state = MenuState {
            week: Some(week_with(|_| DayMenu::empty())),
            status: Some(ScrapeStatus::failed("parse_failed")),
        };
        let banner = status_banner(&state).unwrap();
        assert_eq!(banner.kind, "error");
        assert!(banner.text.contains("format changed"));
    }

    #[test]
    fn banner_on_fetch_failure() {
        let state = MenuState {
            week: None,
            status: Some(ScrapeStatus::failed("fetch_failed")),
        };
        let banner = status_banner(&state).unwrap();
        assert_eq!(banner.kind, "error");
        assert!(banner.text.contains("last known menu"));
    }

    #[test]
    fn stale_week_warns() {
        let mut week = week_with(|_| DayMenu::empty());
        week.generated_at = "2020-01-01T00:00:00Z".to_string();
        let state = MenuState {
            week: Some(week),
            status: Some(ScrapeStatus::ok()),
        };
        let banner = status_banner(&state).unwrap();
        assert_eq!(banner.kind, "warn");
    }

    #[test]
    fn fresh_healthy_state_has_no_banner() {
        let state = MenuState {
            week: Some(week_with(|_| DayMenu::empty())),
            status: Some(ScrapeStatus::ok()),
        };
        assert!(status_banner(&state).is_none());
    }
}
