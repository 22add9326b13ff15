//! Week assembly: seven sequential fetch+parse passes folded into one
//! [`WeekMenu`].

use std::collections::BTreeMap;
use std::future::Future;
use std::path::Path;

use chrono::NaiveDate;
use reqwest::Client;

use crate::cache;
use crate::error::{Error, Result};
use crate::fetch;
use crate::menu::{DayMenu, WeekMenu};
use crate::parse::parse_day;
use crate::week::{end_of_week, start_of_week, today_local, utc_now_iso, week_dates};

/// Assemble the current week's menu with the given per-day fetcher.
///
/// A day whose fetch fails degrades to an empty [`DayMenu`] and never aborts
/// the run; only a week with zero dishes anywhere fails, with
/// [`Error::ParseFailed`], and only after every day was attempted.
pub async fn assemble_week_with<F, Fut>(today: NaiveDate, mut fetch_day: F) -> Result<WeekMenu>
where
    F: FnMut(NaiveDate) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let mut meals = BTreeMap::new();
    let mut any_dish = false;
    for date in week_dates(today) {
        let day = match fetch_day(date).await {
            Ok(html) => parse_day(&html),
            Err(e) => {
                log::warn!("Menu for {date} unavailable, substituting empty day: {e}");
                DayMenu::empty()
            }
        };
        any_dish |= day.dish_count() > 0;
        meals.insert(date, day);
    }
    if !any_dish {
        return Err(Error::ParseFailed);
    }
    Ok(WeekMenu {
        week_start: start_of_week(today),
        week_end: end_of_week(today),
        generated_at: utc_now_iso(),
        meals,
    })
}

/// Assemble the current week from the live menu site. When `raw_dump` is
/// set, each fetched page is also written there for debugging; dump failures
/// are swallowed.
pub async fn assemble_week(client: &Client, raw_dump: Option<&Path>) -> Result<WeekMenu> {
    assemble_week_with(today_local(), |date| {
        let client = client.clone();
        let raw_dump = raw_dump.map(Path::to_path_buf);
        async move {
            let html = fetch::day_page(&client, date).await?;
            if let Some(dir) = raw_dump {
                cache::write_raw_html(&dir, date, &html).await;
            }
            Ok(html)
        }
    })
    .await
}
