use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::week::utc_now_iso;

use super::DayMenu;

/// The persisted week document: exactly the seven dates from `week_start`
/// (a Monday) through `week_end` (the following Sunday), each mapped to a
/// [`DayMenu`]. `generated_at` is a `Z`-suffixed UTC timestamp at second
/// precision; downstream staleness checks compare against it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekMenu {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    pub generated_at: String,
    pub meals: BTreeMap<NaiveDate, DayMenu>,
}

impl WeekMenu {
    #[must_use]
    pub fn day(&self, date: NaiveDate) -> Option<&DayMenu> {
        self.meals.get(&date)
    }

    #[must_use]
    pub fn dish_count(&self) -> usize {
        self.meals.values().map(DayMenu::dish_count).sum()
    }
}

/// Outcome of the most recent scrape run. `error` holds the error kind
/// string (`"fetch_failed"`, `"parse_failed"`) when the run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScrapeStatus {
    pub last_scrape_ok: bool,
    pub error: Option<String>,
    pub updated_at: String,
}

impl ScrapeStatus {
    #[must_use]
    pub fn ok() -> Self {
        Self {
            last_scrape_ok: true,
            error: None,
            updated_at: utc_now_iso(),
        }
    }

    #[must_use]
    pub fn failed(kind: &str) -> Self {
        Self {
            last_scrape_ok: false,
            error: Some(kind.to_string()),
            updated_at: utc_now_iso(),
        }
    }
}
