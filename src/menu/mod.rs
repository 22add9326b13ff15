mod bucket;
mod day;
mod week_menu;

pub use bucket::Bucket;
pub use day::{DayMenu, MealMenu};
pub use week_menu::{ScrapeStatus, WeekMenu};
