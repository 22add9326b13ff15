use scraper::{ElementRef, Html};

use crate::menu::{DayMenu, MealMenu};

use super::{classify, normalize, selector};

/// One entry of a meal column, in document order. Category headers carry the
/// raw station heading, dish entries the raw recipe text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionToken {
    Category(String),
    Dish(String),
}

/// Parse one day's page into lunch and dinner menus.
///
/// The page lays the three meal periods out as sibling `<td>` columns, each
/// holding an anchor with the meal name and a flat run of category-header and
/// recipe `<div>`s. Breakfast is located but not kept. A missing meal column
/// yields an all-empty menu for that meal.
#[must_use]
pub fn parse_day(html: &str) -> DayMenu {
    let document = Html::parse_document(html);
    let mut lunch_column = None;
    let mut dinner_column = None;
    for column in document
        .root_element()
        .select(selector!(r#"td[valign="top"][width="30%"]"#))
    {
        match meal_label(column).as_deref() {
            Some("lunch") => lunch_column = Some(column),
            Some("dinner") => dinner_column = Some(column),
            _ => {} // breakfast and unlabeled columns
        }
    }

    let lunch = lunch_column.map_or_else(MealMenu::lunch, |column| {
        collect_meal(meal_tokens(column), MealMenu::lunch())
    });
    let mut dinner = dinner_column.map_or_else(MealMenu::dinner, |column| {
        collect_meal(meal_tokens(column), MealMenu::dinner())
    });
    // Dinner never serves delish, even when the page claims otherwise.
    dinner.delish = None;

    DayMenu { lunch, dinner }
}

/// Meal period named by the first recognized anchor in the column.
fn meal_label(column: ElementRef<'_>) -> Option<String> {
    column
        .select(selector!("a"))
        .map(|anchor| inner_text(anchor).to_lowercase())
        .find(|label| matches!(label.as_str(), "breakfast" | "lunch" | "dinner"))
}

/// Flatten a meal column into its category/dish tokens, document order.
fn meal_tokens(column: ElementRef<'_>) -> Vec<SectionToken> {
    column
        .select(selector!("div.shortmenucats, div.shortmenurecipes"))
        .map(|element| {
            let text = inner_text(element);
            if element.value().classes().any(|c| c == "shortmenucats") {
                SectionToken::Category(text)
            } else {
                SectionToken::Dish(text)
            }
        })
        .collect()
}

/// Fold the token stream into `meal`, tracking the active bucket.
///
/// An unrecognized category header blanks the active bucket, so dishes under
/// an ignored station are dropped until the next recognized header. Dishes
/// that normalize to an empty string are dropped too.
fn collect_meal(tokens: impl IntoIterator<Item = SectionToken>, mut meal: MealMenu) -> MealMenu {
    let mut current_bucket = None;
    for token in tokens {
        match token {
            SectionToken::Category(raw) => current_bucket = classify(&raw),
            SectionToken::Dish(raw) => {
                if let Some(bucket) = current_bucket {
                    let dish = normalize(&raw);
                    if !dish.is_empty() {
                        meal.push(bucket, dish);
                    }
                }
            }
        }
    }
    meal.dedupe();
    meal
}

fn inner_text(element: ElementRef<'_>) -> String {
    element
        .text()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
