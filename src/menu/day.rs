use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::Bucket;

/// Dish lists for one meal period, keyed by bucket. Field order is the
/// serialization order. `delish` is `Some` for lunch and `None` for dinner,
/// so a serialized dinner object carries five keys and lunch six.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealMenu {
    pub soups: Vec<String>,
    pub entrees: Vec<String>,
    pub starch_potatoes: Vec<String>,
    pub vegetables: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delish: Option<Vec<String>>,
    pub desserts: Vec<String>,
}

impl MealMenu {
    /// Empty lunch menu: all six buckets present.
    #[must_use]
    pub fn lunch() -> Self {
        Self {
            delish: Some(Vec::new()),
            ..Self::default()
        }
    }

    /// Empty dinner menu: no delish bucket.
    #[must_use]
    pub fn dinner() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn bucket(&self, bucket: Bucket) -> &[String] {
        match bucket {
            Bucket::Soups => &self.soups,
            Bucket::Entrees => &self.entrees,
            Bucket::StarchPotatoes => &self.starch_potatoes,
            Bucket::Vegetables => &self.vegetables,
            Bucket::Delish => self.delish.as_deref().unwrap_or_default(),
            Bucket::Desserts => &self.desserts,
        }
    }

    pub fn push(&mut self, bucket: Bucket, dish: String) {
        match bucket {
            Bucket::Soups => self.soups.push(dish),
            Bucket::Entrees => self.entrees.push(dish),
            Bucket::StarchPotatoes => self.starch_potatoes.push(dish),
            Bucket::Vegetables => self.vegetables.push(dish),
            Bucket::Delish => self.delish.get_or_insert_with(Vec::new).push(dish),
            Bucket::Desserts => self.desserts.push(dish),
        }
    }

    /// Remove repeated dishes in every bucket, keeping the first occurrence.
    pub fn dedupe(&mut self) {
        fn dedupe_preserve(list: &mut Vec<String>) {
            let mut seen = HashSet::new();
            list.retain(|dish| seen.insert(dish.clone()));
        }
        dedupe_preserve(&mut self.soups);
        dedupe_preserve(&mut self.entrees);
        dedupe_preserve(&mut self.starch_potatoes);
        dedupe_preserve(&mut self.vegetables);
        if let Some(delish) = self.delish.as_mut() {
            dedupe_preserve(delish);
        }
        dedupe_preserve(&mut self.desserts);
    }

    #[must_use]
    pub fn dish_count(&self) -> usize {
        Bucket::ALL.iter().map(|b| self.bucket(*b).len()).sum()
    }
}

/// Lunch and dinner for one calendar date.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayMenu {
    pub lunch: MealMenu,
    pub dinner: MealMenu,
}

impl DayMenu {
    /// The substitute for a failed or absent day: both meals present, every
    /// bucket empty.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            lunch: MealMenu::lunch(),
            dinner: MealMenu::dinner(),
        }
    }

    #[must_use]
    pub fn dish_count(&self) -> usize {
        self.lunch.dish_count() + self.dinner.dish_count()
    }
}
