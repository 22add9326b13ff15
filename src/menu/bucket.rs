use serde::{Deserialize, Serialize};

/// The six canonical menu buckets. Variant order is the fixed iteration and
/// rendering order: soups first, desserts last.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bucket {
    Soups,
    Entrees,
    StarchPotatoes,
    Vegetables,
    Delish,
    Desserts,
}

impl Bucket {
    pub const ALL: [Self; 6] = [
        Self::Soups,
        Self::Entrees,
        Self::StarchPotatoes,
        Self::Vegetables,
        Self::Delish,
        Self::Desserts,
    ];

    /// The snake_case key used in the persisted JSON.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Soups => "soups",
            Self::Entrees => "entrees",
            Self::StarchPotatoes => "starch_potatoes",
            Self::Vegetables => "vegetables",
            Self::Delish => "delish",
            Self::Desserts => "desserts",
        }
    }

    /// Human-readable section heading, as used in the email.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Soups => "Soups",
            Self::Entrees => "Entrées",
            Self::StarchPotatoes => "Starch & Potatoes",
            Self::Vegetables => "Vegetables",
            Self::Delish => "Delish",
            Self::Desserts => "Desserts",
        }
    }
}
