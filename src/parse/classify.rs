use crate::menu::Bucket;

/// Map a raw station heading (usually "-- Station Name --") to a bucket.
///
/// Matching is deliberately exact, not fuzzy: stations that merely share
/// words with a canonical name (Salad Bar, Grill, Halal, Brown Rice Station,
/// Whole Grain Pasta Bar, Plant Protein, breakfast stations, ...) must not
/// pollute the buckets, so anything outside the table returns `None`.
#[must_use]
pub fn classify(raw_heading: &str) -> Option<Bucket> {
    let heading = raw_heading.to_lowercase();
    let heading = heading.trim().trim_matches('-').trim();
    match heading {
        "today's soup" => Some(Bucket::Soups),
        "entrees" | "entrée" | "veg,vegan" => Some(Bucket::Entrees),
        "starch and potatoes" => Some(Bucket::StarchPotatoes),
        "vegetables" => Some(Bucket::Vegetables),
        "delish" => Some(Bucket::Delish),
        "desserts" => Some(Bucket::Desserts),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_mapping_table() {
        assert_eq!(classify("today's soup"), Some(Bucket::Soups));
        assert_eq!(classify("entrees"), Some(Bucket::Entrees));
        assert_eq!(classify("Entrée"), Some(Bucket::Entrees));
        assert_eq!(classify("veg,vegan"), Some(Bucket::Entrees));
        assert_eq!(classify("starch and potatoes"), Some(Bucket::StarchPotatoes));
        assert_eq!(classify("vegetables"), Some(Bucket::Vegetables));
        assert_eq!(classify("delish"), Some(Bucket::Delish));
        assert_eq!(classify("desserts"), Some(Bucket::Desserts));
    }

    #[test]
    fn strips_dash_runs_and_case() {
        assert_eq!(classify("-- Today's Soup --"), Some(Bucket::Soups));
        assert_eq!(classify("---DESSERTS---"), Some(Bucket::Desserts));
        assert_eq!(classify("  -- Vegetables --  "), Some(Bucket::Vegetables));
    }

    #[test]
    fn excluded_stations_are_ignored() {
        for heading in [
            "Salad Bar",
            "Deli",
            "Grill",
            "Halal",
            "Halal Station",
            "Brown Rice Station",
            "Whole Grain Pasta Bar",
            "Plant Protein",
            "Breakfast Entrees",
        ] {
            assert_eq!(classify(heading), None, "{heading:?} should be ignored");
        }
    }

    #[test]
    fn near_misses_do_not_fuzzy_match() {
        // Substrings or synonyms of canonical names stay unmapped.
        assert_eq!(classify("soup"), None);
        assert_eq!(classify("Soup of the Day"), None);
        assert_eq!(classify("dessert"), None);
        assert_eq!(classify("vegetable"), None);
        assert_eq!(classify(""), None);
    }
}
