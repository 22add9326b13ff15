use std::sync::OnceLock;

use regex::Regex;

fn whitespace_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("regex should be valid"))
}

fn annotation_re() -> &'static Regex {
    // Parentheticals whose content starts with an allergen, dietary or
    // caloric marker, e.g. "(contains dairy)", "(GF)", "(120 cal)". The whole
    // group is removed, not just the marker.
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\((?:contains|gf|v|vegan|vegetarian|halal|kosher|kcal|cal|soy|milk|egg|wheat|gluten|tree nuts|peanut|shellfish|fish|sesame)[^)]*\)",
        )
        .expect("regex should be valid")
    })
}

/// Clean a raw dish text fragment into a canonical dish name. Infallible;
/// the result may be empty, in which case the caller drops the dish.
#[must_use]
pub fn normalize(raw: &str) -> String {
    let collapsed = whitespace_re().replace_all(raw, " ");
    let stripped = annotation_re().replace_all(&collapsed, "");
    let recollapsed = whitespace_re().replace_all(&stripped, " ");
    recollapsed
        .trim_matches(&[' ', '-', '\u{2022}', '\u{00b7}', ','][..])
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collapses_whitespace() {
        assert_eq!(normalize("  Roast\t\tChicken \n Breast  "), "Roast Chicken Breast");
    }

    #[test]
    fn strips_allergen_parenthetical() {
        assert_eq!(normalize("Tomato Basil (contains dairy)"), "Tomato Basil");
        assert_eq!(normalize("Rice Pilaf (GF)"), "Rice Pilaf");
        assert_eq!(normalize("Lentil Curry (Vegan, contains soy)"), "Lentil Curry");
    }

    #[test]
    fn strips_caloric_parenthetical() {
        // Marker must start the group; "(120 cal)" starts with a digit and
        // survives, only "(cal ...)" / "(kcal ...)" style is removed.
        assert_eq!(normalize("Brownie (cal 120)"), "Brownie");
        assert_eq!(normalize("Brownie (120 cal)"), "Brownie (120 cal)");
    }

    #[test]
    fn marker_is_case_insensitive() {
        assert_eq!(normalize("Falafel (CONTAINS sesame)"), "Falafel");
    }

    #[test]
    fn keeps_non_marker_parenthetical_start() {
        assert_eq!(normalize("Chicken (roasted)"), "Chicken (roasted)");
    }

    #[test]
    fn strips_stray_punctuation() {
        assert_eq!(normalize("- Minestrone ,"), "Minestrone");
        assert_eq!(normalize("\u{2022} Garden Salad \u{2022}"), "Garden Salad");
    }

    #[test]
    fn annotation_only_yields_empty() {
        assert_eq!(normalize("(contains milk)"), "");
        assert_eq!(normalize("   "), "");
    }
}
