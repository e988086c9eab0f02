//! Dish categorization and meal-time context.
//!
//! Categories are derived from the dish name with an ordered
//! first-match-wins keyword table. The tables are static lookup data;
//! matching is case-insensitive on the full name.

use serde::{Deserialize, Serialize};

/// One categorization rule: any keyword hit assigns the category.
struct CategoryRule {
    keywords: &'static [&'static str],
    category: &'static str,
}

/// Ordered rule table. Earlier rules win; note "bánh mì" is listed after
/// the bare "mì" rule and therefore classifies as "mì", matching the
/// historical behavior users' stats were built on.
const CATEGORY_RULES: &[CategoryRule] = &[
    CategoryRule { keywords: &["phở"], category: "phở" },
    CategoryRule { keywords: &["bún"], category: "bún" },
    CategoryRule { keywords: &["mì", "miến"], category: "mì" },
    CategoryRule { keywords: &["hủ", "tiếu"], category: "hủ tiếu" },
    CategoryRule { keywords: &["cơm"], category: "cơm" },
    CategoryRule { keywords: &["xôi"], category: "xôi" },
    CategoryRule { keywords: &["cháo"], category: "cháo" },
    CategoryRule { keywords: &["bánh mì"], category: "bánh mì" },
    CategoryRule { keywords: &["bánh"], category: "bánh" },
    CategoryRule { keywords: &["lẩu"], category: "lẩu" },
    CategoryRule { keywords: &["nướng"], category: "nướng" },
    CategoryRule { keywords: &["gỏi", "salad"], category: "gỏi" },
    CategoryRule { keywords: &["chè", "tráng miệng"], category: "tráng miệng" },
    CategoryRule { keywords: &["nem", "chả"], category: "nem chả" },
    CategoryRule { keywords: &["pizza", "burger", "pasta"], category: "western" },
];

/// Category assigned when no rule matches.
pub const OTHER_CATEGORY: &str = "other";

/// Derive the category tag for a dish name.
pub fn food_category(food: &str) -> &'static str {
    let normalized = food.to_lowercase();
    for rule in CATEGORY_RULES {
        if rule.keywords.iter().any(|k| normalized.contains(k)) {
            return rule.category;
        }
    }
    OTHER_CATEGORY
}

/// Meal slot the current civil hour falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MealContext {
    Breakfast,
    Lunch,
    Snack,
    Dinner,
    LateNight,
}

impl MealContext {
    /// Classify a civil hour (0-23).
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            5..=9 => MealContext::Breakfast,
            10..=13 => MealContext::Lunch,
            14..=16 => MealContext::Snack,
            17..=21 => MealContext::Dinner,
            _ => MealContext::LateNight,
        }
    }
}

struct MealBonusRule {
    context: MealContext,
    keywords: &'static [&'static str],
    bonus: f64,
}

const MEAL_BONUS_RULES: &[MealBonusRule] = &[
    MealBonusRule {
        context: MealContext::Breakfast,
        keywords: &["bánh mì", "phở", "xôi", "cháo", "bánh cuốn", "bánh bao"],
        bonus: 20.0,
    },
    MealBonusRule {
        context: MealContext::Lunch,
        keywords: &["cơm", "bún", "mì", "hủ tiếu", "miến"],
        bonus: 20.0,
    },
    MealBonusRule {
        context: MealContext::Dinner,
        keywords: &["lẩu", "nướng", "cơm", "bò kho"],
        bonus: 15.0,
    },
    MealBonusRule {
        context: MealContext::Snack,
        keywords: &["chè", "bánh", "gỏi", "nem"],
        bonus: 15.0,
    },
];

/// Bonus for dishes that fit the current meal slot, 0 otherwise.
pub fn meal_bonus(food: &str, context: MealContext) -> f64 {
    let normalized = food.to_lowercase();
    for rule in MEAL_BONUS_RULES {
        if rule.context == context && rule.keywords.iter().any(|k| normalized.contains(k)) {
            return rule.bonus;
        }
    }
    0.0
}

/// Emoji keyword table for presentation layers. First match wins.
const EMOJI_KEYWORDS: &[(&str, &str)] = &[
    ("bún chả", "🍢"),
    ("bánh mì", "🥖"),
    ("bánh xèo", "🥞"),
    ("bánh cuốn", "🥟"),
    ("bánh bao", "🥟"),
    ("chả giò", "🍤"),
    ("gỏi cuốn", "🌯"),
    ("phở", "🍜"),
    ("bún", "🍜"),
    ("mì", "🍜"),
    ("miến", "🍜"),
    ("hủ", "🍜"),
    ("tiếu", "🍜"),
    ("cơm", "🍚"),
    ("xôi", "🍚"),
    ("cháo", "🍲"),
    ("bánh", "🥐"),
    ("gà", "🍗"),
    ("vịt", "🦆"),
    ("bò", "🥩"),
    ("heo", "🍖"),
    ("thịt", "🍖"),
    ("sườn", "🍖"),
    ("cá", "🐟"),
    ("tôm", "🦐"),
    ("mực", "🦑"),
    ("lẩu", "🍲"),
    ("chè", "🍨"),
    ("nem", "🍤"),
    ("chả", "🍤"),
    ("gỏi", "🥗"),
    ("salad", "🥗"),
    ("pizza", "🍕"),
    ("burger", "🍔"),
    ("sushi", "🍣"),
    ("ramen", "🍜"),
    ("pasta", "🍝"),
    ("steak", "🥩"),
    ("sandwich", "🥪"),
    ("nướng", "🍖"),
    ("chiên", "🍗"),
    ("rán", "🍗"),
    ("kho", "🍲"),
    ("cuốn", "🌯"),
    ("xào", "🍝"),
    ("canh", "🍲"),
    ("súp", "🍲"),
];

/// Display emoji for a dish name.
pub fn emoji_for(food: &str) -> &'static str {
    let normalized = food.to_lowercase();
    for (keyword, emoji) in EMOJI_KEYWORDS {
        if normalized.contains(keyword) {
            return emoji;
        }
    }
    "🍽️"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_match_wins() {
        assert_eq!(food_category("Phở bò"), "phở");
        assert_eq!(food_category("Bún riêu"), "bún");
        // "bánh mì" contains "mì" and hits the earlier rule.
        assert_eq!(food_category("Bánh mì"), "mì");
        assert_eq!(food_category("Bánh xèo"), "bánh");
        assert_eq!(food_category("Pizza hải sản"), "western");
        assert_eq!(food_category("Trứng luộc"), OTHER_CATEGORY);
    }

    #[test]
    fn meal_context_hour_boundaries() {
        assert_eq!(MealContext::from_hour(5), MealContext::Breakfast);
        assert_eq!(MealContext::from_hour(9), MealContext::Breakfast);
        assert_eq!(MealContext::from_hour(10), MealContext::Lunch);
        assert_eq!(MealContext::from_hour(13), MealContext::Lunch);
        assert_eq!(MealContext::from_hour(14), MealContext::Snack);
        assert_eq!(MealContext::from_hour(16), MealContext::Snack);
        assert_eq!(MealContext::from_hour(17), MealContext::Dinner);
        assert_eq!(MealContext::from_hour(21), MealContext::Dinner);
        assert_eq!(MealContext::from_hour(22), MealContext::LateNight);
        assert_eq!(MealContext::from_hour(2), MealContext::LateNight);
    }

    #[test]
    fn meal_bonus_values() {
        assert_eq!(meal_bonus("Phở bò", MealContext::Breakfast), 20.0);
        assert_eq!(meal_bonus("Cơm tấm", MealContext::Lunch), 20.0);
        assert_eq!(meal_bonus("Lẩu thái", MealContext::Dinner), 15.0);
        assert_eq!(meal_bonus("Chè đậu", MealContext::Snack), 15.0);
        assert_eq!(meal_bonus("Phở bò", MealContext::LateNight), 0.0);
        assert_eq!(meal_bonus("Lẩu thái", MealContext::Breakfast), 0.0);
    }

    #[test]
    fn emoji_fallback() {
        assert_eq!(emoji_for("Phở gà"), "🍜");
        assert_eq!(emoji_for("Trứng hấp"), "🍽️");
    }
}
