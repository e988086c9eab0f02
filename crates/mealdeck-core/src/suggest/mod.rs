pub mod category;
pub mod engine;

pub use category::{emoji_for, food_category, meal_bonus, MealContext};
pub use engine::{suggest, DEFAULT_SUGGESTION_COUNT};
