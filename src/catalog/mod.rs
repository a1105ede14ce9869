//! Static content the screens feed into the store
//!
//! Food templates for the calorie index, the event discovery feed and the
//! active challenges, with the small lookups the screens run over them.

pub mod events;
pub mod foods;

use thiserror::Error;

pub use events::{default_challenges, default_events, Challenge, EventListing};
pub use foods::{
    default_foods, group_by_category, search_foods, CalorieBand, FoodCategory, FoodTemplate,
};

/// Catalog lookup errors
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unknown food category `{0}`; expected breakfast|fruits|proteins|carbs")]
    UnknownCategory(String),
}
