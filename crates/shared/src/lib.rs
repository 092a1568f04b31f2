mod error;
pub mod mealplan;
pub mod recipe;
pub mod shopping;
mod store;

pub use error::*;
pub use store::*;
