mod create;
mod id;
mod import;

pub use create::*;
pub use id::*;
pub use import::*;
pub use jardine_shared::recipe::{parse_amount, parse_ingredient, split_steps};
