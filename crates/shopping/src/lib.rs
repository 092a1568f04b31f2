mod aggregation;
mod ambiguous;
mod list;
mod quantity;

pub use aggregation::*;
pub use ambiguous::*;
pub use list::*;
pub use quantity::*;
