mod aggregate;
mod client;
mod import;
mod state;

pub use aggregate::*;
pub use client::*;
