mod coordinator;
mod debounce;
mod root;
mod service;

pub use coordinator::*;
pub use debounce::*;
pub use root::*;
pub use service::*;
