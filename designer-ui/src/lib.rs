pub mod api;
pub mod components;
pub mod interop;
pub mod styles;

pub use api::*;
pub use components::*;
pub use interop::*;
