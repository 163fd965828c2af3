// optflow_core/src/lib.rs

// Public modules of the optical-flow state library.
pub mod error;
pub mod gate;
pub mod messages;
pub mod mode;
pub mod prelude;
pub mod roles;
pub mod shared;
pub mod state;
pub mod types;
