//! Core modules for Motion Lab

pub mod api;
pub mod engine;
pub mod policy;

pub use api::{create_router, run_server};
pub use engine::{EngineTuning, MotionEngine};
pub use policy::MotionPolicy;
