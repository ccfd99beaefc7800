//! Runtime infrastructure - Tokio runtime bridge for the initialization routine

mod bridge;
mod worker;

pub use bridge::{InitRequest, RuntimeBridge, RuntimeEvent};
pub use worker::{connect_and_init, init_sequence, run_routine};
