//! Background Tasks Module
//!
//! # Tasks
//! - Cache sweep: removes expired entries from every cache domain at a fixed interval

mod sweep;

pub use sweep::spawn_sweep_task;
