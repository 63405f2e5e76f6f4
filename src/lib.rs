//! Task allocation and workload balancing engine, plus the thin HTTP layer
//! that exposes it.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod middleware;
pub mod models;
pub mod schema;
pub mod state;
pub mod utils;
