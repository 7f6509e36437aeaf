// Library surface for the session engine, shared by the binary and the
// headless integration tests.
pub mod config;
pub mod corpus;
pub mod error;
pub mod runtime;
pub mod session;
pub mod stats;
pub mod ui;
pub mod window;
pub mod word_generator;

pub use error::{Error, Result};

pub const TICK_RATE_MS: u64 = 100;
