//! Library entry for vitrine exposing the listing engine for the binary and integration tests.

pub mod app;
pub mod config;
pub mod index;
pub mod logic;
pub mod sources;
pub mod state;
pub mod util;
