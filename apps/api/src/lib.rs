//! Moodmeter API server library.
//!
//! Exposes the spectrum engine, the composer state machine, entry storage
//! and the HTTP routes so the binary and integration tests share them.

pub mod analysis;
pub mod calendar;
pub mod composer;
pub mod config;
pub mod db;
pub mod entries;
pub mod errors;
pub mod extract;
pub mod llm_client;
pub mod models;
pub mod routes;
pub mod spectrum;
pub mod state;
