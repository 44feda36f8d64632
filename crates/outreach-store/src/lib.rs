//! Outreach Store - In-memory mock persistence layer
//!
//! This crate provides the simulated backend for Outreach: entity models,
//! a generic in-memory store seeded from static JSON fixtures, and thin
//! per-entity services with artificial latency. Nothing persists beyond
//! process memory.

pub mod fixtures;
pub mod models;
pub mod service;
pub mod store;

pub use fixtures::Stores;
pub use models::*;
pub use service::*;
pub use store::{Latency, Store};
