//! Integration test utilities for the chat client core
//!
//! This crate provides helpers for driving the store, services and replay
//! binary together in end-to-end tests.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
