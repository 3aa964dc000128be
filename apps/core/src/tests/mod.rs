//! Test Module
//!
//! Cross-module test suite for the CalmJournal backend.
//!
//! ## Test Categories
//! - `crisis_tests`: detection properties and end-to-end pipeline scenarios
//! - `database_tests`: CRUD operations for users, journal, mood and crisis interactions
//! - `actor_tests`: crisis recorder against SQLite and failing stores
//! - `integration_tests`: HTTP flows through the axum router

pub mod database_tests;
