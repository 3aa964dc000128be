//! CalmJournal backend: journaling API with crisis keyword detection and
//! grounding exercise recommendations.

pub mod actors;
pub mod auth;
pub mod config;
pub mod crisis;
pub mod database;
pub mod error;
pub mod http;
pub mod models;
pub mod prompts;
pub mod telemetry;

#[cfg(test)]
mod tests;
