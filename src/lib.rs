//! # Callboard API Library
//!
//! This library provides the core functionality for the Callboard API service:
//! casting-code intake, external-actor reconciliation, and the studio-side
//! review surface, including handlers, models, and server configuration.

pub mod auth;
pub mod config;
pub mod conversion;
pub mod db;
pub mod error;
pub mod handlers;
pub mod intake;
pub mod models;
pub mod qr;
pub mod repositories;
pub mod server;
pub mod telemetry;
pub use migration;
