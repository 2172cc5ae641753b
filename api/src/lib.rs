//! # OTP API
//!
//! Actix-web service exposing phone one-time passcode authentication:
//! rate-limited code requests, verification with JWT issuance, and
//! protected user lookups.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;

pub use app::{configure, create_app, AppState};
