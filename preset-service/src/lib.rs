//! preset-service: turns song names into guitar amp preset JSON.
//!
//! `POST /` authenticates against a shared secret, asks Gemini for a preset
//! document, and archives the result to a spreadsheet webhook. `GET /`
//! proxies the webhook's history log verbatim.

pub mod config;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
