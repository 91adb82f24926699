//! # Car Doctor Server
//! This crate hosts the HTTP server for the car doctor workshop backend. It is responsible for:
//! * Issuing session tokens on login and attaching them to the response as a cookie.
//! * Verifying those tokens on protected routes and enforcing that callers only read their own order records.
//! * Serving the public service catalog and accepting new orders.
//!
//! ## Configuration
//! The server is configured via environment variables. See [config](config/index.html) for more information.
//!
//! ## Routes
//! * `/health`: liveness probe.
//! * `/`: plain-text welcome banner.
//! * `/jwt`, `/logout`: session issuance and teardown.
//! * `/services`, `/services/{id}`: public catalog reads.
//! * `/orders`: order creation (POST) and the authenticated, ownership-checked order listing (GET).

pub mod auth;
pub mod cli;
pub mod config;
pub mod data_objects;
pub mod errors;
pub mod middleware;
pub mod routes;
pub mod server;

#[cfg(test)]
mod endpoint_tests;
