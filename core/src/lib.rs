//! Core library for the mallkit tools.
//!
//! # Overview
//! Two independent pieces:
//! - [`grid`]: minimum-cost monotone path sums over a rectangular cost grid
//!   (moves right, down, or diagonally down-right).
//! - [`client`] + [`transport`]: fetch a mall user's record as JSON from the
//!   user-info endpoint.
//!
//! # Design
//! - The grid code is pure; invalid grids fail with `InvalidInputError`.
//! - `UserInfoClient` only builds `HttpRequest` values and parses
//!   `HttpResponse` values (host-does-IO). `transport` performs the
//!   round-trip through the `Transport` trait, so tests can swap the network
//!   for a closure or a local mock server.
//! - Every fetch failure surfaces as a single `UserInfoError` type.

pub mod client;
pub mod config;
pub mod error;
pub mod grid;
pub mod http;
pub mod transport;

pub use client::UserInfoClient;
pub use config::ClientConfig;
pub use error::{ConfigError, InvalidInputError, InvalidInputReason, TransportError, UserInfoError};
pub use grid::{accumulate, min_cost_path, sample_grid, AccumulatorTable, Grid};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use transport::{fetch_user_info, fetch_user_info_with, Transport, UreqTransport};
