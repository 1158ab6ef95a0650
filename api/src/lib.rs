//! # Account API
//!
//! actix-web HTTP surface of the account service: routes, request DTOs,
//! authentication and timeout middleware, and telemetry bootstrap.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod telemetry;
