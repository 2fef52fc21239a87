//! SPADA - school learning-management backend.
//!
//! Every service group (users, courses, grading, attendance, ...) lives in
//! this crate; the `spada` binary mounts the groups listed in
//! `app.services`, and `spada-gateway` forwards requests to the instances
//! that own each path prefix.
//!
//! # Layout
//! - `cache`: object cache plugins (Moka/Redis)
//! - `config`: layered configuration
//! - `entity`: SeaORM entities
//! - `errors`: error types and HTTP mapping
//! - `gateway`: reverse proxy routing
//! - `middlewares`: authentication, role checks, rate limiting
//! - `models`: request/response and domain types
//! - `routes`: HTTP route tables
//! - `runtime`: startup and shutdown
//! - `services`: business logic
//! - `storage`: persistence (SeaORM)
//! - `utils`: helpers

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod gateway;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod utils;
