//! # SecAware Shared Library
//!
//! Domain types and business logic shared by the SecAware API server.
//!
//! ## Module Organization
//!
//! - `catalog`: Static training modules and assessments
//! - `scoring`: Assessment scoring and the best-attempt rule
//! - `models`: Persisted records (users, progress, feedback)
//! - `store`: Persistence gateway with PostgreSQL and in-memory backends
//! - `db`: Connection pool and migrations

pub mod catalog;
pub mod db;
pub mod models;
pub mod scoring;
pub mod store;
