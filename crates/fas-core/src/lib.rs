//! Case management backend for financial assistance schemes.
//!
//! The [`assistance`] module holds the domain model, the eligibility engine and
//! the service/router layers built on top of it. [`config`], [`telemetry`] and
//! [`error`] carry the ambient concerns shared with the `fas-api` binary.

pub mod assistance;
pub mod config;
pub mod error;
pub mod telemetry;
