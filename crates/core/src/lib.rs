//! Domain logic for the taskhub service.
//!
//! This crate has no internal dependencies so it can be used by both the
//! repository layer and the API layer:
//!
//! - [`types`] -- shared ID and timestamp aliases.
//! - [`error`] -- the closed set of domain error kinds.
//! - [`validation`] -- input validation rules for identities, projects, and tasks.
//! - [`progress`] -- derived progress aggregates and overdue computation.
//! - [`pagination`] -- limit/offset clamping helpers.

pub mod error;
pub mod pagination;
pub mod progress;
pub mod types;
pub mod validation;
