//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate validation, existence checks and repository calls.
//! - Shape results into the records the transport serializes.
//! - Classify every failure as validation, not-found or storage.

pub mod error;
pub mod exercise_service;
pub mod user_service;
