//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate cache and adapter calls into use-case level APIs.
//! - Keep UI/FFI layers decoupled from adapter details.

pub mod content_service;
