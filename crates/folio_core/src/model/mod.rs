//! Domain model shared by the key scheme and content adapters.
//!
//! # Responsibility
//! - Define the content type catalog used as the key scheme's type parameter.
//!
//! # Invariants
//! - The content type set is closed; adding a kind means extending the
//!   `content_types!` declaration.

pub mod content;
