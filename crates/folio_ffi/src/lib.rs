//! Flutter-facing FFI surface for Folio core.

pub mod api;
