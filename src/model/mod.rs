//! Core data model types for image references and inline parts.

pub mod image;
