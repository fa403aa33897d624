//! Export functionality: HTML folder to EML.

pub mod eml;
