//! `html2eml` — turn an HTML folder into a self-contained `.eml` message.
//!
//! This crate provides the core library for rewriting local `<img>` sources
//! to `cid:` references and assembling a MIME message with the images
//! attached inline.

pub mod cid;
pub mod config;
pub mod error;
pub mod export;
pub mod html;
pub mod i18n;
pub mod mime;
pub mod model;

pub use error::{ConfigError, ConvertError, Result};
pub use export::eml::{create_eml, ConversionReport, ConvertOptions};
