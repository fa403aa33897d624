//! Convert an HTML folder into a single `.eml` file.
//!
//! The folder holds an `index.html` plus the images it references with
//! relative paths. Local `<img>` sources are rewritten to `cid:` URLs and the
//! files are attached as inline parts of a `multipart/related` body.
//! Remote (`http…`) images are left untouched.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::cid::{ContentIdGenerator, DEFAULT_DOMAIN};
use crate::config::{Config, DEFAULT_INDEX_FILE};
use crate::error::{ConvertError, Result};
use crate::html;
use crate::mime::{self, MessageOptions};
use crate::model::image::InlineImage;

/// Options for a single conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// File name of the HTML document inside the input folder.
    pub index_file: String,
    /// Domain part of generated Content-IDs.
    pub cid_domain: String,
    /// Message headers.
    pub message: MessageOptions,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            index_file: DEFAULT_INDEX_FILE.to_string(),
            cid_domain: DEFAULT_DOMAIN.to_string(),
            message: MessageOptions::default(),
        }
    }
}

impl From<&Config> for ConvertOptions {
    fn from(config: &Config) -> Self {
        Self {
            index_file: config.input.index_file.clone(),
            cid_domain: config.message.cid_domain.clone(),
            message: MessageOptions {
                subject: config.message.subject.clone(),
                unsent: config.message.unsent,
            },
        }
    }
}

/// An image that made it into the message.
#[derive(Debug, Clone, Serialize)]
pub struct AttachedImage {
    /// `src` value as written in the HTML.
    pub source: String,
    /// Disposition filename.
    pub filename: String,
    /// Content-ID referenced from the HTML body.
    pub content_id: String,
    /// Guessed MIME type.
    pub content_type: String,
    /// Size in bytes.
    pub size: u64,
}

/// Outcome of a successful conversion.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    /// Path of the written `.eml` file.
    pub output: PathBuf,
    /// Number of bytes written.
    pub output_size: u64,
    /// Inline images, in document order.
    pub attached: Vec<AttachedImage>,
    /// Local images that could not be attached. Their `cid:` reference is
    /// still present in the HTML body.
    pub missing: Vec<PathBuf>,
    /// Number of remote images left as-is.
    pub remote: usize,
}

/// Build an `.eml` file from `input_dir` and write it to `output`.
///
/// Fails only when the HTML document is missing or when reading it or
/// writing the output fails; no file is written in that case. Missing or
/// unreadable images are logged, listed in
/// [`ConversionReport::missing`], and skipped. An existing `output` is
/// overwritten.
pub fn create_eml(
    input_dir: &Path,
    output: &Path,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let html_path = input_dir.join(&options.index_file);
    if !html_path.is_file() {
        return Err(ConvertError::MissingInput(html_path));
    }

    let source = html::read_html(&html_path)?;
    let mut ids = ContentIdGenerator::new(options.cid_domain.as_str());
    let rewritten = html::rewrite_images(&source, input_dir, || ids.next_id());

    let mut images = Vec::with_capacity(rewritten.images.len());
    let mut attached = Vec::with_capacity(rewritten.images.len());
    let mut missing = Vec::new();

    for image in &rewritten.images {
        if !image.path.exists() {
            tracing::warn!(path = %image.path.display(), "Image not found");
            missing.push(image.path.clone());
            continue;
        }

        match InlineImage::load(image) {
            Ok(inline) => {
                tracing::debug!(
                    file = %inline.filename,
                    cid = %inline.content_id,
                    content_type = %inline.content_type,
                    size = inline.data.len(),
                    "Attaching inline image"
                );
                attached.push(AttachedImage {
                    source: image.source.clone(),
                    filename: inline.filename.clone(),
                    content_id: inline.content_id.clone(),
                    content_type: inline.content_type.clone(),
                    size: inline.data.len() as u64,
                });
                images.push(inline);
            }
            Err(e) => {
                tracing::warn!(path = %image.path.display(), error = %e, "Image unreadable");
                missing.push(image.path.clone());
            }
        }
    }

    let bytes = mime::build_message(rewritten.html, images, &options.message)?;
    std::fs::write(output, &bytes).map_err(|e| ConvertError::io(output, e))?;
    tracing::info!(
        path = %output.display(),
        size = bytes.len(),
        attached = attached.len(),
        missing = missing.len(),
        "Wrote EML"
    );

    Ok(ConversionReport {
        output: output.to_path_buf(),
        output_size: bytes.len() as u64,
        attached,
        missing,
        remote: rewritten.remote,
    })
}
