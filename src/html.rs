//! HTML loading and `<img>` rewriting.
//!
//! The document is parsed into a tree with `kuchikiki` (html5ever), every
//! local `<img src>` is swapped for a `cid:` URL, and the tree is serialized
//! back to text. Traversal is depth-first in document order, which is also
//! the order of the returned [`ImageRef`]s.

use std::path::Path;

use kuchikiki::iter::NodeIterator;
use kuchikiki::traits::TendrilSink;

use crate::error::{ConvertError, Result};
use crate::model::image::ImageRef;

/// Output of [`rewrite_images`].
#[derive(Debug, Clone)]
pub struct RewrittenHtml {
    /// Serialized document with local image sources replaced.
    pub html: String,

    /// Local images in discovery order.
    pub images: Vec<ImageRef>,

    /// Number of `<img>` elements left pointing at a remote URL.
    pub remote: usize,
}

/// Read an HTML file as UTF-8.
///
/// A byte order mark is honoured and stripped; malformed sequences are
/// replaced with U+FFFD instead of failing the conversion.
pub fn read_html(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConvertError::MissingInput(path.to_path_buf())
        } else {
            ConvertError::io(path, e)
        }
    })?;

    let (text, encoding, had_errors) = encoding_rs::UTF_8.decode(&bytes);
    if had_errors {
        tracing::warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "HTML contains invalid byte sequences, replaced"
        );
    }
    Ok(text.into_owned())
}

/// Returns `true` for `src` values that point to a remote resource.
///
/// Anything starting with `http` counts, so both `http://` and `https://`
/// URLs are left alone.
pub fn is_remote(src: &str) -> bool {
    src.starts_with("http")
}

/// Rewrite every local `<img src>` in `html` to a `cid:` reference.
///
/// Empty sources are skipped and remote ones are kept verbatim. Each local
/// source gets a fresh id from `next_cid` and is resolved against
/// `base_dir`. Nothing is read from disk here.
pub fn rewrite_images(
    html: &str,
    base_dir: &Path,
    mut next_cid: impl FnMut() -> String,
) -> RewrittenHtml {
    let document = kuchikiki::parse_html().one(html);
    let mut images = Vec::new();
    let mut remote = 0;

    for img in document
        .descendants()
        .elements()
        .filter(|el| &*el.name.local == "img")
    {
        let mut attrs = img.attributes.borrow_mut();
        let source = match attrs.get("src") {
            Some(src) if !src.is_empty() => src.to_string(),
            _ => continue,
        };

        if is_remote(&source) {
            tracing::debug!(src = %source, "Keeping remote image");
            remote += 1;
            continue;
        }

        let image = ImageRef {
            path: base_dir.join(&source),
            content_id: next_cid(),
            source,
        };
        attrs.insert("src", image.cid_url());
        tracing::debug!(src = %image.source, cid = %image.content_id, "Rewrote local image");
        images.push(image);
    }

    RewrittenHtml {
        html: document.to_string(),
        images,
        remote,
    }
}
