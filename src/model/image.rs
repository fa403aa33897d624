//! Image references found in the HTML and the inline parts built from them.

use std::path::{Path, PathBuf};

/// Fallback MIME type when the file extension is unknown.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A local `<img>` reference discovered while rewriting the HTML.
///
/// Lives for one conversion run only. The `src` attribute of the element has
/// already been replaced with `cid:{content_id}` when this is produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRef {
    /// Original `src` attribute value, as written in the HTML.
    pub source: String,

    /// `source` resolved against the input folder.
    pub path: PathBuf,

    /// Content-ID assigned to this reference (without angle brackets).
    pub content_id: String,
}

impl ImageRef {
    /// The value written into the rewritten `src` attribute.
    pub fn cid_url(&self) -> String {
        format!("cid:{}", self.content_id)
    }
}

/// An image loaded from disk, ready to become an inline MIME part.
#[derive(Debug, Clone)]
pub struct InlineImage {
    /// Content-ID matching a `cid:` reference in the HTML body.
    pub content_id: String,

    /// Base name of the source file, used as the disposition filename.
    pub filename: String,

    /// MIME content type guessed from the filename (e.g. `"image/png"`).
    pub content_type: String,

    /// Raw file bytes.
    pub data: Vec<u8>,
}

impl InlineImage {
    /// Read the file behind `image` and guess its content type.
    pub fn load(image: &ImageRef) -> std::io::Result<Self> {
        let data = std::fs::read(&image.path)?;
        Ok(Self {
            content_id: image.content_id.clone(),
            filename: file_name(&image.path),
            content_type: guess_content_type(&image.path),
            data,
        })
    }
}

/// Guess a MIME type from the file extension, falling back to
/// `application/octet-stream`.
pub fn guess_content_type(path: &Path) -> String {
    mime_guess::from_path(path)
        .first()
        .map(|m| m.essence_str().to_string())
        .unwrap_or_else(|| OCTET_STREAM.to_string())
}

/// Base name of `path`, or `"image"` when it has none.
fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        assert_eq!(guess_content_type(Path::new("img/logo.png")), "image/png");
        assert_eq!(guess_content_type(Path::new("photo.JPG")), "image/jpeg");
        assert_eq!(guess_content_type(Path::new("anim.gif")), "image/gif");
        assert_eq!(guess_content_type(Path::new("icon.svg")), "image/svg+xml");
    }

    #[test]
    fn test_guess_content_type_fallback() {
        assert_eq!(guess_content_type(Path::new("blob.zzunknown")), OCTET_STREAM);
        assert_eq!(guess_content_type(Path::new("no_extension")), OCTET_STREAM);
    }

    #[test]
    fn test_cid_url() {
        let image = ImageRef {
            source: "img/a.png".into(),
            path: PathBuf::from("/tmp/mail/img/a.png"),
            content_id: "abc@img".into(),
        };
        assert_eq!(image.cid_url(), "cid:abc@img");
    }

    #[test]
    fn test_load_reads_bytes_and_name() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("logo.png");
        std::fs::write(&path, [0x89, b'P', b'N', b'G']).unwrap();

        let image = ImageRef {
            source: "logo.png".into(),
            path,
            content_id: "x@img".into(),
        };
        let loaded = InlineImage::load(&image).unwrap();
        assert_eq!(loaded.filename, "logo.png");
        assert_eq!(loaded.content_type, "image/png");
        assert_eq!(loaded.data, vec![0x89, b'P', b'N', b'G']);
        assert_eq!(loaded.content_id, "x@img");
    }

    #[test]
    fn test_load_missing_file() {
        let image = ImageRef {
            source: "nope.png".into(),
            path: PathBuf::from("/definitely/not/here/nope.png"),
            content_id: "x@img".into(),
        };
        assert!(InlineImage::load(&image).is_err());
    }
}
