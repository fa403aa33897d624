//! MIME assembly of the final message.
//!
//! Layout of the generated body:
//!
//! ```text
//! multipart/alternative
//! └── multipart/related          (only when images are attached)
//!     ├── text/html
//!     ├── image/png   inline, Content-ID <...>
//!     └── image/jpeg  inline, Content-ID <...>
//! ```
//!
//! Every image part carries an explicit `Content-Disposition: inline` with a
//! filename; some clients (Outlook in particular) show CID images as plain
//! attachments without it.

use mail_builder::headers::content_type::ContentType;
use mail_builder::headers::raw::Raw;
use mail_builder::mime::MimePart;
use mail_builder::MessageBuilder;

use crate::error::{ConvertError, Result};
use crate::model::image::InlineImage;

/// Default `Subject` of generated messages.
pub const DEFAULT_SUBJECT: &str = "HTML Template";

/// Header-level options of the generated message.
#[derive(Debug, Clone)]
pub struct MessageOptions {
    /// Value of the `Subject` header.
    pub subject: String,
    /// Emit `X-Unsent: 1` so Outlook opens the file as an editable draft.
    pub unsent: bool,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            subject: DEFAULT_SUBJECT.to_string(),
            unsent: true,
        }
    }
}

/// Build one inline image part.
fn image_part(image: InlineImage) -> MimePart<'static> {
    let disposition = ContentType::new("inline").attribute("filename", image.filename);
    MimePart::new(image.content_type, image.data)
        .cid(image.content_id)
        .header("Content-Disposition", disposition)
}

/// Build the body tree: the HTML alternative, wrapped in `multipart/related`
/// together with the images when there are any.
pub fn build_body(html: String, images: Vec<InlineImage>) -> MimePart<'static> {
    let html_part = MimePart::new("text/html", html);

    let alternative = if images.is_empty() {
        html_part
    } else {
        let mut related = Vec::with_capacity(images.len() + 1);
        related.push(html_part);
        related.extend(images.into_iter().map(image_part));
        MimePart::new("multipart/related", related)
    };

    MimePart::new("multipart/alternative", vec![alternative])
}

/// Serialize the full message (headers and body) to bytes.
pub fn build_message(
    html: String,
    images: Vec<InlineImage>,
    options: &MessageOptions,
) -> Result<Vec<u8>> {
    let mut builder = MessageBuilder::new().subject(options.subject.clone());
    if options.unsent {
        builder = builder.header("X-Unsent", Raw::new("1"));
    }

    builder
        .body(build_body(html, images))
        .write_to_vec()
        .map_err(ConvertError::Build)
}
