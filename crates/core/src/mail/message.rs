//! Parsed message view over the raw bytes.

use mailparse::{DispositionType, MailHeaderMap, ParsedMail};

use super::error::MailError;

/// A parsed multipart message.
///
/// Borrows the raw bytes it was parsed from; parts are views into them.
pub struct EmailMessage<'a> {
    mail: ParsedMail<'a>,
}

/// Parse raw message bytes.
///
/// Parsing is local only: no mail session, no network access.
///
/// # Errors
///
/// Returns [`MailError::Parse`] for unparseable input,
/// [`MailError::NotMultipart`] when the top-level entity is not a
/// `multipart/*` container, and [`MailError::MalformedMultipart`] when the
/// container has no boundary or no part delimited by it.
pub fn parse_message(raw: &[u8]) -> Result<EmailMessage<'_>, MailError> {
    let mail = mailparse::parse_mail(raw)?;
    if !mail.ctype.mimetype.starts_with("multipart/") {
        return Err(MailError::not_multipart(mail.ctype.mimetype));
    }
    if !mail.ctype.params.contains_key("boundary") {
        return Err(MailError::malformed("missing boundary parameter"));
    }
    if mail.subparts.is_empty() {
        return Err(MailError::malformed("no body part found at the boundary"));
    }
    Ok(EmailMessage { mail })
}

impl EmailMessage<'_> {
    /// Content type of the top-level container.
    #[must_use]
    pub fn mime_type(&self) -> &str {
        &self.mail.ctype.mimetype
    }

    /// Subject header, if present.
    #[must_use]
    pub fn subject(&self) -> Option<String> {
        self.mail.get_headers().get_first_value("Subject")
    }

    /// Number of direct body parts.
    #[must_use]
    pub fn part_count(&self) -> usize {
        self.mail.subparts.len()
    }

    /// Direct body parts of the top-level container, in message order.
    pub fn parts(&self) -> impl ExactSizeIterator<Item = BodyPart<'_>> {
        self.mail.subparts.iter().map(|part| BodyPart { part })
    }
}

/// One body part of an [`EmailMessage`].
#[derive(Clone, Copy)]
pub struct BodyPart<'a> {
    part: &'a ParsedMail<'a>,
}

impl<'a> BodyPart<'a> {
    /// Disposition type from `Content-Disposition`; `None` without the header.
    #[must_use]
    pub fn disposition(&self) -> Option<DispositionType> {
        self.part
            .get_headers()
            .get_first_value("Content-Disposition")
            .map(|_| self.part.get_content_disposition().disposition)
    }

    /// Whether the part is disposed as an attachment (case-insensitive).
    #[must_use]
    pub fn is_attachment(&self) -> bool {
        self.part.get_content_disposition().disposition == DispositionType::Attachment
    }

    /// File name from the disposition's `filename`, else the content
    /// type's `name` parameter.
    #[must_use]
    pub fn file_name(&self) -> Option<String> {
        self.part
            .get_content_disposition()
            .params
            .get("filename")
            .or_else(|| self.part.ctype.params.get("name"))
            .filter(|name| !name.is_empty())
            .cloned()
    }

    /// Content type of the part.
    #[must_use]
    pub fn mime_type(&self) -> &'a str {
        &self.part.ctype.mimetype
    }

    /// Part body with its transfer encoding removed.
    ///
    /// # Errors
    ///
    /// Returns [`MailError::Body`] if the body cannot be decoded.
    pub fn content(&self) -> Result<Vec<u8>, MailError> {
        self.part
            .get_body_raw()
            .map_err(|e| MailError::Body(e.to_string()))
    }
}
