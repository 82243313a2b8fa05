//! Mail decomposition on top of `mailparse`.

mod error;
mod message;

pub use error::MailError;
pub use mailparse::DispositionType;
pub use message::{BodyPart, EmailMessage, parse_message};
