//! Attachment extraction service implementation.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{debug, error, info};

use super::error::ExtractionError;
use crate::event::{EventFilter, EventHandler, EventType, NodeResource, RepoEvent};
use crate::mail::{EmailMessage, parse_message};
use crate::repository::{AssociationBody, ContentRepository, NodeBodyCreate};

/// MIME type of an RFC 822 message file.
pub const MIME_RFC822: &str = "message/rfc822";
/// MIME type of an Outlook message file.
pub const MIME_OUTLOOK: &str = "application/vnd.ms-outlook";

/// Extracts attachments from newly created email nodes.
///
/// For each email it creates one folder next to the message, then one
/// content node per attachment inside that folder, linking both back to
/// the message with associations. Nothing is rolled back on failure.
pub struct AttachmentExtractor<R: ContentRepository> {
    repo: Arc<R>,
}

impl<R: ContentRepository> AttachmentExtractor<R> {
    /// Create a new extractor over a repository client.
    #[must_use]
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Events this extractor accepts.
    ///
    /// `(is file AND message/rfc822) OR application/vnd.ms-outlook`: the
    /// file check does not apply to Outlook messages.
    #[must_use]
    pub fn email_filter() -> EventFilter {
        EventFilter::is_file()
            .and(EventFilter::mime_type(MIME_RFC822))
            .or(EventFilter::mime_type(MIME_OUTLOOK))
    }

    /// Run the extraction for one email node.
    ///
    /// Returns the file names of the uploaded attachments in message order.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The node has no primary parent
    /// - Content download fails
    /// - The content is not a well-formed multipart message
    /// - An attachment part has no file name
    /// - Any create, upload or associate call fails
    pub async fn extract(&self, resource: &NodeResource) -> Result<Vec<String>, ExtractionError> {
        let parent_id = resource
            .parent_id()
            .ok_or_else(|| ExtractionError::missing_parent(&resource.id))?;

        info!(node = %resource.name, node_id = %resource.id, "Retrieving content");
        let raw = self
            .repo
            .get_content(&resource.id)
            .await
            .map_err(ExtractionError::Download)?;

        let message = parse_message(&raw)?;
        let subject = message.subject();
        debug!(
            node = %resource.name,
            subject = subject.as_deref().unwrap_or("-"),
            mime_type = message.mime_type(),
            parts = message.part_count(),
            "Message parsed"
        );

        let folder_id = self.create_attachments_folder(resource, parent_id).await?;
        self.create_attachments(&resource.id, &folder_id, &message)
            .await
    }

    /// Create the attachments folder beside the message and link it.
    async fn create_attachments_folder(
        &self,
        resource: &NodeResource,
        parent_id: &str,
    ) -> Result<String, ExtractionError> {
        let body = NodeBodyCreate::folder(strip_extension(&resource.name));
        let folder = self
            .repo
            .create_node(parent_id, &body)
            .await
            .map_err(|e| ExtractionError::repository("create attachments folder", e))?;

        self.repo
            .create_association(&resource.id, &AssociationBody::attachments_folder(&folder.id))
            .await
            .map_err(|e| ExtractionError::repository("link attachments folder", e))?;

        debug!(folder = %body.name, folder_id = %folder.id, "Attachments folder created");
        Ok(folder.id)
    }

    /// Upload every attachment part into the folder, in message order.
    async fn create_attachments(
        &self,
        message_id: &str,
        folder_id: &str,
        message: &EmailMessage<'_>,
    ) -> Result<Vec<String>, ExtractionError> {
        let mut attachments = Vec::new();

        for (index, part) in message.parts().enumerate() {
            if !part.is_attachment() {
                continue;
            }

            let file_name = part
                .file_name()
                .ok_or(ExtractionError::MissingFileName { part: index })?;
            let content = Bytes::from(part.content()?);

            let node = self
                .repo
                .create_node(folder_id, &NodeBodyCreate::content(&file_name))
                .await
                .map_err(|e| ExtractionError::repository("create attachment node", e))?;

            self.repo
                .update_node_content(&node.id, content)
                .await
                .map_err(|e| ExtractionError::repository("upload attachment content", e))?;

            self.repo
                .create_association(message_id, &AssociationBody::attachment(&node.id))
                .await
                .map_err(|e| ExtractionError::repository("link attachment", e))?;

            debug!(file = %file_name, node_id = %node.id, "Attachment uploaded");
            attachments.push(file_name);
        }

        Ok(attachments)
    }
}

impl<R: ContentRepository> EventHandler for AttachmentExtractor<R> {
    fn event_type(&self) -> EventType {
        EventType::NodeCreated
    }

    fn event_filter(&self) -> EventFilter {
        Self::email_filter()
    }

    async fn handle_event(&self, event: &RepoEvent) {
        let resource = event.resource();
        info!(node = %resource.name, event_id = %event.id, "Email content created");

        match self.extract(resource).await {
            Ok(attachments) => {
                info!(
                    node = %resource.name,
                    count = attachments.len(),
                    attachments = ?attachments,
                    "Attachments uploaded"
                );
            }
            Err(e) => {
                error!(node = %resource.name, error = %e, "Failed to extract attachments");
            }
        }
    }
}

/// Drop the file extension: everything from the last `.` after the last
/// path separator.
#[must_use]
pub fn strip_extension(name: &str) -> &str {
    let start = name.rfind(['/', '\\']).map_or(0, |i| i + 1);
    match name[start..].rfind('.') {
        Some(dot) => &name[..start + dot],
        None => name,
    }
}
