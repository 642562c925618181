//! Inline Post Editor
//!
//! Sends the edit modal's fields to the server and patches the post in
//! place on success. One attempt per save click.

use crate::config::Endpoints;
use crate::dom::{ids, Dom};
use crate::error::UiError;
use crate::http::{HttpClient, PostRequest};
use crate::modal::ModalController;
use crate::models::{EditRequest, EditResponse, PostId};

pub const GENERIC_FAILURE: &str = "Something went wrong while updating the post.";
pub const EMPTY_CONTENT: &str = "Post content cannot be empty.";

/// Class hiding the post image until one is set
const HIDDEN_CLASS: &str = "hidden";

#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// Server accepted; the page now shows `content`
    Saved { content: String, message: String },
    /// Rejected with a message meant for the user
    Rejected(String),
    /// Transport or protocol failure, generic message shown
    Failed,
}

pub struct PostEditor<'a, H, D> {
    http: &'a H,
    dom: &'a D,
    endpoints: &'a Endpoints,
}

impl<'a, H: HttpClient, D: Dom> PostEditor<'a, H, D> {
    pub fn new(http: &'a H, dom: &'a D, endpoints: &'a Endpoints) -> Self {
        Self { http, dom, endpoints }
    }

    /// Submit the edit form of `post` and report the result to the user
    pub async fn submit(&self, post: PostId, csrf_token: Option<String>) -> EditOutcome {
        let outcome = match self.send(post, csrf_token).await {
            Ok(outcome) => outcome,
            Err(e) => {
                log::error!("[Editor] post {}: {}", post, e);
                EditOutcome::Failed
            }
        };

        match &outcome {
            EditOutcome::Saved { message, .. } => log::info!("[Editor] post {} saved: {}", post, message),
            EditOutcome::Rejected(msg) => self.dom.alert(msg),
            EditOutcome::Failed => self.dom.alert(GENERIC_FAILURE),
        }
        outcome
    }

    async fn send(&self, post: PostId, csrf_token: Option<String>) -> Result<EditOutcome, UiError> {
        let textarea = ids::textarea(post);
        let raw = self
            .dom
            .value(&textarea)
            .ok_or(UiError::MissingElement(textarea))?;
        let content = raw.trim();
        if content.is_empty() {
            return Ok(EditOutcome::Rejected(EMPTY_CONTENT.to_string()));
        }

        let image_url = self
            .dom
            .value(&ids::image_url(post))
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let body = serde_json::to_string(&EditRequest {
            content,
            image_url: image_url.as_deref(),
        })?;
        let request = PostRequest::new(self.endpoints.edit_url(post), csrf_token).with_json(body);
        let resp = self.http.post(&request).await?;

        match resp.json::<EditResponse>() {
            Ok(EditResponse { error: Some(error), .. }) => Ok(EditOutcome::Rejected(error)),
            _ if !resp.is_success() => Err(UiError::Status(resp.status)),
            Ok(EditResponse { message: Some(message), .. }) => {
                self.apply(post, content, image_url.as_deref());
                Ok(EditOutcome::Saved {
                    content: content.to_string(),
                    message,
                })
            }
            Ok(_) => Err(UiError::Parse("response has neither message nor error".to_string())),
            Err(e) => Err(e),
        }
    }

    /// The server already saved; page patch failures are only logged
    fn apply(&self, post: PostId, content: &str, image_url: Option<&str>) {
        if let Err(e) = self.dom.set_text(&ids::content(post), content) {
            log::warn!("[Editor] {}", e);
        }

        if let Some(url) = image_url {
            let image = ids::post_image(post);
            let result = self
                .dom
                .set_attribute(&image, "src", url)
                .and_then(|_| self.dom.remove_class(&image, HIDDEN_CLASS))
                .and_then(|_| self.dom.set_style(&image, "display", "block"));
            if let Err(e) = result {
                log::warn!("[Editor] {}", e);
            }
        }

        if let Err(e) = ModalController::new(self.dom).close(&ids::edit_modal(post)) {
            log::warn!("[Editor] {}", e);
        }
    }
}
