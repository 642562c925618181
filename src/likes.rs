//! Like Toggle
//!
//! POSTs to the add/remove endpoint and mirrors the server's count on the
//! page. The UI only changes after a successful response, so failures need
//! no rollback.

use std::cell::Cell;

use crate::config::{Endpoints, IconClasses};
use crate::dom::{ids, Dom};
use crate::error::UiError;
use crate::http::{HttpClient, PostRequest};
use crate::models::{LikeResponse, PostId};

/// Class marking the button and icon of a liked post
pub const LIKED_CLASS: &str = "liked";

/// State confirmed by the server after a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LikeState {
    pub liked: bool,
    pub count: i64,
}

pub struct LikeToggler<'a, H, D> {
    http: &'a H,
    dom: &'a D,
    endpoints: &'a Endpoints,
    icons: IconClasses,
}

impl<'a, H: HttpClient, D: Dom> LikeToggler<'a, H, D> {
    pub fn new(http: &'a H, dom: &'a D, endpoints: &'a Endpoints) -> Self {
        Self {
            http,
            dom,
            endpoints,
            icons: IconClasses::default(),
        }
    }

    pub fn with_icons(mut self, icons: IconClasses) -> Self {
        self.icons = icons;
        self
    }

    /// Toggle `post` away from `liked`, returning the new state
    pub async fn toggle(
        &self,
        post: PostId,
        liked: bool,
        csrf_token: Option<String>,
    ) -> Result<LikeState, UiError> {
        for id in [ids::like_button(post), ids::like_count(post)] {
            if !self.dom.exists(&id) {
                return Err(UiError::MissingElement(id));
            }
        }

        let url = self.endpoints.like_url(post, liked);
        log::debug!("[Likes] POST {}", url);
        let resp = self.http.post(&PostRequest::new(url, csrf_token)).await?;
        if !resp.is_success() {
            return Err(UiError::Status(resp.status));
        }
        let body: LikeResponse = resp.json()?;

        let state = LikeState {
            liked: !liked,
            count: body.like_count,
        };
        self.render(post, state)?;
        Ok(state)
    }

    fn render(&self, post: PostId, state: LikeState) -> Result<(), UiError> {
        let button = ids::like_button(post);
        self.dom.set_text(&ids::like_count(post), &state.count.to_string())?;
        self.dom.set_class(&button, LIKED_CLASS, state.liked)?;
        self.dom.set_attribute(&button, "aria-pressed", if state.liked { "true" } else { "false" })?;

        let icon = ids::like_icon(post);
        if self.dom.exists(&icon) {
            let (add, remove) = if state.liked {
                (&self.icons.on, &self.icons.off)
            } else {
                (&self.icons.off, &self.icons.on)
            };
            self.dom.remove_class(&icon, remove)?;
            self.dom.add_class(&icon, add)?;
            self.dom.set_class(&icon, LIKED_CLASS, state.liked)?;
        }
        Ok(())
    }
}

/// Per-button state: the direction of the next click and whether a request
/// is still pending. Clicks during a pending request are dropped.
#[derive(Debug)]
pub struct LikeButton {
    post: PostId,
    liked: Cell<bool>,
    in_flight: Cell<bool>,
}

impl LikeButton {
    pub fn new(post: PostId, liked: bool) -> Self {
        Self {
            post,
            liked: Cell::new(liked),
            in_flight: Cell::new(false),
        }
    }

    pub fn post(&self) -> PostId {
        self.post
    }

    pub fn liked(&self) -> bool {
        self.liked.get()
    }

    /// Handle one click. `Ok(None)` when ignored because a request is pending.
    pub async fn click<H: HttpClient, D: Dom>(
        &self,
        toggler: &LikeToggler<'_, H, D>,
        csrf_token: Option<String>,
    ) -> Result<Option<LikeState>, UiError> {
        if self.in_flight.replace(true) {
            log::debug!("[Likes] post {} busy, click ignored", self.post);
            return Ok(None);
        }
        let result = toggler.toggle(self.post, self.liked.get(), csrf_token).await;
        self.in_flight.set(false);

        let state = result?;
        self.liked.set(state.liked);
        Ok(Some(state))
    }
}
