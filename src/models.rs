//! Frontend Models
//!
//! Wire types exchanged with the community endpoints.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-side post identifier, as embedded in element ids
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostId(pub u64);

impl PostId {
    /// Parse the numeric suffix of an element id like `like_button_42`
    pub fn from_element_id(element_id: &str, prefix: &str) -> Option<Self> {
        element_id
            .strip_prefix(prefix)
            .and_then(|rest| rest.parse().ok())
            .map(PostId)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Body of a like add/remove response
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LikeResponse {
    pub like_count: i64,
}

/// Body of an edit request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EditRequest<'a> {
    pub content: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<&'a str>,
}

/// Body of an edit response: either `{ message }` or `{ error }`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct EditResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}
