//! Page Configuration
//!
//! The server may inject `window.COMMUNITY_CONFIG` to override endpoints,
//! reveal rules or on-load classes, and the older
//! `window.COMMUNITY_ENDPOINTS = { likeAdd, likeRemove }` map. Anything
//! missing falls back to the defaults below.

use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::error::UiError;
use crate::models::PostId;

/// Global the server-rendered page sets before loading the bundle
pub const CONFIG_GLOBAL: &str = "COMMUNITY_CONFIG";
/// Endpoint-only global set by the community templates
pub const ENDPOINTS_GLOBAL: &str = "COMMUNITY_ENDPOINTS";

/// Endpoint base paths; the post id and a trailing slash are appended
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoints {
    pub like_add: String,
    pub like_remove: String,
    pub edit: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            like_add: "/like_add".to_string(),
            like_remove: "/like_remove".to_string(),
            edit: "/edit".to_string(),
        }
    }
}

impl Endpoints {
    /// URL for the next like toggle: adding when not yet liked, removing otherwise
    pub fn like_url(&self, post: PostId, liked: bool) -> String {
        let base = if liked { &self.like_remove } else { &self.like_add };
        join(base, post)
    }

    pub fn edit_url(&self, post: PostId) -> String {
        join(&self.edit, post)
    }

    /// Overlay the non-empty fields of `overrides`
    pub fn apply(&mut self, overrides: EndpointOverrides) {
        let set = |slot: &mut String, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                *slot = value;
            }
        };
        set(&mut self.like_add, overrides.like_add);
        set(&mut self.like_remove, overrides.like_remove);
        set(&mut self.edit, overrides.edit);
    }
}

fn join(base: &str, post: PostId) -> String {
    format!("{}/{}/", base.trim_end_matches('/'), post)
}

/// Endpoint fields as injected by the page, snake_case or camelCase
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct EndpointOverrides {
    #[serde(alias = "likeAdd")]
    pub like_add: Option<String>,
    #[serde(alias = "likeRemove")]
    pub like_remove: Option<String>,
    pub edit: Option<String>,
}

impl EndpointOverrides {
    pub fn from_js(value: JsValue) -> Result<Self, UiError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| UiError::Config(e.to_string()))
    }
}

/// One scroll-reveal group
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RevealRule {
    pub selector: String,
    pub class: String,
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_threshold() -> f64 {
    0.1
}

impl RevealRule {
    pub fn new(selector: &str, class: &str, threshold: f64) -> Self {
        Self {
            selector: selector.to_string(),
            class: class.to_string(),
            threshold,
        }
    }

    /// Threshold usable by IntersectionObserver
    pub fn clamped_threshold(&self) -> f64 {
        if self.threshold.is_nan() {
            return default_threshold();
        }
        self.threshold.clamp(0.0, 1.0)
    }
}

/// Class added to every match as soon as the page is bound
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassRule {
    pub selector: String,
    pub class: String,
}

impl ClassRule {
    pub fn new(selector: &str, class: &str) -> Self {
        Self {
            selector: selector.to_string(),
            class: class.to_string(),
        }
    }
}

/// Icon classes swapped when a post is liked or unliked
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct IconClasses {
    pub on: String,
    pub off: String,
}

impl Default for IconClasses {
    fn default() -> Self {
        Self {
            on: "fa-solid".to_string(),
            off: "fa-regular".to_string(),
        }
    }
}

fn default_reveal() -> Vec<RevealRule> {
    vec![
        RevealRule::new(".fade-in, .slide-in-left", "visible", 0.1),
        RevealRule::new(".fade-in-fog", "visible", 0.5),
        RevealRule::new(".class__content", "fade-in-content", 0.5),
    ]
}

fn default_on_load() -> Vec<ClassRule> {
    vec![
        ClassRule::new(".price__card", "price__card-hover"),
        ClassRule::new(".join__grid", "join__grid-hover"),
        ClassRule::new(".explore__card", "explore__card-hover"),
    ]
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(from = "RawConfig")]
pub struct AppConfig {
    pub endpoints: Endpoints,
    pub like_icon: IconClasses,
    pub reveal: Vec<RevealRule>,
    pub on_load: Vec<ClassRule>,
}

/// Wire shape: endpoint keys may also sit at the top level
#[derive(Default, Deserialize)]
#[serde(default)]
struct RawConfig {
    endpoints: EndpointOverrides,
    like_icon: Option<IconClasses>,
    reveal: Option<Vec<RevealRule>>,
    on_load: Option<Vec<ClassRule>>,
    #[serde(flatten)]
    top_level: EndpointOverrides,
}

impl From<RawConfig> for AppConfig {
    fn from(raw: RawConfig) -> Self {
        let mut endpoints = Endpoints::default();
        endpoints.apply(raw.top_level);
        endpoints.apply(raw.endpoints);
        Self {
            endpoints,
            like_icon: raw.like_icon.unwrap_or_default(),
            reveal: raw.reveal.unwrap_or_else(default_reveal),
            on_load: raw.on_load.unwrap_or_else(default_on_load),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        RawConfig::default().into()
    }
}

impl AppConfig {
    /// Parse a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, UiError> {
        serde_json::from_str(json).map_err(|e| UiError::Config(e.to_string()))
    }

    /// Convert the injected JS object
    pub fn from_js(value: JsValue) -> Result<Self, UiError> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value).map_err(|e| UiError::Config(e.to_string()))
    }

    /// Read `window.COMMUNITY_CONFIG` then `window.COMMUNITY_ENDPOINTS`,
    /// falling back to defaults
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let global = |name: &str| js_sys::Reflect::get(&window, &JsValue::from_str(name)).unwrap_or(JsValue::UNDEFINED);

        let mut config = Self::from_js(global(CONFIG_GLOBAL)).unwrap_or_else(|e| {
            log::warn!("[Config] {}, using defaults", e);
            Self::default()
        });
        match EndpointOverrides::from_js(global(ENDPOINTS_GLOBAL)) {
            Ok(overrides) => config.endpoints.apply(overrides),
            Err(e) => log::warn!("[Config] {}: {}", ENDPOINTS_GLOBAL, e),
        }
        config
    }
}
