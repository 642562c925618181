//! DOM Access
//!
//! Everything the handlers touch on the page goes through `Dom`, addressed
//! by element id. `BrowserDom` is the real document.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlTextAreaElement};

use crate::error::UiError;

/// Element id conventions of the server templates
pub mod ids {
    use crate::models::PostId;

    pub const LIKE_BUTTON_PREFIX: &str = "like_button_";

    pub fn like_button(post: PostId) -> String {
        format!("{}{}", LIKE_BUTTON_PREFIX, post)
    }

    pub fn like_icon(post: PostId) -> String {
        format!("like_icon_{}", post)
    }

    pub fn like_count(post: PostId) -> String {
        format!("like_count_{}", post)
    }

    pub fn textarea(post: PostId) -> String {
        format!("textarea_{}", post)
    }

    pub fn image_url(post: PostId) -> String {
        format!("image_url_{}", post)
    }

    pub fn content(post: PostId) -> String {
        format!("content_{}", post)
    }

    pub fn post_image(post: PostId) -> String {
        format!("post_image_{}", post)
    }

    pub fn edit_modal(post: PostId) -> String {
        format!("modal_edit_post_{}", post)
    }
}

pub trait Dom {
    fn exists(&self, id: &str) -> bool;
    fn text(&self, id: &str) -> Option<String>;
    fn set_text(&self, id: &str, text: &str) -> Result<(), UiError>;
    /// Current value of an `<input>` or `<textarea>`
    fn value(&self, id: &str) -> Option<String>;
    fn has_class(&self, id: &str, class: &str) -> bool;
    fn add_class(&self, id: &str, class: &str) -> Result<(), UiError>;
    fn remove_class(&self, id: &str, class: &str) -> Result<(), UiError>;
    fn set_attribute(&self, id: &str, name: &str, value: &str) -> Result<(), UiError>;
    /// Inline style property; an empty value clears it
    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<(), UiError>;
    /// Ids of all elements currently carrying `class`
    fn ids_with_class(&self, class: &str) -> Vec<String>;
    /// Blocking message to the user
    fn alert(&self, message: &str);
    fn set_scroll_locked(&self, locked: bool);

    fn set_class(&self, id: &str, class: &str, on: bool) -> Result<(), UiError> {
        if on {
            self.add_class(id, class)
        } else {
            self.remove_class(id, class)
        }
    }
}

fn dom_err(e: wasm_bindgen::JsValue) -> UiError {
    UiError::Dom(format!("{:?}", e))
}

/// `Dom` over the live document
#[derive(Clone)]
pub struct BrowserDom {
    document: Document,
}

impl BrowserDom {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Document of the current window
    pub fn current() -> Option<Self> {
        web_sys::window()?.document().map(Self::new)
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    fn element(&self, id: &str) -> Result<Element, UiError> {
        self.document
            .get_element_by_id(id)
            .ok_or_else(|| UiError::MissingElement(id.to_string()))
    }
}

impl Dom for BrowserDom {
    fn exists(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn text(&self, id: &str) -> Option<String> {
        self.element(id).ok()?.text_content()
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), UiError> {
        self.element(id)?.set_text_content(Some(text));
        Ok(())
    }

    fn value(&self, id: &str) -> Option<String> {
        let el = self.element(id).ok()?;
        if let Some(area) = el.dyn_ref::<HtmlTextAreaElement>() {
            return Some(area.value());
        }
        el.dyn_ref::<HtmlInputElement>().map(|input| input.value())
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id)
            .map(|el| el.class_list().contains(class))
            .unwrap_or(false)
    }

    fn add_class(&self, id: &str, class: &str) -> Result<(), UiError> {
        self.element(id)?
            .class_list()
            .add_1(class)
            .map_err(dom_err)
    }

    fn remove_class(&self, id: &str, class: &str) -> Result<(), UiError> {
        self.element(id)?
            .class_list()
            .remove_1(class)
            .map_err(dom_err)
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> Result<(), UiError> {
        self.element(id)?
            .set_attribute(name, value)
            .map_err(dom_err)
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<(), UiError> {
        let el = self.element(id)?;
        let el = el
            .dyn_ref::<HtmlElement>()
            .ok_or_else(|| UiError::Dom(format!("#{} is not an html element", id)))?;
        el.style().set_property(property, value).map_err(dom_err)
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        let Ok(nodes) = self.document.query_selector_all(&format!(".{}", class)) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .map(|el| el.id())
            .filter(|id| !id.is_empty())
            .collect()
    }

    fn alert(&self, message: &str) {
        if let Some(win) = web_sys::window() {
            let _ = win.alert_with_message(message);
        }
    }

    fn set_scroll_locked(&self, locked: bool) {
        if let Some(body) = self.document.body() {
            let _ = body.style().set_property("overflow", if locked { "hidden" } else { "" });
        }
    }
}
