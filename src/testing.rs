//! In-memory `Dom` and `HttpClient` for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeSet, HashMap, VecDeque};

use crate::dom::Dom;
use crate::error::UiError;
use crate::http::{HttpClient, HttpResponse, PostRequest};

#[derive(Debug, Clone, Default)]
pub struct FakeElement {
    pub text: String,
    pub value: Option<String>,
    pub classes: BTreeSet<String>,
    pub attributes: HashMap<String, String>,
    pub styles: HashMap<String, String>,
}

#[derive(Default)]
pub struct FakeDom {
    elements: RefCell<HashMap<String, FakeElement>>,
    pub alerts: RefCell<Vec<String>>,
    pub scroll_locked: Cell<bool>,
}

impl FakeDom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, id: &str) -> Self {
        self.elements.borrow_mut().insert(id.to_string(), FakeElement::default());
        self
    }

    pub fn with_text(self, id: &str, text: &str) -> Self {
        self.elements.borrow_mut().entry(id.to_string()).or_default().text = text.to_string();
        self
    }

    pub fn with_value(self, id: &str, value: &str) -> Self {
        self.elements.borrow_mut().entry(id.to_string()).or_default().value = Some(value.to_string());
        self
    }

    pub fn with_class(self, id: &str, class: &str) -> Self {
        self.elements
            .borrow_mut()
            .entry(id.to_string())
            .or_default()
            .classes
            .insert(class.to_string());
        self
    }

    pub fn element(&self, id: &str) -> Option<FakeElement> {
        self.elements.borrow().get(id).cloned()
    }

    pub fn attribute(&self, id: &str, name: &str) -> Option<String> {
        self.element(id)?.attributes.get(name).cloned()
    }

    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.element(id)?.styles.get(property).cloned()
    }

    fn with_element<T>(&self, id: &str, f: impl FnOnce(&mut FakeElement) -> T) -> Result<T, UiError> {
        self.elements
            .borrow_mut()
            .get_mut(id)
            .map(f)
            .ok_or_else(|| UiError::MissingElement(id.to_string()))
    }
}

impl Dom for FakeDom {
    fn exists(&self, id: &str) -> bool {
        self.elements.borrow().contains_key(id)
    }

    fn text(&self, id: &str) -> Option<String> {
        self.element(id).map(|el| el.text)
    }

    fn set_text(&self, id: &str, text: &str) -> Result<(), UiError> {
        self.with_element(id, |el| el.text = text.to_string())
    }

    fn value(&self, id: &str) -> Option<String> {
        self.element(id)?.value
    }

    fn has_class(&self, id: &str, class: &str) -> bool {
        self.element(id).map(|el| el.classes.contains(class)).unwrap_or(false)
    }

    fn add_class(&self, id: &str, class: &str) -> Result<(), UiError> {
        self.with_element(id, |el| {
            el.classes.insert(class.to_string());
        })
    }

    fn remove_class(&self, id: &str, class: &str) -> Result<(), UiError> {
        self.with_element(id, |el| {
            el.classes.remove(class);
        })
    }

    fn set_attribute(&self, id: &str, name: &str, value: &str) -> Result<(), UiError> {
        self.with_element(id, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        })
    }

    fn set_style(&self, id: &str, property: &str, value: &str) -> Result<(), UiError> {
        self.with_element(id, |el| {
            if value.is_empty() {
                el.styles.remove(property);
            } else {
                el.styles.insert(property.to_string(), value.to_string());
            }
        })
    }

    fn ids_with_class(&self, class: &str) -> Vec<String> {
        let mut ids: Vec<String> = self
            .elements
            .borrow()
            .iter()
            .filter(|(_, el)| el.classes.contains(class))
            .map(|(id, _)| id.clone())
            .collect();
        ids.sort();
        ids
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
    }
}

/// Replays queued responses and records every request
#[derive(Default)]
pub struct FakeHttp {
    responses: RefCell<VecDeque<Result<HttpResponse, UiError>>>,
    pub requests: RefCell<Vec<PostRequest>>,
}

impl FakeHttp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, status: u16, body: &str) -> Self {
        self.responses.borrow_mut().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
        self
    }

    pub fn fail(self, message: &str) -> Self {
        self.responses
            .borrow_mut()
            .push_back(Err(UiError::Transport(message.to_string())));
        self
    }

    pub fn urls(&self) -> Vec<String> {
        self.requests.borrow().iter().map(|r| r.url.clone()).collect()
    }
}

impl HttpClient for FakeHttp {
    async fn post(&self, request: &PostRequest) -> Result<HttpResponse, UiError> {
        self.requests.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(UiError::Transport("no response queued".to_string())))
    }
}
