//! Page Bindings
//!
//! Scans the server-rendered page and attaches the handlers.

use std::rc::Rc;

use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, EventTarget, KeyboardEvent};

use crate::config::AppConfig;
use crate::cookie::csrf_token;
use crate::dom::{ids, BrowserDom};
use crate::editor::PostEditor;
use crate::error::UiError;
use crate::http::FetchClient;
use crate::likes::{LikeButton, LikeToggler, LIKED_CLASS};
use crate::modal::{ModalController, MODAL_CLASS};
use crate::models::PostId;
use crate::reveal;

/// Everything a handler needs, shared by all listeners
pub struct Page {
    pub http: FetchClient,
    pub dom: BrowserDom,
    pub config: AppConfig,
}

/// Attach `f` to `event` on `target` for the lifetime of the page
fn listen(target: &EventTarget, event: &str, f: impl FnMut(Event) + 'static) {
    let cb = Closure::<dyn FnMut(Event)>::new(f);
    if let Err(e) = target.add_event_listener_with_callback(event, cb.as_ref().unchecked_ref()) {
        log::warn!("[Bind] {} listener: {:?}", event, e);
    }
    cb.forget();
}

impl Page {
    pub fn new(dom: BrowserDom, config: AppConfig) -> Self {
        Self {
            http: FetchClient,
            dom,
            config,
        }
    }
}

fn select(page: &Page, selector: &str) -> Vec<Element> {
    reveal::select_all(page.dom.document(), selector).unwrap_or_else(|e| {
        log::warn!("[Bind] {}", e);
        Vec::new()
    })
}

fn attr_post_id(el: &Element, attr: &str) -> Option<PostId> {
    el.get_attribute(attr)?.trim().parse().ok().map(PostId)
}

/// Like buttons on the page; a server-rendered `liked` class marks the initial state
fn like_buttons(page: &Page) -> Vec<(Element, LikeButton)> {
    select(page, &format!("[id^='{}']", ids::LIKE_BUTTON_PREFIX))
        .into_iter()
        .filter_map(|el| {
            let post = PostId::from_element_id(&el.id(), ids::LIKE_BUTTON_PREFIX)?;
            let liked = el.class_list().contains(LIKED_CLASS);
            Some((el, LikeButton::new(post, liked)))
        })
        .collect()
}

fn bind_likes(page: &Rc<Page>) -> usize {
    let mut bound = 0;
    for (el, button) in like_buttons(page) {
        let post = button.post();
        let button = Rc::new(button);
        let page = Rc::clone(page);
        listen(&el, "click", move |ev| {
            ev.prevent_default();
            let page = Rc::clone(&page);
            let button = Rc::clone(&button);
            spawn_local(async move {
                let toggler = LikeToggler::new(&page.http, &page.dom, &page.config.endpoints)
                    .with_icons(page.config.like_icon.clone());
                match button.click(&toggler, csrf_token()).await {
                    Ok(Some(state)) => log::debug!("[Likes] post {} liked={} count={}", post, state.liked, state.count),
                    Ok(None) => {}
                    Err(e) => log::error!("[Likes] post {}: {}", post, e),
                }
            });
        });
        bound += 1;
    }
    bound
}

/// Save buttons and the post each one submits
fn edit_triggers(page: &Page) -> Vec<(Element, PostId)> {
    select(page, "[data-edit-post]")
        .into_iter()
        .filter_map(|el| match attr_post_id(&el, "data-edit-post") {
            Some(post) => Some((el, post)),
            None => {
                log::warn!("[Bind] bad data-edit-post on #{}", el.id());
                None
            }
        })
        .collect()
}

fn bind_editors(page: &Rc<Page>) -> usize {
    let mut bound = 0;
    for (el, post) in edit_triggers(page) {
        let page = Rc::clone(page);
        listen(&el, "click", move |ev| {
            ev.prevent_default();
            let page = Rc::clone(&page);
            spawn_local(async move {
                let editor = PostEditor::new(&page.http, &page.dom, &page.config.endpoints);
                editor.submit(post, csrf_token()).await;
            });
        });
        bound += 1;
    }
    bound
}

fn bind_modals(page: &Rc<Page>) {
    for el in select(page, "[data-open-modal]") {
        let Some(modal_id) = el.get_attribute("data-open-modal") else {
            continue;
        };
        let page = Rc::clone(page);
        listen(&el, "click", move |ev| {
            ev.prevent_default();
            if let Err(e) = ModalController::new(&page.dom).open(&modal_id) {
                log::error!("[Modal] {}", e);
            }
        });
    }

    for el in select(page, "[data-close-modal]") {
        let page = Rc::clone(page);
        let trigger = el.clone();
        listen(&el, "click", move |ev| {
            ev.prevent_default();
            let modal = trigger.closest(&format!(".{}", MODAL_CLASS)).ok().flatten();
            match modal.map(|m| m.id()).filter(|id| !id.is_empty()) {
                Some(id) => {
                    if let Err(e) = ModalController::new(&page.dom).close(&id) {
                        log::error!("[Modal] {}", e);
                    }
                }
                None => log::warn!("[Modal] close button outside a modal"),
            }
        });
    }

    let document: &EventTarget = page.dom.document().as_ref();

    let keys = Rc::clone(page);
    listen(document, "keydown", move |ev| {
        if let Some(key) = ev.dyn_ref::<KeyboardEvent>().map(|k| k.key()) {
            ModalController::new(&keys.dom).on_key(&key);
        }
    });

    let clicks = Rc::clone(page);
    listen(document, "click", move |ev| {
        let target_id = ev
            .target()
            .and_then(|t| t.dyn_into::<Element>().ok())
            .map(|el| el.id())
            .unwrap_or_default();
        ModalController::new(&clicks.dom).on_click(&target_id);
    });
}

fn bind_on_load(page: &Page) {
    for rule in &page.config.on_load {
        if let Err(e) = reveal::apply_on_load(page.dom.document(), rule) {
            log::error!("[Bind] {}", e);
        }
    }
}

fn bind_reveal(page: &Page) {
    for rule in &page.config.reveal {
        if let Err(e) = reveal::observe(page.dom.document(), rule) {
            log::error!("[Reveal] {}", e);
        }
    }
}

/// Bind every handler on the current document
pub fn bind_page(config: AppConfig) -> Result<(), UiError> {
    let dom = BrowserDom::current().ok_or_else(|| UiError::MissingElement("document".to_string()))?;
    let page = Rc::new(Page::new(dom, config));

    let likes = bind_likes(&page);
    let editors = bind_editors(&page);
    bind_modals(&page);
    bind_on_load(&page);
    bind_reveal(&page);

    log::info!("[Bind] {} like buttons, {} editors", likes, editors);
    Ok(())
}

/// Bind now, or once the document finishes parsing if the bundle loaded early
pub fn start(config: AppConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        log::error!("[Bind] no document");
        return;
    };
    if document.ready_state() != "loading" {
        if let Err(e) = bind_page(config) {
            log::error!("[Bind] {}", e);
        }
        return;
    }

    let mut config = Some(config);
    listen(document.as_ref(), "DOMContentLoaded", move |_| {
        if let Some(config) = config.take() {
            if let Err(e) = bind_page(config) {
                log::error!("[Bind] {}", e);
            }
        }
    });
}

#[cfg(all(test, target_arch = "wasm32"))]
mod browser_tests {
    use super::*;
    use crate::dom::Dom;
    use crate::modal::OPEN_CLASS;
    use gloo_timers::future::TimeoutFuture;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, KeyboardEventInit};

    wasm_bindgen_test_configure!(run_in_browser);

    fn page_with(html: &str) -> Page {
        let dom = BrowserDom::current().unwrap();
        dom.document().body().unwrap().set_inner_html(html);
        Page::new(dom, AppConfig::default())
    }

    fn click(page: &Page, id: &str) {
        page.dom
            .document()
            .get_element_by_id(id)
            .unwrap()
            .dyn_into::<HtmlElement>()
            .unwrap()
            .click();
    }

    fn press(page: &Page, key: &str) {
        let init = KeyboardEventInit::new();
        init.set_key(key);
        init.set_bubbles(true);
        let ev = KeyboardEvent::new_with_keyboard_event_init_dict("keydown", &init).unwrap();
        page.dom.document().dispatch_event(&ev).unwrap();
    }

    fn is_open(page: &Page, id: &str) -> bool {
        page.dom.has_class(id, OPEN_CLASS)
    }

    #[wasm_bindgen_test]
    fn test_like_buttons_read_initial_state() {
        let page = page_with(
            r#"<button id="like_button_1" class="like liked"></button>
               <button id="like_button_2" class="like"></button>
               <button id="like_button_x"></button>"#,
        );

        let found: Vec<(PostId, bool)> = like_buttons(&page)
            .iter()
            .map(|(_, button)| (button.post(), button.liked()))
            .collect();
        assert_eq!(found, vec![(PostId(1), true), (PostId(2), false)]);
    }

    #[wasm_bindgen_test]
    fn test_edit_triggers_resolve_post() {
        let page = page_with(
            r#"<button id="save_7" data-edit-post="7">Save</button>
               <button id="save_bad" data-edit-post="abc">Save</button>"#,
        );

        let found: Vec<(String, PostId)> = edit_triggers(&page)
            .into_iter()
            .map(|(el, post)| (el.id(), post))
            .collect();
        assert_eq!(found, vec![("save_7".to_string(), PostId(7))]);
    }

    #[wasm_bindgen_test]
    fn test_modal_wiring() {
        let page = page_with(
            r#"<button id="open_7" data-open-modal="modal_edit_post_7">Edit</button>
               <div id="modal_edit_post_7" class="custom-modal">
                 <div id="modal_body_7"><button id="close_7" data-close-modal>x</button></div>
               </div>"#,
        );
        bind_page(AppConfig::default()).unwrap();
        let modal = "modal_edit_post_7";

        click(&page, "open_7");
        assert!(is_open(&page, modal));
        let body = page.dom.document().body().unwrap();
        assert_eq!(body.style().get_property_value("overflow").unwrap(), "hidden");

        click(&page, "close_7");
        assert!(!is_open(&page, modal));
        assert_eq!(body.style().get_property_value("overflow").unwrap(), "");

        // clicks inside the content keep it open, Escape closes
        click(&page, "open_7");
        click(&page, "modal_body_7");
        assert!(is_open(&page, modal));
        press(&page, "Enter");
        assert!(is_open(&page, modal));
        press(&page, "Escape");
        assert!(!is_open(&page, modal));

        // backdrop click
        click(&page, "open_7");
        click(&page, modal);
        assert!(!is_open(&page, modal));
    }

    #[wasm_bindgen_test]
    async fn test_bind_page_applies_classes() {
        let page = page_with(
            r#"<div id="card" class="price__card">a</div>
               <div id="grid" class="join__grid">b</div>
               <div id="intro" class="fade-in" style="height:40px">c</div>"#,
        );
        bind_page(AppConfig::default()).unwrap();

        assert!(page.dom.has_class("card", "price__card-hover"));
        assert!(page.dom.has_class("grid", "join__grid-hover"));

        TimeoutFuture::new(200).await;
        assert!(page.dom.has_class("intro", "visible"));
    }
}
