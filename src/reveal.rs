//! Scroll Reveal
//!
//! Adds a class to elements once they scroll into view. One-way: the class
//! is never removed and a revealed element is no longer observed. On-load
//! rules add their class right away.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::config::{ClassRule, RevealRule};
use crate::error::UiError;

/// Slack for ratios reported just under the threshold that triggered the callback
const RATIO_EPSILON: f64 = 1e-3;

/// Reveal bookkeeping for one rule
#[derive(Debug, Clone, PartialEq)]
pub struct RevealTracker {
    threshold: f64,
    pending: usize,
}

impl RevealTracker {
    pub fn new(threshold: f64, pending: usize) -> Self {
        Self { threshold, pending }
    }

    /// Feed one observer entry; `true` means reveal the target and stop watching it
    pub fn observe_entry(&mut self, is_intersecting: bool, ratio: f64) -> bool {
        if self.pending == 0 || !is_intersecting || ratio + RATIO_EPSILON < self.threshold {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Every element revealed; the observer can go
    pub fn is_done(&self) -> bool {
        self.pending == 0
    }
}

/// Elements matching `selector`
pub fn select_all(document: &Document, selector: &str) -> Result<Vec<Element>, UiError> {
    let nodes = document
        .query_selector_all(selector)
        .map_err(|_| UiError::Config(format!("bad selector {:?}", selector)))?;
    Ok((0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect())
}

fn matching(document: &Document, rule: &RevealRule) -> Result<Vec<Element>, UiError> {
    Ok(select_all(document, &rule.selector)?
        .into_iter()
        .filter(|el| !el.class_list().contains(&rule.class))
        .collect())
}

/// Add `rule.class` to every match now; returns how many were marked
pub fn apply_on_load(document: &Document, rule: &ClassRule) -> Result<usize, UiError> {
    let elements = select_all(document, &rule.selector)?;
    for el in &elements {
        let _ = el.class_list().add_1(&rule.class);
    }
    Ok(elements.len())
}

/// Start observing every element matching `rule`; returns how many are watched
pub fn observe(document: &Document, rule: &RevealRule) -> Result<usize, UiError> {
    let elements = matching(document, rule)?;
    if elements.is_empty() {
        return Ok(0);
    }

    let threshold = rule.clamped_threshold();
    let tracker = Rc::new(RefCell::new(RevealTracker::new(threshold, elements.len())));
    let class = rule.class.clone();

    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let reveal = tracker
                    .borrow_mut()
                    .observe_entry(entry.is_intersecting(), entry.intersection_ratio());
                if reveal {
                    let target = entry.target();
                    let _ = target.class_list().add_1(&class);
                    observer.unobserve(&target);
                }
            }
            if tracker.borrow().is_done() {
                observer.disconnect();
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from_f64(threshold));
    let observer = match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
        Ok(observer) => observer,
        Err(e) => {
            // No IntersectionObserver: show everything right away
            log::warn!("[Reveal] observer unavailable ({:?}), revealing {} now", e, rule.selector);
            for el in &elements {
                let _ = el.class_list().add_1(&rule.class);
            }
            return Ok(0);
        }
    };
    for el in &elements {
        observer.observe(el);
    }
    callback.forget();

    log::debug!("[Reveal] watching {} x {}", elements.len(), rule.selector);
    Ok(elements.len())
}
