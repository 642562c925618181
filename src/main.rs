//! Community Frontend Entry Point
//!
//! Likes, inline post editing, modals and scroll reveal for the
//! server-rendered community pages.

mod bindings;
mod config;
mod cookie;
mod dom;
mod editor;
mod error;
mod http;
mod likes;
mod modal;
mod models;
mod reveal;

#[cfg(test)]
mod testing;

use config::AppConfig;
use log::Level;

fn main() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { Level::Debug } else { Level::Info };
    let _ = console_log::init_with_level(level);
    bindings::start(AppConfig::load());
}
