#![allow(warnings)]
//! Recipe Box Frontend Entry Point

mod app;
mod commands;
mod components;
mod context;
mod markdown;
mod routing;
mod store;

use app::App;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();
    let logs = match rolling_logger::init_logger("RecipeBox", rolling_logger::DEFAULT_CAPACITY) {
        Ok(buffer) => buffer,
        Err(e) => {
            web_sys::console::warn_1(&format!("[APP] logger not installed: {}", e).into());
            rolling_logger::LogBuffer::new(rolling_logger::DEFAULT_CAPACITY)
        }
    };
    mount_to_body(move || view! { <App logs=logs.clone() /> });
}
