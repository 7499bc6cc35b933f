//! Judge Ranking Frontend Entry Point

mod models;
mod error;
mod config;
mod ordinal;
mod ranking;
mod sync;
mod store;
mod context;
mod notify;
mod commands;
mod csrf;
mod components;
mod app;

fn main() {
    console_error_panic_hook::set_once();
    app::start();
}
