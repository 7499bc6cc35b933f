//! CSRF Refresher
//!
//! Keeps the page token fresh: once on load, then every 15 minutes.

use gloo_timers::future::TimeoutFuture;
use leptos::logging::{error, log};
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::commands;
use crate::config::{write_meta, CSRF_META, CSRF_REFRESH_INTERVAL_MS};
use crate::context::AppContext;

pub fn start_csrf_refresher(ctx: AppContext) {
    spawn_local(async move {
        loop {
            refresh_once(&ctx).await;
            TimeoutFuture::new(CSRF_REFRESH_INTERVAL_MS).await;
        }
    });
}

/// A failed refresh keeps the previous token in place
async fn refresh_once(ctx: &AppContext) {
    let url = ctx.refresh_url.get_value();
    match commands::refresh_csrf(&url).await {
        Ok(token) => {
            if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
                if let Err(e) = write_meta(&doc, CSRF_META, &token) {
                    error!("[CSRF] Could not update meta tag: {}", e);
                }
            }
            ctx.set_csrf_token(token);
            log!("[CSRF] Token refreshed");
        }
        Err(e) => error!("[CSRF] Refresh failed: {}", e),
    }
}
