//! Judge Ranking Frontend App
//!
//! Mounts one ranking ballot into every marked element of the server-rendered
//! page, plus the page-wide toast stack and submit spinner.

use leptos::logging::{error, log};
use leptos::mount::{mount_to, mount_to_body};
use leptos::prelude::*;

use crate::components::{RankingBallot, SubmitSpinner, ToastStack};
use crate::config::{find_ballots, PageConfig};
use crate::context::AppContext;
use crate::csrf::start_csrf_refresher;
use crate::notify::ToastLevel;

/// Page-wide overlay: notifications and the busy spinner
#[component]
pub fn App() -> impl IntoView {
    view! {
        <ToastStack />
        <SubmitSpinner />
    }
}

/// Wire everything up against the current document
pub fn start() {
    let Some(doc) = web_sys::window().and_then(|w| w.document()) else {
        error!("[APP] No document, nothing to mount");
        return;
    };

    let page = PageConfig::from_document(&doc);
    if page.csrf_token.is_none() {
        log!("[APP] No CSRF token in page, waiting for refresh");
    }
    let ctx = AppContext::new(&page);

    mount_to_body(move || {
        provide_context(ctx);
        view! { <App /> }
    });

    let ballots = find_ballots(&doc);
    log!("[APP] Found {} ranking ballot(s)", ballots.len());
    for (el, config) in ballots {
        match config {
            Ok(config) => {
                log!("[APP] Mounting {} ballot with {} entries", config.form_name, config.entries.len());
                el.set_inner_html("");
                mount_to(el, move || {
                    provide_context(ctx);
                    view! { <RankingBallot config=config /> }
                })
                .forget();
            }
            Err(e) => {
                error!("[APP] Skipping ballot: {}", e);
                ctx.notify(ToastLevel::Error, "A ranking form could not be loaded. Please reload the page.");
            }
        }
    }

    start_csrf_refresher(ctx);
}
