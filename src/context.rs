//! Application Context
//!
//! Page-wide signals provided via Leptos Context API.

use gloo_timers::callback::Timeout;
use leptos::prelude::*;

use crate::config::{PageConfig, TOAST_LIFETIME_MS};
use crate::notify::{ToastLevel, ToastQueue};

/// Page-wide state shared by every ballot
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Current anti-forgery token - read
    pub csrf_token: ReadSignal<Option<String>>,
    /// Current anti-forgery token - write
    set_csrf_token: WriteSignal<Option<String>>,
    /// Visible toasts - read
    pub toasts: ReadSignal<ToastQueue>,
    set_toasts: WriteSignal<ToastQueue>,
    /// Number of final submissions in flight (spinner shown while > 0)
    pub busy: ReadSignal<u32>,
    set_busy: WriteSignal<u32>,
    /// Where fresh tokens come from
    pub refresh_url: StoredValue<String>,
}

impl AppContext {
    pub fn new(page: &PageConfig) -> Self {
        let (csrf_token, set_csrf_token) = signal(page.csrf_token.clone());
        let (toasts, set_toasts) = signal(ToastQueue::default());
        let (busy, set_busy) = signal(0u32);
        Self {
            csrf_token,
            set_csrf_token,
            toasts,
            set_toasts,
            busy,
            set_busy,
            refresh_url: StoredValue::new(page.refresh_csrf_url()),
        }
    }

    /// Token for a request about to be sent; empty when none is known
    pub fn csrf_token_now(&self) -> String {
        self.csrf_token.get_untracked().unwrap_or_default()
    }

    pub fn set_csrf_token(&self, token: String) {
        self.set_csrf_token.set(Some(token));
    }

    /// Show a transient notification that dismisses itself
    pub fn notify(&self, level: ToastLevel, message: impl Into<String>) {
        let mut id = None;
        self.set_toasts.update(|q| id = q.push(level, message));
        if let Some(id) = id {
            let set_toasts = self.set_toasts;
            Timeout::new(TOAST_LIFETIME_MS, move || {
                set_toasts.update(|q| q.dismiss(id));
            })
            .forget();
        }
    }

    pub fn dismiss(&self, id: u32) {
        self.set_toasts.update(|q| q.dismiss(id));
    }

    pub fn begin_busy(&self) {
        self.set_busy.update(|n| *n += 1);
    }

    pub fn end_busy(&self) {
        self.set_busy.update(|n| *n = n.saturating_sub(1));
    }
}
