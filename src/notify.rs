//! Notifications
//!
//! Transient toasts for soft failures and warnings, blocking alerts for
//! failures the judge must acknowledge.

use leptos::logging::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

impl ToastLevel {
    pub fn css_class(&self) -> &'static str {
        match self {
            ToastLevel::Info => "toast info",
            ToastLevel::Warning => "toast warning",
            ToastLevel::Error => "toast error",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub id: u32,
    pub level: ToastLevel,
    pub message: String,
}

/// Visible toasts, oldest first
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToastQueue {
    next_id: u32,
    items: Vec<Toast>,
}

/// Oldest toasts are dropped beyond this
const MAX_VISIBLE: usize = 5;

impl ToastQueue {
    /// Add a toast and return its id. An identical message already on
    /// screen is not repeated.
    pub fn push(&mut self, level: ToastLevel, message: impl Into<String>) -> Option<u32> {
        let message = message.into();
        if self.items.iter().any(|t| t.level == level && t.message == message) {
            return None;
        }
        self.next_id += 1;
        self.items.push(Toast { id: self.next_id, level, message });
        if self.items.len() > MAX_VISIBLE {
            self.items.remove(0);
        }
        Some(self.next_id)
    }

    pub fn dismiss(&mut self, id: u32) {
        self.items.retain(|t| t.id != id);
    }

    pub fn items(&self) -> &[Toast] {
        &self.items
    }
}

/// Blocking browser alert
pub fn alert(message: &str) {
    match web_sys::window() {
        Some(win) => {
            if win.alert_with_message(message).is_err() {
                warn!("[NOTIFY] alert failed: {}", message);
            }
        }
        None => warn!("[NOTIFY] no window for alert: {}", message),
    }
}
