//! Page Configuration
//!
//! Everything the ballots need is embedded in the server-rendered page:
//! meta tags for the CSRF token and base path, and one JSON blob per ballot.

use serde::Deserialize;
use wasm_bindgen::JsCast;

use crate::error::{SyncError, SyncResult};
use crate::models::{FormContext, RankEntry};
use crate::ranking::assign_row_keys;

/// How often the CSRF token is refreshed (15 minutes)
pub const CSRF_REFRESH_INTERVAL_MS: u32 = 900_000;
/// Lifetime of a transient notification
pub const TOAST_LIFETIME_MS: u32 = 4_000;

/// Attribute marking a ballot mount point; its value is the ballot JSON
pub const BALLOT_ATTR: &str = "data-ranking-ballot";
pub const CSRF_META: &str = "csrf-token";
pub const BASE_PATH_META: &str = "base-path";

/// One ranking form on the page
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BallotConfig {
    /// Logical ballot, sent as `form_name` ("adult", "youth")
    pub form_name: String,
    /// URL both auto-save and final submit post to
    pub action: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub entries: Vec<RankEntry>,
}

impl BallotConfig {
    pub fn from_json(raw: &str) -> SyncResult<Self> {
        let mut config: BallotConfig =
            serde_json::from_str(raw).map_err(|e| SyncError::Config(e.to_string()))?;
        if config.form_name.trim().is_empty() {
            return Err(SyncError::Config("form_name is required".to_string()));
        }
        if config.action.trim().is_empty() {
            return Err(SyncError::Config("action is required".to_string()));
        }
        assign_row_keys(&mut config.entries);
        Ok(config)
    }

    pub fn form_context(&self) -> FormContext {
        FormContext {
            form_name: self.form_name.clone(),
            action: self.action.clone(),
        }
    }

    pub fn heading(&self) -> String {
        self.title.clone().unwrap_or_else(|| {
            let mut chars = self.form_name.chars();
            match chars.next() {
                Some(first) => format!("{}{} Rankings", first.to_uppercase(), chars.as_str()),
                None => "Rankings".to_string(),
            }
        })
    }
}

/// Page-wide settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageConfig {
    pub csrf_token: Option<String>,
    pub base_path: String,
}

impl PageConfig {
    /// Read meta tags from the current document
    pub fn from_document(doc: &web_sys::Document) -> Self {
        Self {
            csrf_token: read_meta(doc, CSRF_META).filter(|t| !t.is_empty()),
            base_path: normalize_base_path(&read_meta(doc, BASE_PATH_META).unwrap_or_default()),
        }
    }

    pub fn refresh_csrf_url(&self) -> String {
        format!("{}/refresh_csrf", self.base_path)
    }
}

/// Strip trailing slashes so `{base}/refresh_csrf` never doubles up
pub fn normalize_base_path(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

pub fn read_meta(doc: &web_sys::Document, name: &str) -> Option<String> {
    doc.query_selector(&format!("meta[name='{}']", name))
        .ok()
        .flatten()
        .and_then(|el| el.get_attribute("content"))
}

pub fn write_meta(doc: &web_sys::Document, name: &str, value: &str) -> SyncResult<()> {
    let meta = doc
        .query_selector(&format!("meta[name='{}']", name))
        .map_err(SyncError::dom)?
        .ok_or_else(|| SyncError::Dom(format!("meta[name='{}'] not found", name)))?;
    meta.set_attribute("content", value).map_err(SyncError::dom)
}

/// Every ballot mount point, with its parsed configuration.
///
/// Invalid blobs are reported and skipped so the other ballots still mount.
pub fn find_ballots(doc: &web_sys::Document) -> Vec<(web_sys::HtmlElement, SyncResult<BallotConfig>)> {
    let Ok(nodes) = doc.query_selector_all(&format!("[{}]", BALLOT_ATTR)) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|i| nodes.item(i))
        .filter_map(|node| node.dyn_into::<web_sys::HtmlElement>().ok())
        .map(|el| {
            let raw = el.get_attribute(BALLOT_ATTR).unwrap_or_default();
            (el, BallotConfig::from_json(&raw))
        })
        .collect()
}
