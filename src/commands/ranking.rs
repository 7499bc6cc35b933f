//! Ranking Commands
//!
//! Auto-save and final submission of a ballot's order.

use leptos::logging::{log, warn};
use wasm_bindgen::JsCast;

use super::{form_body, post_form};
use crate::error::{SyncError, SyncResult};
use crate::models::{FormContext, RankOrder};
use crate::sync::{classify_final, FinalOutcome};

/// Fields of the rank form
pub const RANK_FIELD: &str = "rank";
pub const FORM_NAME_FIELD: &str = "form_name";
pub const CSRF_FIELD: &str = "csrf_token";

/// Body of a background save: only the order, the ballot and the token
pub fn auto_save_body(order: &RankOrder, ctx: &FormContext, csrf_token: &str) -> String {
    form_body(&[
        (RANK_FIELD, order.serialize().as_str()),
        (FORM_NAME_FIELD, ctx.form_name.as_str()),
        (CSRF_FIELD, csrf_token),
    ])
}

/// Background save after a reorder.
///
/// Any non-2xx is a soft failure; the next reorder resends the full order.
pub async fn auto_save(order: &RankOrder, ctx: &FormContext, csrf_token: &str) -> SyncResult<()> {
    if csrf_token.is_empty() {
        return Err(SyncError::MissingCsrf);
    }
    let body = auto_save_body(order, ctx, csrf_token);
    let response = post_form(&ctx.action, &body, csrf_token).await?;
    if response.is_ok() {
        log!("[SAVE] {} auto-saved: {}", ctx.form_name, order.serialize());
        Ok(())
    } else {
        warn!("[SAVE] {} auto-save failed with status {}", ctx.form_name, response.status);
        Err(SyncError::Status(response.status))
    }
}

/// Collect the text fields of a form in document order.
///
/// `rank` and `csrf_token` are overwritten with the values given, so a stale
/// hidden input can never win over the last computed order or a refreshed token.
pub fn final_submit_pairs(
    fields: Vec<(String, String)>,
    order: &RankOrder,
    ctx: &FormContext,
    csrf_token: &str,
) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = fields
        .into_iter()
        .filter(|(k, _)| k != RANK_FIELD && k != CSRF_FIELD && k != FORM_NAME_FIELD)
        .collect();
    pairs.push((RANK_FIELD.to_string(), order.serialize()));
    pairs.push((FORM_NAME_FIELD.to_string(), ctx.form_name.clone()));
    pairs.push((CSRF_FIELD.to_string(), csrf_token.to_string()));
    pairs
}

/// Explicit submission of the whole form
pub async fn submit_final(
    form: &web_sys::HtmlFormElement,
    order: &RankOrder,
    ctx: &FormContext,
    csrf_token: &str,
) -> SyncResult<FinalOutcome> {
    if csrf_token.is_empty() {
        return Err(SyncError::MissingCsrf);
    }
    let fields = read_form_fields(form)?;
    let pairs = final_submit_pairs(fields, order, ctx, csrf_token);
    log!("[SAVE] Submitting final {} rankings ({} fields): {}", ctx.form_name, pairs.len(), order.serialize());

    let response = post_form(&ctx.action, &form_body(&pairs), csrf_token).await?;
    Ok(classify_final(response.status, response.redirected, &response.url))
}

fn read_form_fields(form: &web_sys::HtmlFormElement) -> SyncResult<Vec<(String, String)>> {
    let data = web_sys::FormData::new_with_form(form).map_err(SyncError::dom)?;
    let entries = js_sys::try_iter(&data)
        .map_err(SyncError::dom)?
        .ok_or_else(|| SyncError::Dom("form data is not iterable".to_string()))?;

    let mut fields = Vec::new();
    for entry in entries {
        let entry = entry.map_err(SyncError::dom)?;
        let pair = entry
            .dyn_into::<js_sys::Array>()
            .map_err(|_| SyncError::Dom("unexpected form entry".to_string()))?;
        // File inputs have no string value and are not part of a ranking
        if let (Some(key), Some(value)) = (pair.get(0).as_string(), pair.get(1).as_string()) {
            fields.push((key, value));
        }
    }
    Ok(fields)
}
