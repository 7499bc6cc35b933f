//! Rank Row Component
//!
//! One draggable submission in a ballot, with its place label.

use leptos::prelude::*;
use leptos_dragdrop::{make_on_mousedown, make_on_mouseleave, make_on_row_mouseenter, DndSignals, DropTarget};

use crate::models::RankEntry;
use crate::ranking::RowMark;

#[component]
pub fn RankRow(
    entry: RankEntry,
    /// Outcome of the last recompute for this row
    #[prop(into)] mark: Signal<Option<RowMark>>,
    dnd: DndSignals,
) -> impl IntoView {
    let key = entry.row_key;
    let submission_id = entry.submission_id.to_string();

    let on_mousedown = make_on_mousedown(dnd, key);
    let on_mouseenter = make_on_row_mouseenter(dnd, key);
    let on_mouseleave = make_on_mouseleave(dnd);

    let is_dragging = move || dnd.dragging_key_read.get() == Some(key);
    let is_drop_target = move || matches!(dnd.drop_target_read.get(), Some(DropTarget::Row(k)) if k == key);

    let row_class = move || {
        let mut c = String::from("rank-item");
        match mark.get() {
            Some(RowMark::Duplicate) => c.push_str(" duplicate"),
            Some(RowMark::MissingId) => c.push_str(" unranked"),
            _ => {}
        }
        if is_dragging() { c.push_str(" dragging"); }
        if is_drop_target() { c.push_str(" drop-target"); }
        c
    };

    let label = move || mark.get().map(|m| m.label()).unwrap_or_default();
    let title = if entry.title.is_empty() { format!("Submission {}", submission_id) } else { entry.title.clone() };

    view! {
        <li
            class=row_class
            data-id=submission_id
            on:mousedown=on_mousedown
            on:mouseenter=on_mouseenter
            on:mouseleave=on_mouseleave
        >
            <span class="rank-position">{label}</span>
            {entry.thumbnail_url.map(|url| view! {
                <img class="rank-thumbnail" src=url alt=title.clone() draggable="false" />
            })}
            <span class="rank-title">{title.clone()}</span>
            {entry.artist.map(|artist| view! { <span class="rank-artist">{artist}</span> })}
        </li>
    }
}
