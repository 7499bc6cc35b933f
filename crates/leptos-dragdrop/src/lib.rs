//! Leptos DragDrop Utilities
//!
//! Simple drag-to-reorder for Leptos lists using mouse events.
//! Uses movement threshold to distinguish click from drag.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DropTarget {
    /// Drop on a row (take its place), by row key
    Row(u32),
    /// Drop on the gap before the row at this index (len = after the last row)
    Slot(usize),
}

/// DnD state signals
#[derive(Clone, Copy)]
pub struct DndSignals {
    pub dragging_key_read: ReadSignal<Option<u32>>,
    pub dragging_key_write: WriteSignal<Option<u32>>,
    pub drop_target_read: ReadSignal<Option<DropTarget>>,
    pub drop_target_write: WriteSignal<Option<DropTarget>>,
    /// Pending row key (mousedown but not yet dragging)
    pub pending_key_read: ReadSignal<Option<u32>>,
    pub pending_key_write: WriteSignal<Option<u32>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

/// Movement threshold in pixels to start dragging
pub const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals() -> DndSignals {
    let (dragging_key_read, dragging_key_write) = signal(None::<u32>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget>);
    let (pending_key_read, pending_key_write) = signal(None::<u32>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_key_read,
        dragging_key_write,
        drop_target_read,
        drop_target_write,
        pending_key_read,
        pending_key_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// True once the pointer has travelled far enough from the mousedown point
pub fn exceeds_threshold(start: (i32, i32), current: (i32, i32)) -> bool {
    let dx = (current.0 - start.0).abs();
    let dy = (current.1 - start.1).abs();
    dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX
}

/// Resolve a drop into `(from, to)` indices for a remove-then-insert move.
///
/// `keys` is the current row order. `to` is the final index of the dragged
/// row after the move. Returns `None` when the drop would not change the order.
pub fn resolve_drop(keys: &[u32], dragged: u32, target: DropTarget) -> Option<(usize, usize)> {
    let from = keys.iter().position(|k| *k == dragged)?;
    let to = match target {
        DropTarget::Row(key) => keys.iter().position(|k| *k == key)?,
        DropTarget::Slot(gap) => {
            if gap > keys.len() {
                return None;
            }
            if gap > from { gap - 1 } else { gap }
        }
    };
    if to == from { None } else { Some((from, to)) }
}

/// Gap index just below the row with `key` (0 when the row is gone)
pub fn slot_after(keys: &[u32], key: u32) -> usize {
    keys.iter().position(|k| *k == key).map_or(0, |i| i + 1)
}

/// End drag operation
pub fn end_drag(dnd: &DndSignals) {
    dnd.dragging_key_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_key_write.set(None);
}

/// Create mousedown handler for draggable rows
/// Records pending drag with start position
pub fn make_on_mousedown(dnd: DndSignals, row_key: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            ev.prevent_default();
            dnd.pending_key_write.set(Some(row_key));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
fn bind_global_mousemove(dnd: DndSignals) {
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_key_read.get_untracked();

        if pending.is_some() && dnd.dragging_key_read.get_untracked().is_none() {
            let start = (dnd.start_x_read.get_untracked(), dnd.start_y_read.get_untracked());
            if exceeds_threshold(start, (ev.client_x(), ev.client_y())) {
                dnd.dragging_key_write.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for rows (take that row's place)
pub fn make_on_row_mouseenter(dnd: DndSignals, row_key: u32) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_key_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != row_key {
                dnd.drop_target_write.set(Some(DropTarget::Row(row_key)));
            }
        }
    }
}

/// Create mouseenter handler for gaps between rows.
/// `gap` is read on entry, so a zone that follows its row stays correct after moves.
pub fn make_on_slot_mouseenter<G>(dnd: DndSignals, gap: G) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    G: Fn() -> usize + Copy + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_key_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Slot(gap())));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave(dnd: DndSignals) -> impl Fn(web_sys::MouseEvent) + Copy + 'static {
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_key_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection
pub fn bind_global_mouseup<F>(dnd: DndSignals, on_drop: F)
where
    F: Fn(u32, DropTarget) + Clone + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_key = dnd.dragging_key_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        // Clear pending state first
        dnd.pending_key_write.set(None);

        if let (Some(dragged), Some(target)) = (dragging_key, drop_target) {
            end_drag(&dnd);
            on_drop(dragged, target);
        } else {
            // Click, or released outside any target
            end_drag(&dnd);
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}
