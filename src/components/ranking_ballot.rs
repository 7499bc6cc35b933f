//! Ranking Ballot Component
//!
//! A judge's reorderable ranking form. Every completed drop relabels the
//! rows, refreshes the hidden `rank` field and auto-saves the new order;
//! the submit button performs the authoritative final save.

use leptos::logging::{error, log, warn};
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dragdrop::*;

use crate::commands;
use crate::config::BallotConfig;
use crate::context::AppContext;
use crate::error::SyncError;
use crate::models::{FormContext, RankEntry, RankOrder};
use crate::notify::{alert, ToastLevel};
use crate::ranking::Recomputed;
use crate::store::{create_ballot_store, AutoSavePlan, BallotStateStoreFields, BallotStore};
use crate::sync::FinalOutcome;
use crate::components::RankRow;

#[component]
pub fn RankingBallot(config: BallotConfig) -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    let heading = config.heading();
    let form_ctx = StoredValue::new(config.form_context());
    let form_name = config.form_name.clone();
    let action = config.action.clone();
    let store = create_ballot_store(config.entries);
    let form_ref = NodeRef::<leptos::html::Form>::new();

    // Initial labeling: report anomalies, but nothing is saved until the judge moves a row
    report_recompute(ctx, &form_name, &store.recomputed().get_untracked());

    let dnd = create_dnd_signals();

    // Track drag start/cancel for the auto-save state machine
    Effect::new(move |_| {
        if dnd.dragging_key_read.get().is_some() {
            store.update(|s| s.begin_drag());
        } else {
            store.update(|s| s.cancel_drag());
        }
    });

    bind_global_mouseup(dnd, move |dragged_key, target| {
        let keys = store.with_untracked(|s| s.row_keys());
        let plan = store.try_update(|s| {
            match resolve_drop(&keys, dragged_key, target) {
                Some((from, to)) => {
                    log!("[DND] Row {} moved {} -> {}", dragged_key, from, to);
                    s.apply_drop(from, to);
                }
                None => s.relabel(),
            }
            (s.plan_auto_save(), s.recomputed.clone())
        });
        let Some((plan, recomputed)) = plan else { return };

        let name = form_ctx.with_value(|f| f.form_name.clone());
        report_recompute(ctx, &name, &recomputed);
        match plan {
            AutoSavePlan::Send(seq, order) => dispatch_auto_save(ctx, store, form_ctx.get_value(), seq, order),
            AutoSavePlan::Queued => log!("[SAVE] {} save in flight, newest order queued", name),
            AutoSavePlan::SkipEmpty => {}
        }
    });

    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(form) = form_ref.get_untracked() else {
            error!("[SAVE] Ranking form element is not mounted");
            return;
        };
        if !store.try_update(|s| s.begin_final()).unwrap_or(false) {
            log!("[SAVE] Submission already in progress");
            ctx.notify(ToastLevel::Info, "Your rankings are already being submitted.");
            return;
        }

        let order = store.with_untracked(|s| s.order().clone());
        let form_ctx = form_ctx.get_value();
        let token = ctx.csrf_token_now();
        if order.is_empty() {
            ctx.notify(ToastLevel::Warning, format!("Submitting {} ballot with no ranked entries.", form_ctx.form_name));
        }

        ctx.begin_busy();
        spawn_local(async move {
            let result = commands::submit_final(&form, &order, &form_ctx, &token).await;
            store.try_update(|s| s.settle_final(result.as_ref().map_err(|e| e.to_string())));

            match result {
                Ok(FinalOutcome::Redirected(url)) => {
                    log!("[SAVE] {} submitted, following redirect to {}", form_ctx.form_name, url);
                    navigate(&url);
                    // Spinner stays up while the page changes
                }
                Ok(FinalOutcome::Acknowledged) => {
                    ctx.end_busy();
                    log!("[SAVE] {} rankings submitted", form_ctx.form_name);
                    alert("Rankings submitted successfully!");
                }
                Ok(FinalOutcome::Failed(status)) => {
                    ctx.end_busy();
                    error!("[SAVE] Final submission failed with status {}", status);
                    alert("Failed to submit rankings. Please try again.");
                }
                Err(SyncError::MissingCsrf) => {
                    ctx.end_busy();
                    error!("[SAVE] Final submission aborted: no CSRF token");
                    alert("Your session token is missing. Please reload the page and submit again.");
                }
                Err(e) => {
                    ctx.end_busy();
                    error!("[SAVE] Error during final submission: {}", e);
                    alert("An error occurred. Please try again.");
                }
            }
        });
    };

    view! {
        <form class="ranking-form" action=action method="post" node_ref=form_ref on:submit=on_submit>
            <h2 class="ranking-heading">{heading}</h2>
            <input type="hidden" name="form_name" value=form_name />
            <input type="hidden" name="csrf_token" prop:value=move || ctx.csrf_token.get().unwrap_or_default() />
            <input type="hidden" name="rank" prop:value=move || store.recomputed().read().order.serialize() />

            <ol class="rankings-list">
                <li
                    class=slot_class(dnd, || 0)
                    on:mouseenter=make_on_slot_mouseenter(dnd, || 0)
                    on:mouseleave=make_on_mouseleave(dnd)
                />
                <For
                    each={move || store.rows().get()}
                    key={|entry| entry.row_key}
                    children={move |entry: RankEntry| {
                        let key = entry.row_key;
                        let mark = Signal::derive(move || store.recomputed().read().mark(key));
                        // Gap just below this row; follows the row as it moves
                        let gap = Memo::new(move |_| {
                            let keys: Vec<u32> = store.rows().read().iter().map(|r| r.row_key).collect();
                            slot_after(&keys, key)
                        });
                        view! {
                            <RankRow entry=entry mark=mark dnd=dnd />
                            <li
                                class=slot_class(dnd, move || gap.get())
                                on:mouseenter=make_on_slot_mouseenter(dnd, move || gap.get_untracked())
                                on:mouseleave=make_on_mouseleave(dnd)
                            />
                        }
                    }}
                />
            </ol>

            <Show when=move || store.rows().read().is_empty()>
                <p class="rankings-empty">"No submissions to rank yet."</p>
            </Show>

            <button
                type="submit"
                class="btn btn-primary"
                disabled=move || !store.final_phase().read().can_submit()
            >
                "Submit Rankings"
            </button>
        </form>
    }
}

/// Drop-zone classes for the gap `gap()` resolves to
fn slot_class(dnd: DndSignals, gap: impl Fn() -> usize + 'static) -> impl Fn() -> String {
    move || {
        let mut c = String::from("drop-zone");
        if dnd.dragging_key_read.get().is_none() { c.push_str(" hidden"); }
        if dnd.drop_target_read.get() == Some(DropTarget::Slot(gap())) { c.push_str(" active"); }
        c
    }
}

/// Log and surface what a recompute found
fn report_recompute(ctx: AppContext, form_name: &str, recomputed: &Recomputed) {
    if recomputed.marks.is_empty() {
        warn!("[RANK] {} ballot has no rows", form_name);
    }
    for message in recomputed.warnings(form_name) {
        ctx.notify(ToastLevel::Warning, message);
    }
    log!("[RANK] {} order: {}", form_name, recomputed.order.serialize());
}

/// Fire-and-forget save; failures become a toast, never a blocking error
fn dispatch_auto_save(ctx: AppContext, store: BallotStore, form_ctx: FormContext, seq: u64, order: RankOrder) {
    spawn_local(async move {
        let token = ctx.csrf_token_now();
        let result = commands::auto_save(&order, &form_ctx, &token).await;
        if let Err(e) = &result {
            warn!("[SAVE] Auto-save #{} of {} failed: {}", seq, form_ctx.form_name, e);
        }

        // Ballot may have unmounted while the request was out
        let Some(settle) = store.try_update(|s| s.settle_auto_save(seq, result.is_ok())) else {
            return;
        };
        if settle.report_failure {
            ctx.notify(
                ToastLevel::Error,
                "Auto-save failed. Your ranking will be saved again on your next change.",
            );
        }
        if let Some((next_seq, next_order)) = settle.next {
            dispatch_auto_save(ctx, store, form_ctx, next_seq, next_order);
        }
    });
}

fn navigate(url: &str) {
    let Some(win) = web_sys::window() else { return };
    if let Err(e) = win.location().set_href(url) {
        web_sys::console::error_2(&"[SAVE] Navigation failed:".into(), &e);
    }
}
