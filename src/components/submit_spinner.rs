//! Submit Spinner Component
//!
//! Page-global busy overlay while a final submission is in flight.

use leptos::prelude::*;

use crate::context::AppContext;

#[component]
pub fn SubmitSpinner() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext should be provided");

    view! {
        <Show when=move || { ctx.busy.get() > 0 }>
            <div class="global-spinner" aria-busy="true">
                <div class="spinner-border" role="status">
                    <span class="visually-hidden">"Submitting..."</span>
                </div>
            </div>
        </Show>
    }
}
