//! UI Components
//!
//! Reusable Leptos components.

mod ranking_ballot;
mod rank_row;
mod toast_stack;
mod submit_spinner;

pub use ranking_ballot::RankingBallot;
pub use rank_row::RankRow;
pub use toast_stack::ToastStack;
pub use submit_spinner::SubmitSpinner;
