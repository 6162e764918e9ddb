//! Redirect-based route gates for tower/axum pipelines.

mod groups;
mod login;
mod redirect;
mod requirement;

pub use groups::{GroupsRequiredLayer, GroupsRequiredService};
pub use login::{LoginRequiredLayer, LoginRequiredService};
pub use requirement::{GroupRequirement, Verdict};
