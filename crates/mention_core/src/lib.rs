//! # mention_core
//!
//! The decision logic of the mention control, with no rendering backend:
//! - [`detect_trigger`]: is the caret inside a mention, and what is its query
//! - [`filter_options`]: which candidates the menu shows
//! - [`QueryState`]: the Closed/Open machine and the highlighted row
//! - [`selection`]: proposed selected-list updates and text reconciliation
//! - [`MeasureScheduler`] / [`ReflowHub`]: when the menu gets re-measured
//! - [`MentionController`]: all of the above behind one set of handlers
//!
//! The selected list is owned by the host. The controller only proposes the
//! next list through its change callback (and in its return values); the host
//! feeds the accepted list back with [`MentionController::set_selected`].

mod config;
mod controller;
mod error;
mod filter;
mod geometry;
mod navigation;
mod option;
mod reflow;
mod schedule;
pub mod selection;
mod trigger;

pub use config::{CommitMode, MentionConfig, MenuConfig};
pub use controller::{ChangeCallback, KeyOutcome, MentionController, MentionKey};
pub use error::{ConfigError, MeasureError};
pub use filter::{filter_options, matches_query, unselected};
pub use geometry::{MeasureInput, MenuGeometry};
pub use navigation::{MenuState, QueryState, Step, Transition};
pub use option::MentionOption;
pub use reflow::{ReflowHub, ReflowKind, ReflowSubscription};
pub use schedule::{MeasureScheduler, MeasureTicket};
pub use trigger::{MentionQuery, detect_trigger};
