//! # mention-input
//!
//! Inline "mention" text-entry control. Typing the trigger character inside a
//! single-line field opens a search menu anchored at the trigger's caret
//! column; choosing a candidate clears the field (or just the typed `@query`)
//! and proposes the next selected-id list to the host.
//!
//! The workspace is layered the same way from the bottom up:
//! - [`input_core`]: UI-agnostic text buffer and UTF-8 caret utilities
//! - [`layout`]: field style, mirror-based caret geometry and menu placement
//! - [`mention_core`]: tokenizer, filter, navigation/selection state machine
//! - [`gfx`]: the egui backend and the consumer-facing menu surface
//!
//! ```ignore
//! use mention_input::{MentionConfig, MentionController, MentionOption};
//!
//! let options = vec![
//!     MentionOption::new("alice", "Alice"),
//!     MentionOption::new("bob", "Bob"),
//! ];
//! let mut controller = MentionController::new(MentionConfig::default(), options);
//! controller.set_on_change(|next| println!("selected: {next:?}"));
//! ```

pub use gfx;
pub use input_core;
pub use layout;
pub use mention_core;

pub use gfx::{
    ClassNames, DefaultRenderer, EguiTextMeasurer, MentionInput, MentionRenderer, MentionResponse,
};
pub use layout::{FieldStyle, PlacementConfig, Rectangle, Size, place};
pub use mention_core::{
    CommitMode, MentionConfig, MentionController, MentionKey, MentionOption, MenuGeometry,
    detect_trigger, filter_options,
};
