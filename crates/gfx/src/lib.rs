pub mod text_measurer;
pub use text_measurer::EguiTextMeasurer;
pub(crate) mod field;
pub(crate) mod menu;
pub mod reflow;
pub mod render;
pub(crate) mod route;
pub mod widget;

pub use reflow::{FrameObservation, FrameReflowSource};
pub use render::{ClassNames, DefaultRenderer, MentionRenderer, join_classes};
pub use widget::{MentionInput, MentionResponse};
