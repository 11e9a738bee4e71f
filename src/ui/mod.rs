//! UI modules for the explorer application.
//!
//! The UI is split into three panels:
//! - Top bar: title and status line
//! - Bottom controls: rotate drag bar and view buttons
//! - Central canvas: the base/overlay map pair

mod canvas;
mod colors;
mod controls;
mod top_bar;

pub use canvas::render_canvas;
pub use controls::render_controls;
pub use top_bar::render_top_bar;
