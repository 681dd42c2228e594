//! Terminal UI module using ratatui.
//!
//! - `render`: Main frame rendering, layout and overlays
//! - `loading`: The first-load progress screen
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `tabs`: Per-section content rendering

pub mod input;
pub mod loading;
pub mod render;
pub mod styles;
pub mod tabs;
