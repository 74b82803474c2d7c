//! Terminal adapter for readmore using ratatui.
//!
//! Wraps text with the same greedy layout for measuring, drawing, and mouse
//! hit testing, and defers measurement to a once-per-frame layout pass.

mod layout;
mod oracle;
mod screen;
mod theme;
mod view;
mod widget;

pub use layout::{line_texts, offset_at, row_count, wrap_line_ends};
pub use oracle::{DeferredOracle, LayoutPass, ViewId};
pub use screen::{ViewHit, body_area, draw, hit_view, text_width, view_areas};
pub use theme::{Glyphs, Palette, UiOptions, glyphs, palette, styles};
pub use view::{ChangeFlag, ReadMoreView, deliver};
pub use widget::{ReadMoreParagraph, affordance_hit, render_lines, rendered_height};
