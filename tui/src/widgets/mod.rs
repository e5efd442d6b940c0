//! Custom widgets for the program viewer

pub mod markdown;
pub mod tabs;
pub mod text_block;

pub use markdown::{render_markdown, MarkdownStyles};
pub use tabs::{tab_at, tab_rects, DayTabs};
pub use text_block::{wrap_plain, TextBlock, TextBlockState};
