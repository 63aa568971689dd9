//! Display rendering
//!
//! Row construction, per-mode screen formatting, and the render cache that
//! suppresses redundant writes to the panel.

pub mod cache;
pub mod row;
pub mod screens;

pub use cache::RenderCache;
pub use row::{Row, RowBuf, BLANK_ROW, ROW_WIDTH};
