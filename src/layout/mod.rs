//! Sequential top-to-bottom layout.
//!
//! Content is placed line by line at a [LayoutCursor] that walks down the page
//! in millimetres. Whoever drives the layout decides where page breaks go by
//! testing the cursor against thresholds; [Flow] turns cursor positions into
//! text spans on PDF pages, and [wrap_text] splits lines that are too wide.

mod cursor;
mod flow;
mod wrap;

pub use cursor::*;
pub use flow::*;
pub use wrap::*;
