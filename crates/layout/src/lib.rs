mod box_size;
mod length;

pub use box_size::{BoxKind, BoxSize, DEFAULT_TEXTAREA_ROWS, line_height_px, measure_box, textarea_rows};
pub use length::px_opt;
