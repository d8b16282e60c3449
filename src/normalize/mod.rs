//! Pure, total text normalizers.
//!
//! None of these functions fail: malformed input yields an empty or best-effort
//! result, and callers decide whether that is a validation problem.

mod lists;
mod notation;

pub use lists::{
    Interval, parse_interval_list, parse_numeric_vector, parse_variable_list, split_top_level,
    strip_segment_label,
};
pub use notation::{clean_math_notation, normalize_latex_input};
