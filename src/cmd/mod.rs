pub mod balanced;
pub mod bests;
pub mod board;
pub mod enhanced;
pub mod records;
pub mod standards;

use swimrank::model::{CategoryCode, Gender};

/// Applies the optional `--gender`/`--category` filters of the ranking commands.
pub fn wants(gender: Option<Gender>, category: Option<&str>, g: Gender, c: &CategoryCode) -> bool {
    gender.map_or(true, |want| want == g) && category.map_or(true, |want| want.eq_ignore_ascii_case(c.as_str()))
}
