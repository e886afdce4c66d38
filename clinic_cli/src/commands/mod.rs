mod fields;
mod filter;
mod preset;
mod price;

pub use fields::list_fields;
pub use filter::filter_records;
pub use preset::{delete_preset, list_presets, save_preset};
pub use price::price_line;
