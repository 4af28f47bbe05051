// marketplace/src/util/mod.rs

pub mod debounce;
pub mod format;
pub mod ids;

pub use debounce::Debouncer;
pub use format::{avatar_text, format_currency, format_date, truncate_text, DEFAULT_TRUNCATE_LENGTH};
pub use ids::generate_id;
