pub mod errors;
pub mod format;
pub mod ratelimit;
pub mod table;

pub use errors::extract_clean_error;
pub use format::{format_amount, format_number};
pub use ratelimit::{check_cooldown, check_global_rate_limit, get_cooldown_seconds};
pub use table::Table;
