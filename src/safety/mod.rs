//! Safety checks shared by the composite agents.

pub mod cache;
pub mod flood;

pub use cache::LruCache;
pub use flood::{
    escape_routes, is_move_safe, reachable_count, reachable_count_bounded, space_score,
    validate_path, validate_path_with,
};
