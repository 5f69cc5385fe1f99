// fadesort - stable adaptive sorting in bounded extra space
// Core library functionality

pub mod cli;
pub mod models;
pub mod services;
pub mod utils;

// Re-export commonly used items
pub use services::fade_sort::{
    profile_runs, sort, sort_by, sort_by_key, sort_range, sort_range_by, sort_with_buffer,
    sort_with_buffer_by, FadeSorter, MINIMUM_BUFFER_SIZE,
};
pub use utils::error::{FadeSortError, Result};
