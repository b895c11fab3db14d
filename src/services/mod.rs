pub mod summary;

pub use summary::{filter_by_time, summarize, totals_by};
