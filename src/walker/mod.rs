//! Budgeted directory walker
//!
//! ```text
//!   parent/ ──► scan_children ──► SubtreeScan (one child at a time)
//!                                      │
//!                                      ▼
//!                          DirectoryAggregator::scan_subtree
//!                                      │  every fs call
//!                                      ▼
//!                              RateLimiter::execute
//! ```

pub mod aggregate;
pub mod budget;
pub mod stats;
pub mod toplevel;

pub use aggregate::DirectoryAggregator;
pub use budget::{Clock, RateLimiter, SystemClock};
pub use stats::{unix_seconds, DirectoryStats};
pub use toplevel::SubtreeScan;
