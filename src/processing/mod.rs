//! In-memory relational helpers over loaded rows.
//!
//! - [`left_join()`]: attach the matching right row to every left row
//! - [`group_by()`]: stable, first-seen-ordered bucketing by a string key
//!
//! ## Example: join → group
//!
//! ```rust
//! use birthday_calendars::processing::{group_by, left_join};
//!
//! let characters = vec![("kitty", "Hello Kitty"), ("mimmy", "Hello Kitty"), ("melody", "My Melody")];
//! let series = vec![("Hello Kitty", 1974), ("My Melody", 1975)];
//!
//! let joined = left_join(characters, &series, |c| c.1, |s| s.0);
//! let by_series = group_by(joined, |j| j.left.1.to_string());
//!
//! assert_eq!(by_series.keys().collect::<Vec<_>>(), vec!["Hello Kitty", "My Melody"]);
//! assert_eq!(by_series.get("Hello Kitty").map(|rows| rows.len()), Some(2));
//! ```

pub mod group;
pub mod join;

pub use group::{Groups, group_by};
pub use join::{Joined, left_join};
