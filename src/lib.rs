//! Small collection utilities built around [`DoubleMap`], a one-to-one map
//! with lookup in both directions.
//!
//! ```
//! use pairwise::DoubleMap;
//!
//! let mut codes = DoubleMap::new();
//! codes.insert("en", 1).unwrap();
//! codes.insert("fr", 2).unwrap();
//!
//! assert_eq!(codes["fr"], 2);
//! assert_eq!(codes.reverse()[&1], "en");
//!
//! codes.reverse_mut().set(1, "de");
//! assert!(!codes.contains_key("en"));
//! ```

pub mod describe;
pub mod doublemap;
pub mod error;
pub mod observable;
mod persist;
pub mod stream;
pub mod time;
pub mod wait;

pub use doublemap::{DoubleMap, Reverse, ReverseMut};
pub use error::{Error, Result, Side};
pub use observable::{
    CollectionChange, Notification, ObservableRangeCollection, PropertyChange, SubscriptionId,
};
pub use wait::{WaitOptions, WaitOutcome};
