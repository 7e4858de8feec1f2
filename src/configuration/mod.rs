//! Layered component configuration.
//!
//! A component's configuration value is built from a sequence of layers: the
//! static layers listed on its descriptor, then an optional runtime layer.
//! Each layer is filtered by a [`MergePolicy`] derived from the
//! [`ConfigurationDescription`] of the configuration type, so that a value
//! marked *Inherit* or *Forced* is never overwritten by that layer.

pub mod description;
pub mod loader;
pub mod merge;

pub use description::{ConfigurationDescription, Member};
pub use loader::ConfigurationLoader;
pub use merge::{MergePolicy, MergeResolver};
