//! Profile → model input.
//!
//! - [`layout`] — the ordered `(column, rule)` table the classifier was fit against.
//! - [`encoder`] — walks the layout to build a [`FeatureVector`].

pub mod encoder;
pub mod layout;

pub use encoder::{encode, FeatureVector};
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT};
