//! Input data structures: frequency datasets, alpha and the input bundle.

mod alpha;
mod bundle;
mod dataset;

pub use alpha::Alpha;
pub use bundle::InputBundle;
pub use dataset::{strip_export_statement, Dataset, TypeCount};
