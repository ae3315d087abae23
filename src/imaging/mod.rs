//! Upload normalization.
//!
//! - **Calculations**: bounded-fit dimension math, no pixels involved
//! - **Preprocess**: payload decoding, resize and JPEG re-encode

mod calculations;
pub mod preprocess;

pub use calculations::fit_within;
pub use preprocess::{decode_payload, strip_data_uri_prefix, ImagePreprocessor, Quality};
