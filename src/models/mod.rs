pub mod api;
pub mod common;
pub mod media;
pub mod style;

pub use api::*;
pub use common::*;
pub use media::*;
pub use style::*;
