//! Headshot Studio: stylized headshots from a single photo.
//!
//! An upload is normalized once, sent to Gemini once per style with that
//! style's prompt, and every style yields an image: the generated one, or the
//! normalized upload when generation fails.

pub mod aggregator;
pub mod config;
pub mod error;
pub mod gemini;
pub mod imaging;
pub mod logger;
pub mod models;
pub mod orchestrator;
pub mod server;
pub mod service;
pub mod styles;
pub mod upload;

pub use config::{Config, GeminiConfig};
pub use error::{HeadshotError, Result};
pub use gemini::{GeminiClient, ImageClient, ModelClient};
pub use imaging::ImagePreprocessor;
pub use models::{
    ErrorResponse, GenerateAllRequest, GenerateAllResponse, GeneratedImage, NormalizedImage, StyleId,
};
pub use orchestrator::{
    GenerationBatch, GenerationEvent, GenerationObserver, GenerationOrchestrator, ImageGenerator,
    LogObserver, StyleOutcome,
};
pub use service::HeadshotService;
pub use styles::{ResolvedPrompts, StyleCatalog};
pub use upload::UploadStore;
