pub mod client;
pub mod error;
pub mod normalize;
pub mod orchestrate;
pub mod render;
pub mod sources;

pub use client::ApiClient;
pub use error::ScrapeError;
pub use orchestrate::{BrandFailure, BrandMismatch, PipelineError, ScrapePipeline};
pub use render::{PageRenderer, RemoteBrowser, RendererFactory};
pub use sources::{LiveSources, ProductSource, SourceFactory};
