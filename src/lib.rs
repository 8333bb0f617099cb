#![warn(missing_docs)]
//! Outpaint - repeated image edits through the OpenAI image-edit API.
//!
//! A run validates the local environment, converts a source image and a mask
//! to RGBA, asks the service for edited versions, downloads each result, and
//! scales it to a fixed output size.
//!
//! # Quick Start
//!
//! ```no_run
//! use outpaint::{Config, OpenAiEditor, Pipeline};
//!
//! #[tokio::main]
//! async fn main() -> outpaint::Result<()> {
//!     let config = Config::from_env().with_prompt("high mountain");
//!     let editor = OpenAiEditor::builder().api_key(config.api_key.clone()).build()?;
//!     let summary = Pipeline::new(config, editor).execute().await?;
//!     println!("wrote {}", summary.output.display());
//!     Ok(())
//! }
//! ```
//!
//! # Layout
//!
//! - [`validate`]: pre-flight checks (API key, inputs, resolution, folders)
//! - [`image`]: RGBA conversion and resizing
//! - [`edit`]: the [`ImageEditor`] seam and the OpenAI implementation
//! - [`download`]: streaming result download
//! - [`pipeline`]: one full pass, with a single error boundary
//! - [`session`]: the interactive yes/no loop
//! - [`canvas`]: transparent canvas preparation for outpainting

pub mod canvas;
pub mod config;
pub mod download;
pub mod edit;
mod error;
pub mod fs;
pub mod image;
pub mod pipeline;
pub mod session;
pub mod validate;

// Re-export error types at crate root
pub use error::{DownloadFailure, OutpaintError, Result};

pub use config::Config;
pub use edit::{EditRequest, EditResult, ImageEditor, OpenAiEditor, OpenAiEditorBuilder};
pub use crate::image::{Dimensions, ImageFormat};
pub use pipeline::{Pipeline, RunSummary};
pub use session::{Job, Session, State};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::edit::{EditRequest, EditResult, ImageEditor, OpenAiEditor};
    pub use crate::error::{OutpaintError, Result};
    pub use crate::pipeline::Pipeline;
    pub use crate::session::{Job, Session};
}
