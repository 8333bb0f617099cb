//! Image editor trait and request/response types.

use crate::error::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// A request to edit an image under a mask.
///
/// Both files must already be RGBA PNGs of identical size; editors do not
/// re-check this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditRequest {
    /// Path to the image being edited.
    pub image: PathBuf,
    /// Path to the mask; transparent areas are regenerated.
    pub mask: PathBuf,
    /// Text prompt describing the desired result.
    pub prompt: String,
    /// Number of results to generate.
    pub count: u32,
}

impl EditRequest {
    /// Creates a request for a single result.
    pub fn new(
        image: impl Into<PathBuf>,
        mask: impl Into<PathBuf>,
        prompt: impl Into<String>,
    ) -> Self {
        Self {
            image: image.into(),
            mask: mask.into(),
            prompt: prompt.into(),
            count: 1,
        }
    }

    /// Sets the number of results to generate.
    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }
}

/// One generated image, as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// URL the generated image can be fetched from.
    pub url: String,
    /// Prompt as rewritten by the service, if it reports one.
    pub revised_prompt: Option<String>,
}

impl EditResult {
    /// Creates a result descriptor for `url`.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            revised_prompt: None,
        }
    }
}

/// Trait for services that edit an image under a mask.
#[async_trait]
pub trait ImageEditor: Send + Sync {
    /// Sends the request and returns one descriptor per generated image, in
    /// the order the service reported them.
    async fn edit(&self, request: &EditRequest) -> Result<Vec<EditResult>>;

    /// Returns the name of this editor for display.
    fn name(&self) -> &str;
}
