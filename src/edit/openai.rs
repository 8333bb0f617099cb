//! OpenAI image edit provider (dall-e-2 inpainting/outpainting).

use crate::config::API_KEY_ENV;
use crate::edit::editor::{EditRequest, EditResult, ImageEditor};
use crate::error::{OutpaintError, Result};
use crate::image::{Dimensions, ImageFormat};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use std::path::Path;
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_MODEL: &str = "dall-e-2";
const MAX_IMAGES: u32 = 10;

/// Builder for OpenAiEditor.
#[derive(Debug, Clone, Default)]
pub struct OpenAiEditorBuilder {
    api_key: Option<String>,
    model: Option<String>,
    size: Option<Dimensions>,
    base_url: Option<String>,
    client: Option<reqwest::Client>,
}

impl OpenAiEditorBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key. Falls back to `OPENAI_API_KEY` env var.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Sets the model identifier (default: `dall-e-2`).
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Requests a specific output size. dall-e-2 accepts 256, 512 or 1024 squares.
    pub fn size(mut self, size: Dimensions) -> Self {
        self.size = Some(size);
        self
    }

    /// Overrides the API base URL (default: `https://api.openai.com/v1`).
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Uses the given HTTP client instead of a default one.
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Builds the editor, resolving the API key.
    pub fn build(self) -> Result<OpenAiEditor> {
        let api_key = self
            .api_key
            .or_else(|| std::env::var(API_KEY_ENV).ok())
            .ok_or_else(|| {
                OutpaintError::Auth(format!("{API_KEY_ENV} not set and no API key provided"))
            })?;

        let base_url = self
            .base_url
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Ok(OpenAiEditor {
            client: self.client.unwrap_or_default(),
            api_key,
            model: self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            size: self.size,
            edits_url: format!("{}/images/edits", base_url.trim_end_matches('/')),
        })
    }
}

/// OpenAI image edit provider.
pub struct OpenAiEditor {
    client: reqwest::Client,
    api_key: String,
    model: String,
    size: Option<Dimensions>,
    edits_url: String,
}

impl OpenAiEditor {
    /// Creates a new `OpenAiEditorBuilder`.
    pub fn builder() -> OpenAiEditorBuilder {
        OpenAiEditorBuilder::new()
    }

    /// Returns the model identifier sent with each request.
    pub fn model(&self) -> &str {
        &self.model
    }

    async fn build_form(&self, request: &EditRequest) -> Result<Form> {
        let mut form = Form::new()
            .text("model", self.model.clone())
            .text("prompt", request.prompt.clone())
            .text("n", request.count.to_string())
            .text("response_format", "url")
            .part("image", file_part(&request.image).await?)
            .part("mask", file_part(&request.mask).await?);

        if let Some(size) = self.size {
            form = form.text("size", size.to_string());
        }

        Ok(form)
    }

    fn parse_error(
        &self,
        status: u16,
        text: &str,
        headers: &reqwest::header::HeaderMap,
    ) -> OutpaintError {
        let message = error_message(text);
        if status == 401 || status == 403 {
            return OutpaintError::Auth(message);
        }
        if status == 429 && !message.contains("quota") {
            let retry_after = headers
                .get(reqwest::header::RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .map(Duration::from_secs);
            return OutpaintError::RateLimited { retry_after };
        }
        let lower = text.to_lowercase();
        if lower.contains("safety") || lower.contains("content_policy") {
            return OutpaintError::ContentBlocked(message);
        }
        OutpaintError::Api { status, message }
    }
}

#[async_trait]
impl ImageEditor for OpenAiEditor {
    async fn edit(&self, request: &EditRequest) -> Result<Vec<EditResult>> {
        if request.count == 0 || request.count > MAX_IMAGES {
            return Err(OutpaintError::InvalidRequest(format!(
                "image count must be between 1 and {MAX_IMAGES}, got {}",
                request.count
            )));
        }

        let start = Instant::now();
        let form = self.build_form(request).await?;

        tracing::info!(
            model = %self.model,
            count = request.count,
            "sending images to OpenAI (this can take a few seconds)"
        );

        let response = self
            .client
            .post(&self.edits_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let headers = response.headers().clone();
            let text = response.text().await.unwrap_or_default();
            return Err(self.parse_error(status.as_u16(), &text, &headers));
        }

        let openai_response: OpenAiImageResponse = response.json().await?;
        let results = openai_response.into_results()?;

        tracing::debug!(
            results = results.len(),
            duration_ms = start.elapsed().as_millis() as u64,
            "OpenAI edit complete"
        );
        Ok(results)
    }

    fn name(&self) -> &str {
        "OpenAI image edits"
    }
}

/// Streams a file from disk as a multipart part.
async fn file_part(path: &Path) -> Result<Part> {
    let file = tokio::fs::File::open(path).await?;
    let len = file.metadata().await?.len();

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image.png")
        .to_string();
    let mime = ImageFormat::from_path(path).unwrap_or_default().mime_type();

    Part::stream_with_length(reqwest::Body::from(file), len)
        .file_name(file_name)
        .mime_str(mime)
        .map_err(|e| OutpaintError::InvalidRequest(e.to_string()))
}

/// Pulls `error.message` out of an OpenAI error body, falling back to the raw text.
fn error_message(text: &str) -> String {
    serde_json::from_str::<OpenAiErrorResponse>(text)
        .map(|body| body.error.message)
        .unwrap_or_else(|_| text.trim().to_string())
}

#[derive(Debug, Deserialize)]
struct OpenAiImageResponse {
    data: Vec<OpenAiImageData>,
}

impl OpenAiImageResponse {
    fn into_results(self) -> Result<Vec<EditResult>> {
        self.data
            .into_iter()
            .enumerate()
            .map(|(idx, item)| {
                let url = item.url.ok_or_else(|| {
                    OutpaintError::UnexpectedResponse(format!(
                        "result {} in OpenAI edit response has no url",
                        idx + 1
                    ))
                })?;
                Ok(EditResult {
                    url,
                    revised_prompt: item.revised_prompt,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct OpenAiImageData {
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    revised_prompt: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorResponse {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}
