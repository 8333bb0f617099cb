//! One outpainting pass: validate, convert, edit, download, resize.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::config::Config;
use crate::download::download_to_file;
use crate::edit::{EditRequest, ImageEditor};
use crate::error::Result;
use crate::image::{convert_to_rgba, resize_in_place};
use crate::session::Job;
use crate::validate::validate_environment;

/// What a successful pass produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// RGBA copies written for the source and the mask.
    pub converted: [PathBuf; 2],
    /// Number of results the service returned and that were processed.
    pub downloaded: usize,
    /// Final output file. Every result of the pass is written here in turn.
    pub output: PathBuf,
}

/// Sequences a single outpainting pass against an [`ImageEditor`].
pub struct Pipeline<E> {
    config: Config,
    editor: E,
    http: reqwest::Client,
}

impl<E: ImageEditor> Pipeline<E> {
    /// Creates a pipeline with a default HTTP client for downloads.
    pub fn new(config: Config, editor: E) -> Self {
        Self {
            config,
            editor,
            http: reqwest::Client::new(),
        }
    }

    /// Uses the given HTTP client for downloads.
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.http = client;
        self
    }

    /// Returns the configuration this pipeline runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the editor results are requested from.
    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Runs one pass, stopping at the first error.
    ///
    /// Nothing is retried and nothing already written is cleaned up.
    pub async fn execute(&self) -> Result<RunSummary> {
        let config = &self.config;

        validate_environment(config).await?;
        tracing::info!("environment validated");

        let rgba_source = config.rgba_source_path();
        let rgba_mask = config.rgba_mask_path();
        convert_to_rgba(config.source_path(), &rgba_source).await?;
        convert_to_rgba(config.mask_path(), &rgba_mask).await?;

        let request = EditRequest::new(&rgba_source, &rgba_mask, config.prompt.clone())
            .with_count(config.image_count);
        let results = self.editor.edit(&request).await?;
        tracing::debug!(editor = self.editor.name(), results = results.len(), "edit returned");

        // Every result lands on the same file; only the last one survives.
        let output = config.output_path();
        for (idx, result) in results.iter().enumerate() {
            download_to_file(&self.http, &result.url, &output).await?;
            tracing::info!("image {} downloaded", idx + 1);
            resize_in_place(&output, config.output_size).await?;
        }

        Ok(RunSummary {
            converted: [rgba_source, rgba_mask],
            downloaded: results.len(),
            output,
        })
    }

    /// Runs one pass and logs any failure instead of returning it.
    pub async fn run(&self) -> Option<RunSummary> {
        match self.execute().await {
            Ok(summary) => {
                tracing::info!(
                    output = %summary.output.display(),
                    downloaded = summary.downloaded,
                    "run complete"
                );
                Some(summary)
            }
            Err(err) => {
                tracing::error!("{err}");
                None
            }
        }
    }
}

#[async_trait]
impl<E: ImageEditor> Job for Pipeline<E> {
    async fn run_once(&self) {
        self.run().await;
    }
}
