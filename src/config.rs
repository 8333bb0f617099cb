//! Run configuration.

use std::path::PathBuf;

use crate::image::Dimensions;

/// Environment variable holding the OpenAI API key.
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Static settings for an outpainting run.
///
/// Built once at startup and passed by reference into the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// OpenAI API key. Empty when not configured.
    pub api_key: String,
    /// File name of the source image inside `source_dir`.
    pub source_image: String,
    /// File name of the mask image inside `source_dir`.
    pub mask_image: String,
    /// Folder holding the source and mask images.
    pub source_dir: PathBuf,
    /// Folder receiving the RGBA copies sent to the API.
    pub rgba_dir: PathBuf,
    /// Folder receiving the final output.
    pub dest_dir: PathBuf,
    /// Text prompt describing the edit.
    pub prompt: String,
    /// Number of results to request.
    pub image_count: u32,
    /// File name of the downloaded result inside `dest_dir`.
    pub output_name: String,
    /// Final size every downloaded result is scaled to.
    pub output_size: Dimensions,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            source_image: "src.png".into(),
            mask_image: "mask.png".into(),
            source_dir: PathBuf::from("./src"),
            rgba_dir: PathBuf::from("./rgba"),
            dest_dir: PathBuf::from("./dest"),
            prompt: "high mountain".into(),
            image_count: 1,
            output_name: "outputimage.png".into(),
            output_size: Dimensions::new(2048, 1024),
        }
    }
}

impl Config {
    /// Default settings with the API key taken from `OPENAI_API_KEY`.
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_ENV).unwrap_or_default(),
            ..Self::default()
        }
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = key.into();
        self
    }

    /// Places all three folders under `root` using the default folder names.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        self.source_dir = root.join("src");
        self.rgba_dir = root.join("rgba");
        self.dest_dir = root.join("dest");
        self
    }

    /// Sets the prompt.
    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Sets the number of results to request.
    pub fn with_image_count(mut self, count: u32) -> Self {
        self.image_count = count;
        self
    }

    /// Sets the final output size.
    pub fn with_output_size(mut self, size: Dimensions) -> Self {
        self.output_size = size;
        self
    }

    /// Returns true if an API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// `<source_dir>/<source_image>`
    pub fn source_path(&self) -> PathBuf {
        self.source_dir.join(&self.source_image)
    }

    /// `<source_dir>/<mask_image>`
    pub fn mask_path(&self) -> PathBuf {
        self.source_dir.join(&self.mask_image)
    }

    /// `<rgba_dir>/_<source_image>`
    pub fn rgba_source_path(&self) -> PathBuf {
        self.rgba_dir.join(format!("_{}", self.source_image))
    }

    /// `<rgba_dir>/_<mask_image>`
    pub fn rgba_mask_path(&self) -> PathBuf {
        self.rgba_dir.join(format!("_{}", self.mask_image))
    }

    /// `<dest_dir>/<output_name>`. Shared by every result of a run.
    pub fn output_path(&self) -> PathBuf {
        self.dest_dir.join(&self.output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.prompt, "high mountain");
        assert_eq!(config.image_count, 1);
        assert_eq!(config.output_size, Dimensions::new(2048, 1024));
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_derived_paths() {
        let config = Config::default();
        assert_eq!(config.source_path(), Path::new("./src/src.png"));
        assert_eq!(config.mask_path(), Path::new("./src/mask.png"));
        assert_eq!(config.rgba_source_path(), Path::new("./rgba/_src.png"));
        assert_eq!(config.rgba_mask_path(), Path::new("./rgba/_mask.png"));
        assert_eq!(config.output_path(), Path::new("./dest/outputimage.png"));
    }

    #[test]
    fn test_with_root() {
        let config = Config::default().with_root("/tmp/run");
        assert_eq!(config.source_path(), Path::new("/tmp/run/src/src.png"));
        assert_eq!(config.rgba_dir, Path::new("/tmp/run/rgba"));
        assert_eq!(config.dest_dir, Path::new("/tmp/run/dest"));
    }

    #[test]
    fn test_blank_api_key_is_missing() {
        assert!(!Config::default().with_api_key("   ").has_api_key());
        assert!(Config::default().with_api_key("sk-test").has_api_key());
    }
}
