//! Viewer configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where result documents live and how pages link to each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewerConfig {
    /// Directory that document URLs resolve against.
    pub results_root: PathBuf,

    /// URL prefix of generated comparison documents.
    pub generated_dir: String,

    /// Page that sweep deep links point at.
    pub sweep_page: String,

    /// URL of the sweep document.
    pub sweep_document: String,

    /// Metric graphed on the comparison page.
    pub metric: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            results_root: PathBuf::from("."),
            generated_dir: "/results/generated".to_string(),
            sweep_page: "/results/sweepdata.html".to_string(),
            sweep_document: "/results/sweepdata.json".to_string(),
            metric: "psnr".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> ViewerConfigBuilder {
        ViewerConfigBuilder::default()
    }

    /// URL of the comparison document for two codecs and a criterion.
    ///
    /// ```
    /// use codec_results::ViewerConfig;
    ///
    /// let config = ViewerConfig::default();
    /// assert_eq!(
    ///     config.comparison_url("vp9", "x264", "psnr"),
    ///     "/results/generated/vp9-x264-psnr.json"
    /// );
    /// ```
    #[must_use]
    pub fn comparison_url(&self, codec1: &str, codec2: &str, criterion: &str) -> String {
        format!(
            "{}/{codec1}-{codec2}-{criterion}.json",
            self.generated_dir.trim_end_matches('/')
        )
    }
}

/// Builder for [`ViewerConfig`].
#[derive(Debug, Default)]
pub struct ViewerConfigBuilder {
    results_root: Option<PathBuf>,
    generated_dir: Option<String>,
    sweep_page: Option<String>,
    sweep_document: Option<String>,
    metric: Option<String>,
}

impl ViewerConfigBuilder {
    /// Set the directory document URLs resolve against.
    #[must_use]
    pub fn results_root(mut self, path: impl Into<PathBuf>) -> Self {
        self.results_root = Some(path.into());
        self
    }

    /// Set the URL prefix of comparison documents.
    #[must_use]
    pub fn generated_dir(mut self, prefix: impl Into<String>) -> Self {
        self.generated_dir = Some(prefix.into());
        self
    }

    /// Set the sweep page deep links point at.
    #[must_use]
    pub fn sweep_page(mut self, page: impl Into<String>) -> Self {
        self.sweep_page = Some(page.into());
        self
    }

    /// Set the URL of the sweep document.
    #[must_use]
    pub fn sweep_document(mut self, url: impl Into<String>) -> Self {
        self.sweep_document = Some(url.into());
        self
    }

    /// Set the metric graphed on the comparison page.
    #[must_use]
    pub fn metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = Some(metric.into());
        self
    }

    /// Build the configuration, filling unset fields with defaults.
    #[must_use]
    pub fn build(self) -> ViewerConfig {
        let defaults = ViewerConfig::default();
        ViewerConfig {
            results_root: self.results_root.unwrap_or(defaults.results_root),
            generated_dir: self.generated_dir.unwrap_or(defaults.generated_dir),
            sweep_page: self.sweep_page.unwrap_or(defaults.sweep_page),
            sweep_document: self.sweep_document.unwrap_or(defaults.sweep_document),
            metric: self.metric.unwrap_or(defaults.metric),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let config = ViewerConfig::builder()
            .results_root("/srv/site")
            .generated_dir("/gen/")
            .metric("score")
            .build();

        assert_eq!(config.results_root, PathBuf::from("/srv/site"));
        assert_eq!(config.metric, "score");
        assert_eq!(config.sweep_page, "/results/sweepdata.html");
        assert_eq!(config.comparison_url("av1", "vp9", "rt"), "/gen/av1-vp9-rt.json");
    }
}
