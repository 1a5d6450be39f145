//! Configuration types for HTML-to-Word conversion.
//!
//! All conversion behaviour is controlled through [`ConversionConfig`],
//! built via its [`ConversionConfigBuilder`]. The original tool kept its
//! three file paths as module-level constants; holding everything in one
//! value passed into the run functions instead makes runs parameterisable
//! and testable without touching globals.
//!
//! # Design choice: builder over constructor
//! Callers set only what they care about and rely on documented defaults
//! for the rest; new fields never break existing call sites.

use crate::error::Html2WordError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for an HTML-to-Word conversion.
///
/// Built via [`ConversionConfig::builder()`] or using
/// [`ConversionConfig::default()`].
///
/// # Example
/// ```rust
/// use html2word::ConversionConfig;
///
/// let config = ConversionConfig::builder()
///     .font_family("Georgia")
///     .font_size_pt(12)
///     .build()
///     .unwrap();
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionConfig {
    /// Path to a template document. Reserved: accepted and recorded but not
    /// consumed by the conversion step. The original tool read this path into
    /// its configuration without ever using it; restoring template-based
    /// rendering would be a pure addition on top of this field.
    pub template_path: Option<PathBuf>,

    /// Default font family for body text. Default: "Calibri".
    ///
    /// Word substitutes a metrically similar font when the family is not
    /// installed on the reader's machine, so any common name is safe here.
    pub font_family: String,

    /// Default font size for body text, in points. Range: 6–72. Default: 11.
    ///
    /// 11 pt matches Word's own default for new documents. Heading styles
    /// scale from this independently (see the build stage).
    pub font_size_pt: usize,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            template_path: None,
            font_family: "Calibri".to_string(),
            font_size_pt: 11,
        }
    }
}

impl ConversionConfig {
    /// Create a new builder for `ConversionConfig`.
    pub fn builder() -> ConversionConfigBuilder {
        ConversionConfigBuilder {
            config: Self::default(),
        }
    }
}

/// Builder for [`ConversionConfig`].
#[derive(Debug)]
pub struct ConversionConfigBuilder {
    config: ConversionConfig,
}

impl ConversionConfigBuilder {
    pub fn template_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.template_path = Some(path.into());
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        self.config.font_family = family.into();
        self
    }

    pub fn font_size_pt(mut self, pt: usize) -> Self {
        self.config.font_size_pt = pt.clamp(6, 72);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<ConversionConfig, Html2WordError> {
        let c = &self.config;
        if c.font_family.trim().is_empty() {
            return Err(Html2WordError::InvalidConfig(
                "Font family must not be empty".into(),
            ));
        }
        if c.font_size_pt < 6 || c.font_size_pt > 72 {
            return Err(Html2WordError::InvalidConfig(format!(
                "Font size must be 6–72 pt, got {}",
                c.font_size_pt
            )));
        }
        Ok(self.config)
    }
}
