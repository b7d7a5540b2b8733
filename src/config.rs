//! Service configuration
//!
//! All runtime configuration comes from the environment; the resulting
//! [`Config`] is injected into every handler instead of living in globals

use std::env::var;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use url::Url;

/// Default base for absolute links embedded in QR codes and stored back to the
/// guest directory
const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

/// Default root directory for generated artifacts
const DEFAULT_STATIC_ROOT: &str = "static";

/// Default HTML-to-PDF renderer command
const DEFAULT_PDF_RENDERER: &str = "wkhtmltopdf";

/// Runtime configuration
#[derive(Clone, Debug)]
pub struct Config {
    /// Base URL for absolute links, without a trailing slash
    pub base_url: String,

    /// Root directory for generated static artifacts
    pub static_root: PathBuf,

    /// Command invoked as `renderer <url> <output-path>`
    pub pdf_renderer: String,
}

impl Config {
    /// Read configuration from the environment
    ///
    /// # Errors
    ///
    /// Will return `Err` if `BASE_URL` is set to something that is not a
    /// valid URL
    pub fn from_env() -> Result<Self> {
        let base_url = env_var_or_else("BASE_URL", || String::from(DEFAULT_BASE_URL));

        Url::parse(&base_url).with_context(|| format!("Invalid BASE_URL: {base_url}"))?;

        let base_url = base_url.trim_end_matches('/').to_string();

        Ok(Self {
            base_url,
            static_root: PathBuf::from(env_var_or_else("STATIC_ROOT", || {
                String::from(DEFAULT_STATIC_ROOT)
            })),
            pdf_renderer: env_var_or_else("PDF_RENDERER", || String::from(DEFAULT_PDF_RENDERER)),
        })
    }
}

/// Get the value of ENV var, or a default
///
/// Only when:
/// - It is set
/// - It is not empty
pub fn env_var_or_else(var_name: &'static str, or_else: fn() -> String) -> String {
    if let Ok(value) = var(var_name) {
        if !value.is_empty() {
            return value;
        }
    }

    or_else()
}
