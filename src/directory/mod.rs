//! All things related to the hosted guest directory
//!
//! The directory is a third-party hosted database. Guest records are read from
//! it and two link properties are written back; records are never created or
//! deleted here, their lifecycle belongs to the hosted side.

use async_trait::async_trait;
use thiserror::Error;

pub use notion::Notion;
pub use properties::Properties;

#[cfg(test)]
pub use memory::Memory;

#[cfg(test)]
mod memory;
mod notion;
mod properties;

/// Setup the directory client
///
/// # Errors
///
/// Will return `Err` when the required environment variables are missing
pub fn setup() -> anyhow::Result<Notion> {
    Notion::from_env()
}

/// Directory errors
#[derive(Debug, Error)]
pub enum Error {
    /// The directory could not be reached, or rejected the request
    #[error("Directory request failed: {0}")]
    Request(String),

    /// The directory answered with something this service can not read
    #[error("Unexpected directory response: {0}")]
    UnexpectedResponse(String),
}

/// Result type for all directory interactions
pub type Result<T> = core::result::Result<T, Error>;

/// A guest record as the directory returns it
///
/// Only the parts this service consumes; everything else stays on the hosted
/// side
#[derive(Clone, Debug)]
pub struct GuestPage {
    /// External record identifier, used to address the write-back
    pub id: String,

    /// Creation timestamp as reported by the directory
    pub created_time: String,

    /// Nested property structure holding the guest's display fields
    pub properties: Properties,
}

/// The two derived links written back to a guest record
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GuestLinks {
    /// Absolute URL of the welcome page
    pub welcome_page_url: String,

    /// Absolute URL of the generated QR code image
    pub qr_code_url: String,
}

/// Directory with all supported operations
#[async_trait]
pub trait Directory: Clone + Send + Sync + 'static {
    /// Find all guest records whose title property equals the given name
    ///
    /// Order is whatever the hosted API returns
    async fn find_guests_by_name(&self, guest_name: &str) -> Result<Vec<GuestPage>>;

    /// Write the derived links back to a guest record
    ///
    /// Last-write-wins on the two link properties only
    async fn save_guest_links(&self, page_id: &str, links: &GuestLinks) -> Result<()>;
}
