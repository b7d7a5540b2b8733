//! Notion-backed directory
//!
//! Talks to the hosted Notion API over HTTPS. This service only ever queries
//! one database by guest name and patches two URL properties on its pages.

use anyhow::Context;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

use super::Directory;
use super::Error;
use super::GuestLinks;
use super::GuestPage;
use super::Properties;
use super::Result;

/// Pinned API version sent with every request
const NOTION_VERSION: &str = "2022-06-28";

/// Hosted API endpoint
const API_BASE: &str = "https://api.notion.com/v1";

/// Name of the title property guests are queried by
const GUEST_NAME_PROPERTY: &str = "Guest Name";

/// Notion-backed directory client
#[derive(Clone)]
pub struct Notion {
    /// Shared HTTP client
    client: reqwest::Client,

    /// Integration token, sent as bearer auth
    token: String,

    /// Database holding the guest records
    database_id: String,
}

/// Shape of a database query response
#[derive(Deserialize)]
struct QueryResponse {
    results: Vec<Page>,
}

/// Shape of a single page in a query response
#[derive(Deserialize)]
struct Page {
    id: String,
    created_time: String,
    #[serde(default)]
    properties: Properties,
}

impl Notion {
    /// Create a client from the environment
    ///
    /// # Errors
    ///
    /// Will return `Err` when `NOTION_TOKEN` or `NOTION_DATABASE_ID` is not set
    pub fn from_env() -> anyhow::Result<Self> {
        let token = std::env::var("NOTION_TOKEN").context("NOTION_TOKEN is not set")?;
        let database_id =
            std::env::var("NOTION_DATABASE_ID").context("NOTION_DATABASE_ID is not set")?;

        Ok(Self {
            client: reqwest::Client::new(),
            token,
            database_id,
        })
    }
}

#[async_trait]
impl Directory for Notion {
    async fn find_guests_by_name(&self, guest_name: &str) -> Result<Vec<GuestPage>> {
        let filter = json!({
            "filter": {
                "property": GUEST_NAME_PROPERTY,
                "title": {
                    "equals": guest_name,
                },
            },
        });

        let response = self
            .client
            .post(format!("{API_BASE}/databases/{}/query", self.database_id))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&filter)
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?;

        let response = response
            .json::<QueryResponse>()
            .await
            .map_err(|err| Error::UnexpectedResponse(err.to_string()))?;

        Ok(response
            .results
            .into_iter()
            .map(|page| GuestPage {
                id: page.id,
                created_time: page.created_time,
                properties: page.properties,
            })
            .collect())
    }

    async fn save_guest_links(&self, page_id: &str, links: &GuestLinks) -> Result<()> {
        let properties = json!({
            "properties": {
                "Welcome Page URL": { "url": links.welcome_page_url },
                "QR Code URL": { "url": links.qr_code_url },
            },
        });

        self.client
            .patch(format!("{API_BASE}/pages/{page_id}"))
            .bearer_auth(&self.token)
            .header("Notion-Version", NOTION_VERSION)
            .json(&properties)
            .send()
            .await
            .map_err(request_error)?
            .error_for_status()
            .map_err(request_error)?;

        Ok(())
    }
}

/// Map a transport or status error onto a directory error
fn request_error(err: reqwest::Error) -> Error {
    Error::Request(err.to_string())
}
