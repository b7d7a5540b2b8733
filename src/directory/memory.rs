//! Memory directory
//!
//! Seeded by tests, records every link write-back

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::Directory;
use super::GuestLinks;
use super::GuestPage;
use super::Result;

/// An in-memory directory seeded with guest records
#[derive(Clone, Debug, Default)]
pub struct Memory {
    /// All guest pages in the directory, in insertion order
    pages: Arc<Mutex<Vec<GuestPage>>>,

    /// Every link write-back, in call order
    saved_links: Arc<Mutex<Vec<(String, GuestLinks)>>>,
}

impl Memory {
    /// Create a new empty Memory directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a guest page
    pub async fn add_page(&self, page: GuestPage) {
        self.pages.lock().await.push(page);
    }

    /// All recorded link write-backs
    pub async fn saved_links(&self) -> Vec<(String, GuestLinks)> {
        self.saved_links.lock().await.clone()
    }
}

#[async_trait]
impl Directory for Memory {
    async fn find_guests_by_name(&self, guest_name: &str) -> Result<Vec<GuestPage>> {
        Ok(self
            .pages
            .lock()
            .await
            .iter()
            .filter(|page| page.properties.title("Guest Name") == guest_name)
            .cloned()
            .collect())
    }

    async fn save_guest_links(&self, page_id: &str, links: &GuestLinks) -> Result<()> {
        self.saved_links
            .lock()
            .await
            .push((page_id.to_string(), links.clone()));

        Ok(())
    }
}
