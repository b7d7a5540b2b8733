//! Generated artifacts
//!
//! QR images and rendered PDFs, cached on disk and keyed by slug. Both are
//! created lazily on first request and never regenerated. Writes go to a
//! sibling temporary path first and are renamed into place, so a half-written
//! file is never served to a concurrent request.

use std::io::Cursor;
use std::path::Path;
use std::path::PathBuf;

use image::DynamicImage;
use image::ImageFormat;
use image::Luma;
use qrcode::QrCode;
use thiserror::Error;
use tokio::fs;
use tokio::process::Command;

use crate::config::Config;

/// Directory for QR images, under the static root
const QR_DIR: &str = "qrcodes";

/// Directory for rendered PDFs, under the static root
const PDF_DIR: &str = "pdfs";

/// Rendered size of the QR image in pixels, matches the page's `<img>` width
const QR_SIZE: u32 = 180;

/// Artifact errors
#[derive(Debug, Error)]
pub enum Error {
    /// Filesystem or subprocess trouble
    #[error("Artifact I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The guest URL does not fit in a QR code
    #[error("QR encoding error: {0}")]
    Qr(#[from] qrcode::types::QrError),

    /// The QR image could not be encoded as PNG
    #[error("QR image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for all artifact interactions
pub type Result<T> = core::result::Result<T, Error>;

/// On-disk store for generated artifacts
#[derive(Clone, Debug)]
pub struct ArtifactStore {
    /// Where QR images live
    qr_dir: PathBuf,

    /// Where rendered PDFs live
    pdf_dir: PathBuf,

    /// Command invoked as `renderer <url> <output-path>`
    pdf_renderer: String,
}

impl ArtifactStore {
    /// Create the store and its directories
    ///
    /// # Errors
    ///
    /// Will return `Err` if the directories can not be created
    pub async fn prepare(config: &Config) -> Result<Self> {
        let qr_dir = config.static_root.join(QR_DIR);
        let pdf_dir = config.static_root.join(PDF_DIR);

        fs::create_dir_all(&qr_dir).await?;
        fs::create_dir_all(&pdf_dir).await?;

        Ok(Self {
            qr_dir,
            pdf_dir,
            pdf_renderer: config.pdf_renderer.clone(),
        })
    }

    /// Path of a QR image relative to the web root
    pub fn qr_web_path(slug: &str) -> String {
        format!("/static/{QR_DIR}/{slug}.png")
    }

    /// Ensure a QR image encoding the guest URL exists for the slug
    ///
    /// Idempotent: an existing image is left untouched, even when the URL
    /// derivation has changed since it was written
    pub async fn ensure_qr(&self, slug: &str, guest_url: &str) -> Result<()> {
        let path = self.qr_dir.join(format!("{slug}.png"));

        if fs::try_exists(&path).await? {
            tracing::debug!("QR image for {slug} already exists");

            return Ok(());
        }

        let png = encode_qr_png(guest_url)?;

        let temp = temp_path(&path);
        fs::write(&temp, &png).await?;
        fs::rename(&temp, &path).await?;

        tracing::debug!("Wrote QR image for {slug}");

        Ok(())
    }

    /// Ensure a rendered PDF of the guest URL exists for the slug
    ///
    /// The renderer is trusted to produce the file; its exit status is only
    /// logged. A renderer that silently produced nothing surfaces when the
    /// returned path is read back.
    pub async fn ensure_pdf(&self, slug: &str, guest_url: &str) -> Result<PathBuf> {
        let path = self.pdf_dir.join(format!("{slug}.pdf"));

        if fs::try_exists(&path).await? {
            tracing::debug!("PDF for {slug} already exists");

            return Ok(path);
        }

        let temp = temp_path(&path);
        let status = Command::new(&self.pdf_renderer)
            .arg(guest_url)
            .arg(&temp)
            .status()
            .await?;

        tracing::debug!("Renderer for {slug} exited with {status}");

        if fs::try_exists(&temp).await? {
            fs::rename(&temp, &path).await?;
        }

        Ok(path)
    }
}

/// Encode a URL as a PNG QR image
fn encode_qr_png(url: &str) -> Result<Vec<u8>> {
    let code = QrCode::new(url)?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(QR_SIZE, QR_SIZE)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image).write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

    Ok(png)
}

/// Sibling temporary path for rename-into-place writes
fn temp_path(path: &Path) -> PathBuf {
    let mut temp = path.as_os_str().to_owned();
    temp.push(".tmp");

    PathBuf::from(temp)
}
