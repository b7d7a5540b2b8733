//! The PDF download
//!
//! Rederives the same slug and canonical URL as the welcome page, rendering
//! the PDF through the external tool on the first request for a slug

use axum::Extension;
use axum::extract::Path;
use axum::http::HeaderMap;
use axum::http::HeaderValue;
use axum::http::StatusCode;
use axum::http::header::CONTENT_DISPOSITION;
use axum::http::header::CONTENT_TYPE;
use tokio::fs;

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::links;

use super::internal_error;

/// Serve the rendered welcome page PDF as a download
///
/// No directory lookup happens here; the artifact is addressed purely by the
/// derived slug
pub async fn document(
    Path((guest_name, created)): Path<(String, String)>,
    Extension(artifacts): Extension<ArtifactStore>,
    Extension(config): Extension<Config>,
) -> Result<(HeaderMap, Vec<u8>), (StatusCode, String)> {
    let slug = links::slug(&guest_name, &created);
    let guest_url = links::canonical_url(&config.base_url, &guest_name, &created);

    tracing::debug!("Serving PDF for slug: {slug}");

    let path = artifacts
        .ensure_pdf(&slug, &guest_url)
        .await
        .map_err(internal_error)?;

    // a renderer that silently produced nothing fails here
    let pdf = fs::read(&path).await.map_err(internal_error)?;

    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/pdf"));
    headers.insert(
        CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!(
            "attachment; filename=\"{guest_name}_welcome.pdf\""
        ))
        .map_err(internal_error)?,
    );

    Ok((headers, pdf))
}
