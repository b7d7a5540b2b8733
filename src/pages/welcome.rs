//! The welcome page
//!
//! Looks a guest up in the directory, materializes the QR image and the link
//! write-back, and renders the page itself

use axum::Extension;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Response;
use percent_encoding::AsciiSet;
use percent_encoding::CONTROLS;
use percent_encoding::utf8_percent_encode;

use crate::artifacts::ArtifactStore;
use crate::config::Config;
use crate::directory::Directory;
use crate::directory::GuestLinks;
use crate::links;

use super::internal_error;

/// Characters escaped in the path segments of the PDF link
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Render the welcome page for a guest
///
/// The guest is looked up by name; among the matches, the first whose creation
/// time starts with the date part of `created` wins. A hit generates the QR
/// image (once) and writes the derived links back to the directory (always).
pub async fn welcome<D: Directory>(
    Path((guest_name, created)): Path<(String, String)>,
    Extension(directory): Extension<D>,
    Extension(artifacts): Extension<ArtifactStore>,
    Extension(config): Extension<Config>,
) -> Result<Response, (StatusCode, String)> {
    let created_prefix = links::created_prefix(&created);

    tracing::debug!("Looking for guest: {guest_name}, created {created_prefix}");

    let guests = directory
        .find_guests_by_name(&guest_name)
        .await
        .map_err(internal_error)?;

    // first match in directory order
    let Some(guest) = guests
        .into_iter()
        .find(|guest| guest.created_time.starts_with(created_prefix))
    else {
        tracing::debug!("No guest found with name: {guest_name}");

        return Ok((
            StatusCode::NOT_FOUND,
            format!("No guest found with name: {guest_name} and created: {created}"),
        )
            .into_response());
    };

    let slug = links::slug(&guest_name, &created);
    let guest_url = links::canonical_url(&config.base_url, &guest_name, &created);
    let qr_web_path = ArtifactStore::qr_web_path(&slug);

    artifacts
        .ensure_qr(&slug, &guest_url)
        .await
        .map_err(internal_error)?;

    let guest_links = GuestLinks {
        qr_code_url: format!("{}{qr_web_path}", config.base_url),
        welcome_page_url: guest_url,
    };

    directory
        .save_guest_links(&guest.id, &guest_links)
        .await
        .map_err(internal_error)?;

    let pdf_href = format!(
        "/guest/{}/{}/pdf",
        utf8_percent_encode(&guest_name, PATH_SEGMENT),
        utf8_percent_encode(&created, PATH_SEGMENT),
    );

    let page = WelcomePage {
        name: guest.properties.title("Guest Name"),
        room_number: guest.properties.number("Room Number"),
        room_type: guest.properties.select("Room Type"),
        phone: guest.properties.text("Guest Phone Number"),
        checkin: guest.properties.date("Check-in Date"),
        checkout: guest.properties.date("Check-out Date"),
        registered: guest.created_time,
        qr_path: qr_web_path,
        pdf_href,
    };

    Ok(Html(page.render()).into_response())
}

/// Values rendered into the welcome page
struct WelcomePage {
    name: String,
    room_number: String,
    room_type: String,
    phone: String,
    checkin: String,
    checkout: String,
    registered: String,
    qr_path: String,
    pdf_href: String,
}

/// Stylesheet of the welcome page
const STYLE: &str = "
        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; background-color: #f2f2f2; margin: 0; padding: 0; }
        .header { background-color: #003366; color: white; padding: 25px 0; text-align: center; font-size: 30px; font-weight: bold; letter-spacing: 1px; box-shadow: 0 4px 6px rgba(0, 0, 0, 0.2); }
        .card { background-color: white; max-width: 700px; margin: 40px auto; padding: 40px; border-radius: 16px; box-shadow: 0 6px 20px rgba(0, 0, 0, 0.1); }
        .card h1 { color: #003366; font-size: 28px; margin-bottom: 20px; }
        .card p { font-size: 17px; line-height: 1.7; margin: 12px 0; }
        .card img { display: block; margin: 30px auto 20px; }
        .download-btn { display: block; width: 220px; margin: 20px auto; padding: 12px; background-color: #003366; color: white; text-align: center; text-decoration: none; border-radius: 8px; font-weight: bold; }
        .footer { text-align: center; font-size: 14px; color: #666; margin-top: 25px; }
    ";

impl WelcomePage {
    /// Render the page, escaping every directory-supplied value
    fn render(&self) -> String {
        let name = escape_html(&self.name);
        let room_number = escape_html(&self.room_number);
        let room_type = escape_html(&self.room_type);
        let phone = escape_html(&self.phone);
        let checkin = escape_html(&self.checkin);
        let checkout = escape_html(&self.checkout);
        let registered = escape_html(&self.registered);
        let qr_path = &self.qr_path;
        let pdf_href = &self.pdf_href;

        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>Welcome {name}</title>
    <style>{STYLE}</style>
</head>
<body>
    <div class="header">Welcome to Royal Horizon Hotel</div>
    <div class="card">
        <h1>Hello, {name}!</h1>
        <p><strong>Room Number:</strong> {room_number}</p>
        <p><strong>Room Type:</strong> {room_type}</p>
        <p><strong>Phone Number:</strong> {phone}</p>
        <p><strong>Check-in:</strong> {checkin}</p>
        <p><strong>Check-out:</strong> {checkout}</p>
        <p><strong>Registered On:</strong> {registered}</p>
        <img src="{qr_path}" width="180" alt="QR Code"/>
        <a class="download-btn" href="{pdf_href}">Download as PDF</a>
        <div class="footer">Scan this QR code to revisit this welcome page.</div>
    </div>
</body>
</html>"#
        )
    }
}

/// Minimal HTML escaping for directory-supplied values
fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());

    for character in value.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(character),
        }
    }

    escaped
}
