//! Dashboard page embedded in the binary from `web/`

use axum::http::{StatusCode, Uri, header};
use axum::response::{IntoResponse, Response};
use rust_embed::RustEmbed;

#[derive(RustEmbed)]
#[folder = "web/"]
pub struct Assets;

// Assets are not content-hashed, so always revalidate against the ETag
const CACHE_REVALIDATE: &str = "public, max-age=0, must-revalidate";

pub async fn serve_assets(uri: Uri) -> Response {
    let path = uri.path().trim_start_matches('/');
    let path = if path.is_empty() { "index.html" } else { path };

    if let Some(response) = asset_response(path) {
        return response;
    }

    // Unknown paths under /ui get the page itself
    asset_response("index.html")
        .unwrap_or_else(|| (StatusCode::NOT_FOUND, "404 Not Found").into_response())
}

fn asset_response(path: &str) -> Option<Response> {
    let file = Assets::get(path)?;
    let mime = mime_guess::from_path(path).first_or_octet_stream();
    let etag = hex::encode(file.metadata.sha256_hash());

    Some(
        (
            [
                (header::CONTENT_TYPE, mime.to_string()),
                (header::CACHE_CONTROL, CACHE_REVALIDATE.to_string()),
                (header::ETAG, format!("\"{}\"", etag)),
            ],
            file.data.into_owned(),
        )
            .into_response(),
    )
}
