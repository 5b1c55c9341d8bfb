//! HTTP surface.
//!
//! ```text
//! GET /{Videos|Items}/{Id}/Font/List
//! GET /{Videos|Items}/{Id}/Font/{Index}/Stream?SetFilename=bool
//! ```

use crate::catalog::FontCatalog;
use crate::disposition::content_disposition;
use crate::library::{video_attachments, MediaLibrary};
use crate::resolve::FontResolver;
use hyper::Body;
use mkvfont_core::{Error, ResolvedFont};
use serde::de::{self, Deserializer};
use serde::Deserialize;
use std::convert::Infallible;
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;
use warp::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use warp::http::{HeaderValue, StatusCode};
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Clone)]
pub struct AppState {
    library: Arc<dyn MediaLibrary>,
    resolver: Arc<FontResolver>,
    catalog: FontCatalog,
}

impl AppState {
    pub fn new(library: Arc<dyn MediaLibrary>, resolver: Arc<FontResolver>) -> Self {
        let catalog = FontCatalog::new(resolver.clone());
        AppState { library, resolver, catalog }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct StreamQuery {
    #[serde(rename = "SetFilename", alias = "setFilename", default, deserialize_with = "lenient_bool")]
    pub set_filename: bool,
}

/// `true`/`false` in any case, `1`/`0`, or empty for false.
fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" | "" => Ok(false),
        _ => Err(de::Error::invalid_value(de::Unexpected::Str(&value), &"a boolean")),
    }
}

fn with_state(state: AppState) -> impl Filter<Extract = (AppState,), Error = Infallible> + Clone {
    warp::any().map(move || state.clone())
}

pub fn routes(state: AppState) -> impl Filter<Extract = (Response,), Error = Rejection> + Clone {
    let fonts = warp::path("Videos")
        .or(warp::path("Items"))
        .unify()
        .and(warp::path::param::<i64>())
        .and(warp::path("Font"));

    let list = fonts
        .clone()
        .and(warp::path("List"))
        .and(warp::path::end())
        .and(with_state(state.clone()))
        .and_then(list_fonts);

    let stream = fonts
        .and(warp::path::param::<i32>())
        .and(warp::path("Stream"))
        .and(warp::path::end())
        .and(warp::query::<StreamQuery>())
        .and(with_state(state))
        .and_then(stream_font);

    warp::get().and(list.or(stream).unify())
}

async fn list_fonts(id: i64, state: AppState) -> Result<Response, Infallible> {
    let span = info_span!("font_list", request_id = %Uuid::new_v4(), item = id);
    let response = async move {
        info!("listing embedded fonts");
        let (path, tracks) = match video_attachments(state.library.as_ref(), id) {
            Ok(found) => found,
            Err(e) => return error_response(&e),
        };
        let names = state.catalog.list_display_names(&path, &tracks).await;
        debug!(count = names.len(), "fonts listed");
        warp::reply::json(&names).into_response()
    };
    Ok(response.instrument(span).await)
}

async fn stream_font(id: i64, index: i32, query: StreamQuery, state: AppState) -> Result<Response, Infallible> {
    let span = info_span!("font_stream", request_id = %Uuid::new_v4(), item = id, index);
    let response = async move {
        info!(set_filename = query.set_filename, "streaming embedded font");
        let (path, tracks) = match video_attachments(state.library.as_ref(), id) {
            Ok(found) => found,
            Err(e) => return error_response(&e),
        };
        match state.resolver.resolve_content(&path, &tracks, index, query.set_filename).await {
            Ok(font) => font_response(font),
            Err(e) => error_response(&e),
        }
    };
    Ok(response.instrument(span).await)
}

fn font_response(font: ResolvedFont) -> Response {
    let length = font.content.len();
    let content_type = Some(font.mime_type.trim())
        .filter(|mime| !mime.is_empty())
        .and_then(|mime| HeaderValue::from_str(mime).ok())
        .unwrap_or_else(|| HeaderValue::from_static(FALLBACK_CONTENT_TYPE));
    let disposition = font
        .filename
        .as_deref()
        .filter(|name| !name.is_empty())
        .and_then(|name| HeaderValue::from_str(&content_disposition(name)).ok());

    let mut response = Response::new(Body::from(font.content.into_bytes()));
    let headers = response.headers_mut();
    headers.insert(CONTENT_LENGTH, HeaderValue::from(length));
    headers.insert(CONTENT_TYPE, content_type);
    if let Some(disposition) = disposition {
        headers.insert(CONTENT_DISPOSITION, disposition);
    }
    debug!(bytes = length, "font served");
    response
}

fn status_of(error: &Error) -> StatusCode {
    match error {
        Error::NotFound(_) | Error::InvalidIndex(_) => StatusCode::NOT_FOUND,
        Error::Library(_) | Error::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn error_response(error: &Error) -> Response {
    let status = status_of(error);
    info!(%error, status = status.as_u16(), "request not served");
    warp::reply::with_status(warp::reply(), status).into_response()
}
