//! Demo pages.
//!
//! Each page reports the locale the middleware resolved and offers
//! language-switch links for the current path.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Serialize;

use crate::locale::{LocaleError, LocaleLinks, LocaleSource, ResolvedLocale};
use crate::routing::{RouteParams, PAGE_SHOW_ROUTE};

#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub locale: String,
    pub source: LocaleSource,
    pub path: String,
    /// Link to this page in the current locale.
    pub url: String,
    /// Link to this page per configured locale.
    pub links: BTreeMap<String, String>,
}

fn page_info(
    resolved: &ResolvedLocale,
    links: &LocaleLinks,
    route: &str,
    params: RouteParams,
) -> Result<PageInfo, LocaleError> {
    let mut alternates = BTreeMap::new();
    for locale in links.locales() {
        alternates.insert(locale.to_string(), links.url_for(route, params.clone(), locale)?);
    }
    Ok(PageInfo {
        locale: resolved.locale.clone(),
        source: resolved.source,
        path: resolved.clean_path.clone(),
        url: links.url(route, params)?,
        links: alternates,
    })
}

fn render(status: StatusCode, info: Result<PageInfo, LocaleError>) -> Response {
    match info {
        Ok(info) => (status, Json(info)).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to build page links");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build links").into_response()
        }
    }
}

/// Any path: echo it back with its localized links.
///
/// The language parameter from the visitor's query is dropped; links carry
/// the resolved locale instead.
pub async fn echo_page(
    Extension(resolved): Extension<Arc<ResolvedLocale>>,
    Extension(links): Extension<LocaleLinks>,
    Query(mut params): Query<RouteParams>,
) -> Response {
    params.remove(links.language_param());
    let path = resolved.clean_path.clone();
    render(StatusCode::OK, page_info(&resolved, &links, &path, params))
}

/// `page.show` route.
pub async fn show_page(
    Extension(resolved): Extension<Arc<ResolvedLocale>>,
    Extension(links): Extension<LocaleLinks>,
    Path(slug): Path<String>,
) -> Response {
    let params = RouteParams::from([("slug".to_string(), slug)]);
    render(StatusCode::OK, page_info(&resolved, &links, PAGE_SHOW_ROUTE.0, params))
}

pub async fn health() -> &'static str {
    "OK"
}
