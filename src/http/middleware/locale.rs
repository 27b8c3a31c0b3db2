//! Locale middleware.
//! Resolves the request locale before routing and strips the language
//! segment so downstream routes stay locale-agnostic.

use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{header::LOCATION, HeaderValue, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::cookies::CookieJar;
use crate::http::negotiation::preferred_languages;
use crate::http::request::{request_id, rewrite_uri, RequestTarget};
use crate::http::session::{SessionHandle, SessionStore};
use crate::locale::{
    LocaleResolver, LocaleSignals, LocaleSource, LocaleUrlBuilder, Redirect, RedirectKind, RequestLocale,
};
use crate::observability::metrics;

/// State shared by every request passing through the middleware.
#[derive(Clone)]
pub struct LocaleState {
    pub resolver: LocaleResolver,
    pub builder: LocaleUrlBuilder,
    pub sessions: Arc<SessionStore>,
    pub session_cookie: Arc<str>,
}

pub async fn locale_middleware(
    State(state): State<LocaleState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let config = state.resolver.config();

    let Some(target) = RequestTarget::from_uri(request.uri(), &config.base_path) else {
        // outside the application; let the router answer
        return next.run(request).await;
    };

    let jar = CookieJar::from_headers(request.headers(), &config.base_path);
    let preferred = preferred_languages(request.headers());
    let memo = RequestLocale::new();

    let resolved = {
        let session = SessionHandle::new(&state.sessions, &jar, &state.session_cookie);
        let signals = LocaleSignals {
            persisted: &session,
            cookies: &jar,
            preferred: &preferred,
        };
        memo.resolve(&state.resolver, &target.as_locale_request(), &signals)
    };

    metrics::record_resolution(resolved.source);
    if resolved.source == LocaleSource::PathPrefix && config.persist_language {
        metrics::record_persist_write();
    }

    let rid = request_id(request.headers()).to_string();

    if let Some(redirect) = &resolved.redirect {
        tracing::info!(
            request_id = %rid,
            locale = %resolved.locale,
            source = resolved.source.as_str(),
            location = %redirect.location,
            kind = redirect.kind.as_str(),
            "Locale redirect"
        );
        metrics::record_redirect(redirect.kind);
        let mut response = redirect_response(redirect);
        jar.write_to(response.headers_mut());
        return response;
    }

    tracing::debug!(
        request_id = %rid,
        locale = %resolved.locale,
        source = resolved.source.as_str(),
        clean_path = %resolved.clean_path,
        "Locale resolved"
    );

    match rewrite_uri(request.uri(), &config.base_path, &resolved.clean_path) {
        Some(uri) => *request.uri_mut() = uri,
        None => tracing::warn!(request_id = %rid, clean_path = %resolved.clean_path, "Could not rewrite request URI"),
    }

    let links = state.builder.for_locale(resolved.locale.clone());
    let extensions = request.extensions_mut();
    extensions.insert(resolved);
    extensions.insert(links);

    let mut response = next.run(request).await;
    jar.write_to(response.headers_mut());
    response
}

fn redirect_response(redirect: &Redirect) -> Response {
    let status = match redirect.kind {
        RedirectKind::Permanent => StatusCode::MOVED_PERMANENTLY,
        RedirectKind::Temporary => StatusCode::FOUND,
    };
    match HeaderValue::from_str(&redirect.location) {
        Ok(location) => (status, [(LOCATION, location)]).into_response(),
        Err(e) => {
            tracing::error!(location = %redirect.location, error = %e, "Invalid redirect location");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
