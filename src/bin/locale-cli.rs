use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use axum::http::{header::ACCEPT_LANGUAGE, HeaderMap, HeaderValue, Uri};
use clap::{Parser, Subcommand};
use serde_json::json;

use locale_router::config::{load_config, AppConfig};
use locale_router::http::negotiation::preferred_languages;
use locale_router::http::RequestTarget;
use locale_router::locale::state::{MemoryCookies, MemoryState};
use locale_router::locale::{LocaleConfig, LocaleResolver, LocaleSignals, LocaleUrlBuilder, LANGUAGE_KEY};
use locale_router::routing::{RouteTable, PAGE_SHOW_ROUTE};

#[derive(Parser)]
#[command(name = "locale-cli")]
#[command(about = "Resolve and build localized URLs offline", long_about = None)]
struct Cli {
    /// Configuration file (defaults are used when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the locale of a request
    Resolve {
        /// Request URI, e.g. /de/page?x=1
        uri: String,
        /// Accept-Language header value
        #[arg(long)]
        accept: Option<String>,
        /// Locale stored in the session
        #[arg(long)]
        persisted: Option<String>,
        /// Value of the language cookie
        #[arg(long)]
        cookie: Option<String>,
    },
    /// Build a localized URL
    Build {
        /// Route name or literal path
        route: String,
        /// Route parameter as key=value
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
        /// Force this locale
        #[arg(short, long)]
        locale: Option<String>,
        /// Current request locale (defaults to the default locale)
        #[arg(long)]
        current: Option<String>,
    },
    /// Validate the configuration and print the language table
    Check,
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))
}

fn parse_target(raw: &str, base_path: &str) -> Result<RequestTarget, Box<dyn std::error::Error>> {
    let uri: Uri = raw.parse()?;
    RequestTarget::from_uri(&uri, base_path)
        .ok_or_else(|| format!("{uri} is outside base path '{base_path}'").into())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };
    let locale_config = Arc::new(LocaleConfig::from_settings(&config.locale)?);

    match cli.command {
        Commands::Resolve {
            uri,
            accept,
            persisted,
            cookie,
        } => {
            let target = parse_target(&uri, &locale_config.base_path)?;

            let mut headers = HeaderMap::new();
            if let Some(accept) = accept {
                headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_str(&accept)?);
            }
            let preferred = preferred_languages(&headers);
            let state = match persisted {
                Some(locale) => MemoryState::with_value(LANGUAGE_KEY, &locale),
                None => MemoryState::new(),
            };
            let cookies = match cookie {
                Some(locale) => MemoryCookies::with_cookie(LANGUAGE_KEY, &locale),
                None => MemoryCookies::new(),
            };
            let signals = LocaleSignals {
                persisted: &state,
                cookies: &cookies,
                preferred: &preferred,
            };

            let resolved = LocaleResolver::new(locale_config).resolve(&target.as_locale_request(), &signals);
            let written: Vec<_> = cookies
                .written()
                .into_iter()
                .map(|c| json!({ "name": c.name, "value": c.value, "max_age": c.lifetime.as_secs() }))
                .collect();
            let output = json!({
                "resolved": resolved,
                "preferred": preferred,
                "session_writes": state.writes(),
                "cookies": written,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        Commands::Build {
            route,
            params,
            locale,
            current,
        } => {
            let routes = RouteTable::from_config(&locale_config.base_path, &config.routes);
            let current = current.unwrap_or_else(|| locale_config.default_locale.clone());
            let builder = LocaleUrlBuilder::new(locale_config, Arc::new(routes));
            let params: BTreeMap<String, String> = params.into_iter().collect();
            println!("{}", builder.build(&route, params, locale.as_deref(), &current)?);
        }
        Commands::Check => {
            let table: Vec<_> = locale_config
                .languages
                .entries()
                .iter()
                .map(|e| json!({ "segment": e.segment(), "locale": e.locale() }))
                .collect();
            let routes: BTreeMap<&str, &str> = std::iter::once(PAGE_SHOW_ROUTE)
                .chain(config.routes.iter().map(|r| (r.name.as_str(), r.pattern.as_str())))
                .collect();
            let output = json!({
                "languages": table,
                "default_locale": locale_config.default_locale,
                "base_path": locale_config.base_path,
                "persist_language": locale_config.persist_language,
                "redirect_default": locale_config.redirect_default,
                "detect_language": locale_config.detect_language,
                "cookie_lifetime_secs": locale_config.cookie_lifetime.map(|d| d.as_secs()),
                "routes": routes,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
    }

    Ok(())
}
