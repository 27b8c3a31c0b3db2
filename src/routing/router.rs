//! Named route table used to generate locale-agnostic URLs.
//!
//! # Responsibilities
//! - Store route patterns by name (`/page/{slug}`)
//! - Expand patterns from parameters
//! - Append unused parameters as a query string
//! - Prefix the application base path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Literal paths (starting with `/`) are accepted in place of a route name
//! - Explicit errors for unknown routes and missing parameters

use std::collections::{BTreeMap, HashMap};

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use thiserror::Error;
use url::form_urlencoded;

use crate::config::RouteConfig;
use crate::routing::matcher::join_base_path;

/// Characters escaped inside one path segment (WHATWG path set plus `/` and `%`).
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Built-in demo page route, registered in every table built from config.
pub const PAGE_SHOW_ROUTE: (&str, &str) = ("page.show", "/page/{slug}");

/// Route parameters; ordered so generated query strings are deterministic.
pub type RouteParams = BTreeMap<String, String>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RouteError {
    #[error("unknown route '{0}'")]
    UnknownRoute(String),

    #[error("route '{route}' requires parameter '{param}'")]
    MissingParam { route: String, param: String },
}

/// Produces a base-path-prefixed URL (path + query) for a route.
pub trait UrlGenerator: Send + Sync {
    fn generate(&self, route: &str, params: &RouteParams) -> Result<String, RouteError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Param(String),
}

/// Compiled route table.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    base_path: String,
    routes: HashMap<String, Vec<Piece>>,
}

impl RouteTable {
    pub fn new(base_path: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            routes: HashMap::new(),
        }
    }

    /// Build the table from configuration.
    ///
    /// `page.show` is always present; a configured route of the same name
    /// replaces it.
    pub fn from_config(base_path: &str, routes: &[RouteConfig]) -> Self {
        let mut table = Self::new(base_path);
        table.insert(PAGE_SHOW_ROUTE.0, PAGE_SHOW_ROUTE.1);
        for route in routes {
            table.insert(&route.name, &route.pattern);
        }
        table
    }

    /// Register (or replace) a named pattern.
    pub fn insert(&mut self, name: &str, pattern: &str) {
        self.routes.insert(name.to_string(), compile(pattern));
    }

}

fn compile(pattern: &str) -> Vec<Piece> {
    let mut pieces = Vec::new();
    let mut rest = pattern;
    while let Some(open) = rest.find('{') {
        let Some(close) = rest[open..].find('}') else {
            break;
        };
        if open > 0 {
            pieces.push(Piece::Literal(rest[..open].to_string()));
        }
        pieces.push(Piece::Param(rest[open + 1..open + close].to_string()));
        rest = &rest[open + close + 1..];
    }
    if !rest.is_empty() {
        pieces.push(Piece::Literal(rest.to_string()));
    }
    pieces
}

impl UrlGenerator for RouteTable {
    fn generate(&self, route: &str, params: &RouteParams) -> Result<String, RouteError> {
        let mut used = Vec::new();
        let path = match self.routes.get(route) {
            Some(pieces) => {
                let mut path = String::new();
                for piece in pieces {
                    match piece {
                        Piece::Literal(text) => path.push_str(text),
                        Piece::Param(name) => {
                            let value = params.get(name).ok_or_else(|| RouteError::MissingParam {
                                route: route.to_string(),
                                param: name.clone(),
                            })?;
                            path.extend(utf8_percent_encode(value, PATH_SEGMENT));
                            used.push(name.as_str());
                        }
                    }
                }
                path
            }
            None if route.starts_with('/') => route.to_string(),
            None => return Err(RouteError::UnknownRoute(route.to_string())),
        };

        let mut url = join_base_path(&self.base_path, &path);

        let mut query = form_urlencoded::Serializer::new(String::new());
        let mut has_query = false;
        for (key, value) in params.iter().filter(|(k, _)| !used.contains(&k.as_str())) {
            query.append_pair(key, value);
            has_query = true;
        }
        if has_query {
            url.push('?');
            url.push_str(&query.finish());
        }

        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> RouteParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_named_route_expansion() {
        let mut table = RouteTable::new("");
        table.insert("page.show", "/page/{slug}");

        let url = table
            .generate("page.show", &params(&[("slug", "about"), ("ref", "nav")]))
            .unwrap();
        assert_eq!(url, "/page/about?ref=nav");
    }

    #[test]
    fn test_missing_param() {
        let mut table = RouteTable::new("");
        table.insert("page.show", "/page/{slug}");

        let err = table.generate("page.show", &RouteParams::new()).unwrap_err();
        assert_eq!(
            err,
            RouteError::MissingParam {
                route: "page.show".into(),
                param: "slug".into()
            }
        );
    }

    #[test]
    fn test_literal_path_and_base_path() {
        let table = RouteTable::new("/app");
        assert_eq!(table.generate("/shop/cart", &RouteParams::new()).unwrap(), "/app/shop/cart");
        assert_eq!(table.generate("/", &RouteParams::new()).unwrap(), "/app");
        assert_eq!(
            table.generate("shop", &RouteParams::new()).unwrap_err(),
            RouteError::UnknownRoute("shop".into())
        );
    }

    #[test]
    fn test_param_values_are_encoded() {
        let mut table = RouteTable::new("");
        table.insert("search", "/search/{term}");
        let url = table
            .generate("search", &params(&[("term", "a b"), ("q", "x&y")]))
            .unwrap();
        assert_eq!(url, "/search/a%20b?q=x%26y");
    }

    #[test]
    fn test_path_params_keep_plus_and_escape_slash() {
        let mut table = RouteTable::new("");
        table.insert("search", "/search/{term}");
        let url = table
            .generate("search", &params(&[("term", "c++/x y%"), ("q", "a b+c")]))
            .unwrap();
        assert_eq!(url, "/search/c++%2Fx%20y%25?q=a+b%2Bc");
    }

    #[test]
    fn test_from_config_registers_page_show() {
        let table = RouteTable::from_config(
            "/app",
            &[RouteConfig {
                name: "shop.item".into(),
                pattern: "/shop/{id}".into(),
            }],
        );
        assert_eq!(table.generate("page.show", &params(&[("slug", "a")])).unwrap(), "/app/page/a");
        assert_eq!(table.generate("shop.item", &params(&[("id", "7")])).unwrap(), "/app/shop/7");
    }
}
