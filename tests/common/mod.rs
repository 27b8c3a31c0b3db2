//! Shared utilities for integration testing.

use std::net::SocketAddr;

use locale_router::config::{AppConfig, LanguageConfig, RouteConfig};
use locale_router::{HttpServer, Shutdown};

/// Languages used across the integration tests.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.locale.languages = vec![
        LanguageConfig::Code("en_us".into()),
        LanguageConfig::Code("en".into()),
        LanguageConfig::Alias {
            alias: "deutsch".into(),
            code: "de".into(),
        },
        LanguageConfig::Code("fr".into()),
    ];
    config.locale.default_locale = "en".into();
    config.routes.push(RouteConfig {
        name: "shop.item".into(),
        pattern: "/shop/{id}".into(),
    });
    config
}

/// Start a server on an ephemeral port.
pub async fn start_server(config: AppConfig) -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = HttpServer::new(config).unwrap();

    let shutdown = Shutdown::new();
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

/// `name=value` pairs from the response's Set-Cookie headers.
#[allow(dead_code)]
pub fn set_cookies(res: &reqwest::Response) -> Vec<String> {
    res.headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::to_string)
        .collect()
}
