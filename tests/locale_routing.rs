//! End-to-end locale routing over real HTTP.

use reqwest::header::{ACCEPT_LANGUAGE, COOKIE, LOCATION};
use reqwest::StatusCode;
use serde_json::Value;

mod common;

#[tokio::test]
async fn test_prefixed_page_and_links() {
    let (addr, shutdown) = common::start_server(common::test_config()).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/deutsch/shop/42?ref=nav", addr))
        .send()
        .await
        .expect("server unreachable");
    assert_eq!(res.status(), StatusCode::OK);

    let cookies = common::set_cookies(&res);
    assert!(cookies.contains(&"__language=de".to_string()), "{cookies:?}");
    assert!(cookies.iter().any(|c| c.starts_with("locale_session=")), "{cookies:?}");

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["locale"], "de");
    assert_eq!(body["path"], "/shop/42");
    assert_eq!(body["url"], "/deutsch/shop/42?ref=nav");
    assert_eq!(body["links"]["fr"], "/fr/shop/42?ref=nav");
    assert_eq!(body["links"]["en"], "/en/shop/42?ref=nav");

    shutdown.trigger();
}

#[tokio::test]
async fn test_choice_remembered_across_requests() {
    let (addr, shutdown) = common::start_server(common::test_config()).await;
    let client = common::client();

    let first = client
        .get(format!("http://{}/fr/about", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    let session = common::set_cookies(&first)
        .into_iter()
        .find(|c| c.starts_with("locale_session="))
        .expect("session cookie");

    // session alone, no language cookie
    let second = client
        .get(format!("http://{}/about?x=1", addr))
        .header(COOKIE, session)
        .send()
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::FOUND);
    assert_eq!(second.headers()[LOCATION], "/fr/about?x=1");

    shutdown.trigger();
}

#[tokio::test]
async fn test_unprefixed_default_served_directly() {
    let (addr, shutdown) = common::start_server(common::test_config()).await;
    let client = common::client();

    let res = client.get(format!("http://{}/about", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(common::set_cookies(&res).is_empty());

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["locale"], "en");
    assert_eq!(body["source"], "default");
    assert_eq!(body["url"], "/about");

    shutdown.trigger();
}

#[tokio::test]
async fn test_default_prefix_redirects_permanently() {
    let (addr, shutdown) = common::start_server(common::test_config()).await;
    let client = common::client();

    let res = client.get(format!("http://{}/en/about", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(res.headers()[LOCATION], "/about");
    assert!(common::set_cookies(&res).contains(&"__language=en".to_string()));

    shutdown.trigger();
}

#[tokio::test]
async fn test_negotiation_redirect() {
    let mut config = common::test_config();
    config.locale.detect_language = true;
    config.locale.redirect_default = true;
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/about", addr))
        .header(ACCEPT_LANGUAGE, "it, de-DE;q=0.9, de;q=0.8")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/deutsch/about");

    let res = client.get(format!("http://{}/about", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/en/about");

    shutdown.trigger();
}

#[tokio::test]
async fn test_base_path_deployment() {
    let mut config = common::test_config();
    config.locale.base_path = "/app".into();
    let (addr, shutdown) = common::start_server(config).await;
    let client = common::client();

    let res = client
        .get(format!("http://{}/app/shop/7", addr))
        .header(COOKIE, "__language=fr")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FOUND);
    assert_eq!(res.headers()[LOCATION], "/app/fr/shop/7");

    let res = client.get(format!("http://{}/app/fr/shop/7", addr)).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["path"], "/shop/7");
    assert_eq!(body["url"], "/app/fr/shop/7");

    shutdown.trigger();
}

#[tokio::test]
async fn test_concurrent_requests_resolve_independently() {
    let (addr, shutdown) = common::start_server(common::test_config()).await;
    let client = common::client();

    let mut tasks = Vec::new();
    for i in 0..40 {
        let client = client.clone();
        let (segment, locale) = match i % 4 {
            0 => ("en_us", "en_us"),
            1 => ("deutsch", "de"),
            2 => ("fr", "fr"),
            _ => ("", "en"),
        };
        let path = if segment.is_empty() {
            format!("/item/{i}")
        } else {
            format!("/{segment}/item/{i}")
        };
        let url = format!("http://{}{}", addr, path);
        tasks.push(tokio::spawn(async move {
            let res = client.get(&url).send().await.unwrap();
            assert_eq!(res.status(), StatusCode::OK, "{url}");
            let body: Value = res.json().await.unwrap();
            assert_eq!(body["locale"], locale, "{url}");
            assert_eq!(body["path"], format!("/item/{i}"), "{url}");
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    shutdown.trigger();
}
