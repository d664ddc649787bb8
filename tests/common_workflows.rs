//! Integration tests for common Springfield workflows.
//!
//! Configuration is loaded the way a deployment loads it, then requests go
//! through the tower layer in front of a page handler.

use bytes::Bytes;
use http::header::{ACCEPT_LANGUAGE, LOCATION, VARY};
use http::{Request, Response, StatusCode};
use http_body_util::{BodyExt, Full};
use springfield::metrics::MetricsMock;
use springfield::prelude::*;
use springfield::{InMemoryActivation, InMemoryPageStore, normalize};
use std::convert::Infallible;
use std::io::Write;
use std::sync::Arc;
use tower::{ServiceBuilder, ServiceExt, service_fn};

// =============================================================================
// Fixtures
// =============================================================================

fn site_config() -> Arc<SiteLocaleConfig> {
    let manager = ConfigManager::new();
    Arc::new(springfield::site_config_from(&manager).unwrap())
}

fn pipeline(config: Arc<SiteLocaleConfig>, metrics: Arc<MetricsMock>) -> Arc<LocalePipeline> {
    let locales = ["en-US", "en-GB", "fr", "es-ES"];
    let templates = TemplateCatalog::new(config.clone(), Arc::new(InMemoryActivation::new()))
        .route("/", TemplateSpec::new("home.html").active_locales(locales))
        .route(
            "/download/",
            TemplateSpec::new("firefox/download.html").active_locales(locales),
        );

    let store = Arc::new(InMemoryPageStore::new());
    let about = store.add("en-US", "/about/", "about");
    store.translate(about, "de");

    let catalog = SiteCatalog::new(config.clone())
        .with_templates(templates)
        .with_cms(CmsCatalog::new(config.clone(), store));

    Arc::new(LocalePipeline::new(config, Arc::new(catalog)).with_metrics(metrics))
}

async fn page(req: Request<()>) -> Result<Response<Full<Bytes>>, Infallible> {
    let locale = req
        .extensions()
        .get::<ActiveLocale>()
        .map(|active| active.locale.to_string())
        .unwrap_or_default();
    Ok(Response::new(Full::new(Bytes::from(locale))))
}

fn get(path: &str, accept: Option<&str>) -> Request<()> {
    let mut builder = Request::builder().uri(path);
    if let Some(accept) = accept {
        builder = builder.header(ACCEPT_LANGUAGE, accept);
    }
    builder.body(()).unwrap()
}

async fn send(pipeline: &Arc<LocalePipeline>, req: Request<()>) -> Response<Full<Bytes>> {
    ServiceBuilder::new()
        .layer(LocaleLayer::new(pipeline.clone()))
        .service(service_fn(page))
        .oneshot(req)
        .await
        .unwrap()
}

async fn served_locale(response: Response<Full<Bytes>>) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

// =============================================================================
// Configuration
// =============================================================================

#[test]
fn test_config_defaults() {
    let config = site_config();
    assert_eq!(config.default_language().as_str(), "en-US");
    assert!(config.is_nonlocale_segment("robots.txt"));
    assert_eq!(normalize(&config, "EN-gb").unwrap(), "en-GB");
    assert_eq!(normalize(&config, "es").unwrap(), "es-ES");
}

#[test]
fn test_config_from_file() {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
    writeln!(
        file,
        r#"
default_language = "fr"
prod_languages = ["fr", "de", "en-US"]
canonical_locales = {{ en = "en-US" }}
"#
    )
    .unwrap();

    let manager = ConfigManager::new();
    manager.load_file(file.path()).unwrap();
    let config = springfield::site_config_from(&manager).unwrap();

    assert_eq!(config.default_language().as_str(), "fr");
    assert_eq!(normalize(&config, "en-ZA").unwrap(), "en-US");
    assert!(normalize(&config, "es").is_none());
}

#[test]
fn test_invalid_config_is_rejected() {
    let manager = ConfigManager::new();
    manager.set("default_language", "xx").unwrap();
    assert!(springfield::site_config_from(&manager).is_err());
}

// =============================================================================
// Requests through the layer
// =============================================================================

#[tokio::test]
async fn test_download_without_locale_redirects_to_default() {
    let metrics = Arc::new(MetricsMock::new());
    let pipeline = pipeline(site_config(), metrics.clone());

    let response = send(&pipeline, get("/download/", None)).await;
    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(response.headers()[LOCATION], "/en-US/download/");
    assert_eq!(response.headers()[VARY], "Accept-Language");
    metrics.assert_incr_once(REDIRECT_METRIC, &["from_locale:none", "to_locale:en-US"]);
}

#[tokio::test]
async fn test_negotiated_redirects() {
    let cases = [
        ("/download/", "fr-FR", "/fr/download/"),
        ("/download/", "zu,fr;q=0.7,en;q=0.3", "/fr/download/"),
        ("/download/", "es-CL,es;q=0.7,en;q=0.3", "/es-ES/download/"),
        ("/de/download/", "de", "/en-US/download/"),
        ("/en-gb/", "de", "/en-GB/"),
        ("/", "en-us", "/en-US/"),
    ];

    for (path, accept, location) in cases {
        let metrics = Arc::new(MetricsMock::new());
        let pipeline = pipeline(site_config(), metrics.clone());

        let response = send(&pipeline, get(path, Some(accept))).await;
        assert_eq!(response.status(), StatusCode::FOUND, "{path}");
        assert_eq!(response.headers()[LOCATION], location, "{path}");
        assert_eq!(metrics.count(REDIRECT_METRIC), 1, "{path}");
    }
}

#[tokio::test]
async fn test_served_pages() {
    let metrics = Arc::new(MetricsMock::new());
    let pipeline = pipeline(site_config(), metrics.clone());

    let response = send(&pipeline, get("/en-US/download/", None)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(VARY).is_none());
    assert_eq!(served_locale(response).await, "en-US");

    let response = send(&pipeline, get("/en-GB/", Some("de"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[VARY], "Accept-Language");
    assert_eq!(served_locale(response).await, "en-GB");

    let response = send(&pipeline, get("/robots.txt", Some("fr"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers().get(VARY).is_none());
    assert_eq!(served_locale(response).await, "en-US");

    metrics.assert_not_incr(REDIRECT_METRIC);
}

#[tokio::test]
async fn test_query_string_survives_redirect() {
    let pipeline = pipeline(site_config(), Arc::new(MetricsMock::new()));

    let response = send(&pipeline, get("/download/?utm_source=mozilla.org", Some("fr"))).await;
    assert_eq!(response.headers()[LOCATION], "/fr/download/?utm_source=mozilla.org");
}

#[tokio::test]
async fn test_cms_page_falls_back_to_translation() {
    let metrics = Arc::new(MetricsMock::new());
    let pipeline = pipeline(site_config(), metrics.clone());

    let response = send(&pipeline, get("/about/", Some("de-AT,de;q=0.8"))).await;
    assert_eq!(response.headers()[LOCATION], "/de/about/");

    let response = send(&pipeline, get("/fr/about/", None)).await;
    assert_eq!(response.headers()[LOCATION], "/en-US/about/");
    assert_eq!(metrics.count(REDIRECT_METRIC), 2);
}

#[tokio::test]
async fn test_unknown_page_is_not_found() {
    let metrics = Arc::new(MetricsMock::new());
    let pipeline = pipeline(site_config(), metrics.clone());

    let response = send(&pipeline, get("/fr/no-such-page/", None)).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    metrics.assert_not_incr(REDIRECT_METRIC);
}

#[tokio::test]
async fn test_redirect_target_is_served() {
    let pipeline = pipeline(site_config(), Arc::new(MetricsMock::new()));

    for (path, accept) in [("/download/", "es-CL"), ("/en-gb/download/", "fr"), ("/about/", "zu")] {
        let first = send(&pipeline, get(path, Some(accept))).await;
        let location = first.headers()[LOCATION].to_str().unwrap().to_string();

        let second = send(&pipeline, get(&location, Some(accept))).await;
        assert_eq!(second.status(), StatusCode::OK, "{path} -> {location}");
    }
}
