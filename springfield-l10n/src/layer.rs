//! Tower middleware
//!
//! ```
//! use springfield_config::L10nSettings;
//! use springfield_l10n::*;
//! use std::sync::Arc;
//! use tower::{ServiceBuilder, ServiceExt, service_fn};
//!
//! let config = Arc::new(SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap());
//! let pipeline = Arc::new(LocalePipeline::new(config.clone(), Arc::new(SiteCatalog::new(config))));
//!
//! let service = ServiceBuilder::new()
//!     .layer(LocaleLayer::new(pipeline))
//!     .service(service_fn(|_req: http::Request<()>| async {
//!         Ok::<_, std::convert::Infallible>(http::Response::new(String::new()))
//!     }));
//!
//! # tokio_test::block_on(async {
//! let request = http::Request::get("/robots.txt").body(()).unwrap();
//! let response = service.oneshot(request).await.unwrap();
//! assert_eq!(response.status(), http::StatusCode::OK);
//! # });
//! ```

use crate::response::{add_vary_accept_language, dispatch_response};
use crate::{Dispatch, LocalePipeline, RequestFingerprint};
use http::{Request, Response};
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use tower::{Layer, Service};

/// Applies the locale pipeline in front of a page handler
#[derive(Clone)]
pub struct LocaleLayer {
    pipeline: Arc<LocalePipeline>,
}

impl LocaleLayer {
    pub fn new(pipeline: Arc<LocalePipeline>) -> Self {
        Self { pipeline }
    }
}

impl<S> Layer<S> for LocaleLayer {
    type Service = LocaleService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        LocaleService {
            inner,
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

/// Redirects and 404s are answered here; everything else reaches `inner`
/// with an [`ActiveLocale`](crate::ActiveLocale) extension.
pub struct LocaleService<S> {
    inner: S,
    pipeline: Arc<LocalePipeline>,
}

impl<S: Clone> Clone for LocaleService<S> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            pipeline: Arc::clone(&self.pipeline),
        }
    }
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for LocaleService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
    S::Future: Send + 'static,
    S::Error: Send + 'static,
    ResBody: Default + Send + 'static,
{
    type Response = Response<ResBody>;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let fingerprint = RequestFingerprint::from_request(&req);
        let dispatch = self.pipeline.handle(&fingerprint);

        let active = match dispatch {
            Dispatch::Serve(active) => active,
            other => {
                let response = dispatch_response(&other).unwrap_or_else(crate::response::not_found_response);
                return Box::pin(std::future::ready(Ok(response)));
            }
        };

        let vary = active.vary_on_accept_language;
        req.extensions_mut().insert(active);
        let future = self.inner.call(req);

        Box::pin(async move {
            let mut response = future.await?;
            if vary {
                add_vary_accept_language(response.headers_mut());
            }
            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActiveLocale, LocaleSet, PageDescriptor, SiteLocaleConfig};
    use http::StatusCode;
    use http::header::{ACCEPT_LANGUAGE, LOCATION, VARY};
    use springfield_config::L10nSettings;
    use springfield_metrics::{MetricsMock, REDIRECT_METRIC};
    use std::convert::Infallible;
    use tower::{ServiceBuilder, ServiceExt, service_fn};

    fn pipeline(metrics: Arc<MetricsMock>) -> Arc<LocalePipeline> {
        let config = Arc::new(SiteLocaleConfig::from_settings(&L10nSettings::default()).unwrap());
        let provider = |request: &RequestFingerprint| {
            if request.raw_path.ends_with("/missing/") {
                return PageDescriptor::missing("/missing/");
            }
            let locales: LocaleSet = ["en-US", "fr"].into_iter().collect();
            PageDescriptor::template(locales, "/")
        };
        Arc::new(LocalePipeline::new(config, Arc::new(provider)).with_metrics(metrics))
    }

    async fn echo_locale(req: Request<()>) -> Result<Response<String>, Infallible> {
        let locale = req
            .extensions()
            .get::<ActiveLocale>()
            .map(|active| active.locale.to_string())
            .unwrap_or_default();
        Ok(Response::new(locale))
    }

    fn request(path: &str, accept: Option<&str>) -> Request<()> {
        let mut builder = Request::builder().uri(path);
        if let Some(accept) = accept {
            builder = builder.header(ACCEPT_LANGUAGE, accept);
        }
        builder.body(()).unwrap()
    }

    #[tokio::test]
    async fn test_serves_with_active_locale() {
        let metrics = Arc::new(MetricsMock::new());
        let service = ServiceBuilder::new()
            .layer(LocaleLayer::new(pipeline(metrics.clone())))
            .service(service_fn(echo_locale));

        let response = service.oneshot(request("/fr/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.body(), "fr");
        assert_eq!(response.headers()[VARY], "Accept-Language");
        metrics.assert_not_incr(REDIRECT_METRIC);
    }

    #[tokio::test]
    async fn test_redirect_short_circuits() {
        let metrics = Arc::new(MetricsMock::new());
        let service = ServiceBuilder::new()
            .layer(LocaleLayer::new(pipeline(metrics.clone())))
            .service(service_fn(echo_locale));

        let response = service.oneshot(request("/?utm=1", Some("fr-FR"))).await.unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/fr/?utm=1");
        assert_eq!(response.headers()[VARY], "Accept-Language");
        assert!(response.body().is_empty());
        metrics.assert_incr_once(REDIRECT_METRIC, &["from_locale:none", "to_locale:fr"]);
    }

    #[tokio::test]
    async fn test_not_found() {
        let service = LocaleLayer::new(pipeline(Arc::new(MetricsMock::new()))).layer(service_fn(echo_locale));

        let response = service.oneshot(request("/fr/missing/", None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_poll_ready_delegates() {
        let mut service =
            LocaleLayer::new(pipeline(Arc::new(MetricsMock::new()))).layer(service_fn(echo_locale));
        let waker = std::task::Waker::noop();
        let mut cx = Context::from_waker(waker);
        assert!(matches!(service.poll_ready(&mut cx), Poll::Ready(Ok(()))));
    }
}
