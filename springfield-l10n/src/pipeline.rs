//! Request-time entry point tying the catalog, the decision and metrics together

use crate::{
    LanguageTag, LocaleDecision, LocaleSet, PageDescriptor, PageDescriptorProvider,
    RequestFingerprint, SiteLocaleConfig, decide,
};
use springfield_metrics::{MetricTag, MetricsSink, PrometheusSink, REDIRECT_METRIC};
use std::sync::Arc;

/// Locale the request is served in, inserted as a request extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActiveLocale {
    pub locale: LanguageTag,
    /// Response must carry `Vary: Accept-Language`
    pub vary_on_accept_language: bool,
}

/// What the HTTP layer should do with a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Hand the request to the page handler
    Serve(ActiveLocale),
    /// 302 to `location` (query string preserved)
    Redirect { location: String },
    NotFound,
}

/// Shared, immutable locale pipeline.
///
/// Every redirect returned by [`dispatch`](Self::dispatch) increments
/// `locale.redirect` exactly once; nothing else touches metrics.
pub struct LocalePipeline {
    config: Arc<SiteLocaleConfig>,
    provider: Arc<dyn PageDescriptorProvider>,
    metrics: Arc<dyn MetricsSink>,
}

impl LocalePipeline {
    /// Pipeline reporting to the default Prometheus registry
    pub fn new(config: Arc<SiteLocaleConfig>, provider: Arc<dyn PageDescriptorProvider>) -> Self {
        Self {
            config,
            provider,
            metrics: Arc::new(PrometheusSink::new()),
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<dyn MetricsSink>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn config(&self) -> &SiteLocaleConfig {
        &self.config
    }

    /// Pure decision, no side effects
    pub fn decide(&self, request: &RequestFingerprint, page: &PageDescriptor) -> LocaleDecision {
        decide(&self.config, request, page)
    }

    pub fn describe(&self, request: &RequestFingerprint) -> PageDescriptor {
        self.provider.describe(request)
    }

    /// Locales the requested page exists in; empty when unknown
    pub fn available_locales_for_path(&self, request: &RequestFingerprint) -> LocaleSet {
        self.describe(request).available_locales
    }

    /// Decide and emit the redirect metric
    pub fn dispatch(&self, request: &RequestFingerprint, page: &PageDescriptor) -> Dispatch {
        let decision = self.decide(request, page);
        tracing::debug!(
            method = %request.method,
            path = %request.raw_path,
            decision = %decision,
            "locale decision"
        );

        match decision {
            LocaleDecision::ServeAsIs {
                locale,
                vary_on_accept_language,
            } => Dispatch::Serve(ActiveLocale {
                locale,
                vary_on_accept_language,
            }),
            LocaleDecision::Redirect {
                to_path,
                from_locale,
                to_locale,
            } => {
                let from = from_locale.as_ref().map_or("none", LanguageTag::as_str);
                self.metrics.incr(
                    REDIRECT_METRIC,
                    &[
                        MetricTag::new("from_locale", from),
                        MetricTag::new("to_locale", to_locale.as_str()),
                    ],
                );

                let location = match &request.query {
                    Some(query) if !query.is_empty() => format!("{}?{}", to_path, query),
                    _ => to_path,
                };
                tracing::debug!(from_locale = from, to_locale = %to_locale, location = %location, "locale redirect");
                Dispatch::Redirect { location }
            }
            LocaleDecision::NotFound => Dispatch::NotFound,
        }
    }

    /// Describe the page, then [`dispatch`](Self::dispatch)
    pub fn handle(&self, request: &RequestFingerprint) -> Dispatch {
        let page = self.describe(request);
        self.dispatch(request, &page)
    }
}
