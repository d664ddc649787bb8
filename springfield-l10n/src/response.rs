//! HTTP responses produced by the locale layer itself

use crate::Dispatch;
use http::header::{HeaderMap, HeaderValue, LOCATION, VARY};
use http::{Response, StatusCode};

/// Value of the `Vary` header on negotiated responses
pub const VARY_ACCEPT_LANGUAGE: &str = "Accept-Language";

/// `302 Found` to `location` with `Vary: Accept-Language`.
///
/// Fails only when `location` is not a valid header value.
pub fn redirect_response<B: Default>(location: &str) -> Result<Response<B>, http::Error> {
    Response::builder()
        .status(StatusCode::FOUND)
        .header(LOCATION, location)
        .header(VARY, VARY_ACCEPT_LANGUAGE)
        .body(B::default())
}

/// Empty `404 Not Found`
pub fn not_found_response<B: Default>() -> Response<B> {
    let mut response = Response::new(B::default());
    *response.status_mut() = StatusCode::NOT_FOUND;
    response
}

/// Response for a dispatch that does not reach the page handler
pub fn dispatch_response<B: Default>(dispatch: &Dispatch) -> Option<Response<B>> {
    match dispatch {
        Dispatch::Serve(_) => None,
        Dispatch::NotFound => Some(not_found_response()),
        Dispatch::Redirect { location } => Some(redirect_response(location).unwrap_or_else(|e| {
            tracing::error!(location = %location, error = %e, "invalid redirect location");
            let mut response = Response::new(B::default());
            *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
            response
        })),
    }
}

/// Add `Accept-Language` to `Vary` unless it is already listed
pub fn add_vary_accept_language(headers: &mut HeaderMap) {
    let listed = headers.get_all(VARY).iter().any(|value| {
        value.to_str().is_ok_and(|v| {
            v.split(',')
                .any(|item| item.trim().eq_ignore_ascii_case(VARY_ACCEPT_LANGUAGE))
        })
    });
    if !listed {
        headers.append(VARY, HeaderValue::from_static(VARY_ACCEPT_LANGUAGE));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redirect_response() {
        let response: Response<String> = redirect_response("/en-US/download/?x=1").unwrap();
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[LOCATION], "/en-US/download/?x=1");
        assert_eq!(response.headers()[VARY], "Accept-Language");
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_not_found_response() {
        let response: Response<String> = not_found_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.headers().get(VARY).is_none());
    }

    #[test]
    fn test_dispatch_response() {
        let serve = Dispatch::Serve(crate::ActiveLocale {
            locale: "fr".into(),
            vary_on_accept_language: true,
        });
        assert!(dispatch_response::<String>(&serve).is_none());

        let invalid = Dispatch::Redirect {
            location: "/bad\nheader".to_string(),
        };
        let response = dispatch_response::<String>(&invalid).unwrap();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_add_vary_is_idempotent() {
        let mut headers = HeaderMap::new();
        headers.insert(VARY, HeaderValue::from_static("Accept-Encoding"));

        add_vary_accept_language(&mut headers);
        add_vary_accept_language(&mut headers);

        let values: Vec<_> = headers.get_all(VARY).iter().collect();
        assert_eq!(values, vec!["Accept-Encoding", "Accept-Language"]);
    }
}
