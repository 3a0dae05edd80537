// SPDX-FileCopyrightText: 2025 Aaron Dewes <aaron@nirvati.org>
//
// SPDX-License-Identifier: AGPL-3.0-or-later

//! Cross-origin headers. Browser front-ends are served from other origins, so
//! every response allows any origin.

use hyper::{
    Response, StatusCode,
    header::{
        ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue,
    },
};

const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";
// A `*` wildcard does not cover `Authorization`, so it is listed explicitly.
const ALLOWED_HEADERS: &str = "content-type, authorization";

/// Answer to an `OPTIONS /graphql` preflight.
pub fn preflight_response() -> Response<String> {
    let mut resp = Response::new(String::new());
    *resp.status_mut() = StatusCode::NO_CONTENT;
    let headers = resp.headers_mut();
    headers.insert(
        ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    allow_any_origin(resp)
}

pub fn allow_any_origin<B>(mut resp: Response<B>) -> Response<B> {
    resp.headers_mut()
        .insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
    resp
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preflight_allows_graphql_requests_from_any_origin() {
        let resp = preflight_response();
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);
        assert!(resp.body().is_empty());

        let headers = resp.headers();
        assert_eq!(headers[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        let methods = headers[ACCESS_CONTROL_ALLOW_METHODS].to_str().unwrap();
        assert!(methods.contains("POST"));
        assert!(methods.contains("GET"));
        let allowed = headers[ACCESS_CONTROL_ALLOW_HEADERS].to_str().unwrap();
        assert!(allowed.contains("authorization"));
        assert!(allowed.contains("content-type"));
    }

    #[tokio::test]
    async fn test_graphql_responses_allow_any_origin() {
        let resp = allow_any_origin(juniper_hyper::graphiql("/graphql", None).await);
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[ACCESS_CONTROL_ALLOW_ORIGIN], "*");
        assert!(resp.headers().contains_key("content-type"));
    }
}
