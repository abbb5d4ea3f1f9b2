//! Immutable HTTP requests.
//!
//! A [`Request`] is what [`RequestBuilder::build`](crate::RequestBuilder::build)
//! produces and what an [`HttpClient`](crate::HttpClient) executes.

use bytes::Bytes;
use http::HeaderMap;
use url::Url;

use crate::Method;

/// An HTTP request with method, URL, headers, and optional body.
#[derive(Debug, Clone)]
pub struct Request<B = Bytes> {
    method: Method,
    url: Url,
    headers: HeaderMap,
    body: Option<B>,
}

impl<B> Request<B> {
    /// Assemble a request from its parts.
    #[must_use]
    pub fn from_parts(method: Method, url: Url, headers: HeaderMap, body: Option<B>) -> Self {
        Self {
            method,
            url,
            headers,
            body,
        }
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> Method {
        self.method
    }

    /// Request URL, including the query string.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Request headers.
    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// First value of a header, if present and valid UTF-8.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// All values of a header, in insertion order.
    #[must_use]
    pub fn header_all(&self, name: &str) -> Vec<&str> {
        self.headers
            .get_all(name)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .collect()
    }

    /// Request body.
    #[must_use]
    pub const fn body(&self) -> Option<&B> {
        self.body.as_ref()
    }

    /// Consume into (method, url, headers, body).
    #[must_use]
    pub fn into_parts(self) -> (Method, Url, HeaderMap, Option<B>) {
        (self.method, self.url, self.headers, self.body)
    }
}

#[cfg(test)]
mod tests {
    use http::HeaderValue;

    use super::*;

    #[test]
    fn request_parts() {
        let url = Url::parse("https://api.example.com/users").expect("valid URL");
        let mut headers = HeaderMap::new();
        headers.append("accept", HeaderValue::from_static("application/json"));
        headers.append("accept", HeaderValue::from_static("text/plain"));

        let request = Request::from_parts(
            Method::Post,
            url,
            headers,
            Some(Bytes::from_static(b"a=1")),
        );

        assert_eq!(request.method(), Method::Post);
        assert_eq!(request.url().as_str(), "https://api.example.com/users");
        assert_eq!(request.header("Accept"), Some("application/json"));
        assert_eq!(
            request.header_all("ACCEPT"),
            vec!["application/json", "text/plain"]
        );
        assert_eq!(request.body(), Some(&Bytes::from_static(b"a=1")));

        let (method, _, _, body) = request.into_parts();
        assert_eq!(method, Method::Post);
        assert!(body.is_some());
    }
}
