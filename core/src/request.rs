use std::mem;
use std::str::FromStr;

use crate::{Error, Result};
use http::header::HeaderName;
use http::uri::{Authority, PathAndQuery, Scheme};
use http::{HeaderMap, Method, Uri};

/// Signing context for a request.
///
/// The query string is carried verbatim, never decomposed or re-encoded:
/// the signed message must contain the exact path and query that goes out on
/// the wire, byte for byte.
#[derive(Debug)]
pub struct SigningRequest {
    /// HTTP method.
    pub method: Method,
    /// HTTP scheme.
    pub scheme: Scheme,
    /// HTTP authority.
    pub authority: Authority,
    /// HTTP path, without the query string.
    pub path: String,
    /// Raw query string, without the leading `?`. Empty if absent.
    pub query: String,
    /// HTTP headers.
    pub headers: HeaderMap,
}

impl SigningRequest {
    /// Build a signing context from http::request::Parts.
    pub fn build(parts: &mut http::request::Parts) -> Result<Self> {
        let uri = mem::take(&mut parts.uri).into_parts();
        let paq = uri
            .path_and_query
            .unwrap_or_else(|| PathAndQuery::from_static("/"));

        Ok(SigningRequest {
            method: parts.method.clone(),
            scheme: uri.scheme.unwrap_or(Scheme::HTTP),
            authority: uri.authority.ok_or_else(|| {
                Error::request_invalid("request without authority is invalid for signing")
            })?,
            path: paq.path().to_string(),
            query: paq.query().unwrap_or_default().to_string(),

            // Take the headers out of the request to avoid copy.
            // We will return it back when apply the context.
            headers: mem::take(&mut parts.headers),
        })
    }

    /// Apply the signing context back to http::request::Parts.
    pub fn apply(mut self, parts: &mut http::request::Parts) -> Result<()> {
        let paq = self.path_and_query();

        // Return headers back.
        mem::swap(&mut parts.headers, &mut self.headers);
        parts.method = self.method;
        parts.uri = {
            let mut uri_parts = mem::take(&mut parts.uri).into_parts();
            // Return scheme back.
            uri_parts.scheme = Some(self.scheme);
            // Return authority back.
            uri_parts.authority = Some(self.authority);
            uri_parts.path_and_query = Some(PathAndQuery::from_str(&paq)?);
            Uri::from_parts(uri_parts)?
        };

        Ok(())
    }

    /// The path joined with the raw query string, exactly as transmitted.
    pub fn path_and_query(&self) -> String {
        if self.query.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query)
        }
    }

    /// Get header value by name.
    ///
    /// Returns empty string if header not found.
    #[inline]
    pub fn header_get_or_default(&self, key: &HeaderName) -> Result<&str> {
        match self.headers.get(key) {
            Some(v) => Ok(v.to_str()?),
            None => Ok(""),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parts_for(uri: &str) -> http::request::Parts {
        let req = http::Request::get(uri).body(()).unwrap();
        req.into_parts().0
    }

    #[test]
    fn test_build_splits_path_and_query() {
        let mut parts = parts_for("https://banana.api.dragonchain.com/transaction?q=banana&offset=0&limit=10");
        let req = SigningRequest::build(&mut parts).unwrap();

        assert_eq!(req.path, "/transaction");
        assert_eq!(req.query, "q=banana&offset=0&limit=10");
        assert_eq!(
            req.path_and_query(),
            "/transaction?q=banana&offset=0&limit=10"
        );
    }

    #[test]
    fn test_query_is_kept_verbatim() {
        // Percent escapes must survive the round trip untouched.
        let mut parts = parts_for("https://banana.api.dragonchain.com/transaction?q=tag%3A%22abc%22");
        let req = SigningRequest::build(&mut parts).unwrap();
        assert_eq!(req.query, "q=tag%3A%22abc%22");

        req.apply(&mut parts).unwrap();
        assert_eq!(
            parts.uri.path_and_query().unwrap().as_str(),
            "/transaction?q=tag%3A%22abc%22"
        );
    }

    #[test]
    fn test_apply_restores_request() {
        let mut parts = parts_for("https://banana.api.dragonchain.com/status");
        let mut req = SigningRequest::build(&mut parts).unwrap();
        req.headers
            .insert("timestamp", "2019-01-01T00:00:00.000Z".parse().unwrap());

        req.apply(&mut parts).unwrap();
        assert_eq!(
            parts.uri.to_string(),
            "https://banana.api.dragonchain.com/status"
        );
        assert!(parts.headers.contains_key("timestamp"));
    }

    #[test]
    fn test_build_without_authority_fails() {
        let req = http::Request::get("/status").body(()).unwrap();
        let (mut parts, _) = req.into_parts();
        assert!(SigningRequest::build(&mut parts).is_err());
    }
}
