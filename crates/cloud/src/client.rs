use std::time::Duration;

use jardine_shared::Error;
use reqwest::{RequestBuilder, Response, StatusCode};
use url::Url;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// HTTP client for the household backend functions.
///
/// One instance serves the state endpoint, the recipe import function and
/// the ingredient aggregation function. Every call carries the static bearer
/// token.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base: Url,
    api_key: String,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base", &self.base.as_str())
            .finish_non_exhaustive()
    }
}

impl Client {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> jardine_shared::Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|err| Error::InvalidInput(format!("remote base url `{base_url}`: {err}")))?;

        if base.cannot_be_a_base() {
            jardine_shared::invalid!("remote base url `{}` cannot hold a path", base_url);
        }

        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(anyhow::Error::from)?;

        Ok(Self {
            http,
            base,
            api_key: api_key.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub(crate) fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(name);
        }

        url
    }

    pub(crate) fn get(&self, name: &str) -> RequestBuilder {
        self.http
            .get(self.endpoint(name))
            .bearer_auth(&self.api_key)
    }

    pub(crate) fn post(&self, name: &str) -> RequestBuilder {
        self.http
            .post(self.endpoint(name))
            .bearer_auth(&self.api_key)
    }
}

/// Sends `request` and turns transport failures and non-2xx answers into
/// `kind` errors. `404` is handed back to the caller when `allow_not_found`.
pub(crate) async fn send(
    request: RequestBuilder,
    kind: fn(String) -> Error,
    allow_not_found: bool,
) -> jardine_shared::Result<Response> {
    let response = request
        .send()
        .await
        .map_err(|err| kind(format!("request failed: {err}")))?;

    let status = response.status();
    if status.is_success() || (allow_not_found && status == StatusCode::NOT_FOUND) {
        return Ok(response);
    }

    let text = response
        .text()
        .await
        .unwrap_or_else(|_| "<response unavailable>".to_owned());

    Err(kind(format!("backend returned {status}: {}", text.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_path() {
        let client = Client::new("https://example.com/functions/v1", "key", DEFAULT_TIMEOUT)
            .unwrap();
        assert_eq!(
            client.endpoint("state").as_str(),
            "https://example.com/functions/v1/state"
        );

        let client = Client::new("https://example.com/functions/v1/", "key", DEFAULT_TIMEOUT)
            .unwrap();
        assert_eq!(
            client.endpoint("import-recipe").as_str(),
            "https://example.com/functions/v1/import-recipe"
        );
    }

    #[test]
    fn test_rejects_invalid_base() {
        let err = Client::new("not a url", "key", DEFAULT_TIMEOUT).unwrap_err();
        assert!(err.is_invalid_input());

        let err = Client::new("mailto:chef@example.com", "key", DEFAULT_TIMEOUT).unwrap_err();
        assert!(err.is_invalid_input());
    }

    #[test]
    fn test_debug_hides_api_key() {
        let client = Client::new("https://example.com", "secret-key", DEFAULT_TIMEOUT).unwrap();

        assert!(!format!("{client:?}").contains("secret-key"));
    }
}
