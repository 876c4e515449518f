use std::time::Duration;

use anyhow::{Context, anyhow};
use reqwest::{IntoUrl, Url};
use slog::{Logger, o};

use mymodule_common::StdResult;

use crate::client::MyModuleClient;

/// A builder of [MyModuleClient]
pub struct MyModuleClientBuilder {
    api_url_result: reqwest::Result<Url>,
    timeout: Option<Duration>,
    logger: Option<Logger>,
}

impl MyModuleClientBuilder {
    /// Constructs a new `MyModuleClientBuilder`.
    //
    // This is the same as `MyModuleClient::builder()`.
    pub fn new<U: IntoUrl>(api_url: U) -> Self {
        Self {
            api_url_result: api_url.into_url(),
            timeout: None,
            logger: None,
        }
    }

    /// Set the [Logger] to use.
    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Set the timeout applied to every request, no timeout if not set.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns a [MyModuleClient] based on the builder configuration
    pub fn build(self) -> StdResult<MyModuleClient> {
        let api_endpoint = enforce_trailing_slash(
            self.api_url_result
                .with_context(|| "Invalid API endpoint, it must be a correctly formed url")?,
        );
        let logger = self.logger.unwrap_or_else(|| Logger::root(slog::Discard, o!()));
        let mut client_builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            client_builder = client_builder.timeout(timeout);
        }
        let client = client_builder
            .build()
            .map_err(|e| anyhow!(e))
            .with_context(|| "HTTP client creation failed")?;

        Ok(MyModuleClient {
            api_endpoint,
            client,
            logger,
        })
    }
}

fn enforce_trailing_slash(url: Url) -> Url {
    // Url::join drops the last path segment of a base url without a trailing slash
    if url.as_str().ends_with('/') {
        url
    } else {
        let mut url = url.clone();
        url.set_path(&format!("{}/", url.path()));
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enforce_trailing_slash_for_api_url() {
        let url_without_trailing_slash = Url::parse("http://localhost:8080/api").unwrap();
        let url_with_trailing_slash = Url::parse("http://localhost:8080/api/").unwrap();

        assert_eq!(
            url_with_trailing_slash,
            enforce_trailing_slash(url_without_trailing_slash.clone())
        );
        assert_eq!(
            url_with_trailing_slash,
            enforce_trailing_slash(url_with_trailing_slash.clone())
        );
    }

    #[test]
    fn build_fails_with_a_malformed_url() {
        MyModuleClientBuilder::new("not an url")
            .build()
            .err()
            .expect("Building a client with a malformed url should fail");
    }
}
