use anyhow::Context;
use reqwest::{IntoUrl, Url};
use slog::{Logger, debug};

use mymodule_common::entities::ServiceScope;
use mymodule_common::{MYMODULE_TENANT_HEADER, MYMODULE_USER_HEADER};

use crate::builder::MyModuleClientBuilder;
use crate::error::MyModuleHttpClientError;
use crate::query::{MyModuleQuery, QueryContext, QueryMethod};
use crate::MyModuleHttpClientResult;

/// HTTP client of the API served by `mymodule-server`
pub struct MyModuleClient {
    pub(super) api_endpoint: Url,
    pub(super) client: reqwest::Client,
    pub(super) logger: Logger,
}

impl MyModuleClient {
    /// Creates a [MyModuleClientBuilder] to configure a `MyModuleClient`.
    //
    // This is the same as `MyModuleClientBuilder::new()`.
    pub fn builder<U: IntoUrl>(api_url: U) -> MyModuleClientBuilder {
        MyModuleClientBuilder::new(api_url)
    }

    /// Send the given query on behalf of the given scope
    pub async fn send<Q: MyModuleQuery>(
        &self,
        scope: &ServiceScope,
        query: Q,
    ) -> MyModuleHttpClientResult<Q::Response> {
        let url = self.join_api_endpoint(&query.route())?;
        debug!(self.logger, "Sending query"; "method" => %Q::method(), "url" => %url, "tenant" => %scope.tenant);

        let mut request_builder = match Q::method() {
            QueryMethod::Get => self.client.get(url),
            QueryMethod::Post => self.client.post(url),
            QueryMethod::Put => self.client.put(url),
            QueryMethod::Delete => self.client.delete(url),
        }
        .header(MYMODULE_TENANT_HEADER, scope.tenant.name.as_str());

        if let Some(user) = &scope.user {
            request_builder = request_builder.header(MYMODULE_USER_HEADER, user.as_str());
        }
        if let Some(body) = query.body() {
            request_builder = request_builder.json(&body);
        }

        match request_builder.send().await {
            Ok(response) => {
                let context = QueryContext {
                    response,
                    logger: self.logger.clone(),
                };
                query.handle_response(context).await
            }
            Err(err) => Err(MyModuleHttpClientError::unreachable(err)),
        }
    }

    fn join_api_endpoint(&self, endpoint: &str) -> MyModuleHttpClientResult<Url> {
        self.api_endpoint
            .join(endpoint)
            .with_context(|| {
                format!(
                    "Invalid url when joining given endpoint, '{endpoint}', to API url '{}'",
                    self.api_endpoint
                )
            })
            .map_err(MyModuleHttpClientError::InvalidEndpoint)
    }
}
