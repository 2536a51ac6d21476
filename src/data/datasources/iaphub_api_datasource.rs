use std::collections::BTreeMap;

use serde::Serialize;
use tracing::debug;

use crate::{
    domain::entities::common::Environment,
    errors::IaphubError,
    transport::{HttpMethod, HttpRequest, HttpTransport},
};

/// Base endpoint of the IAPHUB REST API.
pub(crate) const API_URL: &str = "https://api.iaphub.com/v1";

/// Performs raw exchanges against the IAPHUB API: composes the target URL,
/// attaches the standard headers and classifies the response by status code.
/// Operation semantics (paths, parameters, decoding) live one layer up in
/// the repository.
pub(crate) struct IaphubApiDatasource<T: HttpTransport> {
    api_key: String,
    environment: Environment,
    transport: T,
}

impl<T: HttpTransport> IaphubApiDatasource<T> {
    pub(crate) fn new(api_key: String, environment: Environment, transport: T) -> Self {
        Self {
            api_key,
            environment,
            transport,
        }
    }

    /// Environment the client was configured with. Operations that embed the
    /// environment in their payload resolve their override against it.
    pub(crate) fn environment(&self) -> &Environment {
        &self.environment
    }

    pub(crate) async fn get(
        &self,
        path: &str,
        params: BTreeMap<&'static str, String>,
        environment: Option<&Environment>,
    ) -> Result<Vec<u8>, IaphubError> {
        self.exchange(HttpMethod::Get, path, params, environment, None)
            .await
    }

    pub(crate) async fn post<B: Serialize>(
        &self,
        path: &str,
        params: BTreeMap<&'static str, String>,
        environment: Option<&Environment>,
        body: &B,
    ) -> Result<Vec<u8>, IaphubError> {
        let payload = serde_json::to_string(body)?;
        self.exchange(HttpMethod::Post, path, params, environment, Some(payload))
            .await
    }

    /// One request/response exchange. The transport returns the whole body
    /// before the status is inspected, so the error path keeps it for
    /// diagnostics; 200 is the only status treated as success.
    async fn exchange(
        &self,
        method: HttpMethod,
        path: &str,
        params: BTreeMap<&'static str, String>,
        environment: Option<&Environment>,
        body: Option<String>,
    ) -> Result<Vec<u8>, IaphubError> {
        let url = self.build_url(path, params, environment);
        debug!(?method, %url, "calling out to iaphub");

        let request = HttpRequest {
            method,
            url,
            headers: vec![
                ("Content-Type", "application/json".to_owned()),
                ("Accept", "application/json".to_owned()),
                ("Authorization", format!("ApiKey {}", self.api_key)),
            ],
            body,
        };

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(IaphubError::Transport)?;

        if response.status != 200 {
            return Err(IaphubError::Remote {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(response.body)
    }

    /// Composes the full request URL. Parameters are form-encoded in
    /// lexicographic key order, so identical inputs always produce an
    /// identical URL regardless of how the caller assembled them; the active
    /// environment is always one of the parameters.
    fn build_url(
        &self,
        path: &str,
        mut params: BTreeMap<&'static str, String>,
        environment: Option<&Environment>,
    ) -> String {
        params.insert(
            "environment",
            environment.unwrap_or(&self.environment).as_str().to_owned(),
        );
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{API_URL}{path}?{query}")
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::transport::{HttpResponse, TransportError};

    struct NoopTransport;

    #[async_trait]
    impl HttpTransport for NoopTransport {
        async fn execute(&self, _request: HttpRequest) -> Result<HttpResponse, TransportError> {
            Ok(HttpResponse {
                status: 200,
                body: Vec::new(),
            })
        }
    }

    fn datasource() -> IaphubApiDatasource<NoopTransport> {
        IaphubApiDatasource::new("api-key-1".to_owned(), Environment::Sandbox, NoopTransport)
    }

    #[test]
    fn query_parameters_are_sorted_and_encoded() {
        let params = BTreeMap::from([
            ("userId", "user-id-1".to_owned()),
            ("fromDate", "2019-10-11T17:34:33.256Z".to_owned()),
            ("page", "3".to_owned()),
        ]);
        let url = datasource().build_url("/app/app-id-1/purchases", params, None);
        assert_eq!(
            url,
            "https://api.iaphub.com/v1/app/app-id-1/purchases\
             ?environment=sandbox&fromDate=2019-10-11T17%3A34%3A33.256Z&page=3&userId=user-id-1"
        );
    }

    #[test]
    fn encoding_is_independent_of_insertion_order() {
        let mut forward = BTreeMap::new();
        forward.insert("platform", "android".to_owned());
        forward.insert("upsert", "true".to_owned());

        let mut reverse = BTreeMap::new();
        reverse.insert("upsert", "true".to_owned());
        reverse.insert("platform", "android".to_owned());

        let datasource = datasource();
        assert_eq!(
            datasource.build_url("/app/a/user/u", forward, None),
            datasource.build_url("/app/a/user/u", reverse, None),
        );
    }

    #[test]
    fn per_call_environment_overrides_the_configured_one() {
        let url = datasource().build_url(
            "/app/a/user/u",
            BTreeMap::new(),
            Some(&Environment::Production),
        );
        assert_eq!(
            url,
            "https://api.iaphub.com/v1/app/a/user/u?environment=production"
        );
    }
}
