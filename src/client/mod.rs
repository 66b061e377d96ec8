//! Client layer: runs the connector against the gateway over HTTP.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use url::Url;

pub use crate::connector::ConnectorError;
use crate::connector::{URL_BALANCE, URL_SEND, WerbelokalConnector};
use crate::domain::{CommandType, ConnectorCommand, ConnectorSpec, ConnectorStatus, ParseOutcome};
use crate::preferences::PreferenceStore;

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn get<'a>(
        &'a self,
        url: Url,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            let response = self.client.get(url).send().await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Builder for [`WerbelokalClient`].
///
/// Use this when you need to customize the endpoints, timeout, or user-agent.
pub struct WerbelokalClientBuilder {
    send_endpoint: String,
    balance_endpoint: String,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl Default for WerbelokalClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl WerbelokalClientBuilder {
    /// Create a builder with the gateway's endpoints and no timeout/user-agent override.
    pub fn new() -> Self {
        Self {
            send_endpoint: URL_SEND.to_owned(),
            balance_endpoint: URL_BALANCE.to_owned(),
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the URL for `websmsdroid.html`.
    pub fn send_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.send_endpoint = endpoint.into();
        self
    }

    /// Override the URL for `websmsdroid_konto.html`.
    pub fn balance_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.balance_endpoint = endpoint.into();
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`WerbelokalClient`].
    ///
    /// Endpoints are validated here so a typo fails before the first request.
    pub fn build(self) -> Result<WerbelokalClient, ConnectorError> {
        let send_endpoint = Url::parse(&self.send_endpoint)?;
        let balance_endpoint = Url::parse(&self.balance_endpoint)?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| ConnectorError::Transport(Box::new(err)))?;

        Ok(WerbelokalClient {
            connector: WerbelokalConnector::new(),
            send_endpoint,
            balance_endpoint,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level werbelokal.de client.
///
/// Each call re-reads the preferences, refuses to run unless the connector is ready,
/// issues one GET request and hands the body to [`WerbelokalConnector::parse_response`].
pub struct WerbelokalClient {
    connector: WerbelokalConnector,
    send_endpoint: Url,
    balance_endpoint: Url,
    http: Arc<dyn HttpTransport>,
}

impl WerbelokalClient {
    /// Create a client using the gateway's endpoints.
    ///
    /// For more customization, use [`WerbelokalClient::builder`].
    pub fn new() -> Result<Self, ConnectorError> {
        WerbelokalClientBuilder::new().build()
    }

    /// Start building a client with custom settings.
    pub fn builder() -> WerbelokalClientBuilder {
        WerbelokalClientBuilder::new()
    }

    pub fn connector(&self) -> &WerbelokalConnector {
        &self.connector
    }

    /// Run `command` and interpret the reply.
    ///
    /// Errors:
    /// - [`ConnectorError::NotReady`] when preferences disable the connector or lack credentials,
    /// - [`ConnectorError::Validation`] when a recipient cannot be normalized,
    /// - [`ConnectorError::HttpStatus`] for non-2xx HTTP responses,
    /// - [`ConnectorError::ServiceUnavailable`] / [`ConnectorError::Provider`] from the reply.
    pub async fn execute(
        &self,
        prefs: &dyn PreferenceStore,
        spec: &mut ConnectorSpec,
        command: &ConnectorCommand,
    ) -> Result<ParseOutcome, ConnectorError> {
        let status = self.connector.update_spec(prefs, spec).status();
        if status != ConnectorStatus::Ready {
            return Err(ConnectorError::NotReady { status });
        }

        let params = self.connector.params(prefs, command)?;
        let endpoint = match command.kind() {
            CommandType::Send => &self.send_endpoint,
            CommandType::Update => &self.balance_endpoint,
        };
        let mut url = endpoint.clone();
        url.query_pairs_mut().extend_pairs(&params);

        tracing::debug!(
            target: "werbelokal",
            endpoint = %endpoint,
            kind = ?command.kind(),
            "sending request"
        );

        let response = self
            .http
            .get(url)
            .await
            .map_err(ConnectorError::Transport)?;

        if !(200..=299).contains(&response.status) {
            let body = if response.body.trim().is_empty() {
                None
            } else {
                Some(response.body)
            };
            return Err(ConnectorError::HttpStatus {
                status: response.status,
                body,
            });
        }

        self.connector
            .parse_response(command, spec, Some(&response.body))
    }

    /// Send a message. See [`WerbelokalClient::execute`].
    pub async fn send(
        &self,
        prefs: &dyn PreferenceStore,
        spec: &mut ConnectorSpec,
        command: &ConnectorCommand,
    ) -> Result<(), ConnectorError> {
        self.execute(prefs, spec, command).await.map(|_| ())
    }

    /// Fetch the account balance and store it on `spec`.
    pub async fn update_balance(
        &self,
        prefs: &dyn PreferenceStore,
        spec: &mut ConnectorSpec,
    ) -> Result<String, ConnectorError> {
        match self.execute(prefs, spec, &ConnectorCommand::update()).await? {
            ParseOutcome::Balance(balance) => Ok(balance),
            ParseOutcome::Sent => Err(ConnectorError::ServiceUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::connector::Labels;
    use crate::domain::{DefaultPrefix, MessageText, RawPhoneNumber, SenderId, Tariff};
    use crate::preferences::{MemoryPreferences, PREFS_ENABLED};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<Url>,
        calls: usize,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    calls: 0,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_url(&self) -> Option<Url> {
            self.state.lock().unwrap().last_url.clone()
        }

        fn calls(&self) -> usize {
            self.state.lock().unwrap().calls
        }
    }

    impl HttpTransport for FakeTransport {
        fn get<'a>(
            &'a self,
            url: Url,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url);
                    state.calls += 1;
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse { status, body })
            })
        }
    }

    fn query(url: &Url) -> Vec<(String, String)> {
        url.query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn assert_param(params: &[(String, String)], key: &str, value: &str) {
        assert!(
            params.iter().any(|(k, v)| k == key && v == value),
            "missing param {key}={value}; got: {params:?}"
        );
    }

    fn make_client(transport: FakeTransport) -> WerbelokalClient {
        WerbelokalClient {
            connector: WerbelokalConnector::new(),
            send_endpoint: Url::parse("https://example.invalid/websmsdroid.html").unwrap(),
            balance_endpoint: Url::parse("https://example.invalid/websmsdroid_konto.html")
                .unwrap(),
            http: Arc::new(transport),
        }
    }

    fn ready_prefs() -> MemoryPreferences {
        MemoryPreferences::with_credentials("me@example.org", "secret")
    }

    fn spec() -> ConnectorSpec {
        WerbelokalConnector::new().init_spec(&Labels::default())
    }

    fn send_command() -> ConnectorCommand {
        ConnectorCommand::send(
            Tariff::WithSender,
            vec![
                RawPhoneNumber::new("+491701234567").unwrap(),
                RawPhoneNumber::new("+491709999999").unwrap(),
            ],
            DefaultPrefix::new("+49").unwrap(),
            Some(SenderId::new("Shop").unwrap()),
            MessageText::new("hallo welt").unwrap(),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn send_issues_get_with_mapped_query() {
        let transport = FakeTransport::new(200, "SMS wurde versandt.\nok");
        let client = make_client(transport.clone());
        let mut spec = spec();

        client
            .send(&ready_prefs(), &mut spec, &send_command())
            .await
            .unwrap();
        assert!(spec.is_ready());
        assert_eq!(spec.balance(), None);

        let url = transport.last_url().unwrap();
        assert_eq!(url.path(), "/websmsdroid.html");
        let params = query(&url);
        assert_param(&params, "email", "me@example.org");
        assert_param(&params, "password", "secret");
        assert_param(&params, "tarif", "2");
        assert_param(&params, "destination", "491701234567");
        assert_param(&params, "xxx", "xxx");
        assert_param(&params, "text", "hallo welt");
        assert_eq!(params.len(), 6);
    }

    #[tokio::test]
    async fn update_balance_uses_balance_endpoint_and_sets_spec() {
        let transport = FakeTransport::new(200, "Guthaben: 12.50 Euro<br>\n");
        let client = make_client(transport.clone());
        let mut spec = spec();

        let balance = client
            .update_balance(&ready_prefs(), &mut spec)
            .await
            .unwrap();
        assert_eq!(balance, "12.50€");
        assert_eq!(spec.balance(), Some("12.50€"));

        let url = transport.last_url().unwrap();
        assert_eq!(url.path(), "/websmsdroid_konto.html");
        assert_eq!(
            query(&url),
            vec![
                ("email".to_owned(), "me@example.org".to_owned()),
                ("password".to_owned(), "secret".to_owned()),
            ]
        );
    }

    #[tokio::test]
    async fn provider_rejection_is_surfaced_verbatim() {
        let transport = FakeTransport::new(200, "Fehler: ungueltige Nummer");
        let client = make_client(transport);
        let mut spec = spec();

        let err = client
            .send(&ready_prefs(), &mut spec, &send_command())
            .await
            .unwrap_err();
        match err {
            ConnectorError::Provider(message) => {
                assert_eq!(message, "Fehler: ungueltige Nummer");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn empty_body_maps_to_service_unavailable() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport);
        let mut spec = spec();

        let err = client
            .update_balance(&ready_prefs(), &mut spec)
            .await
            .unwrap_err();
        assert!(matches!(err, ConnectorError::ServiceUnavailable));
    }

    #[tokio::test]
    async fn not_ready_connector_issues_no_request() {
        let transport = FakeTransport::new(200, "SMS wurde versandt.");
        let client = make_client(transport.clone());
        let mut spec = spec();

        let mut prefs = ready_prefs();
        prefs.set_bool(PREFS_ENABLED, false);
        let err = client
            .send(&prefs, &mut spec, &send_command())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::NotReady {
                status: ConnectorStatus::Inactive
            }
        ));

        let prefs = MemoryPreferences::with_credentials("me@example.org", "");
        let err = client
            .send(&prefs, &mut spec, &send_command())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::NotReady {
                status: ConnectorStatus::Enabled
            }
        ));
        assert_eq!(spec.status(), ConnectorStatus::Enabled);
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn non_success_http_status_is_mapped() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(transport);
        let mut spec = spec();

        let err = client
            .send(&ready_prefs(), &mut spec, &send_command())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::HttpStatus {
                status: 500,
                body: Some(_)
            }
        ));
    }

    #[tokio::test]
    async fn non_success_http_status_with_blank_body_maps_to_none() {
        let transport = FakeTransport::new(503, "   ");
        let client = make_client(transport);
        let mut spec = spec();

        let err = client
            .update_balance(&ready_prefs(), &mut spec)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ConnectorError::HttpStatus {
                status: 503,
                body: None
            }
        ));
    }

    #[test]
    fn client_error_is_the_connector_error() {
        let err: ConnectorError = crate::connector::ConnectorError::ServiceUnavailable;
        assert!(matches!(err, crate::client::ConnectorError::ServiceUnavailable));
    }

    #[test]
    fn builder_endpoint_overrides_are_applied() {
        let client = WerbelokalClient::builder()
            .send_endpoint("https://example.invalid/send")
            .balance_endpoint("https://example.invalid/balance")
            .timeout(Duration::from_secs(5))
            .user_agent("werbelokal-tests")
            .build()
            .unwrap();
        assert_eq!(client.send_endpoint.as_str(), "https://example.invalid/send");
        assert_eq!(
            client.balance_endpoint.as_str(),
            "https://example.invalid/balance"
        );
    }

    #[test]
    fn default_client_targets_gateway() {
        let client = WerbelokalClient::new().unwrap();
        assert_eq!(client.send_endpoint.as_str(), URL_SEND);
        assert_eq!(client.balance_endpoint.as_str(), URL_BALANCE);
    }

    #[test]
    fn builder_rejects_invalid_endpoint() {
        let err = WerbelokalClient::builder()
            .send_endpoint("not a url")
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, ConnectorError::InvalidEndpoint(_)));
    }
}
