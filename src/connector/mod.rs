//! Connector layer: the werbelokal.de strategy handed to the client's execution routine.
//!
//! Every operation here is a pure function of its arguments and the preference store;
//! nothing is kept between calls.

mod error;

pub use error::ConnectorError;

use crate::domain::{
    Capabilities, CommandType, ConnectorCommand, ConnectorSpec, ConnectorStatus, ParseOutcome,
    Password, SendCommand, Tariff, Username, ValidationError,
};
use crate::preferences::{PREFS_ENABLED, PREFS_PASSWORD, PREFS_USERNAME, PreferenceStore};
use crate::transport::{BalanceReply, SendReply};

/// Gateway URL for sending.
pub const URL_SEND: &str = "http://www.werbelokal.de/websmsdroid.html";
/// Gateway URL for the balance check.
pub const URL_BALANCE: &str = "http://www.werbelokal.de/websmsdroid_konto.html";

/// Host-supplied, possibly localized, display strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Labels {
    pub name: String,
    pub author: String,
    pub without_sender: String,
    pub with_sender: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            name: "werbelokal.de".to_owned(),
            author: "Felix Bechstein".to_owned(),
            without_sender: "without sender".to_owned(),
            with_sender: "with sender".to_owned(),
        }
    }
}

/// werbelokal.de connector.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WerbelokalConnector;

impl WerbelokalConnector {
    /// Both operations are plain GET requests.
    pub const USE_POST: bool = false;

    pub fn new() -> Self {
        Self
    }

    /// Build the descriptor announced to the host.
    pub fn init_spec(&self, labels: &Labels) -> ConnectorSpec {
        let mut spec = ConnectorSpec::new(labels.name.clone());
        spec.set_author(labels.author.clone());
        spec.set_balance(None);
        spec.set_capabilities(Capabilities::UPDATE | Capabilities::SEND | Capabilities::PREFS);
        spec.add_sub_connector(Tariff::WithoutSender, labels.without_sender.clone(), 0);
        spec.add_sub_connector(Tariff::WithSender, labels.with_sender.clone(), 0);
        spec
    }

    /// Readiness derived from the current preferences.
    pub fn readiness(&self, prefs: &dyn PreferenceStore) -> ConnectorStatus {
        if !prefs.get_bool(PREFS_ENABLED, false) {
            return ConnectorStatus::Inactive;
        }
        if self.username(prefs).is_empty() || self.password(prefs).is_empty() {
            return ConnectorStatus::Enabled;
        }
        ConnectorStatus::Ready
    }

    /// Recompute the status of `spec` from the current preferences.
    pub fn update_spec<'a>(
        &self,
        prefs: &dyn PreferenceStore,
        spec: &'a mut ConnectorSpec,
    ) -> &'a mut ConnectorSpec {
        spec.set_status(self.readiness(prefs));
        spec
    }

    pub fn username(&self, prefs: &dyn PreferenceStore) -> String {
        prefs.get_string(PREFS_USERNAME, "")
    }

    pub fn password(&self, prefs: &dyn PreferenceStore) -> String {
        prefs.get_string(PREFS_PASSWORD, "")
    }

    fn credentials(
        &self,
        prefs: &dyn PreferenceStore,
    ) -> Result<(Username, Password), ValidationError> {
        Ok((
            Username::new(self.username(prefs))?,
            Password::new(self.password(prefs))?,
        ))
    }

    pub fn send_params(
        &self,
        prefs: &dyn PreferenceStore,
        command: &SendCommand,
    ) -> Result<Vec<(String, String)>, ValidationError> {
        let (username, password) = self.credentials(prefs)?;
        crate::transport::encode_send_query(&username, &password, command)
    }

    pub fn balance_params(
        &self,
        prefs: &dyn PreferenceStore,
    ) -> Result<Vec<(String, String)>, ValidationError> {
        let (username, password) = self.credentials(prefs)?;
        Ok(crate::transport::encode_balance_query(&username, &password))
    }

    /// Query parameters for `command`, with credentials read from `prefs` now.
    pub fn params(
        &self,
        prefs: &dyn PreferenceStore,
        command: &ConnectorCommand,
    ) -> Result<Vec<(String, String)>, ValidationError> {
        match command {
            ConnectorCommand::Send(send) => self.send_params(prefs, send),
            ConnectorCommand::Update => self.balance_params(prefs),
        }
    }

    pub fn default_endpoint(&self, kind: CommandType) -> &'static str {
        match kind {
            CommandType::Send => URL_SEND,
            CommandType::Update => URL_BALANCE,
        }
    }

    /// Interpret the gateway's reply to `command`.
    ///
    /// A balance reply also updates `spec`. Errors carry the gateway's first line verbatim.
    pub fn parse_response(
        &self,
        command: &ConnectorCommand,
        spec: &mut ConnectorSpec,
        body: Option<&str>,
    ) -> Result<ParseOutcome, ConnectorError> {
        let body = match body {
            Some(body) if !body.is_empty() => body,
            _ => return Err(ConnectorError::ServiceUnavailable),
        };

        match command.kind() {
            CommandType::Send => match crate::transport::decode_send_reply(body) {
                SendReply::Sent { line } => {
                    tracing::debug!(target: "werbelokal", "{line}");
                    Ok(ParseOutcome::Sent)
                }
                SendReply::Rejected { line } => Err(provider_error(line)),
            },
            CommandType::Update => match crate::transport::decode_balance_reply(body) {
                BalanceReply::Balance { amount } => {
                    spec.set_balance(Some(amount.clone()));
                    Ok(ParseOutcome::Balance(amount))
                }
                BalanceReply::Rejected { line } => Err(provider_error(line)),
            },
        }
    }
}

fn provider_error(line: String) -> ConnectorError {
    tracing::warn!(target: "werbelokal", reply = %line, "gateway rejected the request");
    ConnectorError::Provider(line)
}
