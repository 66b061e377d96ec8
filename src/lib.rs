//! Typed Rust connector for the werbelokal.de SMS gateway.
//!
//! The crate is split into a domain layer of strong types, a transport layer for the
//! gateway's query parameters and plain-text replies, the [`WerbelokalConnector`] strategy
//! (spec, readiness, parameters, reply parsing), and a small client running it over HTTP.
//! Credentials are never cached: every call reads them from a [`PreferenceStore`].
//!
//! ```rust,no_run
//! use werbelokal::{
//!     ConnectorCommand, DefaultPrefix, Labels, MemoryPreferences, MessageText, RawPhoneNumber,
//!     Tariff, WerbelokalClient,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), werbelokal::ConnectorError> {
//!     let client = WerbelokalClient::new()?;
//!     let prefs = MemoryPreferences::with_credentials("me@example.org", "secret");
//!     let mut spec = client.connector().init_spec(&Labels::default());
//!
//!     let command = ConnectorCommand::send(
//!         Tariff::WithoutSender,
//!         vec![RawPhoneNumber::new("01701234567")?],
//!         DefaultPrefix::new("+49")?,
//!         None,
//!         MessageText::new("hello")?,
//!     )?;
//!     client.send(&prefs, &mut spec, &command).await?;
//!     let balance = client.update_balance(&prefs, &mut spec).await?;
//!     println!("balance: {balance}");
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod connector;
pub mod domain;
pub mod preferences;
mod transport;

pub use client::{ConnectorError, WerbelokalClient, WerbelokalClientBuilder};
pub use connector::{Labels, URL_BALANCE, URL_SEND, WerbelokalConnector};
pub use domain::{
    Capabilities, CommandType, ConnectorCommand, ConnectorSpec, ConnectorStatus, DefaultPrefix,
    MessageText, ParseOutcome, Password, PhoneNumber, RawPhoneNumber, SendCommand, SenderId,
    SubConnector, Tariff, Username, ValidationError,
};
pub use preferences::{MemoryPreferences, PreferenceStore};
