use serde::{Deserialize, Serialize};

use crate::domain::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// werbelokal.de account login (the e-mail address used on the web site).
///
/// Invariant: must not be empty. The value is kept exactly as stored in the preferences.
pub struct Username(String);

impl Username {
    /// Query parameter name used by werbelokal.de (`email`).
    pub const FIELD: &'static str = "email";

    /// Create a validated [`Username`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the login as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, Hash)]
/// werbelokal.de account password.
///
/// Invariant: must not be empty (whitespace is preserved and allowed).
pub struct Password(String);

impl Password {
    /// Query parameter name used by werbelokal.de (`password`).
    pub const FIELD: &'static str = "password";

    /// Create a validated [`Password`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the password as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Password(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Sender as configured in the host.
///
/// werbelokal.de does not support custom senders: the wire value is always
/// [`SenderId::PLACEHOLDER`], so a configured sender is carried but never transmitted.
pub struct SenderId(String);

impl SenderId {
    /// Query parameter name used by werbelokal.de (`xxx`).
    pub const FIELD: &'static str = "xxx";

    /// The only sender value the gateway accepts.
    pub const PLACEHOLDER: &'static str = "xxx";

    /// Create a validated [`SenderId`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the sender as configured.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// SMS message text (`text`).
///
/// Invariant: non-empty after trimming. The original value (including whitespace) is preserved.
pub struct MessageText(String);

impl MessageText {
    /// Query parameter name used by werbelokal.de (`text`).
    pub const FIELD: &'static str = "text";

    /// Create validated message text.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(value))
    }

    /// Borrow the message text as provided.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
/// werbelokal.de tariff (`tarif`), exposed to the host as a sub-connector.
pub enum Tariff {
    /// Tariff `1`: messages are delivered without a sender.
    #[serde(rename = "1")]
    WithoutSender,
    /// Tariff `2`: messages are delivered with a sender.
    #[serde(rename = "2")]
    WithSender,
}

impl Tariff {
    /// Query parameter name used by werbelokal.de (`tarif`).
    pub const FIELD: &'static str = "tarif";

    /// Sub-connector id as sent on the wire.
    pub fn id(self) -> &'static str {
        match self {
            Self::WithoutSender => "1",
            Self::WithSender => "2",
        }
    }

    /// Look up a tariff by its sub-connector id.
    pub fn from_id(id: &str) -> Result<Self, ValidationError> {
        match id.trim() {
            "1" => Ok(Self::WithoutSender),
            "2" => Ok(Self::WithSender),
            other => Err(ValidationError::UnknownTariff {
                input: other.to_owned(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// International dialing prefix used for numbers entered in national format, e.g. `+49`.
///
/// Invariant: `+` followed by at least one digit.
pub struct DefaultPrefix(String);

impl DefaultPrefix {
    const FIELD: &'static str = "default_prefix";

    /// Create a validated [`DefaultPrefix`].
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        let valid = trimmed.strip_prefix('+').is_some_and(|digits| {
            !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
        });
        if !valid {
            return Err(ValidationError::InvalidPrefix {
                input: trimmed.to_owned(),
            });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Borrow the prefix including the leading `+`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Recipient number as entered in the host (`destination`).
///
/// Invariant: non-empty after trimming. This type does not normalize; use
/// [`RawPhoneNumber::to_international`] to apply the default prefix.
pub struct RawPhoneNumber(String);

impl RawPhoneNumber {
    /// Query parameter name used by werbelokal.de (`destination`).
    pub const FIELD: &'static str = "destination";

    /// Create a validated (non-empty) raw phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let value = value.into();
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Raw (trimmed) value as entered.
    pub fn raw(&self) -> &str {
        &self.0
    }

    /// Rewrite a national number into international form.
    ///
    /// `+49…` is kept, `0049…` becomes `+49…`, `0170…` becomes `<prefix>170…`, and
    /// anything else gets the prefix prepended. See [`PhoneNumber::parse`] for the
    /// normalization applied afterwards.
    pub fn to_international(
        &self,
        prefix: &DefaultPrefix,
    ) -> Result<PhoneNumber, ValidationError> {
        let raw = self.raw();
        let international = if raw.starts_with('+') {
            raw.to_owned()
        } else if let Some(rest) = raw.strip_prefix("00") {
            format!("+{rest}")
        } else if let Some(rest) = raw.strip_prefix('0') {
            format!("{}{rest}", prefix.as_str())
        } else {
            format!("{}{raw}", prefix.as_str())
        };
        PhoneNumber::parse(international)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Recipient in international format, `+` followed by digits only.
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Query parameter name used by werbelokal.de (`destination`).
    pub const FIELD: &'static str = "destination";

    /// Normalize a number in international format.
    ///
    /// Numbers `phonenumber` understands are formatted as E.164. Anything else (an
    /// unassigned country code, say) keeps its digits as entered, so the gateway decides.
    pub fn parse(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        let raw = input.trim();
        if raw.is_empty() {
            return Err(ValidationError::Empty { field: Self::FIELD });
        }

        if let Ok(parsed) = phonenumber::parse(None, raw) {
            let e164 = phonenumber::format(&parsed)
                .mode(phonenumber::Mode::E164)
                .to_string();
            return Ok(Self(e164));
        }

        let digits = raw
            .chars()
            .filter(char::is_ascii_digit)
            .collect::<String>();
        if digits.is_empty() {
            return Err(ValidationError::InvalidPhoneNumber {
                input: raw.to_owned(),
            });
        }
        tracing::debug!(
            target: "werbelokal",
            input = raw,
            "phone number not recognized, sending its digits unchanged"
        );
        Ok(Self(format!("+{digits}")))
    }

    /// International form including the leading `+`.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Digits without the leading `+`, as werbelokal.de expects them.
    pub fn destination(&self) -> &str {
        self.0.strip_prefix('+').unwrap_or(&self.0)
    }
}
