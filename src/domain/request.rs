use crate::domain::validation::ValidationError;
use crate::domain::value::{DefaultPrefix, MessageText, RawPhoneNumber, SenderId, Tariff};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandType {
    /// Send a message.
    Send,
    /// Fetch the account balance.
    Update,
}

/// One invocation requested by the host.
#[derive(Debug, Clone)]
pub enum ConnectorCommand {
    Send(SendCommand),
    Update,
}

#[derive(Debug, Clone)]
pub struct SendCommand {
    tariff: Tariff,
    recipients: Vec<RawPhoneNumber>,
    default_prefix: DefaultPrefix,
    sender: Option<SenderId>,
    text: MessageText,
}

impl ConnectorCommand {
    pub fn send(
        tariff: Tariff,
        recipients: Vec<RawPhoneNumber>,
        default_prefix: DefaultPrefix,
        sender: Option<SenderId>,
        text: MessageText,
    ) -> Result<Self, ValidationError> {
        if recipients.is_empty() {
            return Err(ValidationError::Empty {
                field: RawPhoneNumber::FIELD,
            });
        }
        Ok(Self::Send(SendCommand {
            tariff,
            recipients,
            default_prefix,
            sender,
            text,
        }))
    }

    pub fn update() -> Self {
        Self::Update
    }

    pub fn kind(&self) -> CommandType {
        match self {
            Self::Send(_) => CommandType::Send,
            Self::Update => CommandType::Update,
        }
    }
}

impl SendCommand {
    pub fn tariff(&self) -> Tariff {
        self.tariff
    }

    /// Recipients in the order given by the host. Never empty.
    pub fn recipients(&self) -> &[RawPhoneNumber] {
        &self.recipients
    }

    pub fn default_prefix(&self) -> &DefaultPrefix {
        &self.default_prefix
    }

    pub fn sender(&self) -> Option<&SenderId> {
        self.sender.as_ref()
    }

    pub fn text(&self) -> &MessageText {
        &self.text
    }
}
