//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod spec;
mod validation;
mod value;

pub use request::{CommandType, ConnectorCommand, SendCommand};
pub use response::ParseOutcome;
pub use spec::{Capabilities, ConnectorSpec, ConnectorStatus, SubConnector};
pub use validation::ValidationError;
pub use value::{
    DefaultPrefix, MessageText, Password, PhoneNumber, RawPhoneNumber, SenderId, Tariff, Username,
};

#[cfg(test)]
mod tests {
    use super::*;

    fn message() -> MessageText {
        MessageText::new("hi").unwrap()
    }

    fn prefix() -> DefaultPrefix {
        DefaultPrefix::new("+49").unwrap()
    }

    #[test]
    fn username_rejects_empty() {
        assert!(matches!(
            Username::new(""),
            Err(ValidationError::Empty {
                field: Username::FIELD
            })
        ));
    }

    #[test]
    fn password_rejects_empty() {
        assert!(matches!(
            Password::new(""),
            Err(ValidationError::Empty {
                field: Password::FIELD
            })
        ));
    }

    #[test]
    fn send_command_requires_recipients() {
        let err =
            ConnectorCommand::send(Tariff::WithoutSender, Vec::new(), prefix(), None, message())
                .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::Empty {
                field: RawPhoneNumber::FIELD
            }
        ));
    }

    #[test]
    fn send_command_exposes_its_parts() {
        let pn = RawPhoneNumber::new("01701234567").unwrap();
        let sender = SenderId::new("shop").unwrap();
        let command = ConnectorCommand::send(
            Tariff::WithSender,
            vec![pn.clone()],
            prefix(),
            Some(sender.clone()),
            message(),
        )
        .unwrap();

        assert_eq!(command.kind(), CommandType::Send);
        let ConnectorCommand::Send(send) = command else {
            panic!("expected a send command");
        };
        assert_eq!(send.tariff(), Tariff::WithSender);
        assert_eq!(send.recipients(), &[pn]);
        assert_eq!(send.default_prefix(), &prefix());
        assert_eq!(send.sender(), Some(&sender));
        assert_eq!(send.text().as_str(), "hi");
    }

    #[test]
    fn update_command_kind() {
        assert_eq!(ConnectorCommand::update().kind(), CommandType::Update);
    }
}
