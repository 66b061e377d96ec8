use crate::domain::{
    MessageText, Password, PhoneNumber, RawPhoneNumber, SendCommand, SenderId, Tariff, Username,
    ValidationError,
};

pub fn encode_balance_query(username: &Username, password: &Password) -> Vec<(String, String)> {
    vec![
        (Username::FIELD.to_owned(), username.as_str().to_owned()),
        (Password::FIELD.to_owned(), password.as_str().to_owned()),
    ]
}

/// Query for `websmsdroid.html`.
///
/// Only the first recipient is transmitted: the gateway takes one number per request.
pub fn encode_send_query(
    username: &Username,
    password: &Password,
    command: &SendCommand,
) -> Result<Vec<(String, String)>, ValidationError> {
    let destination = first_destination(command)?;

    let mut params = encode_balance_query(username, password);
    params.push((Tariff::FIELD.to_owned(), command.tariff().id().to_owned()));
    params.push((
        RawPhoneNumber::FIELD.to_owned(),
        destination.destination().to_owned(),
    ));
    params.push((SenderId::FIELD.to_owned(), SenderId::PLACEHOLDER.to_owned()));
    params.push((
        MessageText::FIELD.to_owned(),
        command.text().as_str().to_owned(),
    ));
    Ok(params)
}

fn first_destination(command: &SendCommand) -> Result<PhoneNumber, ValidationError> {
    let recipients = command.recipients();
    let first = recipients.first().ok_or(ValidationError::Empty {
        field: RawPhoneNumber::FIELD,
    })?;
    let destination = first.to_international(command.default_prefix())?;
    if recipients.len() > 1 {
        tracing::debug!(
            target: "werbelokal",
            recipient = destination.as_str(),
            dropped = recipients.len() - 1,
            "gateway accepts one recipient per request, sending to the first only"
        );
    }
    Ok(destination)
}
