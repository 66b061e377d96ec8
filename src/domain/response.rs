/// Successful result of parsing a gateway reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// The gateway accepted the message.
    Sent,
    /// The gateway reported the account balance, formatted for display (e.g. `12.50€`).
    Balance(String),
}
