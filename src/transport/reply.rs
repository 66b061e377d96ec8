//! werbelokal.de answers with a short plain-text (sometimes HTML-ish) body; only the
//! first line carries the result.

const SEND_OK_MARKER: &str = "SMS wurde versandt.";
const BALANCE_MARKER: &str = "Guthaben: ";
const BALANCE_CURRENCY: char = '€';

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendReply {
    Sent { line: String },
    Rejected { line: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BalanceReply {
    Balance { amount: String },
    Rejected { line: String },
}

/// First line of the body with literal `<br>` tags removed, trimmed.
pub fn first_line(body: &str) -> String {
    let line = body.split('\n').next().unwrap_or_default();
    line.replace("<br>", "").trim().to_owned()
}

pub fn decode_send_reply(body: &str) -> SendReply {
    let line = first_line(body);
    if line.contains(SEND_OK_MARKER) {
        SendReply::Sent { line }
    } else {
        SendReply::Rejected { line }
    }
}

/// The amount is the second space-separated token of `Guthaben: <amount> Euro`.
pub fn decode_balance_reply(body: &str) -> BalanceReply {
    let line = first_line(body);
    if !line.contains(BALANCE_MARKER) {
        return BalanceReply::Rejected { line };
    }
    match line.split(' ').nth(1) {
        Some(token) => BalanceReply::Balance {
            amount: format!("{token}{BALANCE_CURRENCY}"),
        },
        None => BalanceReply::Rejected { line },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_strips_br_and_whitespace() {
        assert_eq!(first_line("  SMS wurde versandt.<br>\nsecond"), "SMS wurde versandt.");
        assert_eq!(first_line("<br>Guthaben: 3.00 Euro<br>"), "Guthaben: 3.00 Euro");
        assert_eq!(first_line(""), "");
    }

    #[test]
    fn send_success_marker_may_appear_anywhere_in_line() {
        assert_eq!(
            decode_send_reply("OK: SMS wurde versandt. Danke\nok"),
            SendReply::Sent {
                line: "OK: SMS wurde versandt. Danke".to_owned()
            }
        );
    }

    #[test]
    fn send_marker_on_second_line_is_ignored() {
        assert_eq!(
            decode_send_reply("Fehler\nSMS wurde versandt."),
            SendReply::Rejected {
                line: "Fehler".to_owned()
            }
        );
    }

    #[test]
    fn balance_takes_second_token_and_appends_euro() {
        assert_eq!(
            decode_balance_reply("Guthaben: 12.50 Euro"),
            BalanceReply::Balance {
                amount: "12.50€".to_owned()
            }
        );
        assert_eq!(
            decode_balance_reply("Guthaben: 0,99<br>\nmore"),
            BalanceReply::Balance {
                amount: "0,99€".to_owned()
            }
        );
    }

    #[test]
    fn balance_without_marker_is_rejected() {
        assert_eq!(
            decode_balance_reply("Login fehlgeschlagen"),
            BalanceReply::Rejected {
                line: "Login fehlgeschlagen".to_owned()
            }
        );
    }
}
