//! Transport layer: query encoding and plain-text reply decoding.

mod query;
mod reply;

pub use query::{encode_balance_query, encode_send_query};
pub use reply::{BalanceReply, SendReply, decode_balance_reply, decode_send_reply};
