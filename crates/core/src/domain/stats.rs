use serde::Serialize;

use crate::domain::amount::Amount;
use crate::domain::message::Message;

/// Aggregation over a filtered set of messages.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stats {
    pub messages: Vec<Message>,
    pub messages_count: usize,
    pub total_amount: Amount,
}

impl Stats {
    /// Count the messages and sum their amounts in exact decimal arithmetic.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        let total_amount = messages.iter().map(|message| message.amount).sum();
        Self { messages_count: messages.len(), total_amount, messages }
    }
}
