use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::amount::Amount;

/// A customer transaction record.
///
/// This is both the domain record and the wire form: the creation date is
/// stamped and kept by the persistence layer and never leaves it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub customerid: i64,
    #[serde(rename = "type")]
    pub message_type: String,
    pub amount: Amount,
    pub uuid: Uuid,
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use crate::domain::amount::Amount;

    use super::Message;

    fn message() -> Message {
        Message {
            customerid: 1,
            message_type: "A".to_string(),
            amount: Amount::parse("0.012").expect("amount"),
            uuid: Uuid::parse_str("a596b362-08be-419f-8070-9c3055566e7c").expect("uuid"),
        }
    }

    #[test]
    fn wire_form_matches_the_published_shape() {
        let value = serde_json::to_value(message()).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "customerid": 1,
                "type": "A",
                "amount": "0.012",
                "uuid": "a596b362-08be-419f-8070-9c3055566e7c",
            })
        );
    }

    #[test]
    fn deserializes_from_the_wire_form() {
        let parsed: Message = serde_json::from_str(
            r#"{"customerid": 1, "type": "A", "amount": "0.012",
                "uuid": "a596b362-08be-419f-8070-9c3055566e7c"}"#,
        )
        .expect("deserialize");
        assert_eq!(parsed, message());
    }

    #[test]
    fn rejects_a_body_with_bad_amount_precision() {
        let result = serde_json::from_str::<Message>(
            r#"{"customerid": 1, "type": "A", "amount": "0.01",
                "uuid": "a596b362-08be-419f-8070-9c3055566e7c"}"#,
        );
        assert!(result.is_err());
    }
}
