use serde::Deserialize;
use uuid::Uuid;

///
/// Text frames sent by the user through websocket
///
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ClientMessage {
    Join {
        #[serde(rename = "userId")]
        user_id: Uuid,
    },
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn join_json_deserialize_ok() {
        let json = r#"{ "type": "join", "userId": "379a73e6-91dd-48a3-a652-002d34c43670" }"#;

        let ClientMessage::Join { user_id } = serde_json::from_str(json).unwrap();

        assert_eq!(
            user_id,
            Uuid::parse_str("379a73e6-91dd-48a3-a652-002d34c43670").unwrap()
        );
    }

    #[test]
    fn unknown_message_type() {
        let json = r#"{ "type": "leave", "userId": "379a73e6-91dd-48a3-a652-002d34c43670" }"#;

        assert!(serde_json::from_str::<ClientMessage>(json).is_err());
    }
}
