use super::*;

// =============================================================
// Requests
// =============================================================

#[test]
fn chat_request_serializes_expected_body() {
    let req = ChatRequest::user("Hola", ConversationId::from("171234"));
    let body = serde_json::to_value(&req).unwrap();
    assert_eq!(body, serde_json::json!({ "message": "Hola", "role": "user", "conversation_id": "171234" }));
}

#[test]
fn chat_request_keeps_field_order_on_the_wire() {
    let req = ChatRequest::user("Hola", ConversationId::from("171234"));
    let text = serde_json::to_string(&req).unwrap();
    assert_eq!(text, r#"{"message":"Hola","role":"user","conversation_id":"171234"}"#);
}

#[test]
fn feedback_request_serializes_expected_body() {
    let req = FeedbackRequest {
        conversation_id: ConversationId::from("c-1"),
        message_id: "m1".to_owned(),
        is_positive: false,
    };
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        serde_json::json!({ "conversation_id": "c-1", "message_id": "m1", "is_positive": false })
    );
}

#[test]
fn system_message_request_serializes_expected_body() {
    let req = SystemMessageRequest {
        conversation_id: ConversationId::from("c-1"),
        system_message: "Responde en español".to_owned(),
    };
    assert_eq!(
        serde_json::to_value(&req).unwrap(),
        serde_json::json!({ "conversation_id": "c-1", "system_message": "Responde en español" })
    );
}

// =============================================================
// Responses
// =============================================================

#[test]
fn chat_reply_accepts_string_message_id() {
    let reply: ChatReply = serde_json::from_str(r#"{"response":"¡Hola!","message_id":"m1"}"#).unwrap();
    assert_eq!(reply.response, "¡Hola!");
    assert_eq!(reply.message_id.as_deref(), Some("m1"));
}

#[test]
fn chat_reply_accepts_numeric_message_id() {
    let reply: ChatReply = serde_json::from_str(r#"{"response":"ok","message_id":17}"#).unwrap();
    assert_eq!(reply.message_id.as_deref(), Some("17"));
}

#[test]
fn chat_reply_tolerates_missing_message_id() {
    let reply: ChatReply = serde_json::from_str(r#"{"response":"ok"}"#).unwrap();
    assert_eq!(reply.message_id, None);
}

#[test]
fn stored_message_rejects_object_id() {
    let result = serde_json::from_str::<StoredMessage>(r#"{"role":"user","content":"x","id":{"a":1}}"#);
    assert!(result.is_err());
}

#[test]
fn conversation_summary_keeps_backend_fields() {
    let items: Vec<ConversationSummary> = serde_json::from_str(
        r#"[{"conversation_id":"c-1","title":"Precios","updated_at":"2025-03-01T10:00:00"},
            {"conversation_id":"c-2","title":null}]"#,
    )
    .unwrap();
    assert_eq!(items[0].conversation_id.as_str(), "c-1");
    assert_eq!(items[0].title.as_deref(), Some("Precios"));
    assert_eq!(items[1].title, None);
    assert_eq!(items[1].updated_at, None);
}

#[test]
fn cleared_conversation_reads_new_id() {
    let cleared: ClearedConversation = serde_json::from_str(r#"{"conversation_id":"srv-9"}"#).unwrap();
    assert_eq!(cleared.conversation_id, ConversationId::from("srv-9"));
}

#[test]
fn conversation_id_displays_raw_value() {
    assert_eq!(ConversationId::new("171234").to_string(), "171234");
}

#[test]
fn conversation_summary_accepts_numeric_conversation_id() {
    let items: Vec<ConversationSummary> =
        serde_json::from_str(r#"[{"conversation_id":42,"title":"t"},{"conversation_id":"c-2"}]"#).unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].conversation_id, ConversationId::from("42"));
    assert_eq!(items[1].conversation_id, ConversationId::from("c-2"));
}

#[test]
fn cleared_conversation_accepts_numeric_id() {
    let cleared: ClearedConversation = serde_json::from_str(r#"{"conversation_id":1712345678901}"#).unwrap();
    assert_eq!(cleared.conversation_id, ConversationId::from("1712345678901"));
}

#[test]
fn numeric_conversation_id_is_sent_back_as_string() {
    let cleared: ClearedConversation = serde_json::from_str(r#"{"conversation_id":7}"#).unwrap();
    let req = ChatRequest::user("Hola", cleared.conversation_id);
    assert_eq!(serde_json::to_value(&req).unwrap()["conversation_id"], serde_json::json!("7"));
}

#[test]
fn conversation_id_rejects_null_and_objects() {
    assert!(serde_json::from_str::<ClearedConversation>(r#"{"conversation_id":null}"#).is_err());
    assert!(serde_json::from_str::<ClearedConversation>(r#"{"conversation_id":{"id":1}}"#).is_err());
}
