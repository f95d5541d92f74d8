use super::*;

fn summary(id: &str, title: &str) -> ConversationSummary {
    ConversationSummary {
        conversation_id: ConversationId::from(id),
        title: Some(title.to_owned()),
        updated_at: Some("2025-03-01T10:00:00".to_owned()),
    }
}

#[test]
fn history_state_default_is_empty_and_loading() {
    let state = HistoryState::default();
    assert!(state.items.is_empty());
    assert!(state.loading);
    assert_eq!(state.error, None);
}

#[test]
fn begin_fetch_on_reopen_marks_loading_again() {
    let mut state = HistoryState::default();
    state.finish_fetch(Err(ApiError::Status(500)));
    assert!(!state.loading);
    assert!(state.error.is_some());
    state.begin_fetch();
    assert!(state.loading);
}

#[test]
fn finish_fetch_stores_items_verbatim() {
    let mut state = HistoryState::default();
    state.begin_fetch();
    assert!(state.loading);
    let items = vec![summary("a", "Uno"), summary("b", "Dos")];
    state.finish_fetch(Ok(items.clone()));
    assert!(!state.loading);
    assert_eq!(state.items, items);
}

#[test]
fn finish_fetch_failure_sets_inline_error() {
    let mut state = HistoryState::default();
    state.begin_fetch();
    state.finish_fetch(Err(ApiError::Status(503)));
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some(LOAD_ERROR_MESSAGE));
}

#[test]
fn successful_refetch_clears_previous_error() {
    let mut state = HistoryState::default();
    state.finish_fetch(Err(ApiError::Status(503)));
    state.finish_fetch(Ok(vec![summary("a", "Uno")]));
    assert_eq!(state.error, None);
    assert_eq!(state.items.len(), 1);
}

#[test]
fn remove_drops_only_matching_entry() {
    let mut state = HistoryState { items: vec![summary("a", "Uno"), summary("b", "Dos"), summary("c", "Tres")], ..HistoryState::default() };
    assert_eq!(state.remove(&ConversationId::from("b")), 1);
    let ids: Vec<_> = state.items.iter().map(|i| i.conversation_id.as_str()).collect();
    assert_eq!(ids, ["a", "c"]);
}

#[test]
fn remove_unknown_id_is_noop() {
    let mut state = HistoryState { items: vec![summary("a", "Uno")], ..HistoryState::default() };
    assert_eq!(state.remove(&ConversationId::from("zzz")), 0);
    assert_eq!(state.items.len(), 1);
}
