use std::sync::Arc;

use serde_json::json;

use concierge::chat::scripted::{tool_call_chunk, Script, ScriptedProvider};
use concierge::chat::{ChatRole, MessageType, StreamChunk};
use concierge::conversation::{ContentPart, NoopObserver, Role, Session, SessionHandle};
use concierge::orchestrator::{Orchestrator, Persona, RenderedTurn, TurnOutcome};
use concierge::persistence::JsonConversationStore;
use concierge::tools::{
    ToolRegistry, COMPARE_MODELS, SCHEDULE_TEST_DRIVE, SHOW_INVENTORY, SHOW_VEHICLE_DETAILS,
};
use concierge::view::View;
use concierge::ConciergeError;

fn setup(scripts: Vec<Script>) -> (Arc<ScriptedProvider>, Orchestrator, SessionHandle) {
    let provider = Arc::new(ScriptedProvider::new(scripts));
    let orchestrator = Orchestrator::new(
        provider.clone(),
        ToolRegistry::default(),
        Persona::land_rover(),
    );
    let session = SessionHandle::new(Session::new(Arc::new(NoopObserver)));
    (provider, orchestrator, session)
}

fn roles(state: &concierge::conversation::ConversationState) -> Vec<Role> {
    state.messages().iter().map(|m| m.role).collect()
}

#[tokio::test]
async fn tool_turn_commits_paired_call_and_result() {
    let (_, orch, session) = setup(vec![Script::tool(
        SHOW_VEHICLE_DETAILS,
        json!({"model": "Defender"}),
    )]);

    let turn = orch
        .send_message(&session, "Show me the Defender")
        .await
        .expect("turn");

    let RenderedTurn::Tool { invocation, view } = turn else {
        panic!("expected a tool turn");
    };
    assert_eq!(invocation.name, SHOW_VEHICLE_DETAILS);
    match view {
        View::VehicleShowcase { vehicle, fallback } => {
            assert_eq!(vehicle.model, "Defender 110");
            assert!(!fallback);
        }
        other => panic!("unexpected view {}", other.kind()),
    }

    let state = session.snapshot().await;
    assert_eq!(roles(&state), vec![Role::User, Role::Assistant, Role::Tool]);
    assert!(state.unpaired_tool_calls().is_empty());
    let call_id = state.messages()[1].parts()[0].tool_call_id().to_string();
    assert_eq!(call_id, invocation.call_id);
    assert!(matches!(
        &state.messages()[2].parts()[0],
        ContentPart::ToolResult { tool_call_id, result, .. }
            if *tool_call_id == call_id && result["model"] == "Defender 110"
    ));
}

#[tokio::test]
async fn unknown_model_falls_back_to_first_vehicle() {
    let (_, orch, session) = setup(vec![Script::tool(
        SHOW_VEHICLE_DETAILS,
        json!({"model": "Model T"}),
    )]);

    let view = orch
        .send_message(&session, "Show me the Model T")
        .await
        .expect("turn")
        .into_view();

    let View::VehicleShowcase { vehicle, fallback } = view else {
        panic!("expected a showcase");
    };
    assert!(fallback);
    assert_eq!(vehicle.model, "Range Rover Sport");
}

#[tokio::test]
async fn text_turn_commits_after_stream_finishes() {
    let (_, orch, session) = setup(vec![Script::text(&["The Defender ", "is rugged."])]);

    let turn = orch
        .send_message(&session, "Tell me about the Defender")
        .await
        .expect("turn");
    let outcome = turn.outcome().await.expect("outcome");

    assert_eq!(
        outcome,
        TurnOutcome::TextCompletion("The Defender is rugged.".to_string())
    );
    let state = session.snapshot().await;
    assert_eq!(roles(&state), vec![Role::User, Role::Assistant]);
    assert_eq!(state.messages()[1].text(), Some("The Defender is rugged."));
}

#[tokio::test]
async fn provider_failure_keeps_only_the_user_message() {
    let (_, orch, session) = setup(vec![Script::Fail("upstream down".to_string())]);

    let err = orch
        .send_message(&session, "hello")
        .await
        .err()
        .expect("turn must fail");

    assert!(matches!(err, ConciergeError::ProviderError(_)));
    let state = session.snapshot().await;
    assert_eq!(roles(&state), vec![Role::User]);
}

#[tokio::test]
async fn mid_stream_failure_commits_no_assistant_message() {
    let (_, orch, session) = setup(vec![Script::FailMidStream {
        deltas: vec!["The Range".to_string()],
        error: "connection reset".to_string(),
    }]);

    let turn = orch
        .send_message(&session, "Tell me about the Range Rover")
        .await
        .expect("first chunk arrives");
    let err = turn.outcome().await.err().expect("stream must fail");

    assert!(matches!(err, ConciergeError::StreamClosed(_)));
    assert_eq!(roles(&session.snapshot().await), vec![Role::User]);
}

#[tokio::test]
async fn malformed_arguments_are_not_recorded() {
    let (_, orch, session) = setup(vec![Script::tool(SHOW_VEHICLE_DETAILS, json!({}))]);

    let err = orch
        .send_message(&session, "Show me something")
        .await
        .err()
        .expect("turn must fail");

    assert!(matches!(err, ConciergeError::InvalidToolArgs { .. }), "{err}");
    assert_eq!(roles(&session.snapshot().await), vec![Role::User]);
}

#[tokio::test]
async fn unknown_tool_is_rejected() {
    let (_, orch, session) = setup(vec![Script::tool("bookService", json!({}))]);

    let err = orch
        .send_message(&session, "Book a service")
        .await
        .err()
        .expect("turn must fail");

    assert!(matches!(err, ConciergeError::UnknownTool(name) if name == "bookService"));
    assert_eq!(roles(&session.snapshot().await), vec![Role::User]);
}

#[tokio::test]
async fn empty_input_is_rejected_before_anything_is_sent() {
    let (provider, orch, session) = setup(Vec::new());

    let err = orch
        .send_message(&session, "   ")
        .await
        .err()
        .expect("empty input");

    assert!(matches!(err, ConciergeError::EmptyInput));
    assert!(session.snapshot().await.is_empty());
    assert!(provider.requests().is_empty());
}

#[tokio::test]
async fn empty_reply_commits_an_empty_assistant_message() {
    let (_, orch, session) = setup(vec![Script::Text(Vec::new())]);

    let turn = orch.send_message(&session, "hi").await.expect("turn");

    assert_eq!(
        turn.outcome().await.expect("outcome"),
        TurnOutcome::TextCompletion(String::new())
    );
    let state = session.snapshot().await;
    assert_eq!(roles(&state), vec![Role::User, Role::Assistant]);
    assert_eq!(state.messages()[1].text(), Some(""));
}

#[tokio::test]
async fn requests_carry_persona_history_and_all_tools() {
    let (provider, orch, session) = setup(vec![
        Script::tool(SHOW_INVENTORY, json!({})),
        Script::text(&["The Discovery Sport seats seven."]),
    ]);

    orch.send_message(&session, "Show me everything")
        .await
        .expect("first turn");
    let second = orch
        .send_message(&session, "Which is best for families?")
        .await
        .expect("second turn");
    second.outcome().await.expect("outcome");

    let requests = provider.requests();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert_eq!(request.messages[0].role, ChatRole::System);
        assert!(request.messages[0].content.contains("Land Rover"));
        assert_eq!(
            request.tool_names,
            vec![
                SHOW_VEHICLE_DETAILS,
                SHOW_INVENTORY,
                COMPARE_MODELS,
                SCHEDULE_TEST_DRIVE
            ]
        );
    }

    let history = &requests[1].messages;
    assert_eq!(history.len(), 5);
    assert!(matches!(history[2].message_type, MessageType::ToolUse(_)));
    assert!(matches!(history[3].message_type, MessageType::ToolResult(_)));
    assert_eq!(history[4].content, "Which is best for families?");

    let state = session.snapshot().await;
    assert_eq!(
        roles(&state),
        vec![Role::User, Role::Assistant, Role::Tool, Role::User, Role::Assistant]
    );
    assert!(state.unpaired_tool_calls().is_empty());
}

#[tokio::test]
async fn finalized_turns_are_saved_to_disk() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = JsonConversationStore::new(dir.path().to_path_buf());
    let provider = Arc::new(ScriptedProvider::new(vec![
        Script::tool(SCHEDULE_TEST_DRIVE, json!({"model": "Velar"})),
        Script::text(&["See you then."]),
    ]));
    let orch = Orchestrator::new(provider, ToolRegistry::default(), Persona::land_rover());
    let session = SessionHandle::new(Session::new(Arc::new(store.clone())));

    orch.send_message(&session, "Book a Velar test drive")
        .await
        .expect("tool turn");
    let chat_id = session.chat_id().await;
    let saved = store.load(chat_id).expect("load").expect("saved");
    assert_eq!(saved.state.len(), 3);

    let turn = orch.send_message(&session, "Thanks").await.expect("text turn");
    turn.outcome().await.expect("outcome");
    let saved = store.load(chat_id).expect("load").expect("saved");
    assert_eq!(saved.state, session.snapshot().await);
}

fn done(stop_reason: &str) -> StreamChunk {
    StreamChunk::Done {
        stop_reason: stop_reason.to_string(),
    }
}

#[tokio::test]
async fn tool_call_after_text_is_ignored() {
    let (_, orch, session) = setup(vec![Script::Chunks(vec![
        StreamChunk::Text("Here is the Defender.".to_string()),
        tool_call_chunk(0, SHOW_VEHICLE_DETAILS, json!({"model": "Defender"})),
        done("tool_calls"),
    ])]);

    let turn = orch
        .send_message(&session, "Show me the Defender")
        .await
        .expect("turn");
    let outcome = turn.outcome().await.expect("outcome");

    assert_eq!(
        outcome,
        TurnOutcome::TextCompletion("Here is the Defender.".to_string())
    );
    let state = session.snapshot().await;
    assert_eq!(roles(&state), vec![Role::User, Role::Assistant]);
    assert_eq!(state.messages()[1].text(), Some("Here is the Defender."));
}

#[tokio::test]
async fn only_the_first_of_two_tool_calls_runs() {
    let (_, orch, session) = setup(vec![Script::Chunks(vec![
        tool_call_chunk(0, SHOW_INVENTORY, json!({})),
        tool_call_chunk(1, SHOW_VEHICLE_DETAILS, json!({"model": "Velar"})),
        done("tool_calls"),
    ])]);

    let turn = orch
        .send_message(&session, "What do you have?")
        .await
        .expect("turn");

    let RenderedTurn::Tool { invocation, .. } = turn else {
        panic!("expected a tool turn");
    };
    assert_eq!(invocation.name, SHOW_INVENTORY);
    let state = session.snapshot().await;
    assert_eq!(roles(&state), vec![Role::User, Role::Assistant, Role::Tool]);
    assert!(state.unpaired_tool_calls().is_empty());
}

#[tokio::test]
async fn stream_ending_before_a_tool_call_completes_fails_the_turn() {
    let (_, orch, session) = setup(vec![Script::Chunks(vec![
        StreamChunk::ToolUseStart {
            index: 0,
            id: "call_1".to_string(),
            name: SHOW_INVENTORY.to_string(),
        },
        StreamChunk::ToolUseInputDelta {
            index: 0,
            partial_json: "{}".to_string(),
        },
    ])]);

    let err = orch
        .send_message(&session, "What do you have?")
        .await
        .err()
        .expect("turn must fail");

    assert!(matches!(err, ConciergeError::StreamClosed(_)), "{err}");
    assert_eq!(roles(&session.snapshot().await), vec![Role::User]);
}

#[tokio::test]
async fn text_cut_off_before_done_is_not_committed() {
    let (_, orch, session) = setup(vec![Script::Chunks(vec![StreamChunk::Text(
        "The Defender is".to_string(),
    )])]);

    let turn = orch
        .send_message(&session, "Tell me about the Defender")
        .await
        .expect("first chunk arrives");
    let err = turn.outcome().await.err().expect("stream must fail");

    assert!(matches!(err, ConciergeError::StreamClosed(_)), "{err}");
    assert_eq!(roles(&session.snapshot().await), vec![Role::User]);
}
