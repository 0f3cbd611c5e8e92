//! End-to-end orchestrator tests against scripted providers.

use colloquy_config::ColloquyConfig;
use colloquy_core::{AgentProfile, CoreError, HistoryStore, MemoryHistoryStore, Orchestrator, StoredMessage};
use colloquy_protocol::{Role, ToolCallRequest};
use colloquy_test_utils::{
    BrokenTool, FailingProvider, ScriptedProvider, StubTool, empty_response, text_response,
    tool_call_response,
};
use colloquy_tools::builtins::CalculatorTool;
use colloquy_tools::ToolRegistry;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::sync::Arc;
use uuid::Uuid;

fn config() -> ColloquyConfig {
    ColloquyConfig::builder().api_key("sk-test").build()
}

fn registry() -> Arc<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    registry.register(Arc::new(CalculatorTool)).expect("register");
    registry
        .register(Arc::new(StubTool::new("Echo", json!({ "ok": true }))))
        .expect("register");
    registry
        .register(Arc::new(BrokenTool::new("Broken", "backend unavailable")))
        .expect("register");
    registry
        .register(Arc::new(
            StubTool::new("Lookup", json!({ "value": 42 })).with_required_string("key"),
        ))
        .expect("register");
    registry.register_alias("calculator", "Calculator").expect("alias");
    Arc::new(registry)
}

fn orchestrator_with(provider: Arc<ScriptedProvider>) -> Orchestrator {
    Orchestrator::new(config(), registry(), provider)
}

#[tokio::test]
async fn plain_reply_takes_one_provider_call() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_response("Hello!")]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "You are a helpful assistant.");

    let reply = orchestrator.run_turn(&agent, "Hi there", &[]).await.expect("turn");

    assert_eq!(reply, "Hello!");
    assert_eq!(provider.call_count(), 1);
    let request = &provider.requests()[0];
    assert_eq!(request.model, "gpt-4o-mini");
    assert_eq!(request.tools, None);
    assert_eq!(request.tool_choice, None);
    assert_eq!(request.messages.len(), 2);
    assert_eq!(request.messages[0].role, Role::System);
    assert_eq!(request.messages[1].content, "Hi there");
}

#[tokio::test]
async fn tool_exchange_takes_exactly_two_calls() {
    let call = ToolCallRequest::function("call_1", "calculator", "{\"expression\":\"2+3\"}");
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response(vec![call]),
        text_response("The answer is 5."),
    ]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "You are a helpful assistant.").with_tool("calculator");

    let reply = orchestrator
        .run_turn(&agent, "What is 2+3?", &[])
        .await
        .expect("turn");

    assert_eq!(reply, "The answer is 5.");
    assert_eq!(provider.call_count(), 2);

    let requests = provider.requests();
    // Both calls advertise the same tool set under the declared identifier.
    for request in &requests {
        let tools = request.tools.as_ref().expect("tools");
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0]["function"]["name"], json!("calculator"));
        assert_eq!(request.tool_choice.as_deref(), Some("auto"));
    }

    // Second context: system, user, assistant tool-call turn, tool result.
    let second = &requests[1];
    assert_eq!(second.messages.len(), 4);
    let assistant = &second.messages[2];
    assert_eq!(assistant.role, Role::Assistant);
    let calls = assistant.tool_calls.as_ref().expect("calls");
    assert_eq!(calls[0].id, "call_1");
    assert_eq!(calls[0].function.name, "calculator");

    let tool_turn = &second.messages[3];
    assert_eq!(tool_turn.role, Role::Tool);
    assert_eq!(tool_turn.tool_call_id.as_deref(), Some("call_1"));
    let payload: Value = serde_json::from_str(&tool_turn.content).expect("tool content");
    assert_eq!(payload["expression"], json!("2+3"));
    assert_eq!(payload["result"], json!(5.0));
}

#[tokio::test]
async fn tool_results_preserve_request_order() {
    let calls = vec![
        ToolCallRequest::function("call_a", "Echo", "{}"),
        ToolCallRequest::function("call_b", "calculator", "{\"expression\":\"10/4\"}"),
        ToolCallRequest::function("call_c", "Echo", "{}"),
    ];
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response(calls),
        text_response("done"),
    ]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions")
        .with_tool("Echo")
        .with_tool("calculator");

    orchestrator.run_turn(&agent, "go", &[]).await.expect("turn");

    let second = &provider.requests()[1];
    let ids: Vec<_> = second.messages[3..]
        .iter()
        .map(|turn| turn.tool_call_id.as_deref().expect("call id"))
        .collect();
    assert_eq!(ids, vec!["call_a", "call_b", "call_c"]);
}

#[tokio::test]
async fn identical_inputs_replay_identically() {
    let script = || {
        vec![
            tool_call_response(vec![ToolCallRequest::function(
                "call_1",
                "calculator",
                "{\"expression\":\"2+3\"}",
            )]),
            text_response("The answer is 5."),
        ]
    };
    let agent = AgentProfile::new("helper", "instructions").with_tool("calculator");

    let first = Arc::new(ScriptedProvider::new(script()));
    let second = Arc::new(ScriptedProvider::new(script()));
    let reply_a = orchestrator_with(first.clone())
        .run_turn(&agent, "What is 2+3?", &[])
        .await
        .expect("turn");
    let reply_b = orchestrator_with(second.clone())
        .run_turn(&agent, "What is 2+3?", &[])
        .await
        .expect("turn");

    assert_eq!(reply_a, reply_b);
    assert_eq!(first.call_count(), second.call_count());
    assert_eq!(first.requests(), second.requests());
}

#[tokio::test]
async fn failed_tool_still_completes_the_turn() {
    let call = ToolCallRequest::function("call_1", "Broken", "{}");
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response(vec![call]),
        text_response("The tool was unavailable."),
    ]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions").with_tool("Broken");

    let reply = orchestrator.run_turn(&agent, "go", &[]).await.expect("turn");

    assert_eq!(reply, "The tool was unavailable.");
    let second = &provider.requests()[1];
    let payload: Value =
        serde_json::from_str(&second.messages[3].content).expect("tool content");
    assert_eq!(
        payload,
        json!({
            "success": false,
            "error": "execution failed: backend unavailable",
            "tool": "Broken",
        })
    );
}

#[tokio::test]
async fn invalid_arguments_yield_failed_result_in_context() {
    let calls = vec![
        ToolCallRequest::function("call_1", "Lookup", "{}"),
        ToolCallRequest::function("call_2", "Lookup", "{\"key\":\"answer\"}"),
    ];
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response(calls),
        text_response("done"),
    ]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions").with_tool("Lookup");

    orchestrator.run_turn(&agent, "go", &[]).await.expect("turn");

    let second = &provider.requests()[1];
    let rejected: Value =
        serde_json::from_str(&second.messages[3].content).expect("tool content");
    assert_eq!(
        rejected,
        json!({
            "success": false,
            "error": "invalid arguments: missing required parameter: key",
            "tool": "Lookup",
        })
    );
    let accepted: Value =
        serde_json::from_str(&second.messages[4].content).expect("tool content");
    assert_eq!(accepted, json!({ "value": 42 }));
}

#[tokio::test]
async fn unknown_tool_call_yields_failed_result() {
    // The model may call a tool that was never advertised.
    let call = ToolCallRequest::function("call_1", "nonexistent", "{}");
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response(vec![call]),
        text_response("I could not run that tool."),
    ]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions").with_tool("calculator");

    let reply = orchestrator.run_turn(&agent, "go", &[]).await.expect("turn");

    assert_eq!(reply, "I could not run that tool.");
    let second = &provider.requests()[1];
    let payload: Value =
        serde_json::from_str(&second.messages[3].content).expect("tool content");
    assert_eq!(payload["success"], json!(false));
    assert_eq!(payload["error"], json!("unknown tool: nonexistent"));
}

#[tokio::test]
async fn second_round_tool_requests_are_not_executed() {
    let first = ToolCallRequest::function("call_1", "calculator", "{\"expression\":\"1+1\"}");
    let second = ToolCallRequest::function("call_2", "calculator", "{\"expression\":\"2+2\"}");
    let mut final_response = text_response("Partial answer.");
    final_response.choices[0].message.tool_calls = Some(vec![second]);
    let provider = Arc::new(ScriptedProvider::new(vec![
        tool_call_response(vec![first]),
        final_response,
    ]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions").with_tool("calculator");

    let reply = orchestrator.run_turn(&agent, "go", &[]).await.expect("turn");

    // The exchange is capped at one round; no third provider call happens.
    assert_eq!(reply, "Partial answer.");
    assert_eq!(provider.call_count(), 2);
}

#[tokio::test]
async fn unresolvable_declared_tool_is_skipped_not_fatal() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_response("ok")]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions")
        .with_tool("calculator")
        .with_tool("gone");

    orchestrator.run_turn(&agent, "go", &[]).await.expect("turn");

    let tools = provider.requests()[0].tools.as_ref().expect("tools").clone();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["function"]["name"], json!("calculator"));
}

#[tokio::test]
async fn agent_model_override_reaches_the_wire() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_response("ok")]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions").with_model("gpt-4o");

    orchestrator.run_turn(&agent, "go", &[]).await.expect("turn");

    assert_eq!(provider.requests()[0].model, "gpt-4o");
}

#[tokio::test]
async fn history_is_windowed_and_system_rows_dropped() {
    let provider = Arc::new(ScriptedProvider::new(vec![text_response("ok")]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions");

    let mut history = Vec::new();
    for index in 0..12 {
        let role = if index % 2 == 0 { Role::User } else { Role::Assistant };
        history.push(StoredMessage::new(role, format!("m{index}")));
    }
    history.push(StoredMessage::new(Role::System, "stale"));

    orchestrator.run_turn(&agent, "latest", &history).await.expect("turn");

    let messages = &provider.requests()[0].messages;
    // System prompt + 9 windowed rows (the stale system row is dropped from
    // the trailing 10) + the new user message.
    assert_eq!(messages.len(), 11);
    assert_eq!(messages[1].content, "m4");
    assert!(messages.iter().all(|turn| turn.content != "stale"));
    assert_eq!(messages.last().expect("user").content, "latest");
}

#[tokio::test]
async fn provider_failure_aborts_the_turn() {
    let orchestrator = Orchestrator::new(
        config(),
        registry(),
        Arc::new(FailingProvider::new("Rate limit exceeded")),
    );
    let agent = AgentProfile::new("helper", "instructions");

    let err = orchestrator
        .run_turn(&agent, "go", &[])
        .await
        .expect_err("provider down");
    match err {
        CoreError::Provider(inner) => {
            assert!(inner.to_string().contains("Rate limit exceeded"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn empty_choices_is_a_turn_error() {
    let provider = Arc::new(ScriptedProvider::new(vec![empty_response()]));
    let orchestrator = orchestrator_with(provider);
    let agent = AgentProfile::new("helper", "instructions");

    let err = orchestrator
        .run_turn(&agent, "go", &[])
        .await
        .expect_err("no choices");
    assert!(matches!(err, CoreError::Turn(_)));
}

#[tokio::test]
async fn run_thread_persists_the_exchange() {
    let provider = Arc::new(ScriptedProvider::new(vec![
        text_response("First reply."),
        text_response("Second reply."),
    ]));
    let orchestrator = orchestrator_with(provider.clone());
    let agent = AgentProfile::new("helper", "instructions");
    let store = MemoryHistoryStore::new();
    let thread = Uuid::new_v4();

    let reply = orchestrator
        .run_thread(&store, &agent, thread, "first question")
        .await
        .expect("turn");
    assert_eq!(reply, "First reply.");

    let messages = store.read(thread).await.expect("read");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].role, Role::User);
    assert_eq!(messages[0].content, "first question");
    assert_eq!(messages[1].role, Role::Assistant);
    assert_eq!(messages[1].content, "First reply.");

    // The second turn sees the persisted exchange in its context.
    orchestrator
        .run_thread(&store, &agent, thread, "second question")
        .await
        .expect("turn");
    let second_context = &provider.requests()[1].messages;
    assert_eq!(second_context.len(), 4);
    assert_eq!(second_context[1].content, "first question");
    assert_eq!(second_context[2].content, "First reply.");
}
