//! Turn orchestration: context assembly, tool advertisement, and the
//! tool-exchange round trip.

use crate::agent::AgentProfile;
use crate::error::CoreError;
use crate::history::{HistoryStore, StoredMessage, ThreadId};
use colloquy_config::ColloquyConfig;
use colloquy_protocol::{ChatTurn, Role};
use colloquy_provider::{CompletionProvider, CompletionRequest};
use colloquy_tools::{ToolExecutor, ToolRegistry, advertised_schema, schema_is_well_formed};
use log::{debug, info, warn};
use serde_json::Value;
use std::sync::Arc;

/// Drives one conversational turn against a completion provider.
///
/// A turn is at most two provider calls: the first may request tool calls,
/// which are executed locally and fed back in a second call. The second
/// response is final; further tool requests in it are not executed.
pub struct Orchestrator {
    config: ColloquyConfig,
    registry: Arc<ToolRegistry>,
    executor: ToolExecutor,
    provider: Arc<dyn CompletionProvider>,
}

impl Orchestrator {
    /// Create an orchestrator over a populated registry and provider client.
    pub fn new(
        config: ColloquyConfig,
        registry: Arc<ToolRegistry>,
        provider: Arc<dyn CompletionProvider>,
    ) -> Self {
        let executor = ToolExecutor::new(registry.clone());
        Self {
            config,
            registry,
            executor,
            provider,
        }
    }

    /// The registry backing this orchestrator.
    pub fn registry(&self) -> &Arc<ToolRegistry> {
        &self.registry
    }

    /// Run one turn for an agent against prior history.
    ///
    /// `history` is the full stored thread; only the most recent window of
    /// non-system messages enters the context. Tool failures never abort the
    /// turn; provider failures do.
    pub async fn run_turn(
        &self,
        agent: &AgentProfile,
        user_message: &str,
        history: &[StoredMessage],
    ) -> Result<String, CoreError> {
        let tools = self.advertise_tools(agent);
        info!(
            "starting turn (agent={}, history={}, tools={})",
            agent.id,
            history.len(),
            tools.len()
        );

        let mut context = self.build_context(agent, user_message, history);
        let request = self.build_request(agent, context.clone(), &tools);
        let response = self.provider.complete(&request).await?;
        let message = response
            .primary_message()
            .ok_or_else(|| CoreError::Turn("provider returned no choices".to_string()))?;

        let calls = message.tool_calls().to_vec();
        if calls.is_empty() {
            let reply = message.text();
            info!(
                "completed turn (agent={}, provider_calls=1, reply_len={})",
                agent.id,
                reply.len()
            );
            return Ok(reply);
        }

        info!("executing tool calls (agent={}, count={})", agent.id, calls.len());
        let mut results = Vec::with_capacity(calls.len());
        for call in &calls {
            results.push(self.executor.execute(call).await);
        }

        // The assistant turn is appended verbatim, then one tool turn per
        // call in request order.
        context.push(message.to_turn());
        for result in &results {
            context.push(ChatTurn::tool(result.call_id.clone(), result.to_content()));
        }

        let final_request = self.build_request(agent, context, &tools);
        let final_response = self.provider.complete(&final_request).await?;
        let final_message = final_response
            .primary_message()
            .ok_or_else(|| CoreError::Turn("provider returned no choices".to_string()))?;
        if !final_message.tool_calls().is_empty() {
            debug!(
                "ignoring tool calls past the exchange round (agent={}, count={})",
                agent.id,
                final_message.tool_calls().len()
            );
        }

        let reply = final_message.text();
        info!(
            "completed turn (agent={}, provider_calls=2, reply_len={})",
            agent.id,
            reply.len()
        );
        Ok(reply)
    }

    /// Run one turn against a stored thread, persisting the exchange.
    ///
    /// The user message and the assistant reply are appended as separate
    /// writes after the turn succeeds.
    pub async fn run_thread(
        &self,
        store: &dyn HistoryStore,
        agent: &AgentProfile,
        thread: ThreadId,
        user_message: &str,
    ) -> Result<String, CoreError> {
        let history = store.read(thread).await?;
        let reply = self.run_turn(agent, user_message, &history).await?;
        store
            .append(thread, StoredMessage::new(Role::User, user_message))
            .await?;
        store
            .append(thread, StoredMessage::new(Role::Assistant, reply.clone()))
            .await?;
        Ok(reply)
    }

    /// Build the advertised tool schemas for an agent.
    ///
    /// Identifiers that do not resolve, or whose schemas fail the structural
    /// sanity check, are skipped with a warning rather than failing the turn.
    fn advertise_tools(&self, agent: &AgentProfile) -> Vec<Value> {
        let mut advertised = Vec::with_capacity(agent.tools.len());
        for identifier in &agent.tools {
            let tool = match self.registry.resolve(identifier) {
                Ok(tool) => tool,
                Err(err) => {
                    warn!(
                        "skipping unresolvable tool (agent={}, tool={}): {}",
                        agent.id, identifier, err
                    );
                    continue;
                }
            };
            let schema = advertised_schema(identifier, tool.description(), &tool.schema());
            if !schema_is_well_formed(&schema) {
                warn!(
                    "skipping malformed tool schema (agent={}, tool={})",
                    agent.id, identifier
                );
                continue;
            }
            advertised.push(schema);
        }
        advertised
    }

    /// Assemble the context for the first provider call.
    ///
    /// System instructions first, then the trailing window of history with
    /// system rows dropped, then the new user message.
    fn build_context(
        &self,
        agent: &AgentProfile,
        user_message: &str,
        history: &[StoredMessage],
    ) -> Vec<ChatTurn> {
        let window = self.config.orchestrator.history_window;
        let start = history.len().saturating_sub(window);

        let mut context = vec![ChatTurn::system(&agent.instructions)];
        for message in &history[start..] {
            if message.role == Role::System {
                continue;
            }
            context.push(message.to_turn());
        }
        context.push(ChatTurn::user(user_message));
        context
    }

    /// Build a completion request; both calls of a turn use the same tool
    /// configuration.
    fn build_request(
        &self,
        agent: &AgentProfile,
        messages: Vec<ChatTurn>,
        tools: &[Value],
    ) -> CompletionRequest {
        let provider = &self.config.provider;
        CompletionRequest {
            model: agent.effective_model(&provider.model).to_string(),
            messages,
            max_tokens: provider.max_tokens,
            temperature: provider.temperature,
            tools: if tools.is_empty() {
                None
            } else {
                Some(tools.to_vec())
            },
            tool_choice: if tools.is_empty() {
                None
            } else {
                Some("auto".to_string())
            },
        }
    }
}
