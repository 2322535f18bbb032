//! Echo tool, echo LLM and the agent that ties them together.

use agora_core::{
    Agent, AgentContext, AgentId, AgentMessage, AgentObservation, AgentResult, AgentStepOutput,
    LlmClient, LlmError, LlmMessage, LlmResult, Tool, ToolError, ToolInvocation, ToolResponse,
    ToolResult, to_payload,
};
use serde_json::{Value, json};
use tracing::debug;

pub const ECHO_TOOL: &str = "echo";

/// `echo`: returns its `text` argument, upper-cased.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoTool;

impl Tool for EchoTool {
    fn name(&self) -> &str {
        ECHO_TOOL
    }

    fn description(&self) -> &str {
        "Echoes the 'text' argument back in upper case"
    }

    fn prototype(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"text": {"type": "string"}},
            "required": ["text"]
        })
    }

    fn response_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {"echo": {"type": "string"}}
        })
    }

    fn invoke(&self, invocation: &ToolInvocation) -> ToolResult<ToolResponse> {
        let text = invocation
            .argument("text")
            .and_then(Value::as_str)
            .ok_or_else(|| ToolError::invalid_arguments(self.name(), "missing 'text'"))?;
        Ok(ToolResponse::success(
            self.name(),
            to_payload(json!({"echo": text.to_uppercase()})),
        ))
    }
}

/// Language model stand-in that repeats the prompt.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoLlmClient;

impl LlmClient for EchoLlmClient {
    fn complete(&self, prompt: &str) -> Result<LlmResult, LlmError> {
        Ok(LlmResult::new(format!("Echo: {prompt}")))
    }

    fn chat(&self, messages: &[LlmMessage]) -> Result<LlmResult, LlmError> {
        let last = messages
            .last()
            .ok_or_else(|| LlmError::InvalidResponse("nothing to echo".to_string()))?;
        self.complete(&last.content)
    }
}

/// Agent that asks the LLM about what it last saw, echoes the answer
/// through the `echo` tool and tells its peers.
#[derive(Debug)]
pub struct EchoAgent {
    id: AgentId,
    llm: EchoLlmClient,
    can_echo: bool,
    conversation: Vec<LlmMessage>,
    last_echo: Option<String>,
    heard: usize,
}

impl EchoAgent {
    pub fn new(id: AgentId) -> Self {
        Self {
            id,
            llm: EchoLlmClient,
            can_echo: false,
            conversation: Vec::new(),
            last_echo: None,
            heard: 0,
        }
    }
}

impl Agent for EchoAgent {
    fn id(&self) -> &AgentId {
        &self.id
    }

    fn attach_context(&mut self, context: AgentContext) {
        self.can_echo = context.has_tool(ECHO_TOOL);
        debug!(
            agent = %self.id,
            can_echo = self.can_echo,
            mode = %context.tool_execution_mode,
            "Context attached"
        );
    }

    fn handle_observation(&mut self, observation: &AgentObservation) {
        let step = observation.get("step").and_then(Value::as_u64).unwrap_or(0);
        self.conversation
            .push(LlmMessage::user(format!("step {step}, heard {} messages", self.heard)));
    }

    fn handle_message(&mut self, _message: &AgentMessage) {
        self.heard += 1;
    }

    fn handle_tool_result(&mut self, response: &ToolResponse) {
        self.last_echo = response
            .output
            .get("echo")
            .and_then(Value::as_str)
            .map(str::to_string);
    }

    fn reset(&mut self) {
        self.conversation.clear();
        self.last_echo = None;
        self.heard = 0;
    }

    fn step(&mut self) -> AgentResult<AgentStepOutput> {
        // nothing observed yet, e.g. registered mid-episode
        if self.conversation.is_empty() {
            return Ok(AgentStepOutput::empty());
        }

        let reply = self.llm.chat(&self.conversation)?;
        let reply = LlmMessage::assistant(reply.text);
        self.conversation.push(reply.clone());

        let mut output = AgentStepOutput::empty()
            .with_environment_actions(to_payload(json!({
                "say": reply.content,
                "last_echo": self.last_echo,
            })))
            .with_message(AgentMessage::broadcast(
                self.id.clone(),
                format!("{} says hi", self.id),
            ))
            .with_response(reply.clone());

        if self.can_echo {
            output = output.with_tool_invocation(ToolInvocation::new(
                ECHO_TOOL,
                to_payload(json!({"text": reply.content})),
            ));
        }
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_tool_upper_cases_text() {
        let call = ToolInvocation::new(ECHO_TOOL, to_payload(json!({"text": "hi"})));
        let response = EchoTool.invoke(&call).unwrap();
        assert_eq!(response.output["echo"], json!("HI"));

        let bad = ToolInvocation::new(ECHO_TOOL, to_payload(json!({})));
        assert!(matches!(
            EchoTool.invoke(&bad),
            Err(ToolError::InvalidArguments { .. })
        ));
    }

    #[test]
    fn echo_agent_steps_quietly_before_first_observation() {
        let mut agent = EchoAgent::new(AgentId::parse("echo-1").unwrap());
        assert_eq!(agent.step().unwrap(), AgentStepOutput::empty());

        let observation = AgentObservation::new("loopback", to_payload(json!({"step": 0})));
        agent.handle_observation(&observation);
        let output = agent.step().unwrap();
        assert_eq!(output.responses[0].content, "Echo: step 0, heard 0 messages");
        assert!(output.tool_invocations.is_empty());
        assert_eq!(output.broadcast_messages.len(), 1);
    }
}
