//! Registered agents in registration order.

use agora_core::{Agent, AgentHooks, AgentId, AgentMessage, AgentObservation, ToolResponse};

/// An agent plus what the network learned about it at registration.
pub(crate) struct Member {
    pub(crate) id: AgentId,
    pub(crate) hooks: AgentHooks,
    /// Asked to stop stepping for the rest of the episode
    pub(crate) retired: bool,
    pub(crate) agent: Box<dyn Agent>,
}

impl Member {
    pub(crate) fn new(agent: Box<dyn Agent>) -> Self {
        Self {
            id: agent.id().clone(),
            hooks: agent.hooks(),
            retired: false,
            agent,
        }
    }

    /// Deliver a message if the agent declared the hook.
    pub(crate) fn deliver_message(&mut self, message: &AgentMessage) -> bool {
        if self.hooks.messages {
            self.agent.handle_message(message);
        }
        self.hooks.messages
    }

    /// Deliver a tool response if the agent declared the hook.
    pub(crate) fn deliver_tool_result(&mut self, response: &ToolResponse) -> bool {
        if self.hooks.tool_results {
            self.agent.handle_tool_result(response);
        }
        self.hooks.tool_results
    }

    pub(crate) fn deliver_observation(&mut self, observation: &AgentObservation) {
        self.agent.handle_observation(observation);
    }
}

#[derive(Default)]
pub(crate) struct Roster {
    members: Vec<Member>,
}

impl Roster {
    pub(crate) fn contains(&self, id: &AgentId) -> bool {
        self.position(id).is_some()
    }

    pub(crate) fn ids(&self) -> Vec<AgentId> {
        self.members.iter().map(|member| member.id.clone()).collect()
    }

    /// Roster as it would look with `id` appended.
    pub(crate) fn ids_with(&self, id: &AgentId) -> Vec<AgentId> {
        let mut ids = self.ids();
        ids.push(id.clone());
        ids
    }

    /// Roster as it would look with `id` removed.
    pub(crate) fn ids_without(&self, id: &AgentId) -> Vec<AgentId> {
        self.members
            .iter()
            .filter(|member| &member.id != id)
            .map(|member| member.id.clone())
            .collect()
    }

    pub(crate) fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    pub(crate) fn remove(&mut self, id: &AgentId) -> Option<Member> {
        self.position(id).map(|index| self.members.remove(index))
    }

    pub(crate) fn get_mut(&mut self, id: &AgentId) -> Option<&mut Member> {
        self.members.iter_mut().find(|member| &member.id == id)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Member> {
        self.members.iter()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut Member> {
        self.members.iter_mut()
    }

    pub(crate) fn len(&self) -> usize {
        self.members.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Whether every member has retired. False for an empty roster.
    pub(crate) fn all_retired(&self) -> bool {
        !self.members.is_empty() && self.members.iter().all(|member| member.retired)
    }

    fn position(&self, id: &AgentId) -> Option<usize> {
        self.members.iter().position(|member| &member.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::{AgentResult, AgentStepOutput};

    struct Silent {
        id: AgentId,
        hooks: AgentHooks,
        messages: usize,
    }

    impl Agent for Silent {
        fn id(&self) -> &AgentId {
            &self.id
        }

        fn handle_observation(&mut self, _observation: &AgentObservation) {}

        fn step(&mut self) -> AgentResult<AgentStepOutput> {
            Ok(AgentStepOutput::empty())
        }

        fn hooks(&self) -> AgentHooks {
            self.hooks
        }

        fn handle_message(&mut self, _message: &AgentMessage) {
            self.messages += 1;
        }
    }

    fn member(name: &str, hooks: AgentHooks) -> Member {
        Member::new(Box::new(Silent {
            id: AgentId::parse(name).unwrap(),
            hooks,
            messages: 0,
        }))
    }

    #[test]
    fn test_roster_keeps_registration_order() {
        let mut roster = Roster::default();
        roster.push(member("b", AgentHooks::ALL));
        roster.push(member("a", AgentHooks::ALL));
        roster.push(member("c", AgentHooks::ALL));

        let a = AgentId::parse("a").unwrap();
        let names: Vec<_> = roster.ids_without(&a).into_iter().map(String::from).collect();
        assert_eq!(names, ["b", "c"]);

        assert!(roster.remove(&a).is_some());
        assert!(roster.remove(&a).is_none());
        assert_eq!(roster.len(), 2);
    }

    #[test]
    fn test_undeclared_hooks_are_not_called() {
        let sender = AgentId::parse("sender").unwrap();
        let message = AgentMessage::broadcast(sender, "hi");

        let mut deaf = member("deaf", AgentHooks::NONE);
        assert!(!deaf.deliver_message(&message));

        let mut listener = member("listener", AgentHooks::ALL);
        assert!(listener.deliver_message(&message));
    }

    #[test]
    fn test_all_retired() {
        let mut roster = Roster::default();
        assert!(!roster.all_retired());

        roster.push(member("a", AgentHooks::ALL));
        assert!(!roster.all_retired());
        for member in roster.iter_mut() {
            member.retired = true;
        }
        assert!(roster.all_retired());
    }
}
