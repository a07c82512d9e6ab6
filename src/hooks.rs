//! Lifecycle hook registration.
//!
//! A plugin announces the capabilities it provides by returning a set of
//! named hook registrations from initialization. An empty set means the
//! plugin is inactive: the host proceeds as if it were never installed.

use std::collections::HashMap;

use crate::error::GuardError;
use crate::host::{ToolExecuteInput, ToolExecuteOutput};

/// Lifecycle events a plugin can attach a handler to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookEvent {
    /// Fires before a tool call executes. A handler error vetoes the call.
    ToolExecuteBefore,
}

impl HookEvent {
    /// The event name as the host spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            HookEvent::ToolExecuteBefore => "tool.execute.before",
        }
    }
}

/// Handler for the pre-execution event.
pub trait ExecutionHook: Send + Sync {
    /// Inspect a pending tool call. Returning an error vetoes the execution;
    /// the host surfaces the error to the user instead of running the tool.
    fn before_execute(
        &self,
        input: &ToolExecuteInput,
        output: &ToolExecuteOutput,
    ) -> Result<(), GuardError>;
}

/// Hook registrations returned by a plugin at initialization, keyed by event.
#[derive(Default)]
pub struct HookSet {
    hooks: HashMap<HookEvent, Box<dyn ExecutionHook>>,
}

impl HookSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a handler to an event, replacing any previous registration.
    pub fn register(&mut self, event: HookEvent, hook: Box<dyn ExecutionHook>) {
        self.hooks.insert(event, hook);
    }

    pub fn contains(&self, event: HookEvent) -> bool {
        self.hooks.contains_key(&event)
    }

    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Run the pre-execution handler for a pending tool call.
    /// With no handler registered the call passes unimpeded.
    pub fn dispatch_before_execute(
        &self,
        input: &ToolExecuteInput,
        output: &ToolExecuteOutput,
    ) -> Result<(), GuardError> {
        match self.hooks.get(&HookEvent::ToolExecuteBefore) {
            Some(hook) => hook.before_execute(input, output),
            None => Ok(()),
        }
    }
}
