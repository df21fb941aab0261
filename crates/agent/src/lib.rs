//! The orchestration loop — the heart of AuthProof.
//!
//! Each run follows a **call → dispatch → observe** cycle:
//!
//! 1. **Receive** a user message and append it to the conversation
//! 2. **Send to the model** via the configured provider, with all tool specs
//! 3. **If tool calls**: emit `tool_call` events, execute the tools in order,
//!    append the results, loop back to step 2
//! 4. **If a final answer**: emit `assistant_message` and `complete`, return
//!
//! The loop terminates when the model answers with text only, when the
//! provider fails, or when the round bound is reached. Every run ends in
//! exactly one of those three outcomes — there is no unbounded path.
//!
//! All streaming output flows through an [`EventSink`]; the loop itself never
//! touches a transport or a store.

pub mod event;
pub mod prompt;
pub mod runner;
pub mod sink;

pub use event::AgentEvent;
pub use prompt::DEFAULT_SYSTEM_PROMPT;
pub use runner::{AgentRunner, RunOutcome};
pub use sink::{ChannelSink, CollectingSink, EventSink, PersistingSink};
