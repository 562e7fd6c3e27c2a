//! # Arena Tactics
//!
//! Turn-based two-team RPG combat where each character is driven by a
//! pluggable player: console input, a rule-based policy, or an LLM behind an
//! OpenAI-compatible chat endpoint.
//!
//! Players return [`engine::command::GameCommand`]s; the
//! [`engine::controller::GameController`] runs them through a
//! [`engine::invoker::CommandInvoker`] so every action can be undone.

pub mod console;
pub mod engine;
pub mod model;
