//! Retail Assistant - electronics store chat backed by a hosted LLM
//!
//! Customer messages are forwarded to the completion service together with
//! the product catalog and recent conversation, and the reply is returned.

pub mod agent;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod llm;
pub mod prompt;
pub mod shell;
