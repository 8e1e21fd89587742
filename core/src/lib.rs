//! caseflow-core: deterministic risk cases and the desk state that shows them.

pub mod case_builder;
pub mod case_store;
pub mod command;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod name_generator;
pub mod snapshot;
pub mod source;
pub mod types;
