pub mod command;
pub mod controller;
pub mod invoker;
pub mod protocol;

pub mod player;
pub mod prompt_builder;
pub mod llm_client;
pub mod settings_io;
pub mod setup;
