// Career advisor chat: a tool-calling loop over the career catalog.

pub mod handlers;
pub mod prompts;
pub mod service;
pub mod tools;
