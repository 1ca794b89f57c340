// HTTP Server modules
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod relay;
pub mod routes;
pub mod upload;

// Message store
pub mod store;

// LLM client layer
pub mod llm;

// Agent proxy client
pub mod agent;
