// Adapters layer: concrete implementations for external systems
// (the web application REST API and the ConfigMerge tool).

pub mod command;
pub mod http;
