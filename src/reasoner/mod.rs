pub mod extract;
pub mod orchestrator;
pub mod prompts;
pub mod selector;
pub mod synthesizer;
