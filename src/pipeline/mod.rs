pub mod orchestrator;
pub mod scanner;
