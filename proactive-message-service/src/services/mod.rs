pub mod gateway;
pub mod providers;

pub use gateway::ProactiveMessageService;
