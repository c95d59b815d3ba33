pub mod configs;
pub mod gateway;
pub mod logger;
pub mod transformers;

pub use gateway::Gateway;
