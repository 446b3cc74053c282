pub mod traits;
pub mod evolution;
pub mod grammar;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::EvolutionConfig;
pub use grammar::GrammarConfig;
pub use traits::ConfigSection;
