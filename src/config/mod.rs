pub mod settings;

pub use settings::{AppConfig, DatasetSettings, RankingConfig};
