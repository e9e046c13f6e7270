use serde::{Deserialize, Serialize};

use self::batch::BatchConfig;
use self::enrich::EnrichConfig;
use self::store::StoreConfig;

pub mod batch;
pub mod enrich;
pub mod store;

#[derive(Serialize, Deserialize)]
pub struct Config {
    pub enrich: EnrichConfig,
    pub store: StoreConfig,
    pub batch: BatchConfig,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            enrich: EnrichConfig::from_env(),
            store: StoreConfig::from_env(),
            batch: BatchConfig::from_env(),
        }
    }
}
