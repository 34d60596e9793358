// qualitas-core/src/infrastructure/config/mod.rs

pub mod quality;

pub use quality::{
    CONFIG_CANDIDATES, SENTINEL_ENV, discover_quality_config, find_config, load_quality_config,
};
