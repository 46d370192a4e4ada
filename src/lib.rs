// KidTube - Library Entry Point

pub mod constants;
pub mod error;
pub mod config;
pub mod db;
pub mod hash;
pub mod media;
pub mod store;
pub mod commands;

pub use config::AppConfig;
pub use db::schema::{NewVideo, VideoRecord};
pub use error::{KidTubeError, Result};
pub use store::CatalogStore;
