pub mod config;
pub mod download;
pub mod init;

pub use config::AppConfig;
pub use download::{BackgroundDownloader, BackgroundImage};
pub use init::init;
