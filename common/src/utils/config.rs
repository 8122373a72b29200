use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Clone, Deserialize, Debug)]
pub struct AppConfig {
    #[serde(default = "default_http_port")]
    pub http_port: u16,
    #[serde(default = "default_reddit_search_url")]
    pub reddit_search_url: String,
    /// Longest edge, in pixels, of the thumbnails shown next to each result.
    #[serde(default = "default_thumbnail_size")]
    pub thumbnail_size: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_http_port() -> u16 {
    8080
}

fn default_reddit_search_url() -> String {
    "https://www.reddit.com/search.json".to_string()
}

fn default_thumbnail_size() -> u32 {
    70
}

fn default_user_agent() -> String {
    format!("photosearch/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            http_port: default_http_port(),
            reddit_search_url: default_reddit_search_url(),
            thumbnail_size: default_thumbnail_size(),
            user_agent: default_user_agent(),
        }
    }
}

pub fn get_config() -> Result<AppConfig, ConfigError> {
    let config = Config::builder()
        .add_source(File::with_name("config").required(false))
        .add_source(Environment::default())
        .build()?;

    config.try_deserialize()
}
