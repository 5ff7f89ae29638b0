use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Recommendations returned when the request has no `limit`
    #[serde(default = "default_recommendation_limit")]
    pub default_recommendation_limit: usize,

    /// Look-back window for trending blogs, in days
    #[serde(default = "default_trending_window_days")]
    pub trending_window_days: u32,

    /// Trending blogs returned when the request has no `limit`
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,

    /// Related blogs returned by the recommendations endpoint when the request has no `limit`
    #[serde(default = "default_related_limit")]
    pub related_limit: usize,

    /// Fixed number of related blogs shown next to a blog
    #[serde(default = "default_blog_related_count")]
    pub blog_related_count: usize,

    /// Blogs per listing page when the request has no `limit`
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_recommendation_limit() -> usize {
    10
}

fn default_trending_window_days() -> u32 {
    7
}

fn default_trending_limit() -> usize {
    10
}

fn default_related_limit() -> usize {
    5
}

fn default_blog_related_count() -> usize {
    3
}

fn default_page_size() -> usize {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            default_recommendation_limit: default_recommendation_limit(),
            trending_window_days: default_trending_window_days(),
            trending_limit: default_trending_limit(),
            related_limit: default_related_limit(),
            blog_related_count: default_blog_related_count(),
            page_size: default_page_size(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }

    /// Socket address the server binds to
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
