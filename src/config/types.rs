use serde::Deserialize;

/// Default documentation root the manifest paths are appended to
pub const DEFAULT_BASE_URL: &str = "https://docs.oracle.com/javase/7/docs/api/";

/// Main configuration structure for Javadoc-Harvest
///
/// Every section is optional in the TOML file; missing keys take the
/// defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Documentation root; manifest path fragments are appended to it
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Number of packages crawled at once
    #[serde(rename = "package-concurrency")]
    pub package_concurrency: usize,

    /// Upper bound on class pages fetched at once within one package
    #[serde(rename = "class-concurrency")]
    pub class_concurrency: usize,

    /// Transport timeout for a single request (seconds)
    #[serde(rename = "request-timeout")]
    pub request_timeout: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            package_concurrency: 8,
            class_concurrency: 32,
            request_timeout: 30,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "javadoc-harvest".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.crawler_name, self.crawler_version)
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// JSON package manifest (package name -> index page path)
    #[serde(rename = "manifest-path")]
    pub manifest_path: String,

    /// Line-delimited list of packages to retry on the next run
    #[serde(rename = "retry-path")]
    pub retry_path: String,

    /// Directory receiving one XML record per package
    #[serde(rename = "docs-dir")]
    pub docs_dir: String,

    /// Directory receiving one failure log per package
    #[serde(rename = "logs-dir")]
    pub logs_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            manifest_path: "pkg_list.json".to_string(),
            retry_path: "pkg_retry".to_string(),
            docs_dir: "docs".to_string(),
            logs_dir: "logs".to_string(),
        }
    }
}
