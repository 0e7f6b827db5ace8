use std::path::PathBuf;

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub api_base_url: String,
    pub api_key: String,
    pub user_agent: String,
    pub request_timeout_secs: u64,
    pub max_concurrent_pages: usize,
    /// Budget for one run's whole paginated fetch. `None` disables it.
    pub fetch_deadline_secs: Option<u64>,
    pub run_pause_ms: u64,
    pub export_dir: PathBuf,
    pub accept_invalid_certs: bool,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("api_base_url", &self.api_base_url)
            .field("api_key", &"[redacted]")
            .field("user_agent", &self.user_agent)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_concurrent_pages", &self.max_concurrent_pages)
            .field("fetch_deadline_secs", &self.fetch_deadline_secs)
            .field("run_pause_ms", &self.run_pause_ms)
            .field("export_dir", &self.export_dir)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .finish()
    }
}
