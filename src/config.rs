use std::env;

pub const DEFAULT_EMBEDDING_ENDPOINT: &str = "http://localhost:18115";
pub const DEFAULT_INDEX_NAMESPACE: &str = "default";

/// Endpoints and credentials for the external collaborators.
///
/// Built exactly once at process start and passed by reference to whatever
/// needs it. The chunking core never sees this; it is configured per call
/// through `SplitConfig`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub embedding_endpoint: String,
    pub embedding_api_key: Option<String>,
    pub index_endpoint: Option<String>,
    pub index_api_key: Option<String>,
    pub index_namespace: String,
}

impl AppConfig {
    /// Read the environment once. Missing remote settings are not an error
    /// here; they only matter if a remote sink is selected.
    pub fn from_env() -> Self {
        Self {
            embedding_endpoint: env::var("EMBEDDING_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_EMBEDDING_ENDPOINT.to_string()),
            embedding_api_key: env::var("EMBEDDING_API_KEY").ok(),
            index_endpoint: env::var("VECTOR_INDEX_ENDPOINT").ok(),
            index_api_key: env::var("VECTOR_INDEX_API_KEY").ok(),
            index_namespace: env::var("VECTOR_INDEX_NAMESPACE")
                .unwrap_or_else(|_| DEFAULT_INDEX_NAMESPACE.to_string()),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            embedding_endpoint: DEFAULT_EMBEDDING_ENDPOINT.to_string(),
            embedding_api_key: None,
            index_endpoint: None,
            index_api_key: None,
            index_namespace: DEFAULT_INDEX_NAMESPACE.to_string(),
        }
    }
}
