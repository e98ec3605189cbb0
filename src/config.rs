use std::env;

pub const DEFAULT_REGION: &str = "us-east-1";
pub const DEFAULT_BUCKET: &str = "kevin-policy-bucket";

#[derive(Debug, Clone)]
pub struct Config {
    pub storage: StorageConfig,
}

#[derive(Clone)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub session_token: Option<String>,
    pub endpoint: Option<String>,
}

// Keeps secrets out of the startup log line.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id.as_ref().map(|_| "<set>"))
            .field("secret_access_key", &self.secret_access_key.as_ref().map(|_| "<set>"))
            .field("session_token", &self.session_token.as_ref().map(|_| "<set>"))
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

impl StorageConfig {
    /// True when both halves of a static key pair are present.
    pub fn has_static_credentials(&self) -> bool {
        self.access_key_id.is_some() && self.secret_access_key.is_some()
    }
}

impl Config {
    /// Load configuration from the process environment, reading `.env` first.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup.
    ///
    /// `REGION_NAME` and `BUCKET_NAME` are accepted as fallbacks because the
    /// web backend that spawns this binary exports its settings under those
    /// names.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let first = |names: &[&str]| {
            names
                .iter()
                .filter_map(|name| lookup(*name))
                .map(|value| value.trim().to_string())
                .find(|value| !value.is_empty())
        };

        Self {
            storage: StorageConfig {
                bucket: first(&["S3_BUCKET_NAME", "BUCKET_NAME"])
                    .unwrap_or_else(|| DEFAULT_BUCKET.to_string()),
                region: first(&["AWS_REGION", "REGION_NAME"])
                    .unwrap_or_else(|| DEFAULT_REGION.to_string()),
                access_key_id: first(&["AWS_ACCESS_KEY_ID"]),
                secret_access_key: first(&["AWS_SECRET_ACCESS_KEY"]),
                session_token: first(&["AWS_SESSION_TOKEN"]),
                endpoint: first(&["S3_ENDPOINT"]),
            },
        }
    }
}
