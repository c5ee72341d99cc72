//! Secret storage contracts and the API key lookup built on top of them.

use log::{error, warn};
use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::Result;

/// Secret id holding the Fixer credential
pub const FIXER_SECRET_ID: &str = "fixer-api-key-dev";

/// Field of the secret's JSON object that carries the key
pub const FIXER_SECRET_FIELD: &str = "fixer_api_key";

const SERVICE_PREFIX: &str = "cambio";

/// Namespaces a service name the way every secret store keys its entries.
pub fn format_service_id(service: &str) -> String {
    format!("{}_{}", SERVICE_PREFIX, service.trim().to_lowercase())
}

/// Key/value store for credentials.
pub trait SecretStore: Send + Sync {
    fn set_secret(&self, service: &str, secret: &str) -> Result<()>;
    fn get_secret(&self, service: &str) -> Result<Option<String>>;
    fn delete_secret(&self, service: &str) -> Result<()>;
}

/// Supplies the upstream API key.
///
/// An empty string means the key is absent or could not be read; the
/// failure has already been logged by the implementation.
pub trait SecretProvider: Send + Sync {
    fn get_api_key(&self) -> String;
}

/// Reads the API key from a JSON object stored in a [`SecretStore`].
///
/// The secret value is expected to look like `{"fixer_api_key": "..."}`.
pub struct StoredApiKeyProvider {
    store: Arc<dyn SecretStore>,
    secret_id: String,
    field: String,
}

impl StoredApiKeyProvider {
    pub fn new(store: Arc<dyn SecretStore>, secret_id: impl Into<String>) -> Self {
        Self {
            store,
            secret_id: secret_id.into(),
            field: FIXER_SECRET_FIELD.to_string(),
        }
    }

    #[cfg(test)]
    fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Writes `api_key` into the store in the shape [`get_api_key`](SecretProvider::get_api_key) reads.
    pub fn store_api_key(&self, api_key: &str) -> Result<()> {
        let mut payload = HashMap::new();
        payload.insert(self.field.clone(), api_key.to_string());
        let serialized = serde_json::to_string(&payload)?;
        self.store.set_secret(&self.secret_id, &serialized)
    }
}

impl SecretProvider for StoredApiKeyProvider {
    fn get_api_key(&self) -> String {
        let raw = match self.store.get_secret(&self.secret_id) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                warn!("Secret '{}' is not set", self.secret_id);
                return String::new();
            }
            Err(e) => {
                error!("Failed to read secret '{}': {}", self.secret_id, e);
                return String::new();
            }
        };

        let parsed: HashMap<String, String> = match serde_json::from_str(&raw) {
            Ok(parsed) => parsed,
            Err(e) => {
                error!("Failed to parse secret '{}' as JSON: {}", self.secret_id, e);
                return String::new();
            }
        };

        match parsed.get(&self.field) {
            Some(key) => key.clone(),
            None => {
                warn!(
                    "Secret '{}' has no '{}' field",
                    self.secret_id, self.field
                );
                String::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::Error;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MemorySecretStore {
        secrets: Mutex<HashMap<String, String>>,
        fail: bool,
    }

    impl SecretStore for MemorySecretStore {
        fn set_secret(&self, service: &str, secret: &str) -> Result<()> {
            self.secrets
                .lock()
                .unwrap()
                .insert(format_service_id(service), secret.to_string());
            Ok(())
        }

        fn get_secret(&self, service: &str) -> Result<Option<String>> {
            if self.fail {
                return Err(Error::Secret("store offline".into()));
            }
            Ok(self
                .secrets
                .lock()
                .unwrap()
                .get(&format_service_id(service))
                .cloned())
        }

        fn delete_secret(&self, service: &str) -> Result<()> {
            self.secrets
                .lock()
                .unwrap()
                .remove(&format_service_id(service));
            Ok(())
        }
    }

    #[test]
    fn test_format_service_id() {
        assert_eq!(format_service_id(" Fixer-API-Key "), "cambio_fixer-api-key");
    }

    #[test]
    fn test_reads_key_written_by_store_api_key() {
        let store = Arc::new(MemorySecretStore::default());
        let provider = StoredApiKeyProvider::new(store.clone(), FIXER_SECRET_ID);

        provider.store_api_key("abc123").unwrap();
        assert_eq!(provider.get_api_key(), "abc123");
    }

    #[test]
    fn test_missing_secret_yields_empty_key() {
        let store = Arc::new(MemorySecretStore::default());
        let provider = StoredApiKeyProvider::new(store, FIXER_SECRET_ID);
        assert_eq!(provider.get_api_key(), "");
    }

    #[test]
    fn test_store_error_yields_empty_key() {
        let store = Arc::new(MemorySecretStore {
            fail: true,
            ..Default::default()
        });
        let provider = StoredApiKeyProvider::new(store, FIXER_SECRET_ID);
        assert_eq!(provider.get_api_key(), "");
    }

    #[test]
    fn test_non_json_secret_yields_empty_key() {
        let store = Arc::new(MemorySecretStore::default());
        store.set_secret(FIXER_SECRET_ID, "plain-key").unwrap();
        let provider = StoredApiKeyProvider::new(store, FIXER_SECRET_ID);
        assert_eq!(provider.get_api_key(), "");
    }

    #[test]
    fn test_missing_field_yields_empty_key() {
        let store = Arc::new(MemorySecretStore::default());
        store
            .set_secret(FIXER_SECRET_ID, r#"{"other_key": "x"}"#)
            .unwrap();
        let provider = StoredApiKeyProvider::new(store.clone(), FIXER_SECRET_ID);
        assert_eq!(provider.get_api_key(), "");

        let provider = StoredApiKeyProvider::new(store, FIXER_SECRET_ID).with_field("other_key");
        assert_eq!(provider.get_api_key(), "x");
    }

    #[test]
    fn test_deleted_secret_yields_empty_key() {
        let store = Arc::new(MemorySecretStore::default());
        let provider = StoredApiKeyProvider::new(store.clone(), FIXER_SECRET_ID);
        provider.store_api_key("abc123").unwrap();

        store.delete_secret(FIXER_SECRET_ID).unwrap();
        assert_eq!(provider.get_api_key(), "");
    }
}
