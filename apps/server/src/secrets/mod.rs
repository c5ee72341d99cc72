//! JSON file backed [`SecretStore`], optionally sealed with ChaCha20-Poly1305.

use std::{collections::HashMap, fs, path::PathBuf, sync::Mutex};

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    ChaCha20Poly1305, Key, Nonce,
};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};

use cambio_core::{
    errors::Error,
    secrets::{format_service_id, SecretStore},
    Result,
};

const FILE_VERSION: u32 = 1;
const NONCE_LEN: usize = 12;

#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
    cipher_key: Option<[u8; 32]>,
    lock: Mutex<()>,
}

#[derive(Serialize, Deserialize, Default)]
struct SecretsFile {
    version: u32,
    secrets: HashMap<String, String>,
}

#[derive(Serialize, Deserialize)]
struct SealedSecretsFile {
    version: u32,
    nonce: String,
    ciphertext: String,
}

impl FileSecretStore {
    /// `cipher_key` is ignored when blank; the file is then stored in clear.
    pub fn new(path: PathBuf, cipher_key: Option<&str>) -> Result<Self> {
        let cipher_key = match cipher_key {
            Some(raw) if !raw.trim().is_empty() => Some(decode_cipher_key(raw)?),
            _ => None,
        };

        Ok(Self {
            path,
            cipher_key,
            lock: Mutex::new(()),
        })
    }

    pub fn is_encrypted(&self) -> bool {
        self.cipher_key.is_some()
    }

    fn update<F>(&self, op: F) -> Result<()>
    where
        F: FnOnce(&mut HashMap<String, String>),
    {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Secret("secret store lock poisoned".into()))?;
        let mut secrets = self.load()?;
        op(&mut secrets);
        self.save(secrets)
    }

    fn snapshot(&self) -> Result<HashMap<String, String>> {
        let _guard = self
            .lock
            .lock()
            .map_err(|_| Error::Secret("secret store lock poisoned".into()))?;
        self.load()
    }

    // Callers hold `lock`.
    fn load(&self) -> Result<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }

        let raw = fs::read(&self.path)?;
        if raw.is_empty() {
            return Ok(HashMap::new());
        }

        let value: serde_json::Value = serde_json::from_slice(&raw)?;
        if value.get("ciphertext").is_none() {
            let file: SecretsFile = serde_json::from_value(value)?;
            return Ok(file.secrets);
        }

        let key = self.cipher_key.ok_or_else(|| {
            Error::Secret("CAMBIO_SECRET_KEY must be set to read the encrypted secrets file".into())
        })?;
        let sealed: SealedSecretsFile = serde_json::from_value(value)?;
        let nonce = BASE64
            .decode(sealed.nonce)
            .map_err(|e| Error::Secret(format!("invalid nonce encoding: {e}")))?;
        if nonce.len() != NONCE_LEN {
            return Err(Error::Secret(format!(
                "nonce must be {NONCE_LEN} bytes, got {}",
                nonce.len()
            )));
        }
        let ciphertext = BASE64
            .decode(sealed.ciphertext)
            .map_err(|e| Error::Secret(format!("invalid ciphertext encoding: {e}")))?;

        let plaintext = ChaCha20Poly1305::new(Key::from_slice(&key))
            .decrypt(Nonce::from_slice(&nonce), ciphertext.as_ref())
            .map_err(|_| Error::Secret("secrets file could not be decrypted".into()))?;
        let file: SecretsFile = serde_json::from_slice(&plaintext)?;
        Ok(file.secrets)
    }

    // Callers hold `lock`.
    fn save(&self, secrets: HashMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let file = SecretsFile {
            version: FILE_VERSION,
            secrets,
        };

        let json = match self.cipher_key {
            Some(key) => {
                let mut nonce = [0u8; NONCE_LEN];
                OsRng.fill_bytes(&mut nonce);
                let ciphertext = ChaCha20Poly1305::new(Key::from_slice(&key))
                    .encrypt(Nonce::from_slice(&nonce), serde_json::to_vec(&file)?.as_ref())
                    .map_err(|_| Error::Secret("failed to encrypt secrets".into()))?;
                serde_json::to_string_pretty(&SealedSecretsFile {
                    version: FILE_VERSION,
                    nonce: BASE64.encode(nonce),
                    ciphertext: BASE64.encode(ciphertext),
                })?
            }
            None => serde_json::to_string_pretty(&file)?,
        };

        // Write next to the target and rename so readers never see a torn file.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SecretStore for FileSecretStore {
    fn set_secret(&self, service: &str, secret: &str) -> Result<()> {
        let key = format_service_id(service);
        self.update(|secrets| {
            secrets.insert(key, secret.to_string());
        })
    }

    fn get_secret(&self, service: &str) -> Result<Option<String>> {
        let key = format_service_id(service);
        Ok(self.snapshot()?.remove(&key))
    }

    fn delete_secret(&self, service: &str) -> Result<()> {
        let key = format_service_id(service);
        self.update(|secrets| {
            secrets.remove(&key);
        })
    }
}

/// Accepts base64 of 32 bytes, or a 32-character ASCII string.
fn decode_cipher_key(raw: &str) -> Result<[u8; 32]> {
    let trimmed = raw.trim();
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            return Err(Error::Secret(
                "CAMBIO_SECRET_KEY must be base64 or a 32-character ascii value".into(),
            ))
        }
    };

    decoded.try_into().map_err(|bytes: Vec<u8>| {
        Error::Secret(format!(
            "CAMBIO_SECRET_KEY must decode to exactly 32 bytes, got {}",
            bytes.len()
        ))
    })
}
