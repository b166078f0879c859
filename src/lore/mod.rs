//! Flavor text for generated terrain.
//!
//! Lore depends only on the terrain's dimensions, never on its contents.
//! [`LoreProvider::request_lore`] always resolves to displayable text: every
//! failure becomes one of the fallback sentences below and is logged.
//!
//! # Usage
//!
//! ```ignore
//! use topology_terrain::lore::{LlmConfig, LoreProvider};
//!
//! let provider = LoreProvider::new(LlmConfig::default());
//! let text = provider.request_lore(129, 129).await;
//! ```

pub mod llm;
pub mod slot;

pub use llm::{LlmClient, LlmConfig, LlmError};
pub use slot::{LoreSlot, LoreTicket};

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use log::{info, warn};

use llm::ChatMessage;

pub const NO_API_KEY_TEXT: &str = "AI lore generation is unavailable without an API key.";
pub const FAILURE_TEXT: &str = "Failed to generate AI lore. The maze stands silent.";
pub const EMPTY_TEXT: &str = "No lore generated.";

pub struct LoreProvider {
    api_key_env: String,
    api_key: Option<String>,
    /// Built once and shared by every request; holds the build error otherwise
    client: Result<LlmClient, String>,
}

impl LoreProvider {
    /// Provider whose key comes from the configured environment variable.
    pub fn new(config: LlmConfig) -> Self {
        let api_key = config.api_key_from_env();
        Self::with_api_key(config, api_key)
    }

    pub fn with_api_key(config: LlmConfig, api_key: Option<String>) -> Self {
        let api_key_env = config.api_key_env.clone();
        let client = LlmClient::new(config).map_err(|e| {
            warn!("Could not build lore HTTP client: {}", e);
            e.to_string()
        });
        Self {
            api_key_env,
            api_key,
            client,
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Ask the model to describe a `width x height` maze.
    pub async fn request_lore(&self, width: usize, height: usize) -> String {
        match self.try_request_lore(width, height).await {
            Ok(text) => {
                info!("Received {} bytes of lore for {}x{} terrain", text.len(), width, height);
                text
            }
            Err(LlmError::MissingApiKey(var)) => {
                warn!("Lore requested but {} is not set", var);
                NO_API_KEY_TEXT.to_string()
            }
            Err(LlmError::EmptyResponse) => {
                warn!("Lore server returned no content");
                EMPTY_TEXT.to_string()
            }
            Err(e) => {
                warn!("Error generating terrain lore: {}", e);
                FAILURE_TEXT.to_string()
            }
        }
    }

    async fn try_request_lore(&self, width: usize, height: usize) -> Result<String, LlmError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| LlmError::MissingApiKey(self.api_key_env.clone()))?;

        let client = self
            .client
            .as_ref()
            .map_err(|e| LlmError::ClientUnavailable(e.clone()))?;
        let messages = [ChatMessage::user(llm::lore_prompt(width, height))];
        client.chat_completion(api_key, &messages).await
    }
}

/// Save lore as a Markdown document.
pub fn export_lore_markdown(text: &str, width: usize, height: usize, path: impl AsRef<Path>) -> std::io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    writeln!(writer, "# Terrain Lore: {} x {}\n", width, height)?;
    writeln!(writer, "*Recorded {}*\n", Local::now().format("%Y-%m-%d %H:%M"))?;
    writeln!(writer, "---\n")?;
    writeln!(writer, "{}", text.trim_end())?;
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config() -> LlmConfig {
        LlmConfig {
            // Port 9 (discard) on loopback refuses connections on test hosts.
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..LlmConfig::default()
        }
    }

    #[tokio::test]
    async fn test_missing_key_falls_back() {
        let provider = LoreProvider::with_api_key(unreachable_config(), None);
        assert!(!provider.has_api_key());
        assert_eq!(provider.request_lore(129, 129).await, NO_API_KEY_TEXT);
    }

    #[tokio::test]
    async fn test_network_failure_falls_back() {
        let provider = LoreProvider::with_api_key(unreachable_config(), Some("test-key".to_string()));
        assert_eq!(provider.request_lore(40, 30).await, FAILURE_TEXT);
    }

    #[tokio::test]
    async fn test_one_client_serves_repeated_requests() {
        let provider = LoreProvider::with_api_key(unreachable_config(), Some("test-key".to_string()));
        assert!(provider.client.is_ok());

        assert_eq!(provider.request_lore(40, 30).await, FAILURE_TEXT);
        assert_eq!(provider.request_lore(80, 60).await, FAILURE_TEXT);
        assert!(provider.client.is_ok());
    }

    #[test]
    fn test_export_markdown() {
        let path = std::env::temp_dir().join(format!("terrain-lore-{}.md", std::process::id()));
        export_lore_markdown("## The Sunken Lattice\nStone and echo.\n", 129, 64, &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("# Terrain Lore: 129 x 64"));
        assert!(text.contains("## The Sunken Lattice"));
        std::fs::remove_file(&path).unwrap();
    }
}
