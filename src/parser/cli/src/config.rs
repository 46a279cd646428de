use alloy_primitives::Address;
use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use txsemantics_dydx::registry::{AssetInfo, ChainId, ChainMetadata};

/// Extra token metadata registered before a decimals lookup
///
/// ```toml
/// network_id = 1
///
/// [[tokens]]
/// address = "0x0d8775f648430679a709e98d2b0cb6250d2887ef"
/// symbol = "BAT"
/// decimals = 18
/// name = "Basic Attention Token"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct TokensConfig {
    #[serde(default = "default_network_id")]
    pub network_id: ChainId,
    #[serde(default)]
    pub tokens: Vec<TokenEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenEntry {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    pub name: String,
}

fn default_network_id() -> ChainId {
    1
}

impl TokensConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read token config: {}", path.as_ref().display())
        })?;

        toml::from_str(&content).with_context(|| {
            format!("Failed to parse token config: {}", path.as_ref().display())
        })
    }

    pub fn chain_metadata(&self) -> ChainMetadata {
        let assets: HashMap<Address, AssetInfo> = self
            .tokens
            .iter()
            .map(|token| {
                (
                    token.address,
                    AssetInfo {
                        symbol: token.symbol.clone(),
                        decimals: token.decimals,
                        name: token.name.clone(),
                    },
                )
            })
            .collect();

        ChainMetadata {
            network_id: self.network_id,
            assets,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_tokens_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
network_id = 137

[[tokens]]
address = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174"
symbol = "USDC"
decimals = 6
name = "USD Coin"
"#
        )
        .unwrap();

        let config = TokensConfig::from_file(file.path()).unwrap();
        assert_eq!(config.network_id, 137);
        assert_eq!(config.tokens.len(), 1);

        let metadata = config.chain_metadata();
        let usdc: Address = "0x2791bca1f2de4661ed88a30c99a7a9449aa84174".parse().unwrap();
        assert_eq!(metadata.network_id, 137);
        assert_eq!(metadata.assets[&usdc].decimals, 6);
    }

    #[test]
    fn test_network_defaults_to_mainnet() {
        let config: TokensConfig = toml::from_str("").unwrap();
        assert_eq!(config.network_id, 1);
        assert!(config.tokens.is_empty());
    }

    #[test]
    fn test_missing_file_has_context() {
        let err = TokensConfig::from_file("/nonexistent/tokens.toml").unwrap_err();
        assert!(err.to_string().contains("Failed to read token config"));
    }

    #[test]
    fn test_invalid_address_is_rejected() {
        let result: Result<TokensConfig, _> = toml::from_str(
            r#"
[[tokens]]
address = "not-an-address"
symbol = "X"
decimals = 1
name = "X"
"#,
        );
        assert!(result.is_err());
    }
}
