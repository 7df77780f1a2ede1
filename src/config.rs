//! Configuration for the faucet workflow
//!
//! Loads configuration from TOML files with environment variable substitution.

use anyhow::{Context, Result};
use ethers::types::{Address, U256};
use serde::Deserialize;

use crate::error::{WorkflowError, WorkflowResult};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

/// Root configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub chain: ChainSettings,
    pub gas: GasSettings,
    pub submission: SubmissionSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChainSettings {
    pub chain_id: u64,
    pub name: String,
    pub rpc_url: String,
    pub faucet_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GasSettings {
    pub limit_buffer_percent: u64,
    pub price_buffer_percent: u64,
    pub poll_interval_ms: u64,
    pub max_gas_price_gwei: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubmissionSettings {
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub send_timeout_secs: u64,
    pub default_mint_amount_wei: String,
}

impl Settings {
    /// Load settings from configuration files
    pub fn load() -> Result<Self> {
        let config_path = env::var("FAUCET_WORKFLOW_CONFIG")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("config/default.toml"));

        Self::load_from(&config_path)
    }

    /// Load settings from a specific path
    pub fn load_from(config_path: &PathBuf) -> Result<Self> {
        let config_str = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        // Substitute environment variables
        let config_str = substitute_env_vars(&config_str);

        let settings: Settings =
            toml::from_str(&config_str).with_context(|| "Failed to parse configuration")?;

        settings.validate()?;

        Ok(settings)
    }

    /// Validate configuration
    fn validate(&self) -> Result<()> {
        if self.chain.chain_id == 0 {
            anyhow::bail!("Chain id must be non-zero");
        }
        if self.chain.rpc_url.is_empty() {
            anyhow::bail!("Chain {} has no RPC URL configured", self.chain.name);
        }
        self.faucet_address().map_err(anyhow::Error::from)?;
        self.default_mint_amount().map_err(anyhow::Error::from)?;

        Ok(())
    }

    /// Parsed faucet contract address
    pub fn faucet_address(&self) -> WorkflowResult<Address> {
        Address::from_str(&self.chain.faucet_address).map_err(|e| {
            WorkflowError::Config(format!(
                "Chain {} has an invalid faucet address: {}",
                self.chain.name, e
            ))
        })
    }

    /// Parsed default mint amount in wei
    pub fn default_mint_amount(&self) -> WorkflowResult<U256> {
        U256::from_dec_str(&self.submission.default_mint_amount_wei)
            .map_err(|e| WorkflowError::Config(format!("Invalid default mint amount: {}", e)))
    }
}

/// Substitute environment variables in the format ${VAR_NAME}
fn substitute_env_vars(input: &str) -> String {
    let mut result = input.to_string();
    let re = regex::Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").unwrap();

    for cap in re.captures_iter(input) {
        let var_name = &cap[1];
        let var_value = env::var(var_name).unwrap_or_default();
        result = result.replace(&cap[0], &var_value);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
[chain]
chain_id = 5
name = "goerli"
rpc_url = "https://rpc.example.com"
faucet_address = "0x681860075529352da2C94082Eb66c59dF958e89C"

[gas]
limit_buffer_percent = 20
price_buffer_percent = 10
poll_interval_ms = 15000
max_gas_price_gwei = 500

[submission]
max_retries = 3
retry_delay_ms = 1000
send_timeout_secs = 30
default_mint_amount_wei = "10000000000000000000000"
"#;

    #[test]
    fn test_env_var_substitution() {
        env::set_var("TEST_VAR", "test_value");
        let input = "url = \"https://api.example.com/${TEST_VAR}/endpoint\"";
        let result = substitute_env_vars(input);
        assert_eq!(
            result,
            "url = \"https://api.example.com/test_value/endpoint\""
        );
    }

    #[test]
    fn loads_and_validates_sample_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let settings = Settings::load_from(&file.path().to_path_buf()).unwrap();
        assert_eq!(settings.chain.chain_id, 5);
        assert_eq!(
            settings.default_mint_amount().unwrap(),
            U256::from_dec_str("10000000000000000000000").unwrap()
        );
        assert_ne!(settings.faucet_address().unwrap(), Address::zero());
    }

    #[test]
    fn bad_faucet_address_surfaces_instead_of_defaulting() {
        let mut settings: Settings = toml::from_str(SAMPLE).unwrap();
        settings.chain.faucet_address = "not-an-address".to_string();

        let err = settings.faucet_address().unwrap_err();
        assert!(matches!(err, WorkflowError::Config(_)));

        settings.submission.default_mint_amount_wei = "ten".to_string();
        assert!(settings.default_mint_amount().is_err());
    }

    #[test]
    fn rejects_invalid_faucet_address() {
        let broken = SAMPLE.replace("0x681860075529352da2C94082Eb66c59dF958e89C", "not-an-address");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(broken.as_bytes()).unwrap();

        assert!(Settings::load_from(&file.path().to_path_buf()).is_err());
    }

    #[test]
    fn rejects_zero_chain_id() {
        let broken = SAMPLE.replace("chain_id = 5", "chain_id = 0");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(broken.as_bytes()).unwrap();

        assert!(Settings::load_from(&file.path().to_path_buf()).is_err());
    }
}
