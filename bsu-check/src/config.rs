use crate::error::{CheckError, Result};
use crate::mnemonic::ShiftKind;
use crate::numbers::BOUNDARY_NUMBERS;
use bsu::Width;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path};

/// Sweep configuration, usually loaded from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Operand widths in bits
    #[serde(default = "Config::default_widths")]
    pub widths: Vec<u32>,

    /// Mnemonics to check (rol, ror, rcl, rcr, shl, shr, sal, sar, shld, shrd)
    #[serde(default = "Config::default_operations")]
    pub operations: Vec<String>,

    /// Additional operands/counts (hex strings like "0x1234_5678")
    #[serde(default, with = "hex_list")]
    pub extra_numbers: Vec<u64>,

    /// Incoming CF values for the single-operand family
    #[serde(default = "Config::default_carry_in")]
    pub carry_in: Vec<bool>,

    /// Stop the sweep after collecting this many mismatches
    #[serde(default = "Config::default_max_mismatches")]
    pub max_mismatches: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            widths: Self::default_widths(),
            operations: Self::default_operations(),
            extra_numbers: Vec::new(),
            carry_in: Self::default_carry_in(),
            max_mismatches: Self::default_max_mismatches(),
        }
    }
}

impl Config {
    fn default_widths() -> Vec<u32> {
        Width::ALL.iter().map(|w| w.bits()).collect()
    }

    fn default_operations() -> Vec<String> {
        ShiftKind::ALL.iter().map(|k| k.name().to_string()).collect()
    }

    fn default_carry_in() -> Vec<bool> {
        vec![false, true]
    }

    fn default_max_mismatches() -> usize {
        32
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(&path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file {:?}: {}", path.as_ref(), e))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file {:?}: {}", path.as_ref(), e))?;

        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let contents = toml::to_string_pretty(self)
            .map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))?;

        fs::write(&path, contents)
            .map_err(|e| anyhow::anyhow!("Failed to write config file {:?}: {}", path.as_ref(), e))?;

        Ok(())
    }

    pub fn create_sample() -> Self {
        Config {
            widths: vec![16, 32],
            operations: vec!["rcl".to_string(), "rcr".to_string(), "shld".to_string()],
            extra_numbers: vec![0x1234_5678, 0xFFFF_0000_FFFF_0000],
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.widths()?;
        self.kinds()?;
        if self.carry_in.is_empty() {
            return Err(CheckError::InvalidConfig("carry_in must not be empty".to_string()));
        }
        if self.max_mismatches == 0 {
            return Err(CheckError::InvalidConfig(
                "max_mismatches must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn widths(&self) -> Result<Vec<Width>> {
        self.widths
            .iter()
            .map(|&bits| Width::try_from(bits).map_err(CheckError::from))
            .collect()
    }

    pub fn kinds(&self) -> Result<Vec<ShiftKind>> {
        self.operations.iter().map(|name| name.parse()).collect()
    }

    /// The boundary set followed by any extra numbers not already in it.
    pub fn numbers(&self) -> Vec<u64> {
        let mut numbers = BOUNDARY_NUMBERS.to_vec();
        for &extra in &self.extra_numbers {
            if !numbers.contains(&extra) {
                numbers.push(extra);
            }
        }
        numbers
    }
}

/// Parse a hex string that may have 0x prefix and underscores for readability
pub fn parse_hex(s: &str) -> Result<u64> {
    let cleaned = s.replace('_', "");
    let digits = cleaned
        .strip_prefix("0x")
        .or_else(|| cleaned.strip_prefix("0X"))
        .unwrap_or(&cleaned);

    u64::from_str_radix(digits, 16).map_err(|source| CheckError::InvalidHex {
        value: s.to_string(),
        source,
    })
}

/// Custom (de)serializer for lists of hex strings
mod hex_list {
    use super::parse_hex;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let strings: Vec<String> = Vec::deserialize(deserializer)?;
        strings
            .iter()
            .map(|s| parse_hex(s).map_err(serde::de::Error::custom))
            .collect()
    }

    pub fn serialize<S>(values: &[u64], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        values
            .iter()
            .map(|value| format!("0x{:x}", value))
            .collect::<Vec<_>>()
            .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("0x1000").unwrap(), 0x1000);
        assert_eq!(parse_hex("1000").unwrap(), 0x1000);
        assert_eq!(parse_hex("0x7fff_f000_0000").unwrap(), 0x7fff_f000_0000);
        assert_eq!(parse_hex("0XFF").unwrap(), 0xFF);
        assert!(parse_hex("0xZZ").is_err());
    }

    #[test]
    fn test_defaults_cover_everything() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.widths().unwrap(), Width::ALL.to_vec());
        assert_eq!(config.kinds().unwrap(), ShiftKind::ALL.to_vec());
        assert_eq!(config.numbers().len(), BOUNDARY_NUMBERS.len());
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::create_sample();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let parsed_config: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed_config);
    }

    #[test]
    fn test_extra_numbers_are_deduplicated() {
        let config: Config = toml::from_str(r#"extra_numbers = ["0x1", "0x1234_5678"]"#).unwrap();
        let numbers = config.numbers();
        assert_eq!(numbers.len(), BOUNDARY_NUMBERS.len() + 1);
        assert_eq!(numbers.last(), Some(&0x1234_5678));
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let config: Config = toml::from_str("widths = [12]").unwrap();
        assert!(config.validate().is_err());

        let config: Config = toml::from_str(r#"operations = ["adc"]"#).unwrap();
        assert!(matches!(config.validate(), Err(CheckError::UnknownMnemonic(_))));

        let config: Config = toml::from_str("carry_in = []").unwrap();
        assert!(matches!(config.validate(), Err(CheckError::InvalidConfig(_))));
    }
}
