use serde::Deserialize;

use crate::error::ConfigError;

/// Construction-time settings for a [`crate::ControlRegistry`].
///
/// Can be embedded in a host's TOML config:
///
/// ```toml
/// label = "runtime"
/// handle_prefix = "rt"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RegistryConfig {
	/// Registry name used in log fields and error messages.
	pub label: String,
	/// Leading segment of every issued handle.
	pub handle_prefix: String,
}

impl Default for RegistryConfig {
	fn default() -> Self {
		Self {
			label: "controls".to_string(),
			handle_prefix: "ctl".to_string(),
		}
	}
}

impl RegistryConfig {
	/// Creates a config with the given label and the default handle prefix.
	pub fn new(label: impl Into<String>) -> Self {
		Self {
			label: label.into(),
			..Self::default()
		}
	}

	/// Sets the handle prefix.
	pub fn with_handle_prefix(mut self, prefix: impl Into<String>) -> Self {
		self.handle_prefix = prefix.into();
		self
	}

	/// Parses and validates a TOML document.
	pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
		let config: Self = toml::from_str(input)?;
		config.validate()?;
		Ok(config)
	}

	/// Rejects empty labels and prefixes.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.label.is_empty() {
			return Err(ConfigError::EmptyLabel);
		}
		if self.handle_prefix.is_empty() {
			return Err(ConfigError::EmptyHandlePrefix);
		}
		Ok(())
	}
}
