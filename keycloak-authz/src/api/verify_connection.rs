//! Validates a pasted provider configuration before it is saved.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::PluginError;
use crate::models::PluginResponse;

/// Configuration as typed into the host's settings form. Every field is
/// optional here so that validation can report each omission by key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfiguration {
    #[serde(rename = "KeycloakEndpoint")]
    pub endpoint: Option<String>,
    #[serde(rename = "KeycloakRealm")]
    pub realm: Option<String>,
    #[serde(rename = "ClientId")]
    pub client_id: Option<String>,
    #[serde(rename = "ClientSecret")]
    pub client_secret: Option<String>,
}

impl RawConfiguration {
    pub fn from_json(body: &str) -> Result<RawConfiguration, PluginError> {
        Ok(serde_json::from_str(body)?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub key: String,
    pub message: String,
}

impl ValidationError {
    fn new(key: &str, message: &str) -> ValidationError {
        ValidationError {
            key: key.to_string(),
            message: message.to_string(),
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}

/// Checks the raw configuration field by field. An absent realm is fine
/// since it falls back to the default, but a present blank one is not.
pub fn validate_configuration(configuration: &RawConfiguration) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if is_blank(&configuration.endpoint) {
        errors.push(ValidationError::new(
            "KeycloakEndpoint",
            "KeycloakEndpoint must not be blank.",
        ));
    } else {
        let endpoint = configuration.endpoint.as_deref().unwrap_or_default();
        match Url::parse(endpoint) {
            Ok(url) if !url.cannot_be_a_base() => {}
            _ => errors.push(ValidationError::new(
                "KeycloakEndpoint",
                "KeycloakEndpoint must be a valid absolute URL.",
            )),
        }
    }

    if let Some(realm) = &configuration.realm {
        if realm.trim().is_empty() {
            errors.push(ValidationError::new(
                "KeycloakRealm",
                "KeycloakRealm must not be blank.",
            ));
        }
    }

    if is_blank(&configuration.client_id) {
        errors.push(ValidationError::new(
            "ClientId",
            "ClientId must not be blank.",
        ));
    }

    if is_blank(&configuration.client_secret) {
        errors.push(ValidationError::new(
            "ClientSecret",
            "ClientSecret must not be blank.",
        ));
    }

    errors
}

pub struct ValidateConfigurationExecutor {
    configuration: RawConfiguration,
}

impl ValidateConfigurationExecutor {
    pub fn new(configuration: RawConfiguration) -> ValidateConfigurationExecutor {
        ValidateConfigurationExecutor { configuration }
    }

    pub fn execute(&self) -> Result<PluginResponse, PluginError> {
        let errors = validate_configuration(&self.configuration);
        Ok(PluginResponse::success(serde_json::to_string(&errors)?))
    }
}

#[derive(Debug, Serialize)]
struct ConnectionResult {
    status: &'static str,
    message: String,
}

pub struct VerifyConnectionExecutor {
    configuration: RawConfiguration,
}

impl VerifyConnectionExecutor {
    pub fn new(configuration: RawConfiguration) -> VerifyConnectionExecutor {
        VerifyConnectionExecutor { configuration }
    }

    /// Reports success when the configuration validates, failure with the
    /// first validation message otherwise. Both outcomes use code 200; the
    /// status field carries the verdict.
    pub fn execute(&self) -> Result<PluginResponse, PluginError> {
        let errors = validate_configuration(&self.configuration);
        let result = match errors.first() {
            None => ConnectionResult {
                status: "success",
                message: "Connection ok".to_string(),
            },
            Some(error) => ConnectionResult {
                status: "failure",
                message: error.message.clone(),
            },
        };
        Ok(PluginResponse::success(serde_json::to_string(&result)?))
    }
}
