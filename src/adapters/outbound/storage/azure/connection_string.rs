use std::collections::HashMap;

use crate::domain::errors::ValidationError;

const DEFAULT_PROTOCOL: &str = "https";
const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";

/// The parts of a storage connection string the blob adapter needs
#[derive(Clone, PartialEq)]
pub struct ConnectionSettings {
    /// Blob service endpoint without trailing slash
    pub blob_endpoint: String,
    /// Shared access signature query, without a leading `?`
    pub sas_token: String,
}

impl ConnectionSettings {
    /// Parse `Key=Value;Key=Value` pairs. Keys are case-insensitive, values
    /// may themselves contain `=`.
    pub fn parse(connection_string: &str) -> Result<Self, ValidationError> {
        let mut settings = HashMap::new();
        for part in connection_string.split(';').map(str::trim) {
            if part.is_empty() {
                continue;
            }
            let (key, value) = part
                .split_once('=')
                .ok_or_else(|| ValidationError::MalformedConnectionSetting(redact(part)))?;
            settings.insert(key.trim().to_ascii_lowercase(), value.trim().to_string());
        }

        let sas_token = match settings.get("sharedaccesssignature") {
            Some(sas) => sas.trim_start_matches('?').to_string(),
            None if settings.contains_key("accountkey") => {
                return Err(ValidationError::UnsupportedCredential(
                    "account key connection strings are not supported; use a SharedAccessSignature"
                        .to_string(),
                ));
            }
            None => {
                return Err(ValidationError::MissingConnectionSetting(
                    "SharedAccessSignature",
                ));
            }
        };

        let blob_endpoint = match settings.get("blobendpoint") {
            Some(endpoint) => endpoint.trim_end_matches('/').to_string(),
            None => {
                let account = settings
                    .get("accountname")
                    .ok_or(ValidationError::MissingConnectionSetting("AccountName"))?;
                let protocol = settings
                    .get("defaultendpointsprotocol")
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_PROTOCOL);
                let suffix = settings
                    .get("endpointsuffix")
                    .map(String::as_str)
                    .unwrap_or(DEFAULT_ENDPOINT_SUFFIX);
                format!("{}://{}.blob.{}", protocol, account, suffix)
            }
        };

        Ok(Self {
            blob_endpoint,
            sas_token,
        })
    }
}

// The signature is a credential; keep it out of Debug output
impl std::fmt::Debug for ConnectionSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionSettings")
            .field("blob_endpoint", &self.blob_endpoint)
            .field("sas_token", &"<redacted>")
            .finish()
    }
}

fn redact(setting: &str) -> String {
    setting.chars().take(16).collect::<String>() + "…"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_name_with_sas() {
        let settings = ConnectionSettings::parse(
            "DefaultEndpointsProtocol=https;AccountName=acme;SharedAccessSignature=sv=2022-11-02&sig=abc%3D",
        )
        .unwrap();
        assert_eq!(settings.blob_endpoint, "https://acme.blob.core.windows.net");
        assert_eq!(settings.sas_token, "sv=2022-11-02&sig=abc%3D");
    }

    #[test]
    fn test_explicit_blob_endpoint_wins() {
        let settings = ConnectionSettings::parse(
            "BlobEndpoint=http://127.0.0.1:10000/devstoreaccount1/;SharedAccessSignature=?sv=1&sig=x",
        )
        .unwrap();
        assert_eq!(settings.blob_endpoint, "http://127.0.0.1:10000/devstoreaccount1");
        assert_eq!(settings.sas_token, "sv=1&sig=x");
    }

    #[test]
    fn test_keys_are_case_insensitive_and_suffix_honored() {
        let settings = ConnectionSettings::parse(
            "accountname=acme;endpointsuffix=core.chinacloudapi.cn;sharedaccesssignature=sig=1;",
        )
        .unwrap();
        assert_eq!(settings.blob_endpoint, "https://acme.blob.core.chinacloudapi.cn");
    }

    #[test]
    fn test_account_key_is_rejected() {
        let err = ConnectionSettings::parse("AccountName=acme;AccountKey=c2VjcmV0").unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedCredential(_)));
    }

    #[test]
    fn test_missing_settings() {
        assert_eq!(
            ConnectionSettings::parse("AccountName=acme").unwrap_err(),
            ValidationError::MissingConnectionSetting("SharedAccessSignature")
        );
        assert_eq!(
            ConnectionSettings::parse("SharedAccessSignature=sig=1").unwrap_err(),
            ValidationError::MissingConnectionSetting("AccountName")
        );
        assert!(matches!(
            ConnectionSettings::parse("garbage").unwrap_err(),
            ValidationError::MalformedConnectionSetting(_)
        ));
    }

    #[test]
    fn test_debug_hides_signature() {
        let settings = ConnectionSettings::parse("AccountName=acme;SharedAccessSignature=sig=secret").unwrap();
        assert!(!format!("{:?}", settings).contains("secret"));
    }
}
