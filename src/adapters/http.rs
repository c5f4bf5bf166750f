use crate::domain::manifest::Manifest;
use crate::domain::ports::{ConfigProvider, GenerationService};
use crate::utils::error::{CardError, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Client;
use std::io::Cursor;
use url::Url;

pub const GENERATE_PATH: &str = "generate";

/// Append `/generate` unless the endpoint already ends with it. Trailing slashes are
/// dropped first.
pub fn generate_url(endpoint: &str) -> Result<Url> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return Err(CardError::config("generation service endpoint is not set"));
    }

    let base = endpoint.trim_end_matches('/');
    let full = if base.ends_with("/generate") {
        base.to_string()
    } else {
        format!("{}/{}", base, GENERATE_PATH)
    };

    Url::parse(&full).map_err(|e| CardError::InvalidConfigValueError {
        field: "service.endpoint".to_string(),
        value: endpoint.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })
}

/// 3MF files are OPC zip packages with a `.model` part.
pub fn verify_3mf(payload: &[u8]) -> Result<()> {
    let archive = zip::ZipArchive::new(Cursor::new(payload))?;
    if archive.file_names().any(|name| name.ends_with(".model")) {
        Ok(())
    } else {
        Err(CardError::transport(
            "response archive contains no 3D model part",
        ))
    }
}

pub struct HttpGenerationService {
    client: Client,
    endpoint: Option<String>,
    verify_archive: bool,
}

impl HttpGenerationService {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let mut headers = HeaderMap::new();
        for (name, value) in config.extra_headers() {
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                CardError::InvalidConfigValueError {
                    field: "service.headers".to_string(),
                    value: name.clone(),
                    reason: e.to_string(),
                }
            })?;
            let header_value =
                HeaderValue::from_str(&value).map_err(|e| CardError::InvalidConfigValueError {
                    field: format!("service.headers.{}", name),
                    value: value.clone(),
                    reason: e.to_string(),
                })?;
            headers.insert(header_name, header_value);
        }

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            endpoint: config.service_endpoint().map(str::to_string),
            verify_archive: config.verify_archive(),
        })
    }
}

#[async_trait::async_trait]
impl GenerationService for HttpGenerationService {
    async fn generate(&self, manifest: &Manifest) -> Result<Vec<u8>> {
        let url = generate_url(self.endpoint.as_deref().unwrap_or_default())?;

        tracing::info!("Attempting 3MF generation at: {}", url);
        if tracing::enabled!(tracing::Level::DEBUG) {
            tracing::debug!("Payload: {}", manifest.to_json()?);
        }

        let response = self.client.post(url).json(manifest).send().await?;
        let status = response.status();
        tracing::debug!("Generation service response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if !body.is_empty() {
                tracing::error!("Error body: {}", body);
            }
            return Err(CardError::ServiceError {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let payload = response.bytes().await?.to_vec();
        if payload.is_empty() {
            return Err(CardError::transport("generation service returned an empty body"));
        }
        if self.verify_archive {
            verify_3mf(&payload)?;
        }
        Ok(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_url_normalization() {
        let expected = "https://cards.example.com/generate";
        assert_eq!(generate_url("https://cards.example.com").unwrap().as_str(), expected);
        assert_eq!(generate_url("https://cards.example.com/").unwrap().as_str(), expected);
        assert_eq!(
            generate_url("https://cards.example.com/generate").unwrap().as_str(),
            expected
        );
        assert_eq!(
            generate_url("https://cards.example.com/generate/").unwrap().as_str(),
            expected
        );
        assert_eq!(
            generate_url("http://localhost:8000/api/").unwrap().as_str(),
            "http://localhost:8000/api/generate"
        );
    }

    #[test]
    fn test_generate_url_requires_endpoint() {
        let err = generate_url("  ").unwrap_err();
        assert!(matches!(err, CardError::ConfigError { .. }));
        assert!(generate_url("not a url").is_err());
    }

    #[test]
    fn test_verify_rejects_non_archive() {
        let err = verify_3mf(b"<html>ngrok error page</html>").unwrap_err();
        assert!(matches!(err, CardError::TransportError { .. }));
    }
}
