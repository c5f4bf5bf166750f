use crate::core::ConfigProvider;
use crate::domain::manifest::DEFAULT_APP_NAME;
use crate::utils::error::{CardError, Result};
use crate::utils::validation::Validate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// 未設定 endpoint 時使用的環境變數
pub const ENDPOINT_ENV_VAR: &str = "CARD_SERVICE_URL";

const DEFAULT_TIMEOUT_SECONDS: u64 = 60;
const DEFAULT_DISPLAY_SECONDS: u64 = 5;
const DEFAULT_OUTPUT_PATH: &str = "./output";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub service: ServiceConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppSection {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub endpoint: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub verify_archive: Option<bool>,
    pub headers: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub display_seconds: Option<u64>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(CardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        // 處理環境變數替換
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content)
            .map_err(|e| CardError::config(format!("TOML parsing error: {}", e)))
    }

    /// 替換環境變數 (例如 ${CARD_SERVICE_URL})，找不到的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static regex"));

        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        })
        .to_string()
    }

    /// 檔案沒有設定 endpoint 時，改用環境變數
    pub fn with_env_fallback(mut self) -> Self {
        if self.service_endpoint().is_none() {
            if let Ok(endpoint) = std::env::var(ENDPOINT_ENV_VAR) {
                tracing::debug!("Using {} for the generation endpoint", ENDPOINT_ENV_VAR);
                self.service.endpoint = Some(endpoint);
            }
        }
        self
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        // endpoint 未設定不算錯誤，匯出時才回報
        if let Some(endpoint) = self.service_endpoint() {
            crate::utils::validation::validate_url("service.endpoint", endpoint)?;
        }

        crate::utils::validation::validate_path("output.path", self.output_path())?;

        if let Some(timeout) = self.service.timeout_seconds {
            crate::utils::validation::validate_positive_number(
                "service.timeout_seconds",
                timeout,
                1,
            )?;
        }

        Ok(())
    }
}

impl ConfigProvider for AppConfig {
    fn service_endpoint(&self) -> Option<&str> {
        self.service
            .endpoint
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty() && !e.contains("${"))
    }

    fn app_name(&self) -> &str {
        self.app.name.as_deref().unwrap_or(DEFAULT_APP_NAME)
    }

    fn output_path(&self) -> &str {
        self.output.path.as_deref().unwrap_or(DEFAULT_OUTPUT_PATH)
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.service
                .timeout_seconds
                .unwrap_or(DEFAULT_TIMEOUT_SECONDS),
        )
    }

    fn display_duration(&self) -> Duration {
        Duration::from_secs(
            self.output
                .display_seconds
                .unwrap_or(DEFAULT_DISPLAY_SECONDS),
        )
    }

    fn extra_headers(&self) -> Vec<(String, String)> {
        let mut headers: Vec<(String, String)> = self
            .service
            .headers
            .iter()
            .flatten()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        headers.sort();
        headers
    }

    fn verify_archive(&self) -> bool {
        self.service.verify_archive.unwrap_or(true)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[app]
name = "PrintMyCard"

[service]
endpoint = "https://cards.example.com"
timeout_seconds = 30
verify_archive = false

[service.headers]
ngrok-skip-browser-warning = "69420"

[output]
path = "./exports"
display_seconds = 3
"#;

        let config = AppConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.service_endpoint(), Some("https://cards.example.com"));
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.display_duration(), Duration::from_secs(3));
        assert_eq!(config.output_path(), "./exports");
        assert!(!config.verify_archive());
        assert_eq!(
            config.extra_headers(),
            vec![(
                "ngrok-skip-browser-warning".to_string(),
                "69420".to_string()
            )]
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_for_empty_file() {
        let config = AppConfig::from_toml_str("").unwrap();
        assert_eq!(config.service_endpoint(), None);
        assert_eq!(config.app_name(), "PrintMyCard");
        assert_eq!(config.output_path(), "./output");
        assert_eq!(config.request_timeout(), Duration::from_secs(60));
        assert!(config.verify_archive());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("PMC_TEST_ENDPOINT", "https://test.cards.com");

        let config = AppConfig::from_toml_str(
            r#"
[service]
endpoint = "${PMC_TEST_ENDPOINT}"
"#,
        )
        .unwrap();
        assert_eq!(config.service_endpoint(), Some("https://test.cards.com"));

        std::env::remove_var("PMC_TEST_ENDPOINT");
    }

    #[test]
    fn test_unresolved_variable_leaves_endpoint_unset() {
        let config = AppConfig::from_toml_str(
            r#"
[service]
endpoint = "${PMC_TEST_DEFINITELY_UNSET}"
"#,
        )
        .unwrap();
        assert_eq!(config.service_endpoint(), None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation() {
        let config = AppConfig::from_toml_str(
            r#"
[service]
endpoint = "ftp://cards.example.com"
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());

        let config = AppConfig::from_toml_str(
            r#"
[service]
timeout_seconds = 0
"#,
        )
        .unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[output]\npath = \"./from-file\"\n")
            .unwrap();

        let config = AppConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./from-file");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = AppConfig::from_toml_str("[service\nendpoint=").unwrap_err();
        assert!(matches!(err, CardError::ConfigError { .. }));
    }
}
