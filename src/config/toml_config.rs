use crate::adapters::SUPPORTED_EXTENSIONS;
use crate::core::ConfigProvider;
use crate::domain::ports::DEFAULT_ARCHIVE_NAME;
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{
    validate_file_extensions, validate_non_empty_list, validate_non_empty_string,
    validate_output_formats, validate_path, validate_positive_number, validate_range, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::LazyLock;

static ENV_VAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\$\{([^}]+)\}").unwrap_or_else(|e| panic!("invalid env var pattern: {}", e))
});

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub import: ImportConfig,
    pub load: LoadConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportConfig {
    pub name: String,
    pub inputs: Vec<String>,
    pub concurrent_documents: Option<usize>,
    pub document_timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: String,
    pub output_formats: Vec<String>,
    pub compression: Option<CompressionConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompressionConfig {
    pub enabled: bool,
    pub filename: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_level: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|e| EtlError::ConfigError {
                message: format!("Cannot read {}: {}", path.as_ref().display(), e),
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${REPORT_DIR})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> String {
        ENV_VAR
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_non_empty_string("import.name", &self.import.name)?;
        validate_non_empty_list("import.inputs", &self.import.inputs)?;
        validate_file_extensions("import.inputs", &self.import.inputs, &SUPPORTED_EXTENSIONS)?;
        validate_path("load.output_path", &self.load.output_path)?;
        validate_output_formats("load.output_formats", &self.load.output_formats)?;

        if let Some(concurrent) = self.import.concurrent_documents {
            validate_positive_number("import.concurrent_documents", concurrent, 1)?;
        }
        if let Some(timeout) = self.import.document_timeout_secs {
            validate_range("import.document_timeout_secs", timeout, 1, 3600)?;
        }
        if let Some(filename) = self.archive_filename_override() {
            if !filename.ends_with(".zip") {
                return Err(EtlError::InvalidConfigValueError {
                    field: "load.compression.filename".to_string(),
                    value: filename.to_string(),
                    reason: "Archive name must end with .zip".to_string(),
                });
            }
        }

        Ok(())
    }

    fn archive_filename_override(&self) -> Option<&str> {
        self.load
            .compression
            .as_ref()
            .and_then(|c| c.filename.as_deref())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn inputs(&self) -> &[String] {
        &self.import.inputs
    }

    fn output_path(&self) -> &str {
        &self.load.output_path
    }

    fn output_formats(&self) -> &[String] {
        &self.load.output_formats
    }

    fn compress_output(&self) -> bool {
        self.load.compression.as_ref().map(|c| c.enabled).unwrap_or(true)
    }

    fn concurrent_documents(&self) -> usize {
        self.import.concurrent_documents.unwrap_or(4)
    }

    fn document_timeout_secs(&self) -> Option<u64> {
        self.import.document_timeout_secs
    }

    fn archive_filename(&self) -> &str {
        self.archive_filename_override()
            .unwrap_or(DEFAULT_ARCHIVE_NAME)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
