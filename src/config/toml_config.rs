use crate::app::export::{PdfOptions, DEFAULT_FILE_PREFIX};
use crate::app::session::ExportSettings;
use crate::core::fallback::DEFAULT_CSV_URL;
use crate::core::i18n::Language;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PickerError, Result};
use crate::utils::validation::{validate_path, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub export: ExportConfig,
    #[serde(default)]
    pub preferences: PreferencesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub csv_url: String,
    pub timeout_seconds: Option<u64>,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            csv_url: DEFAULT_CSV_URL.to_string(),
            timeout_seconds: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    pub backfill_prices: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub file_prefix: Option<String>,
    pub brand: Option<String>,
    pub footer: Option<String>,
    pub compress: Option<bool>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: "./output".to_string(),
            file_prefix: None,
            brand: None,
            footer: None,
            compress: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesConfig {
    /// Where `preferences.json` lives; defaults to the output path.
    pub state_dir: Option<String>,
    /// Forces a language instead of the saved preference.
    pub language: Option<String>,
}

impl AppConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(PickerError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 未指定路徑時使用預設值；指定的檔案不存在則回傳錯誤
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) if path.as_ref().exists() => Self::from_file(path),
            Some(path) => Err(PickerError::ConfigError {
                message: format!("Config file not found: {}", path.as_ref().display()),
            }),
            None => Ok(Self::default()),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| PickerError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CSV_URL})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| PickerError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_url("source.csv_url", &self.source.csv_url)?;
        validate_path("export.output_path", &self.export.output_path)?;

        if let Some(timeout) = self.source.timeout_seconds {
            validate_range("source.timeout_seconds", timeout, 1, 300)?;
        }

        if let Some(dir) = &self.preferences.state_dir {
            validate_path("preferences.state_dir", dir)?;
        }

        if let Some(code) = &self.preferences.language {
            if Language::from_code(code).is_none() {
                return Err(PickerError::InvalidConfigValueError {
                    field: "preferences.language".to_string(),
                    value: code.clone(),
                    reason: "Supported languages: en, es, ja".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn state_dir(&self) -> &str {
        self.preferences
            .state_dir
            .as_deref()
            .unwrap_or(&self.export.output_path)
    }

    pub fn language_override(&self) -> Option<Language> {
        self.preferences.language.as_deref().and_then(Language::from_code)
    }

    pub fn export_settings(&self) -> ExportSettings {
        let defaults = ExportSettings::default();
        ExportSettings {
            file_prefix: self.file_prefix().to_string(),
            pdf: PdfOptions {
                brand: self.export.brand.clone().unwrap_or(defaults.pdf.brand),
                footer: self.export.footer.clone().or(defaults.pdf.footer),
                compress: self.export.compress.unwrap_or(defaults.pdf.compress),
            },
        }
    }
}

impl ConfigProvider for AppConfig {
    fn csv_url(&self) -> &str {
        &self.source.csv_url
    }

    fn output_path(&self) -> &str {
        &self.export.output_path
    }

    fn file_prefix(&self) -> &str {
        self.export.file_prefix.as_deref().unwrap_or(DEFAULT_FILE_PREFIX)
    }

    fn request_timeout_seconds(&self) -> u64 {
        self.source.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECONDS)
    }

    fn backfill_prices(&self) -> bool {
        self.catalog.backfill_prices.unwrap_or(false)
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
