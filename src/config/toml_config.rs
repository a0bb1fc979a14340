use crate::domain::model::{LogFormat, ReportFormat};
use crate::utils::error::{Result, ToolboxError};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_FILE: &str = "toolbox.toml";
pub const DEFAULT_COMBINE_OUTPUT: &str = "combined.pdf";
pub const DEFAULT_TOP_WORDS: usize = 10;
pub const MAX_RENAME_START: usize = 1_000_000_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub logging: Option<LoggingConfig>,
    pub monitoring: Option<MonitoringConfig>,
    pub rename: Option<RenameConfig>,
    pub combine: Option<CombineConfig>,
    pub analyze: Option<AnalyzeConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub format: Option<LogFormat>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenameConfig {
    pub prefix: Option<String>,
    pub suffix: Option<String>,
    pub numbered: Option<bool>,
    pub start: Option<usize>,
    pub pad: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CombineConfig {
    pub output: Option<PathBuf>,
    pub overwrite: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyzeConfig {
    pub top: Option<usize>,
    pub format: Option<ReportFormat>,
    pub exclude_stopwords: Option<bool>,
    pub extra_stopwords: Option<Vec<String>>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolboxError::FileNotFound {
                path: path.as_ref().display().to_string(),
            },
            _ => ToolboxError::IoError(e),
        })?;
        Self::from_toml_str(&content)
    }

    /// 明確指定的檔案必須存在；未指定時才嘗試 ./toolbox.toml
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::from_file(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => Ok(Self::default()),
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ToolboxError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${HOME})，未定義的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ToolboxError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        if let Some(level) = self.logging.as_ref().and_then(|l| l.level.as_deref()) {
            let directive = if level.contains('=') {
                level.to_string()
            } else {
                format!("file_toolbox={}", level)
            };
            for part in directive.split(',') {
                part.parse::<tracing_subscriber::filter::Directive>()
                    .map_err(|e| ToolboxError::InvalidConfigValueError {
                        field: "logging.level".to_string(),
                        value: level.to_string(),
                        reason: format!("Invalid log directive: {}", e),
                    })?;
            }
        }

        if let Some(rename) = &self.rename {
            if let Some(prefix) = &rename.prefix {
                validation::validate_name_fragment("rename.prefix", prefix)?;
            }
            if let Some(suffix) = &rename.suffix {
                validation::validate_name_fragment("rename.suffix", suffix)?;
            }
            if let Some(start) = rename.start {
                validation::validate_range("rename.start", start, 0, MAX_RENAME_START)?;
            }
            if let Some(pad) = rename.pad {
                validation::validate_range("rename.pad", pad, 0, 32)?;
            }
        }

        if let Some(output) = self.combine.as_ref().and_then(|c| c.output.as_ref()) {
            validation::validate_path("combine.output", output)?;
            validation::validate_file_extensions("combine.output", &[output], &["pdf"])?;
        }

        if let Some(top) = self.analyze.as_ref().and_then(|a| a.top) {
            validation::validate_range("analyze.top", top, 1, 1000)?;
        }

        Ok(())
    }

    /// 取得監控設定
    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn log_format(&self) -> Option<LogFormat> {
        self.logging.as_ref().and_then(|l| l.format)
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn rename(&self) -> RenameConfig {
        self.rename.clone().unwrap_or_default()
    }

    pub fn combine(&self) -> CombineConfig {
        self.combine.clone().unwrap_or_default()
    }

    pub fn analyze(&self) -> AnalyzeConfig {
        self.analyze.clone().unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
