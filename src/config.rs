use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;
use crate::services::assembler::DEFAULT_TITLE_PREFIX;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 导出文件（HTML / PDF）存放目录
    pub output_dir: String,
    /// 待导入的 TOML 题目集目录
    pub question_folder: String,
    /// 试卷标题前缀
    pub paper_title_prefix: String,
    /// 是否导出 PDF（需要本地 Chromium）
    pub export_pdf: bool,
    /// Chromium 可执行文件路径，未设置时自动查找
    pub chrome_executable: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: "output".to_string(),
            question_folder: "questions".to_string(),
            paper_title_prefix: DEFAULT_TITLE_PREFIX.to_string(),
            export_pdf: false,
            chrome_executable: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 读取 TOML 配置文件，缺失的字段取默认值，再叠加环境变量
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Ok(Self::from_toml_str(&content)?.with_env_overrides())
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    fn with_env_overrides(self) -> Self {
        Self {
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(self.output_dir),
            question_folder: std::env::var("QUESTION_FOLDER").unwrap_or(self.question_folder),
            paper_title_prefix: std::env::var("PAPER_TITLE_PREFIX").unwrap_or(self.paper_title_prefix),
            export_pdf: std::env::var("EXPORT_PDF").ok().and_then(|v| v.parse().ok()).unwrap_or(self.export_pdf),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok().or(self.chrome_executable),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }
}
