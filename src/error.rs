use std::fmt;

use thiserror::Error;

use crate::models::{AnswerId, QuestionId};

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 表单校验错误
    #[error("校验错误: {0}")]
    Validation(#[from] ValidationError),
    /// 表单操作错误
    #[error("表单错误: {0}")]
    Form(#[from] FormError),
    /// 题库错误
    #[error("题库错误: {0}")]
    Repository(#[from] RepositoryError),
    /// 选题错误
    #[error("选题错误: {0}")]
    Selection(#[from] SelectionError),
    /// 组卷错误
    #[error("组卷错误: {0}")]
    Assemble(#[from] AssembleError),
    /// 导出错误
    #[error("导出错误: {0}")]
    Export(#[from] ExportError),
    /// 图片错误
    #[error("图片错误: {0}")]
    Image(#[from] ImageError),
    /// 配置错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
}

/// 必填字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    /// 题干
    Text,
    /// 学科
    Subject,
    /// 年级
    Class,
    /// 第 n 个答案的文本（从 0 开始）
    AnswerText(usize),
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredField::Text => write!(f, "题干"),
            RequiredField::Subject => write!(f, "学科"),
            RequiredField::Class => write!(f, "年级"),
            RequiredField::AnswerText(index) => write!(f, "答案 {}", index + 1),
        }
    }
}

/// 提交时必填字段缺失
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("缺少必填字段: {}", format_fields(.missing))]
pub struct ValidationError {
    pub missing: Vec<RequiredField>,
}

fn format_fields(fields: &[RequiredField]) -> String {
    fields
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// 表单操作错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    /// 至少保留一个答案
    #[error("至少需要保留一个答案")]
    LastAnswer,
    /// 答案不存在
    #[error("答案 {0} 不存在")]
    UnknownAnswer(AnswerId),
}

/// 题库错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// 题目不存在
    #[error("题目 {0} 不存在")]
    NotFound(QuestionId),
}

/// 选题错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    /// 重复选题
    #[error("题目 {0} 已被选中")]
    AlreadySelected(QuestionId),
}

/// 组卷错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssembleError {
    /// 没有选中任何题目
    #[error("没有选中任何题目，无法组卷")]
    EmptySelection,
}

/// 导出错误
#[derive(Debug, Error)]
pub enum ExportError {
    /// 启动浏览器失败
    #[error("启动浏览器失败: {0}")]
    BrowserLaunch(String),
    /// 渲染页面失败
    #[error("渲染失败: {source}")]
    Render {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 图片读取错误
#[derive(Debug, Error)]
pub enum ImageError {
    /// 读取文件失败
    #[error("读取图片失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// 解析配置文件失败
    #[error("解析配置失败: {0}")]
    TomlParseFailed(#[from] toml::de::Error),
}

// ========== 便捷构造函数 ==========

impl ExportError {
    /// 包装渲染阶段的第三方错误
    pub fn render(source: impl std::error::Error + Send + Sync + 'static) -> Self {
        ExportError::Render {
            source: Box::new(source),
        }
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<String>, source: std::io::Error) -> Self {
        ExportError::WriteFailed {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
