use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tokio::fs;

/// TOML 题目集中的一道题
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedQuestion {
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
    pub subject: String,
    #[serde(rename = "class", deserialize_with = "deserialize_tag")]
    pub class_name: String,
    /// 设置了分值的题目会被自动选入试卷
    #[serde(default)]
    pub marks: Option<u32>,
    #[serde(default)]
    pub answers: Vec<ImportedAnswer>,
}

/// TOML 题目集中的一个答案
#[derive(Debug, Clone, Deserialize)]
pub struct ImportedAnswer {
    pub text: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// 一个 TOML 文件对应的题目集
#[derive(Debug, Clone, Deserialize)]
pub struct QuestionSet {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub questions: Vec<ImportedQuestion>,
    #[serde(skip)]
    pub file_path: Option<String>,
}

// 年级既可能写成字符串也可能写成整数
fn deserialize_tag<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::Visitor;
    use std::fmt;

    struct TagVisitor;

    impl<'de> Visitor<'de> for TagVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a string or integer tag")
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(TagVisitor)
}

/// 从 TOML 文件加载题目集
pub async fn load_toml_to_question_set(toml_file_path: &Path) -> Result<QuestionSet> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取TOML文件: {}", toml_file_path.display()))?;

    let mut set: QuestionSet = toml::from_str(&content)
        .with_context(|| format!("无法解析TOML文件: {}", toml_file_path.display()))?;

    set.file_path = Some(toml_file_path.to_string_lossy().to_string());

    Ok(set)
}

/// 加载文件夹中所有 TOML 题目集，按文件名排序
///
/// 解析失败的文件会被跳过并记录警告
pub async fn load_all_toml_files(folder_path: &str) -> Result<Vec<QuestionSet>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        anyhow::bail!("文件夹不存在: {}", folder_path);
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .with_context(|| format!("无法读取文件夹: {}", folder_path))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut sets = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_question_set(&path).await {
            Ok(set) => {
                tracing::info!("成功加载 {} 道题目", set.questions.len());
                sets.push(set);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {:#}", path.display(), e);
            }
        }
    }

    Ok(sets)
}
