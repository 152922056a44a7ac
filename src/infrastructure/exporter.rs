//! 试卷导出 - 基础设施层
//!
//! 打印与 PDF 渲染都交给外部程序完成：
//! - `PrintExporter` 写出带自动打印脚本的 HTML，浏览器打开即弹出打印对话框
//! - `PdfExporter` 用无头 Chromium 把同一份 HTML 打印成 PDF

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use chromiumoxide::Browser;
use regex::Regex;
use tracing::{debug, info};

use crate::browser::launch_headless_browser;
use crate::error::ExportError;
use crate::models::QuestionPaper;
use crate::services::renderer::{render_html, RenderOptions};

/// 试卷导出器
#[allow(async_fn_in_trait)]
pub trait PaperExporter {
    /// 导出方式名称（用于日志和提示）
    fn name(&self) -> &'static str;

    /// 导出试卷，返回生成的文件路径
    async fn export(&self, paper: &QuestionPaper) -> Result<PathBuf, ExportError>;
}

/// 打印输出
pub struct PrintExporter {
    output_dir: PathBuf,
}

impl PrintExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }
}

impl PaperExporter for PrintExporter {
    fn name(&self) -> &'static str {
        "打印"
    }

    async fn export(&self, paper: &QuestionPaper) -> Result<PathBuf, ExportError> {
        let html = render_html(paper, RenderOptions { print_on_load: true });
        let path = output_path(&self.output_dir, paper.title(), "html");
        write_output(&path, html.as_bytes()).await?;
        info!("🖨️ 打印文件已生成: {}", path.display());
        Ok(path)
    }
}

/// PDF 导出
pub struct PdfExporter {
    output_dir: PathBuf,
    chrome_executable: Option<String>,
}

impl PdfExporter {
    pub fn new(output_dir: impl Into<PathBuf>, chrome_executable: Option<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            chrome_executable,
        }
    }
}

impl PaperExporter for PdfExporter {
    fn name(&self) -> &'static str {
        "PDF"
    }

    async fn export(&self, paper: &QuestionPaper) -> Result<PathBuf, ExportError> {
        let html = render_html(paper, RenderOptions::default());

        let (mut browser, handle) = launch_headless_browser(self.chrome_executable.as_deref())
            .await
            .map_err(|e| ExportError::BrowserLaunch(format!("{:#}", e)))?;

        let rendered = print_to_pdf(&browser, &html).await;

        if let Err(e) = browser.close().await {
            debug!("关闭浏览器失败: {}", e);
        }
        let _ = handle.await;

        let bytes = rendered?;
        let path = output_path(&self.output_dir, paper.title(), "pdf");
        write_output(&path, &bytes).await?;
        info!("📄 PDF 已生成: {} ({} 字节)", path.display(), bytes.len());
        Ok(path)
    }
}

async fn print_to_pdf(browser: &Browser, html: &str) -> Result<Vec<u8>, ExportError> {
    let page = browser
        .new_page("about:blank")
        .await
        .map_err(ExportError::render)?;
    page.set_content(html).await.map_err(ExportError::render)?;

    let params = PrintToPdfParams {
        print_background: Some(true),
        ..Default::default()
    };
    page.pdf(params).await.map_err(ExportError::render)
}

async fn write_output(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
    if let Some(dir) = path.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| ExportError::write_failed(dir.display().to_string(), e))?;
    }
    tokio::fs::write(path, bytes)
        .await
        .map_err(|e| ExportError::write_failed(path.display().to_string(), e))
}

/// `<output_dir>/<title>.<ext>`
pub fn output_path(output_dir: &Path, title: &str, extension: &str) -> PathBuf {
    output_dir.join(format!("{}.{}", sanitize_file_name(title), extension))
}

/// 替换文件名中不允许出现的字符
pub fn sanitize_file_name(name: &str) -> String {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    let re = INVALID.get_or_init(|| {
        Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("文件名正则无效")
    });

    let cleaned = re.replace_all(name.trim(), "_");
    if cleaned.is_empty() {
        "paper".to_string()
    } else {
        cleaned.into_owned()
    }
}
