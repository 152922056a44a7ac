use std::fmt;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ImageError;

/// 图片句柄
///
/// data URI 或远程 URL，可直接放进 `<img src>`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    /// 使用粘贴的引用（URL 或 data URI），空字符串视为没有图片
    pub fn from_reference(reference: impl Into<String>) -> Option<Self> {
        let reference = reference.into();
        if reference.trim().is_empty() {
            None
        } else {
            Some(Self(reference))
        }
    }

    /// 读取本地图片文件并编码为 data URI
    pub async fn from_file(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|source| ImageError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;

        let mime = mime_for(path);
        debug!("读取图片 {} ({} 字节, {})", path.display(), bytes.len(), mime);

        Ok(Self::from_bytes(mime, &bytes))
    }

    /// 由原始字节构造 data URI
    pub fn from_bytes(mime: &str, bytes: &[u8]) -> Self {
        Self(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_uri(&self) -> bool {
        self.0.starts_with("data:")
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_data_uri() {
            // data URI 可能很长，只显示头部
            let head = self.0.split(',').next().unwrap_or_default();
            write!(f, "{},...", head)
        } else {
            write!(f, "{}", self.0)
        }
    }
}

/// 按扩展名猜测 MIME 类型
fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_reference_is_no_image() {
        assert_eq!(ImageRef::from_reference(""), None);
        assert_eq!(ImageRef::from_reference("   "), None);
        let url = ImageRef::from_reference("https://example.com/a.png").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a.png");
        assert!(!url.is_data_uri());
    }

    #[test]
    fn test_from_bytes_builds_data_uri() {
        let img = ImageRef::from_bytes("image/png", b"abc");
        assert_eq!(img.as_str(), "data:image/png;base64,YWJj");
        assert_eq!(img.to_string(), "data:image/png;base64,...");
    }

    #[test]
    fn test_mime_guess() {
        assert_eq!(mime_for(Path::new("a.PNG")), "image/png");
        assert_eq!(mime_for(Path::new("photo.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("noext")), "application/octet-stream");
    }

    #[tokio::test]
    async fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.gif");
        std::fs::write(&path, b"GIF").unwrap();

        let img = ImageRef::from_file(&path).await.unwrap();
        assert_eq!(img.as_str(), "data:image/gif;base64,R0lG");
    }

    #[test]
    fn test_from_missing_file() {
        let err = tokio_test::block_on(ImageRef::from_file("/no/such/image.png")).unwrap_err();
        assert!(matches!(err, ImageError::ReadFailed { .. }));
    }
}
