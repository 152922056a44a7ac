//! 图片接入与图片框拖拽/缩放
//!
//! 图片在系统内只以不透明字符串句柄（data URI 或 URL）流转，不做格式校验。

pub mod frame;
pub mod ingest;

pub use frame::{Handle, ImageFrame, Interaction, Point, Size};
pub use ingest::ImageRef;
