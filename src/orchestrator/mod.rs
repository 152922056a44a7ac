//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层持有会话状态，把用户操作分派给下层能力，并把各组件的错误
//! 转换成面向用户的提示。
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (会话状态 / 页签 / 提示)
//!     ↓
//! workflow::QuestionForm (单道题的录入流程)
//!     ↓
//! services (题库 / 选题 / 组卷 / 渲染)
//!     ↓
//! infrastructure (导出：打印 HTML / PDF)
//! ```

pub mod app;

pub use app::{App, ImportStats, Notice, NoticeLevel, Tab};
