//! # Question Paper
//!
//! 一个用于录入题目、挑选题目并组成试卷的 Rust 库
//!
//! ## 架构设计
//!
//! 本系统采用四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 打印与 PDF 导出，持有外部资源（浏览器）
//! - `browser/` - 无头浏览器的启动
//!
//! ### ② 业务能力层（Services）
//! - `QuestionRepository` - 内存题库，增删改查
//! - `SelectionSet` - 选题集，保存带分值的题目副本
//! - `PaperAssembler` - 由选题生成试卷
//! - `renderer` - 试卷渲染为可打印 HTML
//!
//! ### ③ 流程层（Workflow）
//! - `QuestionForm` - 新建 / 编辑题目的表单状态机
//!
//! ### ④ 编排层（Orchestration）
//! - `App` - 会话状态与页签切换，错误在此转换为提示
//!
//! ## 模块结构

pub mod browser;
pub mod config;
pub mod error;
pub mod image;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult};
pub use image::{ImageFrame, ImageRef};
pub use infrastructure::{PaperExporter, PdfExporter, PrintExporter};
pub use models::{Answer, Question, QuestionFields, QuestionId, QuestionPaper};
pub use orchestrator::{App, Tab};
pub use services::{PaperAssembler, QuestionFilter, QuestionRepository, SelectionSet};
pub use workflow::QuestionForm;
