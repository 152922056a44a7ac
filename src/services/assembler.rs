//! 组卷 - 业务能力层
//!
//! 根据当前选题生成试卷，只读取选题，不修改题库和选题集。

use tracing::{info, warn};

use crate::error::AssembleError;
use crate::models::{IdGenerator, PaperId, Question, QuestionPaper, SequentialIds};

/// 默认试卷标题前缀
pub const DEFAULT_TITLE_PREFIX: &str = "Question Paper";

/// 组卷器
pub struct PaperAssembler {
    ids: Box<dyn IdGenerator>,
    title_prefix: String,
}

impl PaperAssembler {
    pub fn new(title_prefix: impl Into<String>) -> Self {
        Self::with_id_generator(title_prefix, Box::new(SequentialIds::new()))
    }

    pub fn with_id_generator(title_prefix: impl Into<String>, ids: Box<dyn IdGenerator>) -> Self {
        Self {
            ids,
            title_prefix: title_prefix.into(),
        }
    }

    /// 组卷
    ///
    /// 学科和年级取自第一道题，不要求所有题目一致；
    /// 总分为各题分值之和（未设置按 0 计）。
    pub fn assemble(&mut self, selection: &[Question]) -> Result<QuestionPaper, AssembleError> {
        let first = selection.first().ok_or(AssembleError::EmptySelection)?;

        let mixed = selection
            .iter()
            .any(|q| q.subject != first.subject || q.class_name != first.class_name);
        if mixed {
            warn!(
                "⚠️ 选题包含不同学科或年级，试卷按第一题标记为 {} / {}",
                first.subject, first.class_name
            );
        }

        let total_marks = selection
            .iter()
            .fold(0u32, |sum, q| sum.saturating_add(q.marks_or_zero()));

        let id = PaperId(self.ids.next_id());
        let title = format!(
            "{} - {}",
            self.title_prefix,
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
        );

        info!(
            "📋 组卷完成: {} | {} 道题 | 总分 {}",
            title,
            selection.len(),
            total_marks
        );

        Ok(QuestionPaper::new(
            id,
            title,
            first.class_name.clone(),
            first.subject.clone(),
            total_marks,
            selection.to_vec(),
        ))
    }
}

impl Default for PaperAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE_PREFIX)
    }
}
