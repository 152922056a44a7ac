use serde::{Deserialize, Serialize};

use crate::models::ids::PaperId;
use crate::models::question::Question;

/// 组好的试卷
///
/// 组卷后不可修改，重新组卷会整体替换
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionPaper {
    id: PaperId,
    title: String,
    #[serde(rename = "class")]
    class_name: String,
    subject: String,
    total_marks: u32,
    questions: Vec<Question>,
}

impl QuestionPaper {
    pub(crate) fn new(
        id: PaperId,
        title: String,
        class_name: String,
        subject: String,
        total_marks: u32,
        questions: Vec<Question>,
    ) -> Self {
        Self {
            id,
            title,
            class_name,
            subject,
            total_marks,
            questions,
        }
    }

    pub fn id(&self) -> PaperId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn total_marks(&self) -> u32 {
        self.total_marks
    }

    /// 按选题顺序排列的题目
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// 是否混入了不同学科或年级的题目
    pub fn is_mixed(&self) -> bool {
        self.questions
            .iter()
            .any(|q| q.subject != self.subject || q.class_name != self.class_name)
    }
}
