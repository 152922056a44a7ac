use serde::{Deserialize, Serialize};

use crate::image::ImageRef;
use crate::models::ids::{AnswerId, QuestionId};

/// 答案
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub id: AnswerId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageRef>,
}

impl Answer {
    /// 创建空白答案行
    pub fn blank(id: AnswerId) -> Self {
        Self {
            id,
            text: String::new(),
            image_url: None,
        }
    }
}

/// 题目除 ID 以外的全部字段
///
/// 由录入表单产出，交给题库创建或更新
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionFields {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageRef>,
    pub subject: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub answers: Vec<Answer>,
}

/// 题目
///
/// `marks` 只有在选入试卷后才有意义，题库中的原始记录为 `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: QuestionId,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<ImageRef>,
    pub subject: String,
    #[serde(rename = "class")]
    pub class_name: String,
    pub answers: Vec<Answer>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub marks: Option<u32>,
}

impl Question {
    /// 由字段组装题目记录
    pub fn from_fields(id: QuestionId, fields: QuestionFields) -> Self {
        Self {
            id,
            text: fields.text,
            image_url: fields.image_url,
            subject: fields.subject,
            class_name: fields.class_name,
            answers: fields.answers,
            marks: None,
        }
    }

    /// 用新字段整体替换，保留 ID
    pub fn replace_fields(&mut self, fields: QuestionFields) {
        *self = Self::from_fields(self.id, fields);
    }

    /// 拆出可编辑字段
    pub fn fields(&self) -> QuestionFields {
        QuestionFields {
            text: self.text.clone(),
            image_url: self.image_url.clone(),
            subject: self.subject.clone(),
            class_name: self.class_name.clone(),
            answers: self.answers.clone(),
        }
    }

    /// 生成带分值的副本（用于选题）
    pub fn with_marks(&self, marks: u32) -> Self {
        Self {
            marks: Some(marks),
            ..self.clone()
        }
    }

    /// 未设置分值时按 0 计
    pub fn marks_or_zero(&self) -> u32 {
        self.marks.unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields(text: &str) -> QuestionFields {
        QuestionFields {
            text: text.to_string(),
            image_url: None,
            subject: "Math".to_string(),
            class_name: "5".to_string(),
            answers: vec![Answer {
                id: AnswerId(1),
                text: "4".to_string(),
                image_url: None,
            }],
        }
    }

    #[test]
    fn test_replace_fields_keeps_id_and_drops_marks() {
        let mut q = Question::from_fields(QuestionId(3), sample_fields("2+2=?")).with_marks(5);
        q.replace_fields(sample_fields("3+3=?"));
        assert_eq!(q.id, QuestionId(3));
        assert_eq!(q.text, "3+3=?");
        assert_eq!(q.marks, None);
    }

    #[test]
    fn test_with_marks_is_a_copy() {
        let original = Question::from_fields(QuestionId(1), sample_fields("2+2=?"));
        let copy = original.with_marks(10);
        assert_eq!(copy.marks, Some(10));
        assert_eq!(original.marks, None);
        assert_eq!(original.marks_or_zero(), 0);
    }
}
