//! 题目录入表单 - 流程层
//!
//! 两种模式：
//! - `Creating`：新建题目，提交时不带 ID，提交后表单清空
//! - `Editing`：编辑已有题目，提交时带回原 ID，表单保持内容
//!
//! 答案至少保留一行；题干、学科、年级和每个答案的文本都是必填项。

use tracing::debug;

use crate::error::{FormError, RequiredField, ValidationError};
use crate::image::ImageRef;
use crate::models::{Answer, AnswerId, Question, QuestionFields, QuestionId};

/// 表单模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Creating,
    Editing(QuestionId),
}

/// 表单提交结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSubmission {
    /// 编辑模式下为原题目 ID，新建模式下为 `None`
    pub id: Option<QuestionId>,
    pub fields: QuestionFields,
}

/// 题目录入表单
#[derive(Debug, Clone)]
pub struct QuestionForm {
    mode: FormMode,
    text: String,
    image: Option<ImageRef>,
    subject: String,
    class_name: String,
    answers: Vec<Answer>,
    next_answer_id: u64,
}

impl QuestionForm {
    /// 新建模式，带一个空白答案
    pub fn new() -> Self {
        Self {
            mode: FormMode::Creating,
            text: String::new(),
            image: None,
            subject: String::new(),
            class_name: String::new(),
            answers: vec![Answer::blank(AnswerId(1))],
            next_answer_id: 2,
        }
    }

    /// 编辑模式，用已有题目填充所有字段
    pub fn editing(question: &Question) -> Self {
        let mut next_answer_id = question
            .answers
            .iter()
            .map(|a| a.id.0)
            .max()
            .unwrap_or(0)
            + 1;

        let mut answers = question.answers.clone();
        if answers.is_empty() {
            answers.push(Answer::blank(AnswerId(next_answer_id)));
            next_answer_id += 1;
        }

        Self {
            mode: FormMode::Editing(question.id),
            text: question.text.clone(),
            image: question.image_url.clone(),
            subject: question.subject.clone(),
            class_name: question.class_name.clone(),
            answers,
            next_answer_id,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn set_image(&mut self, image: Option<ImageRef>) {
        self.image = image;
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn set_class_name(&mut self, class_name: impl Into<String>) {
        self.class_name = class_name.into();
    }

    /// 追加一个空白答案，返回其 ID
    pub fn add_answer(&mut self) -> AnswerId {
        let id = AnswerId(self.next_answer_id);
        self.next_answer_id += 1;
        self.answers.push(Answer::blank(id));
        debug!("添加答案 {}，当前共 {} 个", id, self.answers.len());
        id
    }

    /// 删除答案；只剩一个时拒绝
    pub fn remove_answer(&mut self, id: AnswerId) -> Result<(), FormError> {
        let index = self.answer_index(id)?;
        if self.answers.len() <= 1 {
            return Err(FormError::LastAnswer);
        }
        self.answers.remove(index);
        Ok(())
    }

    pub fn set_answer_text(&mut self, id: AnswerId, text: impl Into<String>) -> Result<(), FormError> {
        let index = self.answer_index(id)?;
        self.answers[index].text = text.into();
        Ok(())
    }

    pub fn set_answer_image(&mut self, id: AnswerId, image: Option<ImageRef>) -> Result<(), FormError> {
        let index = self.answer_index(id)?;
        self.answers[index].image_url = image;
        Ok(())
    }

    /// 检查必填字段，返回所有缺失项
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut missing = Vec::new();
        if is_blank(&self.text) {
            missing.push(RequiredField::Text);
        }
        if is_blank(&self.subject) {
            missing.push(RequiredField::Subject);
        }
        if is_blank(&self.class_name) {
            missing.push(RequiredField::Class);
        }
        for (index, answer) in self.answers.iter().enumerate() {
            if is_blank(&answer.text) {
                missing.push(RequiredField::AnswerText(index));
            }
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { missing })
        }
    }

    /// 提交表单
    ///
    /// 校验失败时表单内容保持不变；新建模式提交成功后表单重置
    pub fn submit(&mut self) -> Result<FormSubmission, ValidationError> {
        self.validate()?;

        let fields = QuestionFields {
            text: self.text.clone(),
            image_url: self.image.clone(),
            subject: self.subject.clone(),
            class_name: self.class_name.clone(),
            answers: self.answers.clone(),
        };

        let submission = match self.mode {
            FormMode::Editing(id) => FormSubmission {
                id: Some(id),
                fields,
            },
            FormMode::Creating => {
                *self = Self::new();
                FormSubmission { id: None, fields }
            }
        };

        Ok(submission)
    }

    fn answer_index(&self, id: AnswerId) -> Result<usize, FormError> {
        self.answers
            .iter()
            .position(|a| a.id == id)
            .ok_or(FormError::UnknownAnswer(id))
    }
}

impl Default for QuestionForm {
    fn default() -> Self {
        Self::new()
    }
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
