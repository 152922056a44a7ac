//! 题库 - 业务能力层
//!
//! 内存中的题目集合，持有所有题目的权威记录。

use tracing::{debug, info};

use crate::error::RepositoryError;
use crate::models::{IdGenerator, Question, QuestionFields, QuestionId, SequentialIds};
use crate::services::selection::SelectionSet;

/// 题库筛选条件
///
/// 为空或空字符串的条件不参与筛选；匹配为区分大小写的完全相等
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuestionFilter {
    pub subject: Option<String>,
    pub class_name: Option<String>,
}

impl QuestionFilter {
    pub fn new(subject: Option<&str>, class_name: Option<&str>) -> Self {
        Self {
            subject: subject.map(str::to_string),
            class_name: class_name.map(str::to_string),
        }
    }

    pub fn matches(&self, question: &Question) -> bool {
        field_matches(self.subject.as_deref(), &question.subject)
            && field_matches(self.class_name.as_deref(), &question.class_name)
    }
}

fn field_matches(wanted: Option<&str>, actual: &str) -> bool {
    match wanted {
        Some(w) if !w.is_empty() => w == actual,
        _ => true,
    }
}

/// 题库
pub struct QuestionRepository {
    questions: Vec<Question>,
    ids: Box<dyn IdGenerator>,
}

impl QuestionRepository {
    /// 使用默认的递增 ID 生成器
    pub fn new() -> Self {
        Self::with_id_generator(Box::new(SequentialIds::new()))
    }

    /// 注入自定义 ID 生成器
    pub fn with_id_generator(ids: Box<dyn IdGenerator>) -> Self {
        Self {
            questions: Vec::new(),
            ids,
        }
    }

    /// 新增题目并分配 ID
    pub fn add(&mut self, fields: QuestionFields) -> QuestionId {
        let id = QuestionId(self.ids.next_id());
        self.questions.push(Question::from_fields(id, fields));
        info!("✓ 题目 {} 已加入题库，当前共 {} 题", id, self.questions.len());
        id
    }

    /// 用新字段替换题目（ID 不变）
    pub fn update(&mut self, id: QuestionId, fields: QuestionFields) -> Result<(), RepositoryError> {
        let question = self
            .questions
            .iter_mut()
            .find(|q| q.id == id)
            .ok_or(RepositoryError::NotFound(id))?;

        question.replace_fields(fields);
        info!("✓ 题目 {} 已更新", id);
        Ok(())
    }

    /// 删除题目，并同步从选题集中移除
    ///
    /// 即使题库中不存在该 ID，选题集中的同名条目也会被清除
    pub fn remove(
        &mut self,
        id: QuestionId,
        selection: &mut SelectionSet,
    ) -> Result<Question, RepositoryError> {
        if selection.deselect(id) {
            debug!("删除题目 {} 时同步取消选题", id);
        }

        let index = self
            .questions
            .iter()
            .position(|q| q.id == id)
            .ok_or(RepositoryError::NotFound(id))?;

        let removed = self.questions.remove(index);
        info!("🗑️ 题目 {} 已删除，剩余 {} 题", id, self.questions.len());
        Ok(removed)
    }

    pub fn get(&self, id: QuestionId) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }

    /// 按插入顺序返回满足筛选条件的题目
    pub fn list(&self, filter: &QuestionFilter) -> Vec<&Question> {
        self.questions.iter().filter(|q| filter.matches(q)).collect()
    }

    pub fn all(&self) -> &[Question] {
        &self.questions
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// 所有出现过的学科（按首次出现顺序去重）
    pub fn subjects(&self) -> Vec<&str> {
        distinct(self.questions.iter().map(|q| q.subject.as_str()))
    }

    /// 所有出现过的年级（按首次出现顺序去重）
    pub fn classes(&self) -> Vec<&str> {
        distinct(self.questions.iter().map(|q| q.class_name.as_str()))
    }
}

impl Default for QuestionRepository {
    fn default() -> Self {
        Self::new()
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let mut seen = Vec::new();
    for v in values {
        if !seen.contains(&v) {
            seen.push(v);
        }
    }
    seen
}
