//! 选题集 - 业务能力层
//!
//! 记录被选入试卷的题目（附带选题时设置的分值）。
//! 选题列表与 ID 集合始终同步修改，二者不会出现分歧。

use std::collections::HashSet;

use tracing::debug;

use crate::error::SelectionError;
use crate::models::{Question, QuestionId};

/// 选题集
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    entries: Vec<Question>,
    ids: HashSet<QuestionId>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// 选入题目
    ///
    /// 存入的是题目副本，分值取 `marks_override`（缺省为 0），
    /// 与题库中的原始记录互不影响。已选中的题目会被拒绝。
    pub fn select(
        &mut self,
        question: &Question,
        marks_override: Option<u32>,
    ) -> Result<(), SelectionError> {
        if self.ids.contains(&question.id) {
            return Err(SelectionError::AlreadySelected(question.id));
        }

        let marks = marks_override.unwrap_or(0);
        self.entries.push(question.with_marks(marks));
        self.ids.insert(question.id);
        debug!("选入题目 {} ({} 分)，当前共 {} 题", question.id, marks, self.entries.len());

        Ok(())
    }

    /// 取消选题；未选中时什么也不做并返回 `false`
    pub fn deselect(&mut self, id: QuestionId) -> bool {
        if !self.ids.remove(&id) {
            return false;
        }
        self.entries.retain(|q| q.id != id);
        debug!("取消选题 {}，当前共 {} 题", id, self.entries.len());
        true
    }

    pub fn contains(&self, id: QuestionId) -> bool {
        self.ids.contains(&id)
    }

    /// 按选入顺序排列的题目副本
    pub fn entries(&self) -> &[Question] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total_marks(&self) -> u32 {
        self.entries
            .iter()
            .fold(0u32, |sum, q| sum.saturating_add(q.marks_or_zero()))
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.ids.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Answer, AnswerId, QuestionFields};

    fn question(id: u64) -> Question {
        Question::from_fields(
            QuestionId(id),
            QuestionFields {
                text: format!("question {}", id),
                image_url: None,
                subject: "Math".to_string(),
                class_name: "5".to_string(),
                answers: vec![Answer {
                    id: AnswerId(1),
                    text: "x".to_string(),
                    image_url: None,
                }],
            },
        )
    }

    /// 列表中的 ID 与集合完全一致且无重复
    fn assert_consistent(set: &SelectionSet) {
        let listed: HashSet<QuestionId> = set.entries().iter().map(|q| q.id).collect();
        assert_eq!(listed.len(), set.entries().len(), "选题列表出现重复");
        assert_eq!(listed, set.ids);
    }

    #[test]
    fn test_select_appends_copy_with_marks() {
        let mut set = SelectionSet::new();
        let q = question(1);
        set.select(&q, Some(7)).unwrap();

        assert!(set.contains(q.id));
        assert_eq!(set.entries()[0].marks, Some(7));
        assert_eq!(q.marks, None);
    }

    #[test]
    fn test_select_without_override_defaults_to_zero() {
        let mut set = SelectionSet::new();
        set.select(&question(1), None).unwrap();
        assert_eq!(set.entries()[0].marks, Some(0));
    }

    #[test]
    fn test_double_select_is_rejected() {
        let mut set = SelectionSet::new();
        let q = question(1);
        set.select(&q, Some(3)).unwrap();

        let err = set.select(&q, Some(9)).unwrap_err();
        assert_eq!(err, SelectionError::AlreadySelected(q.id));
        assert_eq!(set.len(), 1);
        assert_eq!(set.entries()[0].marks, Some(3));
        assert_consistent(&set);
    }

    #[test]
    fn test_deselect_unknown_is_noop() {
        let mut set = SelectionSet::new();
        set.select(&question(1), Some(2)).unwrap();

        assert!(!set.deselect(QuestionId(42)));
        assert_eq!(set.len(), 1);
        assert_consistent(&set);
    }

    #[test]
    fn test_order_is_selection_order() {
        let mut set = SelectionSet::new();
        for id in [3, 1, 2] {
            set.select(&question(id), None).unwrap();
        }
        let order: Vec<u64> = set.entries().iter().map(|q| q.id.0).collect();
        assert_eq!(order, vec![3, 1, 2]);
    }

    #[test]
    fn test_invariant_holds_over_mixed_operations() {
        let mut set = SelectionSet::new();
        let ops: &[(bool, u64)] = &[
            (true, 1),
            (true, 2),
            (true, 1),
            (false, 3),
            (true, 3),
            (false, 2),
            (true, 2),
            (false, 1),
            (false, 1),
            (true, 4),
        ];

        for &(is_select, id) in ops {
            if is_select {
                let _ = set.select(&question(id), Some(id as u32));
            } else {
                set.deselect(QuestionId(id));
            }
            assert_consistent(&set);
        }

        let order: Vec<u64> = set.entries().iter().map(|q| q.id.0).collect();
        assert_eq!(order, vec![3, 2, 4]);
        assert_eq!(set.total_marks(), 9);
    }

    #[test]
    fn test_clear() {
        let mut set = SelectionSet::new();
        set.select(&question(1), None).unwrap();
        set.clear();
        assert!(set.is_empty());
        assert!(!set.contains(QuestionId(1)));
    }
}
