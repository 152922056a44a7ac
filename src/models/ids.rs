//! 标识符与 ID 生成器
//!
//! 题目、答案、试卷各自使用独立的新类型 ID，避免混用。
//! ID 由显式注入的生成器分配，不依赖系统时间。

use serde::{Deserialize, Serialize};
use std::fmt;

/// 题目 ID（全局唯一，创建后不可变）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuestionId(pub u64);

/// 答案 ID（在所属题目内唯一）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerId(pub u64);

/// 试卷 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaperId(pub u64);

impl fmt::Display for QuestionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.0)
    }
}

impl fmt::Display for AnswerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "A{}", self.0)
    }
}

impl fmt::Display for PaperId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// ID 生成器
///
/// 每次调用返回一个从未返回过的值
pub trait IdGenerator: Send {
    fn next_id(&mut self) -> u64;
}

/// 单调递增计数器
#[derive(Debug, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    /// 从 1 开始计数
    pub fn new() -> Self {
        Self::starting_at(1)
    }

    /// 从指定值开始计数
    pub fn starting_at(first: u64) -> Self {
        Self { next: first }
    }
}

impl Default for SequentialIds {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator for SequentialIds {
    fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sequential_ids_never_repeat() {
        let mut ids = SequentialIds::new();
        let taken: Vec<u64> = (0..5).map(|_| ids.next_id()).collect();
        assert_eq!(taken, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_display_prefixes() {
        assert_eq!(QuestionId(7).to_string(), "Q7");
        assert_eq!(AnswerId(2).to_string(), "A2");
        assert_eq!(PaperId(1).to_string(), "P1");
    }
}
