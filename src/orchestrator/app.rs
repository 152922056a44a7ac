//! 应用控制器 - 编排层
//!
//! ## 职责
//!
//! `App` 持有整个会话的全部状态（题库、选题集、录入表单、当前试卷、
//! 筛选条件、分值草稿、当前页签），所有用户操作都通过它的方法进入。
//!
//! ## 错误边界
//!
//! 各组件的错误在这里被就地处理：
//! - 校验错误原样返回给调用方，表单内容保留
//! - 题库找不到 ID、重复选题、空选题组卷：记录警告并生成提示
//! - 导出失败：生成错误提示，不影响录入和选题状态

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::{AssembleError, ValidationError};
use crate::image::ImageRef;
use crate::infrastructure::PaperExporter;
use crate::models::{ImportedQuestion, Question, QuestionId, QuestionPaper, QuestionSet};
use crate::services::{PaperAssembler, QuestionFilter, QuestionRepository, SelectionSet};
use crate::utils::truncate_text;
use crate::workflow::{FormMode, QuestionForm};

/// 页签
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    /// 录入 / 编辑题目
    Add,
    /// 题库
    Bank,
    /// 试卷
    Paper,
}

/// 提示级别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// 展示给用户的非致命提示
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

/// 批量导入统计
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
    pub selected: usize,
}

/// 应用状态
pub struct App {
    repository: QuestionRepository,
    selection: SelectionSet,
    assembler: PaperAssembler,
    form: QuestionForm,
    filter: QuestionFilter,
    marks_drafts: HashMap<QuestionId, u32>,
    paper: Option<QuestionPaper>,
    active_tab: Tab,
    notices: Vec<Notice>,
}

impl App {
    pub fn new(config: &Config) -> Self {
        Self::with_parts(
            QuestionRepository::new(),
            PaperAssembler::new(config.paper_title_prefix.clone()),
        )
    }

    /// 使用外部构造的题库和组卷器（可注入 ID 生成器）
    pub fn with_parts(repository: QuestionRepository, assembler: PaperAssembler) -> Self {
        Self {
            repository,
            selection: SelectionSet::new(),
            assembler,
            form: QuestionForm::new(),
            filter: QuestionFilter::default(),
            marks_drafts: HashMap::new(),
            paper: None,
            active_tab: Tab::Add,
            notices: Vec::new(),
        }
    }

    // ========== 状态读取 ==========

    pub fn repository(&self) -> &QuestionRepository {
        &self.repository
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn paper(&self) -> Option<&QuestionPaper> {
        self.paper.as_ref()
    }

    pub fn active_tab(&self) -> Tab {
        self.active_tab
    }

    pub fn form(&self) -> &QuestionForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut QuestionForm {
        &mut self.form
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    /// 取出并清空所有提示
    pub fn drain_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    pub fn switch_tab(&mut self, tab: Tab) {
        self.active_tab = tab;
    }

    // ========== 录入 ==========

    /// 提交录入表单
    ///
    /// 新建时分配新 ID，编辑时更新原题；成功后切换到题库页签
    pub fn submit_form(&mut self) -> Result<QuestionId, ValidationError> {
        let submission = match self.form.submit() {
            Ok(s) => s,
            Err(e) => {
                warn!("⚠️ 表单校验未通过: {}", e);
                return Err(e);
            }
        };

        let id = match submission.id {
            Some(id) => {
                if let Err(e) = self.repository.update(id, submission.fields) {
                    // 编辑期间题目已被删除
                    self.notify(NoticeLevel::Warning, format!("{}，修改未保存", e));
                }
                self.form = QuestionForm::new();
                id
            }
            None => self.repository.add(submission.fields),
        };

        self.active_tab = Tab::Bank;
        Ok(id)
    }

    /// 开始编辑题目；ID 不存在时返回 `false`
    pub fn begin_edit(&mut self, id: QuestionId) -> bool {
        match self.repository.get(id) {
            Some(question) => {
                info!("✏️ 编辑题目 {}: {}", id, truncate_text(&question.text, 40));
                self.form = QuestionForm::editing(question);
                self.active_tab = Tab::Add;
                true
            }
            None => {
                self.notify(NoticeLevel::Warning, format!("题目 {} 不存在，无法编辑", id));
                false
            }
        }
    }

    /// 放弃编辑，回到空白的新建表单
    pub fn cancel_edit(&mut self) {
        if let FormMode::Editing(id) = self.form.mode() {
            info!("放弃编辑题目 {}", id);
        }
        self.form = QuestionForm::new();
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.form.mode(), FormMode::Editing(_))
    }

    /// 删除题目（同步取消选题）
    pub fn delete_question(&mut self, id: QuestionId) {
        if let Err(e) = self.repository.remove(id, &mut self.selection) {
            self.notify(NoticeLevel::Warning, e.to_string());
        }
        self.marks_drafts.remove(&id);

        if self.form.mode() == FormMode::Editing(id) {
            self.form = QuestionForm::new();
        }
    }

    // ========== 题库浏览 ==========

    pub fn set_filter(&mut self, filter: QuestionFilter) {
        self.filter = filter;
    }

    pub fn filter(&self) -> &QuestionFilter {
        &self.filter
    }

    /// 当前筛选条件下可见的题目
    pub fn visible_questions(&self) -> Vec<&Question> {
        self.repository.list(&self.filter)
    }

    /// 记录题目的分值输入；无法解析为非负整数时按 0 处理
    pub fn set_marks_draft(&mut self, id: QuestionId, input: &str) {
        let marks = input.trim().parse::<u32>().unwrap_or(0);
        self.marks_drafts.insert(id, marks);
    }

    pub fn marks_draft(&self, id: QuestionId) -> Option<u32> {
        self.marks_drafts.get(&id).copied()
    }

    /// 切换选中状态，返回切换后是否处于选中
    ///
    /// 选中时使用该题的分值草稿
    pub fn toggle_selection(&mut self, id: QuestionId) -> bool {
        if self.selection.contains(id) {
            self.selection.deselect(id);
            return false;
        }

        let Some(question) = self.repository.get(id) else {
            self.notify(NoticeLevel::Warning, format!("题目 {} 不存在，无法选题", id));
            return false;
        };

        match self.selection.select(question, self.marks_drafts.get(&id).copied()) {
            Ok(()) => true,
            Err(e) => {
                self.notify(NoticeLevel::Warning, e.to_string());
                self.selection.contains(id)
            }
        }
    }

    pub fn is_selected(&self, id: QuestionId) -> bool {
        self.selection.contains(id)
    }

    // ========== 组卷与导出 ==========

    /// 根据当前选题组卷并切换到试卷页签
    pub fn create_paper(&mut self) -> Result<&QuestionPaper, AssembleError> {
        match self.assembler.assemble(self.selection.entries()) {
            Ok(paper) => {
                self.active_tab = Tab::Paper;
                Ok(&*self.paper.insert(paper))
            }
            Err(e) => {
                self.notify(NoticeLevel::Warning, e.to_string());
                Err(e)
            }
        }
    }

    /// 导出当前试卷；失败只生成提示，不影响其他状态
    pub async fn export_paper<E: PaperExporter>(&mut self, exporter: &E) -> Option<PathBuf> {
        let Some(paper) = self.paper.as_ref() else {
            self.notify(NoticeLevel::Warning, "还没有组卷，无法导出".to_string());
            return None;
        };

        match exporter.export(paper).await {
            Ok(path) => {
                self.notify(
                    NoticeLevel::Info,
                    format!("{}导出完成: {}", exporter.name(), path.display()),
                );
                Some(path)
            }
            Err(e) => {
                self.notify(NoticeLevel::Error, format!("{}导出失败: {}", exporter.name(), e));
                None
            }
        }
    }

    // ========== 批量导入 ==========

    /// 导入一个 TOML 题目集
    ///
    /// 每道题都经过录入表单校验；设置了分值的题目会直接选入
    pub fn import_question_set(&mut self, set: &QuestionSet) -> ImportStats {
        let mut stats = ImportStats::default();
        let source = set
            .name
            .as_deref()
            .or(set.file_path.as_deref())
            .unwrap_or("未命名题目集");

        for (index, imported) in set.questions.iter().enumerate() {
            let mut form = form_from_import(imported);
            let submission = match form.submit() {
                Ok(s) => s,
                Err(e) => {
                    warn!("[{}] 第 {} 题跳过: {}", source, index + 1, e);
                    stats.skipped += 1;
                    continue;
                }
            };

            let id = self.repository.add(submission.fields);
            stats.imported += 1;

            if let Some(marks) = imported.marks {
                self.marks_drafts.insert(id, marks);
                if self.toggle_selection(id) {
                    stats.selected += 1;
                }
            }
        }

        info!(
            "[{}] 导入 {} 题，跳过 {} 题，选入 {} 题",
            source, stats.imported, stats.skipped, stats.selected
        );
        stats
    }

    fn notify(&mut self, level: NoticeLevel, message: String) {
        match level {
            NoticeLevel::Info => info!("{}", message),
            NoticeLevel::Warning => warn!("⚠️ {}", message),
            NoticeLevel::Error => error!("❌ {}", message),
        }
        self.notices.push(Notice { level, message });
    }
}

fn form_from_import(imported: &ImportedQuestion) -> QuestionForm {
    let mut form = QuestionForm::new();
    form.set_text(imported.text.clone());
    form.set_subject(imported.subject.clone());
    form.set_class_name(imported.class_name.clone());
    form.set_image(imported.image.clone().and_then(ImageRef::from_reference));

    let first = form.answers()[0].id;
    for (index, answer) in imported.answers.iter().enumerate() {
        let id = if index == 0 { first } else { form.add_answer() };
        // 两个 ID 都来自表单自身，不会不存在
        let _ = form.set_answer_text(id, answer.text.clone());
        let _ = form.set_answer_image(id, answer.image.clone().and_then(ImageRef::from_reference));
    }
    form
}
