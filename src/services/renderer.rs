//! 试卷渲染 - 业务能力层
//!
//! 把组好的试卷渲染成可打印的 HTML，供打印和 PDF 导出使用。

use std::fmt::Write;

use crate::models::{Question, QuestionPaper};

/// 渲染选项
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// 页面加载后自动弹出打印对话框
    pub print_on_load: bool,
}

/// 渲染整张试卷
pub fn render_html(paper: &QuestionPaper, options: RenderOptions) -> String {
    let mut html = String::new();
    let title = escape(paper.title());

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    let _ = writeln!(html, "<title>{}</title>", title);
    html.push_str(STYLE);
    if options.print_on_load {
        html.push_str("<script>window.addEventListener('load', () => window.print());</script>\n");
    }
    html.push_str("</head>\n<body>\n<div id=\"question-paper-content\">\n");

    html.push_str("<header>\n");
    let _ = writeln!(html, "<h1>{}</h1>", title);
    let _ = writeln!(
        html,
        "<p>Class: {} | Subject: {}</p>",
        escape(paper.class_name()),
        escape(paper.subject())
    );
    let _ = writeln!(html, "<p>Total Marks: {}</p>", paper.total_marks());
    html.push_str("</header>\n");

    for (index, question) in paper.questions().iter().enumerate() {
        render_question(&mut html, index, question);
    }

    html.push_str("</div>\n</body>\n</html>\n");
    html
}

fn render_question(html: &mut String, index: usize, question: &Question) {
    html.push_str("<section class=\"question\">\n");
    let _ = writeln!(html, "<span class=\"number\">{}.</span>", index + 1);
    html.push_str("<div class=\"body\">\n");
    let _ = writeln!(html, "<p>{}</p>", escape(&question.text));
    if let Some(image) = &question.image_url {
        let _ = writeln!(
            html,
            "<img class=\"question-image\" src=\"{}\" alt=\"Question\">",
            escape(image.as_str())
        );
    }

    html.push_str("<ol class=\"answers\">\n");
    for (ans_index, answer) in question.answers.iter().enumerate() {
        let _ = write!(
            html,
            "<li><span class=\"label\">{})</span> {}",
            answer_label(ans_index),
            escape(&answer.text)
        );
        if let Some(image) = &answer.image_url {
            let _ = write!(
                html,
                "<img class=\"answer-image\" src=\"{}\" alt=\"Answer {}\">",
                escape(image.as_str()),
                ans_index + 1
            );
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ol>\n</div>\n");

    let _ = writeln!(
        html,
        "<span class=\"marks\">[{} marks]</span>",
        question.marks_or_zero()
    );
    html.push_str("</section>\n");
}

/// 答案序号：a, b, c ... z, aa, ab ...
pub fn answer_label(index: usize) -> String {
    let mut label = Vec::new();
    let mut n = index;
    loop {
        label.push(b'a' + (n % 26) as u8);
        if n < 26 {
            break;
        }
        n = n / 26 - 1;
    }
    label.reverse();
    String::from_utf8_lossy(&label).into_owned()
}

/// HTML 转义
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

const STYLE: &str = r#"<style>
body { font-family: serif; margin: 2cm; }
header { text-align: center; border-bottom: 1px solid #999; padding-bottom: 1em; margin-bottom: 2em; }
.question { display: flex; align-items: flex-start; margin-bottom: 1.5em; page-break-inside: avoid; }
.number { font-weight: bold; margin-right: 0.5em; }
.body { flex: 1; }
.answers { list-style: none; margin-left: 1em; padding: 0; }
.label { margin-right: 0.5em; }
.marks { margin-left: 1em; color: #555; white-space: nowrap; }
.question-image { max-width: 28rem; display: block; margin-top: 0.5em; }
.answer-image { max-width: 24rem; display: block; margin-top: 0.25em; }
</style>
"#;
