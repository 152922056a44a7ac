use question_paper::models::{load_toml_to_question_set, Answer, AnswerId, QuestionFields, QuestionId};
use question_paper::orchestrator::{NoticeLevel, Tab};
use question_paper::services::{render_html, RenderOptions};
use question_paper::{App, Config, PaperAssembler, PrintExporter, QuestionRepository, SelectionSet};
use std::collections::HashSet;

fn fields(text: &str, subject: &str, class_name: &str) -> QuestionFields {
    QuestionFields {
        text: text.to_string(),
        image_url: None,
        subject: subject.to_string(),
        class_name: class_name.to_string(),
        answers: vec![Answer {
            id: AnswerId(1),
            text: "答案".to_string(),
            image_url: None,
        }],
    }
}

fn app() -> App {
    App::new(&Config::default())
}

#[test]
fn test_add_select_and_assemble_through_form() {
    let mut app = app();

    let form = app.form_mut();
    form.set_text("2+2=?");
    form.set_subject("Math");
    form.set_class_name("5");
    let first = form.answers()[0].id;
    form.set_answer_text(first, "4").unwrap();

    let id = app.submit_form().unwrap();
    assert_eq!(app.active_tab(), Tab::Bank);
    assert_eq!(app.repository().len(), 1);

    app.set_marks_draft(id, "10");
    assert!(app.toggle_selection(id));

    let paper = app.create_paper().unwrap();
    assert_eq!(paper.subject(), "Math");
    assert_eq!(paper.class_name(), "5");
    assert_eq!(paper.total_marks(), 10);
    assert_eq!(paper.questions().len(), 1);
    assert_eq!(paper.questions()[0].marks, Some(10));
    assert_eq!(app.active_tab(), Tab::Paper);

    // 题库中的原始记录不带分值
    assert_eq!(app.repository().get(id).unwrap().marks, None);
}

#[test]
fn test_invalid_form_is_rejected_without_touching_repository() {
    let mut app = app();
    app.form_mut().set_text("   ");

    let err = app.submit_form().unwrap_err();
    assert!(!err.missing.is_empty());
    assert!(app.repository().is_empty());
    assert_eq!(app.active_tab(), Tab::Add);
}

#[test]
fn test_deselect_unknown_id_is_noop() {
    let mut selection = SelectionSet::new();
    assert!(!selection.deselect(QuestionId(999)));
    assert!(selection.is_empty());
    assert_eq!(selection.total_marks(), 0);
}

#[test]
fn test_empty_selection_cannot_be_assembled() {
    let mut app = app();
    assert!(app.create_paper().is_err());
    assert!(app.paper().is_none());
    assert!(app
        .notices()
        .iter()
        .any(|n| n.level == NoticeLevel::Warning));
}

#[test]
fn test_remove_cascades_to_selection() {
    let mut repository = QuestionRepository::new();
    let mut selection = SelectionSet::new();

    let a = repository.add(fields("A", "Math", "5"));
    let b = repository.add(fields("B", "Math", "5"));
    selection.select(repository.get(a).unwrap(), Some(3)).unwrap();
    selection.select(repository.get(b).unwrap(), Some(4)).unwrap();

    repository.remove(a, &mut selection).unwrap();

    assert!(repository.get(a).is_none());
    assert!(!selection.contains(a));
    assert!(selection.contains(b));
    assert_eq!(selection.total_marks(), 4);
}

#[test]
fn test_ids_stay_unique_across_add_and_remove() {
    let mut repository = QuestionRepository::new();
    let mut selection = SelectionSet::new();
    let mut seen = HashSet::new();

    for round in 0..20 {
        let id = repository.add(fields(&format!("Q{}", round), "Math", "5"));
        assert!(seen.insert(id), "ID {} 重复分配", id);
        if round % 3 == 0 {
            repository.remove(id, &mut selection).unwrap();
        }
    }

    let live: HashSet<_> = repository.all().iter().map(|q| q.id).collect();
    assert_eq!(live.len(), repository.len());
}

#[test]
fn test_total_marks_matches_selection() {
    let mut repository = QuestionRepository::new();
    let mut selection = SelectionSet::new();
    let a = repository.add(fields("A", "Math", "5"));
    let b = repository.add(fields("B", "Math", "5"));
    let c = repository.add(fields("C", "Math", "5"));

    selection.select(repository.get(a).unwrap(), Some(5)).unwrap();
    selection.select(repository.get(b).unwrap(), Some(3)).unwrap();
    selection.select(repository.get(c).unwrap(), None).unwrap();

    let paper = PaperAssembler::default()
        .assemble(selection.entries())
        .unwrap();
    assert_eq!(paper.total_marks(), 8);
    assert_eq!(paper.total_marks(), selection.total_marks());

    let html = render_html(&paper, RenderOptions::default());
    assert!(html.contains("Total Marks: 8"));
    assert!(html.contains("[5 marks]"));
}

#[tokio::test]
async fn test_import_toml_then_export_print_html() {
    let dir = tempfile::tempdir().unwrap();
    let toml_path = dir.path().join("set.toml");
    tokio::fs::write(
        &toml_path,
        r#"
name = "五年级数学"

[[questions]]
text = "2+2=?"
subject = "Math"
class = 5
marks = 10

[[questions.answers]]
text = "4"

[[questions]]
text = "没有设置分值"
subject = "Math"
class = "5"

[[questions.answers]]
text = "随便"

[[questions]]
text = ""
subject = "Math"
class = "5"
"#,
    )
    .await
    .unwrap();

    let set = load_toml_to_question_set(&toml_path).await.unwrap();
    let mut app = app();
    let stats = app.import_question_set(&set);
    assert_eq!(stats.imported, 2);
    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.selected, 1);

    app.create_paper().unwrap();
    let out_dir = dir.path().join("out");
    let path = app
        .export_paper(&PrintExporter::new(&out_dir))
        .await
        .expect("导出失败");

    let html = tokio::fs::read_to_string(&path).await.unwrap();
    assert!(html.contains("2+2=?"));
    assert!(html.contains("Total Marks: 10"));
    assert!(!html.contains("没有设置分值"));
}
