pub mod question_form;

pub use question_form::{FormMode, FormSubmission, QuestionForm};
