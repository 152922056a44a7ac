pub mod ids;
pub mod loaders;
pub mod paper;
pub mod question;

pub use ids::{AnswerId, IdGenerator, PaperId, QuestionId, SequentialIds};
pub use loaders::{
    load_all_toml_files, load_toml_to_question_set, ImportedAnswer, ImportedQuestion, QuestionSet,
};
pub use paper::QuestionPaper;
pub use question::{Answer, Question, QuestionFields};
