pub mod assembler;
pub mod renderer;
pub mod repository;
pub mod selection;

pub use assembler::PaperAssembler;
pub use renderer::{render_html, RenderOptions};
pub use repository::{QuestionFilter, QuestionRepository};
pub use selection::SelectionSet;
