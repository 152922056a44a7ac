pub mod exporter;

pub use exporter::{PaperExporter, PdfExporter, PrintExporter};
