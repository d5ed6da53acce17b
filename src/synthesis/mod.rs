pub mod analysis;
pub mod templates;

pub use analysis::{AnalysisEngine, PersistableReport};
pub use templates::{generate_entity, render_template, template_for, EntityTemplate, TemplateError};
