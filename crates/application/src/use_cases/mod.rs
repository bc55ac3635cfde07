//! Application use cases (business logic orchestration).

mod load_templates;
mod render_template;

pub use load_templates::{
    LoadTemplates, LoadTemplatesError, LoadTemplatesOutput, TEMPLATE_EXTENSIONS,
    strip_final_newline,
};
pub use render_template::{RenderTemplate, RenderTemplateOutput};
