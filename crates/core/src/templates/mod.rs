pub mod engine;

pub use engine::{TemplateRenderError, environment, render_string};
