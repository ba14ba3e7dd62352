//! Template storage API.

use mf_core::TemplateId;
use tracing::debug;

use crate::types::{NewTemplate, Template};
use crate::{TemplateError, TemplateResult};

/// Narrow storage interface for templates.
///
/// `list` returns templates in creation order.
pub trait TemplateStore {
    fn save(&mut self, template: NewTemplate) -> TemplateResult<Template>;

    fn get(&self, id: &TemplateId) -> TemplateResult<Template>;

    fn list(&self) -> TemplateResult<Vec<Template>>;
}

/// Session-local store backed by a `Vec`.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTemplateStore {
    templates: Vec<Template>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl TemplateStore for InMemoryTemplateStore {
    fn save(&mut self, template: NewTemplate) -> TemplateResult<Template> {
        let template = template.into_template();
        debug!(id = %template.id, name = %template.name, "template stored in memory");
        self.templates.push(template.clone());
        Ok(template)
    }

    fn get(&self, id: &TemplateId) -> TemplateResult<Template> {
        self.templates
            .iter()
            .find(|t| t.id == *id)
            .cloned()
            .ok_or(TemplateError::TemplateNotFound { id: *id })
    }

    fn list(&self) -> TemplateResult<Vec<Template>> {
        Ok(self.templates.clone())
    }
}
