//! Template store persisted as JSON files in a directory.

use std::fs;
use std::path::{Path, PathBuf};

use mf_core::TemplateId;
use tracing::{debug, warn};

use crate::store::TemplateStore;
use crate::types::{NewTemplate, Template};
use crate::{TemplateError, TemplateResult};

const INDEX_FILE: &str = "index.json";

/// Layout:
/// - `<root>/<template-id>.json`: one pretty-printed template each
/// - `<root>/index.json`: template ids in creation order
#[derive(Debug, Clone)]
pub struct DirTemplateStore {
    root_dir: PathBuf,
}

impl DirTemplateStore {
    pub fn new(root_dir: PathBuf) -> TemplateResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    fn template_path(&self, id: &TemplateId) -> PathBuf {
        self.root_dir.join(format!("{id}.json"))
    }

    fn read_index(&self) -> TemplateResult<Vec<TemplateId>> {
        let path = self.root_dir.join(INDEX_FILE);
        if !path.exists() {
            return Ok(Vec::new());
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn write_index(&self, ids: &[TemplateId]) -> TemplateResult<()> {
        let content = serde_json::to_string_pretty(ids)?;
        fs::write(self.root_dir.join(INDEX_FILE), content)?;
        Ok(())
    }

    /// Remove a template from the index and from disk.
    pub fn delete(&mut self, id: &TemplateId) -> TemplateResult<()> {
        let mut index = self.read_index()?;
        let indexed = index.len();
        index.retain(|existing| existing != id);

        let path = self.template_path(id);
        if index.len() == indexed && !path.exists() {
            return Err(TemplateError::TemplateNotFound { id: *id });
        }

        self.write_index(&index)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        debug!(%id, "template deleted");
        Ok(())
    }
}

impl TemplateStore for DirTemplateStore {
    fn save(&mut self, template: NewTemplate) -> TemplateResult<Template> {
        let template = template.into_template();
        let json = serde_json::to_string_pretty(&template)?;
        let mut index = self.read_index()?;
        index.push(template.id);

        // No template file without an index entry.
        let path = self.template_path(&template.id);
        fs::write(&path, json)?;
        if let Err(err) = self.write_index(&index) {
            let _ = fs::remove_file(&path);
            return Err(err);
        }

        debug!(id = %template.id, dir = %self.root_dir.display(), "template written");
        Ok(template)
    }

    fn get(&self, id: &TemplateId) -> TemplateResult<Template> {
        let path = self.template_path(id);
        if !path.exists() {
            return Err(TemplateError::TemplateNotFound { id: *id });
        }
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    fn list(&self) -> TemplateResult<Vec<Template>> {
        let mut templates = Vec::new();
        for id in self.read_index()? {
            match self.get(&id) {
                Ok(template) => templates.push(template),
                Err(TemplateError::TemplateNotFound { id }) => {
                    warn!(%id, "indexed template file is missing; skipping");
                }
                Err(err) => return Err(err),
            }
        }
        Ok(templates)
    }
}
