//! Module loading with a mock fallback when the remote API is unavailable.

use std::sync::Arc;

use thiserror::Error;

use crate::catalog::LearningArea;
use crate::models::{Lesson, Module};
use crate::services::api_client::ApiClient;
use crate::services::mock_content::{mock_lessons, mock_modules};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentSource {
    Remote,
    Mock,
}

#[derive(Debug, Clone)]
pub struct ModuleSet {
    pub modules: Vec<Module>,
    pub source: ContentSource,
    /// The API rejected our credentials; the session is already cleared.
    pub unauthorized: bool,
}

/// The API rejected our credentials; the session is already cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("api rejected credentials")]
pub struct Unauthorized;

#[derive(Debug, Clone, Copy)]
pub struct ModuleNeighbors<'a> {
    pub index: usize,
    pub prev: Option<&'a Module>,
    pub next: Option<&'a Module>,
}

#[derive(Clone)]
pub struct LearningService {
    api: Arc<ApiClient>,
}

impl LearningService {
    pub fn new(api: Arc<ApiClient>) -> Self {
        Self { api }
    }

    pub async fn load_modules(&self, area: LearningArea) -> ModuleSet {
        let response = self.api.get_modules(area).await;
        let unauthorized = response.is_unauthorized();

        match response.into_data("") {
            Ok(modules) => ModuleSet {
                modules,
                source: ContentSource::Remote,
                unauthorized,
            },
            Err(error) => {
                tracing::info!(%area, %error, "using mock modules");
                ModuleSet {
                    modules: mock_modules(area),
                    source: ContentSource::Mock,
                    unauthorized,
                }
            }
        }
    }

    /// The module's own lessons, else remote module content, else mock lessons.
    pub async fn lessons_for(
        &self,
        area: LearningArea,
        module: &Module,
        source: ContentSource,
    ) -> Result<Vec<Lesson>, Unauthorized> {
        if !module.lessons.is_empty() {
            return Ok(module.lessons.clone());
        }

        if source == ContentSource::Remote {
            let content = self.api.get_module_content(area, &module.id).await;
            if content.is_unauthorized() {
                return Err(Unauthorized);
            }
            if let Ok(full) = content.into_data("") {
                if !full.lessons.is_empty() {
                    return Ok(full.lessons);
                }
            }
        }

        Ok(mock_lessons(&module.id))
    }
}

pub fn find_module<'a>(modules: &'a [Module], module_id: &str) -> Option<&'a Module> {
    modules.iter().find(|m| m.id == module_id)
}

pub fn neighbors<'a>(modules: &'a [Module], module_id: &str) -> Option<ModuleNeighbors<'a>> {
    let index = modules.iter().position(|m| m.id == module_id)?;
    Some(ModuleNeighbors {
        index,
        prev: index.checked_sub(1).and_then(|i| modules.get(i)),
        next: modules.get(index + 1),
    })
}
