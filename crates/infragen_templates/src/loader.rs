//! Template loading functionality.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::error::{TemplateError, TemplateResult};
use crate::renderer::{template_name, TeraRenderer, TEMPLATE_EXTENSION};

/// Loads resource templates laid out as `<dir>/<provider>/<type>.j2`.
pub struct TemplateLoader {
    templates_path: PathBuf,
}

impl TemplateLoader {
    /// Create a new template loader.
    pub fn new(templates_path: impl Into<PathBuf>) -> Self {
        Self {
            templates_path: templates_path.into(),
        }
    }

    /// Load every provider's templates into a renderer.
    pub fn load(&self) -> TemplateResult<TeraRenderer> {
        if !self.templates_path.is_dir() {
            return Err(TemplateError::MissingDirectory(self.templates_path.clone()));
        }

        let mut renderer = TeraRenderer::new();

        for entry in WalkDir::new(&self.templates_path)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_dir() {
                continue;
            }
            let Some(provider) = path.file_name().map(|n| n.to_string_lossy().to_string()) else {
                continue;
            };
            let count = self.load_provider(&mut renderer, &provider, path)?;
            info!("Loaded {} template(s) for provider {}", count, provider);
        }

        Ok(renderer)
    }

    /// Load only the templates of a single provider.
    pub fn load_provider_only(&self, provider: &str) -> TemplateResult<TeraRenderer> {
        let provider_dir = self.templates_path.join(provider);
        if !provider_dir.is_dir() {
            return Err(TemplateError::MissingDirectory(provider_dir));
        }

        let mut renderer = TeraRenderer::new();
        let count = self.load_provider(&mut renderer, provider, &provider_dir)?;
        info!("Loaded {} template(s) for provider {}", count, provider);
        Ok(renderer)
    }

    fn load_provider(
        &self,
        renderer: &mut TeraRenderer,
        provider: &str,
        provider_dir: &Path,
    ) -> TemplateResult<usize> {
        let mut count = 0;

        for entry in WalkDir::new(provider_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }
            if path.extension().map_or(true, |ext| ext != TEMPLATE_EXTENSION) {
                warn!("Skipping non-template file {:?}", path);
                continue;
            }
            let Some(resource_type) = path.file_stem().map(|s| s.to_string_lossy().to_string())
            else {
                continue;
            };

            debug!("Loading template from {:?}", path);
            let content = fs::read_to_string(path)?;
            renderer.add_template(&template_name(provider, &resource_type), &content)?;
            count += 1;
        }

        Ok(count)
    }
}
