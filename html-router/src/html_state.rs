use common::create_template_engine;
use common::utils::config::AppConfig;
use common::utils::template_engine::{ProvidesTemplateEngine, TemplateEngine};
use std::sync::Arc;
use tracing::debug;

#[derive(Clone)]
pub struct HtmlState {
    pub templates: Arc<TemplateEngine>,
    pub config: AppConfig,
}

impl HtmlState {
    pub fn new(config: AppConfig, template_engine: Option<Arc<TemplateEngine>>) -> Self {
        let templates =
            template_engine.unwrap_or_else(|| Arc::new(create_template_engine!("templates")));
        debug!("Template engine configured for html_router.");

        Self { templates, config }
    }
}

impl ProvidesTemplateEngine for HtmlState {
    fn template_engine(&self) -> &Arc<TemplateEngine> {
        &self.templates
    }
}
