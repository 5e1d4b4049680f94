use std::{path::PathBuf, sync::Arc};

use crumbs_history::BreadcrumbHistory;

use crate::{crumbbar::DefaultStateRenderer, settings::Settings};

pub type PathHistory = BreadcrumbHistory<PathBuf, String>;

#[derive(Debug)]
pub struct Model {
    pub directories: Vec<String>,
    pub history: Arc<PathHistory>,
    pub renderer: DefaultStateRenderer,
    pub selection: usize,
    pub settings: Settings,
    pub status: Option<String>,
}

impl Model {
    pub fn new(settings: Settings) -> Self {
        let renderer = DefaultStateRenderer {
            max_label_width: settings.max_label_width,
            ..Default::default()
        };

        Self {
            directories: Vec::new(),
            history: Arc::new(BreadcrumbHistory::with_options(settings.history.clone())),
            renderer,
            selection: 0,
            settings,
            status: None,
        }
    }

    pub fn selected_directory(&self) -> Option<&String> {
        self.directories.get(self.selection)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}
