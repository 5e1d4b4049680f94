use std::path::PathBuf;

use crumbs_history::HistoryOptions;

use crate::theme::{self, Theme};

#[derive(Debug)]
pub struct Settings {
    pub history: HistoryOptions,
    pub max_label_width: usize,
    pub print_on_quit: bool,
    pub show_hidden: bool,
    pub startup_path: Option<PathBuf>,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            history: HistoryOptions::default(),
            max_label_width: 24,
            print_on_quit: false,
            show_hidden: false,
            startup_path: None,
            theme: theme::defaults(),
        }
    }
}
