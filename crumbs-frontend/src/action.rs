use std::path::PathBuf;

use crate::{enumeration, model::Model};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    Enumerate(PathBuf, Option<String>),
    Quit,
    SkipRender,
}

#[derive(Debug, Eq, PartialEq)]
pub enum ActionResult {
    Normal,
    Quit,
    SkipRender,
}

pub fn exec(model: &mut Model, actions: Vec<Action>) -> ActionResult {
    let mut result = ActionResult::Normal;
    for action in actions {
        match action {
            Action::Enumerate(path, selection) => enumerate(model, path, selection),
            Action::Quit => return ActionResult::Quit,
            Action::SkipRender => result = ActionResult::SkipRender,
        }
    }

    result
}

fn enumerate(model: &mut Model, path: PathBuf, selection: Option<String>) {
    if model.history.current_state().as_ref() != Some(&path) {
        tracing::debug!("skipping enumeration of stale path: {:?}", path);
        return;
    }

    match enumeration::read_directories(&path, model.settings.show_hidden) {
        Ok(directories) => {
            model.selection = selection
                .and_then(|name| directories.iter().position(|it| it == &name))
                .unwrap_or(0);
            model.directories = directories;
        }
        Err(error) => {
            tracing::error!("reading directory {:?} failed: {:?}", path, error);

            model.directories.clear();
            model.selection = 0;
            model.status = Some(format!("{}: {}", error, path.to_string_lossy()));
        }
    }
}
