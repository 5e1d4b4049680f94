use std::path::{Path, PathBuf};

use crate::{
    action::Action,
    enumeration,
    event::{Message, SelectionDirection},
    model::Model,
};

#[tracing::instrument(skip(model))]
pub fn update_model(model: &mut Model, message: Message) -> Vec<Action> {
    match message {
        Message::Back => back(model),
        Message::CurrentChanged { current, previous } => current_changed(model, current, previous),
        Message::Error(error) => {
            model.status = Some(error);
            Vec::new()
        }
        Message::GotoCrumb(index) => goto_crumb(model, index),
        Message::MoveSelection(direction) => {
            move_selection(model, direction);
            Vec::new()
        }
        Message::Open => open(model),
        Message::Quit => vec![Action::Quit],
        Message::Refresh => match model.history.current_state() {
            Some(path) => {
                let selection = model.selected_directory().cloned();
                vec![Action::Enumerate(path, selection)]
            }
            None => Vec::new(),
        },
        Message::Resize(_, _) => Vec::new(),
    }
}

fn back(model: &mut Model) -> Vec<Action> {
    if model.history.len() <= 1 {
        model.status = Some("already at the first crumb".to_string());
        return Vec::new();
    }

    model.history.pop_state();
    vec![Action::SkipRender]
}

fn goto_crumb(model: &mut Model, index: usize) -> Vec<Action> {
    match model.history.peek_state(index) {
        Ok(state) => {
            model.history.goto_state(&state);
            vec![Action::SkipRender]
        }
        Err(error) => {
            tracing::warn!("goto crumb failed: {}", error);
            model.status = Some(error.to_string());
            Vec::new()
        }
    }
}

fn open(model: &mut Model) -> Vec<Action> {
    let (current, name) = match (model.history.current_state(), model.selected_directory()) {
        (Some(current), Some(name)) => (current, name.clone()),
        _ => return Vec::new(),
    };

    model.history.push_state(current.join(&name), Some(name));
    vec![Action::SkipRender]
}

fn current_changed(
    model: &mut Model,
    current: Option<PathBuf>,
    previous: Option<PathBuf>,
) -> Vec<Action> {
    model.status = None;

    let current = match current {
        Some(it) => it,
        None => {
            model.directories.clear();
            model.selection = 0;
            return Vec::new();
        }
    };

    // NOTE: going back selects the directory the history came from
    let selection = if previous.as_ref() == Some(&current) {
        model.selected_directory().cloned()
    } else {
        previous
            .as_deref()
            .and_then(|previous| previous.strip_prefix(&current).ok())
            .and_then(|relative| relative.components().next())
            .map(|component| enumeration::label(Path::new(component.as_os_str())))
    };

    vec![Action::Enumerate(current, selection)]
}

fn move_selection(model: &mut Model, direction: SelectionDirection) {
    if model.directories.is_empty() {
        model.selection = 0;
        return;
    }

    let max = model.directories.len() - 1;
    model.selection = match direction {
        SelectionDirection::Down => (model.selection + 1).min(max),
        SelectionDirection::Up => model.selection.saturating_sub(1),
    };
}
