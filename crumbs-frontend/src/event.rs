use std::{path::PathBuf, sync::Arc};

use crumbs_history::{BreadcrumbEvent, BreadcrumbListener};
use futures::StreamExt;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::{keymap, model::PathHistory};

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Message {
    Back,
    CurrentChanged {
        current: Option<PathBuf>,
        previous: Option<PathBuf>,
    },
    Error(String),
    GotoCrumb(usize),
    MoveSelection(SelectionDirection),
    Open,
    Quit,
    Refresh,
    Resize(u16, u16),
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SelectionDirection {
    Down,
    Up,
}

pub struct Emitter {
    pub receiver: UnboundedReceiver<Message>,
    // NOTE: the history only holds a weak reference to its listeners
    _listener: Arc<dyn BreadcrumbListener<PathBuf, String>>,
}

impl Emitter {
    pub fn start(history: &PathHistory) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();

        let listener = history_listener(sender.clone());
        history.add_listener(&listener);

        start_crossterm_listener(sender);

        Self {
            receiver,
            _listener: listener,
        }
    }
}

pub fn history_listener(
    sender: UnboundedSender<Message>,
) -> Arc<dyn BreadcrumbListener<PathBuf, String>> {
    Arc::new(move |event: &BreadcrumbEvent<PathBuf, String>| {
        if let BreadcrumbEvent::CurrentChanged {
            state, old_state, ..
        } = event
        {
            let message = Message::CurrentChanged {
                current: state.clone(),
                previous: old_state.clone(),
            };

            if let Err(error) = sender.send(message) {
                tracing::error!("sending history change failed: {:?}", error);
            }
        }
    })
}

fn start_crossterm_listener(sender: UnboundedSender<Message>) {
    tokio::spawn(async move {
        let mut reader = crossterm::event::EventStream::new();

        loop {
            let message = match reader.next().await {
                Some(Ok(event)) => handle_crossterm_event(event),
                Some(Err(error)) => Some(Message::Error(error.to_string())),
                None => break,
            };

            if let Some(message) = message {
                if sender.send(message).is_err() {
                    tracing::debug!("message receiver dropped, stopping input listener");
                    break;
                }
            }
        }
    });
}

fn handle_crossterm_event(event: crossterm::event::Event) -> Option<Message> {
    match event {
        crossterm::event::Event::Key(key) => keymap::to_message(&key),
        crossterm::event::Event::Resize(x, y) => Some(Message::Resize(x, y)),
        crossterm::event::Event::FocusLost
        | crossterm::event::Event::FocusGained
        | crossterm::event::Event::Paste(_)
        | crossterm::event::Event::Mouse(_) => None,
    }
}
