use action::ActionResult;
use error::AppError;
use event::Emitter;
use model::Model;
use settings::Settings;
use terminal::TerminalWrapper;
use update::update_model;
use view::render_model;

mod action;
pub mod crumbbar;
mod enumeration;
pub mod error;
mod event;
mod keymap;
mod layout;
mod model;
pub mod settings;
mod terminal;
pub mod theme;
mod update;
mod view;

pub async fn run(settings: Settings) -> Result<(), AppError> {
    let startup_path = enumeration::resolve_startup_path(settings.startup_path.as_deref())?;

    let mut terminal = TerminalWrapper::start()?;

    let mut model = Model::new(settings);
    let mut emitter = Emitter::start(&model.history);

    model
        .history
        .replace_all(enumeration::ancestor_entries(&startup_path));

    tracing::debug!("starting with model state: {:?}", model);

    let mut result = Ok(());
    while let Some(message) = emitter.receiver.recv().await {
        tracing::debug!("received message: {:?}", message);

        let actions = update_model(&mut model, message);
        match action::exec(&mut model, actions) {
            ActionResult::Quit => break,
            ActionResult::SkipRender => {}
            ActionResult::Normal => {
                if let Err(error) = render_model(&mut terminal, &model) {
                    tracing::error!("rendering failed: {:?}", error);
                    result = Err(error);
                    break;
                }
            }
        }
    }

    terminal.shutdown()?;

    if model.settings.print_on_quit {
        if let Some(path) = model.history.current_state() {
            println!("{}", path.to_string_lossy());
        }
    }

    result
}
