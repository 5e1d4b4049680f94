use std::path::PathBuf;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use crumbs_frontend::{
    settings::Settings,
    theme::{self, Theme},
};
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Error)]
pub enum Error {
    #[error("Application error")]
    App(#[from] crumbs_frontend::error::AppError),
    #[error("Initialization error")]
    Initialization,
}

#[tokio::main]
async fn main() {
    let logpath = match get_logging_path() {
        Ok(it) => it,
        Err(err) => {
            eprintln!("{}", err);
            return;
        }
    };

    let logfile = tracing_appender::rolling::daily(logpath, "log");
    tracing_subscriber::fmt()
        .compact()
        .with_ansi(false)
        .with_writer(logfile)
        .init();

    debug!("starting application");

    let args = cli().get_matches();
    install_theme(&args);

    let mut settings = Settings::default();
    map_args_to_settings(&args, &mut settings);

    match crumbs_frontend::run(settings).await.map_err(Error::from) {
        Ok(()) => {
            debug!("closing application");
        }
        Err(err) => {
            error!("closing application with error: {:?}", err);
            eprintln!("{:?}", err);
        }
    }
}

fn cli() -> Command {
    Command::new("crumbs")
        .about("crumbs - walk directories with a breadcrumb bar")
        .args([
            // NOTE: arguments
            Arg::new("path")
                .action(ArgAction::Set)
                .value_parser(value_parser!(PathBuf))
                .help("directory to open on startup, defaults to the working directory"),
            // NOTE: options
            Arg::new("show-hidden")
                .long("show-hidden")
                .action(ArgAction::SetTrue)
                .default_value("false")
                .help("list directories starting with a dot"),
            Arg::new("print-on-quit")
                .long("print-on-quit")
                .action(ArgAction::SetTrue)
                .default_value("false")
                .help("print the current directory to stdout when closing"),
            Arg::new("max-label-width")
                .long("max-label-width")
                .action(ArgAction::Set)
                .value_parser(value_parser!(usize))
                .help("truncate crumb labels longer than this many columns"),
            Arg::new("separator")
                .long("separator")
                .action(ArgAction::Set)
                .help("glyph drawn between crumbs"),
        ])
}

fn install_theme(args: &ArgMatches) -> bool {
    let mut theme = Theme::builtin();
    if let Some(separator) = args.get_one::<String>("separator") {
        theme.separator = separator.to_owned();
    }

    theme::install_defaults(theme)
}

fn map_args_to_settings(args: &ArgMatches, settings: &mut Settings) {
    settings.show_hidden = args.get_flag("show-hidden");
    settings.print_on_quit = args.get_flag("print-on-quit");
    settings.startup_path = args.get_one("path").cloned();

    if let Some(width) = args.get_one::<usize>("max-label-width") {
        settings.max_label_width = *width;
    }
}

fn get_logging_path() -> Result<String, Error> {
    let cache_dir = match dirs::cache_dir() {
        Some(cache_dir) => match cache_dir.to_str() {
            Some(cache_dir_string) => cache_dir_string.to_string(),
            None => return Err(Error::Initialization),
        },
        None => return Err(Error::Initialization),
    };

    Ok(format!("{}{}", cache_dir, "/crumbs/logs"))
}
