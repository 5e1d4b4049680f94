pub use entry::Entry;
pub use error::HistoryError;
pub use event::{BreadcrumbEvent, BreadcrumbListener};
pub use history::{BreadcrumbHistory, HistoryOptions};

mod entry;
mod error;
mod event;
mod history;
