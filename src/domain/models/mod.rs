mod action;
mod backend;
mod event;
mod ingestion;
mod query;
mod result;
mod slash_commands;
mod textarea;

pub use action::*;
pub use backend::*;
pub use event::*;
pub use ingestion::*;
pub use query::*;
pub use result::*;
pub use slash_commands::*;
pub use textarea::*;
