pub mod actions;
mod app_state;
pub mod events;
mod ingestion_bridge;
mod query_controller;
mod query_history;
mod result_adapter;
mod results_view;
mod scroll;

pub use app_state::*;
pub use ingestion_bridge::*;
pub use query_controller::*;
pub use query_history::*;
pub use result_adapter::*;
pub use results_view::*;
pub use scroll::*;
