use serde_json::Value;
use tui_textarea::Input;

use super::IngestionStatus;
use super::QueryRequest;
use super::QueryResponse;

#[derive(Debug)]
pub enum Event {
    ConnectorStatus(String),
    IngestionStatusChanged(IngestionStatus),
    KeyboardCharInput(Input),
    KeyboardCTRLC(),
    KeyboardCTRLR(),
    KeyboardEnter(),
    KeyboardPaste(String),
    QueryCompleted(QueryRequest, QueryResponse),
    QueryFailed(QueryRequest, String),
    SchemaDiscovered(Value),
    UIResize(),
    UIScrollDown(),
    UIScrollPageDown(),
    UIScrollPageUp(),
    UIScrollUp(),
    UITick(),
    UploaderStatus(String),
}
