#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResultBanner {
    pub query_type: String,
    pub time: String,
    pub from_cache: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResultTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DocumentMatch {
    pub filename: String,
    pub score: Option<f64>,
    pub snippet: String,
}

impl DocumentMatch {
    pub fn score_label(&self) -> String {
        if let Some(score) = self.score {
            return format!("{score:.4}");
        }

        return "-".to_string();
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum DatabaseResult {
    Error(String),
    Rows(ResultTable),
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DocumentResult {
    Matches(Vec<DocumentMatch>),
    Empty,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ResultBody {
    Database(DatabaseResult),
    Documents(DocumentResult),
    Nothing,
}

/// A query response after normalisation, ready to be drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderableResult {
    pub banner: ResultBanner,
    pub body: ResultBody,
}
