use anyhow::Result;
use serde_json::json;
use test_utils::docs_fixture;
use test_utils::sql_rows_fixture;

use super::QueryResponse;
use super::QueryTicket;

#[test]
fn it_issues_increasing_tickets() {
    let first = QueryTicket::default().next();
    let second = first.next();

    assert_eq!(first, QueryTicket(1));
    assert!(second > first);
}

#[test]
fn it_parses_sql_responses() -> Result<()> {
    let res: QueryResponse = serde_json::from_str(sql_rows_fixture())?;

    assert_eq!(res.query_type, json!("sql"));
    assert!(!res.is_from_cache());
    assert_eq!(res.elapsed_seconds(), 0.0132);
    assert!(res.sql().is_some());
    assert!(res.docs().is_none());

    return Ok(());
}

#[test]
fn it_parses_docs_responses() -> Result<()> {
    let res: QueryResponse = serde_json::from_str(docs_fixture())?;

    assert!(res.is_from_cache());
    assert!(res.sql().is_none());
    assert_eq!(res.docs().and_then(|docs| return docs.as_array()).map(|d| return d.len()), Some(2));

    return Ok(());
}

#[test]
fn it_tolerates_missing_and_odd_fields() -> Result<()> {
    let res: QueryResponse =
        serde_json::from_str(r#"{"from_cache": "yes", "time": "slow", "extra": [1, 2]}"#)?;

    assert_eq!(res.query_type, json!(null));
    assert!(!res.is_from_cache());
    assert_eq!(res.elapsed_seconds(), 0.0);
    assert!(res.sql().is_none());
    assert!(res.docs().is_none());

    return Ok(());
}
