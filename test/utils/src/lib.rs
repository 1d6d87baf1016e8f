pub fn sql_rows_fixture() -> &'static str {
    return r#"
{
  "from_cache": false,
  "time": 0.0132,
  "query_type": "sql",
  "result": {
    "sql": [
      {"emp_id": 1, "full_name": "Ada Lovelace", "dept_id": 2, "annual_salary": 145000.0, "remote": true},
      {"emp_id": 2, "full_name": "Alan Turing", "dept_id": 2, "annual_salary": 132500.5, "remote": false},
      {"emp_id": 3, "full_name": "Grace Hopper", "dept_id": 1, "annual_salary": 151000.0, "remote": null}
    ],
    "docs": null
  }
}
"#
    .trim();
}

pub fn sql_error_fixture() -> &'static str {
    return r#"
{
  "from_cache": false,
  "time": 0.0021,
  "query_type": "sql",
  "result": {
    "sql": {"error": "Could not parse to SQL automatically."},
    "docs": null
  }
}
"#
    .trim();
}

pub fn docs_fixture() -> &'static str {
    return r#"
{
  "from_cache": true,
  "time": 0.0,
  "query_type": "cached",
  "result": {
    "sql": null,
    "docs": [
      {"doc_id": "a1", "filename": "resume_jane.txt", "score": 0.87654321, "snippet": "Jane led the Python platform team for four years."},
      {"doc_id": "b2", "filename": "review_2023.pdf", "score": 0.12345, "snippet": "Mentions strong leadership in Engineering."}
    ]
  }
}
"#
    .trim();
}
