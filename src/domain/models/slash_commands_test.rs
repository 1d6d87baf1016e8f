use super::SlashCommand;

#[test]
fn it_parse_empty_string() {
    let text = "";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_space_only() {
    let text = " ";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_single_slash() {
    let text = "/";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_plain_query() {
    let text = "how many employees are there";
    assert!(SlashCommand::parse(text).is_none());
}

#[test]
fn it_parse_valid_prefix() {
    let text = "/q";
    let cmd = SlashCommand::parse(text);
    assert!(cmd.is_some());
    assert_eq!(cmd.unwrap().command, "/q");
}

#[test]
fn it_is_quit() {
    assert!(SlashCommand::parse("/q").unwrap().is_quit());
    assert!(SlashCommand::parse("/quit").unwrap().is_quit());
    assert!(SlashCommand::parse("/exit").unwrap().is_quit());
}

#[test]
fn it_is_connect_with_args() {
    let cmd = SlashCommand::parse("/connect sqlite:///company_demo.db").unwrap();
    assert!(cmd.is_connect());
    assert_eq!(cmd.joined_args(), "sqlite:///company_demo.db");
}

#[test]
fn it_joins_args_with_single_spaces() {
    let cmd = SlashCommand::parse("/connect  host=db   user=me ").unwrap();
    assert_eq!(cmd.joined_args(), "host=db user=me");
}

#[test]
fn it_is_connect_without_args() {
    let cmd = SlashCommand::parse("/cn").unwrap();
    assert!(cmd.is_connect());
    assert!(cmd.args.is_empty());
}

#[test]
fn it_is_upload_with_many_paths() {
    let cmd = SlashCommand::parse("/upload  ./a.txt   ./b.pdf").unwrap();
    assert!(cmd.is_upload());
    assert_eq!(cmd.args, vec!["./a.txt".to_string(), "./b.pdf".to_string()]);
}

#[test]
fn it_is_schema() {
    assert!(SlashCommand::parse("/schema").unwrap().is_schema());
    assert!(SlashCommand::parse("/sc").unwrap().is_schema());
}

#[test]
fn it_is_status() {
    assert!(SlashCommand::parse("/status").unwrap().is_status());
    assert!(SlashCommand::parse("/st").unwrap().is_status());
}

#[test]
fn it_is_history() {
    let cmd = SlashCommand::parse("/history 3").unwrap();
    assert!(cmd.is_history());
    assert_eq!(cmd.args, vec!["3".to_string()]);
}

#[test]
fn it_is_help() {
    assert!(SlashCommand::parse("/h").unwrap().is_help());
    assert!(SlashCommand::parse("/help").unwrap().is_help());
}
