use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["originselect-mcp"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
    assert!(cli.api_base_url.is_none());
}

#[test]
fn parses_serve_command() {
    let cli = Cli::try_parse_from(["originselect-mcp", "serve"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Serve)));
}

#[test]
fn parses_tools_command() {
    let cli = Cli::try_parse_from(["originselect-mcp", "tools"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Tools)));
}

#[test]
fn call_arguments_default_to_empty_object() {
    let cli = Cli::try_parse_from(["originselect-mcp", "call", "get_values"])
        .expect("expected valid cli args");
    match cli.command {
        Some(Commands::Call { name, arguments }) => {
            assert_eq!(name, "get_values");
            assert_eq!(arguments, "{}");
        }
        other => panic!("expected call command, got: {other:?}"),
    }
}

#[test]
fn call_takes_json_arguments() {
    let cli = Cli::try_parse_from([
        "originselect-mcp",
        "call",
        "search_products",
        r#"{"values":["organic"]}"#,
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Some(Commands::Call { ref arguments, .. }) if arguments == r#"{"values":["organic"]}"#
    ));
}

#[test]
fn api_base_url_is_global() {
    let cli = Cli::try_parse_from([
        "originselect-mcp",
        "tools",
        "--api-base-url",
        "http://localhost:3000",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.api_base_url.as_deref(), Some("http://localhost:3000"));
    assert!(matches!(cli.command, Some(Commands::Tools)));
}

#[test]
fn call_requires_a_tool_name() {
    assert!(Cli::try_parse_from(["originselect-mcp", "call"]).is_err());
}
