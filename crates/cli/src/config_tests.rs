use super::*;

#[test]
fn minimal_project_v2_file_gets_defaults() {
    let config = Config::from_toml_str(
        r#"
        [board]
        kind = "project_v2"
        owner = "sidtech-solutions"
        project_number = 2
        "#,
    )
    .unwrap();

    assert_eq!(config.github.api_url, DEFAULT_API_URL);
    assert_eq!(config.github.token_env, "GITHUB_TOKEN");
    assert_eq!(config.server.bind, "0.0.0.0:3000".parse::<SocketAddr>().unwrap());
    assert_eq!(config.server.webhook_path, "/api/github/webhooks");
    assert_eq!(config.telemetry.format, LogFormat::Json);
    assert_eq!(config.telemetry.otlp_endpoint, None);

    match config.board {
        BoardTarget::ProjectV2(target) => {
            assert_eq!(target.owner.as_str(), "sidtech-solutions");
            assert_eq!(target.project_number.as_u64(), 2);
            assert_eq!(target.column.as_str(), "Todo");
            assert_eq!(target.status_field, "Status");
        }
        BoardTarget::Classic(_) => panic!("expected a ProjectV2 target"),
    }
}

#[test]
fn classic_board_defaults_to_todo_column() {
    let config = Config::from_toml_str(
        r#"
        [board]
        kind = "classic"
        project_id = 1

        [telemetry]
        format = "pretty"
        otlp_endpoint = "http://localhost:4317"
        "#,
    )
    .unwrap();

    assert_eq!(config.board, BoardTarget::classic(1, "ToDo").unwrap());
    assert_eq!(config.telemetry.format, LogFormat::Pretty);
    assert_eq!(
        config.telemetry.otlp_endpoint.as_deref(),
        Some("http://localhost:4317")
    );
}

#[test]
fn board_section_is_required() {
    let err = Config::from_toml_str("[server]\nbind = \"127.0.0.1:8080\"\n").unwrap_err();

    assert!(err.message.contains("board"));
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        "[board]\nkind = \"classic\"\nproject_id = 0\n",
        "[board]\nkind = \"project_v2\"\nowner = \"\"\nproject_number = 2\n",
        "[board]\nkind = \"project_v2\"\nowner = \"o\"\nproject_number = 2\ncolumn = \" \"\n",
        "[board]\nkind = \"kanban\"\n",
        "[server]\nbind = \"nowhere\"\n[board]\nkind = \"classic\"\nproject_id = 1\n",
        "[server]\nwebhook_path = \"hooks\"\n[board]\nkind = \"classic\"\nproject_id = 1\n",
        "[github]\ntoken = \"ghp_inline\"\n[board]\nkind = \"classic\"\nproject_id = 1\n",
    ];

    for case in cases {
        assert!(Config::from_toml_str(case).is_err(), "accepted: {case}");
    }
}

#[test]
fn token_is_read_from_configured_variable() {
    let config = Config::from_toml_str(
        r#"
        [github]
        token_env = "BOARD_FILER_TEST_TOKEN"
        api_url = "https://ghe.example.com/api/v3"
        user_agent = "acme-filer"

        [board]
        kind = "classic"
        project_id = 1
        "#,
    )
    .unwrap();

    std::env::set_var("BOARD_FILER_TEST_TOKEN", " ghs_abc \n");
    let client = config.github_client_config().unwrap();
    std::env::remove_var("BOARD_FILER_TEST_TOKEN");

    assert_eq!(client.token, "ghs_abc");
    assert_eq!(client.api_url, "https://ghe.example.com/api/v3");
    assert_eq!(client.user_agent, "acme-filer");
    assert!(config.github_client_config().is_err());
}

#[test]
fn misspelled_board_keys_are_rejected() {
    let cases = [
        "[board]\nkind = \"project_v2\"\nowner = \"o\"\nproject_number = 2\ncolum = \"Done\"\n",
        "[board]\nkind = \"project_v2\"\nowner = \"o\"\nproject_number = 2\nstatus_feild = \"Stage\"\n",
        "[board]\nkind = \"classic\"\nproject_id = 1\nowner = \"o\"\n",
    ];

    for case in cases {
        let err = Config::from_toml_str(case).unwrap_err();
        assert!(err.message.contains("unknown field"), "unexpected error for {case}: {}", err.message);
    }
}
