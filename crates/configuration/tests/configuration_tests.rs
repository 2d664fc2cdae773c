//! Tests that the configuration format reads and writes as expected.

use similar_asserts::assert_eq;

use materials_explorer_configuration::bridge_settings::{BridgeSettings, CommandBridgeSettings};
use materials_explorer_configuration::error::ParseConfigurationError;
use materials_explorer_configuration::version1::{
    CONFIGURATION_FILENAME, CONFIGURATION_JSONSCHEMA_FILENAME,
};
use materials_explorer_configuration::{
    parse_configuration, write_parsed_configuration, ParsedConfiguration,
};

#[tokio::test]
async fn written_configuration_parses_back() {
    let dir = tempfile::tempdir().unwrap();

    let mut configuration = ParsedConfiguration::initial();
    configuration.bridge = Some(BridgeSettings::Command(CommandBridgeSettings {
        program: "python3".to_string(),
        args: vec!["llm_qa.py".to_string()],
        timeout_ms: 20_000,
    }));

    write_parsed_configuration(&configuration, dir.path())
        .await
        .unwrap();
    let parsed = parse_configuration(dir.path()).await.unwrap();

    assert_eq!(parsed, configuration);
}

#[tokio::test]
async fn written_configuration_satisfies_its_schema() {
    let dir = tempfile::tempdir().unwrap();
    write_parsed_configuration(&ParsedConfiguration::initial(), dir.path())
        .await
        .unwrap();

    let read_json = |name: &str| -> serde_json::Value {
        let contents = std::fs::read_to_string(dir.path().join(name)).unwrap();
        serde_json::from_str(&contents).unwrap()
    };
    let schema = read_json(CONFIGURATION_JSONSCHEMA_FILENAME);
    let instance = read_json(CONFIGURATION_FILENAME);

    let compiled = jsonschema::JSONSchema::compile(&schema).unwrap();
    assert!(compiled.is_valid(&instance));
}

#[tokio::test]
async fn initial_configuration_is_minimal() {
    let value = serde_json::to_value(ParsedConfiguration::initial()).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "version": 1,
            "connectionSettings": {
                "connectionUri": { "variable": "MATERIALS_EXPLORER_DATABASE_URL" },
                "statementTimeoutMs": 30000
            }
        })
    );
}

#[tokio::test]
async fn parse_errors_carry_a_location() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIGURATION_FILENAME),
        "{\n  \"version\": 1,\n  \"connectionSettings\": oops\n}\n",
    )
    .unwrap();

    match parse_configuration(dir.path()).await {
        Err(ParseConfigurationError::ParseError { line, .. }) => assert_eq!(line, 3),
        other => panic!("expected a parse error, got {other:?}"),
    }
}

#[tokio::test]
async fn other_versions_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join(CONFIGURATION_FILENAME),
        r#"{ "version": 2, "connectionSettings": { "connectionUri": "sqlite::memory:" } }"#,
    )
    .unwrap();

    let result = parse_configuration(dir.path()).await;
    assert!(matches!(
        result,
        Err(ParseConfigurationError::UnsupportedVersion { version: 2, .. })
    ));
}

#[tokio::test]
async fn missing_directory_is_an_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = parse_configuration(dir.path().join("nowhere")).await;
    assert!(matches!(
        result,
        Err(ParseConfigurationError::IoErrorButStringified(_))
    ));
}
