use super::*;

#[test]
fn parses_rules_in_order() {
    let json = r#"{
        "version": "pathmapping-1.0",
        "path_mapping_rules": [
            {"source_path_format": "WINDOWS", "source_path": "C:\\source", "destination_path": "/dest"},
            {"source_path_format": "POSIX", "source_path": "/mnt/a", "destination_path": "/b"}
        ]
    }"#;
    let rules = parse_rules(json).unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules[0],
        PathMappingRule::new(PathFormat::Windows, "C:\\source", "/dest")
    );
    assert_eq!(rules[1].source_path_format, PathFormat::Posix);
}

#[test]
fn missing_rule_list_is_an_error() {
    let err = parse_rules(r#"{"rules": []}"#).unwrap_err();
    assert!(err.to_string().contains("path mapping error:"));
}

#[test]
fn unknown_format_is_an_error() {
    let json = r#"{"path_mapping_rules": [
        {"source_path_format": "MAC", "source_path": "/a", "destination_path": "/b"}
    ]}"#;
    assert!(parse_rules(json).is_err());
}

#[test]
fn missing_file_is_an_error() {
    let path = std::env::temp_dir().join("vredcloud_no_such_rules_file.json");
    assert!(read_rules_file(&path).is_err());
}

#[test]
fn only_windows_ignores_case() {
    assert!(PathFormat::Windows.case_insensitive());
    assert!(!PathFormat::Posix.case_insensitive());
}
