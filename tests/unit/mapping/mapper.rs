use super::*;
use crate::mapping::rules::PathFormat;

fn temp_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "vredcloud_{name}_{}_{}.json",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn posix_mapper(rules: Vec<PathMappingRule>) -> PathMapper {
    PathMapper::with_rules(rules).with_style(PathStyle::Posix)
}

#[test]
fn no_rules_is_identity() {
    let m = PathMapper::identity().with_style(PathStyle::Posix);
    assert_eq!(m.map_path("/a//b/../c"), "/a//b/../c");
    assert_eq!(m.map_path(""), "");
}

#[test]
fn no_match_returns_input() {
    let m = posix_mapper(vec![PathMappingRule::new(PathFormat::Posix, "/src", "/dst")]);
    assert_eq!(m.map_path("/other/x.vpb"), "/other/x.vpb");
}

#[test]
fn mapping_is_deterministic() {
    let m = posix_mapper(vec![PathMappingRule::new(PathFormat::Posix, "/src", "/dst")]);
    let a = m.map_path("/src/scenes/car.vpb");
    let b = m.map_path("/src/scenes/car.vpb");
    assert_eq!(a, b);
    assert_eq!(a, "/dst/scenes/car.vpb");
}

#[test]
fn first_matching_rule_wins() {
    let m = posix_mapper(vec![
        PathMappingRule::new(PathFormat::Posix, "/projects", "/first"),
        PathMappingRule::new(PathFormat::Posix, "/projects/car", "/second"),
    ]);
    assert_eq!(m.map_path("/projects/car/body.osb"), "/first/car/body.osb");
}

#[test]
fn windows_rules_ignore_case() {
    let m = posix_mapper(vec![PathMappingRule::new(
        PathFormat::Windows,
        "C:\\Data",
        "/mnt/data",
    )]);
    assert_eq!(m.map_path("c:\\data\\x.vpb"), "/mnt/data/x.vpb");
    assert_eq!(m.map_path("C:/DATA/sub/y.vpb"), "/mnt/data/sub/y.vpb");
}

#[test]
fn posix_rules_respect_case() {
    let m = posix_mapper(vec![PathMappingRule::new(PathFormat::Posix, "/Data", "/mnt")]);
    assert_eq!(m.map_path("/data/x.vpb"), "/data/x.vpb");
    assert_eq!(m.map_path("/Data/x.vpb"), "/mnt/x.vpb");
}

#[test]
fn empty_destination_roots_the_remainder() {
    let m = posix_mapper(vec![PathMappingRule::new(PathFormat::Posix, "/src", "")]);
    assert_eq!(m.map_path("/src/a/b.vpb"), "/a/b.vpb");
}

#[test]
fn input_is_normalized_before_matching() {
    let m = posix_mapper(vec![PathMappingRule::new(PathFormat::Posix, "/src/", "/dst")]);
    assert_eq!(m.map_path("/src//tmp/../a.vpb"), "/dst/a.vpb");
}

#[test]
fn windows_style_output_uses_backslashes() {
    let m = PathMapper::with_rules(vec![PathMappingRule::new(
        PathFormat::Posix,
        "/mnt/share",
        "Z:\\share",
    )])
    .with_style(PathStyle::Windows);
    assert_eq!(m.map_path("/mnt/share/a/b.vpb"), "Z:\\share\\a\\b.vpb");
}

#[test]
fn rules_file_is_loaded_lazily_and_once() {
    let path = temp_file("rules_once");
    std::fs::write(
        &path,
        r#"{"path_mapping_rules": [{"source_path_format": "POSIX", "source_path": "/src", "destination_path": "/dst"}]}"#,
    )
    .unwrap();

    let m = PathMapper::from_rules_file(&path).with_style(PathStyle::Posix);
    assert_eq!(m.map_path("/src/a.vpb"), "/dst/a.vpb");

    // The cached rule list survives the file going away.
    std::fs::remove_file(&path).unwrap();
    assert_eq!(m.map_path("/src/b.vpb"), "/dst/b.vpb");
    assert_eq!(m.load_rules().unwrap().len(), 1);
}

#[test]
fn unreadable_rules_file_degrades_to_identity() {
    let path = temp_file("rules_missing");
    let m = PathMapper::from_rules_file(&path).with_style(PathStyle::Posix);
    assert!(m.load_rules().is_err());
    assert_eq!(m.map_path("/src/a.vpb"), "/src/a.vpb");

    // A file appearing later is not picked up: loading is attempted at most once.
    std::fs::write(
        &path,
        r#"{"path_mapping_rules": [{"source_path_format": "POSIX", "source_path": "/src", "destination_path": "/dst"}]}"#,
    )
    .unwrap();
    assert_eq!(m.map_path("/src/a.vpb"), "/src/a.vpb");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn malformed_rules_file_degrades_to_identity() {
    let path = temp_file("rules_malformed");
    std::fs::write(&path, "{\"path_mapping_rules\": 3}").unwrap();
    let m = PathMapper::from_rules_file(&path).with_style(PathStyle::Posix);
    assert!(m.rules().is_empty());
    assert_eq!(m.map_path("/x"), "/x");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn case_insensitive_prefix_reports_byte_length() {
    assert_eq!(match_prefix("C:/Data/x", "c:/data", true), Some(7));
    assert_eq!(match_prefix("C:/Dat", "c:/data", true), None);
    assert_eq!(match_prefix("/Data/x", "/data", false), None);
}
