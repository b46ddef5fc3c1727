use super::*;

#[test]
fn input_files_are_normalized_and_deduplicated() {
    let mut refs = AssetReferences::default();
    refs.add_input_file("/scenes//car.vpb", PathStyle::Posix);
    refs.add_input_file("/scenes/tmp/../car.vpb", PathStyle::Posix);
    refs.add_input_file("C:/scenes/./car.vpb", PathStyle::Windows);
    assert_eq!(
        refs.input_filenames.iter().collect::<Vec<_>>(),
        vec!["/scenes/car.vpb", "C:\\scenes\\car.vpb"]
    );
}

#[test]
fn yaml_nests_inputs_and_outputs() {
    let mut refs = AssetReferences::default();
    refs.add_input_file("/scenes/car.vpb", PathStyle::Posix);
    refs.add_input_directory("/textures");
    refs.add_output_directory("/renders");
    let yaml = refs.to_yaml().unwrap();

    let doc: serde_yaml::Value = serde_yaml::from_str(&yaml).unwrap();
    let inputs = &doc["assetReferences"]["inputs"];
    assert_eq!(inputs["filenames"][0].as_str(), Some("/scenes/car.vpb"));
    assert_eq!(inputs["directories"][0].as_str(), Some("/textures"));
    assert_eq!(
        doc["assetReferences"]["outputs"]["directories"][0].as_str(),
        Some("/renders")
    );

    assert_eq!(AssetReferences::from_yaml(&yaml).unwrap(), refs);
}

#[test]
fn empty_document_reads_as_empty() {
    let refs = AssetReferences::from_yaml("assetReferences: {}\n").unwrap();
    assert!(refs.is_empty());
}
