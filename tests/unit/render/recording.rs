use super::*;

#[test]
fn records_calls_in_order() {
    let mut host = RecordingHost::new();
    host.set_render_quality(RenderQuality::Raytracing).unwrap();
    host.set_render_filename("/out/a.png").unwrap();
    host.start_render_to_file().unwrap();
    host.terminate();
    assert_eq!(
        host.calls(),
        &[
            HostCall::SetRenderQuality(RenderQuality::Raytracing),
            HostCall::SetRenderFilename("/out/a.png".into()),
            HostCall::StartRenderToFile,
            HostCall::Terminate,
        ]
    );
    assert_eq!(host.terminations(), 1);
}

#[test]
fn reference_rewrites_are_applied() {
    let mut host = RecordingHost::new()
        .with_reference(ReferenceKind::Source, "/a.vpb")
        .with_reference(ReferenceKind::Smart, "/b.vpb");
    let refs = host.scene_references().unwrap();
    host.set_reference_path(&refs[1], "/mnt/b.vpb").unwrap();
    assert_eq!(host.references()[0].path, "/a.vpb");
    assert_eq!(host.references()[1].path, "/mnt/b.vpb");

    let bogus = SceneReference {
        index: 9,
        kind: ReferenceKind::Source,
        path: "/x".into(),
    };
    assert!(host.set_reference_path(&bogus, "/y").is_err());
}

#[test]
fn failing_render_still_records_the_trigger() {
    let mut host = RecordingHost::new().failing_render();
    assert!(matches!(
        host.start_render_to_file(),
        Err(VredError::Render(_))
    ));
    assert_eq!(host.count(&HostCall::StartRenderToFile), 1);
}

#[test]
fn call_log_serializes_as_json() {
    let mut host = RecordingHost::new();
    host.set_use_render_region(false).unwrap();
    host.crash(1);
    let json = serde_json::to_string(host.calls()).unwrap();
    assert_eq!(json, r#"[{"set_use_render_region":false},{"crash":1}]"#);
}
