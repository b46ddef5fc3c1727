use super::*;

fn params() -> RenderParameters {
    RenderParameters::new(
        "C:\\renders\\out ",
        " car ",
        "PNG",
        ImageSize::new(800, 600).unwrap(),
    )
}

#[test]
fn defaults_validate_to_a_still_render() {
    let sel = params().validate().unwrap();
    assert_eq!(sel.render_quality, RenderQuality::RealisticHigh);
    assert_eq!(sel.ss_quality, SupersamplingQuality::Off);
    assert_eq!(sel.dlss_quality, DlssQuality::Off);
    assert_eq!(sel.animation_type, AnimationType::Clip);
    assert_eq!(sel.job_type, JobType::Render);
    assert_eq!(sel.frames.iter().collect::<Vec<_>>(), vec![0]);
    assert_eq!(sel.tile, None);
}

#[test]
fn each_bad_selection_reports_its_own_error() {
    let cases: [(fn(&mut RenderParameters), &str); 5] = [
        (|p| p.render_quality = "Best".into(), "Invalid render quality: Best"),
        (|p| p.ss_quality = "Huge".into(), "Invalid Supersampling quality: Huge"),
        (|p| p.dlss_quality = "On".into(), "Invalid DLSS quality: On"),
        (|p| p.animation_type = "Curve".into(), "Invalid animation type: Curve"),
        (|p| p.job_type = "Bake".into(), "Invalid job type: Bake"),
    ];
    for (mutate, expected) in cases {
        let mut p = params();
        mutate(&mut p);
        let err = p.validate().unwrap_err();
        assert!(err.to_string().contains(expected), "{err}");
    }
}

#[test]
fn inverted_frames_fail() {
    let mut p = params();
    p.start_frame = 20;
    p.end_frame = 5;
    let err = p.validate().unwrap_err();
    assert_eq!(err.to_string(), "validation error: StartFrame exceeds EndFrame");
}

#[test]
fn zero_step_fails() {
    let mut p = params();
    p.end_frame = 10;
    p.frame_step = 0;
    assert!(p.validate().is_err());
}

#[test]
fn stepped_frames_are_inclusive() {
    let mut p = params();
    p.start_frame = 1;
    p.end_frame = 10;
    p.frame_step = 2;
    let frames: Vec<i64> = p.validate().unwrap().frames.iter().collect();
    assert_eq!(frames, vec![1, 3, 5, 7, 9]);
}

#[test]
fn region_rendering_checks_the_tile() {
    let mut p = params();
    p.region_rendering = true;
    p.num_x_tiles = 2;
    p.num_y_tiles = 2;
    p.tile_number_x = 3;
    assert!(matches!(p.validate(), Err(VredError::Tiling(_))));

    p.tile_number_x = 2;
    let tile = p.validate().unwrap().tile.unwrap();
    assert_eq!((tile.tile_number_x, tile.tile_number_y), (2, 1));
    assert_eq!((tile.image_width, tile.image_height), (800, 600));
}

#[test]
fn render_jobs_need_a_resolution() {
    let mut p = params();
    p.image_width = 0;
    assert!(p.validate().is_err());

    p.job_type = JobType::RenderQueue.name().to_string();
    assert!(p.validate().is_ok());
}

#[test]
fn output_filename_trims_and_lowercases() {
    assert_eq!(params().output_filename(), "C:/renders/out/car.png");

    let mut p = params();
    p.output_dir = String::new();
    assert_eq!(p.output_filename(), "car.png");
    p.output_dir = "/mnt/out/".into();
    assert_eq!(p.output_filename(), "/mnt/out/car.png");
}

#[test]
fn output_filename_carries_region_suffix() {
    let mut p = params();
    p.region_rendering = true;
    p.num_x_tiles = 4;
    p.num_y_tiles = 2;
    p.tile_number_x = 3;
    p.tile_number_y = 2;
    p.output_format = "EXR".into();
    assert_eq!(
        p.output_filename(),
        "C:/renders/out/car_region_2x3_2x4.exr"
    );
}

#[test]
fn json_uses_template_names_and_rejects_unknown_keys() {
    let p = RenderParameters::from_json(
        r#"{
            "OutputDir": "/out", "OutputFileNamePrefix": "img", "OutputFormat": "PNG",
            "RenderQuality": "Raytracing", "SSQuality": "High", "DLSSQuality": "Quality",
            "StartFrame": 1, "EndFrame": 4, "JobType": "Render",
            "ImageWidth": 1920, "ImageHeight": 1080, "DPI": 300, "TonemapHDR": true,
            "GPURaytracing": true
        }"#,
    )
    .unwrap();
    assert_eq!(p.ss_quality, "High");
    assert_eq!(p.dlss_quality, "Quality");
    assert_eq!(p.dpi, 300);
    assert!(p.tonemap_hdr && p.gpu_raytracing);
    assert_eq!(p.frame_step, 1);
    assert_eq!((p.num_x_tiles, p.tile_number_y), (1, 1));

    let err = RenderParameters::from_json(
        r#"{"OutputDir": "/out", "OutputFileNamePrefix": "img", "OutputFormat": "PNG",
            "RenderQuality": "NPR", "StartFrame": 1, "EndFrame": 1, "JobType": "Render",
            "ImageWidth": 8, "ImageHeight": 8, "Colour": "red"}"#,
    )
    .unwrap_err();
    assert!(err.to_string().contains("Colour"), "{err}");
}

#[test]
fn parameter_values_skip_scheduler_and_conda_names() {
    let mut values = params().to_parameter_values().unwrap();
    values.push(ParameterValue {
        name: "deadline:targetTaskRunStatus".into(),
        value: ParamValue::Str("READY".into()),
    });
    values.push(ParameterValue {
        name: "CondaPackages".into(),
        value: ParamValue::Str("vred".into()),
    });
    let back = RenderParameters::from_parameter_values(&values).unwrap();
    assert_eq!(back, params());

    values.push(ParameterValue {
        name: "Mystery".into(),
        value: ParamValue::Int(1),
    });
    assert!(RenderParameters::from_parameter_values(&values).is_err());
}

#[test]
fn parameter_values_follow_field_order() {
    let values = params().to_parameter_values().unwrap();
    assert_eq!(values[0].name, "OutputDir");
    assert_eq!(values[1].name, "OutputFileNamePrefix");
    let dpi = values.iter().find(|v| v.name == "DPI").unwrap();
    assert_eq!(dpi.value, ParamValue::Int(72));
    assert!(values.iter().all(|v| v.name != "SceneFile"));
}

#[test]
fn boolean_names_cover_every_boolean_field() {
    let mut from_record: Vec<String> = params()
        .to_parameter_values()
        .unwrap()
        .into_iter()
        .filter(|pv| matches!(pv.value, ParamValue::Bool(_)))
        .map(|pv| pv.name)
        .collect();
    let mut listed: Vec<String> = BOOLEAN_PARAMETER_NAMES.iter().map(|s| s.to_string()).collect();
    from_record.sort();
    listed.sort();
    assert_eq!(from_record, listed);
}
