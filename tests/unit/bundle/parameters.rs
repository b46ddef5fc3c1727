use super::*;
use crate::foundation::core::ImageSize;

fn params() -> RenderParameters {
    RenderParameters::new("/out", "img", "PNG", ImageSize::new(64, 32).unwrap())
}

#[test]
fn queue_parameters_follow_render_parameters() {
    let queue = [ParameterValue::new(
        "deadline:priority",
        ParamValue::Int(50),
    )];
    let values = parameter_values(&params(), &queue).unwrap();
    assert_eq!(values.first().unwrap().name, "OutputDir");
    assert_eq!(values.last().unwrap(), &queue[0]);
}

#[test]
fn overlapping_queue_parameters_are_rejected() {
    let queue = [
        ParameterValue::new("ImageWidth", ParamValue::Int(10)),
        ParameterValue::new("CondaPackages", ParamValue::Str("vred".into())),
        ParameterValue::new("DPI", ParamValue::Int(10)),
    ];
    let err = parameter_values(&params(), &queue).unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation error: The following queue parameters conflict with the VRED job \
         parameters:\nDPI, ImageWidth"
    );
}

#[test]
fn openjd_typed_values_are_converted() {
    let yaml = r#"
parameterValues:
- name: ImageWidth
  type: INT
  value: '1920'
- name: RegionRendering
  type: STRING
  value: 'true'
- name: View
  type: STRING
  value: Front
- name: RenderAnimation
  value: false
- name: FrameStep
  value: 2
"#;
    let values = parse_parameter_values(yaml).unwrap();
    assert_eq!(values[0].value, ParamValue::Int(1920));
    assert_eq!(values[1].value, ParamValue::Bool(true));
    assert_eq!(values[2].value, ParamValue::Str("Front".into()));
    assert_eq!(values[3].value, ParamValue::Bool(false));
    assert_eq!(values[4].value, ParamValue::Int(2));
}

#[test]
fn boolean_spelling_stays_a_string_outside_boolean_fields() {
    let yaml = r#"
parameterValues:
- name: OutputFileNamePrefix
  type: STRING
  value: 'true'
- name: View
  type: STRING
  value: 'false'
- name: JobFailureOnWarnings
  type: STRING
  value: 'true'
"#;
    let values = parse_parameter_values(yaml).unwrap();
    assert_eq!(values[0].value, ParamValue::Str("true".into()));
    assert_eq!(values[1].value, ParamValue::Str("false".into()));
    assert_eq!(values[2].value, ParamValue::Bool(true));
}

#[test]
fn bad_int_is_a_serde_error() {
    let yaml = "parameterValues:\n- name: DPI\n  type: INT\n  value: lots\n";
    assert!(matches!(
        parse_parameter_values(yaml),
        Err(VredError::Serde(_))
    ));
}

#[test]
fn missing_file_is_reported() {
    let err = read_parameter_values(Path::new("/definitely/not/here.yaml")).unwrap_err();
    assert!(err.to_string().contains("read parameter values"));
}
