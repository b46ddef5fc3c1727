use super::*;

#[test]
fn warnings_pass_under_log_policy() {
    assert!(Outcome::warning("camera missing").escalate(WarningPolicy::Log).is_ok());
    assert!(Outcome::Ok.escalate(WarningPolicy::Fail).is_ok());
}

#[test]
fn warnings_fail_under_fail_policy() {
    let err = Outcome::warning("camera missing")
        .escalate(WarningPolicy::Fail)
        .unwrap_err();
    assert_eq!(err.to_string(), "escalated warning: camera missing");
}

#[test]
fn fatal_always_fails() {
    let fatal = Outcome::Fatal(VredError::render("boom"));
    assert!(matches!(
        fatal.escalate(WarningPolicy::Log),
        Err(VredError::Render(_))
    ));
}

#[test]
fn errors_convert_to_fatal() {
    let o: Outcome = Err::<Outcome, _>(VredError::validation("x")).into();
    assert!(matches!(o, Outcome::Fatal(VredError::Validation(_))));
    let o: Outcome = Ok(Outcome::Ok).into();
    assert!(o.is_ok());
}

#[test]
fn policy_from_flag() {
    assert_eq!(WarningPolicy::from_fail_flag(true), WarningPolicy::Fail);
    assert_eq!(WarningPolicy::from_fail_flag(false), WarningPolicy::Log);
    assert_eq!(WarningPolicy::default(), WarningPolicy::Log);
}
