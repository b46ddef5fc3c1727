use super::*;
use crate::render::recording::{HostCall, RecordingHost};

#[test]
fn success_terminates_once() {
    let mut host = RecordingHost::new();
    let session = HostSession::new(&mut host);
    assert_eq!(session.finish(true), Termination::Terminated);
    assert_eq!(host.calls(), &[HostCall::Terminate]);
}

#[test]
fn failure_crashes_once_by_default() {
    let mut host = RecordingHost::new();
    let session = HostSession::new(&mut host);
    assert_eq!(session.finish(false), Termination::Crashed(1));
    assert_eq!(host.calls(), &[HostCall::Crash(1)]);
}

#[test]
fn failure_without_crash_policy_terminates() {
    let mut host = RecordingHost::new();
    let session = HostSession::with_policy(&mut host, false);
    assert_eq!(session.finish(false), Termination::Terminated);
    assert_eq!(host.calls(), &[HostCall::Terminate]);
}

#[test]
fn abandoned_session_counts_as_failure() {
    let mut host = RecordingHost::new();
    {
        let mut session = HostSession::new(&mut host);
        session.host().set_premultiply(true).unwrap();
    }
    assert_eq!(host.terminations(), 1);
    assert_eq!(host.calls().last(), Some(&HostCall::Crash(1)));
}

#[test]
fn panicking_session_still_terminates() {
    let mut host = RecordingHost::new();
    let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let _session = HostSession::new(&mut host);
        panic!("host script blew up");
    }));
    assert!(r.is_err());
    assert_eq!(host.calls(), &[HostCall::Crash(1)]);
}
