use crate::render::host::RenderHost;

/// End a failed session with [`RenderHost::crash`] (true) or a plain
/// [`RenderHost::terminate`] (false).
pub const TERMINATE_ON_ERROR: bool = true;

/// Exit code passed to [`RenderHost::crash`].
pub const CRASH_EXIT_CODE: i32 = 1;

/// How a host session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum Termination {
    /// Normal termination.
    Terminated,
    /// Abnormal termination with an exit code.
    Crashed(i32),
}

/// Scoped ownership of a host session.
///
/// Exactly one terminating call reaches the host: through [`HostSession::finish`], or from
/// `Drop` when the session is abandoned (an early return or a panic), which counts as a
/// failure.
pub struct HostSession<'h, H: RenderHost + ?Sized> {
    host: &'h mut H,
    terminate_on_error: bool,
    ended: Option<Termination>,
}

impl<'h, H: RenderHost + ?Sized> HostSession<'h, H> {
    /// Open a session using [`TERMINATE_ON_ERROR`].
    pub fn new(host: &'h mut H) -> Self {
        Self::with_policy(host, TERMINATE_ON_ERROR)
    }

    /// Open a session with an explicit failure policy.
    pub fn with_policy(host: &'h mut H, terminate_on_error: bool) -> Self {
        Self {
            host,
            terminate_on_error,
            ended: None,
        }
    }

    /// The host, for configuration calls.
    pub fn host(&mut self) -> &mut H {
        &mut *self.host
    }

    /// End the session according to `succeeded`.
    pub fn finish(mut self, succeeded: bool) -> Termination {
        self.end(succeeded)
    }

    fn end(&mut self, succeeded: bool) -> Termination {
        if let Some(t) = self.ended {
            return t;
        }
        let t = if !succeeded && self.terminate_on_error {
            tracing::error!(code = CRASH_EXIT_CODE, "terminating host session abnormally");
            self.host.crash(CRASH_EXIT_CODE);
            Termination::Crashed(CRASH_EXIT_CODE)
        } else {
            tracing::info!(succeeded, "terminating host session");
            self.host.terminate();
            Termination::Terminated
        };
        self.ended = Some(t);
        t
    }
}

impl<H: RenderHost + ?Sized> Drop for HostSession<'_, H> {
    fn drop(&mut self) {
        if self.ended.is_none() {
            self.end(false);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/session.rs"]
mod tests;
