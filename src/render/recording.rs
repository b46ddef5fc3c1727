use crate::{
    foundation::{
        core::FrameRange,
        error::{VredError, VredResult},
    },
    params::options::{AnimationType, DlssQuality, RenderQuality, SupersamplingQuality},
    render::host::{AnimationFormat, ReferenceKind, RenderHost, SceneReference, ViewKind},
    tiling::planner::PixelBounds,
};

/// One call made against a [`RecordingHost`].
///
/// Variants mirror the [`RenderHost`] methods of the same name.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum HostCall {
    SetReferencePath { index: usize, path: String },
    SetRenderQuality(RenderQuality),
    SetDlssQuality(DlssQuality),
    SetSupersamplingQuality(SupersamplingQuality),
    SetSupersampling(bool),
    EnableRaytracing(bool),
    SetRaytracingMode { gpu: bool },
    ActivateView { kind: ViewKind, name: String },
    SetPixelResolution { width: u32, height: u32, dpi: u32 },
    SetRenderAnimation(bool),
    SetRenderFrameRange { start: i64, stop: i64, step: i64 },
    SetAnimationFormat(AnimationFormat),
    SetAnimationType(AnimationType),
    SetAnimationClip(String),
    SetRenderSupersampling(bool),
    SetUseClipRange(bool),
    SetRenderAlpha(bool),
    RunAllRenderJobs,
    RunAllSequences,
    RunSequence(String),
    SetUseRenderPasses(bool),
    SetPremultiply(bool),
    SetTonemapHdr(bool),
    SetUseRenderRegion(bool),
    SetRenderRegion(PixelBounds),
    SetRaytracingRenderRegion(kurbo::Rect),
    SetRenderFilename(String),
    StartRenderToFile,
    Terminate,
    Crash(i32),
}

impl HostCall {
    /// True for the calls that end a host session.
    pub fn is_termination(&self) -> bool {
        matches!(self, Self::Terminate | Self::Crash(_))
    }
}

/// In-memory host for tests, dry runs and debugging.
///
/// Every call is appended to an ordered log; scene contents (views, cameras, references)
/// are configured up front.
#[derive(Debug, Default)]
pub struct RecordingHost {
    calls: Vec<HostCall>,
    viewpoints: Vec<String>,
    cameras: Vec<String>,
    references: Vec<SceneReference>,
    dlss_supported: bool,
    fail_render: bool,
    fail_view_queries: bool,
}

impl RecordingHost {
    /// Create an empty host: no views, no references, no DLSS.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named viewpoint.
    pub fn with_viewpoint(mut self, name: impl Into<String>) -> Self {
        self.viewpoints.push(name.into());
        self
    }

    /// Add a named camera.
    pub fn with_camera(mut self, name: impl Into<String>) -> Self {
        self.cameras.push(name.into());
        self
    }

    /// Add a scene reference.
    pub fn with_reference(mut self, kind: ReferenceKind, path: impl Into<String>) -> Self {
        let index = self.references.len();
        self.references.push(SceneReference {
            index,
            kind,
            path: path.into(),
        });
        self
    }

    /// Report DLSS support.
    pub fn with_dlss_support(mut self, supported: bool) -> Self {
        self.dlss_supported = supported;
        self
    }

    /// Make [`RenderHost::start_render_to_file`] fail.
    pub fn failing_render(mut self) -> Self {
        self.fail_render = true;
        self
    }

    /// Make viewpoint and camera listing fail.
    pub fn failing_view_queries(mut self) -> Self {
        self.fail_view_queries = true;
        self
    }

    /// Calls in the order they were made.
    pub fn calls(&self) -> &[HostCall] {
        &self.calls
    }

    /// Scene references with any rewritten paths applied.
    pub fn references(&self) -> &[SceneReference] {
        &self.references
    }

    /// Number of recorded calls equal to `call`.
    pub fn count(&self, call: &HostCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Number of session-ending calls.
    pub fn terminations(&self) -> usize {
        self.calls.iter().filter(|c| c.is_termination()).count()
    }

    fn record(&mut self, call: HostCall) -> VredResult<()> {
        self.calls.push(call);
        Ok(())
    }
}

impl RenderHost for RecordingHost {
    fn viewpoint_names(&self) -> VredResult<Vec<String>> {
        if self.fail_view_queries {
            return Err(VredError::render("viewpoint listing failed"));
        }
        Ok(self.viewpoints.clone())
    }

    fn camera_names(&self) -> VredResult<Vec<String>> {
        if self.fail_view_queries {
            return Err(VredError::render("camera listing failed"));
        }
        Ok(self.cameras.clone())
    }

    fn is_dlss_supported(&self) -> bool {
        self.dlss_supported
    }

    fn scene_references(&self) -> VredResult<Vec<SceneReference>> {
        Ok(self.references.clone())
    }

    fn set_reference_path(&mut self, reference: &SceneReference, path: &str) -> VredResult<()> {
        let slot = self
            .references
            .get_mut(reference.index)
            .ok_or_else(|| VredError::render(format!("no scene reference #{}", reference.index)))?;
        slot.path = path.to_string();
        self.record(HostCall::SetReferencePath {
            index: reference.index,
            path: path.to_string(),
        })
    }

    fn set_render_quality(&mut self, quality: RenderQuality) -> VredResult<()> {
        self.record(HostCall::SetRenderQuality(quality))
    }

    fn set_dlss_quality(&mut self, quality: DlssQuality) -> VredResult<()> {
        self.record(HostCall::SetDlssQuality(quality))
    }

    fn set_supersampling_quality(&mut self, quality: SupersamplingQuality) -> VredResult<()> {
        self.record(HostCall::SetSupersamplingQuality(quality))
    }

    fn set_supersampling(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetSupersampling(enabled))
    }

    fn enable_raytracing(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::EnableRaytracing(enabled))
    }

    fn set_raytracing_mode(&mut self, gpu: bool) -> VredResult<()> {
        self.record(HostCall::SetRaytracingMode { gpu })
    }

    fn activate_view(&mut self, kind: ViewKind, name: &str) -> VredResult<()> {
        self.record(HostCall::ActivateView {
            kind,
            name: name.to_string(),
        })
    }

    fn set_pixel_resolution(&mut self, width: u32, height: u32, dpi: u32) -> VredResult<()> {
        self.record(HostCall::SetPixelResolution { width, height, dpi })
    }

    fn set_render_animation(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetRenderAnimation(enabled))
    }

    fn set_render_frame_range(&mut self, frames: &FrameRange) -> VredResult<()> {
        self.record(HostCall::SetRenderFrameRange {
            start: frames.start,
            stop: frames.stop_frame(),
            step: frames.step_size(),
        })
    }

    fn set_animation_format(&mut self, format: AnimationFormat) -> VredResult<()> {
        self.record(HostCall::SetAnimationFormat(format))
    }

    fn set_animation_type(&mut self, animation_type: AnimationType) -> VredResult<()> {
        self.record(HostCall::SetAnimationType(animation_type))
    }

    fn set_animation_clip(&mut self, clip: &str) -> VredResult<()> {
        self.record(HostCall::SetAnimationClip(clip.to_string()))
    }

    fn set_render_supersampling(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetRenderSupersampling(enabled))
    }

    fn set_use_clip_range(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetUseClipRange(enabled))
    }

    fn set_render_alpha(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetRenderAlpha(enabled))
    }

    fn run_all_render_jobs(&mut self) -> VredResult<()> {
        self.record(HostCall::RunAllRenderJobs)
    }

    fn run_all_sequences(&mut self) -> VredResult<()> {
        self.record(HostCall::RunAllSequences)
    }

    fn run_sequence(&mut self, name: &str) -> VredResult<()> {
        self.record(HostCall::RunSequence(name.to_string()))
    }

    fn set_use_render_passes(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetUseRenderPasses(enabled))
    }

    fn set_premultiply(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetPremultiply(enabled))
    }

    fn set_tonemap_hdr(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetTonemapHdr(enabled))
    }

    fn set_use_render_region(&mut self, enabled: bool) -> VredResult<()> {
        self.record(HostCall::SetUseRenderRegion(enabled))
    }

    fn set_render_region(&mut self, bounds: PixelBounds) -> VredResult<()> {
        self.record(HostCall::SetRenderRegion(bounds))
    }

    fn set_raytracing_render_region(&mut self, region: kurbo::Rect) -> VredResult<()> {
        self.record(HostCall::SetRaytracingRenderRegion(region))
    }

    fn set_render_filename(&mut self, path: &str) -> VredResult<()> {
        self.record(HostCall::SetRenderFilename(path.to_string()))
    }

    fn start_render_to_file(&mut self) -> VredResult<()> {
        self.calls.push(HostCall::StartRenderToFile);
        if self.fail_render {
            return Err(VredError::render("render to file failed"));
        }
        Ok(())
    }

    fn terminate(&mut self) {
        self.calls.push(HostCall::Terminate);
    }

    fn crash(&mut self, code: i32) {
        self.calls.push(HostCall::Crash(code));
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
