use crate::{
    foundation::{core::FrameRange, error::VredResult},
    params::options::{AnimationType, DlssQuality, RenderQuality, SupersamplingQuality},
    tiling::planner::PixelBounds,
};

/// How a scene reference locates its file.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ReferenceKind {
    /// Smart reference, addressed by its smart path.
    Smart,
    /// Plain reference, addressed by its source path.
    Source,
}

/// A file referenced by the loaded scene.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SceneReference {
    /// Position in the host's reference list.
    pub index: usize,
    /// Which path of the reference is meaningful.
    pub kind: ReferenceKind,
    /// Current smart or source path.
    pub path: String,
}

/// Kind of named view a render can be taken from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum ViewKind {
    /// A stored viewpoint.
    Viewpoint,
    /// A scene camera.
    Camera,
}

/// Container the renderer writes animation frames into.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum AnimationFormat {
    /// One image file per frame.
    Image,
}

/// Rendering API of the host application, as used by one render task.
///
/// Configuration calls may fail; the two terminating calls cannot, since they end the
/// host session.
pub trait RenderHost {
    /// Names of the scene's viewpoints.
    fn viewpoint_names(&self) -> VredResult<Vec<String>>;
    /// Names of the scene's cameras.
    fn camera_names(&self) -> VredResult<Vec<String>>;
    /// Whether the GPU and driver support DLSS.
    fn is_dlss_supported(&self) -> bool;
    /// Every file reference of the loaded scene.
    fn scene_references(&self) -> VredResult<Vec<SceneReference>>;
    /// Rewrite the smart or source path of a reference.
    fn set_reference_path(&mut self, reference: &SceneReference, path: &str) -> VredResult<()>;

    /// Render quality mode.
    fn set_render_quality(&mut self, quality: RenderQuality) -> VredResult<()>;
    /// DLSS quality mode.
    fn set_dlss_quality(&mut self, quality: DlssQuality) -> VredResult<()>;
    /// Non-DLSS supersampling quality.
    fn set_supersampling_quality(&mut self, quality: SupersamplingQuality) -> VredResult<()>;
    /// Non-DLSS supersampling switch.
    fn set_supersampling(&mut self, enabled: bool) -> VredResult<()>;
    /// Ray tracing switch.
    fn enable_raytracing(&mut self, enabled: bool) -> VredResult<()>;
    /// GPU (true) or CPU ray tracing.
    fn set_raytracing_mode(&mut self, gpu: bool) -> VredResult<()>;
    /// Render from and activate a named viewpoint or camera.
    fn activate_view(&mut self, kind: ViewKind, name: &str) -> VredResult<()>;
    /// Output resolution.
    fn set_pixel_resolution(&mut self, width: u32, height: u32, dpi: u32) -> VredResult<()>;
    /// Animation (true) or still render.
    fn set_render_animation(&mut self, enabled: bool) -> VredResult<()>;
    /// Start, stop and step of an animation render.
    fn set_render_frame_range(&mut self, frames: &FrameRange) -> VredResult<()>;
    /// Animation output container.
    fn set_animation_format(&mut self, format: AnimationFormat) -> VredResult<()>;
    /// Animation frame source.
    fn set_animation_type(&mut self, animation_type: AnimationType) -> VredResult<()>;
    /// Animation clip name.
    fn set_animation_clip(&mut self, clip: &str) -> VredResult<()>;
    /// Basic antialiasing for animation renders.
    fn set_render_supersampling(&mut self, enabled: bool) -> VredResult<()>;
    /// Render the clip's own frame range instead of the configured one.
    fn set_use_clip_range(&mut self, enabled: bool) -> VredResult<()>;
    /// Alpha channel output.
    fn set_render_alpha(&mut self, enabled: bool) -> VredResult<()>;
    /// Render every job of the scene's render queue.
    fn run_all_render_jobs(&mut self) -> VredResult<()>;
    /// Run every sequence of the scene.
    fn run_all_sequences(&mut self) -> VredResult<()>;
    /// Run one named sequence.
    fn run_sequence(&mut self, name: &str) -> VredResult<()>;
    /// Export render passes.
    fn set_use_render_passes(&mut self, enabled: bool) -> VredResult<()>;
    /// Premultiplied alpha output.
    fn set_premultiply(&mut self, enabled: bool) -> VredResult<()>;
    /// HDR tonemapping.
    fn set_tonemap_hdr(&mut self, enabled: bool) -> VredResult<()>;
    /// Region (tile) rendering switch.
    fn set_use_render_region(&mut self, enabled: bool) -> VredResult<()>;
    /// Pixel bounds of the active region.
    fn set_render_region(&mut self, bounds: PixelBounds) -> VredResult<()>;
    /// Normalized, bottom-up ray-tracing region `(x0, y0, x1, y1)`.
    fn set_raytracing_render_region(&mut self, region: kurbo::Rect) -> VredResult<()>;
    /// Output file path.
    fn set_render_filename(&mut self, path: &str) -> VredResult<()>;
    /// Render to the configured file. Blocks until done.
    fn start_render_to_file(&mut self) -> VredResult<()>;

    /// End the session normally, releasing the host's license.
    fn terminate(&mut self);
    /// End the session abnormally with an exit code.
    fn crash(&mut self, code: i32);
}
