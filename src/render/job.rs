use tracing::{debug, error, info};

use crate::{
    foundation::error::VredResult,
    mapping::mapper::PathMapper,
    params::{
        options::JobType,
        render_params::{RenderParameters, RenderSelections},
    },
    render::{
        host::{AnimationFormat, RenderHost, ViewKind},
        outcome::{Outcome, WarningPolicy},
        session::{HostSession, TERMINATE_ON_ERROR, Termination},
    },
    tiling::planner::{compute_pixel_bounds, to_normalized_raytracing_region},
};

/// Stage of a render invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum RenderState {
    /// Not started.
    Start,
    /// Checking parameters; nothing has been sent to the host.
    Validating,
    /// Remapping references and applying settings.
    Configuring,
    /// Render triggered.
    Rendering,
    /// Render completed.
    Succeeded,
    /// A stage failed.
    Failed,
    /// Host session ended.
    Terminated,
}

/// One render task: validate, remap scene references, configure the host, render, and end
/// the host session.
#[derive(Debug)]
pub struct RenderJob {
    params: RenderParameters,
    mapper: PathMapper,
    warning_policy: WarningPolicy,
    terminate_on_error: bool,
    history: Vec<RenderState>,
    warnings: Vec<String>,
    termination: Option<Termination>,
}

impl RenderJob {
    /// Job for `params`, mapping paths with the rules file they name (if any).
    pub fn new(params: RenderParameters) -> Self {
        let mapper = match &params.path_mapping_rules_file {
            Some(path) if !path.trim().is_empty() => PathMapper::from_rules_file(path.trim()),
            _ => PathMapper::identity(),
        };
        let warning_policy = WarningPolicy::from_fail_flag(params.job_failure_on_warnings);
        Self {
            params,
            mapper,
            warning_policy,
            terminate_on_error: TERMINATE_ON_ERROR,
            history: vec![RenderState::Start],
            warnings: Vec::new(),
            termination: None,
        }
    }

    /// Replace the path mapper.
    pub fn with_mapper(mut self, mapper: PathMapper) -> Self {
        self.mapper = mapper;
        self
    }

    /// Choose between abnormal (true) and plain termination after a failure.
    pub fn with_terminate_on_error(mut self, terminate_on_error: bool) -> Self {
        self.terminate_on_error = terminate_on_error;
        self
    }

    /// Parameters of this job.
    pub fn params(&self) -> &RenderParameters {
        &self.params
    }

    /// Path mapper used for scene references.
    pub fn mapper(&self) -> &PathMapper {
        &self.mapper
    }

    /// Current stage.
    pub fn state(&self) -> RenderState {
        self.history.last().copied().unwrap_or(RenderState::Start)
    }

    /// Every stage entered so far, in order.
    pub fn history(&self) -> &[RenderState] {
        &self.history
    }

    /// Soft warnings raised so far.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// How the host session ended, once it has.
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    /// Run the task against `host`.
    ///
    /// The host session is always ended exactly once before this returns, whatever the
    /// outcome. The error of the failing stage is logged and returned.
    #[tracing::instrument(skip(self, host), fields(job_type = %self.params.job_type))]
    pub fn render<H: RenderHost + ?Sized>(&mut self, host: &mut H) -> VredResult<()> {
        let mut session = HostSession::with_policy(host, self.terminate_on_error);
        let result = self.run(session.host());
        match &result {
            Ok(()) => self.enter(RenderState::Succeeded),
            Err(e) => {
                error!(error = %e, "render failed");
                self.enter(RenderState::Failed);
            }
        }
        self.termination = Some(session.finish(result.is_ok()));
        self.enter(RenderState::Terminated);
        result
    }

    fn enter(&mut self, state: RenderState) {
        debug!(?state, "render state");
        self.history.push(state);
    }

    fn run<H: RenderHost + ?Sized>(&mut self, host: &mut H) -> VredResult<()> {
        self.enter(RenderState::Validating);
        info!("validating render settings");
        let selections = self.params.validate()?;

        self.enter(RenderState::Configuring);
        self.init_file_references(host)?;
        self.init_render_settings(host, &selections)?;

        self.enter(RenderState::Rendering);
        info!(output = %self.params.output_filename(), "starting render");
        host.start_render_to_file()
    }

    fn settle(&mut self, outcome: Outcome) -> VredResult<()> {
        if let Outcome::Warning(msg) = &outcome {
            self.warnings.push(msg.clone());
        }
        outcome.escalate(self.warning_policy)
    }

    fn init_file_references<H: RenderHost + ?Sized>(&mut self, host: &mut H) -> VredResult<()> {
        for reference in host.scene_references()? {
            let mapped = self.mapper.map_path(&reference.path);
            debug!(from = %reference.path, to = %mapped, kind = ?reference.kind, "scene reference");
            host.set_reference_path(&reference, &mapped)?;
        }
        Ok(())
    }

    fn init_render_settings<H: RenderHost + ?Sized>(
        &mut self,
        host: &mut H,
        selections: &RenderSelections,
    ) -> VredResult<()> {
        match selections.job_type {
            JobType::RenderQueue => {
                info!("rendering all jobs in the render queue");
                host.run_all_render_jobs()?;
            }
            JobType::Sequencer => {
                let name = self.params.sequence_name.trim();
                if name.is_empty() {
                    info!("running all sequences");
                    host.run_all_sequences()?;
                } else {
                    info!(sequence = name, "running sequence");
                    host.run_sequence(name)?;
                }
            }
            JobType::Render => self.init_render_job(host, selections)?,
        }

        if self.params.override_render_pass {
            host.set_use_render_passes(self.params.export_render_passes)?;
        }
        host.set_premultiply(self.params.premultiply_alpha)?;
        host.set_tonemap_hdr(self.params.tonemap_hdr)?;
        self.init_render_region(host, selections)?;
        host.set_render_filename(&self.params.output_filename())
    }

    fn init_render_job<H: RenderHost + ?Sized>(
        &mut self,
        host: &mut H,
        selections: &RenderSelections,
    ) -> VredResult<()> {
        let view = self.init_camera_view(host);
        self.settle(view)?;
        self.init_render_quality_modes(host, selections)?;

        let p = &self.params;
        host.set_pixel_resolution(p.image_width, p.image_height, p.dpi)?;
        host.set_render_animation(p.render_animation)?;
        if p.render_animation {
            host.set_render_frame_range(&selections.frames)?;
            host.set_animation_format(AnimationFormat::Image)?;
            host.set_animation_type(selections.animation_type)?;
            host.set_animation_clip(&p.animation_clip)?;
            // Without supersampling some scenes render black noisy frames when headless.
            host.set_render_supersampling(true)?;
            // Each task renders only its own frames, never the whole clip.
            host.set_use_clip_range(false)?;
        }
        host.set_render_alpha(p.include_alpha_channel)
    }

    // A viewpoint wins over a camera of the same name; an empty name keeps the current view.
    fn init_camera_view<H: RenderHost + ?Sized>(&self, host: &mut H) -> Outcome {
        let name = self.params.view.as_str();
        if name.is_empty() {
            return Outcome::Ok;
        }
        Self::activate_named_view(host, name).into()
    }

    fn activate_named_view<H: RenderHost + ?Sized>(
        host: &mut H,
        name: &str,
    ) -> VredResult<Outcome> {
        let kind = if host.viewpoint_names()?.iter().any(|v| v == name) {
            ViewKind::Viewpoint
        } else if host.camera_names()?.iter().any(|c| c == name) {
            ViewKind::Camera
        } else {
            return Ok(Outcome::warning(format!(
                "Could not find the specified camera or viewpoint name \"{name}\"."
            )));
        };
        info!(?kind, name, "activating view");
        host.activate_view(kind, name)?;
        Ok(Outcome::Ok)
    }

    fn init_render_quality_modes<H: RenderHost + ?Sized>(
        &mut self,
        host: &mut H,
        selections: &RenderSelections,
    ) -> VredResult<()> {
        host.set_render_quality(selections.render_quality)?;

        let mut dlss_applied = false;
        if selections.dlss_quality.is_enabled() && host.is_dlss_supported() {
            info!(quality = %selections.dlss_quality, "DLSS quality set");
            host.set_dlss_quality(selections.dlss_quality)?;
            dlss_applied = true;
        }
        if selections.ss_quality.is_enabled() {
            if dlss_applied {
                self.settle(Outcome::warning(
                    "DLSS is already enabled. Non-DLSS Supersampling will be ignored.",
                ))?;
            } else {
                host.set_supersampling_quality(selections.ss_quality)?;
                info!(quality = %selections.ss_quality, "supersampling quality set");
                host.set_supersampling(true)?;
            }
        }

        let gpu = self.params.gpu_raytracing;
        info!(gpu, "GPU ray tracing");
        host.enable_raytracing(gpu)?;
        host.set_raytracing_mode(gpu)
    }

    fn init_render_region<H: RenderHost + ?Sized>(
        &self,
        host: &mut H,
        selections: &RenderSelections,
    ) -> VredResult<()> {
        host.set_use_render_region(self.params.region_rendering)?;
        let Some(tile) = selections.tile.filter(|_| self.params.region_rendering) else {
            return Ok(());
        };
        let bounds = compute_pixel_bounds(&tile)?;
        let region = to_normalized_raytracing_region(&bounds, tile.image_width, tile.image_height)?;
        debug!(?bounds, ?region, "render region");
        host.set_render_region(bounds)?;
        host.set_raytracing_render_region(region)?;
        host.enable_raytracing(true)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/job.rs"]
mod tests;
