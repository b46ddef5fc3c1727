use crate::{
    bundle::parameters::{ParamValue, ParameterValue},
    foundation::{
        core::{FrameRange, ImageSize},
        error::{VredError, VredResult},
    },
    params::options::{AnimationType, DlssQuality, JobType, RenderQuality, SupersamplingQuality},
    tiling::{naming::region_suffix, planner::TileGrid, planner::TileSpec},
};

/// Parameter names owned by the Conda queue environment rather than the render job.
pub const CONDA_PARAMETER_NAMES: &[&str] = &["CondaPackages", "CondaChannels"];

/// Boolean render parameters; scheduler-typed bundles carry these as `"true"`/`"false"` strings.
pub const BOOLEAN_PARAMETER_NAMES: &[&str] = &[
    "RegionRendering",
    "GPURaytracing",
    "RenderAnimation",
    "IncludeAlphaChannel",
    "PremultiplyAlpha",
    "TonemapHDR",
    "OverrideRenderPass",
    "ExportRenderPasses",
    "JobFailureOnWarnings",
];

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
/// Settings for one render task, keyed by the job template parameter names.
///
/// String selections (quality modes, animation type, job type) stay as submitted and are
/// checked by [`RenderParameters::validate`], which yields their typed form.
pub struct RenderParameters {
    /// Directory receiving rendered images.
    pub output_dir: String,
    /// File-name prefix of rendered images.
    pub output_file_name_prefix: String,
    /// Image format extension (`PNG`, `EXR`, ...).
    pub output_format: String,
    /// Render only one tile of the image.
    #[serde(default)]
    pub region_rendering: bool,
    /// 1-based tile column rendered by this task.
    #[serde(default = "default_tile")]
    pub tile_number_x: u32,
    /// 1-based tile row rendered by this task.
    #[serde(default = "default_tile")]
    pub tile_number_y: u32,
    /// Tile columns in the grid.
    #[serde(default = "default_tile")]
    pub num_x_tiles: u32,
    /// Tile rows in the grid.
    #[serde(default = "default_tile")]
    pub num_y_tiles: u32,
    /// Render quality name.
    pub render_quality: String,
    /// Supersampling quality name.
    #[serde(default = "default_off", rename = "SSQuality")]
    pub ss_quality: String,
    /// DLSS quality name.
    #[serde(default = "default_off", rename = "DLSSQuality")]
    pub dlss_quality: String,
    /// Animation type name.
    #[serde(default = "default_animation_type")]
    pub animation_type: String,
    /// Animation clip to render; empty for the whole timeline.
    #[serde(default)]
    pub animation_clip: String,
    /// First frame.
    pub start_frame: i64,
    /// Last frame (inclusive).
    pub end_frame: i64,
    /// Frame increment.
    #[serde(default = "default_frame_step")]
    pub frame_step: i64,
    /// Use GPU ray tracing.
    #[serde(default, rename = "GPURaytracing")]
    pub gpu_raytracing: bool,
    /// Camera or viewpoint to render from; empty keeps the scene's current view.
    #[serde(default)]
    pub view: String,
    /// JSON path mapping rules written by the worker agent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_mapping_rules_file: Option<String>,
    /// Render an animation instead of a still.
    #[serde(default)]
    pub render_animation: bool,
    /// Write an alpha channel.
    #[serde(default)]
    pub include_alpha_channel: bool,
    /// Premultiply color by alpha.
    #[serde(default)]
    pub premultiply_alpha: bool,
    /// Tonemap HDR output.
    #[serde(default, rename = "TonemapHDR")]
    pub tonemap_hdr: bool,
    /// Job type name.
    pub job_type: String,
    /// Sequence to run for sequencer jobs; empty runs all sequences.
    #[serde(default)]
    pub sequence_name: String,
    /// Override the scene's render pass settings.
    #[serde(default)]
    pub override_render_pass: bool,
    /// Render pass export flag applied when overriding.
    #[serde(default)]
    pub export_render_passes: bool,
    /// Full image width in pixels.
    pub image_width: u32,
    /// Full image height in pixels.
    pub image_height: u32,
    /// Output resolution in dots per inch.
    #[serde(default = "default_dpi", rename = "DPI")]
    pub dpi: u32,
    /// Fail the task when a soft warning is raised.
    #[serde(default)]
    pub job_failure_on_warnings: bool,
    /// Scene file loaded by the worker (submission side).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_file: Option<String>,
    /// Frames handled by one task (submission side).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames_per_task: Option<u32>,
}

/// Typed view of the selections in [`RenderParameters`], produced by validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct RenderSelections {
    /// Render quality mode.
    pub render_quality: RenderQuality,
    /// Supersampling quality.
    pub ss_quality: SupersamplingQuality,
    /// DLSS quality.
    pub dlss_quality: DlssQuality,
    /// Animation frame source.
    pub animation_type: AnimationType,
    /// Job type.
    pub job_type: JobType,
    /// Frames to render.
    pub frames: FrameRange,
    /// Tile rendered by this task, when region rendering is enabled.
    pub tile: Option<TileSpec>,
}

fn default_tile() -> u32 {
    1
}

fn default_off() -> String {
    SupersamplingQuality::Off.name().to_string()
}

fn default_animation_type() -> String {
    AnimationType::Clip.name().to_string()
}

fn default_frame_step() -> i64 {
    crate::foundation::core::FRAME_STEP_DEFAULT
}

fn default_dpi() -> u32 {
    72
}

impl RenderParameters {
    /// Parameters for a still render with the submitter's defaults.
    pub fn new(
        output_dir: impl Into<String>,
        output_file_name_prefix: impl Into<String>,
        output_format: impl Into<String>,
        size: ImageSize,
    ) -> Self {
        Self {
            output_dir: output_dir.into(),
            output_file_name_prefix: output_file_name_prefix.into(),
            output_format: output_format.into(),
            region_rendering: false,
            tile_number_x: default_tile(),
            tile_number_y: default_tile(),
            num_x_tiles: default_tile(),
            num_y_tiles: default_tile(),
            render_quality: RenderQuality::RealisticHigh.name().to_string(),
            ss_quality: default_off(),
            dlss_quality: default_off(),
            animation_type: default_animation_type(),
            animation_clip: String::new(),
            start_frame: 0,
            end_frame: 0,
            frame_step: default_frame_step(),
            gpu_raytracing: false,
            view: String::new(),
            path_mapping_rules_file: None,
            render_animation: false,
            include_alpha_channel: false,
            premultiply_alpha: false,
            tonemap_hdr: false,
            job_type: JobType::Render.name().to_string(),
            sequence_name: String::new(),
            override_render_pass: false,
            export_render_passes: false,
            image_width: size.width,
            image_height: size.height,
            dpi: default_dpi(),
            job_failure_on_warnings: false,
            scene_file: None,
            frames_per_task: None,
        }
    }

    /// Parse a JSON object of parameters.
    pub fn from_json(json: &str) -> VredResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| VredError::validation(format!("invalid render parameters: {e}")))
    }

    /// Build parameters from job-bundle parameter records.
    ///
    /// Scheduler-namespaced names (containing `:`) and Conda environment parameters are
    /// skipped; any other unknown name is rejected.
    pub fn from_parameter_values(values: &[ParameterValue]) -> VredResult<Self> {
        let mut obj = serde_json::Map::new();
        for pv in values {
            if pv.name.contains(':') || CONDA_PARAMETER_NAMES.contains(&pv.name.as_str()) {
                continue;
            }
            let v = match &pv.value {
                ParamValue::Bool(b) => serde_json::Value::Bool(*b),
                ParamValue::Int(i) => serde_json::Value::from(*i),
                ParamValue::Str(s) => serde_json::Value::String(s.clone()),
            };
            obj.insert(pv.name.clone(), v);
        }
        serde_json::from_value(serde_json::Value::Object(obj))
            .map_err(|e| VredError::validation(format!("invalid render parameters: {e}")))
    }

    /// Check every selection and numeric constraint, returning the typed selections.
    ///
    /// Fails on the first violation; nothing is applied to a host here.
    pub fn validate(&self) -> VredResult<RenderSelections> {
        let render_quality: RenderQuality = self.render_quality.parse()?;
        let ss_quality: SupersamplingQuality = self.ss_quality.parse()?;
        let dlss_quality: DlssQuality = self.dlss_quality.parse()?;
        let animation_type: AnimationType = self.animation_type.parse()?;
        if self.start_frame > self.end_frame {
            return Err(VredError::validation("StartFrame exceeds EndFrame"));
        }
        let job_type: JobType = self.job_type.parse()?;
        let frames = FrameRange::new(
            self.start_frame,
            Some(self.end_frame),
            Some(self.frame_step),
        )?;

        if job_type == JobType::Render || self.region_rendering {
            ImageSize::new(self.image_width, self.image_height)?;
        }
        let tile = if self.region_rendering {
            let spec = self.tile_spec();
            spec.validate()?;
            Some(spec)
        } else {
            None
        };

        Ok(RenderSelections {
            render_quality,
            ss_quality,
            dlss_quality,
            animation_type,
            job_type,
            frames,
            tile,
        })
    }

    /// Tile configuration described by these parameters (not validated).
    pub fn tile_spec(&self) -> TileSpec {
        TileSpec {
            num_x_tiles: self.num_x_tiles,
            num_y_tiles: self.num_y_tiles,
            tile_number_x: self.tile_number_x,
            tile_number_y: self.tile_number_y,
            image_width: self.image_width,
            image_height: self.image_height,
        }
    }

    /// Output file path handed to the renderer.
    ///
    /// Region renders get the `_region_{Y}x{X}_{NY}x{NX}` suffix so tiles can be reassembled.
    pub fn output_filename(&self) -> String {
        let dir = self.output_dir.trim().replace('\\', "/");
        let region = if self.region_rendering {
            region_suffix(
                self.tile_number_x,
                self.tile_number_y,
                TileGrid {
                    num_x_tiles: self.num_x_tiles,
                    num_y_tiles: self.num_y_tiles,
                },
            )
        } else {
            String::new()
        };
        let name = format!(
            "{}{region}.{}",
            self.output_file_name_prefix.trim(),
            self.output_format.trim().to_lowercase()
        );
        if dir.is_empty() || dir.ends_with('/') {
            format!("{dir}{name}")
        } else {
            format!("{dir}/{name}")
        }
    }

    /// Records for a job bundle, in field order.
    pub fn to_parameter_values(&self) -> VredResult<Vec<ParameterValue>> {
        let value = serde_yaml::to_value(self).map_err(|e| VredError::serde(e.to_string()))?;
        let serde_yaml::Value::Mapping(map) = value else {
            return Err(VredError::serde("render parameters did not serialize to a mapping"));
        };
        let mut out = Vec::with_capacity(map.len());
        for (k, v) in map {
            let serde_yaml::Value::String(name) = k else {
                return Err(VredError::serde("non-string render parameter key"));
            };
            let value = match v {
                serde_yaml::Value::Bool(b) => ParamValue::Bool(b),
                serde_yaml::Value::Number(n) => match n.as_i64() {
                    Some(i) => ParamValue::Int(i),
                    None => {
                        return Err(VredError::serde(format!(
                            "parameter '{name}' is not an integer: {n}"
                        )));
                    }
                },
                serde_yaml::Value::String(s) => ParamValue::Str(s),
                other => {
                    return Err(VredError::serde(format!(
                        "parameter '{name}' has unsupported value {other:?}"
                    )));
                }
            };
            out.push(ParameterValue { name, value });
        }
        Ok(out)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/params/render_params.rs"]
mod tests;
