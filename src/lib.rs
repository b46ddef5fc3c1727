//! Worker-side core of a VRED render-farm integration.
//!
//! A render task on a farm worker receives a set of job parameters, relocates the scene's file
//! references to the worker's filesystem, configures the host application's renderer, renders,
//! and then ends the host session so its license is released for the next task.
//!
//! # Building blocks
//!
//! - **Path mapping** ([`PathMapper`]): ordered prefix rules rewriting paths between the
//!   submitting machine and the worker. Windows rules match case-insensitively.
//! - **Tile planning** ([`compute_pixel_bounds`], [`to_normalized_raytracing_region`]): exact
//!   pixel bounds for one cell of a tile grid, with remainder pixels in the last row and
//!   column, and the bottom-up normalized region used by the ray tracer.
//! - **Parameters** ([`RenderParameters`]): the typed job parameter record and its validation.
//! - **Orchestration** ([`RenderJob`]): validate, remap, configure and render against any
//!   [`RenderHost`]; the host session is ended exactly once on every path.
//! - **Job bundles** ([`write_job_bundle`]): parameter values and asset references for the
//!   farm scheduler.
//! - **Tile assembly** ([`assemble_directory`]): recompose rendered tiles into full frames.
//!
//! `unsafe` is forbidden in this crate.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assemble;
mod bundle;
mod foundation;
mod mapping;
mod params;
mod render;
mod tiling;

pub use assemble::tiles::{AssembleOptions, TileImage, assemble_directory, assemble_frame};
pub use bundle::assets::{ASSET_REFERENCES_FILENAME, AssetReferences};
pub use bundle::parameters::{
    PARAMETER_VALUES_FIELD, PARAMETER_VALUES_FILENAME, ParamValue, ParameterValue,
    parameter_values, parse_parameter_values, read_parameter_values,
};
pub use bundle::writer::{JobBundleFiles, read_job_bundle_parameters, write_job_bundle};
pub use foundation::core::{FRAME_STEP_DEFAULT, FrameRange, ImageSize};
pub use foundation::error::{VredError, VredResult};
pub use foundation::paths::{PathStyle, normalize_path, to_forward_slashes};
pub use mapping::mapper::{PathMapper, apply_rules};
pub use mapping::rules::{
    PATH_MAPPING_RULES_FIELD, PathFormat, PathMappingRule, parse_rules, read_rules_file,
};
pub use params::options::{
    AnimationType, DlssQuality, JobType, RenderQuality, SupersamplingQuality,
};
pub use params::render_params::{
    BOOLEAN_PARAMETER_NAMES, CONDA_PARAMETER_NAMES, RenderParameters, RenderSelections,
};
pub use render::host::{AnimationFormat, ReferenceKind, RenderHost, SceneReference, ViewKind};
pub use render::job::{RenderJob, RenderState};
pub use render::outcome::{Outcome, WarningPolicy};
pub use render::recording::{HostCall, RecordingHost};
pub use render::session::{CRASH_EXIT_CODE, HostSession, TERMINATE_ON_ERROR, Termination};
pub use tiling::naming::{RENDER_REGION_FIELD_NAME, TileImageName, region_suffix};
pub use tiling::planner::{
    PixelBounds, TileGrid, TileSpec, compute_pixel_bounds, to_normalized_raytracing_region,
};
