use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::Context;

use crate::{
    bundle::{
        assets::{ASSET_REFERENCES_FILENAME, AssetReferences},
        parameters::{
            PARAMETER_VALUES_FILENAME, ParameterValue, ParameterValuesDocument, parameter_values,
            read_parameter_values,
        },
    },
    foundation::error::{VredError, VredResult},
    params::render_params::RenderParameters,
};

/// Paths of the artifacts written by [`write_job_bundle`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JobBundleFiles {
    /// `parameter_values.yaml`.
    pub parameter_values: PathBuf,
    /// `asset_references.yaml`.
    pub asset_references: PathBuf,
}

/// Write the parameter values and asset references of one submission into `dir`.
///
/// The directory is created when missing. The job template is supplied separately.
#[tracing::instrument(skip(params, queue_parameters, assets), fields(dir = %dir.display()))]
pub fn write_job_bundle(
    dir: &Path,
    params: &RenderParameters,
    queue_parameters: &[ParameterValue],
    assets: &AssetReferences,
) -> VredResult<JobBundleFiles> {
    let values = parameter_values(params, queue_parameters)?;
    fs::create_dir_all(dir)
        .with_context(|| format!("create job bundle dir '{}'", dir.display()))?;

    let doc = ParameterValuesDocument {
        parameter_values: &values,
    };
    let text = serde_yaml::to_string(&doc).map_err(|e| VredError::serde(e.to_string()))?;
    let parameter_values = dir.join(PARAMETER_VALUES_FILENAME);
    fs::write(&parameter_values, text)
        .with_context(|| format!("write '{}'", parameter_values.display()))?;

    let asset_references = dir.join(ASSET_REFERENCES_FILENAME);
    fs::write(&asset_references, assets.to_yaml()?)
        .with_context(|| format!("write '{}'", asset_references.display()))?;

    tracing::info!(parameters = values.len(), "job bundle written");
    Ok(JobBundleFiles {
        parameter_values,
        asset_references,
    })
}

/// Load the render parameters stored in a job bundle directory.
pub fn read_job_bundle_parameters(dir: &Path) -> VredResult<RenderParameters> {
    let values = read_parameter_values(&dir.join(PARAMETER_VALUES_FILENAME))?;
    RenderParameters::from_parameter_values(&values)
}

#[cfg(test)]
#[path = "../../tests/unit/bundle/writer.rs"]
mod tests;
