pub mod config;
pub mod error;
pub mod materialize;
pub mod prompt;
pub mod template;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::config::{AuthFlags, DatabaseFlags, ResolvedConfig};
use crate::error::{BledError, Result};
use crate::materialize::{ensure_destination_available, materialize, patch_manifest};
use crate::prompt::{Prompter, Settled};
use crate::template::{resolve_template_key, TemplateBundle, TemplateCatalog, TemplateKey};

/// Raw generation request as it arrives from the command line.
#[derive(Debug, Default)]
pub struct GenerateOptions {
    pub project: Option<String>,
    pub databases: DatabaseFlags,
    pub auths: AuthFlags,
    /// Directory the project is created in.
    pub cwd: PathBuf,
}

/// Everything needed to materialize a project that has been planned but not yet written.
#[derive(Debug)]
pub struct GenerationPlan {
    pub config: ResolvedConfig,
    pub bundle: TemplateBundle,
    pub destination: PathBuf,
}

#[derive(Debug)]
pub struct GeneratedProject {
    pub path: PathBuf,
    pub key: TemplateKey,
    pub files: Vec<PathBuf>,
}

/// Turn flags and prompt answers into a [`ResolvedConfig`].
///
/// Conflicting flags fail before anything is asked. The destination is
/// checked right after the project name is known, so the user is not asked
/// about a database for a project that can't be created.
pub fn resolve_config<P: Prompter>(
    options: GenerateOptions,
    prompter: &mut P,
) -> Result<ResolvedConfig> {
    let database_flag = options.databases.selected()?;
    let auth_flag = options.auths.selected()?;

    let raw_name = match options.project {
        Some(name) => name,
        None => prompter.project_name()?,
    };
    let project_name = validate_project_name(&raw_name)?;
    ensure_destination_available(&options.cwd, &project_name)?;
    prompter.settled(Settled::ProjectName(&project_name));

    let database = match database_flag {
        Some(database) => {
            prompter.settled(Settled::Database(database));
            database
        }
        None => prompter.database()?,
    };

    let auth = match auth_flag {
        Some(auth) => auth,
        None => prompter.auth()?,
    };

    Ok(ResolvedConfig {
        project_name,
        database,
        auth,
    })
}

fn validate_project_name(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(BledError::InvalidProjectName);
    }
    Ok(name.to_string())
}

/// Locate the bundle and check the destination without writing anything.
pub fn plan_generation(
    config: ResolvedConfig,
    catalog: &TemplateCatalog,
    cwd: &Path,
) -> Result<GenerationPlan> {
    let key = resolve_template_key(config.database, config.auth);
    let bundle = catalog.locate_bundle(key)?;
    let destination = ensure_destination_available(cwd, &config.project_name)?;

    Ok(GenerationPlan {
        config,
        bundle,
        destination,
    })
}

/// Copy the planned bundle and personalize its manifest.
///
/// The destination is checked again right before copying.
pub fn execute_generation(plan: GenerationPlan, cwd: &Path) -> Result<GeneratedProject> {
    let destination = ensure_destination_available(cwd, &plan.config.project_name)?;
    let report = materialize(&plan.bundle, &destination)?;
    patch_manifest(&destination, &plan.config.project_name)?;

    info!(
        project = %plan.config.project_name,
        template = %plan.bundle.key,
        files = report.files.len(),
        "project generated"
    );

    Ok(GeneratedProject {
        path: destination,
        key: plan.bundle.key,
        files: report.files,
    })
}

/// Generate a project from a resolved configuration.
pub fn generate(
    config: ResolvedConfig,
    catalog: &TemplateCatalog,
    cwd: &Path,
) -> Result<GeneratedProject> {
    let plan = plan_generation(config, catalog, cwd)?;
    execute_generation(plan, cwd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("my-app", "my-app")]
    #[case("  padded  ", "padded")]
    fn test_validate_project_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(validate_project_name(raw).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn test_validate_project_name_rejects_blank(#[case] raw: &str) {
        assert!(matches!(
            validate_project_name(raw),
            Err(BledError::InvalidProjectName)
        ));
    }
}
