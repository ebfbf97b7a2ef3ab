//! High-level public API for template extraction and rewriting.

use std::path::Path;
use std::time::Instant;

use crate::ExtractionReport;
use crate::NoopProgress;
use crate::ProgressCallback;
use crate::Result;
use crate::RewritePolicy;
use crate::RewriteReport;
use crate::ScaffoldConfig;
use crate::ScaffoldReport;
use crate::extraction::Extractor;
use crate::extraction::staged_extract;
use crate::formats::TemplateArchive;
use crate::rewrite::rewrite_tree;
use crate::types::DestDir;
use crate::types::ProjectName;

/// Extracts a template archive into `output_base/project_name`.
///
/// The template root folder (`config.template_root`) is stripped from every
/// stored path; entries outside it are extracted unchanged. The project
/// name is trimmed before use.
///
/// # Arguments
///
/// * `archive_path` - Path to the zip template
/// * `output_base` - Existing directory that receives the project folder
/// * `project_name` - Name of the project folder
/// * `config` - Template root and extraction policies
///
/// # Errors
///
/// Returns an error if:
/// - The configuration or project name is invalid
/// - The archive cannot be opened (`ArchiveOpen`)
/// - An entry escapes the project root (`PathTraversal`)
/// - A directory or file cannot be written (`DirectoryCreate`, `Copy`)
///
/// Files written before a failure are left in place.
///
/// # Examples
///
/// ```no_run
/// use gocanon_core::ScaffoldConfig;
/// use gocanon_core::extract_template;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = extract_template("go-canonical.zip", ".", "widget", &ScaffoldConfig::default())?;
/// println!("Extracted {} files", report.files_extracted);
/// # Ok(())
/// # }
/// ```
pub fn extract_template<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_base: Q,
    project_name: &str,
    config: &ScaffoldConfig,
) -> Result<ExtractionReport> {
    config.validate()?;
    let project_name = ProjectName::parse(project_name)?;
    let base = DestDir::new(output_base.as_ref())?;
    let mut archive = TemplateArchive::open(archive_path)?;

    Extractor::new(config).extract(&mut archive, &base, &project_name, &mut NoopProgress)
}

/// Replaces `placeholder` with `project_name` in every file under `root_dir`
/// selected by `policy`.
///
/// `project_name` is used verbatim. Files are rewritten in place and keep
/// their permissions; files without an occurrence are not touched.
///
/// # Errors
///
/// Returns an error if:
/// - `placeholder` is empty (`InvalidConfig`)
/// - The tree cannot be traversed (`Walk`)
/// - A target cannot be read or written (`Rewrite`)
///
/// # Examples
///
/// ```no_run
/// use gocanon_core::RewritePolicy;
/// use gocanon_core::rewrite_all;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let report = rewrite_all("widget", "go-canonical", "widget", &RewritePolicy::default())?;
/// println!("Rewrote {} files", report.files_rewritten);
/// # Ok(())
/// # }
/// ```
pub fn rewrite_all<P: AsRef<Path>>(
    root_dir: P,
    placeholder: &str,
    project_name: &str,
    policy: &RewritePolicy,
) -> Result<RewriteReport> {
    rewrite_tree(root_dir.as_ref(), placeholder, project_name, policy)
}

/// Extracts the template and rewrites the placeholder in one run.
///
/// Equivalent to [`scaffold_with_progress`] with [`NoopProgress`].
///
/// # Errors
///
/// See [`extract_template`] and [`rewrite_all`]. In staged mode an
/// existing project directory fails with `DestinationExists`.
pub fn scaffold<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_base: Q,
    project_name: &str,
    config: &ScaffoldConfig,
) -> Result<ScaffoldReport> {
    scaffold_with_progress(
        archive_path,
        output_base,
        project_name,
        config,
        &mut NoopProgress,
    )
}

/// Extracts the template and rewrites the placeholder, reporting extraction
/// progress to `progress`.
///
/// The archive is opened before anything is created on disk. With
/// `config.staged` set, both passes run inside a staging directory and the
/// project appears at its final location only if both succeed.
///
/// # Errors
///
/// See [`scaffold`].
///
/// # Examples
///
/// ```no_run
/// use gocanon_core::NoopProgress;
/// use gocanon_core::ScaffoldConfig;
/// use gocanon_core::scaffold_with_progress;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let config = ScaffoldConfig::default().with_staged(true);
/// let mut progress = NoopProgress;
/// let report =
///     scaffold_with_progress("go-canonical.zip", ".", "widget", &config, &mut progress)?;
/// println!("{} replacements", report.rewrite.replacements);
/// # Ok(())
/// # }
/// ```
pub fn scaffold_with_progress<P: AsRef<Path>, Q: AsRef<Path>>(
    archive_path: P,
    output_base: Q,
    project_name: &str,
    config: &ScaffoldConfig,
    progress: &mut dyn ProgressCallback,
) -> Result<ScaffoldReport> {
    let start = Instant::now();

    config.validate()?;
    let project_name = ProjectName::parse(project_name)?;
    let base = DestDir::new(output_base.as_ref())?;
    let mut archive = TemplateArchive::open(archive_path)?;

    let mut generate = |target: &DestDir| -> Result<(ExtractionReport, RewriteReport)> {
        let extraction =
            Extractor::new(config).extract(&mut archive, target, &project_name, progress)?;
        let rewrite = rewrite_tree(
            &target.join_path(project_name.as_ref()),
            &config.placeholder,
            project_name.as_str(),
            &config.rewrite_policy,
        )?;
        Ok((extraction, rewrite))
    };

    let (extraction, rewrite) = if config.staged {
        staged_extract(&base, &project_name, generate)?
    } else {
        generate(&base)?
    };

    let mut warnings = Vec::new();
    if project_name.contains_token(&config.placeholder) {
        warnings.push(format!(
            "project name '{project_name}' contains the placeholder '{}'",
            config.placeholder
        ));
    }
    warnings.extend(extraction.warnings.iter().cloned());

    progress.on_complete();

    Ok(ScaffoldReport {
        project_root: base.join_path(project_name.as_ref()),
        extraction,
        rewrite,
        duration: start.elapsed(),
        warnings,
    })
}
