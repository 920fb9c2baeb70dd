use anyhow::{anyhow, Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, error, info, warn};
use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::app_config::Config;
use crate::catalog::{self, Catalog, CatalogStats, writer};
use crate::file_utils::{FileManager, FileType};
use crate::localizer;
use crate::translation::Translator;
use crate::validation::{ValidationReport, ValidationService};

// @module: Application controller for catalog processing

/// Result of a single lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupOutcome {
    /// Text an application would display
    pub text: String,
    /// Whether a translation was found, as opposed to the source fallback
    pub translated: bool,
}

/// Main application controller for catalog operations
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// TS files named by a path: the file itself, or every `.ts` under a directory
    pub fn collect_catalog_files(&self, input: &Path) -> Result<Vec<PathBuf>> {
        if input.is_file() {
            return Ok(vec![input.to_path_buf()]);
        }
        if input.is_dir() {
            let files = FileManager::find_files(input, "ts")?;
            if files.is_empty() {
                return Err(anyhow!("No .ts catalogs found in directory: {:?}", input));
            }
            return Ok(files);
        }
        Err(anyhow!("Input path does not exist: {:?}", input))
    }

    /// Parse a catalog, refusing files that are not TS catalogs
    pub fn load_catalog(&self, path: &Path) -> Result<Catalog> {
        match FileManager::detect_file_type(path)? {
            FileType::Catalog => {}
            FileType::Json => {
                let content = FileManager::read_to_string(path)?;
                return serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse JSON catalog: {:?}", path));
            }
            FileType::Unknown => {
                return Err(anyhow!("Not a TS catalog: {:?}", path));
            }
        }
        catalog::parse_file(path).with_context(|| format!("Failed to load catalog: {:?}", path))
    }

    /// Statistics for every catalog under `input`; unreadable catalogs keep their error
    pub fn stats(&self, input: &Path) -> Result<Vec<(PathBuf, Result<CatalogStats>)>> {
        let files = self.collect_catalog_files(input)?;
        let results = self.process_files(&files, "Counting", |path| {
            let catalog = self.load_catalog(path)?;
            Ok(CatalogStats::collect(&catalog))
        });
        Ok(results)
    }

    /// Validation reports for every catalog under `input`
    ///
    /// A catalog that fails to load is returned with its error so callers
    /// can count it as a failure.
    pub fn validate(&self, input: &Path) -> Result<Vec<(PathBuf, Result<ValidationReport>)>> {
        let files = self.collect_catalog_files(input)?;
        let service = ValidationService::new(self.config.validation.clone());
        let results = self.process_files(&files, "Validating", |path| {
            let catalog = self.load_catalog(path)?;
            Ok(service.validate(&catalog))
        });
        Ok(results)
    }

    /// Run `work` over each file, logging failures and keeping them in the output
    fn process_files<T, F>(&self, files: &[PathBuf], action: &str, work: F) -> Vec<(PathBuf, Result<T>)>
    where
        F: Fn(&Path) -> Result<T>,
    {
        let start_time = Instant::now();
        let progress = if files.len() > 1 {
            let bar = ProgressBar::new(files.len() as u64);
            let style = ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} catalogs ({percent}%) {msg}")
                .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
                .unwrap_or_else(|_| ProgressStyle::default_bar());
            bar.set_style(style.progress_chars("█▓▒░"));
            Some(bar)
        } else {
            None
        };

        let mut results = Vec::with_capacity(files.len());
        let mut failed = 0usize;
        for path in files {
            if let Some(bar) = &progress {
                bar.set_message(format!("{} {}", action, display_name(path)));
            }
            let outcome = work(path);
            if let Err(e) = &outcome {
                error!("{:?}: {:#}", path, e);
                failed += 1;
            }
            results.push((path.clone(), outcome));
            if let Some(bar) = &progress {
                bar.inc(1);
            }
        }

        if let Some(bar) = progress {
            bar.finish_and_clear();
        }
        debug!(
            "{} {} catalogs in {:.2?}, {} failed",
            action,
            files.len(),
            start_time.elapsed(),
            failed
        );
        results
    }

    /// Look up one string in a catalog file
    pub fn lookup(
        &self,
        file: &Path,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: Option<i64>,
    ) -> Result<LookupOutcome> {
        let catalog = self.load_catalog(file)?;
        let translator = Translator::from_catalog(&catalog, &self.config.release);

        let outcome = match translator.translate(context, source, comment, n) {
            Some(text) => LookupOutcome {
                text: text.into_owned(),
                translated: true,
            },
            None => LookupOutcome {
                text: translator.tr(context, source, comment, n).into_owned(),
                translated: false,
            },
        };

        if !outcome.translated {
            warn!("No translation for '{}' in context '{}'", source, context);
        }
        Ok(outcome)
    }

    /// Write a catalog as JSON; returns the output path
    pub fn export_json(&self, input: &Path, output: Option<PathBuf>, force_overwrite: bool) -> Result<PathBuf> {
        let catalog = self.load_catalog(input)?;
        let output = output.unwrap_or_else(|| {
            FileManager::generate_output_path(input, input.parent().unwrap_or(Path::new(".")), "json")
        });
        Self::check_overwrite(&output, force_overwrite)?;

        let json = serde_json::to_string_pretty(&catalog).context("Failed to serialize catalog")?;
        FileManager::write_to_file(&output, &json)?;

        info!("Exported {} messages to {:?}", catalog.message_count(), output);
        Ok(output)
    }

    /// Rewrite a catalog in canonical TS form; returns the output path
    ///
    /// Without an explicit output the input itself is rewritten, which
    /// requires `force_overwrite`.
    pub fn normalize(&self, input: &Path, output: Option<PathBuf>, force_overwrite: bool) -> Result<PathBuf> {
        let catalog = self.load_catalog(input)?;
        let output = output.unwrap_or_else(|| input.to_path_buf());
        Self::check_overwrite(&output, force_overwrite)?;

        writer::write_file(&catalog, &output)
            .with_context(|| format!("Failed to write catalog: {:?}", output))?;

        info!("Wrote {} contexts to {:?}", catalog.contexts.len(), output);
        Ok(output)
    }

    /// Languages with a catalog in the configured directory
    pub fn languages(&self) -> Vec<String> {
        localizer::available_languages(&self.config.catalogs)
    }

    fn check_overwrite(output: &Path, force_overwrite: bool) -> Result<()> {
        if output.exists() && !force_overwrite {
            return Err(anyhow!(
                "Output file already exists: {:?}. Use -f to force overwrite.",
                output
            ));
        }
        Ok(())
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
