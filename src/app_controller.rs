use anyhow::{Context, Result, anyhow};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::app_config::Config;
use crate::decomposer::{DecomposeOptions, decompose_with_options};
use crate::errors::ConvertError;
use crate::file_utils::{FileManager, FileType};
use crate::language_utils;
use crate::naming;
use crate::recomposer::recompose;
use crate::table;

// @module: Application controller wiring files to the conversion core

/// Main application controller for document/table conversion
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    /// Create a new controller for test purposes with default configuration
    pub fn new_for_test() -> Result<Self> {
        Self::with_config(Config::default())
    }

    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate().context("Configuration validation failed")?;
        Ok(Self { config })
    }

    /// Append the run marker (with rotation) when the run log is enabled.
    /// Called once per invocation, before any conversion work.
    pub fn start_run(&self) -> Result<()> {
        if self.config.run_log.enabled {
            FileManager::append_run_marker(&self.config.run_log.path, self.config.run_log.keep_runs)?;
        }
        Ok(())
    }

    fn output_dir<'a>(&'a self, override_dir: Option<&'a Path>) -> &'a Path {
        override_dir.unwrap_or(self.config.output_dir.as_path())
    }

    /// Export: XLIFF document -> translation table.
    /// Returns the path of the written table.
    pub fn run_export(&self, input_file: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
        info!("Export started: {:?}", input_file);

        if !FileManager::file_exists(input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let file_name = input_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        let document_bytes = FileManager::read_bytes(input_file)?;
        let options = DecomposeOptions {
            formula_source_language: self.config.source_language.clone(),
        };
        let output = decompose_with_options(&document_bytes, &file_name, &options)?;

        info!("Model name: {}", output.model_name);
        self.log_language_code(&output.language_code);

        let table_path = FileManager::generate_output_path(
            self.output_dir(output_dir),
            &format!("{}.csv", output.model_name),
        );
        let mut table_bytes = Vec::new();
        table::write_table(&mut table_bytes, &output.records)?;
        FileManager::write_bytes_atomic(&table_path, &table_bytes)?;

        info!("Table created: {:?} ({} row(s))", table_path, output.records.len());
        Ok(table_path)
    }

    /// Import: original XLIFF document + edited table -> translated XLIFF.
    ///
    /// The original document is an explicit, per-invocation handle; nothing is
    /// staged between export and import. Returns the path of the written
    /// document.
    pub fn run_import(
        &self,
        original_file: &Path,
        table_file: &Path,
        output_dir: Option<&Path>,
    ) -> Result<PathBuf> {
        info!("Import started: {:?} + {:?}", original_file, table_file);

        if !FileManager::file_exists(original_file) {
            return Err(anyhow!("Original document does not exist: {:?}", original_file));
        }
        if !FileManager::file_exists(table_file) {
            return Err(anyhow!("Translation table does not exist: {:?}", table_file));
        }

        let table_bytes = FileManager::read_bytes(table_file)?;
        if table_bytes.is_empty() {
            return Err(ConvertError::MissingInput { what: "translation table" }.into());
        }
        let records = table::read_table(table_bytes.as_slice())?;
        info!("Loaded {} translation row(s)", records.len());

        let table_name = table_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let (fallback_model_name, _) = naming::split_model_and_language(&table_name);
        debug!("Model from table file: {fallback_model_name}");

        let original_bytes = FileManager::read_bytes(original_file)?;
        let output = recompose(&original_bytes, &records, &fallback_model_name)?;

        if output.summary.unmatched_rows > 0 {
            warn!(
                "{} table row(s) matched no trans-unit and were ignored",
                output.summary.unmatched_rows
            );
        }
        if output.summary.fallback_units > 0 {
            debug!(
                "{} trans-unit(s) kept their own source text as target",
                output.summary.fallback_units
            );
        }

        let document_path =
            FileManager::generate_output_path(self.output_dir(output_dir), &output.output_name);
        FileManager::write_bytes_atomic(&document_path, &output.document_bytes)?;

        info!("Final document created: {:?}", document_path);
        Ok(document_path)
    }

    /// Convert a file based on its detected type: documents are exported;
    /// tables cannot be converted on their own because the merge needs the
    /// original document.
    pub fn run_convert(&self, input_file: &Path, output_dir: Option<&Path>) -> Result<PathBuf> {
        match FileManager::detect_file_type(input_file)? {
            FileType::Xliff => self.run_export(input_file, output_dir),
            FileType::Table => Err(anyhow!(
                "{:?} is a translation table; use `import` with the original document",
                input_file
            )),
            FileType::Unknown => Err(anyhow!(
                "Could not determine the type of {:?}; use `export` or `import` explicitly",
                input_file
            )),
        }
    }

    fn log_language_code(&self, language_code: &str) {
        if language_code.is_empty() {
            info!("Language code: none (filename carries no two-letter suffix)");
        } else {
            match language_utils::language_name(language_code) {
                Some(name) => info!("Language code: {language_code} ({name})"),
                None => warn!("Language code: {language_code} (not a known ISO 639-1 code)"),
            }
        }
    }
}
