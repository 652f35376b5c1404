// src/pipeline.rs - Per-file diagnosis: classify, format and attach management advice

use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::Serialize;

use crate::classifier::{Classification, ClassifierContext, DiagnosisSource};
use crate::config::Config;
use crate::disease_info::get_disease_info;
use crate::errors::{AgroLeafError, Result};
use crate::image_io::report_name;
use crate::labels::format_disease_name;
use crate::output::write_json_report;
use crate::plant_type::PlantType;

/// Everything reported for one analysed image
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiagnosisReport {
    pub filename: String,
    /// Display name, e.g. "Tomato - Late blight"
    pub disease: String,
    pub class_name: String,
    /// Percent, rounded to two decimals
    pub confidence: f64,
    pub severity: String,
    pub treatment: String,
    pub prevention: String,
    pub plant_type: Option<PlantType>,
    /// "heuristic", "external:<model>" or "degraded"
    pub source: String,
    pub degraded_reason: Option<String>,
}

impl DiagnosisReport {
    pub fn is_degraded(&self) -> bool {
        self.degraded_reason.is_some()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Turn a classification into a report row
pub fn build_report(filename: &str, classification: Classification) -> DiagnosisReport {
    let (plant_type, source, degraded_reason) = match &classification {
        Classification::Diagnosed(diagnosis) => {
            let source = match &diagnosis.source {
                DiagnosisSource::Heuristic { .. } => "heuristic".to_string(),
                DiagnosisSource::External { model } => format!("external:{}", model),
            };
            (diagnosis.plant(), source, None)
        }
        Classification::Degraded(reason) => (None, "degraded".to_string(), Some(reason.to_string())),
    };

    let (class_name, confidence) = classification.into_pair();
    let info = get_disease_info(&class_name);

    DiagnosisReport {
        filename: filename.to_string(),
        disease: format_disease_name(&class_name),
        class_name,
        confidence: round2(confidence),
        severity: info.severity.to_string(),
        treatment: info.treatment.to_string(),
        prevention: info.prevention.to_string(),
        plant_type,
        source,
        degraded_reason,
    }
}

/// Diagnose one image file
///
/// A path that cannot be read is an error. Bytes that do not decode as an
/// image give a degraded report instead.
pub fn diagnose_file<P: AsRef<Path>>(path: P, context: &ClassifierContext) -> Result<DiagnosisReport> {
    let path = path.as_ref();
    diagnose_named(path, &report_name(path, path)?, context)
}

/// Diagnose one image file, reporting it under `filename`
pub fn diagnose_named(path: &Path, filename: &str, context: &ClassifierContext) -> Result<DiagnosisReport> {
    if !path.is_file() {
        return Err(AgroLeafError::InvalidPath(path.to_path_buf()));
    }

    let bytes = fs::read(path)?;
    let report = build_report(filename, context.classify_bytes(&bytes));

    log::info!(
        "{}: {} ({:.2}%) [{}]",
        filename,
        report.disease,
        report.confidence,
        report.source
    );
    Ok(report)
}

/// Diagnose one file and write its JSON report when configured
///
/// The report is named after the path relative to `config.input_path`.
pub fn process_file(path: &Path, context: &ClassifierContext, config: &Config) -> Result<DiagnosisReport> {
    let filename = report_name(path, &config.input_path)?;
    let report = diagnose_named(path, &filename, context)?;
    if config.write_json_reports {
        write_json_report(&report, &config.output_base_dir)?;
    }
    Ok(report)
}

/// Diagnose a list of files, in parallel when `config.use_parallel` is set
///
/// Results keep the input order. A failure on one file does not stop the rest.
pub fn process_files(
    paths: &[PathBuf],
    context: &ClassifierContext,
    config: &Config,
) -> Vec<(PathBuf, Result<DiagnosisReport>)> {
    let run = |path: &PathBuf| {
        log::debug!("Processing: {}", path.display());
        (path.clone(), process_file(path, context, config))
    };

    if config.use_parallel {
        paths.par_iter().map(run).collect()
    } else {
        paths.iter().map(run).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::{DegradedReason, Diagnosis};
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn diagnosed_report_carries_display_name_and_advice() {
        let classification = Classification::Diagnosed(Diagnosis {
            class_name: "Tomato___Late_blight".to_string(),
            confidence: 87.456,
            source: DiagnosisSource::External { model: "cnn".to_string() },
        });
        let report = build_report("leaf_01", classification);

        assert_eq!(report.disease, "Tomato - Late blight");
        assert_approx_eq!(report.confidence, 87.46);
        assert_eq!(report.severity, "High");
        assert_eq!(report.source, "external:cnn");
        assert_eq!(report.plant_type, None);
        assert!(!report.is_degraded());
    }

    #[test]
    fn degraded_report_uses_unknown_disease() {
        let classification = Classification::Degraded(DegradedReason::Decode("bad header".to_string()));
        let report = build_report("broken", classification);

        assert_eq!(report.disease, "Unknown Disease");
        assert_approx_eq!(report.confidence, 50.0);
        assert_eq!(report.source, "degraded");
        assert!(report.degraded_reason.unwrap().contains("bad header"));
    }

    #[test]
    fn missing_file_is_an_error() {
        let ctx = ClassifierContext::default();
        let result = diagnose_file("/definitely/not/here.png", &ctx);
        assert!(matches!(result, Err(AgroLeafError::InvalidPath(_))));
    }

    #[test]
    fn garbage_file_is_degraded() {
        let dir = std::env::temp_dir().join(format!("agro_leaf_pipeline_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("garbage.png");
        fs::write(&path, b"plainly not a png").unwrap();

        let report = diagnose_file(&path, &ClassifierContext::default()).unwrap();
        assert_eq!(report.filename, "garbage.png");
        assert_eq!(report.class_name, "Unknown Disease");
        assert!(report.is_degraded());

        fs::remove_dir_all(&dir).unwrap();
    }
}
