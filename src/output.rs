use std::fs;
use std::path::{Path, PathBuf};
use csv::Writer;

use crate::errors::Result;
use crate::pipeline::DiagnosisReport;

/// File name of the batch summary inside the output directory
pub const DIAGNOSIS_CSV: &str = "diagnoses.csv";

/// Write one summary row per report to `<output_dir>/diagnoses.csv`
pub fn write_diagnosis_csv<P: AsRef<Path>>(
    reports: &[DiagnosisReport],
    output_dir: P,
) -> Result<PathBuf> {
    let output_path = output_dir.as_ref().join(DIAGNOSIS_CSV);

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut writer = Writer::from_path(&output_path)?;

    writer.write_record([
        "Filename",
        "Disease",
        "Class_Name",
        "Confidence",
        "Severity",
        "Plant_Type",
        "Source",
        "Degraded_Reason",
    ])?;

    for report in reports {
        writer.write_record(&[
            report.filename.clone(),
            report.disease.clone(),
            report.class_name.clone(),
            format!("{:.2}", report.confidence),
            report.severity.clone(),
            report.plant_type.map(|p| p.to_string()).unwrap_or_default(),
            report.source.clone(),
            report.degraded_reason.clone().unwrap_or_default(),
        ])?;
    }

    writer.flush()?;
    log::info!("Wrote {} rows to {}", reports.len(), output_path.display());

    Ok(output_path)
}

/// Write a full report as pretty JSON to `<output_dir>/reports/<filename>.json`
pub fn write_json_report<P: AsRef<Path>>(report: &DiagnosisReport, output_dir: P) -> Result<PathBuf> {
    let output_path = output_dir
        .as_ref()
        .join("reports")
        .join(format!("{}.json", report.filename));

    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(report)?;
    fs::write(&output_path, json)?;
    log::debug!("Wrote report {}", output_path.display());

    Ok(output_path)
}
