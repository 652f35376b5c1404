// src/classifier.rs - Classification entry point: external model first, colour heuristic second

use image::RgbImage;
use serde::Serialize;
use thiserror::Error;

use crate::catalog::{plant_village_class, DEGRADED_CONFIDENCE, PLANT_VILLAGE_CLASSES, UNKNOWN_DISEASE};
use crate::config::Config;
use crate::disease_rules::diagnose;
use crate::errors::{AgroLeafError, Result};
use crate::feature_extraction::extract_features;
use crate::image_io::decode_image;
use crate::image_utils::resize_image;
use crate::plant_type::{identify_plant, PlantType};

/// A trained model that scores the PlantVillage classes
///
/// Implementations return one score per entry of [`PLANT_VILLAGE_CLASSES`],
/// in the same order, each in [0, 1].
pub trait ExternalClassifier: Send + Sync {
    fn name(&self) -> &str;
    fn class_scores(&self, image: &RgbImage) -> Result<Vec<f32>>;
}

/// Which stage produced a diagnosis
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiagnosisSource {
    Heuristic { plant: PlantType, rule: &'static str },
    External { model: String },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnosis {
    /// Internal `Plant___Disease` class label
    pub class_name: String,
    /// Percent
    pub confidence: f64,
    pub source: DiagnosisSource,
}

impl Diagnosis {
    pub fn plant(&self) -> Option<PlantType> {
        match self.source {
            DiagnosisSource::Heuristic { plant, .. } => Some(plant),
            DiagnosisSource::External { .. } => None,
        }
    }
}

/// Why an image could not be diagnosed
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum DegradedReason {
    #[error("image could not be decoded: {0}")]
    Decode(String),
    #[error("feature computation failed: {0}")]
    Computation(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Classification {
    Diagnosed(Diagnosis),
    Degraded(DegradedReason),
}

impl Classification {
    /// Collapse to the `(label, confidence)` pair used in reports
    ///
    /// Every failure maps to `("Unknown Disease", 50.0)`.
    pub fn into_pair(self) -> (String, f64) {
        match self {
            Classification::Diagnosed(diagnosis) => (diagnosis.class_name, diagnosis.confidence),
            Classification::Degraded(_) => (UNKNOWN_DISEASE.to_string(), DEGRADED_CONFIDENCE),
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, Classification::Degraded(_))
    }

    pub fn diagnosis(&self) -> Option<&Diagnosis> {
        match self {
            Classification::Diagnosed(diagnosis) => Some(diagnosis),
            Classification::Degraded(_) => None,
        }
    }
}

impl From<AgroLeafError> for DegradedReason {
    fn from(err: AgroLeafError) -> Self {
        match err {
            AgroLeafError::Image(e) => DegradedReason::Decode(e.to_string()),
            other => DegradedReason::Computation(other.to_string()),
        }
    }
}

/// Read-only settings shared by every classification in a run
pub struct ClassifierContext {
    pub external: Option<Box<dyn ExternalClassifier>>,
    pub min_external_confidence: f64,
    pub analysis_dimensions: [u32; 2],
}

impl Default for ClassifierContext {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl ClassifierContext {
    pub fn from_config(config: &Config) -> Self {
        Self {
            external: None,
            min_external_confidence: config.min_external_confidence,
            analysis_dimensions: config.analysis_dimensions,
        }
    }

    pub fn with_external(mut self, classifier: Box<dyn ExternalClassifier>) -> Self {
        self.external = Some(classifier);
        self
    }

    /// Decode and classify encoded image bytes
    pub fn classify_bytes(&self, bytes: &[u8]) -> Classification {
        match decode_image(bytes) {
            Ok(image) => self.classify(&image),
            Err(e) => {
                log::warn!("Returning degraded result: {}", e);
                Classification::Degraded(e.into())
            }
        }
    }

    /// Classify a decoded raster
    pub fn classify(&self, image: &RgbImage) -> Classification {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            let err = AgroLeafError::EmptyImage { width, height };
            log::warn!("Returning degraded result: {}", err);
            return Classification::Degraded(err.into());
        }

        if let Some(diagnosis) = self.try_external(image) {
            return Classification::Diagnosed(diagnosis);
        }

        match classify_heuristic(image, self.analysis_dimensions) {
            Ok(diagnosis) => Classification::Diagnosed(diagnosis),
            Err(e) => {
                log::warn!("Returning degraded result: {}", e);
                Classification::Degraded(e.into())
            }
        }
    }

    /// External prediction if one is configured and confident enough
    fn try_external(&self, image: &RgbImage) -> Option<Diagnosis> {
        let model = self.external.as_ref()?;

        let scores = match model.class_scores(image) {
            Ok(scores) => scores,
            Err(e) => {
                log::warn!("External classifier '{}' failed, using heuristic: {}", model.name(), e);
                return None;
            }
        };

        if scores.len() != PLANT_VILLAGE_CLASSES.len() {
            log::warn!(
                "External classifier '{}' returned {} scores, expected {}; using heuristic",
                model.name(),
                scores.len(),
                PLANT_VILLAGE_CLASSES.len()
            );
            return None;
        }

        let (index, best) = scores
            .iter()
            .enumerate()
            .filter(|(_, score)| score.is_finite())
            .max_by(|a, b| a.1.total_cmp(b.1))?;
        let confidence = *best as f64 * 100.0;
        let class_name = plant_village_class(index)?;

        if confidence < self.min_external_confidence {
            log::info!(
                "External prediction {} at {:.1}% is below {:.1}%, using heuristic",
                class_name,
                confidence,
                self.min_external_confidence
            );
            return None;
        }

        log::debug!("External classifier '{}' -> {} ({:.1}%)", model.name(), class_name, confidence);
        Some(Diagnosis {
            class_name: class_name.to_string(),
            confidence,
            source: DiagnosisSource::External { model: model.name().to_string() },
        })
    }
}

/// Colour-heuristic diagnosis: resize, extract features, identify the plant,
/// then run that plant's disease cascade.
pub fn classify_heuristic(image: &RgbImage, analysis_dimensions: [u32; 2]) -> Result<Diagnosis> {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return Err(AgroLeafError::EmptyImage { width, height });
    }

    let analysed = resize_image(image, analysis_dimensions);
    let features = extract_features(&analysed)?;
    let plant = identify_plant(&features);
    let decision = diagnose(plant, &features);

    log::debug!(
        "Plant '{}' rule '{}' -> {} ({}%)",
        plant,
        decision.rule,
        decision.outcome.label,
        decision.outcome.confidence
    );

    Ok(Diagnosis {
        class_name: decision.outcome.label.to_string(),
        confidence: decision.outcome.confidence as f64,
        source: DiagnosisSource::Heuristic { plant, rule: decision.rule },
    })
}
