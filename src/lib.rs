// src/lib.rs - Library interface for AgroLeaf

pub mod cascade;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod crop_advice;
pub mod disease_info;
pub mod disease_rules;
pub mod errors;
pub mod feature_extraction;
pub mod image_io;
pub mod image_utils;
pub mod labels;
pub mod output;
pub mod pipeline;
pub mod plant_type;

// Re-export commonly used types and functions
pub use errors::{AgroLeafError, Result};
pub use config::Config;
pub use image_io::{decode_image, report_name};
pub use pipeline::{diagnose_file, DiagnosisReport};

// Classification entry point
pub use classifier::{
    classify_heuristic,
    Classification,
    ClassifierContext,
    DegradedReason,
    Diagnosis,
    DiagnosisSource,
    ExternalClassifier,
};

// Rule tables
pub use cascade::{Cascade, Decision, Rule};
pub use feature_extraction::{extract_features, ColorFeatures};
pub use plant_type::{identify_plant, PlantType};
pub use disease_rules::{diagnose, DiseaseOutcome};
pub use catalog::{UNKNOWN_DISEASE, DEGRADED_CONFIDENCE};

// Presentation
pub use labels::format_disease_name;
pub use disease_info::{get_disease_info, DiseaseInfo};

// Crop advice
pub use crop_advice::{
    fertilizer_for,
    recommend_crop,
    CropRecommendation,
    FertilizerPlan,
    SoilConditions,
};
