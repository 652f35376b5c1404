// src/disease_rules.rs - Per-species disease cascades
//
// Every cascade ends in an unconditional fallback, so a diagnosis always
// exists for a well-formed feature vector. Confidences are fixed per branch;
// they express how distinctive the colour pattern is, not a probability.

use serde::Serialize;

use crate::cascade::{Cascade, Decision, Rule};
use crate::feature_extraction::ColorFeatures;
use crate::plant_type::PlantType;

/// Class label plus the fixed confidence of the branch that chose it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiseaseOutcome {
    pub label: &'static str,
    pub confidence: u8,
}

const fn outcome(label: &'static str, confidence: u8) -> DiseaseOutcome {
    DiseaseOutcome { label, confidence }
}

pub type DiseaseCascade = Cascade<ColorFeatures, DiseaseOutcome>;

pub static TOMATO_CASCADE: DiseaseCascade = Cascade {
    name: "tomato",
    rules: &[
        // Dark brown/black water-soaked lesions
        Rule {
            name: "late_blight",
            predicate: |f| f.dark_ratio > 0.05 && f.brown_ratio > 0.1 && f.total_std > 45.0,
            outcome: outcome("Tomato___Late_blight", 82),
        },
        Rule {
            name: "bacterial_spot",
            predicate: |f| f.dark_ratio > 0.03 && f.total_std > 50.0,
            outcome: outcome("Tomato___Bacterial_spot", 78),
        },
        // Brown concentric rings
        Rule {
            name: "early_blight",
            predicate: |f| f.brown_ratio > 0.15 && f.total_std > 40.0,
            outcome: outcome("Tomato___Early_blight", 75),
        },
        Rule {
            name: "target_spot",
            predicate: |f| f.brown_ratio > 0.1 && f.dark_ratio > 0.02,
            outcome: outcome("Tomato___Target_Spot", 72),
        },
        Rule {
            name: "septoria_leaf_spot",
            predicate: |f| f.dark_ratio > 0.02 && f.yellow_ratio > 0.05,
            outcome: outcome("Tomato___Septoria_leaf_spot", 70),
        },
        Rule {
            name: "yellow_leaf_curl_virus",
            predicate: |f| f.yellow_ratio > 0.3 && f.green_ratio < 0.3,
            outcome: outcome("Tomato___Tomato_Yellow_Leaf_Curl_Virus", 80),
        },
        Rule {
            name: "leaf_mold",
            predicate: |f| f.yellow_ratio > 0.2 && f.brown_ratio > 0.05,
            outcome: outcome("Tomato___Leaf_Mold", 68),
        },
        // Pale stippling over otherwise green leaves
        Rule {
            name: "spider_mites",
            predicate: |f| f.bright_ratio > 0.1 && f.green_ratio > 0.2 && f.total_std > 40.0,
            outcome: outcome("Tomato___Spider_mites Two-spotted_spider_mite", 64),
        },
        // Light/dark green mottling
        Rule {
            name: "mosaic_virus",
            predicate: |f| f.green_ratio > 0.3 && f.yellow_ratio > 0.1 && f.total_std > 35.0,
            outcome: outcome("Tomato___Tomato_mosaic_virus", 66),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.red_ratio > 0.2 && f.dark_ratio < 0.02,
            outcome: outcome("Tomato___healthy", 85),
        },
    ],
    fallback: outcome("Tomato___Bacterial_spot", 65),
};

pub static APPLE_CASCADE: DiseaseCascade = Cascade {
    name: "apple",
    rules: &[
        Rule {
            name: "apple_scab",
            predicate: |f| f.dark_ratio > 0.05 && f.brown_ratio > 0.1,
            outcome: outcome("Apple___Apple_scab", 75),
        },
        Rule {
            name: "black_rot",
            predicate: |f| f.dark_ratio > 0.1,
            outcome: outcome("Apple___Black_rot", 78),
        },
        Rule {
            name: "cedar_apple_rust",
            predicate: |f| f.orange_ratio > 0.05 && f.yellow_ratio > 0.1,
            outcome: outcome("Apple___Cedar_apple_rust", 72),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.red_ratio > 0.3 || f.green_ratio > 0.5,
            outcome: outcome("Apple___healthy", 85),
        },
    ],
    fallback: outcome("Apple___Apple_scab", 68),
};

pub static COTTON_CASCADE: DiseaseCascade = Cascade {
    name: "cotton",
    rules: &[
        // Angular water-soaked lesions turning brown-black
        Rule {
            name: "bacterial_blight",
            predicate: |f| f.brown_ratio > 0.1 && f.dark_ratio > 0.05,
            outcome: outcome("Cotton___Bacterial_blight", 76),
        },
        Rule {
            name: "leaf_curl_virus",
            predicate: |f| f.yellow_ratio > 0.15 && f.total_std > 40.0,
            outcome: outcome("Cotton___Leaf_curl_virus", 72),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.green_ratio > 0.4 && f.dark_ratio < 0.03,
            outcome: outcome("Cotton___healthy", 84),
        },
    ],
    fallback: outcome("Cotton___Bacterial_blight", 64),
};

pub static CORN_CASCADE: DiseaseCascade = Cascade {
    name: "corn",
    rules: &[
        // Orange/yellow pustules
        Rule {
            name: "common_rust",
            predicate: |f| f.yellow_ratio > 0.15 && f.orange_ratio > 0.1,
            outcome: outcome("Corn_(maize)___Common_rust_", 78),
        },
        // Long tan lesions
        Rule {
            name: "northern_leaf_blight",
            predicate: |f| f.brown_ratio > 0.15 && f.total_std > 45.0,
            outcome: outcome("Corn_(maize)___Northern_Leaf_Blight", 75),
        },
        Rule {
            name: "gray_leaf_spot",
            predicate: |f| f.brown_ratio > 0.1 && f.dark_ratio > 0.05,
            outcome: outcome("Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot", 72),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.green_ratio > 0.5 && f.dark_ratio < 0.02,
            outcome: outcome("Corn_(maize)___healthy", 85),
        },
    ],
    fallback: outcome("Corn_(maize)___Common_rust_", 68),
};

pub static WHEAT_CASCADE: DiseaseCascade = Cascade {
    name: "wheat",
    rules: &[
        // Yellow stripes of pustules
        Rule {
            name: "yellow_rust",
            predicate: |f| f.yellow_ratio > 0.35 && f.orange_ratio > 0.05,
            outcome: outcome("Wheat___Yellow_rust", 80),
        },
        Rule {
            name: "powdery_mildew",
            predicate: |f| f.bright_ratio > 0.15 && f.r_mean > 150.0,
            outcome: outcome("Wheat___Powdery_mildew", 70),
        },
        Rule {
            name: "septoria",
            predicate: |f| f.brown_ratio > 0.15 && f.dark_ratio > 0.03,
            outcome: outcome("Wheat___Septoria", 72),
        },
        // Evenly ripened golden crop
        Rule {
            name: "healthy",
            predicate: |f| f.yellow_ratio > 0.4 && f.dark_ratio < 0.02,
            outcome: outcome("Wheat___healthy", 76),
        },
    ],
    fallback: outcome("Wheat___Yellow_rust", 66),
};

pub static RICE_CASCADE: DiseaseCascade = Cascade {
    name: "rice",
    rules: &[
        // Spindle lesions, grey centre, dark margin
        Rule {
            name: "blast",
            predicate: |f| f.brown_ratio > 0.1 && f.dark_ratio > 0.05,
            outcome: outcome("Rice___Blast", 78),
        },
        Rule {
            name: "brown_spot",
            predicate: |f| f.brown_ratio > 0.08 && f.total_std > 35.0,
            outcome: outcome("Rice___Brown_spot", 74),
        },
        // Yellowing from the tip with straw-white edges
        Rule {
            name: "bacterial_leaf_blight",
            predicate: |f| f.yellow_ratio > 0.15 && f.bright_ratio > 0.05,
            outcome: outcome("Rice___Bacterial_leaf_blight", 72),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.green_ratio > 0.6 && f.dark_ratio < 0.02,
            outcome: outcome("Rice___healthy", 86),
        },
    ],
    fallback: outcome("Rice___Blast", 65),
};

pub static SUGARCANE_CASCADE: DiseaseCascade = Cascade {
    name: "sugarcane",
    rules: &[
        Rule {
            name: "red_rot",
            predicate: |f| f.red_ratio > 0.05 && f.brown_ratio > 0.1,
            outcome: outcome("Sugarcane___Red_rot", 77),
        },
        Rule {
            name: "orange_rust",
            predicate: |f| f.orange_ratio > 0.08 && f.brown_ratio > 0.08,
            outcome: outcome("Sugarcane___Orange_rust", 73),
        },
        Rule {
            name: "yellow_leaf",
            predicate: |f| f.yellow_ratio > 0.2 && f.green_ratio < 0.6,
            outcome: outcome("Sugarcane___Yellow_leaf", 70),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.green_ratio > 0.55 && f.dark_ratio < 0.03,
            outcome: outcome("Sugarcane___healthy", 82),
        },
    ],
    fallback: outcome("Sugarcane___Red_rot", 62),
};

pub static POTATO_CASCADE: DiseaseCascade = Cascade {
    name: "potato",
    rules: &[
        Rule {
            name: "late_blight",
            predicate: |f| f.dark_ratio > 0.1 && f.brown_ratio > 0.15,
            outcome: outcome("Potato___Late_blight", 82),
        },
        Rule {
            name: "early_blight",
            predicate: |f| f.brown_ratio > 0.15 && f.total_std > 40.0,
            outcome: outcome("Potato___Early_blight", 76),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.green_ratio > 0.6,
            outcome: outcome("Potato___healthy", 85),
        },
    ],
    fallback: outcome("Potato___Early_blight", 70),
};

pub static GRAPE_CASCADE: DiseaseCascade = Cascade {
    name: "grape",
    rules: &[
        Rule {
            name: "black_rot",
            predicate: |f| f.dark_ratio > 0.15 && f.brown_ratio > 0.05,
            outcome: outcome("Grape___Black_rot", 80),
        },
        // Tiger-stripe necrosis
        Rule {
            name: "esca",
            predicate: |f| f.brown_ratio > 0.15 && f.total_std > 45.0,
            outcome: outcome("Grape___Esca_(Black_Measles)", 74),
        },
        Rule {
            name: "leaf_blight",
            predicate: |f| f.brown_ratio > 0.1 && f.yellow_ratio > 0.05,
            outcome: outcome("Grape___Leaf_blight_(Isariopsis_Leaf_Spot)", 71),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.green_ratio > 0.5 && f.dark_ratio < 0.1,
            outcome: outcome("Grape___healthy", 83),
        },
    ],
    fallback: outcome("Grape___Black_rot", 66),
};

pub static TEA_CASCADE: DiseaseCascade = Cascade {
    name: "tea",
    rules: &[
        // Pale translucent blisters on young leaves
        Rule {
            name: "blister_blight",
            predicate: |f| f.bright_ratio > 0.05 && f.yellow_ratio > 0.05,
            outcome: outcome("Tea___Blister_blight", 74),
        },
        // Algal red rust patches
        Rule {
            name: "red_rust",
            predicate: |f| f.red_ratio > 0.03 || f.orange_ratio > 0.05,
            outcome: outcome("Tea___Red_rust", 70),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.dark_ratio < 0.15,
            outcome: outcome("Tea___healthy", 84),
        },
    ],
    fallback: outcome("Tea___Blister_blight", 63),
};

pub static COFFEE_CASCADE: DiseaseCascade = Cascade {
    name: "coffee",
    rules: &[
        // Orange powder on leaf undersides
        Rule {
            name: "leaf_rust",
            predicate: |f| f.orange_ratio > 0.05 || f.yellow_ratio > 0.1,
            outcome: outcome("Coffee___Leaf_rust", 79),
        },
        Rule {
            name: "cercospora_leaf_spot",
            predicate: |f| f.dark_ratio > 0.1 && f.brown_ratio > 0.1,
            outcome: outcome("Coffee___Cercospora_leaf_spot", 72),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.green_ratio > 0.6 && f.dark_ratio < 0.05,
            outcome: outcome("Coffee___healthy", 83),
        },
    ],
    fallback: outcome("Coffee___Leaf_rust", 64),
};

/// Catch-all when the species could not be identified
pub static GENERAL_CASCADE: DiseaseCascade = Cascade {
    name: "general",
    rules: &[
        Rule {
            name: "rust",
            predicate: |f| f.orange_ratio > 0.1 && f.yellow_ratio > 0.1,
            outcome: outcome("Corn_(maize)___Common_rust_", 68),
        },
        Rule {
            name: "leaf_spot",
            predicate: |f| f.dark_ratio > 0.03 && f.total_std > 50.0,
            outcome: outcome("Tomato___Bacterial_spot", 66),
        },
        Rule {
            name: "blight",
            predicate: |f| f.dark_ratio > 0.15 && f.brown_ratio > 0.1,
            outcome: outcome("Tomato___Late_blight", 75),
        },
        // White powdery coating
        Rule {
            name: "powdery_mildew",
            predicate: |f| f.bright_ratio > 0.25 && f.r_mean > 160.0 && f.g_mean > 160.0,
            outcome: outcome("Squash___Powdery_mildew", 73),
        },
        // Mostly necrotic tissue
        Rule {
            name: "severe_blight",
            predicate: |f| f.dark_ratio > 0.4,
            outcome: outcome("Potato___Late_blight", 70),
        },
        Rule {
            name: "chlorosis",
            predicate: |f| f.yellow_ratio > 0.3 && f.green_ratio < 0.3,
            outcome: outcome("Orange___Haunglongbing_(Citrus_greening)", 62),
        },
        Rule {
            name: "healthy",
            predicate: |f| f.green_ratio > 0.6 && f.dark_ratio < 0.02,
            outcome: outcome("Tomato___healthy", 80),
        },
    ],
    fallback: outcome("Tomato___Bacterial_spot", 60),
};

/// Disease cascade owned by a plant type
pub fn cascade_for(plant: PlantType) -> &'static DiseaseCascade {
    match plant {
        PlantType::Tomato => &TOMATO_CASCADE,
        PlantType::Apple => &APPLE_CASCADE,
        PlantType::Cotton => &COTTON_CASCADE,
        PlantType::Corn => &CORN_CASCADE,
        PlantType::Wheat => &WHEAT_CASCADE,
        PlantType::Rice => &RICE_CASCADE,
        PlantType::Sugarcane => &SUGARCANE_CASCADE,
        PlantType::Potato => &POTATO_CASCADE,
        PlantType::Grape => &GRAPE_CASCADE,
        PlantType::Tea => &TEA_CASCADE,
        PlantType::Coffee => &COFFEE_CASCADE,
        PlantType::General => &GENERAL_CASCADE,
    }
}

/// Select the disease for an identified plant
pub fn diagnose(plant: PlantType, features: &ColorFeatures) -> Decision<'static, DiseaseOutcome> {
    cascade_for(plant).decide(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::is_known_class;
    use crate::plant_type::tests::neutral_features;

    #[test]
    fn every_outcome_is_a_catalog_class_with_bounded_confidence() {
        for plant in PlantType::ALL {
            for outcome in cascade_for(plant).outcomes() {
                assert!(is_known_class(outcome.label), "{} -> {}", plant, outcome.label);
                assert!((60..=92).contains(&outcome.confidence), "{}", outcome.label);
            }
        }
    }

    #[test]
    fn species_cascades_stay_within_their_species() {
        for plant in PlantType::ALL {
            if plant == PlantType::General {
                continue;
            }
            let cascade = cascade_for(plant);
            let prefix = cascade.fallback.label.split("___").next().unwrap();
            for outcome in cascade.outcomes() {
                assert!(outcome.label.starts_with(prefix), "{}", outcome.label);
            }
        }
    }

    #[test]
    fn general_powdery_mildew_on_white_coating() {
        let f = ColorFeatures {
            bright_ratio: 1.0,
            r_mean: 255.0,
            g_mean: 255.0,
            b_mean: 255.0,
            ..neutral_features()
        };
        let decision = diagnose(PlantType::General, &f);
        assert_eq!(decision.rule, "powdery_mildew");
        assert_eq!(decision.outcome.label, "Squash___Powdery_mildew");
        assert_eq!(decision.outcome.confidence, 73);
    }

    #[test]
    fn general_dark_image_is_blight_not_healthy() {
        let f = ColorFeatures {
            dark_ratio: 1.0,
            r_mean: 0.0,
            g_mean: 0.0,
            b_mean: 0.0,
            total_std: 0.0,
            ..neutral_features()
        };
        let decision = diagnose(PlantType::General, &f);
        assert_eq!(decision.rule, "severe_blight");
        assert!(decision.outcome.label.contains("blight"));
    }

    #[test]
    fn tomato_late_blight_precedes_bacterial_spot() {
        let f = ColorFeatures {
            dark_ratio: 0.1,
            brown_ratio: 0.2,
            total_std: 55.0,
            ..neutral_features()
        };
        assert_eq!(diagnose(PlantType::Tomato, &f).outcome.label, "Tomato___Late_blight");

        let f = ColorFeatures { brown_ratio: 0.0, ..f };
        assert_eq!(diagnose(PlantType::Tomato, &f).outcome.label, "Tomato___Bacterial_spot");
    }

    #[test]
    fn unmatched_features_take_the_fallback() {
        let decision = diagnose(PlantType::Potato, &neutral_features());
        assert_eq!(decision.rule, crate::cascade::FALLBACK_RULE);
        assert_eq!(*decision.outcome, outcome("Potato___Early_blight", 70));
    }

    #[test]
    fn green_leaves_are_healthy_for_leafy_species() {
        let f = ColorFeatures { green_ratio: 0.9, ..neutral_features() };
        for plant in [
            PlantType::Corn,
            PlantType::Rice,
            PlantType::Potato,
            PlantType::Grape,
            PlantType::Coffee,
            PlantType::Cotton,
            PlantType::Sugarcane,
            PlantType::Tea,
            PlantType::General,
        ] {
            let label = diagnose(plant, &f).outcome.label;
            assert!(label.ends_with("healthy"), "{} -> {}", plant, label);
        }
    }
}
