// src/plant_type.rs - Guess the plant species from colour features

use std::fmt;
use serde::Serialize;

use crate::cascade::{Cascade, Rule};
use crate::feature_extraction::ColorFeatures;

/// Intermediate species guess that selects the disease cascade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlantType {
    Tomato,
    Corn,
    Potato,
    Apple,
    Rice,
    Wheat,
    Grape,
    Tea,
    Coffee,
    Cotton,
    Sugarcane,
    /// No species predicate matched
    General,
}

impl PlantType {
    pub const ALL: [PlantType; 12] = [
        PlantType::Tomato,
        PlantType::Corn,
        PlantType::Potato,
        PlantType::Apple,
        PlantType::Rice,
        PlantType::Wheat,
        PlantType::Grape,
        PlantType::Tea,
        PlantType::Coffee,
        PlantType::Cotton,
        PlantType::Sugarcane,
        PlantType::General,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PlantType::Tomato => "tomato",
            PlantType::Corn => "corn",
            PlantType::Potato => "potato",
            PlantType::Apple => "apple",
            PlantType::Rice => "rice",
            PlantType::Wheat => "wheat",
            PlantType::Grape => "grape",
            PlantType::Tea => "tea",
            PlantType::Coffee => "coffee",
            PlantType::Cotton => "cotton",
            PlantType::Sugarcane => "sugarcane",
            PlantType::General => "general",
        }
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Species cascade. Order is load-bearing: predicates overlap, and the
/// first one that holds decides.
pub static PLANT_CASCADE: Cascade<ColorFeatures, PlantType> = Cascade {
    name: "plant",
    rules: &[
        // Red or orange fruit in frame
        Rule {
            name: "tomato",
            predicate: |f| f.red_ratio > 0.15 || (f.orange_ratio > 0.2 && f.r_mean > 140.0),
            outcome: PlantType::Tomato,
        },
        Rule {
            name: "apple",
            predicate: |f| f.red_ratio > 0.1 && f.green_ratio > 0.3,
            outcome: PlantType::Apple,
        },
        // Open white bolls among foliage
        Rule {
            name: "cotton",
            predicate: |f| f.bright_ratio > 0.2 && f.green_ratio > 0.3,
            outcome: PlantType::Cotton,
        },
        Rule {
            name: "corn",
            predicate: |f| {
                f.green_ratio > 0.4 && f.yellow_ratio > 0.1 && f.r_mean < 140.0 && f.total_std < 60.0
            },
            outcome: PlantType::Corn,
        },
        // Golden heads with some dry tissue
        Rule {
            name: "wheat",
            predicate: |f| f.yellow_ratio > 0.25 && f.green_ratio < 0.4 && f.brown_ratio > 0.05,
            outcome: PlantType::Wheat,
        },
        // Bright, even, blue-poor blades
        Rule {
            name: "rice",
            predicate: |f| {
                f.green_ratio > 0.5 && f.gb_ratio > 1.8 && f.total_std < 40.0 && f.g_mean > 140.0
            },
            outcome: PlantType::Rice,
        },
        Rule {
            name: "sugarcane",
            predicate: |f| f.green_ratio > 0.45 && f.brown_ratio > 0.05 && f.total_std > 45.0,
            outcome: PlantType::Sugarcane,
        },
        Rule {
            name: "potato",
            predicate: |f| f.green_ratio > 0.5 && f.r_mean < 100.0 && f.brown_ratio > 0.1,
            outcome: PlantType::Potato,
        },
        // Dark bluish berry clusters
        Rule {
            name: "grape",
            predicate: |f| f.green_ratio > 0.3 && f.dark_ratio > 0.05 && f.rb_ratio < 1.2,
            outcome: PlantType::Grape,
        },
        // Dark glossy leaves; brown tissue separates coffee from tea
        Rule {
            name: "tea",
            predicate: |f| f.green_ratio > 0.6 && f.g_mean < 120.0 && f.brown_ratio <= 0.05,
            outcome: PlantType::Tea,
        },
        Rule {
            name: "coffee",
            predicate: |f| f.green_ratio > 0.5 && f.g_mean < 120.0 && f.brown_ratio > 0.05,
            outcome: PlantType::Coffee,
        },
    ],
    fallback: PlantType::General,
};

/// Classify the plant species shown in an image
pub fn identify_plant(features: &ColorFeatures) -> PlantType {
    *PLANT_CASCADE.evaluate(features)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Neutral grey-ish features that match no species rule
    pub(crate) fn neutral_features() -> ColorFeatures {
        ColorFeatures {
            r_mean: 120.0,
            g_mean: 120.0,
            b_mean: 120.0,
            r_std: 20.0,
            g_std: 20.0,
            b_std: 20.0,
            rg_ratio: 120.0 / 121.0,
            rb_ratio: 120.0 / 121.0,
            gb_ratio: 120.0 / 121.0,
            total_std: 20.0,
            bright_ratio: 0.0,
            dark_ratio: 0.0,
            red_ratio: 0.0,
            orange_ratio: 0.0,
            yellow_ratio: 0.0,
            green_ratio: 0.0,
            brown_ratio: 0.0,
        }
    }

    #[test]
    fn neutral_features_fall_through_to_general() {
        assert_eq!(identify_plant(&neutral_features()), PlantType::General);
    }

    #[test]
    fn tomato_outranks_apple() {
        // Satisfies both the tomato and the apple predicate
        let f = ColorFeatures { red_ratio: 0.4, green_ratio: 0.5, ..neutral_features() };
        assert!((PLANT_CASCADE.rule("apple").unwrap().predicate)(&f));
        assert_eq!(identify_plant(&f), PlantType::Tomato);
    }

    #[test]
    fn apple_needs_foliage() {
        let f = ColorFeatures { red_ratio: 0.12, green_ratio: 0.35, ..neutral_features() };
        assert_eq!(identify_plant(&f), PlantType::Apple);
    }

    #[test]
    fn orange_fruit_counts_as_tomato_only_when_red_channel_is_high() {
        let f = ColorFeatures { orange_ratio: 0.3, r_mean: 150.0, ..neutral_features() };
        assert_eq!(identify_plant(&f), PlantType::Tomato);

        let f = ColorFeatures { orange_ratio: 0.3, r_mean: 130.0, ..neutral_features() };
        assert_eq!(identify_plant(&f), PlantType::General);
    }

    #[test]
    fn cotton_before_corn() {
        let f = ColorFeatures {
            bright_ratio: 0.25,
            green_ratio: 0.5,
            yellow_ratio: 0.15,
            r_mean: 100.0,
            total_std: 30.0,
            ..neutral_features()
        };
        assert_eq!(identify_plant(&f), PlantType::Cotton);

        let f = ColorFeatures { bright_ratio: 0.0, ..f };
        assert_eq!(identify_plant(&f), PlantType::Corn);
    }

    #[test]
    fn wheat_needs_dry_tissue_among_yellow() {
        let f = ColorFeatures {
            yellow_ratio: 0.4,
            green_ratio: 0.2,
            brown_ratio: 0.1,
            ..neutral_features()
        };
        assert_eq!(identify_plant(&f), PlantType::Wheat);

        let f = ColorFeatures { brown_ratio: 0.0, ..f };
        assert_eq!(identify_plant(&f), PlantType::General);
    }

    #[test]
    fn rice_needs_bright_even_green() {
        let f = ColorFeatures {
            green_ratio: 0.8,
            g_mean: 180.0,
            gb_ratio: 2.5,
            total_std: 25.0,
            ..neutral_features()
        };
        assert_eq!(identify_plant(&f), PlantType::Rice);

        // Same blades but uneven: no longer rice
        let f = ColorFeatures { total_std: 45.0, ..f };
        assert_ne!(identify_plant(&f), PlantType::Rice);
    }

    #[test]
    fn grape_needs_dark_berries_low_red() {
        let f = ColorFeatures {
            green_ratio: 0.4,
            dark_ratio: 0.1,
            rb_ratio: 0.9,
            ..neutral_features()
        };
        assert_eq!(identify_plant(&f), PlantType::Grape);

        let f = ColorFeatures { rb_ratio: 1.5, ..f };
        assert_eq!(identify_plant(&f), PlantType::General);
    }

    #[test]
    fn sugarcane_shadows_potato_on_high_variability() {
        let f = ColorFeatures {
            green_ratio: 0.6,
            r_mean: 80.0,
            brown_ratio: 0.15,
            total_std: 50.0,
            ..neutral_features()
        };
        assert_eq!(identify_plant(&f), PlantType::Sugarcane);

        let f = ColorFeatures { total_std: 30.0, ..f };
        assert_eq!(identify_plant(&f), PlantType::Potato);
    }

    #[test]
    fn tea_and_coffee_split_on_brown() {
        let f = ColorFeatures { green_ratio: 0.7, g_mean: 100.0, brown_ratio: 0.02, ..neutral_features() };
        assert_eq!(identify_plant(&f), PlantType::Tea);

        let f = ColorFeatures { brown_ratio: 0.08, ..f };
        assert_eq!(identify_plant(&f), PlantType::Coffee);
    }

    #[test]
    fn every_plant_type_has_a_name() {
        for plant in PlantType::ALL {
            assert!(!plant.to_string().is_empty());
        }
    }
}
