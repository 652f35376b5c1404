// src/catalog.rs - Fixed disease class catalog

/// Label returned when an image could not be analysed at all
pub const UNKNOWN_DISEASE: &str = "Unknown Disease";

/// Confidence paired with [`UNKNOWN_DISEASE`]
pub const DEGRADED_CONFIDENCE: f64 = 50.0;

/// The 38 PlantVillage classes, in the index order external models emit scores
pub const PLANT_VILLAGE_CLASSES: [&str; 38] = [
    "Apple___Apple_scab",
    "Apple___Black_rot",
    "Apple___Cedar_apple_rust",
    "Apple___healthy",
    "Blueberry___healthy",
    "Cherry_(including_sour)___Powdery_mildew",
    "Cherry_(including_sour)___healthy",
    "Corn_(maize)___Cercospora_leaf_spot Gray_leaf_spot",
    "Corn_(maize)___Common_rust_",
    "Corn_(maize)___Northern_Leaf_Blight",
    "Corn_(maize)___healthy",
    "Grape___Black_rot",
    "Grape___Esca_(Black_Measles)",
    "Grape___Leaf_blight_(Isariopsis_Leaf_Spot)",
    "Grape___healthy",
    "Orange___Haunglongbing_(Citrus_greening)",
    "Peach___Bacterial_spot",
    "Peach___healthy",
    "Pepper,_bell___Bacterial_spot",
    "Pepper,_bell___healthy",
    "Potato___Early_blight",
    "Potato___Late_blight",
    "Potato___healthy",
    "Raspberry___healthy",
    "Soybean___healthy",
    "Squash___Powdery_mildew",
    "Strawberry___Leaf_scorch",
    "Strawberry___healthy",
    "Tomato___Bacterial_spot",
    "Tomato___Early_blight",
    "Tomato___Late_blight",
    "Tomato___Leaf_Mold",
    "Tomato___Septoria_leaf_spot",
    "Tomato___Spider_mites Two-spotted_spider_mite",
    "Tomato___Target_Spot",
    "Tomato___Tomato_Yellow_Leaf_Curl_Virus",
    "Tomato___Tomato_mosaic_virus",
    "Tomato___healthy",
];

/// Field crops the colour heuristic covers beyond PlantVillage
pub const EXTENDED_CLASSES: [&str; 21] = [
    "Rice___Blast",
    "Rice___Brown_spot",
    "Rice___Bacterial_leaf_blight",
    "Rice___healthy",
    "Wheat___Yellow_rust",
    "Wheat___Septoria",
    "Wheat___Powdery_mildew",
    "Wheat___healthy",
    "Cotton___Bacterial_blight",
    "Cotton___Leaf_curl_virus",
    "Cotton___healthy",
    "Sugarcane___Red_rot",
    "Sugarcane___Orange_rust",
    "Sugarcane___Yellow_leaf",
    "Sugarcane___healthy",
    "Tea___Blister_blight",
    "Tea___Red_rust",
    "Tea___healthy",
    "Coffee___Leaf_rust",
    "Coffee___Cercospora_leaf_spot",
    "Coffee___healthy",
];

/// Every class label the crate can emit for a successful diagnosis
pub fn all_classes() -> impl Iterator<Item = &'static str> {
    PLANT_VILLAGE_CLASSES.iter().chain(EXTENDED_CLASSES.iter()).copied()
}

/// True if `label` is a catalog class
pub fn is_known_class(label: &str) -> bool {
    all_classes().any(|class| class == label)
}

/// PlantVillage class for an external model output index
pub fn plant_village_class(index: usize) -> Option<&'static str> {
    PLANT_VILLAGE_CLASSES.get(index).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_has_no_duplicates() {
        let unique: HashSet<_> = all_classes().collect();
        assert_eq!(unique.len(), PLANT_VILLAGE_CLASSES.len() + EXTENDED_CLASSES.len());
    }

    #[test]
    fn every_class_has_plant_and_condition() {
        for class in all_classes() {
            let (plant, condition) = class.split_once("___").unwrap();
            assert!(!plant.is_empty() && !condition.is_empty(), "{}", class);
        }
    }

    #[test]
    fn unknown_label_is_outside_catalog() {
        assert!(!is_known_class(UNKNOWN_DISEASE));
        assert!(is_known_class("Rice___Blast"));
        assert_eq!(plant_village_class(30), Some("Tomato___Late_blight"));
        assert_eq!(plant_village_class(38), None);
    }
}
