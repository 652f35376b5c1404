/// Convert an internal class name into display text.
///
/// `Plant___Disease` becomes `Plant - Disease`: underscores turn into spaces
/// on both sides and commas are dropped from the plant part. Names without
/// the `___` separator only have their underscores replaced.
pub fn format_disease_name(class_name: &str) -> String {
    match class_name.split_once("___") {
        Some((plant, disease)) => {
            let plant = plant.replace('_', " ").replace(',', "");
            let disease = disease.replace('_', " ");
            format!("{} - {}", plant, disease)
        }
        None => class_name.replace('_', " "),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plant_village_names() {
        assert_eq!(format_disease_name("Tomato___Late_blight"), "Tomato - Late blight");
        assert_eq!(format_disease_name("Pepper,_bell___healthy"), "Pepper bell - healthy");
        assert_eq!(
            format_disease_name("Corn_(maize)___Northern_Leaf_Blight"),
            "Corn (maize) - Northern Leaf Blight"
        );
    }

    #[test]
    fn names_without_separator() {
        assert_eq!(format_disease_name("Unknown Disease"), "Unknown Disease");
        assert_eq!(format_disease_name("Leaf_scorch"), "Leaf scorch");
    }
}
