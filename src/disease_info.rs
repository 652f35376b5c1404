// src/disease_info.rs - Treatment and prevention reference data

use serde::Serialize;

/// Advice attached to a diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiseaseInfo {
    pub severity: &'static str,
    pub treatment: &'static str,
    pub prevention: &'static str,
}

const fn info(severity: &'static str, treatment: &'static str, prevention: &'static str) -> DiseaseInfo {
    DiseaseInfo { severity, treatment, prevention }
}

/// Returned when no table key matches
pub static DEFAULT_DISEASE_INFO: DiseaseInfo = info(
    "Moderate",
    "Consult with an agricultural expert or extension service for proper identification and treatment plan for this specific condition.",
    "Maintain good agricultural practices including proper spacing, adequate nutrition, appropriate watering, and regular monitoring for early detection.",
);

/// Lookup table keyed by a disease name fragment.
///
/// Lookup walks this slice in order, so a key that is a substring of a
/// longer one (`Leaf_blight` inside `Bacterial_leaf_blight`) must come after it.
pub static DISEASE_INFO: &[(&str, DiseaseInfo)] = &[
    ("healthy", info(
        "None",
        "No treatment needed. Plant appears healthy. Continue regular maintenance and monitoring.",
        "Maintain good agricultural practices, proper watering schedule, and regular inspection for early disease detection.",
    )),
    ("Apple_scab", info(
        "Moderate",
        "Remove infected leaves and fruit. Apply fungicides in early spring before symptoms appear.",
        "Plant resistant varieties, ensure good air circulation, and remove fallen leaves in autumn.",
    )),
    ("Black_rot", info(
        "High",
        "Prune infected branches at least 8-12 inches below visible cankers. Apply fungicides.",
        "Remove mummified fruit and infected wood. Maintain tree vigor through proper fertilization.",
    )),
    ("Cedar_apple_rust", info(
        "Moderate",
        "Apply fungicides from bud break through fruit development. Remove nearby cedar trees if possible.",
        "Plant resistant apple varieties and maintain distance from cedar trees.",
    )),
    ("Bacterial_spot", info(
        "Moderate",
        "Apply copper-based bactericides. Remove and destroy severely infected plant parts.",
        "Use disease-free seeds and transplants, avoid overhead irrigation, ensure good air circulation, and practice crop rotation.",
    )),
    ("Cercospora_leaf_spot", info(
        "Moderate",
        "Apply fungicides when symptoms first appear. Remove infected leaves from lower plant parts.",
        "Practice crop rotation (2-3 years), deep plow crop residue, and ensure adequate plant spacing.",
    )),
    ("Common_rust", info(
        "Moderate",
        "Apply fungicides at first sign of disease. Consider resistance rating when selecting varieties.",
        "Plant resistant hybrids, ensure adequate plant nutrition, and monitor fields regularly during humid weather.",
    )),
    ("Northern_Leaf_Blight", info(
        "High",
        "Apply foliar fungicides when disease first appears. Remove crop residue after harvest.",
        "Use resistant hybrids, practice minimum 2-year crop rotation, and tillage to bury crop debris.",
    )),
    ("Early_blight", info(
        "Moderate",
        "Apply fungicides containing chlorothalonil, mancozeb, or copper. Remove and destroy infected lower leaves.",
        "Use certified disease-free seeds, practice crop rotation (3-4 years), mulch to prevent soil splash, and avoid wetting foliage.",
    )),
    ("Late_blight", info(
        "High",
        "Apply fungicides immediately upon detection. In severe cases, destroy all infected plants to prevent spread.",
        "Plant resistant varieties, ensure good drainage and air circulation, avoid overhead irrigation, and monitor weather for blight-favorable conditions.",
    )),
    ("Bacterial_leaf_blight", info(
        "High",
        "Drain flooded fields, avoid excess nitrogen top-dressing, and apply copper-based bactericides at early infection.",
        "Use resistant varieties and clean seed, keep bunds and channels free of weed hosts, and avoid clipping seedling tips at transplanting.",
    )),
    ("Leaf_blight", info(
        "Moderate",
        "Apply copper-based fungicide or chlorothalonil. Remove affected leaves and ensure proper plant spacing for air circulation.",
        "Maintain proper drainage, avoid overhead irrigation, apply preventive fungicides during humid seasons, and practice crop rotation.",
    )),
    ("Leaf_Mold", info(
        "Moderate",
        "Improve greenhouse ventilation and reduce humidity below 85%. Apply fungicides if infection is severe.",
        "Maintain good air circulation, avoid high humidity (keep below 85%), water at soil level, and remove infected leaves promptly.",
    )),
    ("Powdery_mildew", info(
        "Moderate",
        "Apply sulfur-based fungicides, potassium bicarbonate, or neem oil. Remove heavily infected plant parts.",
        "Ensure proper plant spacing for air flow, avoid excess nitrogen fertilizer, water early in day, and plant in sunny locations.",
    )),
    ("Septoria_leaf_spot", info(
        "Moderate",
        "Apply chlorothalonil or copper-based fungicides. Remove infected lower leaves and mulch around plants.",
        "Practice crop rotation (3 years minimum), avoid overhead watering, stake plants for airflow, and remove plant debris.",
    )),
    ("Spider_mites", info(
        "Moderate",
        "Spray with insecticidal soap, neem oil, or horticultural oil. Increase humidity around plants. Use miticides for severe infestations.",
        "Regular inspection of leaf undersides, maintain adequate moisture, introduce natural predators (ladybugs), and avoid dusty conditions.",
    )),
    ("Target_Spot", info(
        "Moderate",
        "Apply fungicides containing chlorothalonil or mancozeb. Remove and destroy infected leaves.",
        "Practice crop rotation, maintain proper plant spacing, avoid leaf wetness, and use disease-free transplants.",
    )),
    ("Yellow_Leaf_Curl_Virus", info(
        "High",
        "No cure available. Remove and destroy infected plants immediately to prevent virus spread to healthy plants.",
        "Control whitefly vectors with insecticides or yellow sticky traps, use virus-resistant varieties, employ reflective mulches, and use insect-proof nets.",
    )),
    ("Tomato_mosaic_virus", info(
        "High",
        "No cure exists. Remove infected plants immediately. Disinfect tools with 10% bleach solution.",
        "Use virus-free certified seeds, control aphid vectors, disinfect hands and tools, avoid tobacco use near plants, and practice strict sanitation.",
    )),
    ("Haunglongbing", info(
        "High",
        "No cure. Remove infected trees immediately. Control psyllid vectors with approved insecticides.",
        "Use certified disease-free nursery stock, control Asian citrus psyllid populations, and remove infected trees promptly.",
    )),
    ("Leaf_scorch", info(
        "Moderate",
        "Remove severely infected leaves. Improve watering practices and ensure consistent soil moisture.",
        "Maintain consistent moisture levels, mulch around plants, avoid water stress, and ensure proper drainage.",
    )),
    ("Esca", info(
        "High",
        "Prune infected vines during dormancy. There is no curative treatment once symptoms appear.",
        "Use proper pruning techniques, protect pruning wounds, and maintain vine vigor through proper nutrition.",
    )),
    ("Blast", info(
        "High",
        "Apply tricyclazole or azoxystrobin at the first lesions and again at booting if weather stays humid.",
        "Plant blast-resistant varieties, avoid excess nitrogen, keep fields flooded evenly, and destroy infected straw and stubble.",
    )),
    ("Brown_spot", info(
        "Moderate",
        "Apply mancozeb or propiconazole sprays and correct potassium and silicon deficiencies in the soil.",
        "Use certified seed treated with fungicide, maintain balanced fertilization, and avoid drought stress during tillering.",
    )),
    ("Yellow_rust", info(
        "High",
        "Spray triazole fungicides (propiconazole, tebuconazole) as soon as stripes appear on upper leaves.",
        "Sow resistant varieties, avoid very early sowing, remove volunteer wheat, and scout fields weekly in cool humid weather.",
    )),
    ("Bacterial_blight", info(
        "Moderate",
        "Remove infected plant debris and apply copper oxychloride with streptocycline at early symptoms.",
        "Use acid-delinted or treated seed, rotate with non-host crops, and avoid overhead irrigation late in the day.",
    )),
    ("Leaf_curl_virus", info(
        "High",
        "No cure. Uproot infected plants early and control whitefly populations with recommended insecticides.",
        "Grow tolerant varieties, remove alternate weed hosts, avoid late sowing, and monitor whitefly counts with yellow sticky traps.",
    )),
    ("Red_rot", info(
        "High",
        "Uproot and burn affected clumps. Do not ratoon infected fields; drench surrounding soil with carbendazim.",
        "Plant healthy setts from disease-free nurseries, treat setts with hot water or fungicide, and practice crop rotation.",
    )),
    ("Orange_rust", info(
        "Moderate",
        "Apply mancozeb or triazole fungicides when pustules first appear on young leaves.",
        "Plant resistant cultivars, avoid excessive nitrogen, and remove heavily infected leaves from the field.",
    )),
    ("Yellow_leaf", info(
        "Moderate",
        "No curative chemical control. Rogue heavily infected stools and control aphid vectors.",
        "Use virus-free tissue-culture planting material and control aphid populations early in the season.",
    )),
    ("Blister_blight", info(
        "High",
        "Apply copper oxychloride or hexaconazole at 7-10 day intervals during wet weather.",
        "Prune to open the canopy, reduce shade during monsoon, and pluck frequently to remove infected young shoots.",
    )),
    ("Red_rust", info(
        "Moderate",
        "Spray copper fungicides before flushing and improve bush vigor with balanced fertilization.",
        "Improve drainage and shade management, correct potassium deficiency, and avoid water stress.",
    )),
    ("Leaf_rust", info(
        "High",
        "Apply copper-based fungicides or triazoles at the start of the rainy season and repeat as labelled.",
        "Grow rust-resistant cultivars, manage shade and plant density for airflow, and maintain good nutrition.",
    )),
];

/// Normalize a disease name for table lookup
fn normalize_key(name: &str) -> String {
    name.to_lowercase()
        .replace(' ', "_")
        .replace('-', "_")
        .replace(&['(', ')', ','][..], "")
}

/// Find the advice record for a class name or display name.
///
/// Matching runs in three passes: a table key contained in the normalized
/// name (or the name contained in the key), then any shared word longer than
/// three characters, then [`DEFAULT_DISEASE_INFO`]. Never fails.
pub fn get_disease_info(disease_name: &str) -> &'static DiseaseInfo {
    let disease_key = normalize_key(disease_name);
    if disease_key.is_empty() {
        return &DEFAULT_DISEASE_INFO;
    }

    for (key, info) in DISEASE_INFO {
        let key = key.to_lowercase();
        if disease_key.contains(&key) || key.contains(&disease_key) {
            return info;
        }
    }

    let disease_parts: Vec<&str> = disease_key.split('_').collect();
    for (key, info) in DISEASE_INFO {
        let key = key.to_lowercase();
        let shares_word = key
            .split('_')
            .filter(|part| part.len() > 3)
            .any(|part| disease_parts.contains(&part));
        if shares_word {
            return info;
        }
    }

    &DEFAULT_DISEASE_INFO
}

/// True if the lookup fell through to the generic record
pub fn is_default_info(info: &DiseaseInfo) -> bool {
    std::ptr::eq(info, &DEFAULT_DISEASE_INFO)
}
