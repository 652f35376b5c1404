// src/crop_advice.rs - Rule-based crop recommendation and fertilizer plans

use serde::{Deserialize, Serialize};

use crate::cascade::{Cascade, Rule};

/// Soil nutrient and climate readings for one field
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize, Serialize)]
pub struct SoilConditions {
    /// kg/ha
    pub nitrogen: f64,
    pub phosphorus: f64,
    pub potassium: f64,
    /// degrees Celsius
    pub temperature: f64,
    /// percent relative humidity
    pub humidity: f64,
    pub ph: f64,
    /// mm
    pub rainfall: f64,
}

/// Crop picked by a recommendation rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CropChoice {
    pub crop: &'static str,
    pub confidence: u8,
    pub reason: &'static str,
}

const fn choice(crop: &'static str, confidence: u8, reason: &'static str) -> CropChoice {
    CropChoice { crop, confidence, reason }
}

/// Fertilizer programme for one crop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FertilizerPlan {
    pub primary_fertilizer: &'static str,
    pub npk_ratio: &'static str,
    pub application_rate: &'static str,
    pub timing: &'static str,
    pub organic_alternative: &'static str,
    pub micronutrients: &'static str,
    pub notes: &'static str,
}

/// Full answer for a field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropRecommendation {
    pub crop: String,
    pub confidence: f64,
    pub reason: String,
    pub fertilizer: FertilizerPlan,
}

/// Climate rules used when no trained crop model is available.
///
/// The coconut rule can never fire: every input it accepts is already taken
/// by the rice rule. It is kept so the rule table matches the published
/// recommendations.
pub static CROP_CASCADE: Cascade<SoilConditions, CropChoice> = Cascade {
    name: "crop",
    rules: &[
        Rule {
            name: "rice",
            predicate: |s| s.rainfall > 150.0 && s.humidity > 70.0 && s.temperature > 20.0,
            outcome: choice(
                "Rice",
                88,
                "High rainfall and humidity with warm temperatures are ideal for rice cultivation.",
            ),
        },
        Rule {
            name: "wheat",
            predicate: |s| s.temperature < 25.0 && s.rainfall < 100.0 && s.ph > 6.0,
            outcome: choice(
                "Wheat",
                85,
                "Cool temperatures with moderate rainfall are suitable for wheat cultivation.",
            ),
        },
        Rule {
            name: "cotton",
            predicate: |s| s.temperature > 25.0 && s.rainfall > 100.0 && s.potassium > 40.0,
            outcome: choice(
                "Cotton",
                82,
                "Warm climate with adequate rainfall and potassium levels favor cotton growth.",
            ),
        },
        Rule {
            name: "coconut",
            predicate: |s| s.temperature > 25.0 && s.rainfall > 150.0 && s.humidity > 70.0,
            outcome: choice(
                "Coconut",
                92,
                "Based on your soil nutrient levels and climate conditions, coconut cultivation is highly suitable for this region.",
            ),
        },
        Rule {
            name: "maize",
            predicate: |s| s.nitrogen > 80.0 && s.temperature > 20.0 && s.rainfall > 80.0,
            outcome: choice(
                "Maize",
                86,
                "Good nitrogen levels with favorable temperature and rainfall support maize cultivation.",
            ),
        },
    ],
    fallback: choice(
        "Mixed Vegetables",
        70,
        "Your conditions are suitable for mixed vegetable cultivation with proper management.",
    ),
};

/// Recommend a crop and its fertilizer plan from field readings
pub fn recommend_crop(conditions: &SoilConditions) -> CropRecommendation {
    let decision = CROP_CASCADE.decide(conditions);
    let chosen = decision.outcome;
    log::info!("Crop rule '{}' -> {} ({}%)", decision.rule, chosen.crop, chosen.confidence);

    CropRecommendation {
        crop: chosen.crop.to_string(),
        confidence: chosen.confidence as f64,
        reason: chosen.reason.to_string(),
        fertilizer: *fertilizer_for(chosen.crop),
    }
}

const fn plan(
    primary_fertilizer: &'static str,
    npk_ratio: &'static str,
    application_rate: &'static str,
    timing: &'static str,
    organic_alternative: &'static str,
    micronutrients: &'static str,
    notes: &'static str,
) -> FertilizerPlan {
    FertilizerPlan {
        primary_fertilizer,
        npk_ratio,
        application_rate,
        timing,
        organic_alternative,
        micronutrients,
        notes,
    }
}

/// Returned for crops without a tailored plan
pub static DEFAULT_FERTILIZER_PLAN: FertilizerPlan = plan(
    "NPK 10-10-10",
    "10-10-10",
    "Consult local agricultural expert",
    "Apply based on crop growth stages",
    "Compost and farmyard manure",
    "Based on soil test",
    "For specific recommendations, consult your local agricultural extension office.",
);

pub static FERTILIZER_PLANS: &[(&str, FertilizerPlan)] = &[
    ("rice", plan(
        "NPK 20-10-10",
        "20-10-10",
        "120-150 kg/hectare",
        "Apply at planting (30%), tillering stage (30%), and panicle initiation (40%)",
        "Compost (5-7 tons/hectare) + Green manure",
        "Zinc sulfate (25 kg/ha) for better yield",
        "Rice requires high nitrogen. Split application is crucial for optimal growth.",
    )),
    ("maize", plan(
        "NPK 15-15-15",
        "15-15-15",
        "100-120 kg/hectare",
        "Apply at sowing (50%) and knee-high stage (50%)",
        "Farm yard manure (10 tons/hectare) + Vermicompost",
        "Zinc (5 kg/ha) and Boron (1 kg/ha)",
        "Balanced NPK is essential. Side-dress nitrogen at V6 stage for best results.",
    )),
    ("chickpea", plan(
        "DAP (Diammonium Phosphate)",
        "18-46-0",
        "60-80 kg/hectare",
        "Apply full dose at sowing as basal application",
        "Rhizobium culture + Rock phosphate (200 kg/ha)",
        "Sulfur (20 kg/ha) for better nodulation",
        "Being a legume, chickpea fixes nitrogen. Focus on phosphorus for root development.",
    )),
    ("kidneybeans", plan(
        "NPK 10-26-26",
        "10-26-26",
        "50-70 kg/hectare",
        "Apply at planting with additional side-dressing at flowering",
        "Compost (3-4 tons/hectare) + Rhizobium inoculation",
        "Molybdenum for nitrogen fixation",
        "Low nitrogen requirement due to nitrogen fixation. Emphasize phosphorus and potassium.",
    )),
    ("pigeonpeas", plan(
        "SSP (Single Super Phosphate)",
        "0-16-0",
        "40-50 kg/hectare",
        "Apply at sowing time",
        "Farmyard manure (5 tons/hectare) + Rhizobium culture",
        "Sulfur (15 kg/ha)",
        "Minimal fertilizer needed. Pigeon pea is drought-resistant and fixes nitrogen efficiently.",
    )),
    ("mothbeans", plan(
        "NPK 12-32-16",
        "12-32-16",
        "40-50 kg/hectare",
        "Apply full dose at sowing",
        "Vermicompost (2 tons/hectare)",
        "Zinc and Iron for arid conditions",
        "Drought-tolerant crop. Minimal fertilizer requirement with focus on phosphorus.",
    )),
    ("mungbean", plan(
        "NPK 10-20-20",
        "10-20-20",
        "50-60 kg/hectare",
        "Apply at sowing with light top-dressing at flowering",
        "Compost (3 tons/hectare) + Rhizobium inoculation",
        "Molybdenum and Boron",
        "Short-duration crop. Moderate fertilizer needs with emphasis on phosphorus.",
    )),
    ("blackgram", plan(
        "NPK 10-26-26",
        "10-26-26",
        "50-60 kg/hectare",
        "Apply at sowing time",
        "Farmyard manure (4 tons/hectare) + Biofertilizers",
        "Sulfur (20 kg/ha) and Zinc (5 kg/ha)",
        "Leguminous crop with good nitrogen fixation. Focus on P and K for better yields.",
    )),
    ("lentil", plan(
        "DAP (Diammonium Phosphate)",
        "18-46-0",
        "50-60 kg/hectare",
        "Apply full dose at sowing",
        "Compost (3-4 tons/hectare) + Rhizobium culture",
        "Sulfur (15 kg/ha) and Boron (1 kg/ha)",
        "Cool-season legume. Phosphorus is critical for root development and nodulation.",
    )),
    ("pomegranate", plan(
        "NPK 19-19-19",
        "19-19-19",
        "500-600 grams/plant/year",
        "Split into 4 doses: Feb, May, Aug, Nov",
        "Farmyard manure (20-25 kg/plant) + Neem cake",
        "Zinc, Iron, and Boron sprays during flowering",
        "Fruit crop requiring balanced nutrition. Increase K during fruit development.",
    )),
    ("banana", plan(
        "NPK 10-6-40",
        "10-6-40",
        "200-300 grams/plant/month",
        "Monthly application for 9-10 months",
        "Farmyard manure (25 kg/plant) + Vermicompost",
        "Magnesium and Calcium for quality fruits",
        "Heavy feeder requiring high potassium. Regular feeding essential for bunch development.",
    )),
    ("mango", plan(
        "NPK 10-10-20",
        "10-10-20",
        "1-1.5 kg/tree/year (mature trees)",
        "Apply in 2 splits: May-June and Sept-Oct",
        "Farmyard manure (50 kg/tree) + Bone meal",
        "Zinc, Boron, and Iron sprays",
        "Increase potassium during fruit setting. Reduce nitrogen to avoid excessive vegetative growth.",
    )),
    ("grapes", plan(
        "NPK 19-19-19",
        "19-19-19",
        "400-500 grams/vine/year",
        "Apply in 3-4 splits during growing season",
        "Compost (10-15 kg/vine) + Seaweed extract",
        "Zinc, Boron, and Magnesium",
        "Balanced nutrition critical. Adjust K during berry development for sweetness.",
    )),
    ("watermelon", plan(
        "NPK 12-12-17",
        "12-12-17",
        "80-100 kg/hectare",
        "Apply at planting (40%), vine growth (30%), and flowering (30%)",
        "Compost (8-10 tons/hectare) + Bone meal",
        "Boron and Calcium for fruit quality",
        "High potassium needed for fruit sweetness. Avoid excess nitrogen to prevent vine growth.",
    )),
    ("muskmelon", plan(
        "NPK 13-13-21",
        "13-13-21",
        "80-100 kg/hectare",
        "Apply at planting, vine growth, and fruit development stages",
        "Farmyard manure (10 tons/hectare) + Vermicompost",
        "Boron, Calcium, and Magnesium",
        "Similar to watermelon. High K for sweetness and shelf life.",
    )),
    ("apple", plan(
        "NPK 10-10-10",
        "10-10-10",
        "1-2 kg/tree/year (bearing trees)",
        "Apply in early spring and after fruit set",
        "Compost (30-40 kg/tree) + Bone meal",
        "Calcium, Boron, and Zinc",
        "Balanced fertilization. Calcium critical for preventing bitter pit.",
    )),
    ("orange", plan(
        "NPK 8-3-9",
        "8-3-9",
        "1.5-2 kg/tree/year",
        "Apply in 3 splits: Feb, June, and Sept",
        "Farmyard manure (40-50 kg/tree) + Neem cake",
        "Zinc, Iron, and Manganese sprays",
        "Citrus-specific fertilizer recommended. Regular micronutrient sprays prevent deficiencies.",
    )),
    ("papaya", plan(
        "NPK 12-12-12",
        "12-12-12",
        "200-250 grams/plant/month",
        "Monthly application starting 2 months after planting",
        "Vermicompost (5 kg/plant/month) + Neem cake",
        "Boron and Zinc for fruit quality",
        "Fast-growing crop. Regular balanced feeding essential for continuous fruiting.",
    )),
    ("coconut", plan(
        "NPK 16-16-16",
        "16-16-16",
        "1.3 kg/palm/year (adult palms)",
        "Apply in 2 splits: May-June and Sept-Oct",
        "Farmyard manure (50 kg/palm) + Green manure",
        "Boron (50g/palm) and Magnesium",
        "Add common salt (1 kg/palm) for coastal areas. Chloride improves nut quality.",
    )),
    ("cotton", plan(
        "NPK 17-17-17",
        "17-17-17",
        "100-125 kg/hectare",
        "Apply at sowing (50%) and square formation (50%)",
        "Farmyard manure (10 tons/hectare) + Neem cake",
        "Zinc (25 kg/ha) and Boron (10 kg/ha)",
        "High nutrient demanding crop. Potassium critical for fiber quality and boll development.",
    )),
    ("jute", plan(
        "NPK 20-10-5",
        "20-10-5",
        "80-100 kg/hectare",
        "Apply at sowing (60%) and 30 days after sowing (40%)",
        "Compost (5 tons/hectare) + Green manure",
        "Sulfur (20 kg/ha) for fiber quality",
        "High nitrogen requirement for fiber production. Adequate moisture essential.",
    )),
    ("coffee", plan(
        "NPK 10-10-20",
        "10-10-20",
        "300-400 grams/plant/year",
        "Apply in 3 splits: April, June, and September",
        "Compost (10-15 kg/plant) + Coffee pulp",
        "Zinc, Boron, and Magnesium",
        "Shade-grown crop. Organic matter critical. High K for bean quality.",
    )),
];

/// Spelled-out crop names mapped onto table keys
const CROP_ALIASES: &[(&str, &str)] = &[
    ("kidney beans", "kidneybeans"),
    ("pigeon peas", "pigeonpeas"),
    ("moth beans", "mothbeans"),
    ("mung bean", "mungbean"),
    ("black gram", "blackgram"),
];

/// Fertilizer plan for a crop name (case-insensitive), or the generic plan
pub fn fertilizer_for(crop_name: &str) -> &'static FertilizerPlan {
    let crop_key = crop_name.trim().to_lowercase();
    let crop_key = CROP_ALIASES
        .iter()
        .find(|(alias, _)| *alias == crop_key)
        .map(|(_, key)| *key)
        .unwrap_or(crop_key.as_str());

    FERTILIZER_PLANS
        .iter()
        .find(|(key, _)| *key == crop_key)
        .map(|(_, plan)| plan)
        .unwrap_or(&DEFAULT_FERTILIZER_PLAN)
}
