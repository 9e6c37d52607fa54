use serde::{Serialize, Deserialize};
use serde_with::{serde_as, NoneAsEmptyString};

/// Health and dietary profile collected before a meal is analysed.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct UserProfile {
    pub name: String,
    pub medical_conditions: String,
    pub religion: String,
    pub work_environment: String,
}

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisRequest {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>, // data URI, e.g. data:image/jpeg;base64,...
    pub user_profile: UserProfile,
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<String>,
}

impl AnalysisRequest {
    pub fn has_meal_content(&self) -> bool {
        self.image_data.is_some() || self.ingredients.is_some()
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub detected_foods: Vec<String>,
    pub dangerous_combinations: Vec<DangerousCombination>,
    pub medical_concerns: Vec<MedicalConcern>,
    pub religious_concerns: Vec<String>,
    pub recommendations: Recommendations,
}

impl AnalysisResult {
    /// Structurally complete result used when the model reply is not parseable.
    pub fn fallback(raw_reply: &str) -> Self {
        Self {
            recommendations: Recommendations {
                notes: raw_reply.to_string(),
                ..Recommendations::default()
            },
            ..Self::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct DangerousCombination {
    pub foods: Vec<String>,
    pub reason: String,
    pub severity: String, // high | medium | low, as reported by the model
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(default)]
pub struct MedicalConcern {
    pub ingredient: String,
    pub concern: String,
    pub recommendation: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct Recommendations {
    pub items_to_remove: Vec<String>,
    pub items_to_add: Vec<String>,
    pub overall_safety: String, // safe | caution | unsafe, "unknown" when not reported
    pub notes: String,
}

impl Default for Recommendations {
    fn default() -> Self {
        Self {
            items_to_remove: Vec::new(),
            items_to_add: Vec::new(),
            overall_safety: "unknown".to_string(),
            notes: String::new(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AnalysisResponse {
    pub analysis: AnalysisResult,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn empty_optional_strings_are_treated_as_absent() {
        let req: AnalysisRequest = serde_json::from_value(json!({
            "imageData": "",
            "ingredients": "",
            "userProfile": {"medicalConditions": "diabetes", "religion": "", "workEnvironment": "office"}
        }))
        .unwrap();
        assert_eq!(req.image_data, None);
        assert_eq!(req.ingredients, None);
        assert!(!req.has_meal_content());
        assert_eq!(req.user_profile.name, "");
        assert_eq!(req.user_profile.medical_conditions, "diabetes");
    }

    #[test]
    fn fallback_serializes_every_key() {
        let value = serde_json::to_value(AnalysisResult::fallback("the model rambled")).unwrap();
        assert_eq!(
            value,
            json!({
                "detectedFoods": [],
                "dangerousCombinations": [],
                "medicalConcerns": [],
                "religiousConcerns": [],
                "recommendations": {
                    "itemsToRemove": [],
                    "itemsToAdd": [],
                    "overallSafety": "unknown",
                    "notes": "the model rambled"
                }
            })
        );
    }

    #[test]
    fn partial_model_object_is_completed_with_defaults() {
        let result: AnalysisResult = serde_json::from_value(json!({
            "detectedFoods": ["rice"],
            "recommendations": {"overallSafety": "safe"}
        }))
        .unwrap();
        assert_eq!(result.detected_foods, vec!["rice".to_string()]);
        assert!(result.dangerous_combinations.is_empty());
        assert_eq!(result.recommendations.overall_safety, "safe");
        assert_eq!(result.recommendations.notes, "");
    }
}
