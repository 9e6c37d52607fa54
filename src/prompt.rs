use crate::models::UserProfile;

const NONE_SPECIFIED: &str = "None specified";

const RESPONSE_SCHEMA: &str = r#"{
  "detectedFoods": ["list of foods identified"],
  "dangerousCombinations": [
    {
      "foods": ["food1", "food2"],
      "reason": "why this combination is dangerous",
      "severity": "high|medium|low"
    }
  ],
  "medicalConcerns": [
    {
      "ingredient": "ingredient name",
      "concern": "why it's concerning for this user's condition",
      "recommendation": "what to do about it"
    }
  ],
  "religiousConcerns": ["any ingredients that conflict with religious requirements"],
  "recommendations": {
    "itemsToRemove": ["foods to remove from the meal"],
    "itemsToAdd": ["foods to add for better nutrition"],
    "overallSafety": "safe|caution|unsafe",
    "notes": "additional advice"
  }
}"#;

fn or_none(value: &str) -> &str {
    if value.is_empty() { NONE_SPECIFIED } else { value }
}

/// Builds the single instruction sent to the model. The profile name is not included.
pub fn build_analysis_prompt(profile: &UserProfile, ingredients: Option<&str>) -> String {
    let meal = match ingredients {
        Some(text) if !text.is_empty() => format!("Ingredients: {text}"),
        _ => "Please analyze the food in the image.".to_string(),
    };

    format!(
        "You are a medical nutrition expert analyzing a meal for safety and health recommendations.\n\n\
        User Profile:\n\
        - Medical Conditions: {medical}\n\
        - Religion: {religion}\n\
        - Work Environment: {work}\n\n\
        {meal}\n\n\
        Provide a comprehensive analysis in the following JSON format:\n\
        {RESPONSE_SCHEMA}\n\n\
        Be thorough, specific, and prioritize safety. If there are no concerns in a category, use an empty array.",
        medical = or_none(&profile.medical_conditions),
        religion = or_none(&profile.religion),
        work = or_none(&profile.work_environment),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_profile_fields_and_ingredients() {
        let profile = UserProfile {
            name: "Sam".into(),
            medical_conditions: "Hypertension".into(),
            religion: "Hindu".into(),
            work_environment: "Construction site".into(),
        };
        let prompt = build_analysis_prompt(&profile, Some("beef curry, grapefruit juice"));
        assert!(prompt.contains("- Medical Conditions: Hypertension\n"));
        assert!(prompt.contains("- Religion: Hindu\n"));
        assert!(prompt.contains("- Work Environment: Construction site\n"));
        assert!(prompt.contains("Ingredients: beef curry, grapefruit juice"));
        assert!(!prompt.contains("analyze the food in the image"));
        assert!(!prompt.contains("Sam"));
        assert!(prompt.contains("\"overallSafety\": \"safe|caution|unsafe\""));
        assert!(prompt.ends_with("use an empty array."));
    }

    #[test]
    fn empty_fields_become_none_specified() {
        let prompt = build_analysis_prompt(&UserProfile::default(), None);
        assert!(prompt.contains("- Medical Conditions: None specified\n"));
        assert!(prompt.contains("- Religion: None specified\n"));
        assert!(prompt.contains("- Work Environment: None specified\n"));
        assert!(prompt.contains("Please analyze the food in the image."));
    }
}
