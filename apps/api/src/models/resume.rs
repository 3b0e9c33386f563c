use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// The fields the extraction prompt asks the model for.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractedResume {
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub experience: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub education: Vec<String>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    pub summary: Option<String>,
}

/// A structured resume held in the caller's session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeProfile {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub summary: Option<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub skills: Vec<String>,
    pub raw_text: String,
    pub uploaded_at: DateTime<Utc>,
}

impl ResumeProfile {
    pub fn from_extraction(
        extracted: ExtractedResume,
        raw_text: String,
        uploaded_at: DateTime<Utc>,
    ) -> Self {
        Self {
            name: extracted.name,
            email: extracted.email,
            phone: extracted.phone,
            summary: extracted.summary,
            experience: extracted.experience,
            education: extracted.education,
            skills: extracted.skills,
            raw_text,
            uploaded_at,
        }
    }

    /// Name used when addressing the applicant in generated text.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("the applicant")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracted_resume_tolerates_missing_and_odd_fields() {
        let json = r#"{
            "name": "Ada Lovelace",
            "phone": 5551234,
            "skills": "Rust, SQL , ",
            "experience": [
                "Engineer at Analytical Engines",
                {"title": "Analyst", "company": "Babbage & Co"}
            ],
            "summary": ""
        }"#;

        let extracted: ExtractedResume = serde_json::from_str(json).unwrap();
        assert_eq!(extracted.name.as_deref(), Some("Ada Lovelace"));
        assert_eq!(extracted.email, None);
        assert_eq!(extracted.phone.as_deref(), Some("5551234"));
        assert_eq!(extracted.skills, vec!["Rust", "SQL"]);
        assert_eq!(extracted.experience.len(), 2);
        assert!(extracted.experience[1].contains("Analyst"));
        assert!(extracted.experience[1].contains("Babbage & Co"));
        assert!(extracted.education.is_empty());
        assert_eq!(extracted.summary, None);
    }

    #[test]
    fn test_profile_serializes_camel_case() {
        let profile = ResumeProfile::from_extraction(
            ExtractedResume {
                name: Some("Ada".into()),
                skills: vec!["Rust".into()],
                ..Default::default()
            },
            "raw".into(),
            Utc::now(),
        );

        let value = serde_json::to_value(&profile).unwrap();
        assert_eq!(value["rawText"], "raw");
        assert!(value.get("uploadedAt").is_some());
        assert_eq!(value["skills"][0], "Rust");
        assert!(value["email"].is_null());
    }

    #[test]
    fn test_display_name_falls_back() {
        let profile = ResumeProfile::from_extraction(Default::default(), String::new(), Utc::now());
        assert_eq!(profile.display_name(), "the applicant");
    }
}
