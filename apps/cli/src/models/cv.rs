//! Typed CV record — the deserialized shape of an input data file.
//!
//! Deserialization IS the validation step: required fields (personal info
//! name/email/location, experience position/company/startDate, education
//! degree/institution/graduationDate) surface as serde `missing field`
//! errors, and enum-valued fields reject anything outside their set.
//! Renderers never see raw JSON.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The full CV record, partitioned into named sections.
///
/// `personal_info`, `work_experience` and `education` are required by the
/// schema; every other section is optional. `metadata` is accepted but
/// never rendered.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CvRecord {
    pub personal_info: PersonalInfo,
    #[serde(default)]
    pub professional_summary: Option<String>,
    pub work_experience: Vec<Experience>,
    pub education: Vec<Education>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub certifications: Vec<Certification>,
    #[serde(default)]
    pub publications: Vec<Publication>,
    #[serde(default)]
    pub awards: Vec<Award>,
    #[serde(default)]
    pub volunteer_work: Vec<VolunteerWork>,
    #[serde(default)]
    pub languages: Vec<LanguageEntry>,
    #[serde(default)]
    pub references: Option<Vec<Reference>>,
    #[serde(default)]
    pub custom_sections: Vec<CustomSection>,
    /// Present in the record but excluded from all section renderers.
    #[serde(default)]
    pub metadata: Option<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub first_name: String,
    #[serde(default)]
    pub middle_name: Option<String>,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub location: String,
    #[serde(default)]
    pub linked_in: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub portfolio: Option<String>,
    #[serde(default)]
    pub blog: Option<String>,
}

impl PersonalInfo {
    /// Joins first/middle/last name, skipping an absent middle name.
    pub fn full_name(&self) -> String {
        let mut parts = vec![self.first_name.as_str()];
        if let Some(middle) = &self.middle_name {
            parts.push(middle.as_str());
        }
        parts.push(self.last_name.as_str());
        parts.join(" ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    pub position: String,
    pub company: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: String,
    #[serde(default)]
    pub end_date: Option<String>,
    /// When true the end bound renders as "Present", even if a literal
    /// `endDate` was supplied alongside it.
    #[serde(default)]
    pub current: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
    #[serde(default)]
    pub company_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub graduation_date: String,
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub gpa: Option<f64>,
    #[serde(default)]
    pub honors: Vec<String>,
    #[serde(default)]
    pub relevant_courses: Vec<String>,
}

/// A skill is either a bare name or a detailed record — the two shapes
/// the schema admits. `CvView::skills` normalizes both into `SkillView`
/// so renderers never branch on the union.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Skill {
    Name(String),
    Detailed(SkillDetail),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillDetail {
    pub name: String,
    #[serde(default)]
    pub level: Option<SkillLevel>,
    #[serde(default)]
    pub years_of_experience: Option<f64>,
    #[serde(default)]
    pub category: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl std::fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SkillLevel::Beginner => "beginner",
            SkillLevel::Intermediate => "intermediate",
            SkillLevel::Advanced => "advanced",
            SkillLevel::Expert => "expert",
        };
        f.write_str(s)
    }
}

/// One spoken language. Exactly one of `native: true` or `proficiency`
/// is expected by the schema, but the renderer branches on whichever is
/// actually present rather than assuming either.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageEntry {
    pub language: String,
    #[serde(default)]
    pub native: bool,
    #[serde(default)]
    pub proficiency: Option<CefrLevel>,
}

/// CEFR language-proficiency scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CefrLevel {
    A1,
    A2,
    B1,
    B2,
    C1,
    C2,
}

impl std::fmt::Display for CefrLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CefrLevel::A1 => "A1",
            CefrLevel::A2 => "A2",
            CefrLevel::B1 => "B1",
            CefrLevel::B2 => "B2",
            CefrLevel::C1 => "C1",
            CefrLevel::C2 => "C2",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certification {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date_obtained: Option<String>,
    #[serde(default)]
    pub expiry_date: Option<String>,
    #[serde(default)]
    pub credential_url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Publication {
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub publisher: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub doi: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Award {
    pub name: String,
    #[serde(default)]
    pub issuer: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolunteerWork {
    pub organization: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub name: String,
    #[serde(default)]
    pub relationship: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomSection {
    pub title: String,
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn minimal_record() -> Value {
        json!({
            "personalInfo": {
                "firstName": "Ada",
                "lastName": "Lovelace",
                "email": "ada@example.com",
                "location": "London, UK"
            },
            "workExperience": [{
                "position": "Analyst",
                "company": "Analytical Engines Ltd",
                "startDate": "1843-07"
            }],
            "education": [{
                "degree": "Mathematics",
                "institution": "Home Tutoring",
                "graduationDate": "1835"
            }]
        })
    }

    #[test]
    fn test_minimal_record_parses() {
        let record: CvRecord = serde_json::from_value(minimal_record()).unwrap();
        assert_eq!(record.personal_info.full_name(), "Ada Lovelace");
        assert_eq!(record.work_experience.len(), 1);
        assert!(!record.work_experience[0].current);
        assert!(record.references.is_none());
        assert!(record.skills.is_empty());
    }

    #[test]
    fn test_missing_required_section_fails() {
        let mut value = minimal_record();
        value.as_object_mut().unwrap().remove("education");
        let err = serde_json::from_value::<CvRecord>(value).unwrap_err();
        assert!(err.to_string().contains("education"), "error was: {err}");
    }

    #[test]
    fn test_skill_union_both_shapes() {
        let skills: Vec<Skill> = serde_json::from_value(json!([
            "Go",
            {"name": "Python", "level": "expert", "category": "Languages"}
        ]))
        .unwrap();
        assert!(matches!(&skills[0], Skill::Name(n) if n == "Go"));
        match &skills[1] {
            Skill::Detailed(d) => {
                assert_eq!(d.name, "Python");
                assert_eq!(d.level, Some(SkillLevel::Expert));
                assert_eq!(d.category.as_deref(), Some("Languages"));
            }
            other => panic!("expected detailed skill, got {other:?}"),
        }
    }

    #[test]
    fn test_skill_rejects_unknown_level() {
        let err =
            serde_json::from_value::<Skill>(json!({"name": "Python", "level": "wizard"}))
                .unwrap_err();
        assert!(
            err.to_string().contains("did not match any variant"),
            "error was: {err}"
        );
    }

    #[test]
    fn test_language_variants_parse() {
        let langs: Vec<LanguageEntry> = serde_json::from_value(json!([
            {"language": "English", "native": true},
            {"language": "Spanish", "proficiency": "B2"}
        ]))
        .unwrap();
        assert!(langs[0].native);
        assert!(langs[0].proficiency.is_none());
        assert!(!langs[1].native);
        assert_eq!(langs[1].proficiency, Some(CefrLevel::B2));
    }

    #[test]
    fn test_metadata_accepted_and_kept_out_of_sections() {
        let mut value = minimal_record();
        value.as_object_mut().unwrap().insert(
            "metadata".to_string(),
            json!({"version": "1.0", "lastUpdated": "2025-01-01"}),
        );
        let record: CvRecord = serde_json::from_value(value).unwrap();
        assert!(record.metadata.is_some());
    }

    #[test]
    fn test_current_with_literal_end_date_parses() {
        let exp: Experience = serde_json::from_value(json!({
            "position": "Engineer",
            "company": "Acme",
            "startDate": "2020-01",
            "endDate": "2023-06",
            "current": true
        }))
        .unwrap();
        assert!(exp.current);
        assert_eq!(exp.end_date.as_deref(), Some("2023-06"));
    }
}
