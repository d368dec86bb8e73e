//! Adapted, presence-aware view over a validated CV record.
//!
//! Renderers consume this view instead of the raw record: absence is a
//! first-class state (`None`), a missing array and an empty array are
//! both "section absent", and the skill/language unions are normalized
//! here exactly once so no renderer re-implements the shape check.

use tracing::warn;

use crate::models::cv::{
    Award, Certification, CefrLevel, CustomSection, CvRecord, Education, Experience,
    LanguageEntry, PersonalInfo, Project, Publication, Reference, Skill, SkillLevel,
    VolunteerWork,
};

/// Read-only view over one CV record. Lives for a single generation.
pub struct CvView<'a> {
    record: &'a CvRecord,
}

/// A skill normalized out of the string-or-object union.
#[derive(Debug, Clone, PartialEq)]
pub struct SkillView<'a> {
    pub name: &'a str,
    pub level: Option<SkillLevel>,
    pub years: Option<f64>,
    pub category: Option<&'a str>,
}

/// Language fluency, normalized out of the native-or-proficiency union.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fluency {
    Native,
    Cefr(CefrLevel),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LanguageView<'a> {
    pub name: &'a str,
    pub fluency: Option<Fluency>,
}

/// References are the one section with a non-optional rendering: absent
/// or empty data still produces the "available upon request" line.
pub enum ReferencesView<'a> {
    Provided(&'a [Reference]),
    UponRequest,
}

impl<'a> CvView<'a> {
    pub fn new(record: &'a CvRecord) -> Self {
        CvView { record }
    }

    pub fn personal_info(&self) -> &'a PersonalInfo {
        &self.record.personal_info
    }

    pub fn summary(&self) -> Option<&'a str> {
        self.record
            .professional_summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
    }

    pub fn experience(&self) -> Option<&'a [Experience]> {
        non_empty(&self.record.work_experience)
    }

    pub fn education(&self) -> Option<&'a [Education]> {
        non_empty(&self.record.education)
    }

    pub fn projects(&self) -> Option<&'a [Project]> {
        non_empty(&self.record.projects)
    }

    pub fn certifications(&self) -> Option<&'a [Certification]> {
        non_empty(&self.record.certifications)
    }

    pub fn publications(&self) -> Option<&'a [Publication]> {
        non_empty(&self.record.publications)
    }

    pub fn awards(&self) -> Option<&'a [Award]> {
        non_empty(&self.record.awards)
    }

    pub fn volunteer_work(&self) -> Option<&'a [VolunteerWork]> {
        non_empty(&self.record.volunteer_work)
    }

    pub fn custom_sections(&self) -> Option<&'a [CustomSection]> {
        non_empty(&self.record.custom_sections)
    }

    /// Normalized skills. Entries with an empty name are skipped with a
    /// warning rather than failing the section.
    pub fn skills(&self) -> Option<Vec<SkillView<'a>>> {
        let skills: Vec<SkillView<'a>> = self
            .record
            .skills
            .iter()
            .filter_map(|skill| {
                let view = match skill {
                    Skill::Name(name) => SkillView {
                        name,
                        level: None,
                        years: None,
                        category: None,
                    },
                    Skill::Detailed(detail) => SkillView {
                        name: &detail.name,
                        level: detail.level,
                        years: detail.years_of_experience,
                        category: detail.category.as_deref(),
                    },
                };
                if view.name.trim().is_empty() {
                    warn!("skipping skill entry with empty name");
                    return None;
                }
                Some(view)
            })
            .collect();
        if skills.is_empty() {
            None
        } else {
            Some(skills)
        }
    }

    /// Normalized languages. `native: true` wins over a proficiency code
    /// when both are present.
    pub fn languages(&self) -> Option<Vec<LanguageView<'a>>> {
        let languages: Vec<LanguageView<'a>> = self
            .record
            .languages
            .iter()
            .filter_map(|entry| {
                if entry.language.trim().is_empty() {
                    warn!("skipping language entry with empty name");
                    return None;
                }
                Some(LanguageView {
                    name: &entry.language,
                    fluency: fluency_of(entry),
                })
            })
            .collect();
        if languages.is_empty() {
            None
        } else {
            Some(languages)
        }
    }

    pub fn references(&self) -> ReferencesView<'a> {
        match self.record.references.as_deref() {
            Some(refs) if !refs.is_empty() => ReferencesView::Provided(refs),
            _ => ReferencesView::UponRequest,
        }
    }
}

fn fluency_of(entry: &LanguageEntry) -> Option<Fluency> {
    if entry.native {
        Some(Fluency::Native)
    } else {
        entry.proficiency.map(Fluency::Cefr)
    }
}

fn non_empty<T>(items: &[T]) -> Option<&[T]> {
    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record_with(extra: serde_json::Value) -> CvRecord {
        let mut base = json!({
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
        });
        base.as_object_mut()
            .unwrap()
            .extend(extra.as_object().unwrap().clone());
        serde_json::from_value(base).unwrap()
    }

    #[test]
    fn test_empty_array_is_section_absent() {
        let record = record_with(json!({"projects": [], "skills": []}));
        let view = CvView::new(&record);
        assert!(view.projects().is_none());
        assert!(view.skills().is_none());
        assert!(view.summary().is_none());
    }

    #[test]
    fn test_skills_normalized_from_both_shapes() {
        let record = record_with(json!({"skills": [
            "Go",
            {"name": "Python", "level": "expert", "yearsOfExperience": 8, "category": "Languages"}
        ]}));
        let view = CvView::new(&record);
        let skills = view.skills().unwrap();
        assert_eq!(
            skills[0],
            SkillView { name: "Go", level: None, years: None, category: None }
        );
        assert_eq!(skills[1].name, "Python");
        assert_eq!(skills[1].level, Some(SkillLevel::Expert));
        assert_eq!(skills[1].years, Some(8.0));
        assert_eq!(skills[1].category, Some("Languages"));
    }

    #[test]
    fn test_skill_with_empty_name_skipped() {
        let record = record_with(json!({"skills": ["", "Rust"]}));
        let view = CvView::new(&record);
        let skills = view.skills().unwrap();
        assert_eq!(skills.len(), 1);
        assert_eq!(skills[0].name, "Rust");
    }

    #[test]
    fn test_language_native_wins_over_proficiency() {
        let record = record_with(json!({"languages": [
            {"language": "English", "native": true, "proficiency": "B1"},
            {"language": "Spanish", "proficiency": "B2"},
            {"language": "Esperanto"}
        ]}));
        let view = CvView::new(&record);
        let langs = view.languages().unwrap();
        assert_eq!(langs[0].fluency, Some(Fluency::Native));
        assert_eq!(langs[1].fluency, Some(Fluency::Cefr(CefrLevel::B2)));
        assert_eq!(langs[2].fluency, None);
    }

    #[test]
    fn test_references_variants() {
        let absent = record_with(json!({}));
        assert!(matches!(
            CvView::new(&absent).references(),
            ReferencesView::UponRequest
        ));

        let empty = record_with(json!({"references": []}));
        assert!(matches!(
            CvView::new(&empty).references(),
            ReferencesView::UponRequest
        ));

        let provided = record_with(json!({"references": [{"name": "Charles Babbage"}]}));
        match CvView::new(&provided).references() {
            ReferencesView::Provided(refs) => assert_eq!(refs[0].name, "Charles Babbage"),
            ReferencesView::UponRequest => panic!("expected provided references"),
        }
    }
}
