//! Document assembly — drives the section renderers in a configured order.

pub mod builder;
pub mod date;
pub mod sections;

use std::path::Path;
use std::str::FromStr;

use tracing::info;

use crate::errors::CvError;
use crate::models::cv::CvRecord;
use crate::render::builder::{DocumentSink, DocxSink};
use crate::style::StyleConfig;
use crate::view::CvView;

/// One renderable CV section. The enum is the section-order vocabulary:
/// the assembler walks a `&[Section]` and dispatches to the renderer set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    PersonalInfo,
    Summary,
    Experience,
    Education,
    Projects,
    Skills,
    Certifications,
    Publications,
    Awards,
    VolunteerWork,
    Languages,
    References,
    CustomSections,
}

/// Canonical section order used when the caller supplies none.
pub const DEFAULT_SECTION_ORDER: [Section; 13] = [
    Section::PersonalInfo,
    Section::Summary,
    Section::Experience,
    Section::Education,
    Section::Projects,
    Section::Skills,
    Section::Certifications,
    Section::Publications,
    Section::Awards,
    Section::VolunteerWork,
    Section::Languages,
    Section::References,
    Section::CustomSections,
];

impl Section {
    pub fn render(self, view: &CvView, doc: &mut dyn DocumentSink) {
        match self {
            Section::PersonalInfo => sections::personal_info(view, doc),
            Section::Summary => sections::summary(view, doc),
            Section::Experience => sections::experience(view, doc),
            Section::Education => sections::education(view, doc),
            Section::Projects => sections::projects(view, doc),
            Section::Skills => sections::skills(view, doc),
            Section::Certifications => sections::certifications(view, doc),
            Section::Publications => sections::publications(view, doc),
            Section::Awards => sections::awards(view, doc),
            Section::VolunteerWork => sections::volunteer_work(view, doc),
            Section::Languages => sections::languages(view, doc),
            Section::References => sections::references(view, doc),
            Section::CustomSections => sections::custom_sections(view, doc),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Section::PersonalInfo => "personal_info",
            Section::Summary => "summary",
            Section::Experience => "experience",
            Section::Education => "education",
            Section::Projects => "projects",
            Section::Skills => "skills",
            Section::Certifications => "certifications",
            Section::Publications => "publications",
            Section::Awards => "awards",
            Section::VolunteerWork => "volunteer_work",
            Section::Languages => "languages",
            Section::References => "references",
            Section::CustomSections => "custom_sections",
        }
    }
}

impl FromStr for Section {
    type Err = CvError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DEFAULT_SECTION_ORDER
            .iter()
            .copied()
            .find(|section| section.name() == s.trim())
            .ok_or_else(|| CvError::UnknownSection(s.trim().to_string()))
    }
}

/// Parses a comma-separated section list, e.g. "personal_info,skills".
pub fn parse_section_order(list: &str) -> Result<Vec<Section>, CvError> {
    list.split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Section::from_str)
        .collect()
}

/// Invokes every renderer in `order`. Renderers whose section is absent
/// are no-ops, so the output reflects exactly the present data.
pub fn assemble(view: &CvView, order: &[Section], doc: &mut dyn DocumentSink) {
    for section in order {
        section.render(view, doc);
    }
}

/// Full generation: adapts the record, renders every section in order
/// into a DOCX sink, and atomically writes the output file.
pub fn generate_document(
    record: &CvRecord,
    style: &StyleConfig,
    order: &[Section],
    output: &Path,
) -> Result<(), CvError> {
    let view = CvView::new(record);
    let mut sink = DocxSink::new(style);
    assemble(&view, order, &mut sink);
    sink.save(output)?;
    info!("CV saved as {}", output.display());
    Ok(())
}
