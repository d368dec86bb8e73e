//! Section renderers — one per CV section.
//!
//! Shared contract: if the section is absent from the view the renderer
//! makes zero sink calls; if present it emits a section heading followed
//! by one block per entry. Malformed entries inside an otherwise-valid
//! section (empty strings, mostly) are skipped with a warning so one bad
//! entry never blocks the document.

use tracing::warn;

use crate::render::builder::{DocumentSink, Inline, ParaOpts};
use crate::render::date::{format_date, format_date_range};
use crate::view::{CvView, Fluency, ReferencesView};

pub const REFERENCES_FALLBACK: &str = "References available upon request.";

// ────────────────────────────────────────────────────────────────────────────
// Personal info & summary
// ────────────────────────────────────────────────────────────────────────────

pub fn personal_info(view: &CvView, doc: &mut dyn DocumentSink) {
    let info = view.personal_info();
    doc.name_header(&info.full_name());

    let mut row = Vec::new();
    push_item(&mut row, Inline::link(&info.email, format!("mailto:{}", info.email)));
    if let Some(phone) = &info.phone {
        push_item(&mut row, Inline::link(phone, format!("tel:{phone}")));
    }
    push_item(&mut row, Inline::text(&info.location));
    doc.paragraph(&row, ParaOpts::centered());

    let mut links = Vec::new();
    if let Some(url) = &info.linked_in {
        push_item(&mut links, Inline::link(shorten_profile_url(url), url));
    }
    if let Some(url) = &info.github_url {
        push_item(&mut links, Inline::link(shorten_profile_url(url), url));
    }
    for url in [&info.website, &info.portfolio, &info.blog].into_iter().flatten() {
        push_item(&mut links, Inline::link(extract_domain(url), url));
    }
    if !links.is_empty() {
        doc.paragraph(
            &links,
            ParaOpts {
                centered: true,
                space_after: Some(3.0),
            },
        );
    }
}

pub fn summary(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(text) = view.summary() else { return };
    doc.section_heading("PROFESSIONAL SUMMARY");
    doc.paragraph(&[Inline::text(text)], ParaOpts::block_end());
}

// ────────────────────────────────────────────────────────────────────────────
// Experience & education
// ────────────────────────────────────────────────────────────────────────────

pub fn experience(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.experience() else { return };
    doc.section_heading("EXPERIENCE");

    for job in entries {
        let mut title = vec![
            Inline::bold(&job.position),
            Inline::text(format!(" | {}", job.company)),
        ];
        if let Some(url) = &job.company_url {
            title.push(Inline::text(" ("));
            title.push(Inline::link(extract_domain(url), url));
            title.push(Inline::text(")"));
        }
        doc.paragraph(&title, ParaOpts::default());

        if let Some(location) = &job.location {
            doc.paragraph(&[Inline::text(location)], ParaOpts::default());
        }
        if let Some(range) =
            format_date_range(Some(&job.start_date), job.end_date.as_deref(), job.current)
        {
            doc.paragraph(&[Inline::text(range)], ParaOpts::default());
        }
        if let Some(description) = &job.description {
            doc.paragraph(&[Inline::text(description)], ParaOpts::default());
        }
        bullet_list(doc, &job.achievements, "achievement");
        if !job.technologies.is_empty() {
            doc.paragraph(
                &[
                    Inline::bold("Technologies used: "),
                    Inline::text(job.technologies.join(", ")),
                ],
                ParaOpts::block_end(),
            );
        }
    }
}

pub fn education(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.education() else { return };
    doc.section_heading("EDUCATION");

    for edu in entries {
        let degree = match &edu.field {
            Some(field) => format!("{} in {}", edu.degree, field),
            None => edu.degree.clone(),
        };
        doc.paragraph(
            &[
                Inline::bold(degree),
                Inline::text(format!(" | {}", edu.institution)),
            ],
            ParaOpts::default(),
        );

        let mut line = Vec::new();
        if let Some(location) = &edu.location {
            line.push(location.clone());
        }
        line.push(format!("Graduated in {}", format_date(&edu.graduation_date)));
        doc.paragraph(&[Inline::text(line.join(" | "))], ParaOpts::default());

        if let Some(gpa) = edu.gpa {
            doc.paragraph(
                &[Inline::text(format!("GPA: {gpa:.2}/4.0"))],
                ParaOpts::default(),
            );
        }
        bullet_list(doc, &edu.honors, "honor");
        bullet_list(doc, &edu.relevant_courses, "course");
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Projects & skills
// ────────────────────────────────────────────────────────────────────────────

pub fn projects(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.projects() else { return };
    doc.section_heading("PROJECTS");

    for project in entries {
        let name = match &project.url {
            Some(url) => Inline::bold_link(&project.name, url),
            None => Inline::bold(&project.name),
        };
        doc.paragraph(&[name], ParaOpts::default());

        if let Some(range) =
            format_date_range(project.start_date.as_deref(), project.end_date.as_deref(), false)
        {
            doc.paragraph(&[Inline::text(range)], ParaOpts::default());
        }
        if let Some(description) = &project.description {
            doc.paragraph(&[Inline::text(description)], ParaOpts::default());
        }
        bullet_list(doc, &project.highlights, "highlight");
        if !project.technologies.is_empty() {
            doc.paragraph(
                &[
                    Inline::bold("Technologies: "),
                    Inline::text(project.technologies.join(", ")),
                ],
                ParaOpts::block_end(),
            );
        }
    }
}

pub fn skills(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(skills) = view.skills() else { return };
    doc.section_heading("SKILLS");

    // Buckets keep first-seen order; uncategorized entries trail as "General".
    let mut buckets: Vec<(String, Vec<String>)> = Vec::new();
    let mut general: Vec<String> = Vec::new();

    for skill in &skills {
        let entry = match skill.level {
            Some(level) => format!("{} ({level})", skill.name),
            None => skill.name.to_string(),
        };
        match skill.category.map(str::trim).filter(|c| !c.is_empty()) {
            Some(category) => {
                match buckets
                    .iter_mut()
                    .find(|(name, _)| name.eq_ignore_ascii_case(category))
                {
                    Some((_, list)) => list.push(entry),
                    None => buckets.push((category.to_string(), vec![entry])),
                }
            }
            None => general.push(entry),
        }
    }
    if !general.is_empty() {
        buckets.push(("General".to_string(), general));
    }

    for (category, list) in buckets {
        doc.paragraph(
            &[
                Inline::bold(format!("{category}: ")),
                Inline::text(list.join(", ")),
            ],
            ParaOpts::default(),
        );
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flat single-paragraph sections
// ────────────────────────────────────────────────────────────────────────────

pub fn certifications(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.certifications() else { return };
    doc.section_heading("CERTIFICATIONS");

    for cert in entries {
        let mut runs = vec![Inline::bold(&cert.name)];
        if let Some(issuer) = &cert.issuer {
            runs.push(Inline::text(format!(", {issuer}")));
        }
        if let Some(date) = &cert.date_obtained {
            runs.push(Inline::text(format!(", Issued {}", format_date(date))));
        }
        if let Some(expiry) = &cert.expiry_date {
            runs.push(Inline::text(format!(" (Expires {})", format_date(expiry))));
        }
        if let Some(url) = &cert.credential_url {
            runs.push(Inline::text(" "));
            runs.push(Inline::link("[View Certificate]", url));
        }
        doc.paragraph(&runs, ParaOpts::block_end());
    }
}

pub fn publications(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.publications() else { return };
    doc.section_heading("PUBLICATIONS");

    for publication in entries {
        let mut runs = vec![Inline::bold(&publication.title)];
        if !publication.authors.is_empty() {
            runs.push(Inline::text(format!(". {}", publication.authors.join(", "))));
        }
        if let Some(publisher) = &publication.publisher {
            runs.push(Inline::text(format!(". {publisher}")));
        }
        if let Some(date) = &publication.date {
            runs.push(Inline::text(format!(", {}", format_date(date))));
        }
        if let Some(doi) = &publication.doi {
            runs.push(Inline::text(" "));
            runs.push(Inline::link(format!("DOI: {doi}"), format!("https://doi.org/{doi}")));
        } else if let Some(url) = &publication.url {
            runs.push(Inline::text(" "));
            runs.push(Inline::link("[Link]", url));
        }
        doc.paragraph(&runs, ParaOpts::block_end());
    }
}

pub fn awards(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.awards() else { return };
    doc.section_heading("AWARDS & HONORS");

    for award in entries {
        let mut runs = vec![Inline::bold(&award.name)];
        if let Some(issuer) = &award.issuer {
            runs.push(Inline::text(format!(", {issuer}")));
        }
        if let Some(date) = &award.date {
            runs.push(Inline::text(format!(", {}", format_date(date))));
        }
        doc.paragraph(&runs, ParaOpts::block_end());

        if let Some(description) = &award.description {
            doc.paragraph(&[Inline::text(description)], ParaOpts::block_end());
        }
    }
}

pub fn volunteer_work(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.volunteer_work() else { return };
    doc.section_heading("VOLUNTEER WORK");

    for work in entries {
        doc.paragraph(&[Inline::bold(&work.organization)], ParaOpts::default());
        if let Some(role) = &work.role {
            doc.paragraph(&[Inline::text(role)], ParaOpts::default());
        }
        if let Some(range) =
            format_date_range(work.start_date.as_deref(), work.end_date.as_deref(), false)
        {
            doc.paragraph(&[Inline::text(range)], ParaOpts::default());
        }
        if let Some(description) = &work.description {
            doc.bullet(description);
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Languages, references, custom sections
// ────────────────────────────────────────────────────────────────────────────

pub fn languages(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.languages() else { return };
    doc.section_heading("LANGUAGES");

    let parts: Vec<String> = entries
        .iter()
        .map(|lang| match lang.fluency {
            Some(Fluency::Native) => format!("{} (Native)", lang.name),
            Some(Fluency::Cefr(level)) => format!("{} ({level})", lang.name),
            None => lang.name.to_string(),
        })
        .collect();
    doc.paragraph(&[Inline::text(parts.join(", "))], ParaOpts::block_end());
}

pub fn references(view: &CvView, doc: &mut dyn DocumentSink) {
    match view.references() {
        ReferencesView::UponRequest => {
            doc.paragraph(&[Inline::text(REFERENCES_FALLBACK)], ParaOpts::default());
        }
        ReferencesView::Provided(refs) => {
            doc.section_heading("REFERENCES");
            for reference in refs {
                let mut runs = vec![Inline::bold(&reference.name)];
                let details: Vec<&str> = [&reference.relationship, &reference.company]
                    .into_iter()
                    .flatten()
                    .map(String::as_str)
                    .collect();
                if !details.is_empty() {
                    runs.push(Inline::text(format!(", {}", details.join(", "))));
                }
                doc.paragraph(&runs, ParaOpts::default());

                let contact: Vec<&str> = [&reference.email, &reference.phone]
                    .into_iter()
                    .flatten()
                    .map(String::as_str)
                    .collect();
                if !contact.is_empty() {
                    doc.paragraph(
                        &[Inline::text(contact.join(" | "))],
                        ParaOpts::block_end(),
                    );
                }
            }
        }
    }
}

pub fn custom_sections(view: &CvView, doc: &mut dyn DocumentSink) {
    let Some(entries) = view.custom_sections() else { return };
    for section in entries {
        if section.title.trim().is_empty() {
            warn!("skipping custom section with empty title");
            continue;
        }
        doc.section_heading(&section.title);
        doc.paragraph(&[Inline::text(&section.content)], ParaOpts::block_end());
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Appends an item to a contact row, separated from the previous one.
fn push_item(row: &mut Vec<Inline>, item: Inline) {
    if !row.is_empty() {
        row.push(Inline::text(" | "));
    }
    row.push(item);
}

/// Emits a bullet per non-empty string, normalizing the trailing period.
fn bullet_list(doc: &mut dyn DocumentSink, items: &[String], kind: &str) {
    for item in items {
        if item.trim().is_empty() {
            warn!("skipping empty {kind} entry");
            continue;
        }
        doc.bullet(&ensure_period(item));
    }
}

fn ensure_period(text: &str) -> String {
    if text.ends_with('.') {
        text.to_string()
    } else {
        format!("{text}.")
    }
}

/// Strips the scheme and path from a URL, leaving the bare host.
fn extract_domain(url: &str) -> String {
    url.trim_start_matches("https://")
        .trim_start_matches("http://")
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

/// Shortens LinkedIn/GitHub profile URLs to `site.com/user`; anything
/// else collapses to the bare domain.
fn shorten_profile_url(url: &str) -> String {
    if let Some(rest) = url.split("linkedin.com/in/").nth(1) {
        if let Some(user) = rest.split('/').next().filter(|u| !u.is_empty()) {
            return format!("linkedin.com/in/{user}");
        }
    }
    if let Some(rest) = url.split("github.com/").nth(1) {
        if let Some(user) = rest.split('/').next().filter(|u| !u.is_empty()) {
            return format!("github.com/{user}");
        }
    }
    extract_domain(url)
}
