//! `generate` — the full pipeline: load, validate, resolve style, render.

use std::path::Path;

use tracing::info;

use crate::errors::CvError;
use crate::input;
use crate::render::{self, Section, DEFAULT_SECTION_ORDER};
use crate::style::{resolver, StyleConfig};

pub fn run(
    input_path: &Path,
    output_path: &Path,
    style_path: Option<&Path>,
    sections: Option<&str>,
) -> Result<(), CvError> {
    let record = input::load_record(input_path)?;
    info!("loaded CV for {}", record.personal_info.full_name());

    let override_value = style_path.map(input::load_value).transpose()?;
    let style = resolver::resolve(&StyleConfig::default(), override_value.as_ref())?;

    let order: Vec<Section> = match sections {
        Some(list) => render::parse_section_order(list)?,
        None => DEFAULT_SECTION_ORDER.to_vec(),
    };

    render::generate_document(&record, &style, &order, output_path)
}
