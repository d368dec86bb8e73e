//! `validate` — checks a data file without producing a document.

use std::path::Path;

use tracing::info;

use crate::errors::CvError;
use crate::input;

pub fn run(input_path: &Path) -> Result<(), CvError> {
    let record = input::load_record(input_path)?;
    info!(
        "{} is a valid CV record ({} experience, {} education entries)",
        input_path.display(),
        record.work_experience.len(),
        record.education.len()
    );
    println!("{} is valid", input_path.display());
    Ok(())
}
