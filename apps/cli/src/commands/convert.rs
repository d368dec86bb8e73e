//! `convert` — translates a data file between JSON and YAML.
//!
//! Works on the untyped value so unknown-but-harmless fields survive the
//! round trip; the record is still validated first so a broken file is
//! caught rather than converted.

use std::path::Path;

use tracing::info;

use crate::errors::CvError;
use crate::input;
use crate::models::cv::CvRecord;

pub fn run(input_path: &Path, output_path: &Path) -> Result<(), CvError> {
    let value = input::load_value(input_path)?;
    serde_json::from_value::<CvRecord>(value.clone())
        .map_err(|e| CvError::Validation(e.to_string()))?;
    input::save_value(&value, output_path)?;
    info!(
        "converted {} -> {}",
        input_path.display(),
        output_path.display()
    );
    Ok(())
}
