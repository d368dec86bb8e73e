//! Input loading — JSON/YAML data files and style overrides.
//!
//! Format is detected from the file extension, falling back to content
//! sniffing (JSON first, then YAML) for unrecognized extensions. Typed
//! deserialization of the loaded value is the validation step; it runs
//! before any output file exists, so a validation failure never leaves
//! a partial document behind.

use std::fs;
use std::path::Path;

use serde_json::Value;
use tracing::debug;

use crate::errors::CvError;
use crate::models::cv::CvRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

/// Detects a file's format from its extension, sniffing the content for
/// anything else.
pub fn detect_format(path: &Path) -> Result<FileFormat, CvError> {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => Ok(FileFormat::Json),
        Some("yaml") | Some("yml") => Ok(FileFormat::Yaml),
        _ => sniff_format(path),
    }
}

fn sniff_format(path: &Path) -> Result<FileFormat, CvError> {
    let content = fs::read_to_string(path)?;
    if serde_json::from_str::<Value>(&content).is_ok() {
        debug!("sniffed {} as JSON", path.display());
        return Ok(FileFormat::Json);
    }
    if serde_yaml::from_str::<Value>(&content).is_ok() {
        debug!("sniffed {} as YAML", path.display());
        return Ok(FileFormat::Yaml);
    }
    Err(CvError::UnknownFormat(path.to_path_buf()))
}

/// Loads a JSON or YAML file into an untyped value.
pub fn load_value(path: &Path) -> Result<Value, CvError> {
    let format = detect_format(path)?;
    let content = fs::read_to_string(path)?;
    let value = match format {
        FileFormat::Json => serde_json::from_str(&content)?,
        FileFormat::Yaml => serde_yaml::from_str(&content)?,
    };
    Ok(value)
}

/// Loads and validates a CV record. Serde's error carries the offending
/// field path, which is the user-visible validation message.
pub fn load_record(path: &Path) -> Result<CvRecord, CvError> {
    let value = load_value(path)?;
    serde_json::from_value(value).map_err(|e| CvError::Validation(e.to_string()))
}

/// Writes an untyped value back out as JSON or YAML, by target extension.
pub fn save_value(value: &Value, path: &Path) -> Result<(), CvError> {
    let format = match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("json") => FileFormat::Json,
        Some("yaml") | Some("yml") => FileFormat::Yaml,
        _ => return Err(CvError::UnknownFormat(path.to_path_buf())),
    };
    let content = match format {
        FileFormat::Json => serde_json::to_string_pretty(value)?,
        FileFormat::Yaml => serde_yaml::to_string(value)?,
    };
    fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const MINIMAL_JSON: &str = r#"{
        "personalInfo": {
            "firstName": "Ada", "lastName": "Lovelace",
            "email": "ada@example.com", "location": "London, UK"
        },
        "workExperience": [{"position": "Analyst", "company": "AE Ltd", "startDate": "1843"}],
        "education": [{"degree": "Maths", "institution": "Home", "graduationDate": "1835"}]
    }"#;

    const MINIMAL_YAML: &str = "\
personalInfo:
  firstName: Ada
  lastName: Lovelace
  email: ada@example.com
  location: London, UK
workExperience:
  - position: Analyst
    company: AE Ltd
    startDate: \"1843\"
education:
  - degree: Maths
    institution: Home
    graduationDate: \"1835\"
";

    #[test]
    fn test_detect_by_extension() {
        let json = temp_file(".json", "{}");
        assert_eq!(detect_format(json.path()).unwrap(), FileFormat::Json);
        let yaml = temp_file(".yml", "a: 1");
        assert_eq!(detect_format(yaml.path()).unwrap(), FileFormat::Yaml);
    }

    #[test]
    fn test_detect_by_content_sniff() {
        let json = temp_file(".txt", r#"{"a": 1}"#);
        assert_eq!(detect_format(json.path()).unwrap(), FileFormat::Json);
        let yaml = temp_file(".txt", "a: 1\nb: [x, y]\n");
        assert_eq!(detect_format(yaml.path()).unwrap(), FileFormat::Yaml);
    }

    #[test]
    fn test_load_record_json_and_yaml_agree() {
        let json = temp_file(".json", MINIMAL_JSON);
        let yaml = temp_file(".yaml", MINIMAL_YAML);
        let from_json = load_record(json.path()).unwrap();
        let from_yaml = load_record(yaml.path()).unwrap();
        assert_eq!(
            from_json.personal_info.full_name(),
            from_yaml.personal_info.full_name()
        );
        assert_eq!(
            from_json.work_experience[0].company,
            from_yaml.work_experience[0].company
        );
    }

    #[test]
    fn test_load_record_reports_missing_field() {
        let json = temp_file(".json", r#"{"personalInfo": {"firstName": "Ada"}}"#);
        let err = load_record(json.path()).unwrap_err();
        match err {
            CvError::Validation(msg) => assert!(msg.contains("lastName"), "msg: {msg}"),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_save_value_round_trip() {
        let json = temp_file(".json", MINIMAL_JSON);
        let value = load_value(json.path()).unwrap();

        let out = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        save_value(&value, out.path()).unwrap();
        let reloaded = load_value(out.path()).unwrap();
        assert_eq!(value, reloaded);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let broken = temp_file(".json", "{not json");
        assert!(load_value(broken.path()).is_err());
    }
}
