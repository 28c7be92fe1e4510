//! Decoded document shape.
//!
//! ```text
//! { "subject": { "type": [ { "string": "<subject name>",
//!                            "questions": [ { "num": 1, "questionsStr": "…", … } ] } ] } }
//! ```
//!
//! Question entries stay as ordered JSON objects: the image-marker scan in
//! [`crate::map_document`] needs every string field in declaration order, not
//! just the known ones.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{Error, Result};

#[derive(Debug, Clone, Deserialize)]
pub struct Document {
  pub subject: Option<SubjectContainer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectContainer {
  #[serde(rename = "type")]
  pub subjects: Option<Vec<SubjectEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SubjectEntry {
  #[serde(rename = "string")]
  pub name:      Option<String>,
  pub questions: Option<Vec<Map<String, Value>>>,
}

/// Parse decoded text into a [`Document`].
///
/// JSON syntax errors yield [`Error::Json`]; valid JSON of the wrong shape
/// (including a missing `subject.type` list) yields
/// [`Error::MissingStructure`].
pub fn parse_document(text: &str) -> Result<Document> {
  let value: Value = serde_json::from_str(text)?;
  let doc: Document = serde_json::from_value(value)
    .map_err(|e| Error::MissingStructure(e.to_string()))?;

  match &doc.subject {
    None => Err(Error::MissingStructure("no `subject` object".into())),
    Some(SubjectContainer { subjects: None }) => {
      Err(Error::MissingStructure("`subject` has no `type` list".into()))
    }
    Some(_) => Ok(doc),
  }
}
