//! JSON array and JSON Lines edge input.
//!
//! ```text
//! [{"source": "Home", "target": "About", "weight": 3}, ...]      JsonArray
//! {"source": "Home", "target": "About", "weight": 3}             JsonLines
//! {"source": "About", "target": "Home", "weight": 1}
//! ```
//!
//! A document that is not valid JSON at all fails as a whole
//! ([`Error::Json`]). Inside a valid document, each bad record becomes its
//! own [`Error::InvalidEdge`] so the ingest policy can decide what to do.

use serde_json::Value as JsonValue;

use super::{EdgeSource, InputFormat};
use crate::model::EdgeRecord;
use crate::{Error, Result};

/// Edge records parsed from a JSON or JSONL document, one result per record.
#[derive(Debug)]
pub struct JsonEdges {
    format: InputFormat,
    items: Vec<Result<EdgeRecord>>,
}

impl JsonEdges {
    /// Parse `text`, detecting the format from its first non-blank character.
    pub fn parse(text: &str) -> Result<Self> {
        Self::parse_as(text, InputFormat::detect(text))
    }

    pub fn parse_as(text: &str, format: InputFormat) -> Result<Self> {
        let items = match format {
            InputFormat::JsonArray => parse_array(text)?,
            InputFormat::JsonLines => parse_lines(text),
        };
        tracing::debug!(?format, records = items.len(), "parsed edge document");
        Ok(Self { format, items })
    }

    pub fn format(&self) -> InputFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl EdgeSource for JsonEdges {
    fn into_records(self) -> impl Iterator<Item = Result<EdgeRecord>> {
        self.items.into_iter()
    }
}

fn parse_array(text: &str) -> Result<Vec<Result<EdgeRecord>>> {
    let values: Vec<JsonValue> = serde_json::from_str(text)?;
    Ok(values
        .into_iter()
        .enumerate()
        .map(|(i, value)| record_from_value(i + 1, value))
        .collect())
}

fn parse_lines(text: &str) -> Vec<Result<EdgeRecord>> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| {
            let line_no = i + 1;
            serde_json::from_str::<JsonValue>(line.trim())
                .map_err(|e| Error::InvalidEdge { record: line_no, reason: e.to_string() })
                .and_then(|value| record_from_value(line_no, value))
        })
        .collect()
}

/// Check presence and type of `source`, `target` and `weight`, and that the
/// weight is positive.
pub(crate) fn record_from_value(record: usize, value: JsonValue) -> Result<EdgeRecord> {
    // Derived struct deserializers also accept positional arrays
    if !value.is_object() {
        return Err(Error::InvalidEdge {
            record,
            reason: "edge record must be a JSON object".into(),
        });
    }
    let edge: EdgeRecord = serde_json::from_value(value)
        .map_err(|e| Error::InvalidEdge { record, reason: e.to_string() })?;
    if edge.weight == 0 {
        return Err(Error::InvalidEdge {
            record,
            reason: "weight must be a positive integer, got 0".into(),
        });
    }
    Ok(edge)
}
