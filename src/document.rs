//! Typed comparison and sweep documents.
//!
//! These mirror the JSON emitted by the benchmark pipeline. Documents are
//! validated once at the load boundary so that series construction never has
//! to second-guess their shape.
//!
//! ## Comparison document
//!
//! ```text
//! {
//!   "codecs": [[id0, name0], [id1, name1]],
//!   "overall": { "avg": [{"file": ..., <codec>: number}], "drate": [...] },
//!   "detailed": { <codec>: { <file>: [ DetailRecord ] } },
//!   "baseline": { <codec>: { <file>: [ DetailRecord ] } }      // optional
//! }
//! ```
//!
//! ## Sweep document
//!
//! ```text
//! { "sweepdata": { <codec>: { <file>: { <config_id>: [ DetailRecord ] } } } }
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Per-file record lists, keyed by codec id then file name.
pub type RecordsByCodec = BTreeMap<String, BTreeMap<String, Vec<DetailRecord>>>;

/// Identity of a codec taking part in a comparison.
///
/// Serialized as the `[id, display_name]` pair used by result documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "(String, String)", into = "(String, String)")]
pub struct CodecIdentity {
    /// Codec identifier used as a key throughout the document.
    pub id: String,
    /// Human-readable codec name.
    pub display_name: String,
}

impl CodecIdentity {
    /// Create a codec identity.
    #[must_use]
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
        }
    }
}

impl From<(String, String)> for CodecIdentity {
    fn from((id, display_name): (String, String)) -> Self {
        Self { id, display_name }
    }
}

impl From<CodecIdentity> for (String, String) {
    fn from(codec: CodecIdentity) -> Self {
        (codec.id, codec.display_name)
    }
}

/// Measured outcome of one encode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodingResult {
    /// Achieved bitrate in kbps.
    pub bitrate: f64,

    /// Every other measurement (`psnr`, `encode_cputime`, ...).
    #[serde(flatten)]
    pub metrics: BTreeMap<String, Value>,
}

impl EncodingResult {
    /// Create a result with only a bitrate.
    #[must_use]
    pub fn new(bitrate: f64) -> Self {
        Self {
            bitrate,
            metrics: BTreeMap::new(),
        }
    }

    /// Add a numeric measurement.
    #[must_use]
    pub fn with_metric(mut self, name: &str, value: f64) -> Self {
        self.metrics.insert(name.to_string(), Value::from(value));
        self
    }

    /// Numeric value of a measurement; non-numeric values read as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f64> {
        if name == "bitrate" {
            return Some(self.bitrate);
        }
        self.metrics.get(name).and_then(Value::as_f64)
    }
}

/// One encode as listed in a comparison or sweep document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetailRecord {
    /// Encoder configuration that produced this encode.
    pub config_id: String,

    /// Optimizer score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,

    /// Command line used for the encode.
    #[serde(default)]
    pub encode_command: String,

    /// Bitrate the encode was aiming for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_bitrate: Option<f64>,

    /// Measured outcome.
    pub result: EncodingResult,

    /// Codec that produced the record, stamped during series construction.
    #[serde(default, rename = "codec", skip_serializing_if = "Option::is_none")]
    pub codec_id: Option<String>,

    /// Any other direct properties.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl DetailRecord {
    /// Create a record with the given configuration and result.
    #[must_use]
    pub fn new(config_id: impl Into<String>, result: EncodingResult) -> Self {
        Self {
            config_id: config_id.into(),
            score: None,
            encode_command: String::new(),
            target_bitrate: None,
            result,
            codec_id: None,
            extra: BTreeMap::new(),
        }
    }

    /// Set the score.
    #[must_use]
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Set the encode command.
    #[must_use]
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.encode_command = command.into();
        self
    }

    /// A copy of this record attributed to `codec`.
    ///
    /// Stamping the same codec twice yields equal records.
    #[must_use]
    pub fn stamped(&self, codec: &str) -> Self {
        let mut record = self.clone();
        record.codec_id = Some(codec.to_string());
        record
    }

    /// Whether `name` is a direct property of this record.
    #[must_use]
    pub fn has_property(&self, name: &str) -> bool {
        match name {
            "config_id" | "encode_command" | "result" => true,
            "score" => self.score.is_some(),
            "target_bitrate" => self.target_bitrate.is_some(),
            "codec" => self.codec_id.is_some(),
            _ => self.extra.contains_key(name),
        }
    }

    /// Value of a metric for graphing.
    ///
    /// A direct property wins over the nested result; a direct property that
    /// is not numeric, or a name found in neither place, is absent.
    #[must_use]
    pub fn metric_value(&self, name: &str) -> Option<f64> {
        if !self.has_property(name) {
            return self.result.get(name);
        }
        match name {
            "score" => self.score,
            "target_bitrate" => self.target_bitrate,
            _ => self.extra.get(name).and_then(Value::as_f64),
        }
    }
}

/// One row of the per-file overall comparison.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallRow {
    /// File name, or an aggregate label such as `OVERALL avg`.
    pub file: String,

    /// Value per codec id; a codec with no data for the file has no entry.
    #[serde(flatten)]
    pub values: BTreeMap<String, Option<f64>>,
}

impl OverallRow {
    /// Value for a codec.
    #[must_use]
    pub fn value(&self, codec: &str) -> Option<f64> {
        self.values.get(codec).copied().flatten()
    }
}

/// The `overall` section: parallel per-file tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overall {
    /// Average size difference per file.
    pub avg: Vec<OverallRow>,
    /// BD-rate per file, in the same file order as `avg`.
    pub drate: Vec<OverallRow>,
}

/// A two-codec comparison document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonDocument {
    /// Baseline codec first, subject codec second.
    pub codecs: [CodecIdentity; 2],
    /// Per-file overall tables.
    pub overall: Overall,
    /// Per-file best (tuned) encodes.
    pub detailed: RecordsByCodec,
    /// Per-file encodes from the best single configuration, if computed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baseline: Option<RecordsByCodec>,
}

impl ComparisonDocument {
    /// Parse and validate a comparison document loaded from `url`.
    pub fn from_json(text: &str, url: &str) -> Result<Self> {
        let doc: Self = serde_json::from_str(text).map_err(|e| Error::InvalidDocument {
            url: url.to_string(),
            reason: e.to_string(),
        })?;
        doc.validate().map_err(|reason| Error::InvalidDocument {
            url: url.to_string(),
            reason,
        })?;
        Ok(doc)
    }

    /// Check invariants serde cannot express.
    pub fn validate(&self) -> std::result::Result<(), String> {
        let Overall { avg, drate } = &self.overall;
        if avg.len() != drate.len() {
            return Err(format!(
                "overall.avg has {} rows but overall.drate has {}",
                avg.len(),
                drate.len()
            ));
        }
        if let Some((i, (a, d))) = avg
            .iter()
            .zip(drate)
            .enumerate()
            .find(|(_, (a, d))| a.file != d.file)
        {
            return Err(format!(
                "overall row {i}: avg file {:?} does not match drate file {:?}",
                a.file, d.file
            ));
        }
        Ok(())
    }
}

/// Records per configuration id, for one codec and file.
pub type SweepConfigs = BTreeMap<String, Vec<DetailRecord>>;

/// Parameter sweeps behind each configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepDocument {
    /// Sweeps keyed by codec, file, then configuration id.
    pub sweepdata: BTreeMap<String, BTreeMap<String, SweepConfigs>>,
}

impl SweepDocument {
    /// Parse a sweep document loaded from `url`.
    pub fn from_json(text: &str, url: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| Error::InvalidDocument {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// Sweeps for one codec and file.
    #[must_use]
    pub fn configs_for(&self, codec: &str, file: &str) -> Option<&SweepConfigs> {
        self.sweepdata.get(codec).and_then(|files| files.get(file))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"{
        "codecs": [["vp9", "VP9"], ["x264", "x264"]],
        "overall": {
            "avg": [{"file": "a.y4m", "x264": 3.5}, {"file": "OVERALL avg", "x264": 3.5}],
            "drate": [{"file": "a.y4m", "x264": -2.0}, {"file": "OVERALL avg"}]
        },
        "detailed": {
            "vp9": {"a.y4m": [{"config_id": "c1", "score": 40.1, "encode_command": "vpxenc",
                               "target_bitrate": 500,
                               "result": {"bitrate": 480, "psnr": 40.1, "encode_cputime": 1.5}}]},
            "x264": {"a.y4m": []}
        }
    }"#;

    #[test]
    fn test_parse_comparison() {
        let doc = ComparisonDocument::from_json(DOC, "/doc.json").unwrap();
        assert_eq!(doc.codecs[0], CodecIdentity::new("vp9", "VP9"));
        assert_eq!(doc.codecs[1].id, "x264");
        assert!(doc.baseline.is_none());
        assert_eq!(doc.overall.avg[0].value("x264"), Some(3.5));
        assert_eq!(doc.overall.drate[1].value("x264"), None);

        let record = &doc.detailed["vp9"]["a.y4m"][0];
        assert_eq!(record.config_id, "c1");
        assert_eq!(record.result.bitrate, 480.0);
        assert_eq!(record.result.get("psnr"), Some(40.1));
        assert_eq!(record.codec_id, None);
    }

    #[test]
    fn test_reject_mismatched_overall() {
        let text = DOC.replace(r#"{"file": "OVERALL avg"}"#, r#"{"file": "b.y4m"}"#);
        let err = ComparisonDocument::from_json(&text, "/doc.json").unwrap_err();
        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("does not match"));
    }

    #[test]
    fn test_reject_missing_bitrate() {
        let text = DOC.replace(r#""bitrate": 480, "#, "");
        let err = ComparisonDocument::from_json(&text, "/doc.json").unwrap_err();
        assert!(matches!(err, Error::InvalidDocument { .. }));
    }

    #[test]
    fn test_reject_wrong_codec_count() {
        let text = DOC.replace(r#"["x264", "x264"]"#, r#"["x264", "x264"], ["av1", "AV1"]"#);
        assert!(ComparisonDocument::from_json(&text, "/doc.json").is_err());
    }

    #[test]
    fn test_metric_value_lookup() {
        let record = DetailRecord::new(
            "c1",
            EncodingResult::new(300.0)
                .with_metric("psnr", 38.0)
                .with_metric("score", 1.0),
        )
        .with_score(37.5);

        // Direct property shadows the nested result.
        assert_eq!(record.metric_value("score"), Some(37.5));
        assert_eq!(record.metric_value("psnr"), Some(38.0));
        assert_eq!(record.metric_value("bitrate"), Some(300.0));
        assert_eq!(record.metric_value("cpu_unused"), None);
        // Direct but not numeric.
        assert_eq!(record.metric_value("config_id"), None);
    }

    #[test]
    fn test_stamping_is_idempotent() {
        let record = DetailRecord::new("c1", EncodingResult::new(100.0));
        let once = record.stamped("vp9");
        let twice = once.stamped("vp9");
        assert_eq!(once, twice);
        assert_eq!(twice.codec_id.as_deref(), Some("vp9"));
        assert_eq!(record.codec_id, None);
    }

    #[test]
    fn test_record_keeps_unknown_properties() {
        let text = r#"{"config_id": "c", "result": {"bitrate": 1}, "speed": 4}"#;
        let record: DetailRecord = serde_json::from_str(text).unwrap();
        assert!(record.has_property("speed"));
        assert_eq!(record.metric_value("speed"), Some(4.0));
        let back = serde_json::to_value(&record).unwrap();
        assert_eq!(back["speed"], 4);
    }

    #[test]
    fn test_parse_sweep() {
        let text = r#"{"sweepdata": {"vp9": {"a.y4m": {"c1": [
            {"config_id": "c1", "result": {"bitrate": 100, "psnr": 30}},
            {"config_id": "c1", "result": {"bitrate": 200, "psnr": 33}}
        ]}}}}"#;
        let sweep = SweepDocument::from_json(text, "/sweep.json").unwrap();
        assert_eq!(sweep.configs_for("vp9", "a.y4m").map(|c| c["c1"].len()), Some(2));
        assert!(sweep.configs_for("vp9", "b.y4m").is_none());
        assert!(sweep.configs_for("x264", "a.y4m").is_none());
    }
}
