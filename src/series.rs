//! Named data series for one file's rate-distortion chart.
//!
//! For each codec the tuned (per-file best) records form one series. When the
//! document also carries a baseline section, each codec additionally gets a
//! "uniform" series drawn from the single best configuration; uniform lines
//! are solid and sit beneath the dashed, triangle-marked tuned lines.

use serde::{Deserialize, Serialize};

use crate::document::DetailRecord;
use crate::registry::ConfigRegistry;
use crate::store::ResultStore;

/// Colors assigned to the baseline and subject codec.
pub const CODEC_COLORS: [&str; 2] = ["blue", "red"];

/// Dash pattern for tuned lines when a uniform line is also shown.
pub const TUNED_DASH: [u32; 2] = [5, 10];

/// Marker drawn at each point.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PointShape {
    /// Plain round marker.
    #[default]
    Circle,
    /// Triangle marker for tuned series.
    Triangle,
}

/// How a series should be drawn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesStyle {
    /// CSS color; `None` lets the renderer pick.
    pub color: Option<String>,
    /// Dash/gap lengths; empty for a solid line.
    pub dash: Vec<u32>,
    /// Point marker.
    pub point_shape: PointShape,
    /// Drawing layer; lower layers are drawn first, beneath higher ones.
    pub layer: u8,
}

impl SeriesStyle {
    /// Solid line in `color`.
    #[must_use]
    pub fn solid(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            ..Self::default()
        }
    }

    /// Uniform (baseline) line: solid, bottom layer.
    #[must_use]
    pub fn uniform(color: &str) -> Self {
        Self::solid(color)
    }

    /// Tuned line shown above a uniform line: dashed with triangle markers.
    #[must_use]
    pub fn tuned(color: &str) -> Self {
        Self {
            color: Some(color.to_string()),
            dash: TUNED_DASH.to_vec(),
            point_shape: PointShape::Triangle,
            layer: 1,
        }
    }

    /// Whether the line is dashed.
    #[must_use]
    pub fn is_dashed(&self) -> bool {
        !self.dash.is_empty()
    }
}

/// One graph line: a title, its records, and how to draw it.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesDefinition {
    /// Legend title.
    pub title: String,
    /// Points, in document order.
    pub records: Vec<DetailRecord>,
    /// Drawing style.
    pub style: SeriesStyle,
}

impl SeriesDefinition {
    /// Create a series.
    #[must_use]
    pub fn new(title: impl Into<String>, records: Vec<DetailRecord>, style: SeriesStyle) -> Self {
        Self {
            title: title.into(),
            records,
            style,
        }
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the series has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn stamp_all(
    records: &[DetailRecord],
    codec: &str,
    registry: &mut ConfigRegistry,
) -> Vec<DetailRecord> {
    records
        .iter()
        .map(|r| {
            registry.add(codec, &r.config_id);
            r.stamped(codec)
        })
        .collect()
}

/// Build the series for `file`.
///
/// Order is fixed: uniform series for codec 0 and 1 (only when the document
/// has a baseline section), then the tuned/main series for codec 0 and 1.
/// Every returned record carries its codec id, and `registry` is reset to the
/// configuration ids drawn for this file.
///
/// A file present for neither codec yields no series at all. A file present
/// for only one codec yields an empty series for the other.
pub fn build(
    store: &ResultStore,
    file: &str,
    registry: &mut ConfigRegistry,
) -> Vec<SeriesDefinition> {
    let codecs = store.codecs();
    for codec in codecs {
        registry.reset(&codec.id);
    }

    if !store.has_file(file) {
        tracing::warn!(file, "file has no detailed results for either codec");
        return Vec::new();
    }

    let has_baseline = store.has_baseline();
    let mut uniform = Vec::new();
    let mut main = Vec::new();

    for (codec, color) in codecs.iter().zip(CODEC_COLORS) {
        let id = codec.id.as_str();

        if let Some(records) = store.baseline_for(id, file) {
            uniform.push(SeriesDefinition::new(
                format!("{id} uniform"),
                stamp_all(records, id, registry),
                SeriesStyle::uniform(color),
            ));
        }

        let records = store.detail_for(id, file).unwrap_or_else(|_| {
            tracing::warn!(codec = id, file, "codec has no detailed results for file");
            &[]
        });
        let (title, style) = if has_baseline {
            (format!("{id} tuned"), SeriesStyle::tuned(color))
        } else {
            (id.to_string(), SeriesStyle::solid(color))
        };
        main.push(SeriesDefinition::new(
            title,
            stamp_all(records, id, registry),
            style,
        ));
    }

    tracing::debug!(
        file,
        uniform = uniform.len(),
        main = main.len(),
        "built series"
    );
    uniform.extend(main);
    uniform
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::sample_doc;

    #[test]
    fn test_without_baseline_two_series() {
        let store = ResultStore::new(sample_doc(&["a.y4m"], false));
        let mut reg = ConfigRegistry::new();
        let series = build(&store, "a.y4m", &mut reg);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].title, "vp9");
        assert_eq!(series[1].title, "x264");
        assert!(series.iter().all(|s| !s.title.contains("uniform")));
        assert!(series.iter().all(|s| !s.style.is_dashed()));
        assert_eq!(series[0].style.point_shape, PointShape::Circle);
        assert_eq!(series[0].style.color.as_deref(), Some("blue"));
        assert_eq!(series[1].style.color.as_deref(), Some("red"));
    }

    #[test]
    fn test_with_baseline_four_series() {
        let store = ResultStore::new(sample_doc(&["a.y4m"], true));
        let mut reg = ConfigRegistry::new();
        let series = build(&store, "a.y4m", &mut reg);

        let titles: Vec<_> = series.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["vp9 uniform", "x264 uniform", "vp9 tuned", "x264 tuned"]);
        for s in &series[..2] {
            assert!(!s.style.is_dashed());
            assert_eq!(s.style.layer, 0);
        }
        for s in &series[2..] {
            assert_eq!(s.style.dash, TUNED_DASH);
            assert_eq!(s.style.point_shape, PointShape::Triangle);
            assert!(s.style.layer > series[0].style.layer);
        }
    }

    #[test]
    fn test_records_are_stamped() {
        let store = ResultStore::new(sample_doc(&["a.y4m"], true));
        let mut reg = ConfigRegistry::new();
        let series = build(&store, "a.y4m", &mut reg);

        assert_eq!(series[0].records[0].codec_id.as_deref(), Some("vp9"));
        assert_eq!(series[3].records[1].codec_id.as_deref(), Some("x264"));
        assert!(series.iter().flat_map(|s| &s.records).all(|r| r.codec_id.is_some()));
        // The store keeps its unstamped originals.
        assert!(store.detail_for("vp9", "a.y4m").unwrap()[0].codec_id.is_none());
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let store = ResultStore::new(sample_doc(&["a.y4m"], true));
        let mut reg = ConfigRegistry::new();
        let first = build(&store, "a.y4m", &mut reg);
        let reg_first = reg.clone();
        let second = build(&store, "a.y4m", &mut reg);
        assert_eq!(first, second);
        assert_eq!(reg, reg_first);
    }

    #[test]
    fn test_registry_tracks_current_file() {
        let store = ResultStore::new(sample_doc(&["a.y4m", "b.y4m"], true));
        let mut reg = ConfigRegistry::new();

        build(&store, "b.y4m", &mut reg);
        assert!(reg.contains("vp9", "t-vp9-2"));
        assert!(reg.contains("vp9", "u-vp9-2"));

        build(&store, "a.y4m", &mut reg);
        assert_eq!(reg.joined("vp9"), "t-vp9-0,t-vp9-1,u-vp9-0,u-vp9-1");
        assert!(!reg.contains("vp9", "t-vp9-2"));
    }

    #[test]
    fn test_unknown_file_yields_no_series() {
        let store = ResultStore::new(sample_doc(&["a.y4m"], true));
        let mut reg = ConfigRegistry::new();
        build(&store, "a.y4m", &mut reg);

        let series = build(&store, "OVERALL avg", &mut reg);
        assert!(series.is_empty());
        assert_eq!(reg.records_for("vp9").count(), 0);
    }

    #[test]
    fn test_file_missing_for_one_codec() {
        let mut doc = sample_doc(&["a.y4m"], false);
        doc.detailed.get_mut("x264").unwrap().clear();
        let store = ResultStore::new(doc);
        let mut reg = ConfigRegistry::new();
        let series = build(&store, "a.y4m", &mut reg);

        assert_eq!(series.len(), 2);
        assert_eq!(series[0].len(), 2);
        assert!(series[1].is_empty());
    }

    #[test]
    fn test_file_under_other_codec_only() {
        let mut doc = sample_doc(&["a.y4m"], false);
        let av1 = doc.detailed["vp9"].clone();
        for files in doc.detailed.values_mut() {
            files.clear();
        }
        doc.detailed.insert("av1".to_string(), av1);
        let store = ResultStore::new(doc);
        let mut reg = ConfigRegistry::new();

        assert!(!store.has_file("a.y4m"));
        assert!(build(&store, "a.y4m", &mut reg).is_empty());
        assert_eq!(reg.records_for("av1").count(), 0);
    }
}
