//! Configuration ids drawn for the currently displayed file.

use std::collections::{BTreeMap, BTreeSet};

/// Per-codec set of configuration ids seen by the last series build.
///
/// Entries for a codec are replaced whenever a build touches that codec, so
/// the registry always describes the file currently on screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigRegistry {
    by_codec: BTreeMap<String, BTreeSet<String>>,
}

impl ConfigRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget everything recorded for `codec`.
    pub fn reset(&mut self, codec: &str) {
        self.by_codec.insert(codec.to_string(), BTreeSet::new());
    }

    /// Record that `config_id` was drawn for `codec`.
    pub fn add(&mut self, codec: &str, config_id: &str) {
        self.by_codec
            .entry(codec.to_string())
            .or_default()
            .insert(config_id.to_string());
    }

    /// Configuration ids drawn for `codec`, in sorted order.
    pub fn records_for(&self, codec: &str) -> impl Iterator<Item = &str> {
        self.by_codec
            .get(codec)
            .into_iter()
            .flat_map(|ids| ids.iter().map(String::as_str))
    }

    /// Whether `config_id` was drawn for `codec`.
    #[must_use]
    pub fn contains(&self, codec: &str, config_id: &str) -> bool {
        self.by_codec
            .get(codec)
            .is_some_and(|ids| ids.contains(config_id))
    }

    /// Comma-joined ids for `codec`, as used in sweep links.
    #[must_use]
    pub fn joined(&self, codec: &str) -> String {
        self.records_for(codec).collect::<Vec<_>>().join(",")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_semantics() {
        let mut reg = ConfigRegistry::new();
        reg.add("vp9", "b");
        reg.add("vp9", "a");
        reg.add("vp9", "b");
        assert_eq!(reg.records_for("vp9").collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(reg.joined("vp9"), "a,b");
        assert!(reg.contains("vp9", "a"));
        assert!(!reg.contains("x264", "a"));
        assert_eq!(reg.records_for("x264").count(), 0);
    }

    #[test]
    fn test_reset_scopes_to_codec() {
        let mut reg = ConfigRegistry::new();
        reg.add("vp9", "a");
        reg.add("x264", "z");
        reg.reset("vp9");
        reg.add("vp9", "c");
        assert_eq!(reg.joined("vp9"), "c");
        assert_eq!(reg.joined("x264"), "z");
    }
}
