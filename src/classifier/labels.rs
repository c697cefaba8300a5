/// Ordered mapping from a model class index to a species name.
///
/// The map is immutable for the process lifetime. `resolve` is total:
/// an index outside the map answers [`LabelMap::UNKNOWN`] instead of
/// failing, since a class-count mismatch between model and map is an
/// expected edge case rather than an error.
#[derive(Debug, Clone)]
pub struct LabelMap {
    names: Vec<String>,
}

impl LabelMap {
    /// Fallback label for class indices the map does not cover.
    pub const UNKNOWN: &'static str = "unknown";

    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// The classic three-class iris mapping.
    pub fn iris() -> Self {
        Self::new(["setosa", "versicolor", "virginica"])
    }

    /// Resolves a class index to its species name.
    pub fn resolve(&self, index: usize) -> &str {
        self.names.get(index).map_or(Self::UNKNOWN, String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Default for LabelMap {
    fn default() -> Self {
        Self::iris()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_known_indices_in_order() {
        let labels = LabelMap::iris();
        assert_eq!(labels.resolve(0), "setosa");
        assert_eq!(labels.resolve(1), "versicolor");
        assert_eq!(labels.resolve(2), "virginica");
    }

    #[test]
    fn out_of_range_index_is_unknown() {
        let labels = LabelMap::iris();
        assert_eq!(labels.resolve(3), LabelMap::UNKNOWN);
        assert_eq!(labels.resolve(99), LabelMap::UNKNOWN);
    }

    #[test]
    fn empty_map_is_all_unknown() {
        let labels = LabelMap::new(Vec::<String>::new());
        assert!(labels.is_empty());
        assert_eq!(labels.resolve(0), LabelMap::UNKNOWN);
    }
}
