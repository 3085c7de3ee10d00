use std::collections::HashMap;

/// Maps column names case-insensitively back to their original spelling.
///
/// Source CSVs are inconsistent about identifier casing; downstream lookups
/// resolve the spelling actually present in the frame. The first spelling
/// seen wins when two names differ only by case.
#[derive(Debug, Clone)]
pub struct CaseInsensitiveLookup {
    map: HashMap<String, String>,
}

impl CaseInsensitiveLookup {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            let key = name.to_ascii_uppercase();
            map.entry(key).or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Resolve `name` to the spelling present in the source, if any.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map
            .get(&name.to_ascii_uppercase())
            .map(|value| value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&name.to_ascii_uppercase())
    }
}
