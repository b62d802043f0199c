//! Spreadsheet records
//!
//! A record is one row of the published sheet: an ordered list of
//! `(column, value)` cells. Column order matters because the first
//! transcript column of a language wins.

/// Column holding the interview concept
pub const CONCEPT_COLUMN: &str = "Notion";
/// Column holding the interviewee's name
pub const INTERVIEWEE_COLUMN: &str = "Interviewee name";
/// Column flagging a late playback start
pub const LATE_START_COLUMN: &str = "Late_4s";

/// Late start applied for a plain truthy flag, in seconds
const LATE_START_FLAG_SECONDS: f64 = 4.0;

/// One spreadsheet row with its cells in column order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    cells: Vec<(String, String)>,
}

impl Record {
    /// Empty record
    #[must_use]
    pub const fn new() -> Self {
        Self { cells: Vec::new() }
    }

    /// Build from `(column, value)` pairs in order
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }

    /// Append a cell
    pub fn push<K: Into<String>, V: Into<String>>(&mut self, column: K, value: V) {
        self.cells.push((column.into(), value.into()));
    }

    /// Value of the first cell with this exact column name
    #[must_use]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(key, _)| key == column)
            .map(|(_, value)| value.as_str())
    }

    /// Value of the first non-empty cell among several column names
    #[must_use]
    pub fn first_of(&self, columns: &[&str]) -> Option<&str> {
        columns
            .iter()
            .filter_map(|column| self.get(column))
            .find(|value| !value.trim().is_empty())
    }

    /// All cells in column order
    pub fn cells(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of cells
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Check if the record has no cells
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Panel title: `"<concept> — <interviewee>"`, or the concept alone
    #[must_use]
    pub fn title(&self) -> String {
        let concept = self.get(CONCEPT_COLUMN).unwrap_or("").trim();
        match self.get(INTERVIEWEE_COLUMN).map(str::trim) {
            Some(person) if !person.is_empty() => format!("{concept} — {person}"),
            _ => concept.to_string(),
        }
    }

    /// Playback start offset in seconds from the late-start column
    ///
    /// `1`, `true` or `yes` mean the default four seconds; a positive number
    /// is taken as seconds; anything else means no offset.
    #[must_use]
    pub fn late_start_seconds(&self) -> f64 {
        let raw = self.get(LATE_START_COLUMN).unwrap_or("").trim();
        if raw.is_empty() {
            return 0.0;
        }
        if ["1", "true", "yes"]
            .iter()
            .any(|flag| raw.eq_ignore_ascii_case(flag))
        {
            return LATE_START_FLAG_SECONDS;
        }
        match raw.parse::<f64>() {
            Ok(seconds) if seconds.is_finite() && seconds > 0.0 => seconds,
            _ => 0.0,
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

#[cfg(feature = "serde")]
mod serde_impl {
    //! Records deserialize from a JSON object, keeping document order

    use super::Record;
    use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};
    use serde_json::Value;

    struct RecordVisitor;

    impl<'de> Visitor<'de> for RecordVisitor {
        type Value = Record;

        fn expecting(&self, formatter: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
            formatter.write_str("an object of column names to cell values")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Record, A::Error> {
            let mut record = Record::new();
            while let Some((key, value)) = map.next_entry::<String, Value>()? {
                let text = match value {
                    Value::Null => continue,
                    Value::String(text) => text,
                    other => other.to_string(),
                };
                record.push(key, text);
            }
            Ok(record)
        }
    }

    impl<'de> Deserialize<'de> for Record {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_map(RecordVisitor)
        }
    }

    impl serde::Serialize for Record {
        fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            use serde::ser::SerializeMap;
            let mut map = serializer.serialize_map(Some(self.len()))?;
            for (key, value) in self.cells() {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_joins_concept_and_person() {
        let record = Record::from_pairs([("Notion", "Resilience"), ("Interviewee name", "Ada")]);
        assert_eq!(record.title(), "Resilience — Ada");

        let record = Record::from_pairs([("Notion", "Resilience"), ("Interviewee name", " ")]);
        assert_eq!(record.title(), "Resilience");
        assert_eq!(Record::new().title(), "");
    }

    #[test]
    fn late_start_values() {
        let late = |value: &str| Record::from_pairs([("Late_4s", value)]).late_start_seconds();
        assert!((late("TRUE") - 4.0).abs() < f64::EPSILON);
        assert!((late("yes") - 4.0).abs() < f64::EPSILON);
        assert!((late("1") - 4.0).abs() < f64::EPSILON);
        assert!((late("2.5") - 2.5).abs() < f64::EPSILON);
        assert!(late("-3").abs() < f64::EPSILON);
        assert!(late("no").abs() < f64::EPSILON);
        assert!(Record::new().late_start_seconds().abs() < f64::EPSILON);
    }

    #[test]
    fn first_column_wins() {
        let record: Record = [("A", "one"), ("A", "two"), ("B", "")].into_iter().collect();
        assert_eq!(record.get("A"), Some("one"));
        assert_eq!(record.first_of(&["B", "A"]), Some("one"));
        assert_eq!(record.len(), 3);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_in_document_order() {
        let json = r#"{"Transcript FR": "Bonjour.", "Transcript": "Hello.", "Late_4s": true, "Year": 1998, "Empty": null}"#;
        let record: Record = serde_json::from_str(json).unwrap();
        let columns: Vec<_> = record.cells().map(|(key, _)| key).collect();
        assert_eq!(columns, vec!["Transcript FR", "Transcript", "Late_4s", "Year"]);
        assert_eq!(record.get("Year"), Some("1998"));
        assert!((record.late_start_seconds() - 4.0).abs() < f64::EPSILON);
    }
}
