//! Product tags (certifications and labels such as `Organic` or `VietGAP`).

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// An ordered list of product tags.
///
/// Tags are trimmed and empty entries are dropped. The catalog serves tags
/// either as a JSON list or as a comma-separated string, and older stored
/// carts may hold `null`; all three deserialize. Serialization always
/// produces a list.
///
/// ```
/// use mountain_harvest_core::Tags;
///
/// let tags: Tags = serde_json::from_str(r#""Organic, VietGAP""#).unwrap();
/// assert!(tags.contains("VietGAP"));
/// assert_eq!(serde_json::to_string(&tags).unwrap(), r#"["Organic","VietGAP"]"#);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Tags(Vec<String>);

impl Tags {
    /// Build from any iterator of tag strings.
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self(
            tags.into_iter()
                .map(|tag| tag.as_ref().trim().to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        )
    }

    /// Parse a comma-separated list.
    #[must_use]
    pub fn parse(csv: &str) -> Self {
        Self::new(csv.split(','))
    }

    /// Whether the exact tag is present.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        let tag = tag.trim();
        self.0.iter().any(|t| t == tag)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl fmt::Display for Tags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join(", "))
    }
}

impl<'de> Deserialize<'de> for Tags {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawTags {
            List(Vec<String>),
            Csv(String),
        }

        Ok(match Option::<RawTags>::deserialize(deserializer)? {
            Some(RawTags::List(list)) => Self::new(list),
            Some(RawTags::Csv(csv)) => Self::parse(&csv),
            None => Self::default(),
        })
    }
}
