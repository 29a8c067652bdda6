use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Curriculum stage attached to a vocabulary entry.
///
/// The dataset treats stage as an open string, so anything outside the three
/// known stages is kept verbatim instead of failing the whole load. Matching is
/// exact: `"General "` or `"general"` is not `General`. A missing stage is the
/// empty `Other`, reachable only under `Mixed`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Stage {
    General,
    Ks3,
    Ks4,
    Other(String),
}

impl Stage {
    pub fn as_str(&self) -> &str {
        match self {
            Stage::General => "General",
            Stage::Ks3 => "KS3",
            Stage::Ks4 => "KS4",
            Stage::Other(s) => s,
        }
    }
}

impl From<String> for Stage {
    fn from(value: String) -> Self {
        match value.as_str() {
            "General" => Stage::General,
            "KS3" => Stage::Ks3,
            "KS4" => Stage::Ks4,
            _ => Stage::Other(value),
        }
    }
}

impl Default for Stage {
    fn default() -> Self {
        Stage::Other(String::new())
    }
}

impl From<Stage> for String {
    fn from(stage: Stage) -> Self {
        stage.as_str().to_string()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stage choice offered by the exercise wizard. `Mixed` disables stage filtering.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum StageSelector {
    #[default]
    General,
    Ks3,
    Ks4,
    Mixed,
}

impl StageSelector {
    pub const ALL: [StageSelector; 4] = [
        StageSelector::General,
        StageSelector::Ks3,
        StageSelector::Ks4,
        StageSelector::Mixed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StageSelector::General => "General",
            StageSelector::Ks3 => "KS3",
            StageSelector::Ks4 => "KS4",
            StageSelector::Mixed => "Mixed",
        }
    }

    pub fn matches(self, stage: &Stage) -> bool {
        match self {
            StageSelector::Mixed => true,
            StageSelector::General => *stage == Stage::General,
            StageSelector::Ks3 => *stage == Stage::Ks3,
            StageSelector::Ks4 => *stage == Stage::Ks4,
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let idx = Self::ALL.iter().position(|&s| s == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for StageSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One dataset record. Missing or `null` fields deserialize to their defaults
/// so a bad record is dropped by [`VocabularyEntry::is_usable`] instead of
/// failing the whole file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    #[serde(default, deserialize_with = "null_as_default")]
    pub word: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub definition: String,
    #[serde(
        default,
        rename = "synonymns",
        alias = "synonyms",
        deserialize_with = "null_as_default"
    )]
    pub synonyms: Vec<String>,
    #[serde(default, rename = "usage", deserialize_with = "null_as_default")]
    pub usage_sentence: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(
        default,
        rename = "sub-category",
        alias = "subCategory",
        deserialize_with = "null_as_default"
    )]
    pub sub_category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub stage: Stage,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl VocabularyEntry {
    pub fn is_usable(&self) -> bool {
        !self.word.trim().is_empty() && !self.category.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_dataset_shape() {
        let json = r#"{
            "word": "enzyme",
            "definition": "A protein catalyst.",
            "synonymns": ["catalyst"],
            "usage": "The enzyme broke down the starch.",
            "category": "Science",
            "sub-category": "Biology",
            "stage": "KS4"
        }"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.word, "enzyme");
        assert_eq!(entry.synonyms, vec!["catalyst".to_string()]);
        assert_eq!(entry.sub_category, "Biology");
        assert_eq!(entry.stage, Stage::Ks4);
    }

    #[test]
    fn unknown_stage_is_preserved() {
        let json = r#"{"word": "x", "category": "C", "stage": "KS5"}"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.stage, Stage::Other("KS5".to_string()));
        assert_eq!(entry.stage.as_str(), "KS5");
        assert!(!StageSelector::General.matches(&entry.stage));
        assert!(StageSelector::Mixed.matches(&entry.stage));
    }

    #[test]
    fn stage_match_is_exact() {
        assert_eq!(Stage::from("KS3".to_string()), Stage::Ks3);
        assert_eq!(
            Stage::from("General ".to_string()),
            Stage::Other("General ".to_string())
        );
        assert_eq!(Stage::from("ks4".to_string()), Stage::Other("ks4".to_string()));
    }

    #[test]
    fn missing_and_null_fields_default() {
        let json = r#"{"word": "orphan", "category": null, "synonymns": null}"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.category, "");
        assert!(entry.synonyms.is_empty());
        assert_eq!(entry.stage, Stage::default());
        assert!(!entry.is_usable());
        assert!(StageSelector::Mixed.matches(&entry.stage));
        assert!(!StageSelector::General.matches(&entry.stage));
    }

    #[test]
    fn synonyms_alias_accepted() {
        let json = r#"{"word": "x", "category": "C", "stage": "General", "synonyms": ["y"]}"#;
        let entry: VocabularyEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.synonyms, vec!["y".to_string()]);
    }

    #[test]
    fn selector_cycles_through_all_stages() {
        let mut s = StageSelector::General;
        for _ in 0..StageSelector::ALL.len() {
            s = s.next();
        }
        assert_eq!(s, StageSelector::General);
        assert_eq!(StageSelector::General.prev(), StageSelector::Mixed);
    }

    #[test]
    fn blank_word_or_category_is_unusable() {
        let mut entry = VocabularyEntry {
            word: "word".into(),
            definition: String::new(),
            synonyms: Vec::new(),
            usage_sentence: String::new(),
            category: "Cat".into(),
            sub_category: String::new(),
            stage: Stage::General,
        };
        assert!(entry.is_usable());
        entry.word = "  ".into();
        assert!(!entry.is_usable());
        entry.word = "word".into();
        entry.category.clear();
        assert!(!entry.is_usable());
    }
}
