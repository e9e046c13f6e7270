use serde::{Deserialize, Serialize};

/// Structured result of enriching one word.
///
/// `chinese_meaning` is the only required field; everything else defaults
/// to empty when the provider leaves it out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordInfo {
    pub word: String,
    pub chinese_meaning: String,
    #[serde(default)]
    pub english_meaning: String,
    #[serde(default)]
    pub phonetic: String,
    #[serde(default)]
    pub example_sentence: String,
    #[serde(default)]
    pub synonyms: Vec<String>,
    #[serde(default)]
    pub antonyms: Vec<String>,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub confidence_score: f32,
}

/// One storage row, scoped implicitly to the current user by the
/// credential the store client carries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub chinese_meaning: String,
    pub english_meaning: String,
    pub phonetic: String,
    pub example_sentence: String,
    pub synonyms: Vec<String>,
    pub antonyms: Vec<String>,
}

impl From<WordInfo> for WordRecord {
    fn from(info: WordInfo) -> Self {
        Self {
            word: info.word,
            chinese_meaning: info.chinese_meaning,
            english_meaning: info.english_meaning,
            phonetic: info.phonetic,
            example_sentence: info.example_sentence,
            synonyms: info.synonyms,
            antonyms: info.antonyms,
        }
    }
}
