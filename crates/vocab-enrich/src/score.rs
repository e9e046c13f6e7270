use vocab_types::WordInfo;

/// Completeness-based confidence in `0.1..=1.0`.
///
/// A base score for having the required translation at all, plus weighted
/// credit for each optional field the provider filled in. Example sentences
/// only count fully when they actually contain the word.
pub fn confidence_score(info: &WordInfo) -> f32 {
    let mut score: f32 = 0.0;

    if !info.chinese_meaning.trim().is_empty() {
        score += 0.40;
    }

    if !info.english_meaning.trim().is_empty() {
        score += 0.15;
    }

    let phonetic = info.phonetic.trim();
    if !phonetic.is_empty() {
        if phonetic.starts_with('/') && phonetic.ends_with('/') && phonetic.len() > 3 {
            score += 0.15;
        } else {
            score += 0.08;
        }
    }

    let example = info.example_sentence.trim();
    if !example.is_empty() {
        if example.to_lowercase().contains(&info.word.to_lowercase()) {
            score += 0.15;
        } else {
            score += 0.05;
        }
    }

    if !info.synonyms.is_empty() {
        score += 0.10;
    }

    if !info.antonyms.is_empty() {
        score += 0.05;
    }

    (score.clamp(0.1, 1.0) * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare(word: &str) -> WordInfo {
        WordInfo {
            word: word.to_string(),
            chinese_meaning: "貓".to_string(),
            english_meaning: String::new(),
            phonetic: String::new(),
            example_sentence: String::new(),
            synonyms: vec![],
            antonyms: vec![],
            provider: "test".to_string(),
            confidence_score: 0.0,
        }
    }

    #[test]
    fn complete_info_scores_higher_than_bare_translation() {
        let bare = bare("cat");

        let full = WordInfo {
            english_meaning: "a small domesticated feline".to_string(),
            phonetic: "/kæt/".to_string(),
            example_sentence: "The cat sat on the mat.".to_string(),
            synonyms: vec!["feline".to_string()],
            antonyms: vec!["dog".to_string()],
            ..bare.clone()
        };

        assert!(confidence_score(&full) > confidence_score(&bare));
    }

    #[test]
    fn score_stays_in_range() {
        let mut info = bare("cat");
        info.chinese_meaning = String::new();
        assert!(confidence_score(&info) >= 0.1);

        let full = WordInfo {
            english_meaning: "def".to_string(),
            phonetic: "/kæt/".to_string(),
            example_sentence: "The cat sat.".to_string(),
            synonyms: vec!["feline".to_string()],
            antonyms: vec!["dog".to_string()],
            ..bare("cat")
        };
        assert!(confidence_score(&full) <= 1.0);
    }

    #[test]
    fn example_without_the_word_earns_less() {
        let mut with_word = bare("cat");
        with_word.example_sentence = "The cat sat on the mat.".to_string();

        let mut without_word = bare("cat");
        without_word.example_sentence = "Something unrelated entirely.".to_string();

        assert!(confidence_score(&with_word) > confidence_score(&without_word));
    }
}
