use std::collections::{HashMap, HashSet};

use serde::Serialize;

/// NLTK English stopword corpus, bundled as a static artifact.
///
/// Contraction fragments ("don't", "shan't") are kept for completeness even
/// though alphabetic tokenization can never produce them.
pub const STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
    "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his", "himself",
    "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself", "they", "them",
    "their", "theirs", "themselves", "what", "which", "who", "whom", "this", "that", "that'll",
    "these", "those", "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
    "had", "having", "do", "does", "did", "doing", "a", "an", "the", "and", "but", "if", "or",
    "because", "as", "until", "while", "of", "at", "by", "for", "with", "about", "against",
    "between", "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further", "then", "once",
    "here", "there", "when", "where", "why", "how", "all", "any", "both", "each", "few", "more",
    "most", "other", "some", "such", "no", "nor", "not", "only", "own", "same", "so", "than",
    "too", "very", "s", "t", "can", "will", "just", "don", "don't", "should", "should've", "now",
    "d", "ll", "m", "o", "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn",
    "didn't", "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't",
    "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn",
    "wouldn't",
];

/// One keyword with its occurrence count
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct KeywordCount {
    pub word: String,
    pub count: usize,
}

/// Extract the most frequent meaningful words from a block of text.
///
/// Deterministic word frequency: lower-cased alphabetic tokens of length >= 3
/// that are not stopwords, counted and returned as the `top_n` by descending
/// count. Ties keep first-encountered order.
pub fn extract_keywords(text: &str, top_n: usize) -> Vec<KeywordCount> {
    let stopwords: HashSet<&str> = STOPWORDS.iter().copied().collect();

    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();

    for token in text.to_lowercase().split(|c: char| !c.is_alphabetic()) {
        // Length in characters, not bytes; accented tokens are multibyte
        if token.chars().count() < 3 || stopwords.contains(token) {
            continue;
        }
        let entry = counts.entry(token.to_string()).or_insert_with(|| {
            order.push(token.to_string());
            0
        });
        *entry += 1;
    }

    let mut keywords: Vec<KeywordCount> = order
        .into_iter()
        .map(|word| {
            let count = counts[&word];
            KeywordCount { word, count }
        })
        .collect();
    keywords.sort_by(|a, b| b.count.cmp(&a.count));
    keywords.truncate(top_n);
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopword_corpus_size() {
        assert_eq!(STOPWORDS.len(), 179);
    }

    #[test]
    fn test_extract_keywords_counts() {
        let keywords = extract_keywords("rust video rust tutorial video rust", 10);
        assert_eq!(
            keywords[0],
            KeywordCount {
                word: "rust".to_string(),
                count: 3
            }
        );
        assert_eq!(keywords[1].word, "video");
        assert_eq!(keywords[1].count, 2);
        assert_eq!(keywords[2].word, "tutorial");
    }

    #[test]
    fn test_extract_keywords_filters_short_tokens() {
        let keywords = extract_keywords("go is ok but systems programming wins", 10);
        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        assert!(!words.contains(&"go"));
        assert!(!words.contains(&"ok"));
        assert!(words.contains(&"systems"));
    }

    #[test]
    fn test_extract_keywords_filters_stopwords() {
        let keywords = extract_keywords("this should have been about content", 10);
        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        assert!(!words.contains(&"this"));
        assert!(!words.contains(&"should"));
        assert!(!words.contains(&"about"));
        assert!(words.contains(&"content"));
    }

    #[test]
    fn test_extract_keywords_splits_on_non_alphabetic() {
        let keywords = extract_keywords("great!!! video... 100% don't-stop", 10);
        let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
        // "don't" splits into "don" (stopword) and "t" (too short)
        assert_eq!(words, vec!["great", "video", "stop"]);
    }

    #[test]
    fn test_extract_keywords_filters_short_multibyte_tokens() {
        // Two-character accented words are longer in bytes than in chars
        assert!(extract_keywords("où où où", 10).is_empty());

        let keywords = extract_keywords("été été", 10);
        assert_eq!(
            keywords,
            vec![KeywordCount {
                word: "été".to_string(),
                count: 2
            }]
        );
    }

    #[test]
    fn test_extract_keywords_case_folding() {
        let keywords = extract_keywords("Amazing AMAZING amazing", 10);
        assert_eq!(keywords.len(), 1);
        assert_eq!(keywords[0].count, 3);
    }

    #[test]
    fn test_extract_keywords_top_n_cap_and_tie_order() {
        let keywords = extract_keywords("alpha beta gamma delta", 2);
        assert_eq!(keywords.len(), 2);
        // All counts tie at 1: first-encountered order wins
        assert_eq!(keywords[0].word, "alpha");
        assert_eq!(keywords[1].word, "beta");
    }

    #[test]
    fn test_extract_keywords_empty_text() {
        assert!(extract_keywords("", 10).is_empty());
    }
}
