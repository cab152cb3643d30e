use lexis::normalize::{DefaultNormalizer, Normalizer};
use lexis::tokenizer::{ngrams, tokenize, words};

#[test]
fn it_expands_unigrams_bigrams_trigrams_in_order() {
    let toks = tokenize("use of language");
    assert_eq!(
        toks,
        vec!["use", "of", "language", "use of", "of language", "use of language"]
    );
}

#[test]
fn it_builds_trigrams_from_words_not_bigrams() {
    let w = words("a b c d");
    assert_eq!(ngrams(&w, 3), vec!["a b c", "b c d"]);
    assert_eq!(ngrams(&w, 5), w);
}

#[test]
fn it_tokenizes_normalized_text() {
    let text = DefaultNormalizer.normalize("Human   Nature, again!");
    let toks = tokenize(&text);
    assert!(toks.contains(&"human nature".to_string()));
    assert!(toks.contains(&"human nature again".to_string()));
    assert!(!toks.iter().any(|t| t.contains(',')));
}
