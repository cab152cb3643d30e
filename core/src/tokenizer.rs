use crate::config::MAX_NGRAM;

/// Split normalized text into whitespace-separated words.
pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Contiguous `n`-word sequences joined by a single space.
///
/// When there are fewer than `n` words the input is returned unchanged, so a
/// one-word text yields that word again as its "bigram" and "trigram".
pub fn ngrams(words: &[String], n: usize) -> Vec<String> {
    if n == 0 || words.len() < n {
        return words.to_vec();
    }
    words.windows(n).map(|w| w.join(" ")).collect()
}

/// Unigrams followed by every bigram, then every trigram, all built from `words`.
pub fn expand(words: Vec<String>) -> Vec<String> {
    let mut terms = Vec::with_capacity(words.len() * MAX_NGRAM);
    for n in 2..=MAX_NGRAM {
        terms.extend(ngrams(&words, n));
    }
    let mut out = words;
    out.append(&mut terms);
    out
}

/// Tokenize normalized text into unigram, bigram and trigram terms.
pub fn tokenize(text: &str) -> Vec<String> {
    expand(words(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_tokenize() {
        let t = tokenize("moral law binds");
        assert_eq!(
            t,
            vec!["moral", "law", "binds", "moral law", "law binds", "moral law binds"]
        );
    }

    #[test]
    fn short_input_repeats_words() {
        assert_eq!(tokenize("law"), vec!["law", "law", "law"]);
        assert_eq!(tokenize("moral law"), vec!["moral", "law", "moral law", "moral", "law"]);
        assert!(tokenize("   ").is_empty());
    }
}
