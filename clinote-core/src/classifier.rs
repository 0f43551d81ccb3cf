/// Answers "is this span a grammatically complete statement?".
///
/// The real answer comes from a tokenizer + part-of-speech tagger living
/// outside this crate. Parsers only ever see this boolean, computed once per
/// [`TextSpan`](crate::types::TextSpan).
pub trait StatementClassifier {
    fn is_statement_like(&self, text: &str) -> bool;
}

impl<F> StatementClassifier for F
where
    F: Fn(&str) -> bool,
{
    fn is_statement_like(&self, text: &str) -> bool {
        self(text)
    }
}

/// Marks every span as a fragment. The parser swaps it in when
/// `classify_spans` is off, so the configured classifier is never called.
pub struct NeverStatement;

impl StatementClassifier for NeverStatement {
    fn is_statement_like(&self, _text: &str) -> bool {
        false
    }
}

/// Crude lexicon-based stand-in for a POS tagger.
///
/// A span is statement-like when it has at least one noun-like token and at
/// least one verb-like token. Verb-like tokens come from a small lexicon of
/// auxiliaries and common clinical verbs, or carry a verbal suffix. Any other
/// alphabetic token that is not a stop word counts as noun-like.
pub struct LexicalClassifier {
    min_suffix_word_len: usize,
}

impl Default for LexicalClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl LexicalClassifier {
    pub fn new() -> Self {
        Self {
            min_suffix_word_len: 5,
        }
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric() && c != '\'')
            .filter(|t| !t.is_empty())
            .map(|t| t.to_lowercase())
    }

    fn is_verb_like(&self, token: &str) -> bool {
        if VERBS.contains(&token) {
            return true;
        }
        if token.len() < self.min_suffix_word_len || !token.chars().all(char::is_alphabetic) {
            return false;
        }
        // -ed / -ing forms, and -ies forms unless listed in NOUN_IES ("worries", not "allergies")
        token.ends_with("ed")
            || token.ends_with("ing")
            || (token.ends_with("ies") && !NOUN_IES.contains(&token))
    }

    fn is_noun_like(&self, token: &str) -> bool {
        token.chars().any(char::is_alphabetic)
            && !STOP_WORDS.contains(&token)
            && !self.is_verb_like(token)
    }
}

impl StatementClassifier for LexicalClassifier {
    fn is_statement_like(&self, text: &str) -> bool {
        let mut has_noun = false;
        let mut has_verb = false;
        for token in Self::tokens(text) {
            if self.is_verb_like(&token) {
                has_verb = true;
            } else if self.is_noun_like(&token) {
                has_noun = true;
            }
            if has_noun && has_verb {
                return true;
            }
        }
        false
    }
}

const VERBS: &[&str] = &[
    "is", "are", "was", "were", "be", "been", "being", "am",
    "has", "have", "had", "do", "does", "did",
    "will", "would", "should", "could", "can", "may", "might", "must", "shall",
    "denies", "deny", "reports", "report", "states", "state", "presents",
    "present", "complains", "complain", "feels", "feel", "notes", "note",
    "takes", "take", "took", "continues", "continue", "remains", "remain",
    "shows", "show", "showed", "reveals", "revealed", "underwent", "undergo",
    "received", "receives", "started", "start", "stopped", "stop", "became",
    "become", "appears", "appear", "developed", "develops", "returned",
    "returns", "tolerated", "tolerates", "admitted", "discharged", "went",
    "came", "got", "gets", "says", "said", "tells", "told", "needs", "need",
    "requires", "require", "used", "uses", "use",
];

const NOUN_IES: &[&str] = &["allergies", "arteries", "studies", "therapies", "injuries", "series", "species"];

const STOP_WORDS: &[&str] = &[
    "a", "an", "the", "and", "or", "but", "of", "to", "in", "on", "at", "for",
    "with", "without", "by", "from", "as", "no", "not", "none", "per", "via",
    "he", "she", "it", "they", "we", "i", "you", "his", "her", "their", "its",
    "this", "that", "these", "those", "there", "here", "than", "then", "so",
    "very", "also", "x", "s", "mg", "ml", "q",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_classifier() {
        let classifier = |text: &str| text.contains("verb");
        assert!(classifier.is_statement_like("has a verb"));
        assert!(!StatementClassifier::is_statement_like(&classifier, "nothing"));
    }

    #[test]
    fn test_lexical_sentence() {
        let classifier = LexicalClassifier::new();
        assert!(classifier.is_statement_like("The patient denies chest pain."));
        assert!(classifier.is_statement_like("Patient was admitted for observation"));
    }

    #[test]
    fn test_lexical_fragments() {
        let classifier = LexicalClassifier::new();
        assert!(!classifier.is_statement_like("chest pain"));
        assert!(!classifier.is_statement_like("120/80"));
        assert!(!classifier.is_statement_like(""));
        assert!(!classifier.is_statement_like("is"));
    }

    #[test]
    fn test_noun_plurals_are_not_verbs() {
        let classifier = LexicalClassifier::new();
        assert!(!classifier.is_statement_like("drug allergies"));
    }

    #[test]
    fn test_ies_suffix_outside_lexicon() {
        let classifier = LexicalClassifier::new();
        assert!(classifier.is_verb_like("worries"));
        assert!(!classifier.is_verb_like("allergies"));
        assert!(classifier.is_statement_like("Daughter worries about falls"));
    }

    #[test]
    fn test_never_statement() {
        assert!(!NeverStatement.is_statement_like("The patient is stable."));
    }
}
