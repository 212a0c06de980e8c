use super::token::TokenKind;

/// Keyword spellings recognized by the lexer. A phrase is one or more
/// space-separated words of ASCII letters.
#[derive(Debug, Clone)]
pub struct KeywordTable {
    entries: Vec<(String, TokenKind)>,
    max_words: usize,
}

impl KeywordTable {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, TokenKind)>,
        S: Into<String>,
    {
        let entries: Vec<(String, TokenKind)> = entries
            .into_iter()
            .map(|(phrase, kind)| (normalize(&phrase.into()), kind))
            .collect();
        let max_words = entries
            .iter()
            .map(|(phrase, _)| phrase.split(' ').count())
            .max()
            .unwrap_or(1);

        KeywordTable { entries, max_words }
    }

    /// Default spellings.
    pub fn quebecois() -> Self {
        KeywordTable::new([
            ("MET MOI CA ICITTE", TokenKind::Let),
            ("AMETON QUE", TokenKind::If),
            ("SINON LA", TokenKind::Else),
            ("TOKEBEC", TokenKind::Return),
            ("JAI JAMAIS TOUCHER A MES FILLES", TokenKind::FnStart),
            ("SAUF UNE FOIS AU CHALET", TokenKind::FnEnd),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
        ])
    }

    pub fn classic() -> Self {
        KeywordTable::new([
            ("let", TokenKind::Let),
            ("if", TokenKind::If),
            ("else", TokenKind::Else),
            ("return", TokenKind::Return),
            ("fn", TokenKind::FnStart),
            ("end", TokenKind::FnEnd),
            ("true", TokenKind::True),
            ("false", TokenKind::False),
        ])
    }

    /// Exact phrase lookup.
    pub fn kind_of(&self, phrase: &str) -> Option<TokenKind> {
        self.entries
            .iter()
            .find(|(p, _)| p == phrase)
            .map(|(_, kind)| *kind)
    }

    /// True when `phrase` is made of the leading words of a longer keyword.
    pub fn is_strict_prefix(&self, phrase: &str) -> bool {
        self.entries.iter().any(|(p, _)| {
            p.len() > phrase.len() && p.starts_with(phrase) && p.as_bytes()[phrase.len()] == b' '
        })
    }

    /// Word count of the longest phrase.
    pub fn max_words(&self) -> usize {
        self.max_words
    }
}

impl Default for KeywordTable {
    fn default() -> Self {
        KeywordTable::quebecois()
    }
}

fn normalize(phrase: &str) -> String {
    phrase.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_lookup() {
        let table = KeywordTable::quebecois();
        assert_eq!(table.kind_of("AMETON QUE"), Some(TokenKind::If));
        assert_eq!(table.kind_of("TOKEBEC"), Some(TokenKind::Return));
        assert_eq!(table.kind_of("AMETON"), None);
        assert_eq!(table.kind_of("let"), None);
    }

    #[test]
    fn test_prefix_is_word_wise() {
        let table = KeywordTable::quebecois();
        assert!(table.is_strict_prefix("MET"));
        assert!(table.is_strict_prefix("MET MOI CA"));
        assert!(!table.is_strict_prefix("MET MOI CA ICITTE"));
        assert!(!table.is_strict_prefix("ME"));
        assert!(!table.is_strict_prefix("TOKEBEC"));
        assert_eq!(table.max_words(), 6);
    }

    #[test]
    fn test_phrases_are_normalized() {
        let table = KeywordTable::new([("  do   it ", TokenKind::Let)]);
        assert_eq!(table.kind_of("do it"), Some(TokenKind::Let));
        assert_eq!(table.max_words(), 2);
        assert_eq!(KeywordTable::classic().max_words(), 1);
    }
}
