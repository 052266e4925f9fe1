//! Text processing: word and sentence tokenization.
//!
//! Words follow Unicode word boundaries (UAX #29). Punctuation marks become
//! tokens of their own and English contraction suffixes are split from their
//! stem, so `"I can't."` tokenizes as `["I", "ca", "n't", "."]`.
//!
//! Sentences come from a character scan over the original text. A period only
//! ends a sentence when it is not glued to the next character and does not
//! follow an abbreviation or an initial. After an ellipsis or a bare number
//! the case of the next word decides.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::dictionaries::abbreviations::{self, ABBREVIATIONS};
use crate::error::{AnalysisError, AnalysisResult};

/// Capital initials as they appear before a period ("J", "J.K", "U.S.A").
static INITIALS_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\p{Lu}\.)*\p{Lu}$").expect("valid regex"));

/// Suffixes split off after an apostrophe (`it's`, `I'm`, `they're`, ...).
const CONTRACTION_SUFFIXES: &[&str] = &["s", "m", "d", "re", "ve", "ll"];

/// How far back to look for the word in front of a period.
const MAX_WORD_LOOKBEHIND: usize = 32;

/// Words and sentences extracted from one essay.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens {
    /// Lowercase alphabetic words in document order.
    pub words: Vec<String>,
    /// Sentences with their original casing and punctuation.
    pub sentences: Vec<String>,
}

/// Split text into word-level tokens.
///
/// Whitespace is dropped; every other segment is kept, including punctuation
/// and numbers. Tokens borrow from `text`.
pub fn tokenize_words(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    for segment in text.split_word_bounds() {
        if segment.chars().all(char::is_whitespace) {
            continue;
        }
        let (stem, suffix) = split_contraction(segment);
        tokens.push(stem);
        if let Some(suffix) = suffix {
            tokens.push(suffix);
        }
    }
    tokens
}

/// Extract lowercase words made only of alphabetic characters.
///
/// Numbers, punctuation, mixed tokens like `b2b`, and contraction suffixes
/// such as `n't` are discarded.
pub fn extract_words(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    tokenize_words(&lowered)
        .into_iter()
        .filter(|token| is_alphabetic_word(token))
        .map(str::to_owned)
        .collect()
}

fn is_alphabetic_word(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

const fn is_apostrophe(ch: char) -> bool {
    matches!(ch, '\'' | '\u{2019}')
}

/// Split `can't` into `ca` + `n't` and `it's` into `it` + `'s`.
fn split_contraction(token: &str) -> (&str, Option<&str>) {
    let Some(pos) = token.rfind(is_apostrophe) else {
        return (token, None);
    };
    if pos == 0 {
        return (token, None);
    }

    let stem = &token[..pos];
    let apostrophe_len = token[pos..].chars().next().map_or(1, char::len_utf8);
    let after = &token[pos + apostrophe_len..];

    if after.eq_ignore_ascii_case("t") && stem.len() > 1 && stem.ends_with(['n', 'N']) {
        let split = pos - 1;
        return (&token[..split], Some(&token[split..]));
    }
    if CONTRACTION_SUFFIXES
        .iter()
        .any(|suffix| after.eq_ignore_ascii_case(suffix))
    {
        return (stem, Some(&token[pos..]));
    }
    (token, None)
}

/// Sentence-aware tokenizer holding its abbreviation dictionary.
#[derive(Debug, Clone)]
pub struct Tokenizer {
    abbreviations: HashSet<String>,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self {
            abbreviations: ABBREVIATIONS.iter().map(|a| (*a).to_string()).collect(),
        }
    }
}

impl Tokenizer {
    /// Create a tokenizer with the built-in abbreviations.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a tokenizer that also knows the given abbreviations.
    ///
    /// Entries are matched case-insensitively and may carry their trailing
    /// period (`"Approx."`). Empty entries and entries containing whitespace
    /// are rejected.
    pub fn with_abbreviations<I, S>(extra: I) -> AnalysisResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tokenizer = Self::default();
        for entry in extra {
            let raw = entry.as_ref();
            let normalized = abbreviations::normalize(raw);
            if normalized.is_empty() {
                return Err(AnalysisError::TokenizerInit(format!(
                    "empty abbreviation {raw:?}"
                )));
            }
            if normalized.chars().any(char::is_whitespace) {
                return Err(AnalysisError::TokenizerInit(format!(
                    "abbreviation {raw:?} contains whitespace"
                )));
            }
            tokenizer.abbreviations.insert(normalized);
        }
        tracing::debug!(
            abbreviations = tokenizer.abbreviations.len(),
            "tokenizer prepared"
        );
        Ok(tokenizer)
    }

    /// Whether `word` is a known abbreviation.
    pub fn is_abbreviation(&self, word: &str) -> bool {
        self.abbreviations
            .contains(&abbreviations::normalize(word))
    }

    /// Tokenize an essay into lowercase words and original-case sentences.
    #[tracing::instrument(skip_all, fields(text_len = essay.len()))]
    pub fn preprocess(&self, essay: &str) -> Tokens {
        let tokens = Tokens {
            words: extract_words(essay),
            sentences: self.split_sentences(essay),
        };
        tracing::debug!(
            words = tokens.words.len(),
            sentences = tokens.sentences.len(),
            "essay tokenized"
        );
        tokens
    }

    /// Split text into trimmed sentences.
    pub fn split_sentences(&self, text: &str) -> Vec<String> {
        if text.trim().is_empty() {
            return Vec::new();
        }

        let chars: Vec<(usize, char)> = text.char_indices().collect();
        let mut sentences = Vec::new();
        let mut start = 0;

        for pos in 0..chars.len() {
            if !is_sentence_terminator(chars[pos].1) {
                continue;
            }
            // A run such as "?!" or "..." is judged at its last mark.
            if chars
                .get(pos + 1)
                .is_some_and(|&(_, next)| is_sentence_terminator(next))
            {
                continue;
            }

            let mut end = pos + 1;
            while end < chars.len() && is_closing_punctuation(chars[end].1) {
                end += 1;
            }
            let end_byte = chars.get(end).map_or(text.len(), |&(offset, _)| offset);

            let context = BoundaryContext::new(&chars, pos, end, &text[start..end_byte]);
            if self.is_sentence_boundary(&context) {
                push_sentence(&mut sentences, &text[start..end_byte]);
                start = end_byte;
            }
        }

        push_sentence(&mut sentences, &text[start..]);
        sentences
    }

    fn is_sentence_boundary(&self, context: &BoundaryContext<'_>) -> bool {
        let Some(next_char) = context.next_char else {
            return true;
        };

        // "3.14", "example.com", "U.S.A"
        if context.attached {
            return false;
        }

        if context.punctuation != '.' {
            return true;
        }

        // An ellipsis ends a sentence only before a capitalized word.
        if context
            .sentence
            .trim_end_matches(is_closing_punctuation)
            .ends_with("...")
        {
            return next_char.is_uppercase();
        }

        if self.is_abbreviation(&context.word_before) || is_initial(&context.word_before) {
            return false;
        }

        // "Chapter 3. then" reads as a numbered item; "3. Then" does not.
        if is_number(&context.word_before) {
            return !next_char.is_lowercase();
        }

        true
    }
}

/// What surrounds a candidate sentence terminator.
struct BoundaryContext<'a> {
    punctuation: char,
    word_before: String,
    /// First non-whitespace character after the terminator and closing marks.
    next_char: Option<char>,
    /// A non-whitespace character follows with no space in between.
    attached: bool,
    sentence: &'a str,
}

impl<'a> BoundaryContext<'a> {
    fn new(chars: &[(usize, char)], pos: usize, end: usize, sentence: &'a str) -> Self {
        let mut begin = pos;
        while begin > 0
            && pos - begin < MAX_WORD_LOOKBEHIND
            && (chars[begin - 1].1.is_alphanumeric() || chars[begin - 1].1 == '.')
        {
            begin -= 1;
        }
        let word_before: String = chars[begin..pos].iter().map(|&(_, c)| c).collect();

        Self {
            punctuation: chars[pos].1,
            word_before: word_before.trim_matches('.').to_string(),
            next_char: chars[end..]
                .iter()
                .map(|&(_, c)| c)
                .find(|c| !c.is_whitespace()),
            attached: chars.get(end).is_some_and(|&(_, c)| !c.is_whitespace()),
            sentence,
        }
    }
}

const fn is_sentence_terminator(ch: char) -> bool {
    matches!(ch, '.' | '!' | '?')
}

const fn is_closing_punctuation(ch: char) -> bool {
    matches!(
        ch,
        '"' | '\'' | ')' | ']' | '}' | '\u{201D}' | '\u{2019}' | '\u{BB}'
    )
}

fn is_number(word: &str) -> bool {
    !word.is_empty() && word.chars().all(|c| c.is_ascii_digit())
}

fn is_initial(word: &str) -> bool {
    word != "I" && INITIALS_PATTERN.is_match(word)
}

fn push_sentence(sentences: &mut Vec<String>, raw: &str) {
    let sentence = raw.trim();
    if !sentence.is_empty() {
        sentences.push(sentence.to_string());
    }
}
