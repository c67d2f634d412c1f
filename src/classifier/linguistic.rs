//! Lexical analysis shared by all parsers' fallback tiers.
//!
//! A tiny, deterministic stand-in for a part-of-speech tagger: whitespace and
//! punctuation tokenisation, closed word lists for generic tags, and a small
//! signed-integer sentiment lexicon with negation and intensifier handling.

/// Lower-cases the input and drops apostrophes, so `"I'm"` reads as `"im"`.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| *c != '\'' && *c != '\u{2019}')
        .flat_map(char::to_lowercase)
        .collect()
}

/// A single word as written plus its normalised form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub text: String,
    pub norm: String,
}

/// Splits on anything that is neither alphanumeric nor an apostrophe.
pub fn tokenize(input: &str) -> Vec<Token> {
    input
        .split(|c: char| !(c.is_alphanumeric() || c == '\'' || c == '\u{2019}'))
        .map(|raw| raw.trim_matches(|c| c == '\'' || c == '\u{2019}'))
        .filter(|raw| !raw.is_empty())
        .map(|raw| Token {
            text: raw.to_string(),
            norm: normalize(raw),
        })
        .collect()
}

/// Generic word classes detected by the tagger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Negation,
    Intensifier,
    NegativeEmotion,
    PositiveEmotion,
    Affirmative,
    Refusal,
    Uncertain,
    Filler,
}

const NEGATIONS: &[&str] = &[
    "not", "no", "never", "dont", "doesnt", "didnt", "cant", "cannot", "isnt", "arent", "wasnt",
    "wont", "aint", "nothing", "nobody", "without", "hardly", "barely",
];

const INTENSIFIERS: &[&str] = &[
    "very", "extremely", "really", "quite", "super", "highly", "so", "severely", "deeply",
    "incredibly", "terribly", "totally", "completely",
];

const AFFIRMATIVES: &[&str] = &[
    "yes", "yeah", "yep", "yup", "sure", "definitely", "absolutely", "correct", "right",
    "exactly", "ok", "okay", "alright", "affirmative", "indeed",
];

const REFUSALS: &[&str] = &["no", "nope", "nah", "negative", "never", "wrong", "not"];

const UNCERTAIN: &[&str] = &["maybe", "perhaps", "possibly", "might", "unsure", "probably"];

const FILLERS: &[&str] = &[
    "hmm", "hm", "hmmm", "um", "umm", "uh", "uhh", "er", "erm", "eh", "ah", "idk", "mm", "huh",
];

const LEXICON: &[(&str, i32)] = &[
    ("afraid", -2),
    ("alone", -2),
    ("angry", -3),
    ("awful", -3),
    ("bad", -2),
    ("broken", -2),
    ("cry", -2),
    ("crying", -2),
    ("dead", -3),
    ("death", -3),
    ("depressed", -3),
    ("desperate", -3),
    ("die", -3),
    ("difficult", -1),
    ("dizzy", -2),
    ("dying", -3),
    ("exhausted", -2),
    ("explosion", -2),
    ("fear", -2),
    ("frightened", -3),
    ("frustrated", -2),
    ("hard", -1),
    ("hate", -3),
    ("horrible", -3),
    ("hurt", -2),
    ("hurts", -2),
    ("lonely", -2),
    ("mad", -2),
    ("miserable", -3),
    ("numb", -2),
    ("pain", -2),
    ("sad", -2),
    ("shaken", -2),
    ("shocked", -2),
    ("sick", -2),
    ("siren", -1),
    ("sirens", -1),
    ("sore", -1),
    ("stress", -2),
    ("struggling", -2),
    ("suffering", -3),
    ("terrible", -3),
    ("tired", -1),
    ("trouble", -2),
    ("unhappy", -2),
    ("upset", -2),
    ("weak", -2),
    ("worse", -2),
    ("worst", -3),
    ("better", 2),
    ("calm", 2),
    ("calmer", 2),
    ("comfortable", 2),
    ("content", 2),
    ("glad", 3),
    ("grateful", 3),
    ("great", 3),
    ("happy", 2),
    ("hopeful", 2),
    ("joy", 3),
    ("love", 3),
    ("nice", 2),
    ("peaceful", 2),
    ("relaxed", 2),
    ("relief", 2),
    ("relieved", 2),
    ("rested", 2),
    ("settled", 2),
    ("steady", 2),
    ("strong", 2),
    ("thankful", 2),
    ("wonderful", 3),
];

/// How far back a negation still flips a scored word ("not feeling good").
const NEGATION_WINDOW: usize = 2;

fn lexicon_score(word: &str) -> Option<i32> {
    LEXICON.iter().find(|(w, _)| *w == word).map(|(_, s)| *s)
}

fn in_list(list: &[&str], word: &str) -> bool {
    list.contains(&word)
}

/// The lexical reading of one utterance.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub tokens: Vec<Token>,
    pub score: i32,
    pub scored_words: usize,
    pub tags: Vec<Tag>,
}

impl Analysis {
    pub fn has(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }

    /// True when at least one word carried sentiment.
    pub fn has_evidence(&self) -> bool {
        self.scored_words > 0
    }

    /// True when every token is a filler word (or there are no tokens).
    pub fn is_only_filler(&self) -> bool {
        self.tokens.iter().all(|t| in_list(FILLERS, &t.norm))
    }
}

/// Tags and scores the input.
pub fn analyze(input: &str) -> Analysis {
    let tokens = tokenize(input);
    let mut tags = Vec::new();
    let mut push = |tag: Tag| {
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    };

    let mut score = 0;
    let mut scored_words = 0;

    for (i, token) in tokens.iter().enumerate() {
        let word = token.norm.as_str();
        if in_list(NEGATIONS, word) {
            push(Tag::Negation);
        }
        if in_list(INTENSIFIERS, word) {
            push(Tag::Intensifier);
        }
        if in_list(AFFIRMATIVES, word) {
            push(Tag::Affirmative);
        }
        if in_list(REFUSALS, word) {
            push(Tag::Refusal);
        }
        if in_list(UNCERTAIN, word) {
            push(Tag::Uncertain);
        }
        if in_list(FILLERS, word) {
            push(Tag::Filler);
        }

        let Some(mut value) = lexicon_score(word) else {
            continue;
        };
        let window = &tokens[i.saturating_sub(NEGATION_WINDOW)..i];
        if window.iter().any(|t| in_list(NEGATIONS, &t.norm)) {
            value = -value;
        }
        if window
            .last()
            .is_some_and(|t| in_list(INTENSIFIERS, &t.norm))
        {
            value += value.signum();
        }
        push(if value < 0 {
            Tag::NegativeEmotion
        } else {
            Tag::PositiveEmotion
        });
        score += value;
        scored_words += 1;
    }

    Analysis {
        tokens,
        score,
        scored_words,
        tags,
    }
}
