use std::sync::LazyLock;

use regex::Regex;

static MARKUP_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[#*`_\[\]()]+").unwrap());
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[.*?\]\(.*?\)").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[.*?\]\(.*?\)").unwrap());
static ASCII_WORD_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[A-Za-z]+").unwrap());

pub trait WordCounter {
    fn count_words(&self, content: &str) -> usize;
}

/// CJK ideographs plus maximal runs of ASCII letters, after markdown syntax
/// is stripped.
///
/// A relative writing-progress metric. Numerals and punctuation are not
/// counted but do split runs: `abc123def` is two words, and `了iPhone手`
/// is one word plus two ideographs.
#[derive(Debug, Default, Clone, Copy)]
pub struct CjkWordCounter;

impl WordCounter for CjkWordCounter {
    fn count_words(&self, content: &str) -> usize {
        if content.is_empty() {
            return 0;
        }

        // Markup characters go first, which also defuses most image and link
        // syntax before the dedicated patterns run.
        let text = MARKUP_CHARS_RE.replace_all(content, "");
        let text = IMAGE_RE.replace_all(&text, "");
        let text = LINK_RE.replace_all(&text, "");

        let cjk = text.chars().filter(|c| is_cjk_ideograph(*c)).count();
        let words = ASCII_WORD_RE.find_iter(&text).count();

        cjk + words
    }
}

/// CJK Unified Ideographs block, U+4E00..=U+9FFF.
pub fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

pub fn word_count(content: &str) -> usize {
    CjkWordCounter.count_words(content)
}
