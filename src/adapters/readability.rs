use crate::domain::model::{Project, Readability};
use crate::domain::ports::ProjectEnricher;
use once_cell::sync::Lazy;
use regex::Regex;

static WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)?").expect("word pattern"));
static SENTENCE_END: Lazy<Regex> = Lazy::new(|| Regex::new(r"[.!?;:]+").expect("sentence pattern"));

/// Leaves projects untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnrichment;

impl ProjectEnricher for NoEnrichment {
    fn enrich(&self, projects: Vec<Project>) -> Vec<Project> {
        projects
    }
}

/// Scores each project description with the Flesch reading-ease and
/// Flesch-Kincaid grade formulas.
#[derive(Debug, Clone, Copy, Default)]
pub struct FleschReadability;

impl ProjectEnricher for FleschReadability {
    fn enrich(&self, projects: Vec<Project>) -> Vec<Project> {
        projects
            .into_iter()
            .map(|mut project| {
                project.readability = score(&project.description);
                project
            })
            .collect()
    }
}

fn count_syllables(word: &str) -> usize {
    let lower = word.to_ascii_lowercase();
    let mut groups = 0;
    let mut previous_vowel = false;
    for c in lower.chars() {
        let vowel = matches!(c, 'a' | 'e' | 'i' | 'o' | 'u' | 'y');
        if vowel && !previous_vowel {
            groups += 1;
        }
        previous_vowel = vowel;
    }
    // 字尾不發音的 e，例如 "make"；"table" 的 le 仍算一個音節
    if groups > 1 && lower.ends_with('e') && !lower.ends_with("le") && !lower.ends_with("ee") {
        groups -= 1;
    }
    groups.max(1)
}

/// `None` when the text has no words.
pub fn score(text: &str) -> Option<Readability> {
    let words: Vec<&str> = WORD.find_iter(text).map(|m| m.as_str()).collect();
    if words.is_empty() {
        return None;
    }

    let sentences = SENTENCE_END
        .split(text)
        .filter(|segment| WORD.is_match(segment))
        .count()
        .max(1);
    let syllables: usize = words.iter().map(|w| count_syllables(w)).sum();

    let words_per_sentence = words.len() as f64 / sentences as f64;
    let syllables_per_word = syllables as f64 / words.len() as f64;

    Some(Readability {
        flesch_reading_ease: 206.835 - 1.015 * words_per_sentence - 84.6 * syllables_per_word,
        flesch_kincaid_grade: 0.39 * words_per_sentence + 11.8 * syllables_per_word - 15.59,
        sentences,
        words: words.len(),
        syllables,
    })
}
