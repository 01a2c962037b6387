//! Best-effort extraction of question/answer pairs from free-form AI output.
//!
//! The expected shape is the one the generation prompt asks for:
//! ```text
//! 1. Question: What is Rust?
//! Answer: A systems programming language.
//!
//! 2. Question: What does the borrow checker enforce?
//! Answer: Aliasing XOR mutability.
//! ```
//! Models drift from that format, so four strategies are tried in order and
//! the first one that yields anything wins. None of them ever fails; the worst
//! case is an empty list.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::CardDraft;

/// Both sides of an accepted card must be longer than this after trimming.
const MIN_SIDE_CHARS: usize = 3;
/// Paragraph pairs need a little more text than that to count.
const MIN_PARAGRAPH_CHARS: usize = 5;
/// Lines at least this long are never treated as questions.
const MAX_QUESTION_LINE_CHARS: usize = 200;
/// A line must be longer than this to become an answer in the heuristic pass.
const MIN_HEURISTIC_ANSWER_CHARS: usize = 10;

static NUMBERED_ITEM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*\d+[.)]").expect("valid numbered item regex"));

static NUMBERED_CARD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?is)^\s*\d+[.)]\s*(?:(?:question|q|front)\s*:)?\s*(.+?)\n\s*(?:answer|a|back)\s*:\s*(.+)",
    )
    .expect("valid numbered card regex")
});

static LABELED_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(?:\d+[.)]\s*)?(question|q|front|answer|a|back)\s*:\s*(.*)$")
        .expect("valid labeled line regex")
});

static PARAGRAPH_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n\s*").expect("valid paragraph break regex"));

static FRONT_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:(?:question|q|front)\s*:|\d+[.)])\s*").expect("valid front label regex")
});

static BACK_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?:answer|a|back)\s*:\s*").expect("valid back label regex")
});

static QUESTION_ONLY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:question|q|front)[:\s]+([^\n]+?)(?:\n|answer|back|$)")
        .expect("valid question-only regex")
});

/// One extraction strategy of the cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// `1. Question: ...` / `Answer: ...` blocks.
    Numbered,
    /// Independent `Q:` and `A:` labels paired by position.
    Labeled,
    /// Consecutive blank-line separated paragraphs.
    Paragraphs,
    /// Lines containing `?` followed by an answer line.
    QuestionMarks,
}

impl Strategy {
    /// Cascade order.
    pub const ALL: [Strategy; 4] = [
        Strategy::Numbered,
        Strategy::Labeled,
        Strategy::Paragraphs,
        Strategy::QuestionMarks,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Numbered => "numbered",
            Self::Labeled => "labeled",
            Self::Paragraphs => "paragraphs",
            Self::QuestionMarks => "question_marks",
        }
    }

    /// Run this strategy alone, without the final length filter.
    pub fn extract(self, text: &str) -> Vec<CardDraft> {
        match self {
            Self::Numbered => numbered_blocks(text),
            Self::Labeled => labeled_pairs(text),
            Self::Paragraphs => paragraph_pairs(text),
            Self::QuestionMarks => question_mark_lines(text),
        }
    }
}

/// Result of running the cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Strategy that produced the cards, if any did.
    pub strategy: Option<Strategy>,
    pub cards: Vec<CardDraft>,
}

/// Extract cards from raw AI text.
pub fn parse(text: &str) -> Vec<CardDraft> {
    parse_outcome(text).cards
}

/// Extract cards and report which strategy matched.
///
/// The first strategy with a non-empty result wins, and the length filter is
/// applied to its output only. A winning strategy whose pairs are all filtered
/// out still ends the cascade.
pub fn parse_outcome(text: &str) -> ParseOutcome {
    for strategy in Strategy::ALL {
        let cards = strategy.extract(text);
        if !cards.is_empty() {
            return ParseOutcome {
                strategy: Some(strategy),
                cards: cards.into_iter().filter(is_substantial).collect(),
            };
        }
    }

    ParseOutcome {
        strategy: None,
        cards: Vec::new(),
    }
}

/// Last-ditch extraction of question labels only. Backs are left empty.
pub fn questions_only(text: &str) -> Vec<CardDraft> {
    QUESTION_ONLY
        .captures_iter(text)
        .map(|caps| caps[1].trim().to_string())
        .filter(|front| !front.is_empty())
        .map(|front| CardDraft::new(front, ""))
        .collect()
}

fn is_substantial(card: &CardDraft) -> bool {
    char_len(&card.front) > MIN_SIDE_CHARS && char_len(&card.back) > MIN_SIDE_CHARS
}

fn char_len(s: &str) -> usize {
    s.trim().chars().count()
}

fn numbered_blocks(text: &str) -> Vec<CardDraft> {
    let starts: Vec<usize> = NUMBERED_ITEM.find_iter(text).map(|m| m.start()).collect();

    starts
        .iter()
        .enumerate()
        .filter_map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(text.len());
            let caps = NUMBERED_CARD.captures(&text[start..end])?;
            let front = caps[1].trim();
            // The answer stops at the first blank line.
            let back = PARAGRAPH_BREAK
                .split(&caps[2])
                .next()
                .unwrap_or_default()
                .trim();
            if front.is_empty() || back.is_empty() {
                None
            } else {
                Some(CardDraft::new(front, back))
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Side {
    Question,
    Answer,
}

enum LineType<'a> {
    Label(Side, &'a str),
    Text(&'a str),
    Empty,
}

fn classify_line(line: &str) -> LineType<'_> {
    if let Some(caps) = LABELED_LINE.captures(line) {
        let side = match caps[1].to_lowercase().as_str() {
            "question" | "q" | "front" => Side::Question,
            _ => Side::Answer,
        };
        let rest = caps.get(2).map_or("", |m| m.as_str());
        LineType::Label(side, rest)
    } else if line.trim().is_empty() {
        LineType::Empty
    } else {
        LineType::Text(line.trim())
    }
}

/// Collects labeled fields; a field runs until the next label or blank line.
struct LabelCollector {
    questions: Vec<String>,
    answers: Vec<String>,
    current: Option<(Side, Vec<String>)>,
}

impl LabelCollector {
    fn new() -> Self {
        Self {
            questions: Vec::new(),
            answers: Vec::new(),
            current: None,
        }
    }

    fn process_line(&mut self, line: &str) {
        match classify_line(line) {
            LineType::Label(side, text) => {
                self.flush();
                self.current = Some((side, vec![text.to_string()]));
            }
            LineType::Text(text) => {
                if let Some((_, buffer)) = self.current.as_mut() {
                    buffer.push(text.to_string());
                }
            }
            LineType::Empty => self.flush(),
        }
    }

    fn flush(&mut self) {
        if let Some((side, buffer)) = self.current.take() {
            let content = buffer.join("\n").trim().to_string();
            match side {
                Side::Question => self.questions.push(content),
                Side::Answer => self.answers.push(content),
            }
        }
    }
}

fn labeled_pairs(text: &str) -> Vec<CardDraft> {
    let mut collector = LabelCollector::new();
    for line in text.lines() {
        collector.process_line(line);
    }
    collector.flush();

    let LabelCollector {
        questions, answers, ..
    } = collector;

    // Positional pairing; only the counts are checked.
    if questions.is_empty() || questions.len() != answers.len() {
        return Vec::new();
    }

    questions
        .into_iter()
        .zip(answers)
        .filter(|(front, back)| !front.is_empty() && !back.is_empty())
        .map(|(front, back)| CardDraft::new(front, back))
        .collect()
}

fn paragraph_pairs(text: &str) -> Vec<CardDraft> {
    let sections: Vec<&str> = PARAGRAPH_BREAK.split(text).collect();
    if sections.len() < 2 {
        return Vec::new();
    }

    sections
        .chunks_exact(2)
        .filter_map(|pair| {
            let front = FRONT_LABEL.replace(pair[0].trim(), "");
            let back = BACK_LABEL.replace(pair[1].trim(), "");
            let (front, back) = (front.trim(), back.trim());
            if char_len(front) > MIN_PARAGRAPH_CHARS && char_len(back) > MIN_PARAGRAPH_CHARS {
                Some(CardDraft::new(front, back))
            } else {
                None
            }
        })
        .collect()
}

fn question_mark_lines(text: &str) -> Vec<CardDraft> {
    let mut cards = Vec::new();
    let mut current: Option<CardDraft> = None;

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        let length = line.chars().count();
        if line.contains('?') && length < MAX_QUESTION_LINE_CHARS {
            if let Some(card) = current.take().filter(|c| !c.back.is_empty()) {
                cards.push(card);
            }
            current = Some(CardDraft::new(line, ""));
        } else if let Some(card) = current.as_mut() {
            if card.back.is_empty() && length > MIN_HEURISTIC_ANSWER_CHARS {
                card.back = line.to_string();
            }
        }
    }

    // A trailing question without an answer is dropped.
    if let Some(card) = current.filter(|c| !c.back.is_empty()) {
        cards.push(card);
    }

    cards
}
