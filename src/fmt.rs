//! Reflow/fill exemplar — a `fmt`-like paragraph formatter.
//!
//! Rust port of `src/fmt.c`'s `fmt_paragraph`/`cost`: accumulates words into
//! a fixed-capacity arena, then chooses line breaks by dynamic programming
//! over suffix costs (quadratic deviation from the goal width, raggedness
//! between adjacent lines, widow/orphan penalties, and small bonuses for
//! breaking at sentence or punctuation boundaries). Not wired to a binary —
//! this module exists to exercise the width classifier's heaviest
//! arithmetic consumer, not to add a fourth CLI surface.
//!
//! The original escapes a full arena via a control-flow jump back to the
//! paragraph-reading loop; here that control flow is an explicit signal
//! value returned from [`Accumulator::push_word`] instead.

use unicode_width::UnicodeWidthStr;

/// Cost weights, in the same "tenths of a column" units `fmt.c` uses so
/// that a cost of 50 is exactly as bad as a line 5 columns from the goal.
mod cost {
    pub const RAGGED_PER_COLUMN: i64 = 1;
    pub const WIDOW: i64 = 150;
    pub const ORPHAN: i64 = 150;
    pub const SENTENCE_BONUS: i64 = 60;
    pub const PUNCT_BONUS: i64 = 20;
    pub const OVERLENGTH_PER_COLUMN: i64 = 100;
}

/// Formatter configuration.
#[derive(Debug, Clone, Copy)]
pub struct Config {
    pub max_width: usize,
    /// Preferred width; defaults to 93% of `max_width` (the original's
    /// `LEEWAY`-derived goal).
    pub goal_width: usize,
    /// Two spaces after a sentence-ending word instead of one.
    pub uniform_spacing: bool,
}

impl Config {
    #[must_use]
    pub fn new(max_width: usize) -> Self {
        Config {
            max_width,
            goal_width: max_width * 93 / 100,
            uniform_spacing: true,
        }
    }
}

/// One word of a paragraph under accumulation.
#[derive(Debug, Clone)]
struct Word {
    text: String,
    width: usize,
    /// Ends in a sentence-terminating mark (`.`, `!`, `?`, possibly
    /// followed by closing quotes/brackets).
    sentence_end: bool,
    /// Ends in punctuation, but not a sentence terminator.
    punct: bool,
}

fn classify(word: &str) -> (bool, bool) {
    let trimmed = word.trim_end_matches(|c| matches!(c, '"' | '\'' | ')' | ']'));
    let sentence_end = matches!(trimmed.chars().last(), Some('.') | Some('!') | Some('?'));
    let punct = !sentence_end && matches!(word.chars().last(), Some(c) if c.is_ascii_punctuation());
    (sentence_end, punct)
}

/// Whether the arena needs to be drained before more words can be
/// accepted. Replaces the original's longjmp-style paragraph-full escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FillSignal {
    Continue,
    Flush,
}

/// A fixed-capacity word arena plus the DP fill logic over it.
pub struct Accumulator {
    words: Vec<Word>,
    capacity: usize,
    cfg: Config,
}

impl Accumulator {
    #[must_use]
    pub fn new(cfg: Config, capacity: usize) -> Self {
        Accumulator {
            words: Vec::with_capacity(capacity),
            capacity,
            cfg,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Add one word to the arena. Returns [`FillSignal::Flush`] once the
    /// arena has reached capacity, at which point the caller must call
    /// [`Self::fill`] before pushing further words.
    pub fn push_word(&mut self, text: &str) -> FillSignal {
        let (sentence_end, punct) = classify(text);
        self.words.push(Word {
            text: text.to_owned(),
            width: UnicodeWidthStr::width(text),
            sentence_end,
            punct,
        });
        if self.words.len() >= self.capacity {
            FillSignal::Flush
        } else {
            FillSignal::Continue
        }
    }

    fn spacing_after(&self, w: &Word) -> usize {
        if self.uniform_spacing_applies(w) {
            2
        } else {
            1
        }
    }

    fn uniform_spacing_applies(&self, w: &Word) -> bool {
        self.cfg.uniform_spacing && w.sentence_end
    }

    fn line_width(&self, i: usize, j: usize) -> usize {
        let mut width = 0;
        for (k, w) in self.words[i..j].iter().enumerate() {
            width += w.width;
            if i + k + 1 < j {
                width += self.spacing_after(w);
            }
        }
        width
    }

    /// Run the suffix-cost DP over every word currently in the arena and
    /// return the chosen lines, each words joined by the configured
    /// spacing.
    ///
    /// If `is_final` is `false` (the arena filled up mid-paragraph), the
    /// last chosen line's words are left in the arena as the head of the
    /// next batch, rather than being forced out before more input is
    /// known — mirroring "the current best split is emitted and the tail
    /// becomes the new paragraph head."
    pub fn fill(&mut self, is_final: bool) -> Vec<String> {
        let n = self.words.len();
        if n == 0 {
            return Vec::new();
        }

        // dp[i] = (cost of best arrangement of words[i..n], width of the
        // first line in that arrangement).
        let mut dp: Vec<(i64, usize)> = vec![(0, 0); n + 1];
        let mut next_break: Vec<usize> = vec![n; n + 1];

        for i in (0..n).rev() {
            let mut best_cost = i64::MAX;
            let mut best_j = i + 1;
            let mut best_width = 0usize;

            for j in (i + 1)..=n {
                let width = self.line_width(i, j);
                if width > self.cfg.max_width && j > i + 1 {
                    break; // widths only grow with j; no point continuing.
                }

                let next_width = if j == n { 0 } else { dp[j].1 };
                let ragged =
                    (width as i64 - next_width as i64).abs() * cost::RAGGED_PER_COLUMN;
                let deviation = self.cfg.goal_width as i64 - width as i64;
                let mut total = deviation * deviation + ragged + dp[j].0;

                if width > self.cfg.max_width {
                    total += (width - self.cfg.max_width) as i64 * cost::OVERLENGTH_PER_COLUMN;
                }

                let word_count = j - i;
                if j == n && word_count <= 1 && i > 0 {
                    total += cost::WIDOW;
                }
                if i == 0 && word_count <= 1 && j < n {
                    total += cost::ORPHAN;
                }

                let last = &self.words[j - 1];
                if last.sentence_end {
                    total -= cost::SENTENCE_BONUS;
                } else if last.punct {
                    total -= cost::PUNCT_BONUS;
                }

                if total < best_cost {
                    best_cost = total;
                    best_j = j;
                    best_width = width;
                }
            }

            dp[i] = (best_cost, best_width);
            next_break[i] = best_j;
        }

        let mut lines = Vec::new();
        let mut i = 0;
        let mut last_line_start = 0;
        while i < n {
            let j = next_break[i];
            if !is_final && j == n && i > 0 {
                // Hold the final, possibly-incomplete line back.
                last_line_start = i;
                break;
            }
            lines.push(self.render_line(i, j));
            i = j;
            last_line_start = i;
        }

        self.words.drain(..last_line_start.min(self.words.len()));
        lines
    }

    fn render_line(&self, i: usize, j: usize) -> String {
        let mut s = String::new();
        for (k, w) in self.words[i..j].iter().enumerate() {
            s.push_str(&w.text);
            if i + k + 1 < j {
                for _ in 0..self.spacing_after(w) {
                    s.push(' ');
                }
            }
        }
        s
    }
}

/// Reflow an entire paragraph of whitespace-separated words in one call, for
/// callers that don't need the incremental arena interface.
#[must_use]
pub fn fill_paragraph(text: &str, cfg: Config) -> Vec<String> {
    let mut acc = Accumulator::new(cfg, usize::MAX / 2);
    for word in text.split_whitespace() {
        acc.push_word(word);
    }
    acc.fill(true)
}
