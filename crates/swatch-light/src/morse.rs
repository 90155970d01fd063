//! Morse code as an on/off light schedule.
//!
//! Text is encoded into a run-length timeline measured in *units*, the
//! length of one dot:
//!
//! ```text
//! dot            ON  1
//! dash           ON  3
//! after a symbol OFF 1
//! after a letter OFF 3 (the symbol gap plus 2)
//! space          OFF 7, added on top of the letter gap
//! ```
//!
//! Adjacent segments of the same state are merged, so the timeline always
//! alternates. Characters without a code are skipped and a trailing OFF run
//! is dropped. How long a unit lasts comes from the sending speed via the
//! PARIS convention, [`unit_ms_from_wpm`].

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Milliseconds per unit at 1 word per minute ("PARIS " is 50 units).
pub const PARIS_MS_PER_WPM: f64 = 1200.0;

const DOT_UNITS: u32 = 1;
const DASH_UNITS: u32 = 3;
const SYMBOL_GAP_UNITS: u32 = 1;
const LETTER_GAP_EXTRA_UNITS: u32 = 2;
const WORD_GAP_UNITS: u32 = 7;

/// One run of the light being on or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    pub on: bool,
    pub units: u32,
}

impl Segment {
    #[must_use]
    pub const fn on(units: u32) -> Self {
        Self { on: true, units }
    }

    #[must_use]
    pub const fn off(units: u32) -> Self {
        Self { on: false, units }
    }
}

/// International Morse for letters, digits and common punctuation.
/// Letters are matched case-insensitively.
#[must_use]
pub const fn morse_code(ch: char) -> Option<&'static str> {
    let code = match ch.to_ascii_uppercase() {
        'A' => ".-",
        'B' => "-...",
        'C' => "-.-.",
        'D' => "-..",
        'E' => ".",
        'F' => "..-.",
        'G' => "--.",
        'H' => "....",
        'I' => "..",
        'J' => ".---",
        'K' => "-.-",
        'L' => ".-..",
        'M' => "--",
        'N' => "-.",
        'O' => "---",
        'P' => ".--.",
        'Q' => "--.-",
        'R' => ".-.",
        'S' => "...",
        'T' => "-",
        'U' => "..-",
        'V' => "...-",
        'W' => ".--",
        'X' => "-..-",
        'Y' => "-.--",
        'Z' => "--..",
        '0' => "-----",
        '1' => ".----",
        '2' => "..---",
        '3' => "...--",
        '4' => "....-",
        '5' => ".....",
        '6' => "-....",
        '7' => "--...",
        '8' => "---..",
        '9' => "----.",
        '.' => ".-.-.-",
        ',' => "--..--",
        '?' => "..--..",
        '\'' => ".----.",
        '!' => "-.-.--",
        '/' => "-..-.",
        '(' => "-.--.",
        ')' => "-.--.-",
        '&' => ".-...",
        ':' => "---...",
        ';' => "-.-.-.",
        '=' => "-...-",
        '+' => ".-.-.",
        '-' => "-....-",
        '_' => "..--.-",
        '"' => ".-..-.",
        '$' => "...-..-",
        '@' => ".--.-.",
        _ => return None,
    };
    Some(code)
}

/// Encode `text` (NFKC-normalized first) into an alternating on/off
/// timeline. Empty or entirely unencodable text gives an empty timeline.
#[must_use]
pub fn build_timeline(text: &str) -> Vec<Segment> {
    let mut timeline: Vec<Segment> = Vec::new();

    for ch in text.nfkc() {
        if ch == ' ' {
            push(&mut timeline, false, WORD_GAP_UNITS);
            continue;
        }
        let Some(code) = morse_code(ch) else {
            continue;
        };
        for symbol in code.bytes() {
            push(&mut timeline, true, if symbol == b'.' { DOT_UNITS } else { DASH_UNITS });
            push(&mut timeline, false, SYMBOL_GAP_UNITS);
        }
        push(&mut timeline, false, LETTER_GAP_EXTRA_UNITS);
    }

    while timeline.last().is_some_and(|s| !s.on) {
        timeline.pop();
    }
    timeline
}

fn push(timeline: &mut Vec<Segment>, on: bool, units: u32) {
    if units == 0 {
        return;
    }
    match timeline.last_mut() {
        Some(last) if last.on == on => last.units += units,
        _ => timeline.push(Segment { on, units }),
    }
}

/// Dots and dashes for display: letters separated by a space, words by
/// ` / `. Unencodable characters are left out.
#[must_use]
pub fn encoded_preview(text: &str) -> String {
    let mut out = String::new();
    for ch in text.nfkc() {
        let piece = if ch == ' ' {
            "/"
        } else if let Some(code) = morse_code(ch) {
            code
        } else {
            continue;
        };
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(piece);
    }
    out
}

/// Length of one unit in milliseconds at `wpm` words per minute.
///
/// Speeds below 1 wpm (and NaN) are treated as 1 wpm.
#[must_use]
pub fn unit_ms_from_wpm(wpm: f64) -> f64 {
    PARIS_MS_PER_WPM / wpm.max(1.0)
}

/// Total units in a timeline.
#[must_use]
pub fn total_units(timeline: &[Segment]) -> u32 {
    timeline.iter().map(|s| s.units).sum()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
