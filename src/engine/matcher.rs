use icu_normalizer::ComposingNormalizerBorrowed;

/// Comparison grammar used when judging a submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// Exact membership in the tone-less reading set.
    Plain,
    /// Base spelling plus trailing tone digit (1-4, none for neutral).
    ToneNumber,
}

impl MatchMode {
    pub fn from_advanced(advanced: bool) -> Self {
        if advanced {
            MatchMode::ToneNumber
        } else {
            MatchMode::Plain
        }
    }
}

/// A tone-number reading split into spelling and tone. `tone == None` is the
/// neutral tone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParsedReading {
    pub base: String,
    pub tone: Option<u8>,
}

pub fn parse_tone_number(reading: &str) -> ParsedReading {
    if let Some((idx, last)) = reading.char_indices().last()
        && idx > 0
        && let Some(tone @ 1..=4) = last.to_digit(10)
    {
        return ParsedReading {
            base: reading[..idx].to_string(),
            tone: Some(tone as u8),
        };
    }
    ParsedReading {
        base: reading.to_string(),
        tone: None,
    }
}

/// Trim, NFC-compose and lower-case a submission. Returns `None` when
/// nothing is left to judge.
pub fn normalize_submission(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let composed = ComposingNormalizerBorrowed::new_nfc().normalize(trimmed);
    Some(composed.to_lowercase())
}

/// Judge one submission against the valid readings of the current item.
/// An empty submission is never correct; callers are expected to skip it
/// before calling.
pub fn judge(
    submitted: &str,
    mode: MatchMode,
    readings_plain: &[String],
    readings_tone_number: &[String],
) -> bool {
    let Some(answer) = normalize_submission(submitted) else {
        return false;
    };

    match mode {
        MatchMode::Plain => readings_plain.iter().any(|r| r.to_lowercase() == answer),
        MatchMode::ToneNumber => {
            let wanted = parse_tone_number(&answer);
            readings_tone_number
                .iter()
                .map(|r| parse_tone_number(&r.to_lowercase()))
                .any(|valid| valid == wanted)
        }
    }
}
