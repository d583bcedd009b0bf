//! SRT subtitle parser
//!
//! Parses SRT documents downloaded from a track's `srt` URL into timed
//! cues, or flattens them into plain text.

use std::sync::LazyLock;

use regex::Regex;

use crate::types::SubtitleCue;

static BLOCK_SEPARATOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n\s*\r?\n").expect("valid block separator regex"));

static TIMING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{2}):(\d{2}):(\d{2}),(\d{3})\s*-->\s*(\d{2}):(\d{2}):(\d{2}),(\d{3})")
        .expect("valid timing regex")
});

/// Parses an SRT document into cues
///
/// Blocks without a numeric index or a valid timing line are skipped.
/// Handles CRLF line endings and a missing trailing blank line.
pub fn parse_srt(content: &str) -> Vec<SubtitleCue> {
    BLOCK_SEPARATOR
        .split(content.trim())
        .filter_map(parse_block)
        .collect()
}

/// Extracts only the spoken text from an SRT document
///
/// Drops index and timing lines and joins the remaining text of each
/// block with newlines.
pub fn extract_text_from_srt(content: &str) -> String {
    BLOCK_SEPARATOR
        .split(content)
        .filter_map(|block| {
            let lines: Vec<&str> = block.lines().filter(|l| !l.trim().is_empty()).collect();
            if lines.len() < 3 {
                return None;
            }
            let text = lines[2..].join("\n");
            let text = text.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_block(block: &str) -> Option<SubtitleCue> {
    let mut lines = block.lines().map(str::trim).filter(|l| !l.is_empty());

    let id = lines.next()?.parse::<u32>().ok()?;
    let caps = TIMING.captures(lines.next()?)?;

    let seconds = |offset: usize| -> Option<f64> {
        let part = |i: usize| caps.get(offset + i)?.as_str().parse::<f64>().ok();
        Some(part(0)? * 3600.0 + part(1)? * 60.0 + part(2)? + part(3)? / 1000.0)
    };
    let start = seconds(1)?;
    let end = seconds(5)?;

    let text = lines.collect::<Vec<_>>().join("\n");

    Some(SubtitleCue {
        id,
        start,
        end,
        text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "1\n00:00:01,000 --> 00:00:04,500\nHello there\n\n2\n00:01:02,250 --> 00:01:05,000\nGeneral\nKenobi\n";

    #[test]
    fn test_parse_srt_basic() {
        let cues = parse_srt(SAMPLE);
        assert_eq!(cues.len(), 2);

        assert_eq!(cues[0].id, 1);
        assert_eq!(cues[0].start, 1.0);
        assert_eq!(cues[0].end, 4.5);
        assert_eq!(cues[0].text, "Hello there");

        assert_eq!(cues[1].start, 62.25);
        assert_eq!(cues[1].text, "General\nKenobi");
    }

    #[test]
    fn test_parse_srt_crlf() {
        let crlf = SAMPLE.replace('\n', "\r\n");
        let cues = parse_srt(&crlf);
        assert_eq!(cues.len(), 2);
        assert_eq!(cues[1].text, "General\nKenobi");
    }

    #[test]
    fn test_parse_srt_skips_malformed_blocks() {
        let content = "x\n00:00:01,000 --> 00:00:02,000\nbad id\n\n2\nnot a timing\ntext\n\n3\n01:00:00,000 --> 01:00:01,000\nok";
        let cues = parse_srt(content);
        assert_eq!(cues.len(), 1);
        assert_eq!(cues[0].id, 3);
        assert_eq!(cues[0].start, 3600.0);
    }

    #[test]
    fn test_parse_srt_empty() {
        assert!(parse_srt("").is_empty());
        assert!(parse_srt("\n\n  \n").is_empty());
    }

    #[test]
    fn test_extract_text_from_srt() {
        assert_eq!(extract_text_from_srt(SAMPLE), "Hello there\nGeneral\nKenobi");
    }

    #[test]
    fn test_extract_text_skips_short_blocks() {
        let content = "1\n00:00:01,000 --> 00:00:02,000\n\n\n2\n00:00:03,000 --> 00:00:04,000\nonly this";
        assert_eq!(extract_text_from_srt(content), "only this");
    }
}
