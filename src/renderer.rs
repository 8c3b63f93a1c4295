//! Plain-text transcript rendering.
//!
//! Output format, per conversation:
//!
//! ```text
//! === {title} ===
//!
//! [{YYYY-MM-DD HH:MM:SS} ]{Role}: {content}
//!
//! ============================================================
//! ```

use std::io::{self, Write};

use crate::importer::Message;
use crate::utils::{content_text, display_role, format_timestamp};

const SEPARATOR_WIDTH: usize = 60;

/// Write one conversation transcript to `writer`.
///
/// Messages whose content is empty or whitespace-only are dropped entirely,
/// so a conversation of only blank messages still yields a valid file with
/// just the header and the trailer.
pub fn render_conversation<W: Write>(
    writer: &mut W,
    title: &str,
    messages: &[Message],
) -> io::Result<()> {
    writeln!(writer, "=== {title} ===")?;
    writeln!(writer)?;

    for message in messages {
        let content = content_text(message.content.as_ref());
        if content.trim().is_empty() {
            continue;
        }
        let role = display_role(message.role.as_deref());
        let timestamp = message
            .timestamp
            .as_ref()
            .and_then(format_timestamp)
            .unwrap_or_default();
        writeln!(writer, "{timestamp}{role}: {content}")?;
        writeln!(writer)?;
    }

    writeln!(writer, "{}", "=".repeat(SEPARATOR_WIDTH))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(role: &str, content: &str) -> Message {
        serde_json::from_value(json!({"role": role, "content": content})).unwrap()
    }

    fn render(title: &str, messages: &[Message]) -> String {
        let mut buf = Vec::new();
        render_conversation(&mut buf, title, messages).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn header_and_trailer_frame_the_transcript() {
        let out = render("T1", &[message("user", "hi")]);
        assert!(out.starts_with("=== T1 ===\n\n"));
        assert!(out.ends_with(&format!("{}\n", "=".repeat(60))));
    }

    #[test]
    fn roles_are_mapped_per_line() {
        let out = render(
            "t",
            &[
                message("user", "question"),
                message("assistant", "answer"),
                message("system", "prompt"),
            ],
        );
        assert!(out.contains("You: question\n"));
        assert!(out.contains("AI: answer\n"));
        assert!(out.contains("System: prompt\n"));
    }

    #[test]
    fn blank_messages_leave_no_trace() {
        let out = render("t", &[message("user", "   "), message("user", "")]);
        assert_eq!(out, format!("=== t ===\n\n{}\n", "=".repeat(60)));
    }

    #[test]
    fn timestamp_prefix_when_present() {
        let msg: Message = serde_json::from_value(
            json!({"role": "user", "content": "hi", "timestamp": 1_700_000_000}),
        )
        .unwrap();
        let out = render("t", &[msg]);
        // Exact value is local-time dependent; check the shape.
        let line = out.lines().nth(2).unwrap();
        assert!(line.starts_with('['));
        assert!(line.contains("] You: hi"));
    }

    #[test]
    fn bad_timestamp_falls_back_to_no_prefix() {
        let msg: Message = serde_json::from_value(
            json!({"role": "user", "content": "hi", "timestamp": "not a number"}),
        )
        .unwrap();
        let out = render("t", &[msg]);
        assert!(out.contains("\nYou: hi\n"));
    }
}
