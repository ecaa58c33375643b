//! Transcript text, HTML and participant counts.

use askama::Template;

use crate::model::transcript::{ParticipantCount, TranscriptLine};

/// Messages per author, ignoring bots, in order of first appearance.
pub fn count_participants(lines: &[TranscriptLine]) -> Vec<ParticipantCount> {
    let mut counts: Vec<ParticipantCount> = Vec::new();

    for line in lines.iter().filter(|line| !line.author_is_bot) {
        match counts.iter_mut().find(|c| c.user_id == line.author_id) {
            Some(existing) => existing.count += 1,
            None => counts.push(ParticipantCount {
                user_id: line.author_id,
                count: 1,
            }),
        }
    }

    counts
}

/// Text shown for a message; placeholders stand in for empty content.
pub fn display_content(line: &TranscriptLine) -> &str {
    if !line.content.is_empty() {
        &line.content
    } else if line.has_embeds {
        "[Embed]"
    } else if line.has_attachments {
        "[Attachment]"
    } else {
        ""
    }
}

/// Plain-text transcript, one `[timestamp] author: content` line per message.
pub fn render_text(lines: &[TranscriptLine]) -> String {
    lines
        .iter()
        .map(|line| {
            format!(
                "[{}] {}: {}\n",
                line.timestamp.to_rfc3339(),
                line.author_name,
                display_content(line)
            )
        })
        .collect()
}

struct HtmlMessage<'a> {
    author: &'a str,
    is_bot: bool,
    timestamp: String,
    content: &'a str,
}

#[derive(Template)]
#[template(path = "transcript.html")]
struct TranscriptPage<'a> {
    channel_name: &'a str,
    channel_id: u64,
    generated_at: String,
    messages: Vec<HtmlMessage<'a>>,
    participants: &'a [ParticipantCount],
}

/// Standalone HTML page served by the transcript server.
pub fn render_html(
    channel_id: u64,
    channel_name: &str,
    lines: &[TranscriptLine],
    participants: &[ParticipantCount],
) -> Result<String, askama::Error> {
    let page = TranscriptPage {
        channel_name,
        channel_id,
        generated_at: chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string(),
        messages: lines
            .iter()
            .map(|line| HtmlMessage {
                author: &line.author_name,
                is_bot: line.author_is_bot,
                timestamp: line.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
                content: display_content(line),
            })
            .collect(),
        participants,
    };

    page.render()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn line(author_id: u64, author_is_bot: bool, content: &str) -> TranscriptLine {
        TranscriptLine {
            author_id,
            author_name: format!("user{}", author_id),
            author_is_bot,
            content: content.to_string(),
            has_embeds: false,
            has_attachments: false,
            timestamp: Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 0).unwrap(),
        }
    }

    #[test]
    fn counts_humans_in_first_seen_order() {
        let lines = vec![
            line(2, false, "hi"),
            line(9, true, "bot"),
            line(1, false, "hello"),
            line(2, false, "done"),
        ];

        let counts = count_participants(&lines);

        assert_eq!(
            counts,
            vec![
                ParticipantCount {
                    user_id: 2,
                    count: 2
                },
                ParticipantCount {
                    user_id: 1,
                    count: 1
                },
            ]
        );
    }

    #[test]
    fn text_uses_placeholders_for_empty_content() {
        let mut embed_only = line(9, true, "");
        embed_only.has_embeds = true;
        let mut file_only = line(1, false, "");
        file_only.has_attachments = true;

        let text = render_text(&[line(1, false, "hello"), embed_only, file_only]);

        assert_eq!(
            text,
            "[2026-03-01T12:30:00+00:00] user1: hello\n\
             [2026-03-01T12:30:00+00:00] user9: [Embed]\n\
             [2026-03-01T12:30:00+00:00] user1: [Attachment]\n"
        );
    }

    #[test]
    fn html_escapes_message_content() {
        let lines = vec![line(1, false, "<script>alert(1)</script>")];

        let html = render_html(5, "ticket-bob", &lines, &count_participants(&lines)).unwrap();

        assert!(html.contains("ticket-bob"));
        assert!(!html.contains("<script>alert(1)</script>"));
        assert!(html.contains("&lt;script&gt;"));
    }
}
