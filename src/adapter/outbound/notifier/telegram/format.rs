//! Message formatting for Telegram notifications.

use crate::domain::AlertSeverity;
use crate::port::outbound::notifier::Notification;

use super::notifier::TelegramConfig;

const MAX_TITLE_CHARS: usize = 80;
const MAX_BODY_LINE_CHARS: usize = 120;
const MAX_BODY_LINES: usize = 10;

/// Format a notification into a `MarkdownV2` message, or None if it should be skipped.
pub fn format_notification(notification: &Notification, config: &TelegramConfig) -> Option<String> {
    if notification.level == AlertSeverity::Info && !config.notify_info {
        return None;
    }

    let mut msg = format!(
        "{} *{}*",
        notification.level.emoji(),
        escape_markdown(&truncate(&notification.title, MAX_TITLE_CHARS))
    );

    let lines: Vec<&str> = notification
        .body
        .lines()
        .filter(|l| !l.trim().is_empty())
        .collect();
    if !lines.is_empty() {
        msg.push('\n');
    }
    for line in lines.iter().take(MAX_BODY_LINES) {
        msg.push_str(&format!(
            "\n• {}",
            escape_markdown(&truncate(line, MAX_BODY_LINE_CHARS))
        ));
    }
    if lines.len() > MAX_BODY_LINES {
        msg.push_str(&format!(
            "\n\\.\\.\\.and {} more",
            lines.len() - MAX_BODY_LINES
        ));
    }

    Some(msg)
}

/// Truncate a string with ellipsis (Unicode-safe).
pub fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(notify_info: bool) -> TelegramConfig {
        TelegramConfig {
            bot_token: "token".into(),
            chat_id: 1,
            notify_info,
        }
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("hello"), "hello");
        assert_eq!(escape_markdown("ETH-USDC"), "ETH\\-USDC");
        assert_eq!(escape_markdown("$500.00 (APY)"), "$500\\.00 \\(APY\\)");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hello...");
        assert_eq!(truncate("🚨⚠️", 1), "🚨...");
    }

    #[test]
    fn test_critical_message_layout() {
        let n = Notification::critical("strategy cycle failed", "rpc timeout");
        let text = format_notification(&n, &config(false)).unwrap();
        assert_eq!(text, "🚨 *strategy cycle failed*\n\n• rpc timeout");
    }

    #[test]
    fn test_info_skipped_when_disabled() {
        let n = Notification::info("1 signal(s) submitted", "[DEPOSIT] ETH-USDC");
        assert!(format_notification(&n, &config(false)).is_none());
        assert!(format_notification(&n, &config(true)).is_some());
    }

    #[test]
    fn test_long_body_is_capped() {
        let body = (0..15).map(|i| format!("line {i}")).collect::<Vec<_>>().join("\n");
        let n = Notification::critical("Emergency exit triggered", body);
        let text = format_notification(&n, &config(true)).unwrap();
        assert_eq!(text.matches('•').count(), MAX_BODY_LINES);
        assert!(text.ends_with("and 5 more"));
    }
}
