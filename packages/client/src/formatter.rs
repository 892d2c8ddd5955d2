//! Message formatting for terminal display.

/// Formats relay frames for the terminal.
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format a relayed chat message.
    ///
    /// # Arguments
    ///
    /// * `clock` - Receive time, already rendered as `HH:MM:SS`
    /// * `sender_identity` - Who sent the message
    /// * `body` - Message body
    pub fn format_chat_message(clock: &str, sender_identity: &str, body: &str) -> String {
        format!("\n[{}] {}: {}\n", clock, sender_identity, body)
    }

    /// Format a text frame that is not a chat frame.
    pub fn format_raw_message(text: &str) -> String {
        format!("\n[raw] {}\n", text)
    }

    /// Format a binary frame.
    pub fn format_binary_message(len: usize) -> String {
        format!("\n[binary] {} bytes\n", len)
    }

    /// Banner printed once connected.
    pub fn format_connected(name: &str) -> String {
        format!(
            "\nYou are '{}'. Start chatting! Type '{}' to leave.\n",
            name,
            crate::domain::EXIT_COMMAND
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_chat_message() {
        // テスト項目: チャットメッセージが "[time] sender: body" 形式で表示される
        // given (前提条件) / when (操作):
        let formatted = MessageFormatter::format_chat_message("12:34:56", "alice", "Hello!");

        // then (期待する結果):
        assert_eq!(formatted, "\n[12:34:56] alice: Hello!\n");
    }

    #[test]
    fn test_format_chat_message_keeps_body_verbatim() {
        // テスト項目: body はトリムもエスケープもされない
        let formatted = MessageFormatter::format_chat_message("00:00:00", "bob", "  {x}  ");
        assert_eq!(formatted, "\n[00:00:00] bob:   {x}  \n");
    }

    #[test]
    fn test_format_raw_message() {
        assert_eq!(
            MessageFormatter::format_raw_message("plain"),
            "\n[raw] plain\n"
        );
    }

    #[test]
    fn test_format_binary_message() {
        assert_eq!(
            MessageFormatter::format_binary_message(3),
            "\n[binary] 3 bytes\n"
        );
    }

    #[test]
    fn test_format_connected_mentions_exit_command() {
        // テスト項目: 接続バナーに終了方法が表示される
        let formatted = MessageFormatter::format_connected("carol");
        assert!(formatted.contains("'carol'"));
        assert!(formatted.contains("'exit'"));
    }
}
