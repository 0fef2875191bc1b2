//! Message formatting utilities for client display.

use hiroba_shared::time::timestamp_to_jst_rfc3339;

/// Message formatter for client display
pub struct MessageFormatter;

impl MessageFormatter {
    /// Format the connection acknowledgement received right after the handshake
    pub fn format_connection_ack(connection_id: &str) -> String {
        format!("\nYou are connected as '{}'\n", connection_id)
    }

    /// Format a roster update listing every connected client
    ///
    /// # Arguments
    ///
    /// * `connection_ids` - Connection IDs currently registered on the gateway
    /// * `my_connection_id` - This client's connection ID, once known (to mark as "me")
    ///
    /// # Returns
    ///
    /// A formatted string with the client list
    pub fn format_roster(connection_ids: &[String], my_connection_id: Option<&str>) -> String {
        let mut output = String::new();
        output.push_str("\n\n============================================================\n");
        output.push_str("Connected clients:\n");

        if connection_ids.is_empty() {
            output.push_str("(No clients)\n");
        } else {
            for connection_id in connection_ids {
                let is_me = my_connection_id == Some(connection_id.as_str());
                let me_suffix = if is_me { " (me)" } else { "" };
                output.push_str(&format!("{}{}\n", connection_id, me_suffix));
            }
        }

        output.push_str("============================================================\n");
        output
    }

    /// Format a chat message
    ///
    /// # Arguments
    ///
    /// * `from` - The display name of the sender
    /// * `content` - The message content
    /// * `received_at` - Unix timestamp when the message arrived (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the chat message
    pub fn format_chat_message(from: &str, content: &str, received_at: i64) -> String {
        let timestamp_str = timestamp_to_jst_rfc3339(received_at);
        format!(
            "\n\n------------------------------------------------------------\n\
             @{}: {}\n\
             received at {}\n\
             ------------------------------------------------------------\n",
            from, content, timestamp_str
        )
    }

    /// Format a confirmation message after sending
    ///
    /// # Arguments
    ///
    /// * `sent_at` - Unix timestamp when the message was sent (milliseconds)
    ///
    /// # Returns
    ///
    /// A formatted string with the sent confirmation
    pub fn format_sent_confirmation(sent_at: i64) -> String {
        let timestamp_str = timestamp_to_jst_rfc3339(sent_at);
        format!("sent at {}\n", timestamp_str)
    }

    /// Format a binary message notification
    pub fn format_binary_message(byte_count: usize) -> String {
        format!("\n← Received {} bytes of binary data\n", byte_count)
    }

    /// Format a raw text message (when parsing fails)
    pub fn format_raw_message(text: &str) -> String {
        format!("\n← Received: {}\n", text)
    }
}
