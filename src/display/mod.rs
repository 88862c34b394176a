use owo_colors::OwoColorize;

use crate::types::TicketStatus;
use crate::workflow::{AdvanceNotice, BatchNotice, NoticeLevel};

pub mod table;

pub use table::*;

pub fn format_status_colored(status: TicketStatus) -> String {
    format_status_colored_with_format(status, |s| format!("[{}]", s))
}

pub fn format_status_colored_with_format<F>(status: TicketStatus, format_fn: F) -> String
where
    F: Fn(&str) -> String,
{
    let badge = format_fn(&status.to_string());
    match status {
        TicketStatus::Pending => badge.yellow().to_string(),
        TicketStatus::InProgress => badge.cyan().to_string(),
        TicketStatus::Resolved => badge.green().to_string(),
    }
}

/// Color a notice line by its severity.
pub fn format_notice(level: NoticeLevel, message: &str) -> String {
    match level {
        NoticeLevel::Success => message.green().to_string(),
        NoticeLevel::Info => message.to_string(),
        NoticeLevel::Warning => message.yellow().to_string(),
        NoticeLevel::Error => message.red().to_string(),
    }
}

pub fn format_batch_notice(notice: &BatchNotice) -> String {
    format_notice(notice.level(), &notice.message())
}

pub fn format_advance_notice(notice: &AdvanceNotice) -> String {
    format_notice(notice.level(), &notice.message())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_badge_keeps_label() {
        let badge = format_status_colored(TicketStatus::InProgress);
        assert!(badge.contains("[In-Progress]"));
    }

    #[test]
    fn test_info_notice_is_uncolored() {
        assert_eq!(format_notice(NoticeLevel::Info, "plain"), "plain");
    }
}
