//! Constants used throughout the application
//!
//! This module centralizes validation bounds and other constant values
//! to improve maintainability and consistency.

/// Minimum title length in characters
pub const TITLE_MIN_LEN: usize = 3;
/// Maximum title length in characters
pub const TITLE_MAX_LEN: usize = 50;
/// Minimum content length in characters, when content is present
pub const CONTENT_MIN_LEN: usize = 15;
/// Maximum content length in characters
pub const CONTENT_MAX_LEN: usize = 200;

/// How many items the "recently added" listing returns
pub const RECENT_ITEMS_LIMIT: u64 = 5;
/// Window for the due-soon listing and reminder emails, in hours
pub const DUE_SOON_WINDOW_HOURS: i64 = 48;

/// Subject line for reminder emails
pub const REMINDER_EMAIL_SUBJECT: &str = "You have tasks due soon";
