//! Process exit statuses

/// No broken links after filtering
pub const SUCCESS: i32 = 0;

/// At least one record counts as a real failure
pub const BROKEN_LINKS: i32 = 1;

/// Invalid arguments, unreadable log or config
pub const USAGE_ERROR: i32 = 2;

/// Exit status for a finished evaluation
pub fn for_verdict(failed: bool) -> i32 {
    if failed {
        BROKEN_LINKS
    } else {
        SUCCESS
    }
}
