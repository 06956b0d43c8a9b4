//! Canonical schema constants for structured logging and events
//!
//! These constants ensure consistency across all logging and error reporting.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Reconciliation subjects
pub const FIELD_PACKAGE: &str = "package";
pub const FIELD_DATA_STREAM: &str = "data_stream";
pub const FIELD_SCHEMA_VERSION: &str = "schema_version";
pub const FIELD_FILE: &str = "file";

// Collection sizes
pub const FIELD_TREE_COUNT: &str = "tree_count";
pub const FIELD_RECORD_COUNT: &str = "record_count";
pub const FIELD_DICTIONARY_LEN: &str = "dictionary_len";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
pub const EVENT_CACHE_HIT: &str = "cache_hit";
pub const EVENT_CACHE_MISS: &str = "cache_miss";
pub const EVENT_SKIPPED: &str = "skipped";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_accessibility() {
        assert!(!FIELD_COMPONENT.is_empty());
        assert!(!FIELD_OP.is_empty());
        assert!(!FIELD_DATA_STREAM.is_empty());
        assert!(!EVENT_START.is_empty());
        assert!(!EVENT_END.is_empty());
        assert!(!EVENT_END_ERROR.is_empty());
    }

    #[test]
    fn test_event_names_are_distinct() {
        let events = [
            EVENT_START,
            EVENT_END,
            EVENT_END_ERROR,
            EVENT_CACHE_HIT,
            EVENT_CACHE_MISS,
            EVENT_SKIPPED,
        ];
        for (i, a) in events.iter().enumerate() {
            for b in &events[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
