use ulid::Ulid;

/// Generates a new time-based, lexicographically sortable unique identifier.
///
/// Sorting these strings alphabetically also sorts them by creation time,
/// which keeps interleaved log lines of concurrent invocations easy to follow.
pub fn time_sortable_uid() -> String {
    Ulid::new().to_string()
}
