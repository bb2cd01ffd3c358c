//! Dynamic key guard
//!
//! Every code path that copies or validates keys taken from the input (object
//! passthrough and catchall, records, intersection merges) asks
//! [`is_dangerous_key`] first. Keys that could address an object prototype
//! chain in a consumer are never copied into an output.

const DANGEROUS_SEGMENTS: [&str; 3] = ["__proto__", "constructor", "prototype"];

/// `true` if `key`, or any dotted or bracketed segment of it, names a
/// prototype accessor.
///
/// ```
/// use vellum_schema::keys::is_dangerous_key;
///
/// assert!(is_dangerous_key("__proto__"));
/// assert!(is_dangerous_key("a.constructor.prototype"));
/// assert!(is_dangerous_key("a[\"__proto__\"]"));
/// assert!(!is_dangerous_key("proto"));
/// ```
#[must_use]
pub fn is_dangerous_key(key: &str) -> bool {
    key.split(['.', '[', ']'])
        .map(|segment| segment.trim().trim_matches(['"', '\'']))
        .any(|segment| DANGEROUS_SEGMENTS.contains(&segment))
}
