use chrono::{DateTime, Local};
use serde_json::Value;

/// Longest sanitized title kept in a filename, before the `.txt` extension.
const MAX_STEM_CHARS: usize = 100;

/// Turn a conversation title into a filesystem-safe filename stem.
///
/// Alphanumerics plus space, `.`, `_` and `-` pass through; everything else
/// becomes `_`. The result is truncated to 100 characters.
pub fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .take(MAX_STEM_CHARS)
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Map a raw message role onto its display form.
///
/// The role is capitalized (first letter upper, rest lower), then the two
/// well-known roles get friendlier names: `assistant` becomes `AI` and `user`
/// becomes `You`. A missing role shows as `Unknown`.
pub fn display_role(role: Option<&str>) -> String {
    let raw = role.unwrap_or("unknown");
    match raw.to_lowercase().as_str() {
        "assistant" => "AI".to_string(),
        "user" => "You".to_string(),
        _ => capitalize(raw),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

/// Format a message timestamp as a `[YYYY-MM-DD HH:MM:SS] ` prefix in local
/// time, or `None` when it cannot be interpreted.
///
/// The export stores timestamps as either Unix seconds or milliseconds with
/// no marker. A value whose decimal form is exactly 10 characters long is
/// taken as seconds, anything else as milliseconds. Known limitation: the
/// length heuristic misreads second-precision dates before 2001-09-09 or
/// after 2286-11-20, which is fine for chat exports.
pub fn format_timestamp(timestamp: &Value) -> Option<String> {
    let Value::Number(number) = timestamp else {
        return None;
    };
    let raw = number.as_f64()?;
    let millis = if number.to_string().len() == 10 {
        raw * 1000.0
    } else {
        raw
    };
    if !millis.is_finite() || millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    let utc = DateTime::from_timestamp_millis(millis as i64)?;
    Some(
        utc.with_timezone(&Local)
            .format("[%Y-%m-%d %H:%M:%S] ")
            .to_string(),
    )
}

/// String form of a message's content. Missing and null content render empty
/// (and are then skipped by the renderer); non-string values fall back to
/// their JSON text.
pub fn content_text(content: Option<&Value>) -> String {
    match content {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn sanitize_replaces_unsafe_chars() {
        assert_eq!(sanitize_title("Hello/World:Test"), "Hello_World_Test");
    }

    #[test]
    fn sanitize_keeps_allowed_punctuation() {
        assert_eq!(sanitize_title("a b.c_d-e"), "a b.c_d-e");
    }

    #[test]
    fn sanitize_truncates_to_100_chars() {
        let long = "x".repeat(150);
        assert_eq!(sanitize_title(&long).chars().count(), 100);
    }

    #[test]
    fn role_mapping() {
        assert_eq!(display_role(Some("assistant")), "AI");
        assert_eq!(display_role(Some("user")), "You");
        assert_eq!(display_role(Some("system")), "System");
        assert_eq!(display_role(Some("SYSTEM")), "System");
        assert_eq!(display_role(None), "Unknown");
    }

    #[test]
    fn seconds_and_millis_render_identically() {
        let from_seconds = format_timestamp(&json!(1_700_000_000_i64)).unwrap();
        let from_millis = format_timestamp(&json!(1_700_000_000_000_i64)).unwrap();
        assert_eq!(from_seconds, from_millis);
        assert!(from_seconds.starts_with('['));
        assert!(from_seconds.ends_with("] "));
    }

    #[test]
    fn ten_digit_value_is_seconds() {
        let rendered = format_timestamp(&json!(1_700_000_000_i64)).unwrap();
        let expected = DateTime::from_timestamp(1_700_000_000, 0)
            .unwrap()
            .with_timezone(&Local)
            .format("[%Y-%m-%d %H:%M:%S] ")
            .to_string();
        assert_eq!(rendered, expected);
    }

    #[test]
    fn non_numeric_timestamp_yields_none() {
        assert_eq!(format_timestamp(&json!("1700000000")), None);
        assert_eq!(format_timestamp(&json!(null)), None);
        assert_eq!(format_timestamp(&json!({"at": 1})), None);
    }

    #[test]
    fn absurd_timestamp_yields_none() {
        assert_eq!(format_timestamp(&json!(1e300)), None);
    }

    #[test]
    fn content_string_forms() {
        assert_eq!(content_text(None), "");
        assert_eq!(content_text(Some(&json!(null))), "");
        assert_eq!(content_text(Some(&json!("hi"))), "hi");
        assert_eq!(content_text(Some(&json!(7))), "7");
    }
}
