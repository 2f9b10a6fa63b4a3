//! Conversion of raw catalog identifiers into exported Go identifiers.

use crate::initialisms::{INITIALISMS, is_initialism};

const SEPARATOR: char = '_';

/// Convert a raw table or column name into an exported Go identifier.
///
/// Words are found at case boundaries and at runs of non-alphanumeric
/// characters. Each word is title-cased unless it is a known initialism, in
/// which case it stays fully upper-cased. Leading digits are dropped since a
/// Go identifier cannot start with one.
///
/// ```
/// use gormgen_core::normalize;
///
/// assert_eq!(normalize("user_http_url"), "UserHTTPURL");
/// assert_eq!(normalize("createAt"), "CreateAt");
/// assert_eq!(normalize(""), "");
/// ```
pub fn normalize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    let marked = mark_case_boundaries(raw);
    let mut name = String::with_capacity(raw.len());
    for word in marked
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        push_word(&mut name, word);
    }

    let name = name.trim_start_matches(|c: char| c.is_numeric() || c == SEPARATOR);
    capitalize(name)
}

/// Insert a separator wherever an upper-case run starts inside the name.
///
/// `userID` becomes `user_ID` and `HTTPServer` becomes `HTTP_Server`: the last
/// capital of a run followed by a lower-case letter starts the next word.
fn mark_case_boundaries(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut marked = String::with_capacity(raw.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if i > 0 && c.is_uppercase() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower) {
                marked.push(SEPARATOR);
            }
        }
        marked.push(c);
    }
    marked
}

fn push_word(name: &mut String, word: &str) {
    // An all-caps run such as `HTTPURL` comes from already-normalized text;
    // split it back into its initialisms so normalizing twice is stable.
    if !word.chars().any(char::is_lowercase) {
        if let Some(parts) = split_initialisms(word) {
            parts.iter().for_each(|part| name.push_str(part));
            return;
        }
    }

    let upper = word.to_uppercase();
    if is_initialism(&upper) {
        name.push_str(&upper);
    } else {
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            name.extend(first.to_uppercase());
            name.extend(chars.flat_map(char::to_lowercase));
        }
    }
}

/// Split a run into consecutive initialisms, preferring the longest match.
///
/// The run must start with an initialism. It may end in a short tail that
/// title-casing leaves upper-case (`V2` in `APIV2`, `X` in `IDX`, `2` in
/// `URL2`). Returns `None` unless the whole run is covered.
fn split_initialisms(run: &str) -> Option<Vec<&str>> {
    let mut heads: Vec<&'static str> = INITIALISMS
        .iter()
        .copied()
        .filter(|initialism| run.starts_with(initialism))
        .collect();
    heads.sort_by_key(|head| std::cmp::Reverse(head.len()));

    heads.into_iter().find_map(|head| {
        let rest = &run[head.len()..];
        let mut parts = if rest.is_empty() {
            Vec::new()
        } else if is_title_tail(rest) {
            vec![rest]
        } else {
            split_initialisms(rest)?
        };
        parts.insert(0, head);
        Some(parts)
    })
}

/// One letter or digit followed only by digits.
fn is_title_tail(s: &str) -> bool {
    let mut chars = s.chars();
    chars.next().is_some_and(char::is_alphanumeric) && chars.all(|c| c.is_ascii_digit())
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        None => String::new(),
        Some(c) => c.to_uppercase().chain(chars).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn test_snake_case() {
        assert_eq!(normalize("order_no"), "OrderNo");
        assert_eq!(normalize("create_at"), "CreateAt");
        assert_eq!(normalize("order"), "Order");
    }

    #[test]
    fn test_initialisms() {
        assert_eq!(normalize("id"), "ID");
        assert_eq!(normalize("user_id"), "UserID");
        assert_eq!(normalize("user_http_url"), "UserHTTPURL");
        assert_eq!(normalize("api_key"), "APIKey");
        assert_eq!(normalize("uuid"), "UUID");
    }

    #[test]
    fn test_case_boundaries() {
        assert_eq!(normalize("createAt"), "CreateAt");
        assert_eq!(normalize("userID"), "UserID");
        assert_eq!(normalize("HTTPServer"), "HTTPServer");
        assert_eq!(normalize("XMLHttpRequest"), "XMLHTTPRequest");
    }

    #[test]
    fn test_punctuation_runs() {
        assert_eq!(normalize("order--item  name"), "OrderItemName");
        assert_eq!(normalize("__user__"), "User");
        assert_eq!(normalize("user.email"), "UserEmail");
    }

    #[test]
    fn test_upper_case_catalog_names() {
        assert_eq!(normalize("USER_ID"), "UserID");
        assert_eq!(normalize("ORDER_NO"), "OrderNo");
    }

    #[test]
    fn test_leading_digits() {
        assert_eq!(normalize("2fa_code"), "FaCode");
        assert_eq!(normalize("_1st_place"), "StPlace");
        assert_eq!(normalize("123"), "");
    }

    #[test]
    fn test_only_separators() {
        assert_eq!(normalize("___"), "");
        assert_eq!(normalize("-"), "");
    }

    #[test]
    fn test_digits_inside_words() {
        assert_eq!(normalize("utf8_name"), "UTF8Name");
        assert_eq!(normalize("address2"), "Address2");
        assert_eq!(normalize("v2API"), "V2API");
    }

    #[test]
    fn test_adjacent_initialisms_split_longest_first() {
        assert_eq!(normalize("HTTPSURL"), "HTTPSURL");
        assert_eq!(normalize("HTTPSQL"), "HTTPSQL");
        assert_eq!(split_initialisms("HTTPSQL"), Some(vec!["HTTP", "SQL"]));
        assert_eq!(split_initialisms("HTTPSURL"), Some(vec!["HTTPS", "URL"]));
        assert_eq!(split_initialisms("USER"), None);
    }

    #[test]
    fn test_initialism_runs_with_short_tails() {
        assert_eq!(split_initialisms("APIV2"), Some(vec!["API", "V2"]));
        assert_eq!(split_initialisms("IDX"), Some(vec!["ID", "X"]));
        assert_eq!(split_initialisms("URL2"), Some(vec!["URL", "2"]));
        // A longer tail is an ordinary word.
        assert_eq!(split_initialisms("IDLE"), None);
        assert_eq!(normalize("IDLE_TIME"), "IdleTime");
    }

    #[test]
    fn test_normalize_is_stable_on_its_output() {
        let inputs = [
            "user_id",
            "user_http_url",
            "createAt",
            "HTTPServer",
            "2fa_code",
            "api_key_id",
            "order_no",
            "t_order",
            "xml_http_request",
            "cpu_usage",
            "utf8_name",
            "api_v2",
            "ip_v4",
            "image_url_2",
            "user_id_x",
        ];
        for raw in inputs {
            let once = normalize(raw);
            assert_eq!(normalize(&once), once, "re-normalizing {raw:?}");
        }
    }

    #[test]
    fn test_distinct_names_can_collide() {
        assert_eq!(normalize("user_id"), normalize("userId"));
    }
}
