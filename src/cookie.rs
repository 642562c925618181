//! Cookie Access
//!
//! CSRF token lookup from `document.cookie`.

use percent_encoding::percent_decode_str;
use wasm_bindgen::JsCast;

/// Name of the cookie carrying the CSRF token
pub const CSRF_COOKIE: &str = "csrftoken";

/// Return the decoded value of the first cookie named `name`
pub fn parse_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|pair| {
            let (key, value) = pair.split_once('=')?;
            (key.trim() == name).then_some(value)
        })
        .map(|raw| percent_decode_str(raw.trim()).decode_utf8_lossy().into_owned())
}

/// Read the raw cookie string of the current document
pub fn document_cookies() -> Option<String> {
    let doc = web_sys::window()?.document()?;
    doc.dyn_into::<web_sys::HtmlDocument>().ok()?.cookie().ok()
}

/// CSRF token for state-changing requests
pub fn csrf_token() -> Option<String> {
    document_cookies().and_then(|cookies| parse_cookie(&cookies, CSRF_COOKIE))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cookie_finds_token() {
        let cookies = "a=1; csrftoken=abc123; b=2";
        assert_eq!(parse_cookie(cookies, "csrftoken").as_deref(), Some("abc123"));
        assert_eq!(parse_cookie(cookies, "a").as_deref(), Some("1"));
        assert_eq!(parse_cookie(cookies, "b").as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_cookie_missing() {
        assert_eq!(parse_cookie("a=1; b=2", "csrftoken"), None);
        assert_eq!(parse_cookie("", "csrftoken"), None);
    }

    #[test]
    fn test_parse_cookie_requires_exact_name() {
        // `xcsrftoken` must not shadow the real one
        let cookies = "xcsrftoken=nope; csrftoken=yes";
        assert_eq!(parse_cookie(cookies, "csrftoken").as_deref(), Some("yes"));
    }

    #[test]
    fn test_parse_cookie_first_match_wins() {
        assert_eq!(parse_cookie("t=first; t=second", "t").as_deref(), Some("first"));
    }

    #[test]
    fn test_parse_cookie_decodes_value() {
        assert_eq!(parse_cookie("msg=hello%20world%3B", "msg").as_deref(), Some("hello world;"));
        // value may itself contain '='
        assert_eq!(parse_cookie("k=a=b", "k").as_deref(), Some("a=b"));
    }
}
