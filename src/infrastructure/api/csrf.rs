//! Anti-forgery token convention shared with the Projects API

/// Header carrying the token on every request
pub const CSRF_HEADER: &str = "X-CSRFToken";
/// Cookie the token is read from
pub const CSRF_COOKIE: &str = "csrftoken";

/// Extract the CSRF token from a `Cookie` header value (`a=1; csrftoken=x`)
pub fn token_from_cookie_header(header: &str) -> Option<String> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == CSRF_COOKIE)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_among_other_cookies() {
        assert_eq!(
            token_from_cookie_header("sessionid=s1; csrftoken=abc123; theme=dark"),
            Some("abc123".to_string())
        );
    }

    #[test]
    fn test_missing_or_empty_token() {
        assert_eq!(token_from_cookie_header("sessionid=s1"), None);
        assert_eq!(token_from_cookie_header("csrftoken="), None);
        assert_eq!(token_from_cookie_header("xcsrftoken=nope"), None);
        assert_eq!(token_from_cookie_header(""), None);
    }
}
