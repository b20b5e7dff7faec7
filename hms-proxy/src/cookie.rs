//! Set-Cookie rewriting
//!
//! The backend issues cookies for its own HTTPS origin. Served back through a
//! plain-HTTP localhost proxy they would be dropped by the browser, so each
//! one is rewritten:
//!
//! - `Secure` removed
//! - `SameSite=None` becomes `SameSite=Lax`
//! - `Domain` removed (host-only on localhost)
//! - any `Path` replaced by `Path=/`

/// Rewrite one `Set-Cookie` value for a localhost origin
pub fn rewrite_set_cookie(cookie: &str) -> String {
    let mut parts = cookie.split(';');
    let pair = parts.next().unwrap_or_default().trim();

    let mut out = vec![pair.to_string()];
    for attr in parts.map(str::trim).filter(|a| !a.is_empty()) {
        let name = attr.split('=').next().unwrap_or_default().trim();
        if name.eq_ignore_ascii_case("secure")
            || name.eq_ignore_ascii_case("domain")
            || name.eq_ignore_ascii_case("path")
        {
            continue;
        }
        if name.eq_ignore_ascii_case("samesite") {
            let value = attr.split_once('=').map(|(_, v)| v.trim()).unwrap_or_default();
            if value.eq_ignore_ascii_case("none") {
                out.push("SameSite=Lax".to_string());
                continue;
            }
        }
        out.push(attr.to_string());
    }
    out.push("Path=/".to_string());
    out.join("; ")
}

/// Split a header value that carries several cookies joined by commas
///
/// A comma only starts a new cookie when it is followed by `name=`; the comma
/// inside `Expires=Wed, 21 Oct 2026 ...` is left alone.
pub fn split_set_cookie(value: &str) -> Vec<&str> {
    let mut cookies = Vec::new();
    let mut start = 0;

    for (idx, _) in value.match_indices(',') {
        if starts_cookie(&value[idx + 1..]) {
            cookies.push(&value[start..idx]);
            start = idx + 1;
        }
    }
    cookies.push(&value[start..]);

    cookies
        .into_iter()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .collect()
}

fn starts_cookie(rest: &str) -> bool {
    let rest = rest.trim_start();
    let name_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    name_len > 0 && rest[name_len..].starts_with('=')
}
