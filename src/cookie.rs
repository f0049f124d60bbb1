//! Request cookies

use std::fmt;

/// A cookie sent with a request.
///
/// Besides name and value a cookie may carry the `path` and `domain` it was
/// issued for; those travel as `$Path` / `$Domain` attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: Option<String>,
    pub domain: Option<String>,
}

impl Cookie {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            path: None,
            domain: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }
}

impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}=", self.name)?;
        write_value(f, &self.value)?;
        if let Some(path) = &self.path {
            f.write_str("; $Path=")?;
            write_value(f, path)?;
        }
        if let Some(domain) = &self.domain {
            f.write_str("; $Domain=")?;
            write_value(f, domain)?;
        }
        Ok(())
    }
}

/// Values that would end the pair early are sent as a quoted-string.
fn write_value(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    let needs_quoting = value
        .chars()
        .any(|c| matches!(c, ';' | ',' | '"' | '\\') || c.is_whitespace());
    if !needs_quoting {
        return f.write_str(value);
    }
    f.write_str("\"")?;
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            f.write_str("\\")?;
        }
        write!(f, "{}", c)?;
    }
    f.write_str("\"")
}

/// Whether `name` is an HTTP token and so usable as a cookie name.
pub fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name.bytes().all(|b| b.is_ascii_graphic() && !b"()<>@,;:\\\"/[]?={}".contains(&b))
}

/// Convert cookies to a `Cookie` header value, in the order given.
pub fn cookies_to_header(cookies: &[Cookie]) -> Option<String> {
    if cookies.is_empty() {
        return None;
    }
    Some(
        cookies
            .iter()
            .map(Cookie::to_string)
            .collect::<Vec<_>>()
            .join("; "),
    )
}
