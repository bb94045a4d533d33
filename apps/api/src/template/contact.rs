use crate::models::resume::StructuredResume;
use crate::template::escape::escape_latex;

const DEFAULT_NAME: &str = "Your Name";

/// An outbound link: `url` is made safe for the first argument of `\href`,
/// `display` is escaped as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub url: String,
    pub display: String,
}

/// Contact details escaped and normalized once, shared by every variant's
/// heading builder. Empty fields are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactLine {
    pub name: String,
    pub phone: Option<String>,
    /// `url` is the `mailto:` target.
    pub email: Option<Link>,
    pub linkedin: Option<Link>,
    pub website: Option<Link>,
}

impl ContactLine {
    pub fn from_resume(resume: &StructuredResume) -> Self {
        let name = escape_latex(&resume.full_name());
        Self {
            name: if name.is_empty() {
                DEFAULT_NAME.to_string()
            } else {
                name
            },
            phone: non_empty(&resume.phone_number).map(escape_latex),
            email: non_empty(&resume.email).map(|v| Link {
                url: href_url(&format!("mailto:{v}")),
                display: escape_latex(v),
            }),
            linkedin: non_empty(&resume.linkedin).map(|v| link(&linkedin_url(v))),
            website: non_empty(&resume.website).map(|v| link(&website_url(v))),
        }
    }
}

fn non_empty(value: &str) -> Option<&str> {
    let value = value.trim();
    (!value.is_empty()).then_some(value)
}

fn link(url: &str) -> Link {
    let display = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    Link {
        url: href_url(url),
        display: escape_latex(display),
    }
}

/// Makes a URL inert inside `\href{…}`. Characters TeX would act on are
/// percent-encoded; `%` and `#` keep their URL meaning through hyperref's
/// `\%` and `\#`.
pub fn href_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len());
    for c in url.chars() {
        match c {
            '%' => out.push_str(r"\%"),
            '#' => out.push_str(r"\#"),
            '\\' | '{' | '}' | '^' | '~' => out.push_str(&format!("%{:02X}", c as u32)),
            c if c.is_whitespace() || c.is_control() => {
                let mut buf = [0u8; 4];
                for byte in c.encode_utf8(&mut buf).bytes() {
                    out.push_str(&format!("%{byte:02X}"));
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// A bare handle becomes `https://linkedin.com/in/<handle>`; anything already
/// carrying a scheme is kept as is.
pub fn linkedin_url(value: &str) -> String {
    if value.starts_with("http") {
        return value.to_string();
    }
    if value.contains("linkedin.com") {
        format!("https://{value}")
    } else {
        format!("https://linkedin.com/in/{value}")
    }
}

pub fn website_url(value: &str) -> String {
    if value.starts_with("http") {
        value.to_string()
    } else {
        format!("https://{value}")
    }
}
