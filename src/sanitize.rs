//! Whitelist HTML filter for user-supplied text that clients may render.
//!
//! Text outside tags has `<` and `>` escaped. Known formatting tags survive with only their
//! permitted attributes; every other tag is escaped so it renders as literal text. URL
//! attributes survive only with a relative target or an http, https, mailto, tel or ftp scheme.

use regex::Regex;
use std::sync::OnceLock;

/// Filter `input` so it can be embedded in an HTML document.
///
/// `<script>alert(1)</script>` becomes `&lt;script&gt;alert(1)&lt;/script&gt;`, while
/// `<img src="a.png" onerror="x()">` keeps the tag and loses the handler: `<img src="a.png">`.
pub fn sanitize_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(start) = rest.find('<') {
        escape_text_into(&mut out, &rest[..start]);
        let candidate = &rest[start..];
        match scan_tag(candidate) {
            Scan::Tag(end) => {
                let raw = &candidate[..=end];
                match filter_tag(raw) {
                    Some(clean) => out.push_str(&clean),
                    None => escape_text_into(&mut out, raw),
                }
                rest = &candidate[end + 1..];
            }
            Scan::Text(len) => {
                escape_text_into(&mut out, &candidate[..len]);
                rest = &candidate[len..];
            }
        }
    }
    escape_text_into(&mut out, rest);
    out
}

enum Scan {
    /// Byte index of the `>` closing the tag.
    Tag(usize),
    /// Length of the prefix that is plain text.
    Text(usize),
}

/// `s` starts with `<`. Quotes only open after `=` so apostrophes in malformed markup don't swallow the rest.
fn scan_tag(s: &str) -> Scan {
    let mut quote: Option<char> = None;
    let mut last_significant = '<';
    for (i, c) in s.char_indices().skip(1) {
        if let Some(q) = quote {
            if c == q {
                quote = None;
                last_significant = c;
            }
            continue;
        }
        match c {
            '"' | '\'' if last_significant == '=' => quote = Some(c),
            '>' => return Scan::Tag(i),
            '<' => return Scan::Text(i),
            c if c.is_whitespace() => {}
            c => last_significant = c,
        }
    }
    Scan::Text(s.len())
}

fn escape_text_into(out: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
}

fn escape_attribute(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => out.push_str("&quot;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            c => out.push(c),
        }
    }
    out
}

fn attribute_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'=<>`]+)))?"#)
            .expect("attribute pattern is a valid regex")
    })
}

/// Attributes each whitelisted tag may keep. `None` means the tag itself is not allowed.
fn allowed_attributes(tag: &str) -> Option<&'static [&'static str]> {
    const NONE: &[&str] = &[];
    let attrs: &'static [&'static str] = match tag {
        "a" => &["href", "title", "target"],
        "img" => &["src", "alt", "title", "width", "height"],
        "abbr" => &["title"],
        "blockquote" | "q" => &["cite"],
        "del" | "ins" => &["datetime"],
        "font" => &["color", "size", "face"],
        "td" | "th" => &["width", "rowspan", "colspan", "align", "valign"],
        "table" => &["width", "border", "align", "valign"],
        "b" | "strong" | "em" | "i" | "u" | "s" | "small" | "big" | "mark" | "sub" | "sup"
        | "p" | "br" | "hr" | "span" | "div" | "code" | "pre" | "ul" | "ol" | "li" | "dl"
        | "dt" | "dd" | "h1" | "h2" | "h3" | "h4" | "h5" | "h6" | "thead" | "tbody"
        | "tfoot" | "tr" | "caption" => NONE,
        _ => return None,
    };
    Some(attrs)
}

fn is_url_attribute(name: &str) -> bool {
    matches!(name, "href" | "src" | "cite")
}

fn entity_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"&#(?:[xX]([0-9a-fA-F]+)|([0-9]+));?|&([A-Za-z]+);")
            .expect("entity pattern is a valid regex")
    })
}

/// Resolve the character references a browser would decode inside an attribute value.
/// Unknown named references are left as they are.
fn decode_entities(value: &str) -> String {
    entity_pattern()
        .replace_all(value, |cap: &regex::Captures| {
            let code = match (cap.get(1), cap.get(2)) {
                (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
                (None, Some(dec)) => dec.as_str().parse::<u32>().ok(),
                (None, None) => None,
            };
            if cap.get(3).is_none() {
                return code
                    .and_then(char::from_u32)
                    .unwrap_or(char::REPLACEMENT_CHARACTER)
                    .to_string();
            }
            let named = match cap[3].to_ascii_lowercase().as_str() {
                "colon" => ":",
                "tab" => "\t",
                "newline" => "\n",
                "sol" => "/",
                "period" => ".",
                "lpar" => "(",
                "rpar" => ")",
                "amp" => "&",
                "lt" => "<",
                "gt" => ">",
                "quot" => "\"",
                "apos" => "'",
                _ => return cap[0].to_string(),
            };
            named.to_string()
        })
        .into_owned()
}

const ALLOWED_SCHEMES: [&str; 5] = ["http", "https", "mailto", "tel", "ftp"];

/// URL attribute values are kept only when they are relative or use an allowed scheme.
/// The value is decoded and stripped of whitespace and control characters first, the
/// same way a browser reads it.
fn is_safe_url(value: &str) -> bool {
    let normalized: String = decode_entities(value)
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control() && !is_invisible(*c))
        .collect();
    match normalized.find(|c: char| matches!(c, ':' | '/' | '?' | '#')) {
        Some(i) if normalized[i..].starts_with(':') => {
            let scheme = normalized[..i].to_ascii_lowercase();
            ALLOWED_SCHEMES.contains(&scheme.as_str())
        }
        _ => true,
    }
}

fn is_invisible(c: char) -> bool {
    matches!(c, '\u{00ad}' | '\u{200b}'..='\u{200f}' | '\u{2028}'..='\u{202e}' | '\u{2060}'..='\u{2064}' | '\u{feff}')
}

/// Rebuild a whitelisted tag, or `None` when the whole tag must be escaped.
fn filter_tag(raw: &str) -> Option<String> {
    let inner = &raw[1..raw.len() - 1];
    let (closing, inner) = match inner.strip_prefix('/') {
        Some(rest) => (true, rest),
        None => (false, inner),
    };
    let name_len = inner
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(inner.len());
    if name_len == 0 {
        return None;
    }
    let name = inner[..name_len].to_ascii_lowercase();
    let allowed = allowed_attributes(&name)?;
    if closing {
        return Some(format!("</{}>", name));
    }

    let attrs = &inner[name_len..];
    let mut out = format!("<{}", name);
    for cap in attribute_pattern().captures_iter(attrs) {
        let attr = cap[1].to_ascii_lowercase();
        if !allowed.contains(&attr.as_str()) {
            continue;
        }
        let value = cap.get(2).or_else(|| cap.get(3)).or_else(|| cap.get(4));
        match value {
            Some(v) if is_url_attribute(&attr) && !is_safe_url(v.as_str()) => continue,
            Some(v) => {
                out.push_str(&format!(" {}=\"{}\"", attr, escape_attribute(v.as_str())));
            }
            None => {
                out.push(' ');
                out.push_str(&attr);
            }
        }
    }
    if attrs.trim_end().ends_with('/') {
        out.push_str(" /");
    }
    out.push('>');
    Some(out)
}
