//! HTML produced from author-supplied content.
//!
//! `custom-html` blocks keep only an allow-list of tags and attributes;
//! rich-text bodies are Markdown with raw HTML dropped.

use std::fmt::Write;
use std::sync::OnceLock;

use pulldown_cmark::{CowStr, Event, Options, Parser, Tag, html};
use regex::{Captures, Regex};

use super::attr;

const ALLOWED_TAGS: &[&str] = &[
    "p",
    "br",
    "strong",
    "em",
    "u",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "ul",
    "ol",
    "li",
    "a",
    "img",
    "blockquote",
    "code",
    "pre",
    "div",
    "span",
    "table",
    "thead",
    "tbody",
    "tr",
    "th",
    "td",
];

const ALLOWED_ATTRS: &[&str] = &["href", "src", "alt", "title", "class", "id", "target", "rel"];

/// Elements removed together with everything inside them.
const FORBIDDEN_TAGS: &[&str] = &[
    "script", "style", "iframe", "object", "embed", "form", "input",
];

fn forbidden_elements() -> &'static Regex {
    static FORBIDDEN: OnceLock<Regex> = OnceLock::new();
    FORBIDDEN.get_or_init(|| {
        let alternatives: Vec<String> = FORBIDDEN_TAGS
            .iter()
            .map(|tag| format!(r"<{tag}\b[^>]*>.*?</{tag}\s*>"))
            .collect();
        Regex::new(&format!("(?is){}", alternatives.join("|"))).expect("Invalid forbidden tag regex")
    })
}

fn comments() -> &'static Regex {
    static COMMENTS: OnceLock<Regex> = OnceLock::new();
    COMMENTS.get_or_init(|| Regex::new(r"(?s)<!--.*?-->").expect("Invalid comment regex"))
}

fn tags() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| {
        Regex::new(r"<(/?)([a-zA-Z][a-zA-Z0-9]*)\b([^>]*)>").expect("Invalid tag regex")
    })
}

fn attributes() -> &'static Regex {
    static ATTRS: OnceLock<Regex> = OnceLock::new();
    ATTRS.get_or_init(|| {
        Regex::new(r#"([a-zA-Z_:][-a-zA-Z0-9_:.]*)(?:\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+)))?"#)
            .expect("Invalid attribute regex")
    })
}

/// URLs that run code when followed.
fn is_script_url(url: &str) -> bool {
    let url: String = url
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    url.starts_with("javascript:") || url.starts_with("vbscript:") || url.starts_with("data:text/html")
}

/// Reduce author HTML to the allowed tags and attributes.
///
/// Forbidden elements disappear with their content, other disallowed tags
/// are unwrapped, event handlers and script URLs are dropped. Text between
/// tags is escaped, so a stray `<` never starts markup of its own.
pub fn sanitize_html(input: &str) -> String {
    let without_comments = comments().replace_all(input, "");
    let source = forbidden_elements().replace_all(&without_comments, "");

    let mut out = String::with_capacity(source.len());
    let mut last = 0;
    for caps in tags().captures_iter(&source) {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        out.push_str(&html_escape::encode_text(&source[last..whole.start()]));
        out.push_str(&rebuild_tag(&caps));
        last = whole.end();
    }
    out.push_str(&html_escape::encode_text(&source[last..]));
    out
}

fn rebuild_tag(caps: &Captures) -> String {
    let closing = &caps[1] == "/";
    let name = caps[2].to_ascii_lowercase();
    if !ALLOWED_TAGS.contains(&name.as_str()) {
        return String::new();
    }
    if closing {
        return format!("</{name}>");
    }

    let mut tag = format!("<{name}");
    for attr_caps in attributes().captures_iter(&caps[3]) {
        let attr_name = attr_caps[1].to_ascii_lowercase();
        if !ALLOWED_ATTRS.contains(&attr_name.as_str()) {
            continue;
        }
        let value = attr_caps
            .get(2)
            .or_else(|| attr_caps.get(3))
            .or_else(|| attr_caps.get(4))
            .map(|m| m.as_str())
            .unwrap_or_default();
        if matches!(attr_name.as_str(), "href" | "src") && is_script_url(value) {
            continue;
        }
        let _ = write!(tag, r#" {attr_name}="{}""#, attr(value));
    }
    tag.push('>');
    tag
}

/// Render Markdown, dropping raw HTML and script links.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(markdown, options).filter_map(|event| match event {
        Event::Html(_) | Event::InlineHtml(_) => None,
        Event::Start(Tag::Link {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Some(Event::Start(Tag::Link {
            link_type,
            dest_url: CowStr::from("#"),
            title,
            id,
        })),
        Event::Start(Tag::Image {
            link_type,
            dest_url,
            title,
            id,
        }) if is_script_url(&dest_url) => Some(Event::Start(Tag::Image {
            link_type,
            dest_url: CowStr::from(""),
            title,
            id,
        })),
        other => Some(other),
    });
    let mut out = String::new();
    html::push_html(&mut out, events);
    out
}
