use std::collections::BTreeSet;

use pulldown_cmark::{CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd, html};

use crate::utils::escape_html;

/// Ranges wider than this are ignored rather than expanded.
const MAX_HIGHLIGHT_SPAN: u32 = 10_000;

/// Language and highlighted lines parsed from a fenced block's info string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CodeInfo {
    pub language: Option<String>,
    pub highlighted: BTreeSet<u32>,
}

/// Renders a post body to HTML.
///
/// Fenced code blocks are emitted as `<pre><code class="language-x">` with
/// one `<span class="line">` per source line, so a client-side highlighter
/// can pick them up. Lines named in the info string meta, as in
/// ```` ```ts {1,3-5} ````, get the extra `highlight` class.
pub fn render_markdown(source: &str) -> String {
    let mut events = Vec::new();
    let mut code: Option<(CodeInfo, String)> = None;

    for event in Parser::new_ext(source, options()) {
        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let info = match kind {
                    CodeBlockKind::Fenced(info) => parse_code_info(&info),
                    CodeBlockKind::Indented => CodeInfo::default(),
                };
                code = Some((info, String::new()));
            }
            Event::Text(text) => match code.as_mut() {
                Some((_, body)) => body.push_str(&text),
                None => events.push(Event::Text(text)),
            },
            Event::End(TagEnd::CodeBlock) => {
                if let Some((info, body)) = code.take() {
                    events.push(Event::Html(CowStr::from(render_code_block(&info, &body))));
                }
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

fn options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Parses a fence info string such as `rust {1,3-5}`.
pub fn parse_code_info(info: &str) -> CodeInfo {
    let info = info.trim();
    let split = info
        .find(|c: char| c.is_whitespace() || c == '{')
        .unwrap_or(info.len());
    let (language, meta) = info.split_at(split);

    let language = Some(language)
        .filter(|l| !l.is_empty())
        .map(str::to_string);

    let meta: String = meta.chars().filter(|c| !c.is_whitespace()).collect();
    let highlighted = meta
        .strip_prefix('{')
        .and_then(|rest| rest.split_once('}'))
        .map(|(ranges, _)| parse_line_ranges(ranges))
        .unwrap_or_default();

    CodeInfo {
        language,
        highlighted,
    }
}

/// Expands a line range list like `1,3-5` into `{1, 3, 4, 5}`.
///
/// Reversed ranges (`5-3`) are accepted; malformed parts are skipped.
pub fn parse_line_ranges(ranges: &str) -> BTreeSet<u32> {
    let mut lines = BTreeSet::new();

    for part in ranges.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.split_once('-') {
            Some((start, end)) => {
                let (Ok(start), Ok(end)) = (start.trim().parse::<u32>(), end.trim().parse::<u32>())
                else {
                    continue;
                };
                let (low, high) = if start <= end { (start, end) } else { (end, start) };
                if high - low <= MAX_HIGHLIGHT_SPAN {
                    lines.extend(low..=high);
                }
            }
            None => {
                if let Ok(line) = part.parse::<u32>() {
                    lines.insert(line);
                }
            }
        }
    }

    lines
}

pub fn render_code_block(info: &CodeInfo, body: &str) -> String {
    let mut out = String::from("<pre><code");
    if let Some(language) = &info.language {
        out.push_str(&format!(" class=\"language-{}\"", escape_html(language)));
    }
    out.push('>');

    for (i, line) in body.lines().enumerate() {
        let number = i as u32 + 1;
        let class = if info.highlighted.contains(&number) {
            "line highlight"
        } else {
            "line"
        };
        out.push_str(&format!(
            "<span class=\"{class}\">{}</span>\n",
            escape_html(line)
        ));
    }

    out.push_str("</code></pre>\n");
    out
}
