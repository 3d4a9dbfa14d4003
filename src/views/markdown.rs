//! CommonMark lesson bodies. Raw HTML in the source is shown as text, and
//! fenced code keeps its language as a `language-*` class.

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Parser, Tag, TagEnd};

use super::{escape_html, is_safe_url};

pub fn render(source: &str) -> String {
    let mut events = Vec::new();
    let mut fence: Option<(String, String)> = None;

    for event in Parser::new(source) {
        if let Some((language, code)) = fence.as_mut() {
            match event {
                Event::End(TagEnd::CodeBlock) => {
                    let block = code_block(language, code);
                    events.push(Event::Html(block.into()));
                    fence = None;
                }
                Event::Text(text) => code.push_str(&text),
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::CodeBlock(kind)) => {
                let language = match kind {
                    CodeBlockKind::Fenced(info) => {
                        info.split_whitespace().next().unwrap_or_default().to_string()
                    }
                    CodeBlockKind::Indented => String::new(),
                };
                fence = Some((language, String::new()));
            }
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest_url = if is_safe_url(&dest_url) {
                    dest_url
                } else {
                    CowStr::Borrowed("#")
                };
                events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }));
            }
            other => events.push(other),
        }
    }

    let mut out = String::with_capacity(source.len() * 3 / 2);
    html::push_html(&mut out, events.into_iter());
    out
}

pub fn code_block(language: &str, code: &str) -> String {
    let class = if language.is_empty() {
        String::new()
    } else {
        format!(r#" class="language-{}""#, escape_html(language))
    };
    format!(
        r#"<pre class="code-block"><code{class}>{}</code></pre>"#,
        escape_html(code.trim_end_matches('\n'))
    )
}
