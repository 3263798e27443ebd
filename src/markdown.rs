//! Preparation Step Rendering
//!
//! Steps are stored as free text. Plain lines become a numbered list;
//! text that already uses markdown is rendered through pulldown-cmark with:
//! - raw HTML shown as text
//! - images constrained and limited to http(s) sources
//! - `javascript:` links neutralized

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use pulldown_cmark::{html::push_html, CowStr, Event, Options, Parser, Tag, TagEnd};

const PATH_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Render stored steps to HTML
pub fn render_steps(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }
    if looks_like_markdown(text) {
        parse_markdown(text)
    } else {
        parse_markdown(&steps_to_markdown(text))
    }
}

fn looks_like_markdown(text: &str) -> bool {
    text.lines().map(str::trim_start).any(|line| {
        line.starts_with('#')
            || line.starts_with("- ")
            || line.starts_with("* ")
            || line.starts_with("![")
            || line.contains("**")
            || is_numbered(line)
    })
}

fn is_numbered(line: &str) -> bool {
    let digits = line.chars().take_while(char::is_ascii_digit).count();
    digits > 0 && line[digits..].starts_with(". ")
}

/// One numbered step per non-blank line
fn steps_to_markdown(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .enumerate()
        .map(|(i, line)| format!("{}. {}\n", i + 1, line))
        .collect()
}

pub fn parse_markdown(text: &str) -> String {
    let parser = Parser::new_ext(
        text,
        Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TABLES | Options::ENABLE_TASKLISTS,
    );
    let mut html_output = String::new();
    push_html(&mut html_output, transform_events(parser).into_iter());
    html_output
}

fn transform_events<'a>(parser: Parser<'a>) -> Vec<Event<'a>> {
    let mut events = Vec::new();
    // inside an image: alt text is collected instead of emitted
    let mut image: Option<(String, String)> = None;

    for event in parser {
        if let Some((url, alt)) = image.as_mut() {
            match event {
                Event::Text(text) | Event::Code(text) => alt.push_str(&text),
                Event::End(TagEnd::Image) => {
                    let (url, alt) = (url.clone(), alt.clone());
                    image = None;
                    if let Some(html) = image_html(&url, &alt) {
                        events.push(Event::Html(CowStr::from(html)));
                    }
                }
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(Tag::Image { dest_url, .. }) => {
                image = Some((dest_url.to_string(), String::new()));
            }
            Event::Start(Tag::Link {
                link_type,
                dest_url,
                title,
                id,
            }) => {
                let dest_url = if is_script_url(&dest_url) {
                    CowStr::from("#")
                } else {
                    dest_url
                };
                events.push(Event::Start(Tag::Link {
                    link_type,
                    dest_url,
                    title,
                    id,
                }));
            }
            Event::Html(raw) | Event::InlineHtml(raw) => events.push(Event::Text(raw)),
            other => events.push(other),
        }
    }
    events
}

fn is_script_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("javascript:") || lower.starts_with("data:")
}

fn image_html(url: &str, alt: &str) -> Option<String> {
    let lower = url.to_ascii_lowercase();
    if !(lower.starts_with("http://") || lower.starts_with("https://")) {
        return None;
    }
    let encoded = utf8_percent_encode(url, PATH_ENCODE_SET).to_string();
    Some(format!(
        r#"<img class="step-image" src="{}" alt="{}" loading="lazy" />"#,
        encoded,
        escape_html(alt)
    ))
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_lines_become_numbered_steps() {
        let html = render_steps("Grate the beets.\n\n  Simmer 40 minutes.  \n");
        assert_eq!(
            html,
            "<ol>\n<li>Grate the beets.</li>\n<li>Simmer 40 minutes.</li>\n</ol>\n"
        );
    }

    #[test]
    fn test_markdown_is_kept() {
        let html = render_steps("## Dough\n- flour\n- water");
        assert!(html.contains("<h2>Dough</h2>"));
        assert!(html.contains("<li>flour</li>"));
    }

    #[test]
    fn test_raw_html_is_escaped() {
        let html = render_steps("1. mix <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_images_and_links_are_sanitized() {
        let html = parse_markdown("![the \"pot\"](<https://img.example.com/a b.jpg>)");
        assert!(html.contains(r#"src="https://img.example.com/a%20b.jpg""#));
        assert!(html.contains(r#"alt="the &quot;pot&quot;""#));

        let html = parse_markdown("![x](file:///etc/passwd)");
        assert!(!html.contains("<img"));

        let html = parse_markdown("[click](javascript:alert(1))");
        assert!(html.contains(r##"href="#""##));
    }

    #[test]
    fn test_blank_steps_render_nothing() {
        assert_eq!(render_steps("  \n "), "");
    }
}
