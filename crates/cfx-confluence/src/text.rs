//! Storage-format markup to plain text.

use std::borrow::Cow;

use scraper::Html;

const CDATA_OPEN: &str = "<![CDATA[";
const CDATA_CLOSE: &str = "]]>";

/// Strip all markup from a storage-format body, keeping text nodes in document order.
///
/// Entities are decoded. CDATA payloads (code and noformat macro bodies) are
/// kept as text. Macro tags disappear, but parameter values are text nodes
/// and stay.
pub fn html_to_text(html: &str) -> String {
    let fragment = Html::parse_fragment(&unwrap_cdata(html));
    fragment.root_element().text().collect()
}

/// Replace each `<![CDATA[...]]>` section with its entity-escaped payload.
///
/// An HTML parser reads CDATA outside foreign content as a comment, which
/// would drop it. An unterminated section runs to the end of the input.
fn unwrap_cdata(html: &str) -> Cow<'_, str> {
    if !html.contains(CDATA_OPEN) {
        return Cow::Borrowed(html);
    }

    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find(CDATA_OPEN) {
        out.push_str(&rest[..open]);
        let payload_start = &rest[open + CDATA_OPEN.len()..];
        let (payload, after) = match payload_start.find(CDATA_CLOSE) {
            Some(close) => (
                &payload_start[..close],
                &payload_start[close + CDATA_CLOSE.len()..],
            ),
            None => (payload_start, ""),
        };
        escape_text(payload, &mut out);
        rest = after;
    }
    out.push_str(rest);
    Cow::Owned(out)
}

fn escape_text(text: &str, out: &mut String) {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Build the `text` column for a page.
///
/// With `beautify`, the markup is stripped and the title is prepended,
/// separated by a blank line. Without it, the raw body is returned verbatim.
pub fn page_text(title: &str, body: &str, beautify: bool) -> String {
    if beautify {
        format!("{title}\n\n{}", html_to_text(body))
    } else {
        body.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_html_to_text_strips_tags() {
        let text = html_to_text("<h1>Intro</h1><p>Hello <strong>world</strong></p>");
        assert_eq!(text, "IntroHello world");
    }

    #[test]
    fn test_html_to_text_decodes_entities() {
        assert_eq!(html_to_text("<p>a &amp; b &lt;c&gt;</p>"), "a & b <c>");
    }

    #[test]
    fn test_html_to_text_keeps_line_breaks_in_text() {
        assert_eq!(html_to_text("<p>one</p>\n<p>two</p>"), "one\ntwo");
    }

    #[test]
    fn test_html_to_text_drops_macro_markup() {
        let body = r#"<ac:structured-macro ac:name="info"><ac:rich-text-body><p>Note</p></ac:rich-text-body></ac:structured-macro>"#;
        let text = html_to_text(body);
        assert_eq!(text, "Note");
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_html_to_text_keeps_code_macro_body() {
        let body = r#"<p>Run:</p><ac:structured-macro ac:name="code"><ac:parameter ac:name="language">bash</ac:parameter><ac:plain-text-body><![CDATA[cargo build --release]]></ac:plain-text-body></ac:structured-macro>"#;
        let text = html_to_text(body);
        assert_eq!(text, "Run:bashcargo build --release");
    }

    #[test]
    fn test_html_to_text_cdata_markup_stays_literal() {
        let body = "<ac:plain-text-body><![CDATA[if a < b && c > d { <br/> }]]></ac:plain-text-body>";
        assert_eq!(html_to_text(body), "if a < b && c > d { <br/> }");
    }

    #[test]
    fn test_html_to_text_multiple_and_unterminated_cdata() {
        assert_eq!(html_to_text("<![CDATA[one]]> and <![CDATA[two]]>"), "one and two");
        assert_eq!(html_to_text("<p>x</p><![CDATA[tail"), "xtail");
    }

    #[test]
    fn test_page_text_beautify_keeps_code() {
        let body = "<p>Install</p><ac:plain-text-body><![CDATA[make install]]></ac:plain-text-body>";
        assert_eq!(page_text("Setup", body, true), "Setup\n\nInstallmake install");
    }

    #[test]
    fn test_html_to_text_plain_input() {
        assert_eq!(html_to_text("no markup"), "no markup");
        assert_eq!(html_to_text(""), "");
    }

    #[test]
    fn test_page_text_beautify_prefixes_title() {
        assert_eq!(
            page_text("Guide", "<p>Step <em>one</em></p>", true),
            "Guide\n\nStep one"
        );
    }

    #[test]
    fn test_page_text_raw_is_verbatim() {
        let body = "<p>Step <em>one</em></p>\r\n<br/>";
        assert_eq!(page_text("Guide", body, false), body);
    }
}
