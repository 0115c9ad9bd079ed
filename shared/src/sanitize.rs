//! 富文本渲染与清洗
//!
//! [`render_rich_text`] 是整个应用唯一产出可注入 HTML 的函数，
//! 前端只有 `RichText` 组件会把它的结果写入 `inner_html`。

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::Builder;
use regex::Regex;

/// 允许的标签
pub const ALLOWED_TAGS: &[&str] = &[
    "p", "br", "strong", "em", "b", "i", "a", "ul", "ol", "li", "h2", "h3", "h4",
];

/// `a` 上允许的属性，其他标签不允许任何属性
///
/// `rel` 不在其中：清洗器统一写入 `noopener noreferrer`。
pub const ALLOWED_LINK_ATTRIBUTES: &[&str] = &["href", "target"];

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<[a-z][\s\S]*>").expect("HTML_TAG pattern is valid")
});

static ANY_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("ANY_TAG pattern is valid"));

/// 纯段落结构只含 `<p>` 和 `<br>`
static PARAGRAPH_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^<(/?p|br\s*/?)>$").expect("PARAGRAPH_TAG pattern is valid")
});

/// 块级结束标签与换行，去标签时替换为 `\n`
static BLOCK_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(p|li|h[1-6]|ul|ol)\s*>|<br\s*/?>").expect("BLOCK_END pattern is valid")
});

static CLEANER: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let tags: HashSet<&'static str> = ALLOWED_TAGS.iter().copied().collect();
    let link_attributes: HashSet<&'static str> = ALLOWED_LINK_ATTRIBUTES.iter().copied().collect();

    let mut builder = Builder::default();
    builder
        .tags(tags)
        .tag_attributes(HashMap::from([("a", link_attributes)]))
        .generic_attributes(HashSet::new())
        .link_rel(Some("noopener noreferrer"));
    builder
});

/// 是否包含 HTML 标签
pub fn looks_like_html(input: &str) -> bool {
    HTML_TAG.is_match(input)
}

/// 纯文本按行切分为 `<p>` 段落：逐行去空白，丢弃空行，无分隔拼接
fn paragraphs(text: &str) -> String {
    text.split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| format!("<p>{line}</p>"))
        .collect()
}

/// **渲染富文本**
///
/// 纯文本先转为段落，然后统一经过白名单清洗。
/// 输出中不会包含脚本、`style` 属性或内联事件处理器。
pub fn render_rich_text(input: &str) -> String {
    let html = if looks_like_html(input) {
        input.to_string()
    } else {
        paragraphs(input)
    };
    CLEANER.clean(&html).to_string()
}

/// 是否只由 `<p>` 段落和 `<br>` 换行组成
fn is_paragraph_markup(html: &str) -> bool {
    ANY_TAG
        .find_iter(html)
        .all(|tag| PARAGRAPH_TAG.is_match(tag.as_str()))
}

/// 保存博客前将纯文本描述转为段落 HTML
///
/// 已经是 HTML 的描述原样保存，渲染时再统一清洗。
pub fn format_description(text: &str) -> String {
    if looks_like_html(text) {
        text.trim().to_string()
    } else {
        paragraphs(text)
    }
}

/// 去掉所有标签得到纯文本，块级元素之间按行分隔（列表摘要等只读场景）
pub fn strip_tags(html: &str) -> String {
    let text = BLOCK_END.replace_all(html, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// 编辑器载入时将段落 HTML 还原为按行分隔的纯文本
///
/// 含列表、标题、链接等其他标签的描述原样返回，避免保存时丢失结构。
pub fn html_to_plain_text(html: &str) -> String {
    if is_paragraph_markup(html) {
        strip_tags(html)
    } else {
        html.trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_becomes_paragraphs() {
        assert_eq!(
            render_rich_text("line one\nline two"),
            "<p>line one</p><p>line two</p>"
        );
        assert_eq!(render_rich_text("  a  \n\n\n b "), "<p>a</p><p>b</p>");
        assert_eq!(render_rich_text(""), "");
    }

    #[test]
    fn test_script_removed_with_content() {
        let out = render_rich_text("<p>hi</p><script>alert(1)</script>");
        assert_eq!(out, "<p>hi</p>");
        assert!(!out.contains("alert"));
    }

    #[test]
    fn test_style_and_event_attributes_removed() {
        let out = render_rich_text(r#"<p style="color:red" onclick="x()">Hello</p>"#);
        assert_eq!(out, "<p>Hello</p>");

        let out = render_rich_text(r#"<strong style="x">bold</strong><style>p{}</style>"#);
        assert_eq!(out, "<strong>bold</strong>");
    }

    #[test]
    fn test_links_keep_allowed_attributes_only() {
        let out = render_rich_text(
            r#"<a href="https://khelmela.com" target="_blank" rel="noopener" class="x">go</a>"#,
        );
        assert!(out.contains(r#"href="https://khelmela.com""#));
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains(r#"rel="noopener noreferrer""#));
        assert!(!out.contains("class"));

        let out = render_rich_text(r#"<a href="javascript:alert(1)">x</a>"#);
        assert!(!out.contains("javascript"));
    }

    #[test]
    fn test_disallowed_tags_unwrapped() {
        let out = render_rich_text("<div><h2>Title</h2><img src=x onerror=alert(1)></div>");
        assert_eq!(out, "<h2>Title</h2>");
    }

    #[test]
    fn test_description_helpers() {
        let html = format_description("First line\n\nSecond line");
        assert_eq!(html, "<p>First line</p><p>Second line</p>");
        assert_eq!(html_to_plain_text(&html), "First line\nSecond line");
        assert_eq!(html_to_plain_text("just text"), "just text");
    }

    #[test]
    fn test_blank_target_links_get_noopener() {
        let out = render_rich_text(r#"<a href="https://khelmela.com" target="_blank">go</a>"#);
        assert!(out.contains(r#"target="_blank""#));
        assert!(out.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn test_rich_description_survives_edit_round_trip() {
        let rich = "<p>Top picks:</p><ul><li>PUBG</li><li>Free Fire</li></ul><h2>Rules</h2><p>Be fair</p>";
        let loaded = html_to_plain_text(rich);
        assert_eq!(loaded, rich);
        assert_eq!(format_description(&loaded), rich);

        let linked = r#"<p>See <a href="https://khelmela.com">the site</a></p>"#;
        assert_eq!(format_description(&html_to_plain_text(linked)), linked);
    }

    #[test]
    fn test_paragraph_description_round_trip() {
        let html = "<p>First</p><p>Second<br>line</p>";
        let text = html_to_plain_text(html);
        assert_eq!(text, "First\nSecond\nline");
        assert_eq!(format_description(&text), "<p>First</p><p>Second</p><p>line</p>");
    }

    #[test]
    fn test_strip_tags_separates_blocks() {
        let rich = "<p>Top picks:</p><ul><li>PUBG</li><li>Free <b>Fire</b></li></ul><h2>Rules</h2>";
        assert_eq!(strip_tags(rich), "Top picks:\nPUBG\nFree Fire\nRules");
    }
}
