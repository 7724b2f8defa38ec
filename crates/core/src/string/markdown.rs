//! Markdown to HTML with GOV.UK Frontend classes.
//!
//! Parsing is CommonMark plus tables, strikethrough and autolinks, with smart
//! punctuation. Rendering walks the comrak AST directly so every element gets
//! its GOV.UK class; typographic characters are written as numeric entities.

use std::str::FromStr;

use comrak::nodes::{AstNode, ListType, NodeValue, TableAlignment};
use comrak::{Arena, Options, parse_document};
use serde::{Deserialize, Serialize};

use crate::config::types::FilterConfig;
use crate::string::slugify;

/// GOV.UK heading sizes, largest first.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeadingSize {
    #[default]
    Xl,
    L,
    M,
    S,
}

impl HeadingSize {
    const ALL: [Self; 4] = [Self::Xl, Self::L, Self::M, Self::S];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Xl => "xl",
            Self::L => "l",
            Self::M => "m",
            Self::S => "s",
        }
    }

    /// Size for a heading level when level 1 uses `self`. Levels past the
    /// smallest size stay at `s`.
    fn for_level(self, level: u8) -> Self {
        let index = self as usize + usize::from(level.saturating_sub(1));
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }
}

impl FromStr for HeadingSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| format!("unknown heading size {s}"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MarkdownOptions {
    /// Size class for `#` headings. Deeper headings step down from here.
    pub headings_start_with: HeadingSize,
}

impl MarkdownOptions {
    pub fn from_config(cfg: &FilterConfig) -> Self {
        Self { headings_start_with: cfg.headings_start_with }
    }
}

fn parse_options() -> Options<'static> {
    let mut options = Options::default();
    options.extension.strikethrough = true;
    options.extension.table = true;
    options.extension.autolink = true;
    options.parse.smart = true;
    options
}

/// Convert Markdown into HTML that uses GOV.UK Frontend classes.
pub fn govuk_markdown(text: &str, opts: &MarkdownOptions) -> String {
    let arena = Arena::new();
    let root = parse_document(&arena, text, &parse_options());

    let mut html = String::with_capacity(text.len() * 2);
    let renderer = Renderer { opts };
    renderer.children(root, &mut html);
    html
}

struct Renderer<'o> {
    opts: &'o MarkdownOptions,
}

impl Renderer<'_> {
    fn children<'a>(&self, node: &'a AstNode<'a>, out: &mut String) {
        for child in node.children() {
            self.node(child, out);
        }
    }

    fn node<'a>(&self, node: &'a AstNode<'a>, out: &mut String) {
        let value = node.data.borrow().value.clone();
        match value {
            NodeValue::Paragraph => {
                if in_tight_list(node) {
                    self.children(node, out);
                } else {
                    out.push_str("<p class=\"govuk-body\">");
                    self.children(node, out);
                    out.push_str("</p>\n");
                }
            }
            NodeValue::Heading(heading) => {
                let size = self.opts.headings_start_with.for_level(heading.level);
                let level = heading.level;
                let id = slugify(&collect_text(node));
                out.push_str(&format!(
                    "<h{level} class=\"govuk-heading-{}\" id=\"{id}\">",
                    size.as_str()
                ));
                self.children(node, out);
                out.push_str(&format!("</h{level}>\n"));
            }
            NodeValue::List(list) => {
                let (tag, class) = match list.list_type {
                    ListType::Bullet => ("ul", "govuk-list govuk-list--bullet"),
                    ListType::Ordered => ("ol", "govuk-list govuk-list--number"),
                };
                let start = match list.list_type {
                    ListType::Ordered if list.start != 1 => format!(" start=\"{}\"", list.start),
                    _ => String::new(),
                };
                out.push_str(&format!("<{tag} class=\"{class}\"{start}>\n"));
                self.children(node, out);
                out.push_str(&format!("</{tag}>\n"));
            }
            NodeValue::Item(_) => {
                out.push_str("<li>");
                self.children(node, out);
                out.push_str("</li>\n");
            }
            NodeValue::BlockQuote => {
                out.push_str("<div class=\"govuk-inset-text\">\n");
                self.children(node, out);
                out.push_str("</div>\n");
            }
            NodeValue::ThematicBreak => {
                out.push_str(
                    "<hr class=\"govuk-section-break govuk-section-break--xl govuk-section-break--visible\">\n",
                );
            }
            NodeValue::CodeBlock(block) => {
                let language = block.info.split_whitespace().next().unwrap_or_default();
                out.push_str("<pre class=\"x-govuk-code x-govuk-code--block\" tabindex=\"0\">");
                if language.is_empty() {
                    out.push_str("<code>");
                } else {
                    out.push_str(&format!("<code class=\"language-{}\">", escape(language)));
                }
                out.push_str(&escape(&block.literal));
                out.push_str("</code></pre>\n");
            }
            NodeValue::HtmlBlock(block) => out.push_str(&block.literal),
            NodeValue::Table(table) => {
                out.push_str("<table class=\"govuk-table\">\n");
                let mut rows = node.children();
                if let Some(head) = rows.next() {
                    out.push_str("<thead class=\"govuk-table__head\">\n");
                    self.table_row(head, &table.alignments, true, out);
                    out.push_str("</thead>\n");
                }
                let body: Vec<_> = rows.collect();
                if !body.is_empty() {
                    out.push_str("<tbody class=\"govuk-table__body\">\n");
                    for row in body {
                        self.table_row(row, &table.alignments, false, out);
                    }
                    out.push_str("</tbody>\n");
                }
                out.push_str("</table>\n");
            }
            NodeValue::Text(text) => out.push_str(&escape(&text)),
            NodeValue::SoftBreak => out.push('\n'),
            NodeValue::LineBreak => out.push_str("<br>"),
            NodeValue::Code(code) => {
                out.push_str("<code class=\"x-govuk-code x-govuk-code--inline\">");
                out.push_str(&escape(&code.literal));
                out.push_str("</code>");
            }
            NodeValue::HtmlInline(html) => out.push_str(&html),
            NodeValue::Emph => self.wrap("em", node, out),
            NodeValue::Strong => self.wrap("strong", node, out),
            NodeValue::Strikethrough => self.wrap("del", node, out),
            NodeValue::Link(link) => {
                out.push_str(&format!("<a class=\"govuk-link\" href=\"{}\"", escape(&link.url)));
                if !link.title.is_empty() {
                    out.push_str(&format!(" title=\"{}\"", escape(&link.title)));
                }
                out.push('>');
                self.children(node, out);
                out.push_str("</a>");
            }
            NodeValue::Image(link) => {
                out.push_str(&format!(
                    "<img src=\"{}\" alt=\"{}\"",
                    escape(&link.url),
                    escape(&collect_text(node))
                ));
                if !link.title.is_empty() {
                    out.push_str(&format!(" title=\"{}\"", escape(&link.title)));
                }
                out.push('>');
            }
            _ => self.children(node, out),
        }
    }

    fn wrap<'a>(&self, tag: &str, node: &'a AstNode<'a>, out: &mut String) {
        out.push_str(&format!("<{tag}>"));
        self.children(node, out);
        out.push_str(&format!("</{tag}>"));
    }

    fn table_row<'a>(
        &self,
        row: &'a AstNode<'a>,
        alignments: &[TableAlignment],
        header: bool,
        out: &mut String,
    ) {
        out.push_str("<tr class=\"govuk-table__row\">\n");
        for (index, cell) in row.children().enumerate() {
            let align = match alignments.get(index) {
                Some(TableAlignment::Left) => " govuk-!-text-align-left",
                Some(TableAlignment::Center) => " govuk-!-text-align-centre",
                Some(TableAlignment::Right) => " govuk-!-text-align-right",
                _ => "",
            };
            if header {
                out.push_str(&format!("<th scope=\"col\" class=\"govuk-table__header{align}\">"));
                self.children(cell, out);
                out.push_str("</th>\n");
            } else {
                out.push_str(&format!("<td class=\"govuk-table__cell{align}\">"));
                self.children(cell, out);
                out.push_str("</td>\n");
            }
        }
        out.push_str("</tr>\n");
    }
}

fn in_tight_list<'a>(paragraph: &'a AstNode<'a>) -> bool {
    let list = paragraph.parent().and_then(|item| item.parent());
    list.is_some_and(|list| matches!(&list.data.borrow().value, NodeValue::List(l) if l.tight))
}

fn collect_text<'a>(node: &'a AstNode<'a>) -> String {
    let mut text = String::new();
    for child in node.descendants() {
        match &child.data.borrow().value {
            NodeValue::Text(t) => text.push_str(t),
            NodeValue::Code(code) => text.push_str(&code.literal),
            _ => {}
        }
    }
    text
}

/// Escape HTML and spell typographic characters as numeric entities.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\u{2018}' | '\u{2019}' | '\u{201c}' | '\u{201d}' | '\u{2013}' | '\u{2014}'
            | '\u{2026}' => out.push_str(&format!("&#{};", u32::from(ch))),
            other => out.push(other),
        }
    }
    out
}
