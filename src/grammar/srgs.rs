// Copyright 2026 Daniel Pelikan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! SRGS XML output.
//!
//! Renders a [`Grammar`] as a W3C SRGS document with `semantics/1.0` tags,
//! the format speech engines load grammars from.

use super::{Element, Grammar, RuleScope, SemanticTag, TagValue};

const SRGS_NAMESPACE: &str = "http://www.w3.org/2001/06/grammar";

struct Writer {
    out: String,
}

impl Writer {
    fn line(&mut self, depth: usize, text: &str) {
        for _ in 0..depth {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    /// Content of `element` without a wrapping `<item>`.
    fn children(&mut self, element: &Element, depth: usize) {
        match element {
            Element::Sequence(parts) => {
                for part in parts {
                    self.element(part, depth);
                }
            }
            other => self.element(other, depth),
        }
    }

    fn element(&mut self, element: &Element, depth: usize) {
        match element {
            Element::Phrase(text) => {
                self.line(depth, &format!("<item>{}</item>", escape_text(text)));
            }
            Element::OneOf(alternatives) => {
                self.line(depth, "<one-of>");
                for alternative in alternatives {
                    if let Element::Phrase(_) = alternative {
                        self.element(alternative, depth + 1);
                    } else {
                        self.line(depth + 1, "<item>");
                        self.children(alternative, depth + 2);
                        self.line(depth + 1, "</item>");
                    }
                }
                self.line(depth, "</one-of>");
            }
            Element::Sequence(_) => {
                self.line(depth, "<item>");
                self.children(element, depth + 1);
                self.line(depth, "</item>");
            }
            Element::RuleRef(id) => {
                self.line(depth, &format!("<ruleref uri=\"#{}\"/>", escape_attr(id)));
            }
            Element::Repeat { element, min, max } => {
                let repeat = match max {
                    Some(max) => format!("{}-{}", min, max),
                    None => format!("{}-", min),
                };
                self.line(depth, &format!("<item repeat=\"{}\">", repeat));
                self.children(element, depth + 1);
                self.line(depth, "</item>");
            }
            Element::Tag(tag) => {
                self.line(depth, &format!("<tag>{}</tag>", escape_text(&tag_script(tag))));
            }
        }
    }
}

/// The ECMAScript assignment a tag stands for.
pub(crate) fn tag_script(tag: &SemanticTag) -> String {
    match &tag.value {
        TagValue::Literal(value) => {
            let quoted = value.replace('\\', "\\\\").replace('"', "\\\"");
            format!("out.{}=\"{}\";", tag.field, quoted)
        }
        TagValue::RuleOutput(rule) => format!("out.{}=rules.{};", tag.field, rule),
    }
}

fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn escape_attr(text: &str) -> String {
    escape_text(text)
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

impl Grammar {
    /// Render as an SRGS XML document.
    pub fn to_srgs(&self) -> String {
        let mut writer = Writer { out: String::new() };
        writer.line(0, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        writer.line(
            0,
            &format!(
                "<grammar xmlns=\"{}\" version=\"1.0\" xml:lang=\"{}\" root=\"{}\" tag-format=\"semantics/1.0\">",
                SRGS_NAMESPACE,
                escape_attr(self.culture()),
                escape_attr(self.root())
            ),
        );

        for rule in self.rules() {
            let scope = match rule.scope {
                RuleScope::Public => "public",
                RuleScope::Private => "private",
            };
            writer.line(
                1,
                &format!("<rule id=\"{}\" scope=\"{}\">", escape_attr(&rule.id), scope),
            );
            writer.children(&rule.body, 2);
            writer.line(1, "</rule>");
        }

        writer.line(0, "</grammar>");
        writer.out
    }
}
