use std::collections::BTreeMap;

use thiserror::Error;

use crate::document::{ContentParser, Document, WordCounter};
use crate::naming::FileName;
use crate::types::Kind;

pub const NAME_FIELD: &str = "name";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("No template exists for entity kind {0}")]
    UnsupportedEntityKind(Kind),
}

/// Body of one second-level section.
#[derive(Debug, Clone, Copy)]
pub enum Body {
    /// The field's value, verbatim.
    Field(&'static str),
    /// `- label: value` lines.
    Lines(&'static [(&'static str, &'static str)]),
}

#[derive(Debug, Clone, Copy)]
pub struct Block {
    pub heading: &'static str,
    pub body: Body,
}

/// Fixed markdown skeleton for one generatable kind.
#[derive(Debug)]
pub struct EntityTemplate {
    pub kind: Kind,
    /// Display name used when the field map has no `name`.
    pub default_name: &'static str,
    pub blocks: &'static [Block],
}

pub static CHARACTER: EntityTemplate = EntityTemplate {
    kind: Kind::Character,
    default_name: "未命名角色",
    blocks: &[
        Block {
            heading: "基本信息",
            body: Body::Lines(&[
                ("姓名", NAME_FIELD),
                ("性别", "gender"),
                ("年龄", "age"),
                ("职业", "profession"),
            ]),
        },
        Block {
            heading: "外貌特征",
            body: Body::Field("appearance"),
        },
        Block {
            heading: "性格特点",
            body: Body::Field("personality"),
        },
        Block {
            heading: "背景故事",
            body: Body::Field("background"),
        },
        Block {
            heading: "人物关系",
            body: Body::Field("relationships"),
        },
        Block {
            heading: "标签",
            body: Body::Field("tags"),
        },
    ],
};

pub static WORLD: EntityTemplate = EntityTemplate {
    kind: Kind::World,
    default_name: "未命名世界",
    blocks: &[
        Block {
            heading: "世界设定",
            body: Body::Lines(&[
                ("世界名称", NAME_FIELD),
                ("世界类型", "world_type"),
                ("时代背景", "era"),
                ("地理环境", "geography"),
            ]),
        },
        Block {
            heading: "社会结构",
            body: Body::Field("society"),
        },
        Block {
            heading: "魔法/科技体系",
            body: Body::Field("magic_tech"),
        },
        Block {
            heading: "历史背景",
            body: Body::Field("history"),
        },
        Block {
            heading: "重要地点",
            body: Body::Field("locations"),
        },
        Block {
            heading: "标签",
            body: Body::Field("tags"),
        },
    ],
};

pub static PLOT: EntityTemplate = EntityTemplate {
    kind: Kind::Plot,
    default_name: "未命名情节",
    blocks: &[
        Block {
            heading: "情节概述",
            body: Body::Field("summary"),
        },
        Block {
            heading: "关键事件",
            body: Body::Field("key_events"),
        },
        Block {
            heading: "人物冲突",
            body: Body::Field("conflicts"),
        },
        Block {
            heading: "情节发展",
            body: Body::Field("development"),
        },
        Block {
            heading: "伏笔设置",
            body: Body::Field("foreshadowing"),
        },
        Block {
            heading: "标签",
            body: Body::Field("tags"),
        },
    ],
};

pub fn template_for(kind: Kind) -> Result<&'static EntityTemplate, TemplateError> {
    match kind {
        Kind::Character => Ok(&CHARACTER),
        Kind::World => Ok(&WORLD),
        Kind::Plot => Ok(&PLOT),
        other => Err(TemplateError::UnsupportedEntityKind(other)),
    }
}

impl EntityTemplate {
    pub fn display_name<'a>(&self, fields: &'a BTreeMap<String, String>) -> &'a str {
        fields
            .get(NAME_FIELD)
            .map(String::as_str)
            .unwrap_or(self.default_name)
    }

    /// Plain substitution; a missing field renders as an empty string.
    pub fn render(&self, fields: &BTreeMap<String, String>) -> String {
        let name = self.display_name(fields);
        let value = |field: &str| field_value(fields, name, field);

        let mut out = format!("# {name}\n");
        for block in self.blocks {
            out.push_str("\n## ");
            out.push_str(block.heading);
            out.push('\n');
            match block.body {
                Body::Field(field) => {
                    out.push_str(value(field));
                    out.push('\n');
                }
                Body::Lines(lines) => {
                    for (label, field) in lines {
                        out.push_str(&format!("- {label}: {}\n", value(*field)));
                    }
                }
            }
        }
        out
    }
}

fn field_value<'a>(fields: &'a BTreeMap<String, String>, name: &'a str, field: &str) -> &'a str {
    if field == NAME_FIELD {
        name
    } else {
        fields.get(field).map(String::as_str).unwrap_or("")
    }
}

pub fn render_template(
    kind: Kind,
    fields: &BTreeMap<String, String>,
) -> Result<String, TemplateError> {
    Ok(template_for(kind)?.render(fields))
}

/// Render, name and parse a new entity profile in one step.
pub fn generate_entity<W: WordCounter>(
    parser: &ContentParser<W>,
    kind: Kind,
    novel_id: &str,
    fields: &BTreeMap<String, String>,
) -> Result<Document, TemplateError> {
    let template = template_for(kind)?;
    let content = template.render(fields);
    let filename = FileName::entity(kind, novel_id, template.display_name(fields))
        .ok_or(TemplateError::UnsupportedEntityKind(kind))?;

    Ok(Document::parse_with(parser, filename.render(), content))
}
