use std::collections::BTreeMap;

use manuscript_core::document::Document;
use manuscript_core::synthesis::{generate_entity, render_template, TemplateError};
use manuscript_core::{classify, Engine, FileName, Kind};

fn fields(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

#[test]
fn character_template_round_trip() {
    let content = render_template(Kind::Character, &fields(&[("name", "艾丽")])).unwrap();
    let filename = FileName::character("1", "艾丽").render();
    let doc = Document::parse(filename.clone(), content);

    assert_eq!(classify(&filename), Kind::Character);
    assert_eq!(doc.kind, Kind::Character);
    assert_eq!(doc.metadata.title(), Some("艾丽"));
    assert_eq!(doc.metadata.get_str("姓名"), Some("艾丽"));
    assert!(doc.tags.is_empty());
}

#[test]
fn character_template_exact_text() {
    let content = render_template(
        Kind::Character,
        &fields(&[
            ("name", "李逍遥"),
            ("age", "18"),
            ("personality", "乐观"),
            ("tags", "主角, 剑客"),
        ]),
    )
    .unwrap();

    let expected = "# 李逍遥\n\
\n\
## 基本信息\n\
- 姓名: 李逍遥\n\
- 性别: \n\
- 年龄: 18\n\
- 职业: \n\
\n\
## 外貌特征\n\
\n\
\n\
## 性格特点\n\
乐观\n\
\n\
## 背景故事\n\
\n\
\n\
## 人物关系\n\
\n\
\n\
## 标签\n\
主角, 剑客\n";

    assert_eq!(content, expected);
}

#[test]
fn rendered_sections_follow_template_order() {
    for (kind, expected) in [
        (
            Kind::Character,
            vec!["基本信息", "外貌特征", "性格特点", "背景故事", "人物关系", "标签"],
        ),
        (
            Kind::World,
            vec!["世界设定", "社会结构", "魔法/科技体系", "历史背景", "重要地点", "标签"],
        ),
        (
            Kind::Plot,
            vec!["情节概述", "关键事件", "人物冲突", "情节发展", "伏笔设置", "标签"],
        ),
    ] {
        let content = render_template(kind, &fields(&[("name", "x")])).unwrap();
        let doc = Document::parse("a.md", content);
        let headings: Vec<&str> = doc.sections.headings().collect();
        assert_eq!(headings, expected, "{kind}");
    }
}

#[test]
fn missing_fields_render_empty_and_name_falls_back() {
    let content = render_template(Kind::World, &BTreeMap::new()).unwrap();
    let doc = Document::parse("a.md", content);

    assert_eq!(doc.metadata.title(), Some("未命名世界"));
    assert_eq!(doc.sections.get("社会结构"), Some(""));
}

#[test]
fn tags_field_flows_into_document_tags() {
    let doc = Engine::default()
        .generate_entity(
            Kind::Plot,
            "9",
            &fields(&[
                ("name", "Night Raid"),
                ("tags", "heist, night"),
                ("summary", "They strike at dawn."),
            ]),
        )
        .unwrap();

    assert_eq!(doc.filename, "novel-9-plot-Night_Raid.md");
    assert_eq!(doc.kind, Kind::Plot);
    assert_eq!(doc.title(), Some("Night Raid"));
    assert_eq!(doc.tags, vec!["heist", "night"]);
    assert_eq!(doc.section("情节概述"), Some("They strike at dawn."));
}

#[test]
fn generated_entities_reclassify_to_their_kind() {
    let engine = Engine::default();
    for kind in [Kind::Character, Kind::World, Kind::Plot] {
        let doc = engine
            .generate_entity(kind, "3", &fields(&[("name", "Sample Name")]))
            .unwrap();
        assert_eq!(classify(&doc.filename), kind);
        assert_eq!(doc.title(), Some("Sample Name"));
    }
}

#[test]
fn unsupported_entity_kind_is_an_error() {
    for kind in [
        Kind::Novel,
        Kind::Chapter,
        Kind::Analysis,
        Kind::Style,
        Kind::Template,
        Kind::Unknown,
    ] {
        assert_eq!(
            render_template(kind, &BTreeMap::new()),
            Err(TemplateError::UnsupportedEntityKind(kind))
        );
        let parser = manuscript_core::document::ContentParser::default();
        assert_eq!(
            generate_entity(&parser, kind, "1", &BTreeMap::new()).unwrap_err(),
            TemplateError::UnsupportedEntityKind(kind)
        );
    }
}
