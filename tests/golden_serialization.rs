use chrono::{TimeZone, Utc};
use manuscript_core::document::Document;
use manuscript_core::ParseWarning;
use serde_json::Value;

fn normalize(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join("")
}

#[test]
fn golden_document_serialization() {
    let doc = Document::parse("novel-1-chapter-001.md", "# 第一章\n\n正文内容\n\n## 场景\n夜色");

    let json_str = serde_json::to_string(&doc).unwrap();

    let expected = r##"{
        "filename": "novel-1-chapter-001.md",
        "kind": "chapter",
        "version": "sha256:8647e7ec81a048dfb7e906e7e09cf908c3b826af7db4c68c0c745e626bbdba1e",
        "raw_content": "# 第一章\n\n正文内容\n\n## 场景\n夜色",
        "metadata": {"title": "第一章"},
        "sections": {"header": "# 第一章\n\n正文内容", "场景": "夜色"},
        "word_count": 11,
        "tags": []
    }"##;

    assert_eq!(normalize(&json_str), normalize(expected));
}

#[test]
fn sections_serialize_header_first_then_document_order() {
    let doc = Document::parse("novel-1-main.md", "开场\n## 乙\nb\n## 甲\na");
    let json_str = serde_json::to_string(&doc.sections).unwrap();

    assert_eq!(json_str, r#"{"header":"开场","乙":"b","甲":"a"}"#);
}

#[test]
fn optional_fields_appear_only_when_present() {
    let ts = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let doc = Document::parse("novel-1-main.md", "---\n[1, 2]\n---\n# 书名")
        .with_timestamps(Some(ts), Some(ts));

    let value: Value = serde_json::to_value(&doc).unwrap();

    assert_eq!(value["created_at"], "2024-03-01T12:00:00Z");
    assert_eq!(value["updated_at"], "2024-03-01T12:00:00Z");
    assert_eq!(value["warnings"][0]["warning"], "front_matter_not_a_mapping");
    assert_eq!(doc.warnings, vec![ParseWarning::FrontMatterNotAMapping]);
}

#[test]
fn document_deserializes_from_its_own_json() {
    let doc = Document::parse(
        "novel-2-character-Kai.md",
        "---\nrole: lead\nlevel: 3\n---\n# Kai\n\n## 标签\n主角, 剑客\n",
    );

    let json_str = serde_json::to_string(&doc).unwrap();
    let back: Document = serde_json::from_str(&json_str).unwrap();

    assert_eq!(back, doc);
    assert_eq!(back.tags, vec!["主角", "剑客"]);
}

#[test]
fn extension_fields_serialize_in_key_order() {
    let doc = Document::parse(
        "novel-1-character-z.md",
        "## 基本信息\n- 职业: 剑客\n- age: 18\n- 姓名: 甲\n",
    );

    let json_str = serde_json::to_string(&doc.metadata).unwrap();
    assert_eq!(json_str, r#"{"age":"18","姓名":"甲","职业":"剑客"}"#);
}

#[test]
fn empty_content_still_has_a_header_section() {
    let doc = Document::parse("a.md", "");

    assert_eq!(doc.sections.len(), 1);
    assert_eq!(serde_json::to_string(&doc.sections).unwrap(), r#"{"header":""}"#);
}
