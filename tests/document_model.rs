use chrono::{TimeZone, Utc};
use manuscript_core::document::{ContentParser, Document, MetadataValue, ParseWarning, HEADER_KEY};
use manuscript_core::{EngineConfig, Kind};

#[test]
fn invariant_same_content_same_version() {
    let doc1 = Document::parse("a.md", "Hello world");
    let doc2 = Document::parse("b.md", "Hello world");

    assert_eq!(doc1.version, doc2.version);
    assert_eq!(
        doc1.version.as_str(),
        "sha256:64ec88ca00b268e5ba1a35678a1b5316d212f4f366b2477232534a8aeca37f3c"
    );
}

#[test]
fn invariant_no_newline_normalization() {
    let unix = Document::parse("doc.md", "line\n");
    let windows = Document::parse("doc.md", "line\r\n");

    assert_ne!(unix.version, windows.version);
}

#[test]
fn kind_is_derived_from_filename() {
    assert_eq!(Document::parse("novel-1-main.md", "").kind, Kind::Novel);
    assert_eq!(Document::parse("scratch.md", "# Notes").kind, Kind::Unknown);
}

#[test]
fn empty_content_degrades_to_empty_data() {
    let doc = Document::parse("novel-1-chapter-001.md", "");

    assert!(doc.metadata.is_empty());
    assert_eq!(doc.sections.len(), 1);
    assert_eq!(doc.sections.get(HEADER_KEY), Some(""));
    assert_eq!(doc.word_count, 0);
    assert!(doc.tags.is_empty());
    assert!(doc.warnings.is_empty());
}

#[test]
fn word_count_mixes_cjk_and_ascii_words() {
    let doc = Document::parse(
        "novel-1-character-li.md",
        "# Title\n\n## 基本信息\n- 姓名: 李逍遥\n\nHello world 测试文本",
    );

    // Title, Hello, world + 基本信息, 姓名, 李逍遥, 测试文本
    assert_eq!(doc.word_count, 3 + 13);
}

#[test]
fn word_count_splits_ascii_runs_on_digits_and_ideographs() {
    let doc = Document::parse("x.md", "abc123 Hello世界 see [link](http://x.com) ![img](a.png)");

    // abc, Hello, see, linkhttp, x, com, imga, png + 世界
    assert_eq!(doc.word_count, 8 + 2);
}

#[test]
fn ascii_run_glued_to_ideographs_still_counts() {
    let glued = Document::parse("x.md", "他打开了iPhone手机");
    let spaced = Document::parse("x.md", "他打开了 iPhone 手机");

    assert_eq!(glued.word_count, 7);
    assert_eq!(glued.word_count, spaced.word_count);
    assert_eq!(Document::parse("x.md", "abc123").word_count, 1);
    assert_eq!(Document::parse("x.md", "v2beta").word_count, 2);
}

#[test]
fn heading_title_overrides_front_matter() {
    let doc = Document::parse("novel-1-main.md", "---\ntitle: A\nauthor: Wu\n---\n# B\n\nbody");

    assert_eq!(doc.metadata.title(), Some("B"));
    assert_eq!(doc.metadata.get_str("author"), Some("Wu"));
}

#[test]
fn front_matter_values_keep_their_types() {
    let doc = Document::parse(
        "novel-1-main.md",
        "---\nchapters: 12\ndraft: true\ntags: [fantasy, epic]\naliases:\n  - one\n  - two\n---\nbody",
    );

    assert_eq!(doc.metadata.get("chapters"), Some(&MetadataValue::Number(12)));
    assert_eq!(doc.metadata.get("draft"), Some(&MetadataValue::Bool(true)));
    assert_eq!(
        doc.metadata.get("aliases"),
        Some(&MetadataValue::List(vec!["one".into(), "two".into()]))
    );
    assert_eq!(doc.tags, vec!["fantasy", "epic"]);
}

#[test]
fn malformed_front_matter_is_a_warning_not_a_failure() {
    let doc = Document::parse("novel-1-main.md", "---\ntitle: [unclosed\n---\n## 场景\n夜色");

    assert_eq!(doc.metadata.title(), None);
    assert_eq!(doc.warnings.len(), 1);
    assert!(matches!(doc.warnings[0], ParseWarning::MalformedFrontMatter { .. }));
    // Sections and word count are unaffected.
    assert_eq!(doc.sections.get("场景"), Some("夜色"));
}

#[test]
fn scalar_front_matter_is_not_a_mapping() {
    let doc = Document::parse("a.md", "---\njust a sentence\n---\nbody");

    assert_eq!(doc.warnings, vec![ParseWarning::FrontMatterNotAMapping]);
    assert!(doc.metadata.is_empty());
}

#[test]
fn reserved_front_matter_keys_never_leak_into_extension_fields() {
    let doc = Document::parse(
        "novel-1-main.md",
        "---\ntitle: [a, b]\ntags: 5\nmood: dark\n---\n# B\n",
    );

    assert_eq!(doc.metadata.title(), Some("B"));
    assert_eq!(doc.tags, vec!["5"]);
    assert_eq!(doc.metadata.get("title"), None);
    assert_eq!(doc.metadata.get("tags"), None);
    assert!(matches!(
        &doc.warnings[..],
        [ParseWarning::InvalidReservedField { key, .. }] if key == "title"
    ));

    let json_str = serde_json::to_string(&doc.metadata).unwrap();
    assert_eq!(json_str, r#"{"title":"B","tags":["5"],"mood":"dark"}"#);

    let back: Document = serde_json::from_str(&serde_json::to_string(&doc).unwrap()).unwrap();
    assert_eq!(back, doc);
}

#[test]
fn mapping_under_tags_is_dropped_with_a_warning() {
    let doc = Document::parse("a.md", "---\ntags:\n  main: hero\ntitle: ~\n---\nbody");

    assert!(doc.tags.is_empty());
    assert!(doc.metadata.is_empty());
    assert!(matches!(
        &doc.warnings[..],
        [ParseWarning::InvalidReservedField { key, .. }] if key == "tags"
    ));
}

#[test]
fn unclosed_front_matter_is_reported() {
    let doc = Document::parse("a.md", "---\ntitle: A\n\n# Heading");

    assert_eq!(doc.warnings, vec![ParseWarning::UnclosedFrontMatter]);
    assert_eq!(doc.metadata.title(), Some("Heading"));
}

#[test]
fn tags_block_reads_one_comma_separated_line() {
    let doc = Document::parse(
        "novel-1-character-a.md",
        "# A\n\n## 标签\n\n 主角, 剑客 ,, 少年 \n第二行, 不算\n",
    );

    assert_eq!(doc.tags, vec!["主角", "剑客", "少年"]);
    assert_eq!(doc.metadata.tags(), doc.tags.as_slice());
}

#[test]
fn english_tags_heading_is_reserved_too() {
    let doc = Document::parse("a.md", "## Tags\nhero, rogue\n");
    assert_eq!(doc.tags, vec!["hero", "rogue"]);
}

#[test]
fn empty_tags_block_contributes_nothing() {
    let doc = Document::parse("a.md", "# A\n\n## 标签\n\n## 下一节\n内容\n");
    assert!(doc.tags.is_empty());
}

#[test]
fn basic_info_lines_become_lowercased_entries() {
    let doc = Document::parse(
        "novel-1-character-a.md",
        "# 李逍遥\n\n## 基本信息\n- 姓名: 李逍遥\n- Age: 18\nRole: hero: reluctant\n- 职业:\nno colon here\n- : orphan value\n\n## 外貌特征\n- eyes: brown\n",
    );

    assert_eq!(doc.metadata.get_str("姓名"), Some("李逍遥"));
    assert_eq!(doc.metadata.get_str("age"), Some("18"));
    assert_eq!(doc.metadata.get_str("role"), Some("hero: reluctant"));
    assert_eq!(doc.metadata.get("职业"), None);
    assert_eq!(doc.metadata.get("eyes"), None);
    assert_eq!(doc.metadata.iter().count(), 3);
}

#[test]
fn basic_info_overrides_earlier_sources() {
    let doc = Document::parse(
        "a.md",
        "---\nseason: spring\n---\n# Heading\n\n## 标签\nx, y\n\n## 基本信息\n- title: Info Title\n- tags: p, q\n- season: winter\n",
    );

    assert_eq!(doc.metadata.title(), Some("Info Title"));
    assert_eq!(doc.tags, vec!["p", "q"]);
    assert_eq!(doc.metadata.get_str("season"), Some("winter"));
}

#[test]
fn sections_split_on_second_level_headings() {
    let content = "# 第一章\n\n前言\n\n## 场景一\n清晨\n\n### 细节\n露水\n\n## 场景二\n黄昏\n";
    let doc = Document::parse("novel-1-chapter-001.md", content);

    let keys: Vec<&str> = doc.sections.keys().collect();
    assert_eq!(keys, vec!["header", "场景一", "场景二"]);
    assert_eq!(doc.sections.header(), "# 第一章\n\n前言");
    assert_eq!(doc.sections.get("场景一"), Some("清晨\n\n### 细节\n露水"));
    assert_eq!(doc.sections.get("场景二"), Some("黄昏"));
}

#[test]
fn section_accounting_matches_heading_count() {
    let content = "intro\n## a\n1\n## b\n2\n## c\n3\n";
    let doc = Document::parse("a.md", content);

    let headings = content.lines().filter(|l| l.starts_with("## ")).count();
    assert_eq!(doc.sections.heading_count(), headings);
    assert_eq!(doc.sections.len(), headings + 1);
}

#[test]
fn repeated_heading_keeps_first_position_and_last_body() {
    let doc = Document::parse("a.md", "## a\n1\n## b\n2\n## a\n3\n");

    let keys: Vec<&str> = doc.sections.headings().collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(doc.sections.get("a"), Some("3"));
}

#[test]
fn custom_config_changes_reserved_headings() {
    let mut config = EngineConfig::v0();
    config.tags_headings = vec!["Labels".into()];
    let parser = ContentParser::new(&config);

    let doc = Document::parse_with(&parser, "a.md", "## Labels\nred, blue\n## 标签\ngreen\n");
    assert_eq!(doc.tags, vec!["red", "blue"]);
}

#[test]
fn revise_keeps_filename_and_timestamps() {
    let created = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
    let updated = Utc.timestamp_opt(1_700_000_500, 0).unwrap();
    let original = Document::parse("novel-1-chapter-002.md", "# Draft")
        .with_timestamps(Some(created), Some(updated));

    let revised = original.revise(&ContentParser::default(), "# Final\n\nMore words here");

    assert_eq!(revised.filename, original.filename);
    assert_eq!(revised.created_at, Some(created));
    assert_eq!(revised.updated_at, Some(updated));
    assert_eq!(revised.title(), Some("Final"));
    assert_ne!(revised.version, original.version);
    // The original value is untouched.
    assert_eq!(original.title(), Some("Draft"));
}

#[test]
fn belongs_to_requires_full_id_segment() {
    let doc = Document::parse("novel-12-chapter-001.md", "");

    assert!(doc.belongs_to("12"));
    assert!(!doc.belongs_to("1"));
    assert_eq!(doc.novel_id().as_deref(), Some("12"));
}
