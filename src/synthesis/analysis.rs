use std::fmt::Write as _;

use chrono::NaiveDateTime;
use tracing::debug;

use crate::config::{EngineConfig, PacingRange};
use crate::document::{CjkWordCounter, ContentParser, Document, Sections, WordCounter};
use crate::naming::FileName;
use crate::types::{AnalysisKind, Kind};

const ANALYSIS_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Chinese markers and their lower-case English analogues.
struct Markers {
    zh: &'static [&'static str],
    en: &'static [&'static str],
}

impl Markers {
    fn found_in(&self, input: &ReportInput<'_>) -> bool {
        self.zh.iter().any(|m| input.content.contains(m))
            || self.en.iter().any(|m| input.lowered.contains(m))
    }

    fn names(&self, title: &str) -> bool {
        self.zh.iter().any(|m| *m == title) || self.en.iter().any(|m| title.eq_ignore_ascii_case(m))
    }
}

const OPENING: Markers = Markers {
    zh: &["开端", "开始"],
    en: &["opening", "beginning"],
};
const DEVELOPMENT: Markers = Markers {
    zh: &["发展", "过程"],
    en: &["development"],
};
const CLIMAX: Markers = Markers {
    zh: &["高潮", "冲突"],
    en: &["climax", "conflict"],
};
const ENDING: Markers = Markers {
    zh: &["结局", "结束"],
    en: &["ending", "resolution"],
};

const NAME: Markers = Markers {
    zh: &["姓名"],
    en: &["name:"],
};
const AGE: Markers = Markers {
    zh: &["年龄"],
    en: &["age:"],
};
const APPEARANCE: Markers = Markers {
    zh: &["外貌", "长相"],
    en: &["appearance"],
};
const PERSONALITY: Markers = Markers {
    zh: &["性格", "特点"],
    en: &["personality"],
};
const BACKGROUND: Markers = Markers {
    zh: &["背景", "经历"],
    en: &["background"],
};
const MOTIVATION: Markers = Markers {
    zh: &["动机", "目标"],
    en: &["motivation", "goal"],
};
const GROWTH: Markers = Markers {
    zh: &["成长", "变化"],
    en: &["growth", "character arc"],
};
const RELATIONSHIPS: Markers = Markers {
    zh: &["关系"],
    en: &["relationship"],
};

const INTRO_TITLES: Markers = Markers {
    zh: &["简介", "概述", "开头"],
    en: &["introduction", "overview", "opening"],
};
const CLOSING_TITLES: Markers = Markers {
    zh: &["结尾", "总结", "结论"],
    en: &["ending", "summary", "conclusion"],
};

/// Derived views of the analyzed text, computed once per report.
struct ReportInput<'a> {
    content: &'a str,
    lowered: String,
    sections: Sections,
    word_count: usize,
}

/// A report ready to be stored next to the novel it analyzes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistableReport {
    pub filename: String,
    pub content: String,
}

/// Synthesizes markdown analysis reports from raw content.
///
/// Stateless: every report is a function of the content, the kind and,
/// for `*_at` calls, the supplied analysis time.
#[derive(Debug, Clone)]
pub struct AnalysisEngine<W = CjkWordCounter> {
    parser: ContentParser<W>,
    pacing: PacingRange,
    structure_title_limit: usize,
}

impl Default for AnalysisEngine<CjkWordCounter> {
    fn default() -> Self {
        Self::new(&EngineConfig::v0())
    }
}

impl AnalysisEngine<CjkWordCounter> {
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_parser(config, ContentParser::new(config))
    }
}

impl<W: WordCounter> AnalysisEngine<W> {
    pub fn with_parser(config: &EngineConfig, parser: ContentParser<W>) -> Self {
        Self {
            parser,
            pacing: config.pacing,
            structure_title_limit: config.structure_title_limit,
        }
    }

    /// Report for a kind given by name. Unknown names get a placeholder
    /// report naming the kind instead of an error.
    pub fn analyze(&self, content: &str, analysis_kind: &str) -> String {
        match analysis_kind.parse::<AnalysisKind>() {
            Ok(kind) => self.report(content, kind, None),
            Err(_) => unsupported_report(analysis_kind),
        }
    }

    /// Like [`analyze`](Self::analyze), stamping the analysis time where the
    /// report carries one.
    pub fn analyze_at(&self, content: &str, analysis_kind: &str, at: NaiveDateTime) -> String {
        match analysis_kind.parse::<AnalysisKind>() {
            Ok(kind) => self.report(content, kind, Some(at)),
            Err(_) => unsupported_report(analysis_kind),
        }
    }

    pub fn report(&self, content: &str, kind: AnalysisKind, at: Option<NaiveDateTime>) -> String {
        let input = ReportInput {
            content,
            lowered: content.to_lowercase(),
            sections: crate::document::extract_sections(content),
            word_count: self.parser.word_count(content),
        };

        match kind {
            AnalysisKind::Plot => plot_report(&input, self.pacing, at),
            AnalysisKind::Character => character_report(&input),
            AnalysisKind::Style => style_report(),
            AnalysisKind::Structure => structure_report(&input, self.structure_title_limit),
        }
    }

    /// Report on a novel main file, named for storage beside it.
    ///
    /// `None` for any other kind of document: only novels own analysis files.
    pub fn report_for(
        &self,
        document: &Document,
        kind: AnalysisKind,
        at: NaiveDateTime,
    ) -> Option<PersistableReport> {
        if document.kind != Kind::Novel {
            return None;
        }
        let novel_id = document.novel_id()?;

        Some(PersistableReport {
            filename: FileName::analysis(novel_id, kind.as_str(), at).render(),
            content: self.report(&document.raw_content, kind, Some(at)),
        })
    }
}

fn verdict(found: bool, yes: &'static str, no: &'static str) -> &'static str {
    if found {
        yes
    } else {
        no
    }
}

fn plot_report(input: &ReportInput<'_>, pacing: PacingRange, at: Option<NaiveDateTime>) -> String {
    let identified = |markers: &Markers| verdict(markers.found_in(input), "已识别", "未明确");

    let mut out = String::from("# 情节分析报告\n\n## 基本统计\n");
    let _ = writeln!(out, "- 总字数: {}", input.word_count);
    let _ = writeln!(out, "- 段落数: {}", input.sections.len());
    if let Some(at) = at {
        let _ = writeln!(out, "- 分析时间: {}", at.format(ANALYSIS_TIME_FORMAT));
    }

    out.push_str("\n## 情节结构\n");
    for key in input.sections.keys() {
        let _ = writeln!(out, "- {key}");
    }

    out.push_str("\n## 情节要素\n");
    let _ = writeln!(out, "- 开端: {}", identified(&OPENING));
    let _ = writeln!(out, "- 发展: {}", identified(&DEVELOPMENT));
    let _ = writeln!(out, "- 高潮: {}", identified(&CLIMAX));
    let _ = writeln!(out, "- 结局: {}", identified(&ENDING));

    out.push_str("\n## 建议\n");
    let _ = writeln!(
        out,
        "- 情节推进节奏{}",
        verdict(pacing.contains(input.word_count), "适中", "需要调整")
    );
    out.push_str("- 建议增加更多细节描述\n");
    out.push_str("- 可以考虑增加人物心理描写\n");
    out
}

fn character_report(input: &ReportInput<'_>) -> String {
    let has = |markers: &Markers| markers.found_in(input);
    let described = |markers: &Markers| verdict(has(markers), "已描述", "待补充");

    let mut out = String::from("# 人物分析报告\n\n## 人物设定完整性\n");
    let _ = writeln!(out, "- 基本信息: {}", verdict(has(&NAME) && has(&AGE), "完整", "待完善"));
    let _ = writeln!(out, "- 外貌描述: {}", described(&APPEARANCE));
    let _ = writeln!(out, "- 性格特点: {}", described(&PERSONALITY));
    let _ = writeln!(out, "- 背景故事: {}", described(&BACKGROUND));

    out.push_str("\n## 人物深度\n");
    let _ = writeln!(out, "- 内在动机: {}", verdict(has(&MOTIVATION), "明确", "需要完善"));
    let _ = writeln!(out, "- 成长弧线: {}", verdict(has(&GROWTH), "设定", "需要设计"));
    let _ = writeln!(out, "- 人物关系: {}", verdict(has(&RELATIONSHIPS), "已建立", "待建立"));

    out.push_str("\n## 优化建议\n");
    out.push_str("- 可以增加更多细节描述\n");
    out.push_str("- 建议完善人物的内心世界\n");
    out.push_str("- 可以设计更多人物冲突\n");
    out
}

// No content inspection: every field is a fixed placeholder.
fn style_report() -> String {
    String::from(
        "# 风格分析报告\n\
         \n\
         ## 文本特征\n\
         - 句式风格: 分析中...\n\
         - 用词特点: 分析中...\n\
         - 语言风格: 分析中...\n\
         \n\
         ## 写作技巧\n\
         - 描写手法: 分析中...\n\
         - 修辞手法: 分析中...\n\
         - 叙述视角: 分析中...\n\
         \n\
         ## 风格建议\n\
         - 保持一致的文风\n\
         - 可以尝试更多修辞手法\n\
         - 注意语言的节奏感\n",
    )
}

fn structure_report(input: &ReportInput<'_>, title_limit: usize) -> String {
    let sections = &input.sections;
    let any_titled = |markers: &Markers| sections.keys().any(|key| markers.names(key));
    let complete = |found: bool| verdict(found, "完整", "待完善");

    let leading: Vec<&str> = sections.keys().take(title_limit).collect();

    let mut out = String::from("# 结构分析报告\n\n## 文档结构\n");
    let _ = writeln!(out, "- 总段落数: {}", sections.len());
    let _ = writeln!(out, "- 主要章节: {}", leading.join(", "));

    out.push_str("\n## 结构完整性\n");
    let _ = writeln!(out, "- 开头: {}", complete(any_titled(&INTRO_TITLES)));
    let _ = writeln!(out, "- 主体: {}", complete(sections.len() > 2));
    let _ = writeln!(out, "- 结尾: {}", complete(any_titled(&CLOSING_TITLES)));

    out.push_str("\n## 优化建议\n");
    out.push_str("- 建议完善文档结构\n");
    out.push_str("- 可以增加更多章节\n");
    out.push_str("- 注意章节之间的逻辑关系\n");
    out
}

fn unsupported_report(analysis_kind: &str) -> String {
    debug!(analysis_kind, "unsupported analysis kind, emitting placeholder report");
    format!("# 分析报告\n\n分析类型: {analysis_kind}\n\n暂不支持此类型分析")
}
