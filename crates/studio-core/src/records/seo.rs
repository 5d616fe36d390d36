//! SEO audit: request and record
//!
//! The audit is the deepest payload the studio reads. Every nested block is
//! rebuilt field by field so a half-formed answer still yields a complete
//! record.

use super::{private, Fields, Record, WorkflowRecord};
use crate::normalizer::Payload;
use crate::types::{RecordId, WorkflowKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Parameters of an SEO audit request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeoRequest {
    /// Text to audit
    pub content: String,
    /// Keywords the author targets, unique and trimmed
    keywords: Vec<String>,
}

impl SeoRequest {
    /// Request for a piece of text, no keywords
    #[inline]
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            keywords: Vec::new(),
        }
    }

    /// With keyword (same rules as [`SeoRequest::add_keyword`])
    #[must_use]
    pub fn with_keyword(mut self, keyword: &str) -> Self {
        self.add_keyword(keyword);
        self
    }

    /// Add a target keyword
    ///
    /// Returns false if the trimmed keyword is blank or already present.
    pub fn add_keyword(&mut self, keyword: &str) -> bool {
        let keyword = keyword.trim();
        if keyword.is_empty() || self.keywords.iter().any(|k| k == keyword) {
            return false;
        }
        self.keywords.push(keyword.to_string());
        true
    }

    /// Remove a target keyword; returns whether it was present
    pub fn remove_keyword(&mut self, keyword: &str) -> bool {
        let before = self.keywords.len();
        self.keywords.retain(|k| k != keyword);
        self.keywords.len() != before
    }

    /// Target keywords in insertion order
    #[inline]
    #[must_use]
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Check if there is any text to audit
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.content.trim().is_empty()
    }

    /// Instruction text sent to the SEO agent
    #[must_use]
    pub fn instruction(&self) -> String {
        let keywords = if self.keywords.is_empty() {
            "No specific target keywords provided - identify the most relevant ones.".to_string()
        } else {
            format!("Target Keywords: {}", self.keywords.join(", "))
        };
        format!(
            "Analyze the following content for SEO optimization:\n\n{}\n\n{}",
            self.content, keywords
        )
    }

    /// Truncated copy of the audited text, as stored on the record
    #[must_use]
    pub fn preview(&self, chars: usize) -> String {
        let mut preview: String = self.content.chars().take(chars).collect();
        preview.push_str("...");
        preview
    }
}

/// One analyzed keyword
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordStat {
    /// Keyword text
    pub keyword: String,
    /// Density label, e.g. "2.4%"
    pub density: String,
    /// Occurrences in the text
    pub occurrences: u32,
}

/// Keyword analysis block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordAnalysis {
    /// Per-keyword statistics
    pub target_keywords: Vec<KeywordStat>,
    /// Suggestions
    pub suggestions: Vec<String>,
}

/// Readability block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Readability {
    /// Readability score
    pub score: i64,
    /// Reading level label, e.g. "Grade 10"
    pub reading_level: String,
    /// Average sentence length label, e.g. "18 words"
    pub avg_sentence_length: String,
    /// Feedback text
    pub feedback: String,
}

/// Suggested meta tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaSuggestions {
    /// Suggested title tag
    pub meta_title: String,
    /// Suggested meta description
    pub meta_description: String,
}

/// Heading structure block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadingStructure {
    /// Headings found, e.g. "H2: Key Trends"
    pub current_structure: Vec<String>,
    /// Suggested changes
    pub suggestions: Vec<String>,
}

/// Recommendation priority as presented
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Do first
    High,
    /// Worth doing
    Medium,
    /// Anything not recognised
    Low,
}

impl Priority {
    /// Classify a free-text label, case-insensitively
    #[must_use]
    pub fn classify(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "high" => Self::High,
            "medium" => Self::Medium,
            _ => Self::Low,
        }
    }
}

/// One prioritized recommendation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Priority label as the agent wrote it
    pub priority: String,
    /// What to change
    pub recommendation: String,
    /// Expected effect
    pub impact: String,
}

impl Recommendation {
    /// Classified priority
    #[inline]
    #[must_use]
    pub fn priority_level(&self) -> Priority {
        Priority::classify(&self.priority)
    }
}

/// Presentation band for a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreBand {
    /// 70 and above
    Good,
    /// 50 to 69
    Fair,
    /// Below 50
    Poor,
}

impl ScoreBand {
    /// Band for a clamped score
    #[must_use]
    pub fn of(score: u8) -> Self {
        match score {
            70.. => Self::Good,
            50..=69 => Self::Fair,
            _ => Self::Poor,
        }
    }
}

/// Clamp a raw score to 0..=100
#[must_use]
pub fn clamp_score(score: i64) -> u8 {
    u8::try_from(score.clamp(0, 100)).unwrap_or_default()
}

/// A completed SEO audit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeoAuditRecord {
    /// Record identifier
    pub id: RecordId,
    /// Overall score as reported, unclamped
    pub overall_score: i64,
    /// Keyword analysis
    pub keyword_analysis: KeywordAnalysis,
    /// Readability
    pub readability: Readability,
    /// Meta tag suggestions
    pub meta_suggestions: MetaSuggestions,
    /// Heading structure
    pub heading_structure: HeadingStructure,
    /// Recommendations in agent order
    pub recommendations: Vec<Recommendation>,
    /// Truncated audited text
    pub content_preview: String,
    /// Build time
    pub created_at: DateTime<Utc>,
}

impl SeoAuditRecord {
    /// Build a record from a payload
    ///
    /// `preview_chars` bounds the stored copy of the audited text.
    #[must_use]
    pub fn build(payload: &Payload, request: &SeoRequest, preview_chars: usize) -> Self {
        let fields = payload.fields();
        Self {
            id: RecordId::new(),
            overall_score: fields.score("overall_seo_score", 0),
            keyword_analysis: keyword_analysis(fields.nested("keyword_analysis")),
            readability: readability(fields.nested("readability")),
            meta_suggestions: meta_suggestions(fields.nested("meta_suggestions")),
            heading_structure: heading_structure(fields.nested("heading_structure")),
            recommendations: fields
                .objects("recommendations")
                .map(|rec| Recommendation {
                    priority: rec.text("priority", ""),
                    recommendation: rec.text("recommendation", ""),
                    impact: rec.text("impact", ""),
                })
                .collect(),
            content_preview: request.preview(preview_chars),
            created_at: Utc::now(),
        }
    }

    /// Overall score clamped to 0..=100
    #[inline]
    #[must_use]
    pub fn clamped_score(&self) -> u8 {
        clamp_score(self.overall_score)
    }

    /// Presentation band of the overall score
    #[inline]
    #[must_use]
    pub fn band(&self) -> ScoreBand {
        ScoreBand::of(self.clamped_score())
    }
}

fn keyword_analysis(fields: Fields<'_>) -> KeywordAnalysis {
    KeywordAnalysis {
        target_keywords: fields
            .objects("target_keywords")
            .map(|kw| KeywordStat {
                keyword: kw.text("keyword", ""),
                density: kw.text("density", ""),
                occurrences: kw.count("occurrences", 0),
            })
            .collect(),
        suggestions: fields.strings("suggestions"),
    }
}

fn readability(fields: Fields<'_>) -> Readability {
    Readability {
        score: fields.score("score", 0),
        reading_level: fields.text("reading_level", ""),
        avg_sentence_length: fields.text("avg_sentence_length", ""),
        feedback: fields.text("feedback", ""),
    }
}

fn meta_suggestions(fields: Fields<'_>) -> MetaSuggestions {
    MetaSuggestions {
        meta_title: fields.text("meta_title", ""),
        meta_description: fields.text("meta_description", ""),
    }
}

fn heading_structure(fields: Fields<'_>) -> HeadingStructure {
    HeadingStructure {
        current_structure: fields.strings("current_structure"),
        suggestions: fields.strings("suggestions"),
    }
}

impl private::Sealed for SeoAuditRecord {}

impl Record for SeoAuditRecord {
    const WORKFLOW: WorkflowKind = WorkflowKind::SeoAudit;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn into_workflow_record(self) -> WorkflowRecord {
        WorkflowRecord::SeoAudit(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => Payload::Present(map),
            _ => Payload::Absent,
        }
    }

    #[test]
    fn full_audit_is_built() {
        let record = SeoAuditRecord::build(
            &payload(json!({
                "overall_seo_score": 74,
                "keyword_analysis": {
                    "target_keywords": [
                        {"keyword": "AI marketing", "density": "2.4%", "occurrences": 8}
                    ],
                    "suggestions": ["add long-tail keywords"]
                },
                "readability": {
                    "score": 68,
                    "reading_level": "Grade 10",
                    "avg_sentence_length": "18 words",
                    "feedback": "Good"
                },
                "meta_suggestions": {"meta_title": "T", "meta_description": "D"},
                "heading_structure": {
                    "current_structure": ["H1: A"],
                    "suggestions": ["Add H3"]
                },
                "recommendations": [
                    {"priority": "High", "recommendation": "alt text", "impact": "a11y"}
                ]
            })),
            &SeoRequest::new("short text"),
            100,
        );

        assert_eq!(record.overall_score, 74);
        assert_eq!(
            record.keyword_analysis.target_keywords,
            vec![KeywordStat {
                keyword: "AI marketing".to_string(),
                density: "2.4%".to_string(),
                occurrences: 8,
            }]
        );
        assert_eq!(record.keyword_analysis.suggestions, vec!["add long-tail keywords"]);
        assert_eq!(record.readability.score, 68);
        assert_eq!(record.readability.reading_level, "Grade 10");
        assert_eq!(record.meta_suggestions.meta_title, "T");
        assert_eq!(record.heading_structure.current_structure, vec!["H1: A"]);
        assert_eq!(record.recommendations[0].priority_level(), Priority::High);
        assert_eq!(record.content_preview, "short text...");
    }

    #[test]
    fn wrongly_shaped_blocks_default() {
        let record = SeoAuditRecord::build(
            &payload(json!({
                "overall_seo_score": "74",
                "keyword_analysis": {"target_keywords": "AI", "suggestions": null},
                "readability": [1, 2],
                "heading_structure": {"current_structure": ["H1"], "suggestions": "none"},
                "recommendations": {"priority": "High"}
            })),
            &SeoRequest::new("text"),
            100,
        );

        assert_eq!(record.overall_score, 0);
        assert!(record.keyword_analysis.target_keywords.is_empty());
        assert!(record.keyword_analysis.suggestions.is_empty());
        assert_eq!(record.readability, Readability::default());
        assert_eq!(record.meta_suggestions, MetaSuggestions::default());
        assert_eq!(record.heading_structure.current_structure, vec!["H1"]);
        assert!(record.heading_structure.suggestions.is_empty());
        assert!(record.recommendations.is_empty());
    }

    #[test]
    fn keyword_entries_are_rebuilt_field_by_field() {
        let record = SeoAuditRecord::build(
            &payload(json!({
                "keyword_analysis": {
                    "target_keywords": [
                        {"keyword": "a", "occurrences": "many", "extra": 1},
                        "b"
                    ]
                }
            })),
            &SeoRequest::new("text"),
            100,
        );

        assert_eq!(
            record.keyword_analysis.target_keywords,
            vec![KeywordStat {
                keyword: "a".to_string(),
                density: String::new(),
                occurrences: 0,
            }]
        );
    }

    #[test]
    fn preview_truncates_on_characters() {
        let request = SeoRequest::new("é".repeat(150));
        let preview = request.preview(100);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn score_clamping_and_bands() {
        assert_eq!(clamp_score(140), 100);
        assert_eq!(clamp_score(-5), 0);
        assert_eq!(clamp_score(74), 74);

        assert_eq!(ScoreBand::of(70), ScoreBand::Good);
        assert_eq!(ScoreBand::of(69), ScoreBand::Fair);
        assert_eq!(ScoreBand::of(50), ScoreBand::Fair);
        assert_eq!(ScoreBand::of(49), ScoreBand::Poor);
    }

    #[test]
    fn priority_classification() {
        assert_eq!(Priority::classify("HIGH"), Priority::High);
        assert_eq!(Priority::classify("Medium"), Priority::Medium);
        assert_eq!(Priority::classify("urgent"), Priority::Low);
        assert_eq!(Priority::classify(""), Priority::Low);
    }

    #[test]
    fn keyword_set_rules() {
        let mut request = SeoRequest::new("text");
        assert!(request.add_keyword("  seo  "));
        assert!(!request.add_keyword("seo"));
        assert!(!request.add_keyword("   "));
        assert!(request.add_keyword("ads"));
        assert_eq!(request.keywords(), ["seo", "ads"]);

        assert!(request.remove_keyword("seo"));
        assert!(!request.remove_keyword("seo"));
        assert_eq!(request.keywords(), ["ads"]);
    }

    #[test]
    fn instruction_text() {
        let plain = SeoRequest::new("Body");
        assert_eq!(
            plain.instruction(),
            "Analyze the following content for SEO optimization:\n\nBody\n\n\
             No specific target keywords provided - identify the most relevant ones."
        );

        let targeted = SeoRequest::new("Body").with_keyword("a").with_keyword("b");
        assert!(targeted.instruction().ends_with("Target Keywords: a, b"));
    }
}
