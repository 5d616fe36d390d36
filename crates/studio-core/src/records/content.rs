//! Content drafting: request and record

use super::{private, Record, WorkflowRecord};
use crate::normalizer::Payload;
use crate::types::{RecordId, WorkflowKind};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audiences offered by the content studio
pub const AUDIENCES: [&str; 5] = [
    "Marketing Professionals",
    "Small Business Owners",
    "Tech Enthusiasts",
    "General Consumers",
    "Enterprise Decision Makers",
];

/// Tones offered by the content studio
pub const TONES: [&str; 4] = ["Professional", "Casual", "Persuasive", "Witty"];

/// Formats offered by the content studio
pub const FORMATS: [&str; 4] = ["Blog Post", "Social Copy", "Email", "Ad Copy"];

/// Parameters of a content request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRequest {
    /// What to write about
    pub topic: String,
    /// Target audience
    pub audience: String,
    /// Voice of the piece
    pub tone: String,
    /// Format label
    pub format: String,
    /// Target length in words
    pub word_count: u32,
}

impl ContentRequest {
    /// Request with default audience, tone, format and length
    #[inline]
    #[must_use]
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// With audience
    #[inline]
    #[must_use]
    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = audience.into();
        self
    }

    /// With tone
    #[inline]
    #[must_use]
    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    /// With format
    #[inline]
    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    /// With target word count
    #[inline]
    #[must_use]
    pub fn with_word_count(mut self, word_count: u32) -> Self {
        self.word_count = word_count;
        self
    }

    /// Check if there is anything to write about
    #[inline]
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.topic.trim().is_empty()
    }

    /// Instruction text sent to the content agent
    #[must_use]
    pub fn instruction(&self) -> String {
        format!(
            "Create {} content about: {}\n\nTarget Audience: {}\nTone: {}\nWord Count: {}\n\n\
             Please research the topic thoroughly and produce a polished, publish-ready piece.",
            self.format, self.topic, self.audience, self.tone, self.word_count
        )
    }
}

impl Default for ContentRequest {
    fn default() -> Self {
        Self {
            topic: String::new(),
            audience: AUDIENCES[0].to_string(),
            tone: TONES[0].to_string(),
            format: FORMATS[0].to_string(),
            word_count: 800,
        }
    }
}

/// A drafted piece of content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentRecord {
    /// Record identifier
    pub id: RecordId,
    /// Headline
    pub title: String,
    /// Body text (markdown)
    pub body: String,
    /// Meta description
    pub meta_description: String,
    /// Format label
    pub format: String,
    /// Word count
    pub word_count: u32,
    /// Highlights, in agent order
    pub highlights: Vec<String>,
    /// Build time
    pub created_at: DateTime<Utc>,
}

impl ContentRecord {
    /// Build a record from a payload
    ///
    /// Missing or mistyped fields fall back to the request: title to the
    /// topic, format to the requested format, word count to the requested
    /// target.
    #[must_use]
    pub fn build(payload: &Payload, request: &ContentRequest) -> Self {
        let fields = payload.fields();
        Self {
            id: RecordId::new(),
            title: fields.text("title", &request.topic),
            body: fields.text("content", ""),
            meta_description: fields.text("meta_description", ""),
            format: fields.text("format_type", &request.format),
            word_count: fields.count("word_count", request.word_count),
            highlights: fields.strings("key_highlights"),
            created_at: Utc::now(),
        }
    }
}

impl private::Sealed for ContentRecord {}

impl Record for ContentRecord {
    const WORKFLOW: WorkflowKind = WorkflowKind::Content;

    fn id(&self) -> RecordId {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn into_workflow_record(self) -> WorkflowRecord {
        WorkflowRecord::Content(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn payload(value: Value) -> Payload {
        match value {
            Value::Object(map) => Payload::Present(map),
            _ => Payload::Absent,
        }
    }

    #[test]
    fn full_payload_is_copied() {
        let request = ContentRequest::new("AI marketing");
        let record = ContentRecord::build(
            &payload(json!({
                "title": "The Future",
                "content": "## Intro",
                "meta_description": "meta",
                "format_type": "Email",
                "word_count": 450,
                "key_highlights": ["one", "two"]
            })),
            &request,
        );

        assert_eq!(record.title, "The Future");
        assert_eq!(record.body, "## Intro");
        assert_eq!(record.meta_description, "meta");
        assert_eq!(record.format, "Email");
        assert_eq!(record.word_count, 450);
        assert_eq!(record.highlights, vec!["one", "two"]);
    }

    #[test]
    fn defaults_come_from_request() {
        let request = ContentRequest::new("AI marketing")
            .with_format("Ad Copy")
            .with_word_count(1200);
        let record = ContentRecord::build(&payload(json!({"unrelated": true})), &request);

        assert_eq!(record.title, "AI marketing");
        assert_eq!(record.body, "");
        assert_eq!(record.format, "Ad Copy");
        assert_eq!(record.word_count, 1200);
        assert!(record.highlights.is_empty());
    }

    #[test]
    fn non_numeric_word_count_uses_request_target() {
        let request = ContentRequest::new("t").with_word_count(800);
        let record = ContentRecord::build(
            &payload(json!({"title": "X", "word_count": "bad"})),
            &request,
        );
        assert_eq!(record.word_count, 800);
        assert_eq!(record.title, "X");
    }

    #[test]
    fn non_list_highlights_are_empty() {
        let record = ContentRecord::build(
            &payload(json!({"key_highlights": "one, two"})),
            &ContentRequest::new("t"),
        );
        assert!(record.highlights.is_empty());
    }

    #[test]
    fn timestamp_assigned_at_build() {
        let before = Utc::now();
        let record = ContentRecord::build(
            &payload(json!({"created_at": "1999-01-01T00:00:00Z"})),
            &ContentRequest::new("t"),
        );
        assert!(record.created_at >= before);
        assert!(record.created_at <= Utc::now());
    }

    #[test]
    fn instruction_text() {
        let request = ContentRequest::new("spring launch");
        assert_eq!(
            request.instruction(),
            "Create Blog Post content about: spring launch\n\n\
             Target Audience: Marketing Professionals\n\
             Tone: Professional\nWord Count: 800\n\nPlease research the topic thoroughly and \
             produce a polished, publish-ready piece."
        );
    }

    #[test]
    fn blank_topic() {
        assert!(ContentRequest::new("   ").is_blank());
        assert!(!ContentRequest::new("x").is_blank());
    }
}
