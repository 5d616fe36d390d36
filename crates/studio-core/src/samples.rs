//! Sample records
//!
//! Shown on the dashboard in place of an empty history when
//! [`StudioConfig::show_sample`](crate::types::StudioConfig::show_sample) is
//! set. They are built through the regular record builders and never enter
//! history.

use crate::normalizer::Payload;
use crate::records::{
    ContentRecord, ContentRequest, GraphicRecord, GraphicRequest, SeoAuditRecord, SeoRequest,
};
use serde_json::{json, Value};

const SAMPLE_TITLE: &str = "The Future of AI-Powered Marketing Automation";

const SAMPLE_BODY: &str = "## Introduction\n\nArtificial intelligence is transforming how \
marketers approach campaign planning, audience segmentation, and content creation.\n\n\
## Key Trends\n\n\
- **Predictive Analytics**: AI models can forecast customer behavior with up to 85% accuracy.\n\
- **Hyper-Personalization**: Content tailored to micro-segments of your audience.\n\
- **Automated A/B Testing**: AI runs multivariate tests 10x faster than manual methods.\n\n\
## Best Practices\n\n\
1. Start with clean data foundations\n\
2. Integrate AI gradually into existing workflows\n\
3. Measure ROI consistently across channels\n\n\
## Conclusion\n\nMarketers who embrace AI today will lead their industries tomorrow.";

const SAMPLE_IMAGE: &str = "https://placehold.co/800x600/F97316/FFF?text=Marketing+Visual";

fn payload(value: Value) -> Payload {
    match value {
        Value::Object(map) => Payload::from(map),
        _ => Payload::Absent,
    }
}

/// Sample drafted blog post
#[must_use]
pub fn sample_content() -> ContentRecord {
    let payload = payload(json!({
        "title": SAMPLE_TITLE,
        "content": SAMPLE_BODY,
        "meta_description": "Discover how AI-powered marketing automation is transforming \
            campaign planning and content creation for modern marketers.",
        "format_type": "Blog Post",
        "word_count": 450,
        "key_highlights": [
            "AI-powered predictive analytics drive 85% accuracy",
            "Hyper-personalization increases engagement by 40%",
            "Automated A/B testing runs 10x faster",
        ],
    }));
    ContentRecord::build(&payload, &ContentRequest::new(SAMPLE_TITLE))
}

/// Sample audit of the sample post
#[must_use]
pub fn sample_seo_audit() -> SeoAuditRecord {
    let payload = payload(json!({
        "overall_seo_score": 74,
        "keyword_analysis": {
            "target_keywords": [
                { "keyword": "AI marketing", "density": "2.4%", "occurrences": 8 },
                { "keyword": "marketing automation", "density": "1.8%", "occurrences": 6 },
                { "keyword": "predictive analytics", "density": "1.2%", "occurrences": 4 },
            ],
            "suggestions": [
                "Add long-tail keywords like \"AI marketing tools for small businesses\"",
                "Increase keyword density for \"marketing automation\" to 2.5%",
            ],
        },
        "readability": {
            "score": 68,
            "reading_level": "Grade 10",
            "avg_sentence_length": "18 words",
            "feedback": "Good readability overall. Consider shortening some complex sentences.",
        },
        "meta_suggestions": {
            "meta_title": "AI Marketing Automation: The Future of Digital Marketing | 2024 Guide",
            "meta_description": "Learn how AI-powered marketing automation transforms \
                campaigns with predictive analytics and hyper-personalization. \
                Complete guide for modern marketers.",
        },
        "heading_structure": {
            "current_structure": [
                "H1: The Future of AI Marketing",
                "H2: Key Trends",
                "H2: Best Practices",
                "H2: Conclusion",
            ],
            "suggestions": [
                "Add H3 subheadings under Key Trends",
                "Include an FAQ section with H2 heading",
            ],
        },
        "recommendations": [
            {
                "priority": "High",
                "recommendation": "Add alt text to all images",
                "impact": "Improves accessibility and image search ranking",
            },
            {
                "priority": "High",
                "recommendation": "Include internal links to related content",
                "impact": "Boosts page authority and reduces bounce rate",
            },
            {
                "priority": "Medium",
                "recommendation": "Add schema markup for article type",
                "impact": "Enables rich snippets in search results",
            },
            {
                "priority": "Low",
                "recommendation": "Optimize page load speed",
                "impact": "Minor improvement to Core Web Vitals",
            },
        ],
    }));
    SeoAuditRecord::build(&payload, &SeoRequest::new(SAMPLE_TITLE), SAMPLE_TITLE.len())
}

/// Sample marketing visual
#[must_use]
pub fn sample_graphic() -> GraphicRecord {
    let payload = payload(json!({
        "image_description": "A modern marketing infographic featuring AI analytics dashboard",
        "style_applied": "Modern",
        "aspect_ratio": "16:9",
        "design_notes": "Clean layout with vibrant orange accents and data visualization elements.",
    }));
    GraphicRecord::build(
        &payload,
        &GraphicRequest::new("AI Marketing Dashboard Infographic"),
        SAMPLE_IMAGE.to_string(),
    )
}
