//! Dashboard summary
//!
//! A read-only snapshot of the session: per-workflow counts, the average SEO
//! score, and the most recent content and graphics. With
//! [`StudioConfig::show_sample`] set, an empty history is summarized as if it
//! held one sample record.

use crate::coordinator::WorkflowCoordinator;
use crate::history::History;
use crate::records::{ContentRecord, GraphicRecord, Record, SeoAuditRecord};
use crate::samples::{sample_content, sample_graphic, sample_seo_audit};
use crate::types::{AgentKind, StudioConfig};
use serde::Serialize;

/// Snapshot shown on the dashboard view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    /// Content pieces
    pub content_count: usize,
    /// SEO audits
    pub seo_count: usize,
    /// Graphics created
    pub graphics_count: usize,
    /// Rounded mean of raw SEO scores, 0 with no audits
    pub average_seo_score: i64,
    /// Most recent content, newest first
    pub recent_content: Vec<ContentRecord>,
    /// Most recent graphics, newest first
    pub recent_graphics: Vec<GraphicRecord>,
    /// Agent currently outstanding
    pub active_agent: Option<AgentKind>,
    /// Whether any list was filled with sample data
    pub showing_sample: bool,
}

impl DashboardSummary {
    /// Summarize coordinator state
    #[must_use]
    pub fn from_state(state: &WorkflowCoordinator, config: &StudioConfig) -> Self {
        let sample = config.show_sample;
        let content = displayed(state.content_history(), sample, sample_content);
        let seo = displayed(state.seo_history(), sample, sample_seo_audit);
        let graphics = displayed(state.graphics_history(), sample, sample_graphic);

        let scores: Vec<i64> = seo.iter().map(|audit| audit.overall_score).collect();
        let showing_sample = sample
            && (state.content_history().is_empty()
                || state.seo_history().is_empty()
                || state.graphics_history().is_empty());

        Self {
            content_count: content.len(),
            seo_count: seo.len(),
            graphics_count: graphics.len(),
            average_seo_score: rounded_mean(&scores),
            recent_content: content
                .into_iter()
                .take(config.recent_content_limit)
                .collect(),
            recent_graphics: graphics
                .into_iter()
                .take(config.recent_graphics_limit)
                .collect(),
            active_agent: state.active_agent(),
            showing_sample,
        }
    }
}

fn displayed<R: Record>(history: &History<R>, sample: bool, make: fn() -> R) -> Vec<R> {
    if sample && history.is_empty() {
        vec![make()]
    } else {
        history.iter().cloned().collect()
    }
}

/// Mean rounded half up, 0 for no values
///
/// Accumulates in `i128` so any mix of `i64` scores is summed exactly.
fn rounded_mean(values: &[i64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    let Ok(n) = i128::try_from(values.len()) else {
        return 0;
    };
    let sum: i128 = values.iter().copied().map(i128::from).sum();
    let mean = (2 * sum + n).div_euclid(2 * n);
    i64::try_from(mean).unwrap_or(if mean < 0 { i64::MIN } else { i64::MAX })
}
