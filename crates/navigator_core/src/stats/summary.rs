//! Session summary statistics.
//!
//! # Responsibility
//! - Count points per score and per domain, including zero buckets.
//! - Compute the rounded mean and the on-target / off-course split.
//!
//! # Invariants
//! - Empty input yields an all-zero summary, never an error.
//! - `on_target + off_course == total`.

use crate::model::domain::Domain;
use crate::model::score::Score;
use crate::model::value_point::ValuePoint;
use serde::Serialize;

/// Number of points holding one score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCount {
    pub score: Score,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DomainCount {
    pub domain: Domain,
    pub count: usize,
}

/// Aggregate view of one set of value points.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub total: usize,
    /// One bucket per score, best first.
    pub score_counts: Vec<ScoreCount>,
    /// One bucket per domain, in `Domain::ALL` order.
    pub domain_counts: Vec<DomainCount>,
    /// Mean score rounded to one decimal; `0.0` when empty.
    pub average: f64,
    pub on_target: usize,
    pub off_course: usize,
}

impl SessionSummary {
    pub fn count_for_score(&self, score: Score) -> usize {
        self.score_counts
            .iter()
            .find(|bucket| bucket.score == score)
            .map_or(0, |bucket| bucket.count)
    }

    pub fn count_for_domain(&self, domain: Domain) -> usize {
        self.domain_counts
            .iter()
            .find(|bucket| bucket.domain == domain)
            .map_or(0, |bucket| bucket.count)
    }
}

/// Points and statistics of one domain within a session.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainSummary {
    pub domain: Domain,
    pub points: Vec<ValuePoint>,
    pub summary: SessionSummary,
}

/// Summarizes a set of points.
pub fn summarize<'a, I>(points: I) -> SessionSummary
where
    I: IntoIterator<Item = &'a ValuePoint>,
{
    let mut score_counts: Vec<ScoreCount> = Score::all()
        .map(|score| ScoreCount { score, count: 0 })
        .collect();
    let mut domain_counts: Vec<DomainCount> = Domain::ALL
        .into_iter()
        .map(|domain| DomainCount { domain, count: 0 })
        .collect();

    let mut total = 0usize;
    let mut score_sum = 0u64;
    let mut on_target = 0usize;

    for point in points {
        total += 1;
        score_sum += u64::from(point.score.value());
        if point.score.is_on_target() {
            on_target += 1;
        }
        if let Some(bucket) = score_counts
            .iter_mut()
            .find(|bucket| bucket.score == point.score)
        {
            bucket.count += 1;
        }
        domain_counts[point.domain.index()].count += 1;
    }

    SessionSummary {
        total,
        score_counts,
        domain_counts,
        average: rounded_mean(score_sum, total),
        on_target,
        off_course: total - on_target,
    }
}

/// Splits points by domain and summarizes each group.
///
/// Always returns one group per domain, in `Domain::ALL` order, so empty
/// domains still render.
pub fn summarize_by_domain(points: &[ValuePoint]) -> Vec<DomainSummary> {
    Domain::ALL
        .into_iter()
        .map(|domain| {
            let grouped: Vec<ValuePoint> = points
                .iter()
                .filter(|point| point.domain == domain)
                .cloned()
                .collect();
            let summary = summarize(&grouped);
            DomainSummary {
                domain,
                points: grouped,
                summary,
            }
        })
        .collect()
}

pub(crate) fn rounded_mean(sum: u64, count: usize) -> f64 {
    if count == 0 {
        return 0.0;
    }
    let mean = sum as f64 / count as f64;
    (mean * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::rounded_mean;

    #[test]
    fn rounded_mean_keeps_one_decimal() {
        assert_eq!(rounded_mean(11, 3), 3.7);
        assert_eq!(rounded_mean(9, 2), 4.5);
        assert_eq!(rounded_mean(0, 0), 0.0);
    }
}
