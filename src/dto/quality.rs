use crate::domain::evaluation::Evaluation;
use crate::dto::listing::ListPageData;
use crate::reporting::QualitySummary;

/// Evaluations table and the summary computed over the fetched rows.
#[derive(Clone, Debug, PartialEq)]
pub struct QualityPageData {
    pub list: ListPageData<Evaluation>,
    pub summary: QualitySummary,
}
