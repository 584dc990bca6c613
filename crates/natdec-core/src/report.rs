//! Batch report over several parsed documents.

use std::fmt::Display;

use serde::Serialize;

use crate::decree::ParsedDocument;
use crate::models::config::StatsConfig;
use crate::models::decree::ParsedDecree;
use crate::stats::{decrees_stats, DecreesStats};

/// A document that parsed.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentReport {
    pub name: String,
    pub decrees: Vec<ParsedDecree>,
    pub warning_count: usize,
}

/// A document that failed, with the reason.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedDocument {
    pub name: String,
    pub error: String,
}

/// Report built from the documents that parsed; failures are only listed.
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub documents: Vec<DocumentReport>,
    pub failed: Vec<FailedDocument>,
    pub stats: DecreesStats,
}

impl BatchReport {
    /// Build the report from named per-document results, keeping their order.
    pub fn build<E, I>(results: I, config: &StatsConfig) -> Self
    where
        E: Display,
        I: IntoIterator<Item = (String, Result<ParsedDocument, E>)>,
    {
        let mut documents = Vec::new();
        let mut failed = Vec::new();

        for (name, result) in results {
            match result {
                Ok(document) => documents.push(DocumentReport {
                    name,
                    warning_count: document.warnings.len(),
                    decrees: document.decrees,
                }),
                Err(e) => failed.push(FailedDocument {
                    name,
                    error: e.to_string(),
                }),
            }
        }

        let decrees: Vec<ParsedDecree> = documents
            .iter()
            .flat_map(|d| d.decrees.iter().cloned())
            .collect();
        let stats = decrees_stats(&decrees, config);

        Self {
            documents,
            failed,
            stats,
        }
    }

    /// Every document failed: there is nothing to report.
    pub fn is_total_failure(&self) -> bool {
        self.documents.is_empty() && !self.failed.is_empty()
    }

    pub fn failed_names(&self) -> Vec<&str> {
        self.failed.iter().map(|f| f.name.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decree::{DecreeParser, DocumentParser};
    use crate::decree::rules::patterns::DECREE_PURPOSE;
    use crate::error::ExtractionError;

    fn document() -> ParsedDocument {
        let text = format!(
            "Décret du 12 mars 2021 {} ABADIE (Marie), née le 03/04/1985 à Dakar (Sénégal), NAT, 2020X 012345, dép. 075, Dt. 053/21. Fait le",
            DECREE_PURPOSE
        );
        DecreeParser::new()
            .with_summary_stripping(false)
            .parse(&text)
            .unwrap()
    }

    #[test]
    fn test_build_lists_failures() {
        let results = vec![
            ("a.pdf".to_string(), Ok(document())),
            ("b.pdf".to_string(), Err(ExtractionError::NoEntriesMarker)),
        ];
        let report = BatchReport::build(results, &StatsConfig::default());

        assert!(!report.is_total_failure());
        assert_eq!(report.documents.len(), 1);
        assert_eq!(report.failed_names(), vec!["b.pdf"]);
        assert_eq!(report.stats.totals.naturalizations_count, 1);
    }

    #[test]
    fn test_all_failed() {
        let results: Vec<(String, Result<ParsedDocument, ExtractionError>)> = vec![
            ("a.pdf".to_string(), Err(ExtractionError::NoEntriesFound)),
            ("b.pdf".to_string(), Err(ExtractionError::NoEntriesMarker)),
        ];
        let report = BatchReport::build(results, &StatsConfig::default());
        assert!(report.is_total_failure());
        assert_eq!(report.failed[0].error, "no entries found in the decree text");
    }

    #[test]
    fn test_empty_batch_is_not_a_failure() {
        let results: Vec<(String, Result<ParsedDocument, ExtractionError>)> = Vec::new();
        assert!(!BatchReport::build(results, &StatsConfig::default()).is_total_failure());
    }
}
