//! Header-to-field detection.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use optik_model::{
    CanonicalField, ColumnMapping, ExamConfig, FieldAlias, RawTable, ValidationWarning,
};
use optik_normalization::{clean, fold_diacritics, to_lower_tr, to_upper_tr};
use tracing::{debug, warn};

use crate::inference::infer_exam_type;
use crate::similarity::similarity;
use crate::types::{Alternative, DetectionResult, FieldDetection};

/// Tunables for [`ColumnDetector`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Minimum similarity for a header to be listed as an alternative.
    pub alternative_floor: f64,
    pub max_alternatives: usize,
    /// Resolved matches below this similarity get an informational note.
    pub review_below: f64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            alternative_floor: 0.30,
            max_alternatives: 3,
            review_below: 0.90,
        }
    }
}

/// Resolves spreadsheet headers to canonical fields.
///
/// Every header is scored against every alias of every field. Assignment is
/// greedy and one-to-one: the highest-scoring (field, header) pair above the
/// field's threshold wins, then the next pair whose field and header are both
/// still free, and so on. Ties are never broken for the caller: such a field
/// stays unmapped with the tied headers offered as alternatives.
#[derive(Debug, Clone)]
pub struct ColumnDetector {
    aliases: Vec<FieldAlias>,
    profiles: Vec<ExamConfig>,
    config: DetectorConfig,
}

struct Candidate {
    field_idx: usize,
    header_idx: usize,
    score: f64,
}

/// Outcome of the greedy pass.
#[derive(Default)]
struct Assignment {
    /// Field index to header index.
    matched: BTreeMap<usize, usize>,
    /// Fields whose best free headers tied, with every tied header index.
    tied: BTreeMap<usize, Vec<usize>>,
}

impl ColumnDetector {
    pub fn new(aliases: Vec<FieldAlias>) -> Self {
        Self {
            aliases,
            profiles: Vec::new(),
            config: DetectorConfig::default(),
        }
    }

    /// Exam profiles used to guess the exam type of detected sheets.
    #[must_use]
    pub fn with_profiles(mut self, profiles: Vec<ExamConfig>) -> Self {
        self.profiles = profiles;
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: DetectorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn aliases(&self) -> &[FieldAlias] {
        &self.aliases
    }

    /// Best similarity between `header` and any spelling of `alias`.
    ///
    /// Both the spaced form and the space-less form are compared, so
    /// `"SoruNo"` matches `"Soru No"` exactly.
    pub fn score_header(&self, alias: &FieldAlias, header: &str) -> f64 {
        let header_key = comparison_key(header, alias);
        let header_compact = compact(&header_key);
        alias
            .aliases
            .iter()
            .map(|spelling| {
                let alias_key = comparison_key(spelling, alias);
                let spaced = similarity(&header_key, &alias_key);
                let squeezed = similarity(&header_compact, &compact(&alias_key));
                spaced.max(squeezed)
            })
            .fold(0.0, f64::max)
    }

    /// Detects columns from headers alone.
    pub fn detect_headers(&self, headers: &[String]) -> DetectionResult {
        self.detect_inner(headers, None)
    }

    /// Detects columns and profiles the data rows: the subject distribution
    /// and the exam-type guess need row content.
    pub fn detect(&self, table: &RawTable) -> DetectionResult {
        self.detect_inner(&table.headers, Some(table))
    }

    fn detect_inner(&self, headers: &[String], table: Option<&RawTable>) -> DetectionResult {
        let scores: Vec<Vec<f64>> = self
            .aliases
            .iter()
            .map(|alias| {
                headers
                    .iter()
                    .map(|header| self.score_header(alias, header))
                    .collect()
            })
            .collect();

        let assignment = self.assign(&scores);
        let mut mapping = ColumnMapping::new();
        let mut fields = Vec::with_capacity(self.aliases.len());
        let mut warnings = Vec::new();

        for (field_idx, alias) in self.aliases.iter().enumerate() {
            let matched = assignment.matched.get(&field_idx).copied();
            let tied = assignment
                .tied
                .get(&field_idx)
                .map_or(&[][..], Vec::as_slice);
            let alternatives = self.alternatives(headers, &scores[field_idx], matched, tied);
            if !tied.is_empty() {
                warn!(field = %alias.field, candidates = tied.len(), "ambiguous column match");
                warnings.push(ambiguity_warning(alias, headers, tied));
            }
            let best_score = matched.map_or(0.0, |header_idx| scores[field_idx][header_idx]);
            let confidence = to_confidence(best_score);
            let header = matched.map(|header_idx| headers[header_idx].clone());

            match &header {
                Some(header) => {
                    mapping.insert(alias.field, header.clone());
                    debug!(field = %alias.field, header = %header, confidence, "column resolved");
                    if best_score < self.config.review_below {
                        warnings.push(
                            ValidationWarning::info(format!(
                                "Column '{header}' matched field '{}' with {confidence}% confidence",
                                alias.field
                            ))
                            .in_column(header.clone())
                            .with_suggestion("confirm the column before importing"),
                        );
                    }
                }
                None if alias.required => {
                    let mut warning = ValidationWarning::error(format!(
                        "Required column for field '{}' not found",
                        alias.field
                    ));
                    if let Some(hint) = describe_alternatives(&alternatives) {
                        warning = warning.with_suggestion(format!("closest headers: {hint}"));
                    }
                    warnings.push(warning);
                }
                None => {}
            }

            fields.push(FieldDetection {
                field: alias.field,
                required: alias.required,
                header,
                confidence,
                alternatives,
            });
        }

        let claimed: BTreeSet<usize> = assignment.matched.values().copied().collect();
        let unmapped_headers = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| !claimed.contains(idx))
            .map(|(_, header)| header.clone())
            .collect();

        let subject_distribution = table
            .map(|table| subject_distribution(table, &mapping))
            .unwrap_or_default();
        let exam_type = infer_exam_type(&mapping, &subject_distribution, &self.profiles);

        debug!(
            resolved = mapping.len(),
            fields = self.aliases.len(),
            "column detection finished"
        );

        DetectionResult {
            fields,
            mapping,
            unmapped_headers,
            exam_type,
            subject_distribution,
            warnings,
        }
    }

    /// Greedy one-to-one assignment.
    ///
    /// A field whose top score is shared by several free headers is left
    /// unassigned and its headers stay free; the caller picks one.
    fn assign(&self, scores: &[Vec<f64>]) -> Assignment {
        let mut candidates: Vec<Candidate> = Vec::new();
        for (field_idx, row) in scores.iter().enumerate() {
            let threshold = self.aliases[field_idx].threshold;
            for (header_idx, score) in row.iter().enumerate() {
                if *score >= threshold {
                    candidates.push(Candidate {
                        field_idx,
                        header_idx,
                        score: *score,
                    });
                }
            }
        }

        // Stable sort keeps configuration order then header order among equal scores.
        candidates.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        let mut assignment = Assignment::default();
        let mut taken_headers = BTreeSet::new();
        for candidate in &candidates {
            if assignment.matched.contains_key(&candidate.field_idx)
                || assignment.tied.contains_key(&candidate.field_idx)
                || taken_headers.contains(&candidate.header_idx)
            {
                continue;
            }
            let tied: Vec<usize> = scores[candidate.field_idx]
                .iter()
                .enumerate()
                .filter(|(idx, score)| **score == candidate.score && !taken_headers.contains(idx))
                .map(|(idx, _)| idx)
                .collect();
            if tied.len() > 1 {
                assignment.tied.insert(candidate.field_idx, tied);
                continue;
            }
            taken_headers.insert(candidate.header_idx);
            assignment.matched.insert(candidate.field_idx, candidate.header_idx);
        }
        assignment
    }

    /// Headers worth offering for a field, best first. Tied headers are
    /// always listed, even past the cap.
    fn alternatives(
        &self,
        headers: &[String],
        scores: &[f64],
        matched: Option<usize>,
        tied: &[usize],
    ) -> Vec<Alternative> {
        let mut ranked: Vec<(usize, f64)> = scores
            .iter()
            .copied()
            .enumerate()
            .filter(|(idx, score)| {
                Some(*idx) != matched
                    && (*score >= self.config.alternative_floor || tied.contains(idx))
            })
            .collect();
        ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
        ranked
            .into_iter()
            .take(self.config.max_alternatives.max(tied.len()))
            .map(|(idx, score)| Alternative {
                header: headers[idx].clone(),
                confidence: to_confidence(score),
            })
            .collect()
    }
}

/// Normalizes text for comparison: separators become spaces, then case and
/// diacritics are folded as the alias asks.
fn comparison_key(raw: &str, alias: &FieldAlias) -> String {
    let spaced = clean(&raw.replace(['_', '-', '.', '/', '\\', ':'], " "));
    let cased = if alias.case_sensitive {
        spaced
    } else if alias.locale_sensitive {
        to_lower_tr(&spaced)
    } else {
        spaced.to_lowercase()
    };
    if alias.locale_sensitive {
        fold_diacritics(&cased)
    } else {
        cased
    }
}

fn compact(key: &str) -> String {
    key.chars().filter(|c| !c.is_whitespace()).collect()
}

fn to_confidence(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}

/// Several headers tying for a field's top score above threshold.
fn ambiguity_warning(alias: &FieldAlias, headers: &[String], tied: &[usize]) -> ValidationWarning {
    let names = tied
        .iter()
        .map(|idx| format!("'{}'", headers[*idx]))
        .collect::<Vec<_>>()
        .join(", ");
    let mut warning = ValidationWarning::warning(format!(
        "Field '{}' matches {names} equally well; left unmapped",
        alias.field
    ))
    .with_suggestion("rename one of the columns or choose the mapping explicitly");
    if let Some(first) = tied.first() {
        warning = warning.in_column(headers[*first].clone());
    }
    warning
}

fn describe_alternatives(alternatives: &[Alternative]) -> Option<String> {
    if alternatives.is_empty() {
        return None;
    }
    Some(
        alternatives
            .iter()
            .map(|alt| format!("'{}' ({}%)", alt.header, alt.confidence))
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn subject_distribution(table: &RawTable, mapping: &ColumnMapping) -> BTreeMap<String, usize> {
    let mut distribution = BTreeMap::new();
    if !mapping.contains(CanonicalField::Subject) {
        return distribution;
    }
    for row in &table.rows {
        if let Some(subject) = mapping.value(row, CanonicalField::Subject) {
            *distribution.entry(to_upper_tr(&clean(subject))).or_insert(0) += 1;
        }
    }
    distribution
}
