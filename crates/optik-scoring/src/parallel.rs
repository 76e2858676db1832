//! Data-parallel scoring of a cohort.

use optik_model::{StudentAnswerAnalysis, StudentSheet};
use rayon::prelude::*;
use tracing::debug;

use crate::cohort::CohortAccumulator;
use crate::engine::NetScoringEngine;

/// Scored students in input order plus their merged running sums.
#[derive(Debug, Clone, Default)]
pub struct ScoredCohort {
    pub students: Vec<StudentAnswerAnalysis>,
    pub accumulator: CohortAccumulator,
}

impl ScoredCohort {
    /// Appends a later batch, keeping input order.
    pub fn extend(&mut self, other: Self) {
        self.students.extend(other.students);
        self.accumulator = std::mem::take(&mut self.accumulator).merge(other.accumulator);
    }
}

/// Scores every sheet in parallel.
///
/// `to_base` converts a sheet's answers into base-booklet numbering; the
/// first error it returns aborts the batch. Output order matches `sheets`.
pub fn score_cohort<F, E>(
    engine: &NetScoringEngine<'_>,
    sheets: &[StudentSheet],
    to_base: F,
) -> Result<ScoredCohort, E>
where
    F: Fn(&StudentSheet) -> Result<String, E> + Sync,
    E: Send,
{
    let students = sheets
        .par_iter()
        .map(|sheet| to_base(sheet).map(|canonical| engine.analyze(sheet, canonical)))
        .collect::<Result<Vec<_>, E>>()?;

    let accumulator = students
        .par_chunks(256)
        .map(|chunk| chunk.iter().collect::<CohortAccumulator>())
        .reduce(CohortAccumulator::new, CohortAccumulator::merge);

    debug!(students = students.len(), "batch scored");
    Ok(ScoredCohort {
        students,
        accumulator,
    })
}

#[cfg(test)]
mod tests {
    use optik_model::{
        AnswerKey, BookletId, ExamConfig, PenaltyDivisor, SubjectBoundary, SubjectLayout,
    };

    use super::*;
    use crate::cohort::compute_statistics;

    fn config() -> ExamConfig {
        let layout =
            SubjectLayout::new(vec![SubjectBoundary::new("MAT", "Matematik", 1, 4)], 4).unwrap();
        ExamConfig::new(
            "DEN",
            "Deneme",
            layout,
            PenaltyDivisor::parse("4").unwrap(),
            vec![BookletId::A, BookletId::B],
            BookletId::A,
        )
        .unwrap()
    }

    #[test]
    fn test_parallel_keeps_input_order() {
        let config = config();
        let key = AnswerKey::from_letters("ABCD");
        let engine = NetScoringEngine::new(&config, &key).unwrap();
        let sheets: Vec<StudentSheet> = (0..1000)
            .map(|idx| {
                let answers = if idx % 2 == 0 { "ABCD" } else { "DCBA" };
                StudentSheet::new(idx.to_string(), "", BookletId::A, answers)
            })
            .collect();

        let scored =
            score_cohort(&engine, &sheets, |sheet| Ok::<_, ()>(sheet.answers.clone())).unwrap();
        let ids: Vec<String> = scored.students.iter().map(|s| s.student_id.clone()).collect();
        let expected: Vec<String> = (0..1000).map(|idx: i32| idx.to_string()).collect();
        assert_eq!(ids, expected);
        assert_eq!(scored.accumulator.count(), 1000);

        let stats = compute_statistics(&scored.students);
        assert_eq!(stats.mean, scored.accumulator.mean());
        assert_eq!(stats.highest.unwrap().student_id, "0");
        assert_eq!(stats.lowest.unwrap().student_id, "1");
    }

    #[test]
    fn test_conversion_error_aborts() {
        let config = config();
        let key = AnswerKey::from_letters("ABCD");
        let engine = NetScoringEngine::new(&config, &key).unwrap();
        let sheets = vec![StudentSheet::new("1", "", BookletId::B, "ABCD")];
        let err = score_cohort(&engine, &sheets, |sheet| {
            if sheet.booklet == BookletId::B {
                Err("no rotation")
            } else {
                Ok(sheet.answers.clone())
            }
        })
        .unwrap_err();
        assert_eq!(err, "no rotation");
    }
}
