//! Ranking and cohort statistics.
//!
//! Ordering is always descending net, then input position, so results do
//! not depend on how scoring work was scheduled.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use optik_model::{CohortStatistics, RankedStudent, Rational, StudentAnswerAnalysis};

/// Associative running sums over scored students.
///
/// Partial accumulators built on separate threads can be merged in any
/// order; the median is not accumulated and is computed once by
/// [`compute_statistics`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CohortAccumulator {
    count: usize,
    net_sum: Rational,
    subject_sums: BTreeMap<String, (Rational, usize)>,
}

impl CohortAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, student: &StudentAnswerAnalysis) {
        self.count += 1;
        self.net_sum += student.net();
        for (code, tally) in &student.result.subjects {
            let slot = self
                .subject_sums
                .entry(code.clone())
                .or_insert((Rational::ZERO, 0));
            slot.0 += tally.net;
            slot.1 += 1;
        }
    }

    pub fn merge(mut self, other: Self) -> Self {
        self.count += other.count;
        self.net_sum += other.net_sum;
        for (code, (sum, count)) in other.subject_sums {
            let slot = self.subject_sums.entry(code).or_insert((Rational::ZERO, 0));
            slot.0 += sum;
            slot.1 += count;
        }
        self
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn mean(&self) -> Rational {
        self.net_sum
            .div_int(self.count as i64)
            .unwrap_or(Rational::ZERO)
    }

    pub fn subject_averages(&self) -> BTreeMap<String, Rational> {
        self.subject_sums
            .iter()
            .filter_map(|(code, (sum, count))| {
                sum.div_int(*count as i64).map(|mean| (code.clone(), mean))
            })
            .collect()
    }
}

impl<'a> FromIterator<&'a StudentAnswerAnalysis> for CohortAccumulator {
    fn from_iter<I: IntoIterator<Item = &'a StudentAnswerAnalysis>>(iter: I) -> Self {
        let mut acc = Self::new();
        for student in iter {
            acc.push(student);
        }
        acc
    }
}

/// Input positions sorted by descending net; ties keep input order.
pub fn ranking_order(students: &[StudentAnswerAnalysis]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..students.len()).collect();
    order.sort_by_key(|idx| Reverse(students[*idx].net()));
    order
}

/// Competition ranking (1, 2, 2, 4) in [`ranking_order`].
pub fn rank_students(students: &[StudentAnswerAnalysis]) -> Vec<RankedStudent> {
    let order = ranking_order(students);
    let mut ranked = Vec::with_capacity(order.len());
    let mut previous: Option<(Rational, u32)> = None;
    for (position, idx) in order.into_iter().enumerate() {
        let student = &students[idx];
        let net = student.net();
        let rank = match previous {
            Some((prev_net, prev_rank)) if prev_net == net => prev_rank,
            _ => position as u32 + 1,
        };
        previous = Some((net, rank));
        ranked.push(RankedStudent {
            rank,
            student_id: student.student_id.clone(),
            student_name: student.student_name.clone(),
            net,
        });
    }
    ranked
}

/// Mean, median, extremes and per-subject averages of a cohort.
///
/// The highest student is the first in ranking order. The lowest is the
/// earliest in input order among those sharing the minimum net.
pub fn compute_statistics(students: &[StudentAnswerAnalysis]) -> CohortStatistics {
    let acc: CohortAccumulator = students.iter().collect();
    statistics_from(students, &acc)
}

/// [`compute_statistics`] with sums already accumulated, e.g. by merging
/// per-thread accumulators.
pub fn statistics_from(
    students: &[StudentAnswerAnalysis],
    acc: &CohortAccumulator,
) -> CohortStatistics {
    if students.is_empty() {
        return CohortStatistics::default();
    }
    let ranked = rank_students(students);
    let highest = ranked.first().cloned();
    // The minimum tie group sits at the end of the ranking, in input order.
    let lowest = ranked
        .last()
        .and_then(|last| ranked.iter().find(|student| student.net == last.net))
        .cloned();

    CohortStatistics {
        student_count: acc.count(),
        mean: acc.mean(),
        median: median(students.iter().map(StudentAnswerAnalysis::net)),
        highest,
        lowest,
        subject_averages: acc.subject_averages(),
    }
}

/// Middle value; the mean of the two middle values for an even count.
pub fn median<I>(values: I) -> Rational
where
    I: IntoIterator<Item = Rational>,
{
    let mut values: Vec<Rational> = values.into_iter().collect();
    values.sort_unstable();
    let len = values.len();
    match len {
        0 => Rational::ZERO,
        _ if len % 2 == 1 => values[len / 2],
        _ => (values[len / 2 - 1] + values[len / 2])
            .div_int(2)
            .unwrap_or(Rational::ZERO),
    }
}

#[cfg(test)]
mod tests {
    use optik_model::{BookletId, NetCalculationResult, SubjectTally};

    use super::*;

    fn student(id: &str, net: i64) -> StudentAnswerAnalysis {
        let mut result = NetCalculationResult {
            net: Rational::from_integer(net),
            ..NetCalculationResult::default()
        };
        result.subjects.insert(
            "MAT".to_string(),
            SubjectTally {
                subject: "MAT".to_string(),
                net: Rational::from_integer(net),
                ..SubjectTally::default()
            },
        );
        StudentAnswerAnalysis {
            student_id: id.to_string(),
            student_name: format!("Öğrenci {id}"),
            class_name: None,
            booklet: BookletId::A,
            raw_answers: String::new(),
            canonical_answers: String::new(),
            result,
        }
    }

    fn cohort(nets: &[i64]) -> Vec<StudentAnswerAnalysis> {
        nets.iter()
            .enumerate()
            .map(|(idx, net)| student(&(idx + 1).to_string(), *net))
            .collect()
    }

    #[test]
    fn test_odd_cohort() {
        let stats = compute_statistics(&cohort(&[10, 20, 30]));
        assert_eq!(stats.student_count, 3);
        assert_eq!(stats.mean, Rational::from(20u32));
        assert_eq!(stats.median, Rational::from(20u32));
        assert_eq!(stats.highest.unwrap().student_id, "3");
        assert_eq!(stats.lowest.unwrap().student_id, "1");
        assert_eq!(stats.subject_averages["MAT"], Rational::from(20u32));
    }

    #[test]
    fn test_even_cohort_median_averages_middle() {
        let stats = compute_statistics(&cohort(&[10, 20, 30, 40]));
        assert_eq!(stats.median, Rational::from(25u32));
        let stats = compute_statistics(&cohort(&[1, 2]));
        assert_eq!(stats.median, Rational::new(3, 2).unwrap());
    }

    #[test]
    fn test_ties_resolve_by_input_order() {
        let stats = compute_statistics(&cohort(&[30, 10, 30, 10]));
        let highest = stats.highest.unwrap();
        assert_eq!((highest.student_id.as_str(), highest.rank), ("1", 1));
        let lowest = stats.lowest.unwrap();
        assert_eq!((lowest.student_id.as_str(), lowest.rank), ("2", 3));
    }

    #[test]
    fn test_competition_ranks() {
        let ranked = rank_students(&cohort(&[5, 9, 9, 1]));
        let view: Vec<(u32, &str)> = ranked
            .iter()
            .map(|student| (student.rank, student.student_id.as_str()))
            .collect();
        assert_eq!(view, vec![(1, "2"), (1, "3"), (3, "1"), (4, "4")]);
    }

    #[test]
    fn test_empty_cohort() {
        let stats = compute_statistics(&[]);
        assert_eq!(stats, CohortStatistics::default());
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let students = cohort(&[3, 7, 8, 1, 4]);
        let whole: CohortAccumulator = students.iter().collect();
        let left: CohortAccumulator = students[..2].iter().collect();
        let right: CohortAccumulator = students[2..].iter().collect();
        assert_eq!(right.merge(left), whole);
    }
}
