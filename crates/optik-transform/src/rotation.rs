//! Question-number permutations between booklets.

use optik_model::{BookletId, SubjectLayout};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TransformError};

/// Bijective question mapping between the base booklet and one rotated
/// booklet.
///
/// Every question maps to a question of the same subject block. All
/// constructors check this, so a built rotation can be applied without
/// further validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookletRotation {
    base: BookletId,
    target: BookletId,
    /// `to_base[t - 1]` is the base question printed as `t` in the target booklet.
    to_base: Vec<u32>,
    /// `from_base[b - 1]` is the target question showing base question `b`.
    from_base: Vec<u32>,
}

impl BookletRotation {
    /// Rotation that maps every question to itself.
    pub fn identity(base: BookletId, target: BookletId, total: u32) -> Self {
        Self::from_to_base(base, target, (1..=total).collect())
    }

    /// Mirror rotation over one layout: within each subject block
    /// `[start, end]`, target question `start + i` is base question `end - i`.
    pub fn mirror(layout: &SubjectLayout, base: BookletId, target: BookletId) -> Self {
        let mut to_base = vec![0; layout.total_questions() as usize];
        for subject in layout.subjects() {
            for offset in 0..subject.len() {
                to_base[(subject.start + offset - 1) as usize] = subject.end - offset;
            }
        }
        Self::from_to_base(base, target, to_base)
    }

    /// Mirror rotation between two layouts whose subject blocks sit at
    /// different positions. Blocks are paired by subject code and must have
    /// equal sizes.
    pub fn mirror_between(
        base_layout: &SubjectLayout,
        target_layout: &SubjectLayout,
        base: BookletId,
        target: BookletId,
    ) -> Result<Self> {
        let total = base_layout.total_questions();
        if total != target_layout.total_questions() {
            return Err(TransformError::TotalMismatch {
                base: total,
                target: target_layout.total_questions(),
            });
        }
        if let Some(extra) = target_layout
            .subjects()
            .iter()
            .find(|subject| base_layout.find(&subject.code).is_none())
        {
            return Err(TransformError::SubjectMissing {
                subject: extra.code.clone(),
            });
        }

        let mut to_base = vec![0; total as usize];
        for base_block in base_layout.subjects() {
            let target_block = target_layout.find(&base_block.code).ok_or_else(|| {
                TransformError::SubjectMissing {
                    subject: base_block.code.clone(),
                }
            })?;
            if base_block.len() != target_block.len() {
                return Err(TransformError::BlockSizeMismatch {
                    subject: base_block.code.clone(),
                    base_len: base_block.len(),
                    target_len: target_block.len(),
                });
            }
            for offset in 0..base_block.len() {
                to_base[(target_block.start + offset - 1) as usize] = base_block.end - offset;
            }
        }
        Ok(Self::from_to_base(base, target, to_base))
    }

    /// Rotation from explicit `(target question, base question)` pairs.
    ///
    /// Pairs must stay inside one subject block and may not reuse a
    /// question on either side. Within each block, target questions without
    /// a pair take the remaining base questions in mirror order (ascending
    /// targets to descending bases), which is the plain mirror rule when no
    /// pairs are given.
    pub fn from_pairs<I>(
        layout: &SubjectLayout,
        base: BookletId,
        target: BookletId,
        pairs: I,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        let total = layout.total_questions();
        let mut to_base: Vec<Option<u32>> = vec![None; total as usize];
        let mut base_used = vec![false; total as usize];

        for (target_q, base_q) in pairs {
            for question in [target_q, base_q] {
                if question == 0 || question > total {
                    return Err(TransformError::QuestionOutOfRange { question, total });
                }
            }
            let same_block = match (layout.subject_for(target_q), layout.subject_for(base_q)) {
                (Some(a), Some(b)) => a.code == b.code,
                _ => false,
            };
            if !same_block {
                return Err(TransformError::CrossesSubject {
                    booklet: target,
                    target: target_q,
                    base: base_q,
                });
            }
            let slot = &mut to_base[(target_q - 1) as usize];
            if slot.is_some() {
                return Err(TransformError::NotBijective {
                    booklet: target,
                    question: target_q,
                });
            }
            if base_used[(base_q - 1) as usize] {
                return Err(TransformError::NotBijective {
                    booklet: base,
                    question: base_q,
                });
            }
            *slot = Some(base_q);
            base_used[(base_q - 1) as usize] = true;
        }

        let explicit = to_base.iter().filter(|slot| slot.is_some()).count();
        for subject in layout.subjects() {
            let mut free_base = (subject.start..=subject.end)
                .rev()
                .filter(|base_q| !base_used[(base_q - 1) as usize]);
            for target_q in subject.start..=subject.end {
                let slot = &mut to_base[(target_q - 1) as usize];
                if slot.is_none() {
                    // Pairs stay inside the block, so free counts on both sides agree.
                    *slot = free_base.next();
                }
            }
        }
        debug!(
            %base,
            %target,
            explicit,
            total,
            "rotation built from explicit pairs"
        );

        Ok(Self::from_to_base(
            base,
            target,
            to_base.into_iter().flatten().collect(),
        ))
    }

    fn from_to_base(base: BookletId, target: BookletId, to_base: Vec<u32>) -> Self {
        let mut from_base = vec![0; to_base.len()];
        for (idx, base_q) in to_base.iter().enumerate() {
            from_base[(*base_q - 1) as usize] = idx as u32 + 1;
        }
        Self {
            base,
            target,
            to_base,
            from_base,
        }
    }

    pub fn base(&self) -> BookletId {
        self.base
    }

    pub fn target(&self) -> BookletId {
        self.target
    }

    pub fn total(&self) -> u32 {
        self.to_base.len() as u32
    }

    /// Base question shown as `question` in the target booklet.
    pub fn to_base(&self, question: u32) -> Option<u32> {
        let idx = question.checked_sub(1)? as usize;
        self.to_base.get(idx).copied()
    }

    /// Target question showing base question `question`.
    pub fn from_base(&self, question: u32) -> Option<u32> {
        let idx = question.checked_sub(1)? as usize;
        self.from_base.get(idx).copied()
    }

    /// `(target question, base question)` pairs in target order.
    pub fn pairs(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.to_base
            .iter()
            .enumerate()
            .map(|(idx, base_q)| (idx as u32 + 1, *base_q))
    }

    /// True when every question maps to itself.
    pub fn is_identity(&self) -> bool {
        self.pairs().all(|(target_q, base_q)| target_q == base_q)
    }
}
