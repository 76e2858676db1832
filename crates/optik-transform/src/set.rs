//! All rotations of one exam, keyed by booklet.

use std::collections::BTreeMap;

use optik_model::{AnswerKey, BookletId, ExamConfig};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::convert::{convert_answer_key_to_booklet, convert_to_base_booklet};
use crate::error::{Result, TransformError};
use crate::rotation::BookletRotation;

/// One [`BookletRotation`] per non-base booklet of an exam.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSet {
    base: BookletId,
    total: u32,
    rotations: BTreeMap<BookletId, BookletRotation>,
}

impl RotationSet {
    /// Mirror rotations for every booklet of `config`.
    pub fn mirror(config: &ExamConfig) -> Self {
        let rotations = config
            .booklets
            .iter()
            .filter(|booklet| **booklet != config.base_booklet)
            .map(|booklet| {
                (
                    *booklet,
                    BookletRotation::mirror(&config.layout, config.base_booklet, *booklet),
                )
            })
            .collect();
        Self {
            base: config.base_booklet,
            total: config.total_questions(),
            rotations,
        }
    }

    /// Rotations read from a base-booklet answer key's per-booklet
    /// question numbers.
    ///
    /// Booklets the key carries no numbers for use the mirror rule.
    pub fn from_answer_key(config: &ExamConfig, key: &AnswerKey) -> Result<Self> {
        let base = config.base_booklet;
        let mut rotations = BTreeMap::new();
        for booklet in config.booklets.iter().copied().filter(|b| *b != base) {
            let pairs: Vec<(u32, u32)> = key
                .entries()
                .iter()
                .filter_map(|entry| {
                    entry
                        .booklet_questions
                        .get(&booklet)
                        .map(|target_q| (*target_q, entry.question))
                })
                .collect();
            let rotation = if pairs.is_empty() {
                debug!(%booklet, "no explicit numbers, using mirror rotation");
                BookletRotation::mirror(&config.layout, base, booklet)
            } else {
                BookletRotation::from_pairs(&config.layout, base, booklet, pairs)?
            };
            rotations.insert(booklet, rotation);
        }
        info!(
            exam = %config.code,
            booklets = rotations.len(),
            "booklet rotations ready"
        );
        Ok(Self {
            base,
            total: config.total_questions(),
            rotations,
        })
    }

    pub fn base(&self) -> BookletId {
        self.base
    }

    /// Rotation for `booklet`; `None` for the base booklet and unknown ones.
    pub fn get(&self, booklet: BookletId) -> Option<&BookletRotation> {
        self.rotations.get(&booklet)
    }

    pub fn booklets(&self) -> impl Iterator<Item = BookletId> + '_ {
        std::iter::once(self.base).chain(self.rotations.keys().copied())
    }

    fn rotation_for(&self, booklet: BookletId) -> Result<&BookletRotation> {
        self.rotations
            .get(&booklet)
            .ok_or(TransformError::BookletNotCovered {
                booklet,
                base: self.base,
                target: booklet,
            })
    }

    /// Answers of a `booklet` sheet in base numbering.
    pub fn to_base(&self, answers: &str, booklet: BookletId) -> Result<String> {
        if booklet == self.base {
            let identity = BookletRotation::identity(self.base, self.base, self.total);
            return convert_to_base_booklet(answers, booklet, &identity);
        }
        convert_to_base_booklet(answers, booklet, self.rotation_for(booklet)?)
    }

    /// The base-booklet `key` in `booklet` numbering.
    pub fn key_for(&self, key: &AnswerKey, booklet: BookletId) -> Result<AnswerKey> {
        if booklet == self.base {
            let identity = BookletRotation::identity(self.base, self.base, self.total);
            return convert_answer_key_to_booklet(key, booklet, &identity);
        }
        convert_answer_key_to_booklet(key, booklet, self.rotation_for(booklet)?)
    }
}
