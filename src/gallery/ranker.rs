//! Related-content ranking.
//!
//! Scores every candidate against a focal item with a cheap, explainable
//! heuristic and returns the best matches:
//!
//! | Signal | Weight |
//! |--------|--------|
//! | Same category | 10 |
//! | Each distinct shared tag | 3 |
//! | Each distinct shared prompt word longer than 3 chars | 1 |

use std::collections::HashSet;

use serde::Serialize;

use crate::domain::ContentItem;

/// Number of related items shown next to a focal item
pub const DEFAULT_RELATED_LIMIT: usize = 8;

/// Maximum candidate pool handed to the ranker
pub const DEFAULT_CANDIDATE_POOL: usize = 100;

const CATEGORY_WEIGHT: u32 = 10;
const TAG_WEIGHT: u32 = 3;
const WORD_WEIGHT: u32 = 1;

/// Words of this length or shorter are ignored when comparing prompts
const MIN_WORD_LEN: usize = 3;

/// Score breakdown for one candidate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Score {
    pub category: u32,
    pub tags: u32,
    pub words: u32,
}

impl Score {
    pub fn total(&self) -> u32 {
        self.category + self.tags + self.words
    }
}

/// A candidate paired with its relevance score
#[derive(Debug, Clone, Serialize)]
pub struct RankedItem<'a> {
    pub item: &'a ContentItem,
    pub score: Score,
}

/// Lower-cased prompt words longer than `MIN_WORD_LEN` characters
fn prompt_words(prompt: &str) -> HashSet<String> {
    prompt
        .split_whitespace()
        .map(str::to_lowercase)
        .filter(|w| w.chars().count() > MIN_WORD_LEN)
        .collect()
}

/// Precomputed focal-side data so each candidate is scored in one pass
struct Focal<'a> {
    item: &'a ContentItem,
    tags: HashSet<&'a str>,
    words: HashSet<String>,
}

impl<'a> Focal<'a> {
    fn new(item: &'a ContentItem) -> Self {
        Self {
            item,
            tags: item.tags.iter().map(String::as_str).collect(),
            words: prompt_words(&item.prompt),
        }
    }

    fn score(&self, candidate: &ContentItem) -> Score {
        let category = if candidate.category == self.item.category {
            CATEGORY_WEIGHT
        } else {
            0
        };

        let shared_tags = candidate
            .tags
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .intersection(&self.tags)
            .count() as u32;

        // Repeated words in the candidate prompt count once
        let shared_words = prompt_words(&candidate.prompt)
            .iter()
            .filter(|w| self.words.contains(*w))
            .count() as u32;

        Score {
            category,
            tags: TAG_WEIGHT * shared_tags,
            words: WORD_WEIGHT * shared_words,
        }
    }
}

/// Score a single candidate against the focal item
pub fn score(focal: &ContentItem, candidate: &ContentItem) -> Score {
    Focal::new(focal).score(candidate)
}

/// Rank candidates by relevance to `focal`, keeping at most `limit`.
///
/// The focal item is skipped if it appears among the candidates. Equal
/// scores keep their input order.
pub fn rank_scored<'a>(
    focal: &ContentItem,
    candidates: &'a [ContentItem],
    limit: usize,
) -> Vec<RankedItem<'a>> {
    let focal = Focal::new(focal);

    let mut ranked: Vec<RankedItem<'a>> = candidates
        .iter()
        .filter(|c| c.id != focal.item.id)
        .map(|item| RankedItem {
            item,
            score: focal.score(item),
        })
        .collect();

    // sort_by is stable
    ranked.sort_by(|a, b| b.score.total().cmp(&a.score.total()));
    ranked.truncate(limit);
    ranked
}

/// Rank candidates and return only the items
pub fn rank<'a>(
    focal: &ContentItem,
    candidates: &'a [ContentItem],
    limit: usize,
) -> Vec<&'a ContentItem> {
    rank_scored(focal, candidates, limit)
        .into_iter()
        .map(|r| r.item)
        .collect()
}

/// Build the candidate pool for `focal`: the first `cap` other items of the pool
pub fn related_candidates(
    pool: &[ContentItem],
    focal: &ContentItem,
    cap: usize,
) -> Vec<ContentItem> {
    pool.iter()
        .filter(|i| i.id != focal.id)
        .take(cap)
        .cloned()
        .collect()
}
