//! The mutation engine.
//!
//! One operation per user action. Every operation takes the model by
//! reference and returns a new model - no in-place mutation is observable
//! outside the call, which keeps each operation trivially replayable in
//! tests. Invalid input (unknown ids, out-of-range indices, duplicates,
//! the bucket cap) makes the operation a no-op: the returned model equals
//! the input.

use crate::model::{Bucket, Operator, OutputMode, QueryModel, Term, MAX_BUCKETS};

impl QueryModel {
    /// Append a trimmed term to a bucket. Rejects empty input and values
    /// already present in that bucket (exact, case-sensitive match). The
    /// color is assigned from the bucket's length at append time.
    pub fn add_term(&self, bucket_id: &str, raw: &str) -> QueryModel {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return self.clone();
        }

        let mut next = self.clone();
        for bucket in &mut next.buckets {
            if bucket.id != bucket_id {
                continue;
            }
            if bucket.terms.iter().any(|t| t.value == trimmed) {
                return self.clone();
            }
            let position = bucket.terms.len();
            bucket.terms.push(Term::new(trimmed, position));
        }
        next
    }

    /// Bulk paste: split on newlines and commas, trim each piece, drop
    /// empties, then feed every survivor through [`QueryModel::add_term`]
    /// so per-item dedup and empty-rejection apply uniformly.
    pub fn add_terms_bulk(&self, bucket_id: &str, input: &str) -> QueryModel {
        input
            .split(['\n', ','])
            .map(str::trim)
            .filter(|piece| !piece.is_empty())
            .fold(self.clone(), |model, piece| model.add_term(bucket_id, piece))
    }

    /// Remove the term at `index`. Out-of-range indices are a no-op.
    pub fn remove_term(&self, bucket_id: &str, index: usize) -> QueryModel {
        let mut next = self.clone();
        for bucket in &mut next.buckets {
            if bucket.id == bucket_id && index < bucket.terms.len() {
                bucket.terms.remove(index);
            }
        }
        next
    }

    /// Move a term between positions, possibly across buckets. The target
    /// index is clamped to the target bucket's length; for a same-bucket
    /// move the clamp is computed after removal, so moving to the end never
    /// overflows. Unknown bucket ids or an out-of-range source index are a
    /// no-op.
    pub fn move_term(
        &self,
        source_bucket_id: &str,
        source_index: usize,
        target_bucket_id: &str,
        target_index: usize,
    ) -> QueryModel {
        let source_pos = self.buckets.iter().position(|b| b.id == source_bucket_id);
        let target_pos = self.buckets.iter().position(|b| b.id == target_bucket_id);
        let (source_pos, target_pos) = match (source_pos, target_pos) {
            (Some(s), Some(t)) => (s, t),
            _ => return self.clone(),
        };

        if source_index >= self.buckets[source_pos].terms.len() {
            return self.clone();
        }

        let mut next = self.clone();
        let term = next.buckets[source_pos].terms.remove(source_index);
        let insert_at = target_index.min(next.buckets[target_pos].terms.len());
        next.buckets[target_pos].terms.insert(insert_at, term);
        next
    }

    /// Flip a bucket's enabled flag; its terms are retained.
    pub fn toggle_bucket(&self, bucket_id: &str) -> QueryModel {
        let mut next = self.clone();
        for bucket in &mut next.buckets {
            if bucket.id == bucket_id {
                bucket.is_enabled = !bucket.is_enabled;
            }
        }
        next
    }

    /// Unconditional rename - no trimming, no validation. The name only
    /// affects display, never serialization.
    pub fn rename_bucket(&self, bucket_id: &str, name: &str) -> QueryModel {
        let mut next = self.clone();
        for bucket in &mut next.buckets {
            if bucket.id == bucket_id {
                bucket.name = name.to_string();
            }
        }
        next
    }

    /// Unconditional overwrite of the operator joining this bucket to the
    /// next active one.
    pub fn set_operator(&self, bucket_id: &str, operator: Operator) -> QueryModel {
        let mut next = self.clone();
        for bucket in &mut next.buckets {
            if bucket.id == bucket_id {
                bucket.operator_after = operator;
            }
        }
        next
    }

    /// Append a new empty enabled bucket. No-op at the cap of 8. The id and
    /// name follow the positional convention; if interleaved deletes left a
    /// positional id occupied, the first free one is used.
    pub fn add_bucket(&self) -> QueryModel {
        if self.buckets.len() >= MAX_BUCKETS {
            return self.clone();
        }

        let mut n = self.buckets.len() + 1;
        while self.buckets.iter().any(|b| b.id == format!("bucket-{n}")) {
            n += 1;
        }

        let mut next = self.clone();
        next.buckets.push(Bucket::numbered(n));
        next
    }

    /// Remove a bucket. The model is never allowed to have zero buckets:
    /// deleting the last one re-creates the single default bucket.
    pub fn delete_bucket(&self, bucket_id: &str) -> QueryModel {
        let mut next = self.clone();
        next.buckets.retain(|b| b.id != bucket_id);
        if next.buckets.is_empty() {
            next.buckets.push(Bucket::numbered(1));
        }
        next
    }

    /// Reorder buckets to match the given id ordering. Ids not present in
    /// the model are skipped; if nothing matched, the reorder is rejected
    /// and the previous order kept.
    pub fn reorder_buckets(&self, ordered_ids: &[String]) -> QueryModel {
        let mut reordered: Vec<Bucket> = Vec::with_capacity(self.buckets.len());
        for id in ordered_ids {
            if let Some(bucket) = self.buckets.iter().find(|b| &b.id == id) {
                reordered.push(bucket.clone());
            }
        }

        if reordered.is_empty() {
            return self.clone();
        }

        QueryModel {
            buckets: reordered,
            output_mode: self.output_mode,
        }
    }

    pub fn set_output_mode(&self, mode: OutputMode) -> QueryModel {
        QueryModel {
            buckets: self.buckets.clone(),
            output_mode: mode,
        }
    }
}
