//! Loading pipeline: decode in parallel, collect, link.
//!
//! The byte-level decoder is an external collaborator; this module supplies
//! everything around it. [`decode_all`] fans decoding out over a worker pool
//! and collects the results into an [`UnlinkedBatch`] behind a hard join
//! barrier, because linking needs the complete name universe of the batch
//! before it can resolve forward references. [`Linker`] then resolves the
//! batch against a base [`crate::model::Model`] into a new snapshot.
//!
//! A decoding failure on any one entry fails the whole load; only module and
//! package marker classes are skipped intentionally.

mod linker;
mod unlinked;

pub use linker::Linker;
pub use unlinked::{
    is_marker_class, FieldStub, MethodStub, RawAnnotation, RawAnnotationValue, RawClass,
    RawInnerClass, UnlinkedBatch, UnlinkedClass,
};

use rayon::prelude::*;

use crate::Result;

/// Decodes every entry on the rayon worker pool and collects the results
/// into a batch.
///
/// Decoding tasks are pure functions of their entry and share no state, so
/// they run fully parallel. Collection is the synchronization barrier before
/// linking; the first failing task fails the whole call.
///
/// # Errors
///
/// The first decoder failure, or any [`crate::LinkError`] raised while
/// digesting and collecting the decoded classes.
pub fn decode_all<T, F>(entries: Vec<T>, decode: F) -> Result<UnlinkedBatch>
where
    T: Send,
    F: Fn(T) -> Result<RawClass> + Send + Sync,
{
    let raw_classes: Vec<RawClass> = entries
        .into_par_iter()
        .map(decode)
        .collect::<Result<Vec<_>>>()?;

    let mut batch = UnlinkedBatch::new();
    for raw in raw_classes {
        batch.add_raw(raw)?;
    }
    Ok(batch)
}
