//! Staging validation for batch construction
//!
//! Every `check`/`modify` call is validated against the intents already
//! staged before anything is applied. Validation produces a plan; applying a
//! plan cannot fail. This keeps the staging maps consistent when one
//! document of a multi-document call conflicts: none of them are staged.
//!
//! Rules:
//! - check, already checked at the same version: no-op
//! - check, already modified at the same version: no-op (the modification
//!   already verifies that version)
//! - modify, already checked at the same version: promote to modified
//! - modify, already modified: always a conflict
//! - any other version mismatch: conflict

use docbatch_core::{Document, EntityId, Error, Result, StagingConflictKind};
use std::collections::BTreeMap;

/// Staging maps validated against
pub(crate) type StagingMap = BTreeMap<EntityId, Document>;

/// Documents to add to the checked map
#[derive(Debug, Default)]
pub(crate) struct CheckPlan {
    pub(crate) add: StagingMap,
}

/// Documents to add to the modified map, and checks they supersede
#[derive(Debug, Default)]
pub(crate) struct ModifyPlan {
    pub(crate) promote: Vec<EntityId>,
    pub(crate) add: StagingMap,
}

fn staging_conflict(id: EntityId, kind: StagingConflictKind) -> Error {
    Error::StagingConflict { id, kind }
}

/// Validate a `check` call
///
/// Documents repeated within the call are validated against each other as
/// if they had been staged one at a time.
pub(crate) fn plan_check<I>(checked: &StagingMap, modified: &StagingMap, documents: I) -> Result<CheckPlan>
where
    I: IntoIterator<Item = Document>,
{
    let mut plan = CheckPlan::default();

    for document in documents {
        if let Some(existing) = checked.get(&document.id).or_else(|| plan.add.get(&document.id)) {
            if existing.version == document.version {
                continue;
            }
            return Err(staging_conflict(
                document.id,
                StagingConflictKind::CheckedWithDifferentVersion,
            ));
        }

        if let Some(existing) = modified.get(&document.id) {
            if existing.version == document.version {
                continue;
            }
            return Err(staging_conflict(
                document.id,
                StagingConflictKind::ModifiedWithDifferentVersion,
            ));
        }

        plan.add.insert(document.id, document);
    }

    Ok(plan)
}

/// Validate a `modify` call
pub(crate) fn plan_modify<I>(checked: &StagingMap, modified: &StagingMap, documents: I) -> Result<ModifyPlan>
where
    I: IntoIterator<Item = Document>,
{
    let mut plan = ModifyPlan::default();

    for document in documents {
        if modified.contains_key(&document.id) || plan.add.contains_key(&document.id) {
            return Err(staging_conflict(document.id, StagingConflictKind::AlreadyModified));
        }

        if let Some(existing) = checked.get(&document.id) {
            if existing.version != document.version {
                return Err(staging_conflict(
                    document.id,
                    StagingConflictKind::CheckedWithDifferentVersion,
                ));
            }
            plan.promote.push(document.id);
        }

        plan.add.insert(document.id, document);
    }

    Ok(plan)
}
