//! Pure functions computing which cache keys a write invalidates.
//!
//! Writes never populate the cache. They delete every entry whose content
//! the write could have changed, and the next read repopulates it.

use crate::fleet::Entity;
use crate::storage::Cascade;

/// Keys invalidated after `entity` has been inserted.
///
/// The new entity has no item entry yet, so only the collections that now
/// include it are affected.
pub fn create_invalidations<T: Entity>(entity: &T) -> Vec<String> {
    let mut keys = vec![T::ALL.key()];
    keys.extend(entity.member_views().iter().map(|view| view.key()));
    keys
}

/// Keys invalidated after an update.
///
/// `before` is the entity as loaded prior to mutation, so a view it belonged
/// to is invalidated even if the update moved it elsewhere.
pub fn update_invalidations<T: Entity>(before: &T) -> Vec<String> {
    let mut keys = vec![before.item_key(), T::ALL.key()];
    keys.extend(before.member_views().iter().map(|view| view.key()));
    keys
}

/// Keys invalidated after `entity` has been deleted.
///
/// Besides the entity's own keys this covers the views its cascade emptied and
/// the item entries of every dependent the store removed with it.
pub fn delete_invalidations<T: Entity>(entity: &T, cascade: &Cascade) -> Vec<String> {
    let mut keys = update_invalidations(entity);
    let cascade_views = entity.cascade_views();
    let cascaded = cascade_views
        .iter()
        .map(|view| view.key())
        .chain(cascade.item_keys());

    for key in cascaded {
        if !keys.contains(&key) {
            keys.push(key);
        }
    }
    keys
}
