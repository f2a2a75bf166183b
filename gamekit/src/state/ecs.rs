//! Entity-Component-System
//!
//! Entities are bare handles. Components live in one store per kind,
//! created lazily the first time a kind is added. Systems are registered
//! with the kinds they need and run in registration order on `update`.
//!
//! The component value type is generic. Games that want strong typing use
//! their own enum; the default is a JSON value, matching the loosely-typed
//! payloads generated game code tends to attach.
//!
//! ## Ordering
//!
//! Entity handles are assigned monotonically and never reused, so the
//! sorted live set is also the creation order. Query results follow it.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Serialize, Deserialize};
use serde::de::DeserializeOwned;
use tracing::trace;

/// Opaque entity handle. Positive, monotonically assigned, never reused.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Entity(u32);

impl Entity {
    /// Raw handle value.
    pub fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// System behavior: entity, its components in declared kind order, `dt`.
pub type SystemFn<C> = Box<dyn FnMut(Entity, &mut [&mut C], f32)>;

struct System<C> {
    kinds: Vec<String>,
    run: SystemFn<C>,
}

/// Entity registry, component stores and systems.
pub struct World<C = serde_json::Value> {
    next_id: u32,
    entities: BTreeSet<Entity>,
    stores: BTreeMap<String, BTreeMap<Entity, C>>,
    systems: Vec<System<C>>,
}

impl<C> Default for World<C> {
    fn default() -> Self {
        Self {
            next_id: 1,
            entities: BTreeSet::new(),
            stores: BTreeMap::new(),
            systems: Vec::new(),
        }
    }
}

impl<C> World<C> {
    /// Create an empty world.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new live entity.
    pub fn create(&mut self) -> Entity {
        let entity = Entity(self.next_id);
        self.next_id += 1;
        self.entities.insert(entity);
        entity
    }

    /// Attach (or overwrite) the `kind` component of `entity`.
    ///
    /// No liveness check is made: a component attached to a removed entity
    /// is stored but never matched by queries.
    pub fn add(&mut self, entity: Entity, kind: &str, data: C) -> &mut C {
        let store = self.stores.entry(kind.to_string()).or_default();
        match store.entry(entity) {
            Entry::Occupied(mut slot) => {
                slot.insert(data);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(data),
        }
    }

    /// The `kind` component of `entity`, if any.
    pub fn get(&self, entity: Entity, kind: &str) -> Option<&C> {
        self.stores.get(kind)?.get(&entity)
    }

    /// Mutable access to the `kind` component of `entity`.
    pub fn get_mut(&mut self, entity: Entity, kind: &str) -> Option<&mut C> {
        self.stores.get_mut(kind)?.get_mut(&entity)
    }

    /// True if `entity` has a `kind` component.
    pub fn has(&self, entity: Entity, kind: &str) -> bool {
        self.stores
            .get(kind)
            .is_some_and(|store| store.contains_key(&entity))
    }

    /// Delete `entity` from the live set and from every store.
    ///
    /// Removing an unknown or already removed entity does nothing.
    pub fn remove(&mut self, entity: Entity) {
        self.entities.remove(&entity);
        for store in self.stores.values_mut() {
            store.remove(&entity);
        }
    }

    /// Detach a single component, returning it.
    pub fn remove_component(&mut self, entity: Entity, kind: &str) -> Option<C> {
        self.stores.get_mut(kind)?.remove(&entity)
    }

    /// True if `entity` is live.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.contains(&entity)
    }

    /// Live entities in creation order.
    pub fn entities(&self) -> impl Iterator<Item = Entity> + '_ {
        self.entities.iter().copied()
    }

    /// Number of live entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True if no entity is live.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Live entities having every kind in `kinds`, in creation order.
    ///
    /// An empty `kinds` list matches every live entity.
    pub fn query(&self, kinds: &[&str]) -> Vec<Entity> {
        let stores: Vec<Option<&BTreeMap<Entity, C>>> =
            kinds.iter().map(|kind| self.stores.get(*kind)).collect();

        self.entities
            .iter()
            .copied()
            .filter(|entity| {
                stores
                    .iter()
                    .all(|store| store.is_some_and(|s| s.contains_key(entity)))
            })
            .collect()
    }

    /// Register a system over `kinds`.
    ///
    /// Repeated kinds are collapsed to their first occurrence.
    pub fn system(
        &mut self,
        kinds: &[&str],
        run: impl FnMut(Entity, &mut [&mut C], f32) + 'static,
    ) {
        let mut unique: Vec<String> = Vec::with_capacity(kinds.len());
        for kind in kinds {
            if !unique.iter().any(|k| k == kind) {
                unique.push(kind.to_string());
            }
        }
        self.systems.push(System {
            kinds: unique,
            run: Box::new(run),
        });
    }

    /// Registered systems.
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }

    /// Run every system once, in registration order.
    ///
    /// Each system sees the query result for its kinds as of the moment it
    /// starts, and receives each entity's components in declared order.
    pub fn update(&mut self, dt: f32) {
        let mut systems = std::mem::take(&mut self.systems);

        for system in systems.iter_mut() {
            let kinds: Vec<&str> = system.kinds.iter().map(String::as_str).collect();
            let matched = self.query(&kinds);
            trace!(kinds = ?system.kinds, matched = matched.len(), "running system");
            if matched.is_empty() {
                continue;
            }

            // Take the stores out so one borrow per kind can coexist.
            let mut taken: Vec<(String, BTreeMap<Entity, C>)> = system
                .kinds
                .iter()
                .map(|kind| {
                    let store = self.stores.remove(kind).unwrap_or_default();
                    (kind.clone(), store)
                })
                .collect();

            for entity in matched {
                let mut components: Vec<&mut C> = taken
                    .iter_mut()
                    .filter_map(|(_, store)| store.get_mut(&entity))
                    .collect();
                (system.run)(entity, &mut components, dt);
            }

            for (kind, store) in taken {
                self.stores.insert(kind, store);
            }
        }

        // Systems registered during update cannot exist (no world access),
        // so restoring the original list loses nothing.
        self.systems = systems;
    }
}

impl World<serde_json::Value> {
    /// Deserialize the `kind` component of `entity` into `T`.
    ///
    /// Returns `None` if the component is missing or has a different shape.
    pub fn get_as<T: DeserializeOwned>(&self, entity: Entity, kind: &str) -> Option<T> {
        let value = self.get(entity, kind)?;
        T::deserialize(value).ok()
    }
}

// =============================================================================
// TESTS
// =============================================================================
