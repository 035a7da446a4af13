// Copyright 2025 the vizflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene and its diff stream.

extern crate alloc;

use alloc::boxed::Box;
use alloc::vec::Vec;

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::{Mark, MarkId, MarkKind, MarkPayload};

/// A change to the retained scene produced by [`Scene::tick`].
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark appeared.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Paint layer.
        z_index: i32,
        /// Paint order within the layer (position in the submitted frame).
        order: u32,
        /// New payload.
        new: Box<MarkPayload>,
        /// New bounds, if the payload has geometric bounds.
        bounds: Option<Rect>,
    },
    /// A mark changed geometry, paint, layer, or paint order.
    Update {
        /// Mark id.
        id: MarkId,
        /// Mark kind after the update.
        kind: MarkKind,
        /// Paint layer before the update.
        old_z_index: i32,
        /// Paint layer after the update.
        new_z_index: i32,
        /// Paint order after the update.
        new_order: u32,
        /// Payload before the update.
        old: Box<MarkPayload>,
        /// Payload after the update.
        new: Box<MarkPayload>,
        /// Bounds before the update.
        old_bounds: Option<Rect>,
        /// Bounds after the update.
        new_bounds: Option<Rect>,
    },
    /// A mark disappeared.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Mark kind.
        kind: MarkKind,
        /// Bounds at removal time.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// Returns the id this diff refers to.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

/// Result of [`Scene::hit_test`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hit {
    /// Topmost mark under the point.
    pub id: MarkId,
    /// The datum key the mark is bound to.
    pub datum: u64,
}

#[derive(Clone, Debug)]
struct Retained {
    z_index: i32,
    order: u32,
    datum: Option<u64>,
    payload: MarkPayload,
}

/// The set of marks currently on screen.
#[derive(Debug, Default)]
pub struct Scene {
    marks: HashMap<MarkId, Retained>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of retained marks.
    pub fn len(&self) -> usize {
        self.marks.len()
    }

    /// Returns `true` if no marks are retained.
    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Returns `true` if a mark with `id` is retained.
    pub fn contains(&self, id: MarkId) -> bool {
        self.marks.contains_key(&id)
    }

    /// Returns the retained payload for `id`.
    pub fn payload(&self, id: MarkId) -> Option<&MarkPayload> {
        self.marks.get(&id).map(|r| &r.payload)
    }

    /// Returns the datum key bound to `id`.
    pub fn datum(&self, id: MarkId) -> Option<u64> {
        self.marks.get(&id).and_then(|r| r.datum)
    }

    /// Replaces the scene contents with `marks` and returns what changed.
    ///
    /// Marks are matched by id. The position of a mark in `marks` is its paint order within
    /// its z-index, so callers that sort their marks (for example largest-first) get that
    /// order re-applied on every tick. If an id occurs more than once, the last occurrence
    /// wins; the scene never holds duplicates.
    ///
    /// Diffs are returned as enters/updates in submission order, followed by exits in id order.
    pub fn tick(&mut self, marks: impl IntoIterator<Item = Mark>) -> Vec<MarkDiff> {
        let mut next: HashMap<MarkId, Retained> = HashMap::with_capacity(self.marks.len());
        let mut submitted: Vec<MarkId> = Vec::new();
        for (order, mark) in marks.into_iter().enumerate() {
            let order = u32::try_from(order).unwrap_or(u32::MAX);
            let retained = Retained {
                z_index: mark.z_index,
                order,
                datum: mark.datum,
                payload: mark.payload,
            };
            if next.insert(mark.id, retained).is_some() {
                submitted.retain(|id| *id != mark.id);
            }
            submitted.push(mark.id);
        }

        let mut diffs = Vec::new();
        for id in submitted {
            let Some(new) = next.get(&id) else {
                continue;
            };
            match self.marks.get(&id) {
                None => diffs.push(MarkDiff::Enter {
                    id,
                    kind: new.payload.kind(),
                    z_index: new.z_index,
                    order: new.order,
                    bounds: new.payload.bounds(),
                    new: Box::new(new.payload.clone()),
                }),
                Some(old) => {
                    let changed = old.payload != new.payload
                        || old.z_index != new.z_index
                        || old.order != new.order
                        || old.datum != new.datum;
                    if changed {
                        diffs.push(MarkDiff::Update {
                            id,
                            kind: new.payload.kind(),
                            old_z_index: old.z_index,
                            new_z_index: new.z_index,
                            new_order: new.order,
                            old_bounds: old.payload.bounds(),
                            new_bounds: new.payload.bounds(),
                            old: Box::new(old.payload.clone()),
                            new: Box::new(new.payload.clone()),
                        });
                    }
                }
            }
        }

        let mut exits: Vec<MarkDiff> = self
            .marks
            .iter()
            .filter(|(id, _)| !next.contains_key(*id))
            .map(|(id, old)| MarkDiff::Exit {
                id: *id,
                kind: old.payload.kind(),
                bounds: old.payload.bounds(),
            })
            .collect();
        exits.sort_by_key(MarkDiff::id);
        diffs.extend(exits);

        self.marks = next;
        diffs
    }

    /// Removes every mark, returning the exits.
    pub fn clear(&mut self) -> Vec<MarkDiff> {
        self.tick(core::iter::empty())
    }

    /// Returns ids in paint order: by `(z_index, order, id)`.
    pub fn draw_order(&self) -> Vec<MarkId> {
        let mut ids: Vec<(i32, u32, MarkId)> = self
            .marks
            .iter()
            .map(|(id, r)| (r.z_index, r.order, *id))
            .collect();
        ids.sort_unstable();
        ids.into_iter().map(|(_, _, id)| id).collect()
    }

    /// Iterates retained marks in paint order.
    pub fn iter_painted(&self) -> impl Iterator<Item = (MarkId, i32, &MarkPayload)> + '_ {
        self.draw_order().into_iter().filter_map(move |id| {
            self.marks
                .get(&id)
                .map(|r| (id, r.z_index, &r.payload))
        })
    }

    /// Returns the topmost datum-bound mark containing `pt`.
    ///
    /// Marks without a datum (guides, labels, popups) are transparent to hit testing.
    pub fn hit_test(&self, pt: Point) -> Option<Hit> {
        self.draw_order().into_iter().rev().find_map(|id| {
            let r = self.marks.get(&id)?;
            let datum = r.datum?;
            r.payload.contains(pt).then_some(Hit { id, datum })
        })
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;
    use crate::{LayerId, Mark};

    fn bubble(key: u64, x: f64, r: f64) -> Mark {
        Mark::builder(MarkId::for_key(LayerId(1), key))
            .circle((x, 0.0), r)
            .datum(key)
            .build()
    }

    #[test]
    fn same_ids_update_instead_of_enter() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![bubble(1, 0.0, 5.0), bubble(2, 10.0, 3.0)]);
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));

        let diffs = scene.tick(vec![bubble(1, 1.0, 5.0), bubble(2, 10.0, 3.0)]);
        let [MarkDiff::Update { id, .. }] = &diffs[..] else {
            panic!("expected a single update, got {diffs:?}");
        };
        assert_eq!(*id, MarkId::for_key(LayerId(1), 1));
        assert_eq!(scene.len(), 2);
    }

    #[test]
    fn missing_ids_exit() {
        let mut scene = Scene::new();
        scene.tick(vec![bubble(1, 0.0, 5.0), bubble(2, 10.0, 3.0)]);
        let diffs = scene.tick(vec![bubble(2, 10.0, 3.0)]);
        let [MarkDiff::Exit { id, kind, .. }] = &diffs[..] else {
            panic!("expected a single exit, got {diffs:?}");
        };
        assert_eq!(*id, MarkId::for_key(LayerId(1), 1));
        assert_eq!(*kind, MarkKind::Circle);
        assert_eq!(scene.len(), 1);
    }

    #[test]
    fn duplicate_ids_keep_the_last_occurrence() {
        let mut scene = Scene::new();
        let diffs = scene.tick(vec![bubble(1, 0.0, 5.0), bubble(1, 4.0, 5.0)]);
        assert_eq!(diffs.len(), 1);
        assert_eq!(scene.len(), 1);
        let Some(MarkPayload::Circle(c)) = scene.payload(MarkId::for_key(LayerId(1), 1)) else {
            panic!("expected circle payload");
        };
        assert_eq!(c.circle.center.x, 4.0);
    }

    #[test]
    fn reordering_is_an_update_and_changes_draw_order() {
        let mut scene = Scene::new();
        scene.tick(vec![bubble(1, 0.0, 5.0), bubble(2, 0.0, 3.0)]);
        let diffs = scene.tick(vec![bubble(2, 0.0, 3.0), bubble(1, 0.0, 5.0)]);
        assert_eq!(diffs.len(), 2);
        assert_eq!(
            scene.draw_order(),
            vec![
                MarkId::for_key(LayerId(1), 2),
                MarkId::for_key(LayerId(1), 1)
            ]
        );
    }

    #[test]
    fn hit_test_prefers_topmost_and_skips_unbound_marks() {
        let mut scene = Scene::new();
        let label = Mark::builder(MarkId::from_raw(99))
            .z_index(100)
            .rect(Rect::new(-50.0, -50.0, 50.0, 50.0))
            .build();
        scene.tick(vec![bubble(1, 0.0, 10.0), bubble(2, 0.0, 2.0), label]);
        let hit = scene.hit_test(Point::new(0.5, 0.5)).expect("expected a hit");
        assert_eq!(hit.datum, 2);
        let hit = scene.hit_test(Point::new(8.0, 0.0)).expect("expected a hit");
        assert_eq!(hit.datum, 1);
        assert_eq!(scene.hit_test(Point::new(40.0, 40.0)), None);
    }

    #[test]
    fn clear_exits_everything() {
        let mut scene = Scene::new();
        scene.tick(vec![bubble(1, 0.0, 5.0), bubble(2, 10.0, 3.0)]);
        let diffs = scene.clear();
        assert_eq!(diffs.len(), 2);
        assert!(scene.is_empty());
    }
}
