// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent-chain walkers and joint-relative child lookups.
//!
//! Walks stop at the first null or missing parent, or at a parent that is not an entity
//! (an avatar joint, an overlay). A parent already seen on the walk also ends it, so cyclic
//! host data yields the chain up to the repeat.

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use crate::host::{AvatarJoints, CameraMode, EntityStore};
use crate::types::{EntityProperties, Hand, NestableType, ObjectId};

fn parent_entity<S: EntityStore + ?Sized>(
    store: &S,
    child: &EntityProperties,
) -> Option<EntityProperties> {
    let parent_id = child.parent_id.filter(|id| !id.is_null())?;
    if store.nestable_type(parent_id) != NestableType::Entity {
        return None;
    }
    let mut parent = store.entity_properties(parent_id)?;
    parent.id = parent_id;
    Some(parent)
}

/// Find the topmost entity ancestor of `props`, or `props` itself if it has none.
pub fn find_group_parent<S: EntityStore + ?Sized>(
    store: &S,
    props: &EntityProperties,
) -> EntityProperties {
    entity_parents(store, props)
        .pop()
        .unwrap_or_else(|| props.clone())
}

/// Collect the entity ancestors of `props`, nearest first.
pub fn entity_parents<S: EntityStore + ?Sized>(
    store: &S,
    props: &EntityProperties,
) -> Vec<EntityProperties> {
    let mut seen = BTreeSet::from([props.id]);
    let mut out = Vec::new();
    let mut next = parent_entity(store, props);
    while let Some(parent) = next {
        if !seen.insert(parent.id) {
            break;
        }
        next = parent_entity(store, &parent);
        out.push(parent);
    }
    out
}

/// Index of the faux controller joint that follows `hand`.
///
/// `None` without hand controllers, or in camera modes that have no controller joint.
pub fn controller_joint_index<A: AvatarJoints + ?Sized>(avatar: &A, hand: Hand) -> Option<usize> {
    if !avatar.hand_controller_available() {
        return None;
    }
    let name = match (avatar.camera_mode(), hand) {
        (CameraMode::FirstPerson, Hand::Right) => "_CONTROLLER_RIGHTHAND",
        (CameraMode::FirstPerson, Hand::Left) => "_CONTROLLER_LEFTHAND",
        (CameraMode::ThirdPerson, Hand::Right) => "_CAMERA_RELATIVE_CONTROLLER_RIGHTHAND",
        (CameraMode::ThirdPerson, Hand::Left) => "_CAMERA_RELATIVE_CONTROLLER_LEFTHAND",
        (CameraMode::Other, _) => return None,
    };
    avatar.joint_index(name)
}

/// Entities parented to the avatar joints that follow `hand`.
///
/// Looks at the hand joint, the controller joint, and the camera-relative controller joint,
/// under both the session id and the self id. Non-entity children are dropped.
pub fn find_hand_child_entities<S, A>(store: &S, avatar: &A, hand: Hand) -> Vec<ObjectId>
where
    S: EntityStore + ?Sized,
    A: AvatarJoints + ?Sized,
{
    let (hand_joint, camera_relative_joint) = match hand {
        Hand::Right => ("RightHand", "_CAMERA_RELATIVE_CONTROLLER_RIGHTHAND"),
        Hand::Left => ("LeftHand", "_CAMERA_RELATIVE_CONTROLLER_LEFTHAND"),
    };
    let joints = [
        avatar.joint_index(hand_joint),
        controller_joint_index(avatar, hand),
        avatar.joint_index(camera_relative_joint),
    ];
    let owners = [avatar.session_id(), avatar.self_id()];

    let mut children = Vec::new();
    for joint in joints.into_iter().flatten() {
        for owner in owners {
            children.extend(store.children_of_joint(owner, joint));
        }
    }
    children.retain(|&child| store.nestable_type(child) == NestableType::Entity);
    children
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::{FakeAvatar, FakeStore};
    use alloc::vec;

    fn id(n: u128) -> ObjectId {
        ObjectId(n)
    }

    // 3 -> 2 -> 1, and 1 is parented to avatar 100.
    fn chain_store() -> FakeStore {
        let mut store = FakeStore::default();
        store.add_entity(1, Some(100));
        store.add_entity(2, Some(1));
        store.add_entity(3, Some(2));
        store.add_avatar(100);
        store
    }

    #[test]
    fn group_parent_stops_at_non_entity() {
        let store = chain_store();
        let leaf = store.entity_properties(id(3)).unwrap();
        assert_eq!(find_group_parent(&store, &leaf).id, id(1));
    }

    #[test]
    fn parents_are_nearest_first() {
        let store = chain_store();
        let leaf = store.entity_properties(id(3)).unwrap();
        let ids: Vec<ObjectId> = entity_parents(&store, &leaf).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![id(2), id(1)]);
    }

    #[test]
    fn unparented_entity_is_its_own_group_parent() {
        let mut store = FakeStore::default();
        store.add_entity(7, None);
        store.add_entity(8, Some(0));
        for n in [7, 8] {
            let props = store.entity_properties(id(n)).unwrap();
            assert_eq!(find_group_parent(&store, &props).id, id(n));
            assert!(entity_parents(&store, &props).is_empty());
        }
    }

    #[test]
    fn missing_parent_ends_the_walk() {
        let mut store = FakeStore::default();
        store.add_entity(5, Some(4));
        // 4 claims to be an entity but has no properties.
        store.nestables.insert(id(4), NestableType::Entity);
        let props = store.entity_properties(id(5)).unwrap();
        assert_eq!(find_group_parent(&store, &props).id, id(5));
        assert!(entity_parents(&store, &props).is_empty());
    }

    #[test]
    fn parent_cycles_end_the_walk() {
        let mut store = FakeStore::default();
        store.add_entity(1, Some(2));
        store.add_entity(2, Some(1));
        store.add_entity(3, Some(1));
        store.add_entity(4, Some(4));

        let leaf = store.entity_properties(id(3)).unwrap();
        let ids: Vec<ObjectId> = entity_parents(&store, &leaf).iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![id(1), id(2)]);
        assert_eq!(find_group_parent(&store, &leaf).id, id(2));

        let own_parent = store.entity_properties(id(4)).unwrap();
        assert!(entity_parents(&store, &own_parent).is_empty());
        assert_eq!(find_group_parent(&store, &own_parent).id, id(4));
    }

    #[test]
    fn controller_joint_depends_on_camera_mode() {
        let mut avatar = FakeAvatar::default();
        avatar.joints.insert("_CONTROLLER_RIGHTHAND", 40);
        avatar.joints.insert("_CAMERA_RELATIVE_CONTROLLER_RIGHTHAND", 41);
        avatar.controllers = true;

        avatar.camera = CameraMode::FirstPerson;
        assert_eq!(controller_joint_index(&avatar, Hand::Right), Some(40));
        avatar.camera = CameraMode::ThirdPerson;
        assert_eq!(controller_joint_index(&avatar, Hand::Right), Some(41));
        avatar.camera = CameraMode::Other;
        assert_eq!(controller_joint_index(&avatar, Hand::Right), None);

        avatar.camera = CameraMode::FirstPerson;
        avatar.controllers = false;
        assert_eq!(controller_joint_index(&avatar, Hand::Right), None);
    }

    #[test]
    fn hand_children_cover_all_joints_and_drop_non_entities() {
        let mut avatar = FakeAvatar::default();
        avatar.session = id(100);
        avatar.local = id(101);
        avatar.controllers = true;
        avatar.camera = CameraMode::FirstPerson;
        avatar.joints.insert("LeftHand", 10);
        avatar.joints.insert("_CONTROLLER_LEFTHAND", 20);
        avatar.joints.insert("_CAMERA_RELATIVE_CONTROLLER_LEFTHAND", 30);

        let mut store = FakeStore::default();
        store.add_entity(1, Some(100));
        store.add_entity(2, Some(101));
        store.add_entity(3, Some(100));
        store.add_entity(4, Some(100));
        store.nestables.insert(id(9), NestableType::Overlay);
        store.joint_children.insert((id(100), 10), vec![id(1), id(9)]);
        store.joint_children.insert((id(101), 10), vec![id(2)]);
        store.joint_children.insert((id(100), 20), vec![id(3)]);
        store.joint_children.insert((id(100), 30), vec![id(4)]);
        // Right-hand joints are not consulted for the left hand.
        store.joint_children.insert((id(100), 11), vec![id(5)]);

        let children = find_hand_child_entities(&store, &avatar, Hand::Left);
        assert_eq!(children, vec![id(1), id(2), id(3), id(4)]);
    }
}
