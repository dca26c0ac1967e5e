// Copyright 2025 the Grasp Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory host fakes for unit tests.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use glam::Vec3;

use crate::host::{AvatarJoints, CameraMode, EntityStore};
use crate::types::{EntityProperties, EntityType, NestableType, ObjectId, OverlayPose};

#[derive(Default)]
pub(crate) struct FakeStore {
    pub(crate) entities: BTreeMap<ObjectId, EntityProperties>,
    pub(crate) overlays: BTreeMap<ObjectId, OverlayPose>,
    pub(crate) nestables: BTreeMap<ObjectId, NestableType>,
    pub(crate) joint_children: BTreeMap<(ObjectId, usize), Vec<ObjectId>>,
    pub(crate) actions: BTreeMap<ObjectId, usize>,
}

impl FakeStore {
    pub(crate) fn add_entity(&mut self, id: u128, parent: Option<u128>) {
        let props = EntityProperties {
            id: ObjectId(id),
            entity_type: EntityType::Box,
            parent_id: parent.map(ObjectId),
            ..Default::default()
        };
        self.entities.insert(ObjectId(id), props);
        self.nestables.insert(ObjectId(id), NestableType::Entity);
    }

    pub(crate) fn add_avatar(&mut self, id: u128) {
        self.nestables.insert(ObjectId(id), NestableType::Avatar);
    }
}

impl EntityStore for FakeStore {
    fn entity_properties(&self, id: ObjectId) -> Option<EntityProperties> {
        self.entities.get(&id).cloned()
    }

    fn overlay_pose(&self, id: ObjectId) -> Option<OverlayPose> {
        self.overlays.get(&id).copied()
    }

    fn nestable_type(&self, id: ObjectId) -> NestableType {
        self.nestables
            .get(&id)
            .copied()
            .unwrap_or(NestableType::Unknown)
    }

    fn children_of_joint(&self, parent: ObjectId, joint: usize) -> Vec<ObjectId> {
        self.joint_children
            .get(&(parent, joint))
            .cloned()
            .unwrap_or_default()
    }

    fn action_count(&self, id: ObjectId) -> usize {
        self.actions.get(&id).copied().unwrap_or(0)
    }

    fn set_velocity(&mut self, id: ObjectId, velocity: Vec3) {
        if let Some(props) = self.entities.get_mut(&id) {
            props.velocity = velocity;
        }
    }
}

pub(crate) struct FakeAvatar {
    pub(crate) session: ObjectId,
    pub(crate) local: ObjectId,
    pub(crate) joints: BTreeMap<&'static str, usize>,
    pub(crate) controllers: bool,
    pub(crate) camera: CameraMode,
}

impl Default for FakeAvatar {
    fn default() -> Self {
        Self {
            session: ObjectId::NULL,
            local: ObjectId::NULL,
            joints: BTreeMap::new(),
            controllers: false,
            camera: CameraMode::FirstPerson,
        }
    }
}

impl AvatarJoints for FakeAvatar {
    fn session_id(&self) -> ObjectId {
        self.session
    }

    fn self_id(&self) -> ObjectId {
        self.local
    }

    fn joint_index(&self, name: &str) -> Option<usize> {
        self.joints.get(name).copied()
    }

    fn hand_controller_available(&self) -> bool {
        self.controllers
    }

    fn camera_mode(&self) -> CameraMode {
        self.camera
    }
}
