//! Transform nodes: the anchor capability behind parented picks
//!
//! A pick whose shape parameters are local to a moving object owns one
//! `TransformNode`. Each frame the scheduler asks the node for the anchor's
//! current world pose; every variant degrades to `None` ("unresolved this
//! frame") instead of failing when its target is missing, so a destroyed
//! parent simply freezes the pick's last result.

use std::sync::Weak;

use crate::pick::PickId;
use crate::pick::props::ParentId;
use crate::scene::environment::PickEnvironment;
use crate::scene::nestable::Nestable;
use crate::transform::pose::Pose;

/// Source of cached pick poses, used by [`TransformNode::PickChain`].
///
/// Implemented by the pick manager over its result cache; a chain node holds
/// a pick id, never a reference to the chained pick itself.
pub trait PickPoseSource {
    /// World pose derived from a pick's last result, if it has one.
    fn pick_pose(&self, id: PickId) -> Option<Pose>;
}

/// The closed set of anchor variants a pick can be parented to.
///
/// The variant is fixed at construction; reparenting a pick means creating
/// a new one.
#[derive(Clone)]
pub enum TransformNode {
    /// A fixed world-space pose.
    Static(Pose),
    /// The pose projected under the mouse cursor.
    Mouse,
    /// The local avatar's head.
    AvatarHead,
    /// A joint on the local avatar's skeleton, bound by index at
    /// construction time. Index -1 marks a joint name that never resolved.
    AvatarJoint(i32),
    /// Any nestable world object (avatar, entity, overlay), optionally a
    /// joint on it. Weak: the node never keeps the target alive.
    Nestable {
        target: Weak<dyn Nestable>,
        joint: i32,
    },
    /// Another pick's last result.
    PickChain(PickId),
}

impl TransformNode {
    /// Build a node from a pick's parent description, or `None` when the
    /// pick is absolute world-space.
    ///
    /// Precedence follows the registry contract: a parent object id is
    /// tried first (falling back to a pick chain when the id is numeric and
    /// names a live pick), then the named-joint string (`"Mouse"`,
    /// `"Avatar"`, or a skeleton joint name resolved once against the local
    /// avatar). A failed object lookup falls through to the joint handling.
    pub fn from_parent(
        parent_id: Option<&ParentId>,
        parent_joint_index: i32,
        joint: Option<&str>,
        env: &dyn PickEnvironment,
        is_live_pick: &dyn Fn(PickId) -> bool,
    ) -> Option<TransformNode> {
        match parent_id {
            Some(ParentId::Object(id)) if !id.is_nil() => {
                if let Some(target) = env.find_nestable(*id) {
                    if target.upgrade().is_some() {
                        return Some(TransformNode::Nestable {
                            target,
                            joint: parent_joint_index,
                        });
                    }
                }
                // Lookup failed: fall through to the joint handling below.
            }
            Some(ParentId::Pick(raw)) if *raw != 0 => {
                let id = PickId(*raw);
                if is_live_pick(id) {
                    return Some(TransformNode::PickChain(id));
                }
            }
            _ => {}
        }

        match joint {
            Some("Mouse") => Some(TransformNode::Mouse),
            Some("Avatar") => Some(TransformNode::AvatarHead),
            Some(name) if !name.is_empty() => {
                let index = env
                    .local_avatar()
                    .and_then(|avatar| avatar.joint_index(name))
                    .unwrap_or(-1);
                Some(TransformNode::AvatarJoint(index))
            }
            _ => None,
        }
    }

    /// Current world pose of the anchor, or `None` if it cannot be
    /// resolved this frame.
    pub fn resolve(
        &self,
        env: &dyn PickEnvironment,
        picks: &dyn PickPoseSource,
    ) -> Option<Pose> {
        match self {
            TransformNode::Static(pose) => Some(*pose),
            TransformNode::Mouse => env.mouse_pose(),
            TransformNode::AvatarHead => env.head_pose(),
            TransformNode::AvatarJoint(index) => {
                if *index < 0 {
                    return None;
                }
                env.local_avatar()?.joint_pose(*index)
            }
            TransformNode::Nestable { target, joint } => {
                target.upgrade()?.joint_pose(*joint)
            }
            TransformNode::PickChain(id) => picks.pick_pose(*id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;
    use crate::scene::mock::MockEnvironment;
    use uuid::Uuid;

    struct NoPicks;

    impl PickPoseSource for NoPicks {
        fn pick_pose(&self, _id: PickId) -> Option<Pose> {
            None
        }
    }

    #[test]
    fn test_static_always_resolves() {
        let env = MockEnvironment::new();
        let pose = Pose::new(Vec3::new(1.0, 2.0, 3.0), crate::core::types::Quat::IDENTITY);
        let node = TransformNode::Static(pose);
        assert_eq!(node.resolve(&env, &NoPicks), Some(pose));
    }

    #[test]
    fn test_mouse_tracks_environment() {
        let env = MockEnvironment::new();
        let node = TransformNode::Mouse;
        assert!(node.resolve(&env, &NoPicks).is_none());

        let pose = Pose::new(Vec3::new(4.0, 0.0, 0.0), crate::core::types::Quat::IDENTITY);
        env.set_mouse_pose(Some(pose));
        assert_eq!(node.resolve(&env, &NoPicks), Some(pose));
    }

    #[test]
    fn test_from_parent_object_id() {
        let env = MockEnvironment::new();
        let id = Uuid::new_v4();
        env.add_entity(id, Pose::new(Vec3::X, crate::core::types::Quat::IDENTITY));

        let parent = ParentId::Object(id);
        let node = TransformNode::from_parent(Some(&parent), 0, None, &env, &|_| false)
            .expect("nestable parent should produce a node");
        let pose = node.resolve(&env, &NoPicks).expect("target is alive");
        assert_eq!(pose.position, Vec3::X);
    }

    #[test]
    fn test_from_parent_unknown_object_falls_through_to_joint() {
        let env = MockEnvironment::new();
        let parent = ParentId::Object(Uuid::new_v4());
        let node =
            TransformNode::from_parent(Some(&parent), 0, Some("Mouse"), &env, &|_| false)
                .expect("joint fallback should apply");
        assert!(matches!(node, TransformNode::Mouse));
    }

    #[test]
    fn test_from_parent_live_pick_id_chains() {
        let env = MockEnvironment::new();
        let parent = ParentId::Pick(7);
        let node = TransformNode::from_parent(Some(&parent), 0, None, &env, &|id| id.0 == 7)
            .expect("live pick id should chain");
        assert!(matches!(node, TransformNode::PickChain(PickId(7))));
    }

    #[test]
    fn test_from_parent_dead_pick_id_yields_no_node() {
        let env = MockEnvironment::new();
        let parent = ParentId::Pick(7);
        let node = TransformNode::from_parent(Some(&parent), 0, None, &env, &|_| false);
        assert!(node.is_none());
    }

    #[test]
    fn test_from_parent_named_joint_binds_index() {
        let env = MockEnvironment::new();
        env.set_avatar_with_joints(&[("RightHandIndex1", 23)]);

        let node = TransformNode::from_parent(None, 0, Some("RightHandIndex1"), &env, &|_| false)
            .expect("named joint should produce a node");
        assert!(matches!(node, TransformNode::AvatarJoint(23)));
    }

    #[test]
    fn test_from_parent_unknown_joint_name_never_resolves() {
        let env = MockEnvironment::new();
        env.set_avatar_with_joints(&[]);

        let node = TransformNode::from_parent(None, 0, Some("NoSuchJoint"), &env, &|_| false)
            .expect("unknown names still bind a node");
        assert!(matches!(node, TransformNode::AvatarJoint(-1)));
        assert!(node.resolve(&env, &NoPicks).is_none());
    }

    #[test]
    fn test_from_parent_nothing_given() {
        let env = MockEnvironment::new();
        assert!(TransformNode::from_parent(None, 0, None, &env, &|_| false).is_none());
    }

    #[test]
    fn test_destroyed_target_unresolves_forever() {
        let env = MockEnvironment::new();
        let id = Uuid::new_v4();
        env.add_entity(id, Pose::default());

        let parent = ParentId::Object(id);
        let node = TransformNode::from_parent(Some(&parent), 0, None, &env, &|_| false).unwrap();
        assert!(node.resolve(&env, &NoPicks).is_some());

        env.remove_object(id);
        for _ in 0..10 {
            assert!(node.resolve(&env, &NoPicks).is_none());
        }
    }
}
