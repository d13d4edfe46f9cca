//! Shared test doubles for the environment and intersector.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;

use uuid::Uuid;

use crate::core::types::Vec3;
use crate::math::{Parabola, Ray};
use crate::pick::collision::CollisionRegion;
use crate::pick::result::PickResult;
use crate::scene::environment::{HandSide, PickEnvironment};
use crate::scene::intersect::{IntersectionContext, Intersector};
use crate::scene::nestable::{Nestable, NestableType};
use crate::transform::Pose;

/// A nestable test object with an adjustable pose and a fixed joint table.
pub(crate) struct MockNestable {
    id: Uuid,
    nestable_type: NestableType,
    pose: Mutex<Pose>,
    joints: HashMap<String, i32>,
}

impl MockNestable {
    pub(crate) fn new(id: Uuid, nestable_type: NestableType, pose: Pose) -> Self {
        Self {
            id,
            nestable_type,
            pose: Mutex::new(pose),
            joints: HashMap::new(),
        }
    }

    pub(crate) fn set_pose(&self, pose: Pose) {
        *self.pose.lock().unwrap() = pose;
    }
}

impl Nestable for MockNestable {
    fn id(&self) -> Uuid {
        self.id
    }

    fn nestable_type(&self) -> NestableType {
        self.nestable_type
    }

    fn world_pose(&self) -> Pose {
        *self.pose.lock().unwrap()
    }

    fn joint_pose(&self, joint_index: i32) -> Option<Pose> {
        let base = self.world_pose();
        match joint_index {
            0 => Some(base),
            // Joints fan out along +X so tests can tell them apart.
            i if i > 0 => Some(Pose {
                position: base.position + Vec3::X * i as f32,
                ..base
            }),
            _ => None,
        }
    }

    fn joint_index(&self, name: &str) -> Option<i32> {
        self.joints.get(name).copied()
    }
}

/// Configurable [`PickEnvironment`] double.
pub(crate) struct MockEnvironment {
    objects: Mutex<HashMap<Uuid, Arc<MockNestable>>>,
    avatar: Mutex<Option<Arc<MockNestable>>>,
    head: Mutex<Option<Pose>>,
    mouse: Mutex<Option<Pose>>,
    left_hand: Mutex<Option<Pose>>,
    right_hand: Mutex<Option<Pose>>,
}

impl MockEnvironment {
    pub(crate) fn new() -> Self {
        Self {
            objects: Mutex::new(HashMap::new()),
            avatar: Mutex::new(None),
            head: Mutex::new(None),
            mouse: Mutex::new(None),
            left_hand: Mutex::new(None),
            right_hand: Mutex::new(None),
        }
    }

    /// Register an entity at the given pose and return its handle.
    pub(crate) fn add_entity(&self, id: Uuid, pose: Pose) -> Arc<MockNestable> {
        let entity = Arc::new(MockNestable::new(id, NestableType::Entity, pose));
        self.objects.lock().unwrap().insert(id, entity.clone());
        entity
    }

    /// Drop the environment's strong reference, leaving weak anchors dangling.
    pub(crate) fn remove_object(&self, id: Uuid) {
        self.objects.lock().unwrap().remove(&id);
    }

    /// Install a local avatar with the given name -> index joint table.
    pub(crate) fn set_avatar_with_joints(&self, joints: &[(&str, i32)]) -> Uuid {
        let id = Uuid::new_v4();
        let mut avatar = MockNestable::new(id, NestableType::Avatar, Pose::default());
        avatar.joints = joints
            .iter()
            .map(|(name, index)| (name.to_string(), *index))
            .collect();
        *self.avatar.lock().unwrap() = Some(Arc::new(avatar));
        id
    }

    pub(crate) fn set_mouse_pose(&self, pose: Option<Pose>) {
        *self.mouse.lock().unwrap() = pose;
    }

    pub(crate) fn set_head_pose(&self, pose: Option<Pose>) {
        *self.head.lock().unwrap() = pose;
    }

    pub(crate) fn set_hand_pose(&self, side: HandSide, pose: Option<Pose>) {
        match side {
            HandSide::Left => *self.left_hand.lock().unwrap() = pose,
            HandSide::Right => *self.right_hand.lock().unwrap() = pose,
            HandSide::Invalid => {}
        }
    }
}

impl PickEnvironment for MockEnvironment {
    fn find_nestable(&self, id: Uuid) -> Option<Weak<dyn Nestable>> {
        if let Some(object) = self.objects.lock().unwrap().get(&id) {
            return Some(Arc::downgrade(object) as Weak<dyn Nestable>);
        }
        let avatar = self.avatar.lock().unwrap();
        match avatar.as_ref() {
            Some(a) if a.id() == id => Some(Arc::downgrade(a) as Weak<dyn Nestable>),
            _ => None,
        }
    }

    fn local_avatar(&self) -> Option<Arc<dyn Nestable>> {
        self.avatar
            .lock()
            .unwrap()
            .as_ref()
            .map(|a| a.clone() as Arc<dyn Nestable>)
    }

    fn head_pose(&self) -> Option<Pose> {
        *self.head.lock().unwrap()
    }

    fn mouse_pose(&self) -> Option<Pose> {
        *self.mouse.lock().unwrap()
    }

    fn hand_pose(&self, side: HandSide) -> Option<Pose> {
        match side {
            HandSide::Left => *self.left_hand.lock().unwrap(),
            HandSide::Right => *self.right_hand.lock().unwrap(),
            HandSide::Invalid => None,
        }
    }
}

/// [`Intersector`] double: every call hits at the shape's origin and
/// reports a global call sequence number as the distance, so tests can
/// observe evaluation order. An optional per-call sleep makes cost
/// deterministic for budget tests.
pub(crate) struct MockIntersector {
    delay: Duration,
    calls: AtomicU32,
    last_context: Mutex<Option<CapturedContext>>,
}

/// Snapshot of the last [`IntersectionContext`] seen by the mock.
#[derive(Clone, Debug)]
pub(crate) struct CapturedContext {
    pub filter_bits: u32,
    pub max_distance: f32,
    pub precision: bool,
    pub include_items: Vec<Uuid>,
    pub ignore_items: Vec<Uuid>,
}

impl MockIntersector {
    pub(crate) fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub(crate) fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicU32::new(0),
            last_context: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_context(&self) -> Option<CapturedContext> {
        self.last_context.lock().unwrap().clone()
    }

    fn capture(&self, ctx: &IntersectionContext<'_>) {
        *self.last_context.lock().unwrap() = Some(CapturedContext {
            filter_bits: ctx.filter.bits(),
            max_distance: ctx.max_distance,
            precision: ctx.precision,
            include_items: ctx.include_items.to_vec(),
            ignore_items: ctx.ignore_items.to_vec(),
        });
    }

    fn hit(&self, position: Vec3) -> PickResult {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
        let sequence = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        PickResult {
            intersects: true,
            object_id: None,
            object_type: None,
            distance: sequence as f32,
            intersection: position,
            surface_normal: Vec3::Y,
            contacts: Vec::new(),
        }
    }
}

impl Intersector for MockIntersector {
    fn intersect_ray(&self, ray: &Ray, ctx: &IntersectionContext<'_>) -> PickResult {
        self.capture(ctx);
        self.hit(ray.origin)
    }

    fn intersect_parabola(&self, parabola: &Parabola, ctx: &IntersectionContext<'_>) -> PickResult {
        self.capture(ctx);
        self.hit(parabola.origin)
    }

    fn intersect_stylus(
        &self,
        tip: &Pose,
        _side: HandSide,
        ctx: &IntersectionContext<'_>,
    ) -> PickResult {
        self.capture(ctx);
        self.hit(tip.position)
    }

    fn intersect_volume(
        &self,
        region: &CollisionRegion,
        ctx: &IntersectionContext<'_>,
    ) -> PickResult {
        self.capture(ctx);
        self.hit(region.position)
    }
}
