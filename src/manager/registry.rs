//! The pick registry and its budgeted evaluation pass
//!
//! Single point of mutation for all live picks. Creation, removal, and the
//! per-frame pass share one table lock; result and classification reads go
//! through separate read-write caches so they never wait on an in-flight
//! pass. The pass itself walks the live set round-robin under a
//! [`TimeBudget`], so under sustained pressure every pick still gets fresh
//! results within a bounded number of frames.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, RwLock};
use std::time::Instant;

use serde_json::Value;
use uuid::Uuid;

use crate::core::types::{Quat, Result, UP};
use crate::core::Error;
use crate::manager::budget::TimeBudget;
use crate::pick::{
    CollisionPickProperties, JointState, ParabolaPickProperties, Pick, PickCommon, PickId,
    PickResult, PickShape, PickType, RayPickProperties, StylusPickProperties,
    classify_joint_state,
};
use crate::scene::environment::{HandSide, PickEnvironment};
use crate::scene::intersect::{IntersectionContext, Intersector};
use crate::transform::{PickPoseSource, Pose, TransformNode};

/// Live picks plus the round-robin resume point, guarded as one unit.
struct PickTable {
    picks: HashMap<PickId, Pick>,
    /// Where the next pass resumes after a budget-exhausted stop.
    cursor: PickId,
}

/// Registry and scheduler for all live pick queries.
///
/// Explicitly constructed and passed by the embedding host; the host's
/// frame loop calls [`PickManager::update`] once per tick while any thread
/// may create, mutate, remove, or read picks.
pub struct PickManager {
    env: Arc<dyn PickEnvironment>,
    intersector: Arc<dyn Intersector>,
    table: Mutex<PickTable>,
    /// Last successful evaluation per pick, readable without touching the
    /// table lock.
    results: RwLock<HashMap<PickId, PickResult>>,
    /// Anchor classification per pick, fixed at creation.
    joint_states: RwLock<HashMap<PickId, JointState>>,
    next_id: AtomicU32,
    /// Per-frame evaluation ceiling in microseconds; 0 = unbounded.
    budget_us: AtomicU64,
}

impl PickManager {
    /// Create a registry bound to the host's environment and intersection
    /// capability.
    pub fn new(env: Arc<dyn PickEnvironment>, intersector: Arc<dyn Intersector>) -> Self {
        Self {
            env,
            intersector,
            table: Mutex::new(PickTable {
                picks: HashMap::new(),
                cursor: PickId::INVALID,
            }),
            results: RwLock::new(HashMap::new()),
            joint_states: RwLock::new(HashMap::new()),
            next_id: AtomicU32::new(1),
            budget_us: AtomicU64::new(0),
        }
    }

    // --- Creation ---

    /// Script-facing front door: create a pick from a raw kind number and a
    /// loose property bag.
    ///
    /// Permissive by contract: unrecognized kinds and malformed property
    /// bags are logged and answered with [`PickId::INVALID`] rather than an
    /// error.
    pub fn create_pick(&self, kind: u32, properties: &Value) -> PickId {
        let Some(kind) = PickType::from_u32(kind) else {
            log::warn!("create_pick: unrecognized pick type {kind}");
            return PickId::INVALID;
        };
        match self.try_create_pick(kind, properties) {
            Ok(id) => id,
            Err(err) => {
                log::warn!("create_pick: {err}");
                PickId::INVALID
            }
        }
    }

    /// Typed front door for hosts that want parse failures surfaced.
    pub fn try_create_pick(&self, kind: PickType, properties: &Value) -> Result<PickId> {
        let id = match kind {
            PickType::Ray => self.create_ray_pick(serde_json::from_value(properties.clone())?),
            PickType::Stylus => {
                self.create_stylus_pick(serde_json::from_value(properties.clone())?)
            }
            PickType::Parabola => {
                self.create_parabola_pick(serde_json::from_value(properties.clone())?)
            }
            PickType::Collision => {
                let props: CollisionPickProperties = serde_json::from_value(properties.clone())?;
                if props.shape.is_none() {
                    return Err(Error::Shape("collision pick requires a shape".into()));
                }
                self.create_collision_pick(props)
            }
        };
        Ok(id)
    }

    /// Create a ray pick.
    pub fn create_ray_pick(&self, props: RayPickProperties) -> PickId {
        let mut table = self.table.lock().unwrap();
        let parent = self.parent_node(
            &table,
            props.parent_id.as_ref(),
            props.parent_joint_index,
            props.joint.as_deref(),
        );
        let joint_state = classify_joint_state(
            props.parent_id.as_ref(),
            props.parent_joint_index,
            props.joint.as_deref(),
            self.env.as_ref(),
        );
        let mut common = PickCommon::new(props.enabled, props.filter, props.max_distance);
        common.parent = parent;
        common.joint_state = joint_state;
        self.insert_pick(
            &mut table,
            Pick {
                common,
                shape: PickShape::Ray(props.shape()),
            },
        )
    }

    /// Create a parabola pick.
    pub fn create_parabola_pick(&self, props: ParabolaPickProperties) -> PickId {
        let mut table = self.table.lock().unwrap();
        let parent = self.parent_node(
            &table,
            props.parent_id.as_ref(),
            props.parent_joint_index,
            props.joint.as_deref(),
        );
        let joint_state = classify_joint_state(
            props.parent_id.as_ref(),
            props.parent_joint_index,
            props.joint.as_deref(),
            self.env.as_ref(),
        );
        let mut common = PickCommon::new(props.enabled, props.filter, props.max_distance);
        common.parent = parent;
        common.joint_state = joint_state;
        self.insert_pick(
            &mut table,
            Pick {
                common,
                shape: PickShape::Parabola(props.shape()),
            },
        )
    }

    /// Create a stylus pick bound to a hand controller.
    pub fn create_stylus_pick(&self, props: StylusPickProperties) -> PickId {
        let mut table = self.table.lock().unwrap();
        let mut common = PickCommon::new(props.enabled, props.filter, props.max_distance);
        common.joint_state = match props.side() {
            HandSide::Left => JointState::LeftHand,
            HandSide::Right => JointState::RightHand,
            HandSide::Invalid => JointState::None,
        };
        self.insert_pick(
            &mut table,
            Pick {
                common,
                shape: PickShape::Stylus(props.shape()),
            },
        )
    }

    /// Create a collision volume pick. The shape is required; without it
    /// this returns [`PickId::INVALID`].
    pub fn create_collision_pick(&self, props: CollisionPickProperties) -> PickId {
        let Some(region) = props.region() else {
            log::warn!("create_collision_pick: missing required shape");
            return PickId::INVALID;
        };
        let mut table = self.table.lock().unwrap();
        let parent = self.parent_node(
            &table,
            props.parent_id.as_ref(),
            props.parent_joint_index,
            props.joint.as_deref(),
        );
        let joint_state = classify_joint_state(
            props.parent_id.as_ref(),
            props.parent_joint_index,
            props.joint.as_deref(),
            self.env.as_ref(),
        );
        let mut common = PickCommon::new(props.enabled, props.filter, props.max_distance);
        common.parent = parent;
        common.joint_state = joint_state;
        self.insert_pick(
            &mut table,
            Pick {
                common,
                shape: PickShape::Collision(region),
            },
        )
    }

    fn parent_node(
        &self,
        table: &PickTable,
        parent_id: Option<&crate::pick::ParentId>,
        parent_joint_index: Option<i32>,
        joint: Option<&str>,
    ) -> Option<TransformNode> {
        TransformNode::from_parent(
            parent_id,
            parent_joint_index.unwrap_or(0),
            joint,
            self.env.as_ref(),
            &|id| table.picks.contains_key(&id),
        )
    }

    fn insert_pick(&self, table: &mut PickTable, pick: Pick) -> PickId {
        let id = PickId(self.next_id.fetch_add(1, Ordering::Relaxed));
        log::debug!("created {:?} pick {}", pick.pick_type(), id.0);
        self.joint_states
            .write()
            .unwrap()
            .insert(id, pick.common.joint_state);
        table.picks.insert(id, pick);
        id
    }

    // --- Mutation (no-ops on unknown ids) ---

    /// Let a pick participate in evaluation again.
    pub fn enable_pick(&self, id: PickId) {
        self.set_enabled(id, true);
    }

    /// Skip a pick during evaluation; its last result is frozen until
    /// re-enabled.
    pub fn disable_pick(&self, id: PickId) {
        self.set_enabled(id, false);
    }

    fn set_enabled(&self, id: PickId, enabled: bool) {
        if let Some(pick) = self.table.lock().unwrap().picks.get_mut(&id) {
            pick.common.enabled = enabled;
        }
    }

    /// Destroy a pick and its transform node. Immediate and total: the id
    /// never resolves again.
    pub fn remove_pick(&self, id: PickId) {
        let mut table = self.table.lock().unwrap();
        if table.picks.remove(&id).is_some() {
            self.results.write().unwrap().remove(&id);
            self.joint_states.write().unwrap().remove(&id);
            log::debug!("removed pick {}", id.0);
        }
    }

    /// Toggle exact-geometry vs. bounding-proxy testing for a pick.
    pub fn set_precision_picking(&self, id: PickId, precision: bool) {
        if let Some(pick) = self.table.lock().unwrap().picks.get_mut(&id) {
            pick.common.precision = precision;
        }
    }

    /// Restrict a pick to the given target objects (empty = unrestricted).
    pub fn set_include_items(&self, id: PickId, items: Vec<Uuid>) {
        if let Some(pick) = self.table.lock().unwrap().picks.get_mut(&id) {
            pick.common.include_items = items;
        }
    }

    /// Exclude the given objects from a pick's intersection tests.
    pub fn set_ignore_items(&self, id: PickId, items: Vec<Uuid>) {
        if let Some(pick) = self.table.lock().unwrap().picks.get_mut(&id) {
            pick.common.ignore_items = items;
        }
    }

    // --- Reads (never blocked by an in-flight pass) ---

    /// Last computed result for a pick, or `None` for unknown or
    /// never-evaluated ids. Non-blocking; never triggers evaluation.
    pub fn get_result(&self, id: PickId) -> Option<PickResult> {
        self.results.read().unwrap().get(&id).cloned()
    }

    /// Whether a pick is anchored to the left hand controller.
    pub fn is_left_hand(&self, id: PickId) -> bool {
        self.joint_state(id) == Some(JointState::LeftHand)
    }

    /// Whether a pick is anchored to the right hand controller.
    pub fn is_right_hand(&self, id: PickId) -> bool {
        self.joint_state(id) == Some(JointState::RightHand)
    }

    /// Whether a pick is anchored to the mouse cursor.
    pub fn is_mouse(&self, id: PickId) -> bool {
        self.joint_state(id) == Some(JointState::Mouse)
    }

    fn joint_state(&self, id: PickId) -> Option<JointState> {
        self.joint_states.read().unwrap().get(&id).copied()
    }

    /// Number of live picks.
    pub fn pick_count(&self) -> usize {
        self.table.lock().unwrap().picks.len()
    }

    // --- Budget ---

    /// Set the per-frame evaluation ceiling in microseconds (0 =
    /// unbounded). Takes effect at the next pass.
    pub fn set_per_frame_time_budget(&self, budget_us: u64) {
        self.budget_us.store(budget_us, Ordering::Relaxed);
    }

    /// Current per-frame evaluation ceiling in microseconds.
    pub fn per_frame_time_budget(&self) -> u64 {
        self.budget_us.load(Ordering::Relaxed)
    }

    // --- Evaluation ---

    /// Run one evaluation pass. Called once per frame by the host.
    ///
    /// Visits live enabled picks round-robin starting at the cursor left by
    /// the previous pass. Each visit resolves the pick's anchor (skipping,
    /// cost-free and result-preserving, when unresolved), places the shape
    /// in world space, runs the intersection test, and charges its measured
    /// cost. Once the budget is exhausted the remaining picks are deferred
    /// and the cursor records where to resume. The first visited pick is
    /// always evaluated, so every pick gets a fresh result within
    /// `pick_count` frames even under a starvation-level budget.
    pub fn update(&self) {
        let mut table = self.table.lock().unwrap();
        let mut budget = TimeBudget::new(self.per_frame_time_budget());

        let mut ids: Vec<PickId> = table.picks.keys().copied().collect();
        if ids.is_empty() {
            table.cursor = PickId::INVALID;
            return;
        }
        ids.sort_unstable();
        let resume = ids.iter().position(|id| *id >= table.cursor).unwrap_or(0);
        ids.rotate_left(resume);

        let mut deferred_from = None;
        for id in ids {
            if budget.exhausted() {
                deferred_from = Some(id);
                break;
            }
            let Some(pick) = table.picks.get(&id) else {
                continue;
            };
            if !pick.common.enabled {
                continue;
            }

            let pose = match &pick.common.parent {
                Some(node) => match node.resolve(self.env.as_ref(), self) {
                    Some(pose) => Some(pose),
                    // Anchor unresolved this frame: previous result stands.
                    None => continue,
                },
                None => None,
            };

            let ctx = IntersectionContext {
                filter: pick.common.filter,
                max_distance: pick.common.max_distance,
                precision: pick.common.precision,
                include_items: &pick.common.include_items,
                ignore_items: &pick.common.ignore_items,
            };

            let started = Instant::now();
            let result = match &pick.shape {
                PickShape::Ray(shape) => {
                    let ray = shape.to_world(pose.as_ref());
                    self.intersector.intersect_ray(&ray, &ctx)
                }
                PickShape::Parabola(shape) => {
                    let avatar_orientation =
                        self.env.local_avatar().map(|a| a.world_pose().orientation);
                    let parabola = shape.to_world(pose.as_ref(), avatar_orientation);
                    self.intersector.intersect_parabola(&parabola, &ctx)
                }
                PickShape::Stylus(shape) => match self.env.hand_pose(shape.side) {
                    Some(tip) => self.intersector.intersect_stylus(&tip, shape.side, &ctx),
                    // Hand not tracked this frame: previous result stands.
                    None => continue,
                },
                PickShape::Collision(region) => {
                    let world = region.to_world(pose.as_ref());
                    self.intersector.intersect_volume(&world, &ctx)
                }
            };
            budget.charge(started.elapsed());

            self.results.write().unwrap().insert(id, result);
        }

        table.cursor = match deferred_from {
            Some(id) => {
                log::trace!(
                    "evaluation budget exhausted after {}us, resuming at pick {}",
                    budget.used_us(),
                    id.0
                );
                id
            }
            None => PickId::INVALID,
        };
    }
}

impl PickPoseSource for PickManager {
    /// Pose derived from a chained pick's last hit: the intersection point,
    /// oriented so local up matches the surface normal.
    fn pick_pose(&self, id: PickId) -> Option<Pose> {
        let results = self.results.read().unwrap();
        let result = results.get(&id)?;
        if !result.intersects {
            return None;
        }
        let orientation = if result.surface_normal.length_squared() > 1e-6 {
            Quat::from_rotation_arc(UP, result.surface_normal.normalize())
        } else {
            Quat::IDENTITY
        };
        Some(Pose {
            position: result.intersection,
            orientation,
            scale: 1.0,
        })
    }
}
