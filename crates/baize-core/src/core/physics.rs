use glam::Vec2;
use rapier2d::prelude::*;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Conversion helpers (private) — glam ↔ nalgebra
// ---------------------------------------------------------------------------

fn vec2_to_na(v: Vec2) -> nalgebra::Vector2<f32> {
    nalgebra::Vector2::new(v.x, v.y)
}

fn na_to_vec2(v: &nalgebra::Vector2<f32>) -> Vec2 {
    Vec2::new(v.x, v.y)
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// The kind of rigid body. Pool only needs rolling balls and immovable rails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyType {
    Dynamic,
    Fixed,
}

impl BodyType {
    fn to_rapier(self) -> RigidBodyType {
        match self {
            BodyType::Dynamic => RigidBodyType::Dynamic,
            BodyType::Fixed => RigidBodyType::Fixed,
        }
    }
}

/// Shape description for a collider.
#[derive(Debug, Clone, Copy)]
pub enum ColliderDesc {
    Ball { radius: f32 },
    Cuboid { half_width: f32, half_height: f32 },
}

impl ColliderDesc {
    fn build_collider(&self) -> ColliderBuilder {
        match *self {
            ColliderDesc::Ball { radius } => ColliderBuilder::ball(radius),
            ColliderDesc::Cuboid { half_width, half_height } => {
                ColliderBuilder::cuboid(half_width, half_height)
            }
        }
    }
}

/// Physical material properties for a collider.
#[derive(Debug, Clone, Copy)]
pub struct ColliderMaterial {
    pub restitution: f32,
    pub friction: f32,
    pub density: f32,
}

/// Builder for describing a rigid body before creation.
#[derive(Debug, Clone)]
pub struct BodyDesc {
    pub body_type: BodyType,
    pub position: Vec2,
    pub velocity: Vec2,
    pub ccd: bool,
    pub collider: ColliderDesc,
    pub linear_damping: f32,
    pub angular_damping: f32,
}

impl BodyDesc {
    /// Create a dynamic body description with the given collider shape.
    pub fn dynamic(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Dynamic,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            ccd: false,
            collider,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    /// Create a fixed (static) body description with the given collider shape.
    pub fn fixed(collider: ColliderDesc) -> Self {
        Self {
            body_type: BodyType::Fixed,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            ccd: false,
            collider,
            linear_damping: 0.0,
            angular_damping: 0.0,
        }
    }

    pub fn with_position(mut self, pos: Vec2) -> Self {
        self.position = pos;
        self
    }

    pub fn with_velocity(mut self, vel: Vec2) -> Self {
        self.velocity = vel;
        self
    }

    pub fn with_ccd(mut self, enabled: bool) -> Self {
        self.ccd = enabled;
        self
    }

    /// Set the linear damping (velocity decay). This is how felt and air
    /// friction are modeled on a top-down table.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set the angular damping (spin decay).
    pub fn with_angular_damping(mut self, damping: f32) -> Self {
        self.angular_damping = damping;
        self
    }
}

/// Handle pair referencing Rapier internals, stored on the owning ball entry.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsBody {
    pub body_handle: RigidBodyHandle,
    pub collider_handle: ColliderHandle,
}

/// A contact between two bodies, reported for the step in which it started.
///
/// `a` and `b` are the tags the bodies were created with. `point` is the
/// world-space contact point when the narrow phase has one; callers fall back
/// to the midpoint of the two bodies otherwise. `impact_speed` is the sum of
/// both bodies' speeds at the moment of contact (units/second).
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    pub a: u32,
    pub b: u32,
    pub point: Option<Vec2>,
    pub impact_speed: f32,
}

// ---------------------------------------------------------------------------
// WASM-safe event collector (no crossbeam)
// ---------------------------------------------------------------------------

struct DirectEventCollector {
    contacts: Mutex<Vec<ContactEvent>>,
}

impl DirectEventCollector {
    fn new() -> Self {
        Self {
            contacts: Mutex::new(Vec::new()),
        }
    }

    fn drain_contacts(&self) -> Vec<ContactEvent> {
        std::mem::take(&mut *self.contacts.lock().unwrap())
    }
}

impl EventHandler for DirectEventCollector {
    fn handle_collision_event(
        &self,
        bodies: &RigidBodySet,
        colliders: &ColliderSet,
        event: CollisionEvent,
        contact_pair: Option<&ContactPair>,
    ) {
        // Only contact starts matter to the game; resting/separating pairs
        // never trigger effects or rules.
        let (h1, h2) = match event {
            CollisionEvent::Started(h1, h2, _) => (h1, h2),
            CollisionEvent::Stopped(..) => return,
        };

        let resolve = |h: ColliderHandle| -> Option<(u32, f32)> {
            let collider = colliders.get(h)?;
            let body = bodies.get(collider.parent()?)?;
            Some((body.user_data as u32, body.linvel().norm()))
        };

        let (Some((tag_a, speed_a)), Some((tag_b, speed_b))) = (resolve(h1), resolve(h2)) else {
            return;
        };

        // World-space contact point from the first manifold, when available.
        let point = contact_pair.and_then(|pair| {
            let collider = colliders.get(pair.collider1)?;
            let manifold = pair.manifolds.first()?;
            let local = manifold.points.first()?.local_p1;
            let world = collider.position() * local;
            Some(Vec2::new(world.x, world.y))
        });

        self.contacts.lock().unwrap().push(ContactEvent {
            a: tag_a,
            b: tag_b,
            point,
            impact_speed: speed_a + speed_b,
        });
    }

    fn handle_contact_force_event(
        &self,
        _dt: f32,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: f32,
    ) {
        // We don't use contact force events but the trait requires this.
    }
}

// ---------------------------------------------------------------------------
// PhysicsWorld
// ---------------------------------------------------------------------------

/// Wraps all Rapier2D boilerplate into a single, easy-to-use struct.
///
/// The world is the sole owner of body identity and lifetime: balls are
/// created at rack setup, removed when pocketed, and re-created on a scratch
/// respawn. Gravity is zero — the table is viewed top-down.
pub struct PhysicsWorld {
    gravity: nalgebra::Vector2<f32>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    event_collector: DirectEventCollector,
}

impl PhysicsWorld {
    pub fn new() -> Self {
        Self {
            gravity: nalgebra::Vector2::zeros(),
            integration_parameters: IntegrationParameters::default(),
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            event_collector: DirectEventCollector::new(),
        }
    }

    /// Set the integration timestep.
    pub fn set_dt(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
    }

    /// Create a rigid body + collider and return handles.
    /// The tag is stored in the body's `user_data` for contact lookups.
    pub fn create_body(&mut self, tag: u32, desc: &BodyDesc, material: ColliderMaterial) -> PhysicsBody {
        let rb = RigidBodyBuilder::new(desc.body_type.to_rapier())
            .translation(vec2_to_na(desc.position))
            .linvel(vec2_to_na(desc.velocity))
            .ccd_enabled(desc.ccd)
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .user_data(tag as u128)
            .build();

        let body_handle = self.bodies.insert(rb);

        let collider = desc
            .collider
            .build_collider()
            .restitution(material.restitution)
            .friction(material.friction)
            .density(material.density)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build();

        let collider_handle =
            self.colliders
                .insert_with_parent(collider, body_handle, &mut self.bodies);

        PhysicsBody {
            body_handle,
            collider_handle,
        }
    }

    /// Remove a body and all its colliders from the simulation.
    pub fn remove_body(&mut self, body: &PhysicsBody) {
        self.bodies.remove(
            body.body_handle,
            &mut self.island_manager,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Step the simulation and collect contact-start events into the Vec.
    pub fn step_into(&mut self, contacts: &mut Vec<ContactEvent>) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            None,
            &(),
            &self.event_collector,
        );

        contacts.extend(self.event_collector.drain_contacts());
    }

    /// Apply an instantaneous impulse to a body.
    pub fn apply_impulse(&mut self, body: &PhysicsBody, impulse: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.apply_impulse(vec2_to_na(impulse), true);
        }
    }

    /// Set the linear velocity of a body directly.
    pub fn set_velocity(&mut self, body: &PhysicsBody, vel: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_linvel(vec2_to_na(vel), true);
        }
    }

    /// Get the current linear velocity of a body.
    pub fn velocity(&self, body: &PhysicsBody) -> Vec2 {
        self.bodies
            .get(body.body_handle)
            .map(|rb| na_to_vec2(rb.linvel()))
            .unwrap_or(Vec2::ZERO)
    }

    /// Teleport a body, e.g. for ball-in-hand placement.
    pub fn set_position(&mut self, body: &PhysicsBody, pos: Vec2) {
        if let Some(rb) = self.bodies.get_mut(body.body_handle) {
            rb.set_translation(vec2_to_na(pos), true);
        }
    }

    /// Get the current position and rotation of a body.
    pub fn body_position(&self, body: &PhysicsBody) -> (Vec2, f32) {
        self.bodies
            .get(body.body_handle)
            .map(|rb| {
                let iso = rb.position();
                (Vec2::new(iso.translation.x, iso.translation.y), iso.rotation.angle())
            })
            .unwrap_or((Vec2::ZERO, 0.0))
    }

    /// Number of rigid bodies in the simulation.
    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_MATERIAL: ColliderMaterial = ColliderMaterial {
        restitution: 0.75,
        friction: 0.01,
        density: 0.05,
    };

    #[test]
    fn create_and_remove_body() {
        let mut world = PhysicsWorld::new();
        let body = world.create_body(
            1,
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 }),
            TEST_MATERIAL,
        );
        assert_eq!(world.body_count(), 1);
        world.remove_body(&body);
        assert_eq!(world.body_count(), 0);
    }

    #[test]
    fn impulse_changes_velocity() {
        let mut world = PhysicsWorld::new();
        world.set_dt(1.0 / 60.0);
        let body = world.create_body(
            1,
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 }),
            TEST_MATERIAL,
        );

        assert_eq!(world.velocity(&body), Vec2::ZERO);
        world.apply_impulse(&body, Vec2::new(100.0, 0.0));

        let mut contacts = Vec::new();
        world.step_into(&mut contacts);
        let vel = world.velocity(&body);
        assert!(vel.x > 0.0, "velocity should be positive X: {:?}", vel);
    }

    #[test]
    fn set_velocity_directly() {
        let mut world = PhysicsWorld::new();
        let body = world.create_body(
            1,
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 }),
            TEST_MATERIAL,
        );

        world.set_velocity(&body, Vec2::new(50.0, -30.0));
        let vel = world.velocity(&body);
        assert!((vel.x - 50.0).abs() < 0.001);
        assert!((vel.y - (-30.0)).abs() < 0.001);
    }

    #[test]
    fn set_position_teleports() {
        let mut world = PhysicsWorld::new();
        let body = world.create_body(
            1,
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 }),
            TEST_MATERIAL,
        );

        world.set_position(&body, Vec2::new(200.0, 100.0));
        let (pos, _) = world.body_position(&body);
        assert!((pos.x - 200.0).abs() < 0.001);
        assert!((pos.y - 100.0).abs() < 0.001);
    }

    #[test]
    fn fixed_body_does_not_move() {
        let mut world = PhysicsWorld::new();
        world.set_dt(1.0 / 60.0);

        let body = world.create_body(
            7,
            &BodyDesc::fixed(ColliderDesc::Cuboid {
                half_width: 100.0,
                half_height: 10.0,
            })
            .with_position(Vec2::new(0.0, 500.0)),
            ColliderMaterial {
                restitution: 1.0,
                friction: 0.0,
                density: 1.0,
            },
        );

        let mut contacts = Vec::new();
        for _ in 0..10 {
            world.step_into(&mut contacts);
        }

        let (pos, _) = world.body_position(&body);
        assert!((pos.y - 500.0).abs() < 0.001, "fixed body moved: y={}", pos.y);
    }

    #[test]
    fn contact_events_between_converging_balls() {
        let mut world = PhysicsWorld::new();
        world.set_dt(1.0 / 60.0);

        let _a = world.create_body(
            3,
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
                .with_position(Vec2::new(0.0, 0.0))
                .with_velocity(Vec2::new(200.0, 0.0)),
            TEST_MATERIAL,
        );
        let _b = world.create_body(
            5,
            &BodyDesc::dynamic(ColliderDesc::Ball { radius: 10.0 })
                .with_position(Vec2::new(50.0, 0.0))
                .with_velocity(Vec2::new(-200.0, 0.0)),
            TEST_MATERIAL,
        );

        let mut contacts = Vec::new();
        for _ in 0..60 {
            world.step_into(&mut contacts);
        }

        assert!(!contacts.is_empty(), "converging balls should make contact");
        let first = &contacts[0];
        let tags = [first.a, first.b];
        assert!(tags.contains(&3));
        assert!(tags.contains(&5));
        assert!(
            first.impact_speed > 100.0,
            "impact speed should reflect both bodies: {}",
            first.impact_speed
        );
        if let Some(point) = first.point {
            // Contact happens somewhere between the two start positions.
            assert!(point.x > 0.0 && point.x < 50.0, "contact point {:?}", point);
        }
    }

    #[test]
    fn builder_pattern() {
        let desc = BodyDesc::dynamic(ColliderDesc::Ball { radius: 5.0 })
            .with_position(Vec2::new(10.0, 20.0))
            .with_velocity(Vec2::new(1.0, 2.0))
            .with_linear_damping(0.6)
            .with_ccd(true);

        assert_eq!(desc.body_type, BodyType::Dynamic);
        assert_eq!(desc.position, Vec2::new(10.0, 20.0));
        assert_eq!(desc.velocity, Vec2::new(1.0, 2.0));
        assert!((desc.linear_damping - 0.6).abs() < 0.001);
        assert!(desc.ccd);
    }
}
