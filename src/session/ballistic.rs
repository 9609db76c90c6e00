use slotmap::SlotMap;
use tracing::trace;

use crate::geometry::PolygonRing;
use crate::math::{Isometry2, Point2, Vector2};

use super::{PhysicalProps, PhysicsWorld};

slotmap::new_key_type! {
    /// Unique identifier for a body in a [`BallisticWorld`].
    pub struct BodyId;
}

/// Tunables for [`BallisticWorld`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BallisticParams {
    /// Constant acceleration applied to every body.
    pub gravity: Vector2,
    /// Height of the horizontal ground line.
    pub ground_y: f64,
    /// Per-step multiplier on linear velocity.
    pub linear_damping: f64,
    /// Per-step multiplier on angular velocity.
    pub angular_damping: f64,
    /// Vertical speed below which a bounce comes to rest.
    pub rest_speed: f64,
    /// Multiplier on horizontal velocity when a body comes to rest.
    pub ground_friction: f64,
    /// Multiplier on angular velocity on every ground contact.
    pub ground_spin_damping: f64,
}

impl Default for BallisticParams {
    fn default() -> Self {
        Self {
            gravity: Vector2::new(0.0, -30.0),
            ground_y: -100.0,
            linear_damping: 0.98,
            angular_damping: 0.95,
            rest_speed: 0.5,
            ground_friction: 0.9,
            ground_spin_damping: 0.8,
        }
    }
}

#[derive(Debug, Clone)]
struct BallisticBody {
    outline: Vec<Point2>,
    pose: Isometry2,
    velocity: Vector2,
    angular_velocity: f64,
    restitution: f64,
}

impl BallisticBody {
    fn lowest_y(&self) -> f64 {
        self.outline
            .iter()
            .map(|p| self.pose.transform_point(p).y)
            .fold(f64::INFINITY, f64::min)
    }
}

/// A minimal rigid-body world: explicit Euler integration, damping, and a
/// bouncing ground line. Bodies never collide with each other.
///
/// Bodies have unit mass, so a separation impulse is applied directly as a
/// change in velocity.
#[derive(Debug, Default)]
pub struct BallisticWorld {
    params: BallisticParams,
    bodies: SlotMap<BodyId, BallisticBody>,
}

impl BallisticWorld {
    /// Creates an empty world with default parameters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets custom parameters.
    #[must_use]
    pub fn with_params(mut self, params: BallisticParams) -> Self {
        self.params = params;
        self
    }

    /// Number of live bodies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    /// Returns `true` if the world holds no bodies.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Current linear velocity of a body.
    #[must_use]
    pub fn velocity(&self, body: BodyId) -> Option<Vector2> {
        self.bodies.get(body).map(|b| b.velocity)
    }

    fn step_body(params: &BallisticParams, body: &mut BallisticBody, dt: f64) {
        body.velocity += params.gravity * dt;
        body.pose.translation.vector += body.velocity * dt;
        body.pose.rotation *= nalgebra::UnitComplex::new(body.angular_velocity * dt);

        body.velocity *= params.linear_damping;
        body.angular_velocity *= params.angular_damping;

        let lowest = body.lowest_y();
        if lowest < params.ground_y {
            body.pose.translation.vector.y += params.ground_y - lowest;
            if body.velocity.y < 0.0 {
                body.velocity.y = -body.velocity.y * body.restitution;
                if body.velocity.y.abs() < params.rest_speed {
                    body.velocity.y = 0.0;
                    body.velocity.x *= params.ground_friction;
                }
            }
            body.angular_velocity *= params.ground_spin_damping;
        }
    }
}

impl PhysicsWorld for BallisticWorld {
    type Body = BodyId;

    fn create_body(&mut self, ring: &PolygonRing, pose: &Isometry2, props: &PhysicalProps) -> BodyId {
        self.bodies.insert(BallisticBody {
            outline: ring.vertices().to_vec(),
            pose: *pose,
            velocity: Vector2::zeros(),
            angular_velocity: 0.0,
            restitution: props.restitution,
        })
    }

    fn remove_body(&mut self, body: BodyId) {
        self.bodies.remove(body);
    }

    fn step_all(&mut self, dt: f64) {
        trace!(bodies = self.bodies.len(), dt, "ballistic step");
        for body in self.bodies.values_mut() {
            Self::step_body(&self.params, body, dt);
        }
    }

    fn body_pose(&self, body: BodyId) -> Option<Isometry2> {
        self.bodies.get(body).map(|b| b.pose)
    }

    fn apply_separation_impulse(&mut self, body: BodyId, direction: &Vector2) {
        if let Some(b) = self.bodies.get_mut(body) {
            b.velocity += direction;
        }
    }
}
