pub mod ballistic;
mod collaborators;
mod config;
mod fragment;
mod report;

pub use ballistic::{BallisticParams, BallisticWorld, BodyId};
pub use collaborators::{PhysicalProps, PhysicsWorld, Renderer};
pub use config::SessionConfig;
pub use fragment::{Fragment, FragmentId, Lineage};
pub use report::{CutReport, RetainReason, SplitRecord};

use slotmap::SlotMap;
use tracing::{debug, warn};

use crate::error::{GeometryError, PolyshardError, Result};
use crate::geometry::{CutLine, PolygonRing, VisualPayload};
use crate::math::{Isometry2, Point2, Vector2};
use crate::operations::{
    Classification, Cut, CutOutcome, CutPiece, DustBurst, ExtractSilhouette, FragmentPolicy,
    Simplify,
};
use crate::tessellation::{TessellateRing, TriangleMesh2};

#[derive(Debug)]
struct Entry<H, B> {
    fragment: Fragment,
    handle: H,
    body: B,
}

/// A ring re-expressed around its own centroid, triangulated for display.
struct Placed {
    local: PolygonRing,
    mesh: TriangleMesh2,
    pose: Isometry2,
    area: f64,
}

impl Placed {
    fn new(world: &PolygonRing) -> Result<Self> {
        let degenerate = || GeometryError::DegenerateRing {
            vertex_count: world.len(),
        };
        let area = world.area();
        if area <= 0.0 {
            return Err(degenerate().into());
        }
        let c = world.centroid().ok_or_else(degenerate)?;
        let local = world.translated(&-c.coords);
        let mesh = TessellateRing::new(&local).execute()?;
        Ok(Self {
            local,
            mesh,
            pose: Isometry2::translation(c.x, c.y),
            area,
        })
    }
}

/// The live set of fragments and the collaborators that display and
/// simulate them.
///
/// Every fragment is owned once, in an arena keyed by [`FragmentId`]. Root
/// shapes are remembered as seeds so [`Session::reset`] can rebuild the
/// initial scene.
pub struct Session<R: Renderer, P: PhysicsWorld> {
    config: SessionConfig,
    policy: FragmentPolicy,
    renderer: R,
    physics: P,
    fragments: SlotMap<FragmentId, Entry<R::Handle, P::Body>>,
    seeds: Vec<(PolygonRing, VisualPayload)>,
}

impl<R: Renderer, P: PhysicsWorld> Session<R, P> {
    /// Creates an empty session.
    ///
    /// # Errors
    ///
    /// Returns `OperationError::InvalidInput` if `config` fails validation.
    pub fn new(renderer: R, physics: P, config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let policy = FragmentPolicy::new().with_dust_ratio(config.dust_ratio)?;
        Ok(Self {
            config,
            policy,
            renderer,
            physics,
            fragments: SlotMap::with_key(),
            seeds: Vec::new(),
        })
    }

    /// Adds a root shape given in world coordinates.
    ///
    /// The fragment is positioned at the ring's centroid and remembered as a
    /// seed for [`Session::reset`].
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::DegenerateRing` if the ring encloses no area,
    /// or `TessellationError::Failed` if it crosses itself.
    pub fn add_shape(&mut self, ring: PolygonRing, payload: VisualPayload) -> Result<FragmentId> {
        let id = self.spawn_root(&ring, payload.clone())?;
        self.seeds.push((ring, payload));
        Ok(id)
    }

    /// Traces the outline of an unordered point cloud and adds it as a root
    /// shape.
    ///
    /// # Errors
    ///
    /// Returns `SilhouetteError::InsufficientPoints` for fewer than 3 unique
    /// points, or any error of [`Session::add_shape`].
    pub fn add_point_cloud(&mut self, points: &[Point2], payload: VisualPayload) -> Result<FragmentId> {
        let ring = ExtractSilhouette::new(points)
            .with_alpha(self.config.silhouette_alpha)
            .execute()?;
        debug!(points = points.len(), outline = ring.len(), "point cloud traced");
        self.add_shape(ring, payload)
    }

    /// Cuts every live fragment the segment passes through.
    ///
    /// The set of fragments is fixed before the first cut, so pieces created
    /// by this call are never cut again by it. Each fragment is either
    /// replaced by its pieces or left untouched.
    pub fn cut(&mut self, line: &CutLine) -> CutReport {
        let snapshot: Vec<FragmentId> = self.fragments.keys().collect();
        let mut report = CutReport::default();
        debug!(fragments = snapshot.len(), length = line.length(), "cut started");

        for id in snapshot {
            let Some(entry) = self.fragments.get(id) else {
                continue;
            };
            report.examined += 1;
            let parent = &entry.fragment;
            let world = parent.world_ring();

            let (positive, negative) = match Cut::new(&world, line).with_params(self.config.cut).execute() {
                CutOutcome::NotIntersecting => {
                    report.retained.push((id, RetainReason::NotIntersecting));
                    continue;
                }
                CutOutcome::Unbalanced {
                    ring_area,
                    pieces_area,
                } => {
                    warn!(?id, ring_area, pieces_area, "cut lost area, fragment retained");
                    report.retained.push((id, RetainReason::DegenerateRing));
                    continue;
                }
                CutOutcome::Split {
                    positive: CutPiece::Ring(pos),
                    negative: CutPiece::Ring(neg),
                } if pos.area() > 0.0 && neg.area() > 0.0 => (pos, neg),
                CutOutcome::Split { positive, negative } => {
                    warn!(
                        ?id,
                        positive = ?positive.ring().map(PolygonRing::area),
                        negative = ?negative.ring().map(PolygonRing::area),
                        "cut produced a degenerate piece, fragment retained"
                    );
                    report.retained.push((id, RetainReason::DegenerateRing));
                    continue;
                }
            };

            let root_area = parent.root_area;
            let mut kept: Vec<(Placed, Vector2)> = Vec::with_capacity(2);
            let mut dust: Vec<PolygonRing> = Vec::new();
            let mut placement_error: Option<PolyshardError> = None;
            for (ring, sign) in [(positive, 1.0), (negative, -1.0)] {
                match self.policy.classify(ring, root_area) {
                    Classification::Keep(ring) => match Placed::new(&ring) {
                        Ok(placed) => kept.push((placed, line.normal() * sign)),
                        Err(err) => placement_error = Some(err),
                    },
                    Classification::Dust(ring) => dust.push(ring),
                }
            }
            if let Some(err) = placement_error {
                warn!(?id, %err, "kept piece cannot be placed, fragment retained");
                report.retained.push((id, RetainReason::DegenerateRing));
                continue;
            }

            let payload = parent.payload.clone();
            let lineage = Lineage::child_of(id, &parent.lineage);
            self.despawn(id);

            for ring in dust {
                self.renderer.dust(&DustBurst::new(ring, payload.clone()));
            }
            let children: Vec<FragmentId> = kept
                .into_iter()
                .map(|(placed, normal)| {
                    let child = self.spawn(placed, root_area, payload.clone(), lineage);
                    if let Some(body) = self.fragments.get(child).map(|e| e.body) {
                        self.physics
                            .apply_separation_impulse(body, &(normal * self.config.separation_impulse));
                    }
                    child
                })
                .collect();

            let dust_count = 2 - children.len();
            debug!(
                ?id,
                children = children.len(),
                dust = dust_count,
                depth = lineage.depth,
                "fragment split"
            );
            report.dust += dust_count;
            report.split.push(SplitRecord {
                parent: id,
                children,
                dust: dust_count,
            });
        }

        debug!(
            examined = report.examined,
            split = report.split.len(),
            dust = report.dust,
            "cut finished"
        );
        report
    }

    /// Advances physics by `dt` seconds and moves every fragment to its
    /// body's new pose.
    pub fn step(&mut self, dt: f64) {
        self.physics.step_all(dt);
        for entry in self.fragments.values_mut() {
            if let Some(pose) = self.physics.body_pose(entry.body) {
                entry.fragment.pose = pose;
                self.renderer.update_transform(entry.handle, &pose);
            }
        }
    }

    /// Removes every fragment and rebuilds the seed shapes.
    pub fn reset(&mut self) {
        self.clear_fragments();
        let seeds = std::mem::take(&mut self.seeds);
        for (ring, payload) in &seeds {
            if let Err(err) = self.spawn_root(ring, payload.clone()) {
                warn!(%err, "seed shape could not be restored");
            }
        }
        self.seeds = seeds;
        debug!(fragments = self.fragments.len(), "session reset");
    }

    /// Removes every fragment and forgets the seed shapes.
    pub fn remove_all(&mut self) {
        self.clear_fragments();
        self.seeds.clear();
    }

    /// Number of live fragments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fragments.len()
    }

    /// Returns `true` if no fragment is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    /// Returns a live fragment.
    #[must_use]
    pub fn get(&self, id: FragmentId) -> Option<&Fragment> {
        self.fragments.get(id).map(|e| &e.fragment)
    }

    /// Iterates over live fragments.
    pub fn iter(&self) -> impl Iterator<Item = (FragmentId, &Fragment)> {
        self.fragments.iter().map(|(id, e)| (id, &e.fragment))
    }

    /// Ids of live fragments.
    #[must_use]
    pub fn ids(&self) -> Vec<FragmentId> {
        self.fragments.keys().collect()
    }

    /// The session's configuration.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The display back end.
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// The physics back end.
    #[must_use]
    pub fn physics(&self) -> &P {
        &self.physics
    }

    fn spawn_root(&mut self, ring: &PolygonRing, payload: VisualPayload) -> Result<FragmentId> {
        let placed = Placed::new(ring)?;
        let root_area = placed.area;
        let id = self.spawn(placed, root_area, payload, Lineage::root());
        debug!(?id, area = root_area, "root shape added");
        Ok(id)
    }

    fn spawn(&mut self, placed: Placed, root_area: f64, payload: VisualPayload, lineage: Lineage) -> FragmentId {
        let Placed {
            local,
            mesh,
            pose,
            area,
        } = placed;
        let handle = self.renderer.present(&local, &mesh, &payload, &pose);
        let outline = Simplify::new(&local)
            .with_max_vertices(self.config.max_physics_vertices)
            .execute();
        let body = self.physics.create_body(&outline, &pose, &self.config.physical);
        self.fragments.insert(Entry {
            fragment: Fragment {
                ring: local,
                pose,
                root_area,
                area,
                payload,
                lineage,
            },
            handle,
            body,
        })
    }

    fn despawn(&mut self, id: FragmentId) {
        if let Some(entry) = self.fragments.remove(id) {
            self.renderer.remove(entry.handle);
            self.physics.remove_body(entry.body);
        }
    }

    fn clear_fragments(&mut self) {
        for (_, entry) in self.fragments.drain() {
            self.renderer.remove(entry.handle);
            self.physics.remove_body(entry.body);
        }
    }
}
