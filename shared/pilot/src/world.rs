use crate::math::{self, Vec2};
use nalgebra::Point2;
use rapier2d_f64::data::arena::{Arena, Index};
use rapier2d_f64::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Hash, PartialEq, Eq, Serialize, Deserialize, Debug)]
pub struct PlanetId(pub usize);

#[derive(Clone, Copy, Hash, PartialEq, Eq, Debug)]
pub struct ShipHandle(pub Index);

#[derive(Clone, Debug)]
pub struct Planet {
    pub id: PlanetId,
    pub system: usize,
    pub position: Vec2,
    pub velocity: Vec2,
    pub angle: f64,
    pub rotation_speed: f64,
    pub ground_height: f64,
    pub atmosphere_height: f64,
    pub gravity_constant: f64,
    /// Planet-relative landing spots.
    pub landing_places: Vec<Vec2>,
}

impl Default for Planet {
    fn default() -> Planet {
        Planet {
            id: PlanetId(0),
            system: 0,
            position: Vec2::zeros(),
            velocity: Vec2::zeros(),
            angle: 0.0,
            rotation_speed: 0.0,
            ground_height: 10.0,
            atmosphere_height: 14.0,
            gravity_constant: 1.0,
            landing_places: vec![],
        }
    }
}

impl Planet {
    pub fn full_height(&self) -> f64 {
        self.ground_height + self.atmosphere_height
    }

    pub fn is_near_ground(&self, pos: Vec2) -> bool {
        (self.position - pos).magnitude() - self.ground_height < 0.25 * self.atmosphere_height
    }

    pub fn is_inside_atmosphere(&self, pos: Vec2) -> bool {
        (self.position - pos).magnitude() < self.full_height()
    }

    /// Velocity of a point co-rotating with the surface.
    pub fn velocity_at(&self, pos: Vec2) -> Vec2 {
        let to_pos = pos - self.position;
        let tangent_speed = math::angle_to_arc(self.rotation_speed, to_pos.magnitude());
        math::from_angle_len(math::angle_of(to_pos) + 90.0, tangent_speed) + self.velocity
    }

    pub fn to_world(&self, rel: Vec2) -> Vec2 {
        math::to_world(rel, self.angle, self.position)
    }

    pub fn to_rel(&self, pos: Vec2) -> Vec2 {
        math::to_rel(pos, self.angle, self.position)
    }
}

#[derive(Clone, Debug)]
pub struct SolSystem {
    pub position: Vec2,
    pub sun_radius: f64,
    pub planets: Vec<PlanetId>,
    /// Hard systems let explorers visit every planet.
    pub hard: bool,
}

/// Where a tracked ship is this tick, whichever representation it is in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShipLocation {
    pub position: Vec2,
    pub velocity: Vec2,
    pub approx_radius: f64,
}

/// Read-only queries the steering code makes against the simulation.
pub trait WorldView {
    fn time_step(&self) -> f64;

    fn planets(&self) -> &[Planet];

    fn systems(&self) -> &[SolSystem];

    fn locate_ship(&self, handle: ShipHandle) -> Option<ShipLocation>;

    /// Whether a segment hits any small body other than `exclude`.
    fn ray_hits_obstacle(&self, from: Vec2, to: Vec2, exclude: Option<ColliderHandle>) -> bool;

    fn planet(&self, id: PlanetId) -> Option<&Planet> {
        self.planets().get(id.0)
    }

    fn nearest_planet(&self, pos: Vec2) -> Option<&Planet> {
        self.planets().iter().min_by(|a, b| {
            let da = (a.position - pos).magnitude_squared();
            let db = (b.position - pos).magnitude_squared();
            da.total_cmp(&db)
        })
    }
}

pub struct World {
    time_step: f64,
    systems: Vec<SolSystem>,
    planets: Vec<Planet>,
    ships: Arena<ShipLocation>,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    query_pipeline: QueryPipeline,
}

impl World {
    pub fn new(time_step: f64) -> World {
        World {
            time_step,
            systems: Vec::new(),
            planets: Vec::new(),
            ships: Arena::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    pub fn add_system(&mut self, position: Vec2, sun_radius: f64, hard: bool) -> usize {
        self.systems.push(SolSystem {
            position,
            sun_radius,
            planets: vec![],
            hard,
        });
        self.systems.len() - 1
    }

    pub fn add_planet(&mut self, mut planet: Planet) -> PlanetId {
        let id = PlanetId(self.planets.len());
        planet.id = id;
        if let Some(system) = self.systems.get_mut(planet.system) {
            system.planets.push(id);
        }
        self.planets.push(planet);
        id
    }

    pub fn planet_mut(&mut self, id: PlanetId) -> Option<&mut Planet> {
        self.planets.get_mut(id.0)
    }

    pub fn rotate_planets(&mut self, dt: f64) {
        for planet in self.planets.iter_mut() {
            planet.angle = math::normalize_angle(planet.angle + planet.rotation_speed * dt);
        }
    }

    pub fn track_ship(&mut self, location: ShipLocation) -> ShipHandle {
        ShipHandle(self.ships.insert(location))
    }

    pub fn update_ship(&mut self, handle: ShipHandle, location: ShipLocation) {
        if let Some(slot) = self.ships.get_mut(handle.0) {
            *slot = location;
        }
    }

    pub fn untrack_ship(&mut self, handle: ShipHandle) {
        self.ships.remove(handle.0);
    }

    /// Adds a round small body and returns its collider.
    pub fn add_body(&mut self, position: Vec2, radius: f64) -> ColliderHandle {
        let collider = ColliderBuilder::ball(radius).translation(position).build();
        let handle = self.colliders.insert(collider);
        self.refresh_queries();
        handle
    }

    pub fn move_body(&mut self, handle: ColliderHandle, position: Vec2) {
        if let Some(collider) = self.colliders.get_mut(handle) {
            collider.set_translation(position);
        }
        self.refresh_queries();
    }

    pub fn remove_body(&mut self, handle: ColliderHandle) {
        self.colliders.remove(
            handle,
            &mut IslandManager::new(),
            &mut self.bodies,
            /*wake_up=*/ false,
        );
        self.refresh_queries();
    }

    fn refresh_queries(&mut self) {
        self.query_pipeline.update_with_mode(
            &self.bodies,
            &self.colliders,
            QueryPipelineMode::CurrentPosition,
        );
    }
}

impl WorldView for World {
    fn time_step(&self) -> f64 {
        self.time_step
    }

    fn planets(&self) -> &[Planet] {
        &self.planets
    }

    fn systems(&self) -> &[SolSystem] {
        &self.systems
    }

    fn locate_ship(&self, handle: ShipHandle) -> Option<ShipLocation> {
        self.ships.get(handle.0).copied()
    }

    fn ray_hits_obstacle(&self, from: Vec2, to: Vec2, exclude: Option<ColliderHandle>) -> bool {
        let ray = Ray::new(Point2::from(from), to - from);
        let mut filter = QueryFilter::default();
        if let Some(handle) = exclude {
            filter = filter.exclude_collider(handle);
        }
        self.query_pipeline
            .cast_ray(&self.bodies, &self.colliders, &ray, 1.0, true, filter)
            .is_some()
    }
}
