use super::{ai_speed, DestProvider, ManeuverDecision, ProviderContext};
use crate::config::SteeringConfig;
use crate::math::{self, Vec2};
use crate::rng::SeededRng;
use crate::ship::{HullConfig, ShipState};
use crate::world::{PlanetId, WorldView};
use rand::seq::SliceRandom;
use rand::Rng;

/// Wanders between the planets of one system, hovering over a landing site
/// for a while at each stop.
pub struct Explorer {
    rng: SeededRng,
    system: usize,
    aggressive: bool,
    desired_speed: f64,
    planet: Option<PlanetId>,
    rel_destination: Vec2,
    destination_is_landing: bool,
    await_on_planet: f64,
    destination: Option<Vec2>,
    destination_velocity: Vec2,
}

impl Explorer {
    pub fn new(
        world: &dyn WorldView,
        config: &SteeringConfig,
        rng: SeededRng,
        system: usize,
        position: Vec2,
        aggressive: bool,
        hull: &HullConfig,
    ) -> Self {
        let mut explorer = Self {
            rng,
            system,
            aggressive,
            desired_speed: ai_speed(config, hull),
            planet: None,
            rel_destination: Vec2::zeros(),
            destination_is_landing: false,
            await_on_planet: config.max_await_on_planet,
            destination: None,
            destination_velocity: Vec2::zeros(),
        };

        let candidates = explorer.allowed_planets(world, config);
        let with_landing: Vec<PlanetId> = candidates
            .iter()
            .copied()
            .filter(|id| world.planet(*id).map_or(false, |p| !p.landing_places.is_empty()))
            .collect();
        explorer.planet = nearest_of(world, &with_landing, position)
            .or_else(|| nearest_of(world, &candidates, position));
        match explorer.planet {
            Some(_) => explorer.pick_rel_destination(world, config, hull),
            None => log::debug!("system {} has nothing to explore", system),
        }
        explorer
    }

    pub fn planet(&self) -> Option<PlanetId> {
        self.planet
    }

    pub fn is_landing(&self) -> bool {
        self.destination_is_landing
    }

    // Planets in visiting order, minus the outermost ones in easy systems.
    fn allowed_planets(&self, world: &dyn WorldView, config: &SteeringConfig) -> Vec<PlanetId> {
        let system = match world.systems().get(self.system) {
            Some(system) => system,
            None => return vec![],
        };
        let mut count = system.planets.len();
        if !system.hard {
            count = count.saturating_sub(config.last_planets_to_avoid);
        }
        system.planets[..count].to_vec()
    }

    fn pick_rel_destination(
        &mut self,
        world: &dyn WorldView,
        config: &SteeringConfig,
        hull: &HullConfig,
    ) {
        let planet = match self.planet.and_then(|id| world.planet(id)) {
            Some(planet) => planet,
            None => return,
        };
        match planet.landing_places.choose(&mut self.rng) {
            Some(landing) => {
                let len = landing.magnitude();
                let above_ground = if hull.is_big() {
                    0.75 * config.atmosphere_height
                } else {
                    0.75 * hull.size
                };
                self.rel_destination = if len > 0.0 {
                    landing * ((len + above_ground) / len)
                } else {
                    *landing
                };
                self.destination_is_landing = true;
            }
            None => {
                let angle = self.rng.gen_range(-180.0..180.0);
                let height = planet.ground_height + 0.3 * config.atmosphere_height;
                self.rel_destination = math::from_angle_len(angle, height);
                self.destination_is_landing = false;
            }
        }
    }
}

fn nearest_of(world: &dyn WorldView, ids: &[PlanetId], position: Vec2) -> Option<PlanetId> {
    ids.iter()
        .filter_map(|id| world.planet(*id))
        .min_by(|a, b| {
            let da = (a.position - position).magnitude_squared();
            let db = (b.position - position).magnitude_squared();
            da.total_cmp(&db)
        })
        .map(|p| p.id)
}

impl DestProvider for Explorer {
    fn destination(&self) -> Option<Vec2> {
        self.destination
    }

    fn destination_velocity(&self) -> Vec2 {
        self.destination_velocity
    }

    fn desired_speed(&self) -> f64 {
        self.desired_speed
    }

    fn should_stop_near_destination(&self) -> bool {
        true
    }

    fn should_avoid_large_bodies(&self) -> bool {
        true
    }

    fn update(&mut self, ctx: &ProviderContext) {
        let arrived = self
            .destination
            .map_or(false, |d| (d - ctx.ship_position).magnitude() < ctx.max_idle_dist);
        if arrived {
            if self.await_on_planet > 0.0 {
                self.await_on_planet -= ctx.world.time_step();
            } else {
                let candidates = self.allowed_planets(ctx.world, ctx.config);
                self.planet = candidates.choose(&mut self.rng).copied().or(self.planet);
                self.pick_rel_destination(ctx.world, ctx.config, ctx.hull);
                self.await_on_planet = ctx.config.max_await_on_planet;
            }
        }

        let planet = match self.planet.and_then(|id| ctx.world.planet(id)) {
            Some(planet) => planet,
            None => {
                self.destination = None;
                return;
            }
        };
        // Landing places may come or go; follow them.
        if self.destination_is_landing == planet.landing_places.is_empty() {
            self.pick_rel_destination(ctx.world, ctx.config, ctx.hull);
        }
        let destination = planet.to_world(self.rel_destination);
        self.destination = Some(destination);
        self.destination_velocity = planet.velocity_at(destination);
    }

    fn evaluate_maneuver(
        &self,
        _config: &SteeringConfig,
        can_shoot: bool,
        _enemy: &ShipState,
        _near_ground: bool,
    ) -> ManeuverDecision {
        if self.aggressive && can_shoot {
            ManeuverDecision::Engage
        } else {
            ManeuverDecision::NotApplicable
        }
    }
}
