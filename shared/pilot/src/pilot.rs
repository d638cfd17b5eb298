use crate::ability::AbilityUpdater;
use crate::config::SteeringConfig;
use crate::control::{ControlSignals, Pilot, SteeringContext};
use crate::dest::{
    BattleManeuver, DestProvider, DestinationIntent, ManeuverDecision, ProviderContext,
};
use crate::math;
use crate::mover::Mover;
use crate::planet_bind::PlanetBind;
use crate::rng::{fork_rng, new_rng};
use crate::scratch::{ScratchArena, ScratchStats};
use crate::shooter::Shooter;
use crate::ship::{FarShip, HullConfig, ShipState};
use crate::world::WorldView;

/// Whether any gun is ready, and whether aiming it means turning the hull.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GunReadiness {
    NotReady,
    Unfixed,
    Fixed,
}

impl GunReadiness {
    pub fn of(ship: &ShipState) -> GunReadiness {
        for second in [false, true] {
            if let Some(gun) = ship.gun(second) {
                if gun.can_shoot() {
                    return if gun.fixed {
                        GunReadiness::Fixed
                    } else {
                        GunReadiness::Unfixed
                    };
                }
            }
        }
        GunReadiness::NotReady
    }

    pub fn can_shoot(self) -> bool {
        self != GunReadiness::NotReady
    }
}

/// Distance to a destination that counts as "arrived".
pub fn max_idle_dist(config: &SteeringConfig, hull: &HullConfig) -> f64 {
    hull.approx_radius.max(config.min_idle_dist)
}

/// Cruise speed while fighting. Big ships hold back; everyone else also
/// keeps up with the enemy.
pub fn battle_speed(
    config: &SteeringConfig,
    hull: &HullConfig,
    near_ground: bool,
    cruise_speed: f64,
    enemy_speed: f64,
) -> f64 {
    let cap = if near_ground {
        config.max_ground_battle_speed
    } else if hull.is_big() {
        config.max_battle_speed_big
    } else {
        config.max_battle_speed
    };
    let mut speed = cruise_speed.min(cap);
    if !hull.is_big() {
        speed += enemy_speed;
    }
    speed
}

/// Flies one autonomous ship.
pub struct AiPilot {
    provider: Box<dyn DestProvider>,
    mover: Mover,
    shooter: Shooter,
    battle: BattleManeuver,
    ability: AbilityUpdater,
    config: SteeringConfig,
    scratch: ScratchArena,
    controls: ControlSignals,
    intent: DestinationIntent,
    planet_bind: Option<PlanetBind>,
    bind_await: f64,
    re_equip_await: f64,
    re_equip_due: bool,
}

impl AiPilot {
    pub fn new(provider: Box<dyn DestProvider>, config: SteeringConfig, seed: u64) -> AiPilot {
        log::info!("creating pilot with seed {}", seed);
        let mut rng = new_rng(seed);
        let ability = AbilityUpdater::new(&mut rng);
        let battle = BattleManeuver::new(&config, fork_rng(&mut rng));
        AiPilot {
            provider,
            mover: Mover::new(),
            shooter: Shooter::new(),
            battle,
            ability,
            config,
            scratch: ScratchArena::new(),
            controls: ControlSignals::default(),
            intent: DestinationIntent::default(),
            planet_bind: None,
            bind_await: 0.0,
            re_equip_await: 0.0,
            re_equip_due: false,
        }
    }

    pub fn config(&self) -> &SteeringConfig {
        &self.config
    }

    /// The intent the mover worked from on the last tick.
    pub fn intent(&self) -> &DestinationIntent {
        &self.intent
    }

    pub fn provider(&self) -> &dyn DestProvider {
        self.provider.as_ref()
    }

    pub fn mover(&self) -> &Mover {
        &self.mover
    }

    pub fn shooter(&self) -> &Shooter {
        &self.shooter
    }

    pub fn ability(&self) -> &AbilityUpdater {
        &self.ability
    }

    pub fn planet_bind(&self) -> Option<&PlanetBind> {
        self.planet_bind.as_ref()
    }

    /// Set on the ticks where the host should let the ship swap equipment.
    pub fn re_equip_due(&self) -> bool {
        self.re_equip_due
    }

    pub fn scratch_stats(&self) -> ScratchStats {
        self.scratch.stats()
    }

    fn tick_re_equip(&mut self, dt: f64) {
        self.re_equip_due = self.re_equip_await <= 0.0;
        if self.re_equip_due {
            self.re_equip_await = self.config.max_re_equip_await;
        } else {
            self.re_equip_await -= dt;
        }
    }
}

impl Pilot for AiPilot {
    fn update(
        &mut self,
        world: &dyn WorldView,
        ship: &ShipState,
        nearest_enemy: Option<&ShipState>,
    ) -> ControlSignals {
        self.ability.update(ship, nearest_enemy);
        self.planet_bind = None;
        let max_idle_dist = max_idle_dist(&self.config, &ship.hull);
        self.provider.update(&ProviderContext {
            world,
            config: &self.config,
            ship_position: ship.position,
            max_idle_dist,
            hull: &ship.hull,
            nearest_enemy,
        });

        let readiness = GunReadiness::of(ship);
        let can_shoot = readiness.can_shoot();
        let nearest_planet = world.nearest_planet(ship.position);
        let near_ground = nearest_planet.map_or(false, |p| p.is_near_ground(ship.position));

        let ctx = SteeringContext {
            world,
            scratch: &self.scratch,
            config: &self.config,
            ship,
            nearest_planet,
        };
        let mut intent = DestinationIntent {
            desired_speed: self.provider.desired_speed(),
            ..Default::default()
        };
        if ship.engine.is_some() {
            let engagement = nearest_enemy.and_then(|enemy| {
                match self
                    .provider
                    .evaluate_maneuver(&self.config, can_shoot, enemy, near_ground)
                {
                    ManeuverDecision::NotApplicable => None,
                    decision => Some((decision, enemy)),
                }
            });
            match engagement {
                Some((decision, enemy)) => {
                    let plan = self.battle.plan(
                        &ctx,
                        decision,
                        enemy,
                        readiness == GunReadiness::Unfixed,
                        near_ground,
                    );
                    intent.destination = Some(plan.destination);
                    intent.stop_near_destination = plan.stop_near_destination;
                    intent.destination_velocity = enemy.velocity;
                    intent.desired_speed = battle_speed(
                        &self.config,
                        &ship.hull,
                        near_ground,
                        intent.desired_speed,
                        enemy.velocity.magnitude(),
                    );
                }
                None => intent = self.provider.intent(),
            }
        }

        self.mover.update(&ctx, &intent, max_idle_dist);
        self.shooter.update(
            &self.scratch,
            &self.config,
            ship,
            nearest_enemy,
            self.mover.steering(),
            can_shoot,
        );
        if ship.engine.is_some() && !self.mover.is_active() && !self.shooter.is_turning() {
            self.mover.rotate_on_idle(
                &self.config,
                ship,
                &intent,
                nearest_planet,
                max_idle_dist,
            );
        }
        self.tick_re_equip(world.time_step());
        debug_assert!(
            self.scratch.is_balanced(),
            "scratch vectors leaked: {:?}",
            self.scratch.stats()
        );

        let steering = self.mover.steering().or(self.shooter.steering());
        self.intent = intent;
        self.controls = ControlSignals {
            thrust_forward: self.mover.thrust(),
            turn_left: steering.is_left(),
            turn_right: steering.is_right(),
            fire: self.shooter.fire(),
            fire2: self.shooter.fire2(),
            use_ability: self.ability.use_ability(),
        };
        self.controls
    }

    fn update_far(&mut self, world: &dyn WorldView, ship: &mut FarShip) {
        let max_idle_dist = max_idle_dist(&self.config, &ship.hull);
        self.provider.update(&ProviderContext {
            world,
            config: &self.config,
            ship_position: ship.position,
            max_idle_dist,
            hull: &ship.hull,
            nearest_enemy: None,
        });
        self.intent = self.provider.intent();
        self.controls = ControlSignals::default();
        let dt = world.time_step();

        match (self.intent.destination, ship.engine) {
            (Some(dest), Some(engine)) => {
                let to_dest_len = (dest - ship.position).magnitude();
                let desired_angle = if self.intent.stop_near_destination
                    && to_dest_len < self.config.far_stop_dist
                {
                    ship.velocity = self.intent.destination_velocity;
                    ship.angle
                } else {
                    let mut angle = math::angle_between(ship.position, dest);
                    if self.intent.avoid_large_bodies {
                        angle = self.mover.big_obj_avoider().avoid(
                            world,
                            &self.scratch,
                            &self.config,
                            ship.position,
                            dest,
                            angle,
                        );
                    }
                    let mut speed = math::approach(
                        ship.velocity.magnitude(),
                        self.intent.desired_speed,
                        engine.acceleration * dt,
                    );
                    if to_dest_len < speed {
                        speed = to_dest_len;
                    }
                    ship.velocity = math::from_angle_len(angle, speed);
                    angle
                };
                ship.angle =
                    math::approach_angle(ship.angle, desired_angle, engine.max_rotation_speed * dt);
            }
            _ => {
                if self.planet_bind.is_none() {
                    if self.bind_await > 0.0 {
                        self.bind_await -= dt;
                    } else {
                        self.planet_bind = PlanetBind::try_bind(world, ship.position, ship.angle);
                        self.bind_await = self.config.max_bind_await;
                    }
                }
                if let Some(bind) = &self.planet_bind {
                    let diff = bind.diff(world, ship.position);
                    let angle = bind.desired_angle(world);
                    if let (Some(diff), Some(angle)) = (diff, angle) {
                        if dt > 0.0 {
                            ship.velocity = diff / dt;
                        }
                        ship.angle = angle;
                    }
                }
            }
        }

        ship.position += ship.velocity * dt;
        debug_assert!(self.scratch.is_balanced());
    }

    fn controls(&self) -> ControlSignals {
        self.controls
    }

    fn to_debug_string(&self) -> String {
        format!("mover_active: {}", self.mover.is_active())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ship::{Gun, GunMount, HullClass};
    use approx::assert_abs_diff_eq;
    use test_log::test;

    #[test]
    fn test_gun_readiness() {
        let mut ship = ShipState::default();
        assert_eq!(GunReadiness::of(&ship), GunReadiness::NotReady);

        ship.secondary = Some(GunMount {
            gun: Some(Gun {
                fixed: false,
                ..Default::default()
            }),
            ..Default::default()
        });
        assert_eq!(GunReadiness::of(&ship), GunReadiness::Unfixed);

        ship.primary = Some(GunMount::default());
        assert_eq!(GunReadiness::of(&ship), GunReadiness::Fixed);

        ship.primary.as_mut().unwrap().gun.as_mut().unwrap().ammo = 0;
        assert_eq!(GunReadiness::of(&ship), GunReadiness::Unfixed);
    }

    #[test]
    fn test_battle_speed_caps() {
        let config = SteeringConfig::default();
        let small = HullConfig::default();
        let big = HullConfig {
            class: HullClass::Big,
            ..Default::default()
        };
        assert_eq!(battle_speed(&config, &big, false, 2.0, 3.0), 1.0);
        assert_eq!(battle_speed(&config, &small, false, 4.0, 3.0), 5.0);
        assert_abs_diff_eq!(battle_speed(&config, &small, true, 4.0, 3.0), 3.7, epsilon = 1e-9);
        assert_eq!(battle_speed(&config, &small, false, 1.5, 0.0), 1.5);
    }

    #[test]
    fn test_max_idle_dist() {
        let config = SteeringConfig::default();
        assert_eq!(max_idle_dist(&config, &HullConfig::default()), 0.8);
        let hull = HullConfig {
            approx_radius: 2.0,
            ..Default::default()
        };
        assert_eq!(max_idle_dist(&config, &hull), 2.0);
    }
}
