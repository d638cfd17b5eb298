use crate::ship::ShipState;
use rand::Rng;

/// Decides when to trigger the ship's special ability.
///
/// Thresholds are rolled once per pilot so a fleet does not act in lockstep.
#[derive(Clone, Copy, Debug)]
pub struct AbilityUpdater {
    life_threshold: f64,
    charges_to_keep: u32,
    use_ability: bool,
}

impl AbilityUpdater {
    pub fn new(rng: &mut impl Rng) -> Self {
        Self::with_thresholds(rng.gen_range(0.3..0.7), rng.gen_range(1..=2))
    }

    /// `life_threshold` is a fraction of the hull's max life.
    pub fn with_thresholds(life_threshold: f64, charges_to_keep: u32) -> Self {
        log::info!(
            "ability use below {:.2} life keeping {} charges",
            life_threshold,
            charges_to_keep
        );
        Self {
            life_threshold,
            charges_to_keep,
            use_ability: false,
        }
    }

    pub fn update(&mut self, ship: &ShipState, nearest_enemy: Option<&ShipState>) {
        self.use_ability = false;
        if nearest_enemy.is_none() {
            return;
        }
        let ability = match ship.ability {
            Some(ability) => ability,
            None => return,
        };
        if ability.cooldown_remaining > 0.0 {
            return;
        }
        if let Some(charges) = ability.charges {
            if charges <= self.charges_to_keep {
                return;
            }
        }
        if ship.life > ship.hull.max_life * self.life_threshold {
            return;
        }
        self.use_ability = true;
    }

    pub fn use_ability(&self) -> bool {
        self.use_ability
    }

    pub fn life_threshold(&self) -> f64 {
        self.life_threshold
    }

    pub fn charges_to_keep(&self) -> u32 {
        self.charges_to_keep
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::rng::new_rng;
    use crate::ship::ShipAbility;
    use test_log::test;

    fn damaged(life: f64, charges: Option<u32>) -> ShipState {
        ShipState {
            life,
            ability: Some(ShipAbility {
                cooldown_remaining: 0.0,
                charges,
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_random_thresholds_in_range() {
        let mut rng = new_rng(7);
        for _ in 0..100 {
            let updater = AbilityUpdater::new(&mut rng);
            assert!((0.3..0.7).contains(&updater.life_threshold()));
            assert!((1..=2).contains(&updater.charges_to_keep()));
        }
    }

    #[test]
    fn test_uses_ability_when_hurt() {
        let mut updater = AbilityUpdater::with_thresholds(0.5, 1);
        let enemy = ShipState::default();

        updater.update(&damaged(40.0, Some(3)), Some(&enemy));
        assert!(updater.use_ability());

        updater.update(&damaged(60.0, Some(3)), Some(&enemy));
        assert!(!updater.use_ability());

        updater.update(&damaged(40.0, Some(3)), None);
        assert!(!updater.use_ability());
    }

    #[test]
    fn test_keeps_charges_in_reserve() {
        let mut updater = AbilityUpdater::with_thresholds(0.5, 2);
        let enemy = ShipState::default();
        updater.update(&damaged(10.0, Some(2)), Some(&enemy));
        assert!(!updater.use_ability());
        updater.update(&damaged(10.0, Some(3)), Some(&enemy));
        assert!(updater.use_ability());
        updater.update(&damaged(10.0, None), Some(&enemy));
        assert!(updater.use_ability());
    }

    #[test]
    fn test_waits_for_cooldown() {
        let mut updater = AbilityUpdater::with_thresholds(0.5, 1);
        let mut ship = damaged(10.0, None);
        ship.ability.as_mut().unwrap().cooldown_remaining = 1.0;
        updater.update(&ship, Some(&ShipState::default()));
        assert!(!updater.use_ability());
    }
}
