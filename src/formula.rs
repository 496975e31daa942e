//! The primary damage formulas.
//!
//! Min and max damage are the FCS "Cut Damage 1" / "Cut Damage 99" values:
//! the damage assuming all multipliers at 1 and the relevant skill at 1 or
//! 100. The formulas work off the difference between them, which is why the
//! minimum is added back in at the end.

use serde::Serialize;

/// FCS "Cut Damage 1" / "Blunt Damage 1" default.
pub const MIN_DAMAGE: f32 = 20.0;
/// FCS "Cut Damage 99" / "Blunt Damage 99" default.
pub const MAX_DAMAGE: f32 = 80.0;
/// Damage multiplier from the FCS global settings.
pub const DAMAGE_MULTIPLIER: f32 = 0.65;

/// Slider on new game/import. Not exposed in this version.
const GLOBAL_DAMAGE_MODIFIER: f32 = 1.0;
/// Attack power of the combat animation. Almost always 100.
const ATTACK_POWER: f32 = 100.0;

/// Which damage pool a computed value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageKind {
    Cut,
    Blunt,
}

impl std::fmt::Display for DamageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DamageKind::Cut => write!(f, "cut"),
            DamageKind::Blunt => write!(f, "blunt"),
        }
    }
}

/// Weapon and character stats feeding the damage formulas.
///
/// Stats are levels, practically 1-100. Defaults mirror the calculator's
/// initial form values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DamageInputs {
    /// Cut damage multiplier shown on the weapon.
    pub cut_damage: f32,
    /// Blunt damage multiplier shown on the weapon.
    pub blunt_damage: f32,
    pub strength: u8,
    pub dexterity: u8,
    pub weapon_skill: u8,
    /// Per-race scaling, e.g. +50% against beak things.
    pub racial_multiplier: f32,
}

impl Default for DamageInputs {
    fn default() -> Self {
        Self {
            cut_damage: 0.123,
            blunt_damage: 0.123,
            strength: 1,
            dexterity: 1,
            weapon_skill: 1,
            racial_multiplier: 1.0,
        }
    }
}

impl DamageInputs {
    /// Primary cut damage: dexterity and weapon skill each weigh 0.5.
    pub fn cut(&self) -> f32 {
        let spread = MAX_DAMAGE - MIN_DAMAGE;
        let skill_part = spread * 0.5 * (f32::from(self.dexterity) * 0.01)
            + spread * 0.5 * (f32::from(self.weapon_skill) * 0.01);
        (skill_part * self.cut_damage + MIN_DAMAGE)
            * DAMAGE_MULTIPLIER
            * self.racial_multiplier
            * GLOBAL_DAMAGE_MODIFIER
            * (ATTACK_POWER * 0.01)
    }

    /// Primary blunt damage: strength weighs 0.75, weapon skill 0.25.
    pub fn blunt(&self) -> f32 {
        let spread = MAX_DAMAGE - MIN_DAMAGE;
        let skill_part = spread * 0.75 * (f32::from(self.strength) * 0.01)
            + spread * 0.25 * (f32::from(self.weapon_skill) * 0.01);
        (skill_part * self.blunt_damage + MIN_DAMAGE)
            * DAMAGE_MULTIPLIER
            * self.racial_multiplier
            * GLOBAL_DAMAGE_MODIFIER
            * (ATTACK_POWER * 0.01)
    }

    /// The calculator's display policy: whichever raw weapon multiplier is
    /// strictly larger picks the formula, ties go to blunt. The game engine
    /// rolls both damage types independently; this shortcut is kept for
    /// compatibility with the existing calculator.
    pub fn primary(&self) -> (DamageKind, f32) {
        if self.cut_damage > self.blunt_damage {
            (DamageKind::Cut, self.cut())
        } else {
            (DamageKind::Blunt, self.blunt())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cut_baseline_scenario() {
        // dex 1, skill 1, cut 0.123: (60*0.5*0.01 + 60*0.5*0.01) = 0.6,
        // (0.6*0.123 + 20) * 0.65 = 13.04797.
        let inputs = DamageInputs::default();
        assert!((inputs.cut() - 13.04797).abs() < 1e-3);
    }

    #[test]
    fn test_blunt_weights_strength_heavier() {
        let inputs = DamageInputs {
            blunt_damage: 1.0,
            strength: 80,
            weapon_skill: 20,
            ..DamageInputs::default()
        };
        // 60*0.75*0.80 + 60*0.25*0.20 = 36 + 3 = 39; (39 + 20) * 0.65.
        assert!((inputs.blunt() - 38.35).abs() < 1e-3);
    }

    #[test]
    fn test_racial_multiplier_scales_linearly() {
        let base = DamageInputs {
            cut_damage: 1.2,
            dexterity: 40,
            weapon_skill: 55,
            ..DamageInputs::default()
        };
        let boosted = DamageInputs {
            racial_multiplier: 1.5,
            ..base
        };
        assert!((boosted.cut() - base.cut() * 1.5).abs() < 1e-4);
    }

    #[test]
    fn test_identical_inputs_identical_output() {
        let inputs = DamageInputs {
            cut_damage: 0.87,
            blunt_damage: 0.31,
            strength: 42,
            dexterity: 63,
            weapon_skill: 17,
            racial_multiplier: 1.25,
        };
        assert_eq!(inputs.cut().to_bits(), inputs.cut().to_bits());
        assert_eq!(inputs.blunt().to_bits(), inputs.blunt().to_bits());
    }

    #[test]
    fn test_primary_picks_larger_multiplier() {
        let inputs = DamageInputs {
            cut_damage: 0.5,
            blunt_damage: 0.3,
            ..DamageInputs::default()
        };
        let (kind, value) = inputs.primary();
        assert_eq!(kind, DamageKind::Cut);
        assert!((value - inputs.cut()).abs() < f32::EPSILON);
    }

    #[test]
    fn test_primary_tie_goes_to_blunt() {
        let inputs = DamageInputs {
            cut_damage: 0.3,
            blunt_damage: 0.3,
            ..DamageInputs::default()
        };
        let (kind, value) = inputs.primary();
        assert_eq!(kind, DamageKind::Blunt);
        assert!((value - inputs.blunt()).abs() < f32::EPSILON);
    }
}
