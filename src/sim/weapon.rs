//! Weapon table and per-weapon ammo

use serde::Serialize;

/// The three weapons the cow can carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum WeaponKind {
    MilkPistol,
    HayRifle,
    CheeseBlaster,
}

/// Constant stats for a weapon kind
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeaponStats {
    pub name: &'static str,
    pub damage: i32,
    /// Frames between shots
    pub fire_rate: u32,
    pub max_ammo: u32,
    /// Frames the weapon is locked after a reload
    pub reload_time: u32,
}

impl WeaponKind {
    /// Loadout order; index matches the number keys 1-3
    pub const ALL: [WeaponKind; 3] = [
        WeaponKind::MilkPistol,
        WeaponKind::HayRifle,
        WeaponKind::CheeseBlaster,
    ];

    pub fn stats(self) -> WeaponStats {
        match self {
            WeaponKind::MilkPistol => WeaponStats {
                name: "Milk Pistol",
                damage: 25,
                fire_rate: 20,
                max_ammo: 12,
                reload_time: 60,
            },
            WeaponKind::HayRifle => WeaponStats {
                name: "Hay Rifle",
                damage: 40,
                fire_rate: 10,
                max_ammo: 30,
                reload_time: 90,
            },
            WeaponKind::CheeseBlaster => WeaponStats {
                name: "Cheese Blaster",
                damage: 60,
                fire_rate: 50,
                max_ammo: 8,
                reload_time: 120,
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.stats().name
    }
}

/// A carried weapon with its remaining ammo
#[derive(Debug, Clone, Serialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub ammo: u32,
}

impl Weapon {
    /// A fully loaded weapon
    pub fn new(kind: WeaponKind) -> Self {
        Self {
            kind,
            ammo: kind.stats().max_ammo,
        }
    }

    #[inline]
    pub fn stats(&self) -> WeaponStats {
        self.kind.stats()
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn max_ammo(&self) -> u32 {
        self.stats().max_ammo
    }

    pub fn is_full(&self) -> bool {
        self.ammo >= self.max_ammo()
    }

    pub fn is_empty(&self) -> bool {
        self.ammo == 0
    }

    pub fn refill(&mut self) {
        self.ammo = self.max_ammo();
    }
}
