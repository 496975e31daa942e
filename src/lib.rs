pub mod cli;
pub mod formula;
pub mod store;
pub mod ui;

pub use cli::{Cli, Commands};
pub use formula::{DamageInputs, DamageKind};
pub use store::{StoreError, Weapon, WeaponStore};
