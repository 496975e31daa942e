use anyhow::{bail, Result};
use kenshi_calc::{
    cli::{Cli, Commands},
    formula::DamageInputs,
    store::{locate_database, WeaponStore},
    ui,
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    let db_path = locate_database(cli.db);

    let Some(command) = cli.command else {
        // The shell absorbs a failed open: it starts with empty lists and
        // the error in its activity log.
        return ui::run(WeaponStore::open(&db_path));
    };

    match command {
        Commands::Classes { json } => {
            let store = WeaponStore::open(&db_path)?;
            print_names(store.weapon_classes()?, json)?;
        }

        Commands::Qualities { json } => {
            let store = WeaponStore::open(&db_path)?;
            print_names(store.weapon_qualities()?, json)?;
        }

        Commands::Weapons { class, json } => {
            let store = WeaponStore::open(&db_path)?;
            print_names(store.weapon_names_by_class(&class)?, json)?;
        }

        Commands::Weapon { name, json } => {
            let store = WeaponStore::open(&db_path)?;
            match store.weapon_by_name(&name)? {
                Some(weapon) => {
                    if json {
                        println!("{}", serde_json::to_string_pretty(&weapon)?);
                    } else {
                        println!("{} ({})", weapon.name, weapon.class);
                        println!("  cut:   {}", weapon.cut_damage);
                        println!("  blunt: {}", weapon.blunt_damage);
                    }
                }
                None => bail!("no weapon named {:?}", name),
            }
        }

        Commands::Images { json } => {
            let store = WeaponStore::open(&db_path)?;
            print_names(store.weapon_image_paths()?, json)?;
        }

        Commands::Tables { json } => {
            let store = WeaponStore::open(&db_path)?;
            print_names(store.table_names()?, json)?;
        }

        Commands::Calc {
            cut,
            blunt,
            strength,
            dexterity,
            weapon_skill,
            racial_multiplier,
            json,
        } => {
            let inputs = DamageInputs {
                cut_damage: cut,
                blunt_damage: blunt,
                strength,
                dexterity,
                weapon_skill,
                racial_multiplier,
            };
            let (kind, value) = inputs.primary();
            if json {
                println!(
                    "{}",
                    serde_json::json!({ "kind": kind, "damage": value })
                );
            } else {
                println!("{kind}: {value:.4}");
            }
        }
    }

    Ok(())
}

fn print_names(names: Vec<String>, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(&names)?);
    } else {
        for name in names {
            println!("{name}");
        }
    }
    Ok(())
}
