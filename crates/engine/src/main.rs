//! Charsheet - command-line inspection of character folders.

use std::sync::Arc;

use anyhow::{bail, Context};
use charsheet_domain::{Ability, Skill, SLOT_LEVELS};
use charsheet_engine::infrastructure::{clock::SystemClock, file_storage::LocalFileStorage};
use charsheet_engine::{App, AppConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const USAGE: &str = "usage: charsheet <list | show NAME | slots NAME | notes NAME>";

fn main() -> anyhow::Result<()> {
    load_dotenv();
    let config = AppConfig::from_env();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.log_filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    tracing::debug!(data_dir = %config.data_dir.display(), "Starting charsheet");

    let app = App::new(
        Arc::new(LocalFileStorage::new()),
        Arc::new(SystemClock::new()),
        config.paths(),
    )
    .context("loading reference tables")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.iter().map(String::as_str).collect::<Vec<_>>().as_slice() {
        ["list"] => list(&app),
        ["show", name] => show(&app, name),
        ["slots", name] => slots(&app, name),
        ["notes", name] => notes(&app, name),
        _ => bail!(USAGE),
    }
}

fn list(app: &App) -> anyhow::Result<()> {
    for name in app.use_cases.roster.list()? {
        println!("{name}");
    }
    Ok(())
}

fn show(app: &App, name: &str) -> anyhow::Result<()> {
    let (record, stats) = app
        .use_cases
        .sheet
        .derived(name)
        .with_context(|| format!("loading '{name}'"))?;

    println!(
        "{} - level {} {} {}",
        record.name,
        record.level(),
        record.race,
        record.class
    );
    println!(
        "HP {}/{}  AC {}  Initiative {:+}  Proficiency {:+}  Passive Perception {}",
        record.current_hit_points(),
        record.max_hit_points(),
        stats.armor_class,
        stats.initiative,
        stats.proficiency_bonus,
        stats.passive_perception
    );
    println!(
        "XP {} ({}..{})",
        record.experience(),
        stats.experience_bounds.floor,
        stats.experience_bounds.ceiling
    );
    for ability in Ability::ALL {
        println!(
            "{:<4}{:>3} ({:+})  save {:+}",
            ability.abbreviation(),
            record.abilities.get(ability),
            stats.modifier(ability),
            stats.saving_throw(ability)
        );
    }
    for skill in Skill::ALL {
        let marker = if record.is_proficient(skill) { "*" } else { " " };
        println!("{marker} {:<16}{:+}", skill.name(), stats.skill(skill));
    }
    println!("Coins: {}", record.coins);
    Ok(())
}

fn slots(app: &App, name: &str) -> anyhow::Result<()> {
    let state = app.use_cases.slots.state(name)?;
    let mut any = false;
    for level in 1..=SLOT_LEVELS as u8 {
        if state.total(level) > 0 {
            any = true;
            println!("Level {level}: {}/{} remaining", state.remaining(level), state.total(level));
        }
    }
    if !any {
        println!("No spell slots");
    }
    Ok(())
}

fn notes(app: &App, name: &str) -> anyhow::Result<()> {
    let sheet = app.use_cases.roster.load(name)?;
    if sheet.notes.notes.is_empty() {
        println!("No notes");
    }
    for section in &sheet.notes.notes {
        println!("## {} (updated {})", section.section, section.last_updated.to_rfc3339());
        println!("{}", section.notes);
    }
    Ok(())
}

/// Loads `.env.local` then `.env` from the working directory.
fn load_dotenv() {
    for filename in [".env.local", ".env"] {
        if std::path::Path::new(filename).exists() {
            let _ = dotenvy::from_filename(filename);
        }
    }
}
