use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use log::info;

use sectorstore::cli::{Cli, Command, SectorArgs};
use sectorstore::config::Config;
use sectorstore::{
    FileStore, MAX_PHOTOS, SectorId, SectorRecord, SectorRegistry, Topology, Transition, export,
};

fn setup_logging() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();
    Ok(())
}

fn open_registry(config: &Config) -> Result<SectorRegistry> {
    let topology = Topology::load(config.topology_path.as_deref())?;
    let store = FileStore::new(&config.store_path);
    Ok(SectorRegistry::new(topology, Box::new(store)))
}

fn sector_id(args: &SectorArgs) -> SectorId {
    SectorId::new(&args.block, &args.floor, &args.name)
}

/// Print the outcome of a mutation; exits non-zero unless it was applied
fn report(transition: Transition, id: &SectorId, action: &str) {
    match transition {
        Transition::Applied => {
            println!("{} {} {}", "✓".green(), action, id.to_string().cyan());
        }
        Transition::NotFound => {
            eprintln!("{} Sector not in catalog: {}", "✗".red(), id);
            std::process::exit(1);
        }
        Transition::InvalidState(current) => {
            eprintln!("{} Cannot {} {}: sector is {}", "✗".red(), action, id, current.to_string().yellow());
            std::process::exit(1);
        }
    }
}

fn print_record(record: &SectorRecord) {
    let status = match record.status {
        sectorstore::SectorStatus::Pending => record.status.to_string().yellow(),
        sectorstore::SectorStatus::InProgress => record.status.to_string().blue(),
        sectorstore::SectorStatus::Completed => record.status.to_string().green(),
    };
    print!("{:<12} {}", status, record.id);
    if let Some(executor) = &record.executor {
        print!("  executor: {executor}");
    }
    if let Some(minutes) = record.duration_minutes {
        print!("  ({minutes} min)");
    }
    if let Some(photos) = &record.photos {
        print!("  [{} photos]", photos.len());
    }
    println!();
}

fn main() -> Result<()> {
    setup_logging().context("Failed to setup logging")?;

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!("sectorstore starting");

    match cli.command {
        Command::Checkin {
            sector,
            executor,
            responsible,
        } => {
            let mut registry = open_registry(&config)?;
            let id = sector_id(&sector);
            let transition = registry.checkin(&id, &executor, &responsible)?;
            report(transition, &id, "check in");
        }
        Command::Checkout { sector } => {
            let mut registry = open_registry(&config)?;
            let id = sector_id(&sector);
            let transition = registry.checkout(&id)?;
            report(transition, &id, "check out");
        }
        Command::Complete {
            sector,
            executor,
            responsible,
            photos,
        } => {
            if photos.len() > MAX_PHOTOS {
                eprintln!("{} At most {MAX_PHOTOS} photos per sector", "✗".red());
                std::process::exit(1);
            }
            let mut registry = open_registry(&config)?;
            let id = sector_id(&sector);
            let photos = if photos.is_empty() { None } else { Some(photos) };
            let transition = registry.complete_directly(&id, &executor, &responsible, photos)?;
            report(transition, &id, "complete");
        }
        Command::Reset { sector } => {
            let mut registry = open_registry(&config)?;
            let id = sector_id(&sector);
            let transition = registry.reset(&id)?;
            report(transition, &id, "reset");
        }
        Command::ResetAll => {
            let mut registry = open_registry(&config)?;
            registry.reset_all()?;
            println!("{} All sectors reset to pending", "✓".green());
        }
        Command::Show { sector } => {
            let registry = open_registry(&config)?;
            let id = sector_id(&sector);
            match registry.sector(&id) {
                Some(record) => print_record(record),
                None => {
                    eprintln!("{} Sector not in catalog: {}", "✗".red(), id);
                    std::process::exit(1);
                }
            }
        }
        Command::List { block } => {
            let registry = open_registry(&config)?;
            match block {
                Some(block) => {
                    for record in registry.by_block(&block) {
                        print_record(record);
                    }
                }
                None => {
                    for record in registry.all() {
                        print_record(record);
                    }
                }
            }
        }
        Command::Stats => {
            let registry = open_registry(&config)?;
            let stats = registry.statistics();
            println!("Total:       {}", stats.total);
            println!("Completed:   {}", stats.completed.to_string().green());
            println!("In progress: {}", stats.in_progress.to_string().blue());
            println!("Pending:     {}", stats.pending.to_string().yellow());
            println!("Completion:  {}%", stats.completion_percentage);
        }
        Command::Today => {
            let registry = open_registry(&config)?;
            for record in registry.today() {
                print_record(record);
            }
        }
        Command::Records { filter } => {
            let registry = open_registry(&config)?;
            for record in registry.filtered(&filter.into()) {
                print_record(record);
            }
        }
        Command::Export { filter, output } => {
            let registry = open_registry(&config)?;
            let records = registry.filtered(&filter.into());
            let csv = export::to_csv(&records)?;
            match output {
                Some(path) => {
                    std::fs::write(&path, csv)
                        .context(format!("Failed to write CSV: {}", path.display()))?;
                    println!("{} Exported {} records to {}", "✓".green(), records.len(), path.display());
                }
                None => print!("{csv}"),
            }
        }
    }

    Ok(())
}
