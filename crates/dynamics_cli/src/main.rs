//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `dynamics_core` linkage and run a short registry scenario.
//! - Keep output deterministic for quick local sanity checks.

use dynamics_core::{init_logging, EntityType, LogConfig, ModelFactory};
use log::info;
use serde_json::json;
use std::process::ExitCode;

fn main() -> ExitCode {
    let logging = LogConfig::from_env()
        .and_then(|config| config.map_or(Ok(()), |config| init_logging(&config)));
    if let Err(err) = logging {
        eprintln!("dynamics_cli logging disabled: {err}");
    }

    println!("dynamics_core ping={}", dynamics_core::ping());
    println!("dynamics_core version={}", dynamics_core::core_version());

    match run_scenario() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("dynamics_cli scenario failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_scenario() -> Result<(), dynamics_core::FactoryError> {
    let factory = ModelFactory::instance();
    factory.update_object(EntityType::Iteration, &json!({"id": 1, "name": "Sprint 1"}))?;
    factory.update_object(EntityType::Story, &json!({"id": 10, "name": "Sign-up"}))?;
    let task = factory.update_object(EntityType::Task, &json!({"id": 100, "state": "STARTED"}))?;
    let again = factory.get_object("task", 100)?;
    info!("event=cli_scenario module=cli status=ok");

    let stats = factory.stats();
    println!(
        "dynamics_core objects={} same_instance={} lookups={} constructions={}",
        factory.object_count(),
        std::rc::Rc::ptr_eq(&task, &again),
        stats.lookups,
        stats.constructions
    );
    Ok(())
}
