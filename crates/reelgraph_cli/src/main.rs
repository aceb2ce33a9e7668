//! CLI smoke entry point.
//!
//! # Responsibility
//! - Verify `reelgraph_core` linkage and print build metadata.
//! - Drive one deterministic catalog scenario through the facade.

mod config;

use chrono::{Duration, NaiveDate};
use config::CliConfig;
use reelgraph_core::{CatalogService, MediaItem, Person, RepoResult};
use std::process::ExitCode;

fn main() -> ExitCode {
    println!("reelgraph_core ping={}", reelgraph_core::ping());
    println!("reelgraph_core version={}", reelgraph_core::core_version());

    let config = match CliConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("config error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Some(log_dir) = config.log_dir.as_deref() {
        if let Err(err) = reelgraph_core::init_logging(&config.log_level, log_dir) {
            eprintln!("logging disabled: {err}");
        }
    }

    match run_scenario(config.popular_count) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=smoke_run module=cli status=error");
            eprintln!("scenario failed: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run_scenario(popular_count: i64) -> RepoResult<()> {
    let service = CatalogService::new();
    let birthday = date(1990, 4, 12);
    for login in ["ann", "bob", "cid"] {
        service.add_person(Person::new(
            format!("{login}@reelgraph.example"),
            login,
            "",
            birthday,
        ))?;
    }
    service.add_friend_edge(1, 3)?;
    service.add_friend_edge(2, 3)?;

    let titles = [
        ("L'Arrivée d'un train", date(1896, 1, 25), 1),
        ("Metropolis", date(1927, 1, 10), 153),
        ("Stalker", date(1979, 5, 25), 162),
    ];
    for (name, release, minutes) in titles {
        service.add_media_item(MediaItem::new(name, "", release, Duration::minutes(minutes)))?;
    }
    service.like(3, 1)?;
    service.like(3, 2)?;
    service.like(2, 3)?;

    for person in service.common_friends(1, 2)? {
        println!("common friend of 1 and 2: {} ({})", person.id, person.name);
    }
    for (rank, item) in service.top_popular(popular_count).iter().enumerate() {
        println!(
            "#{} {} likes={} id={}",
            rank + 1,
            item.name,
            item.like_count(),
            item.id
        );
    }
    Ok(())
}

fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("scenario dates are valid calendar dates")
}

#[cfg(test)]
mod tests {
    use super::{date, run_scenario};

    #[test]
    fn scenario_dates_are_kept_as_written() {
        assert_eq!(date(1896, 1, 25).to_string(), "1896-01-25");
    }

    #[test]
    #[should_panic(expected = "scenario dates are valid calendar dates")]
    fn impossible_scenario_date_panics() {
        date(1979, 2, 30);
    }

    #[test]
    fn scenario_runs_against_fresh_catalog() {
        run_scenario(2).unwrap();
    }
}
