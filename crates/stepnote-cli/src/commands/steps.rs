use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;
use clap::Subcommand;
use serde::Serialize;
use stepnote_core::pedometer::{Availability, SimulatedFeed, StepFeed};
use stepnote_core::storage::{Config, Database};
use stepnote_core::Event;

use super::{load_engine, save_engine, AVAILABILITY_KEY, ENGINE_KEY};

#[derive(Subcommand)]
pub enum StepsAction {
    /// Current step count, feed availability, and distance to the next milestone
    Status,
    /// Feed explicit cumulative readings into the engine
    Feed {
        /// Cumulative step counts, in delivery order
        readings: Vec<i64>,
    },
    /// Run a deterministic simulated walk through the engine
    Simulate {
        /// Random seed (same seed, same walk)
        #[arg(long, default_value = "42")]
        seed: u64,
        /// Number of readings to deliver
        #[arg(long, default_value = "20")]
        ticks: u32,
        /// Maximum step increase per reading
        #[arg(long, default_value = "800")]
        burst: u32,
    },
    /// Start a fresh session window (new engine, count back to zero)
    Reset,
}

#[derive(Serialize)]
struct StepsStatus {
    availability: Availability,
    #[serde(flatten)]
    engine: stepnote_core::EngineSnapshot,
}

fn availability(db: &Database) -> Availability {
    match db.kv_get(AVAILABILITY_KEY) {
        Ok(Some(v)) if v == "available" => Availability::Available,
        Ok(Some(v)) if v == "unavailable" => Availability::Unavailable,
        _ => Availability::Checking,
    }
}

fn print_events(events: &[Event]) -> Result<(), Box<dyn std::error::Error>> {
    for event in events {
        println!("{}", serde_json::to_string(event)?);
    }
    Ok(())
}

pub fn run(action: StepsAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = Database::open()?;
    let config = Config::load_or_default();

    match action {
        StepsAction::Status => {
            let engine = load_engine(&db, &config)?;
            let status = StepsStatus {
                availability: availability(&db),
                engine: engine.snapshot(),
            };
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
        StepsAction::Feed { readings } => {
            let mut engine = load_engine(&db, &config)?;
            db.kv_set(AVAILABILITY_KEY, "available")?;
            let mut events = Vec::new();
            for reading in readings {
                events.extend(engine.observe(reading));
            }
            print_events(&events)?;
            save_engine(&db, &engine)?;
        }
        StepsAction::Simulate { seed, ticks, burst } => {
            let mut engine = load_engine(&db, &config)?;
            let mut feed = SimulatedFeed::walk(seed, ticks, burst);

            let probe = Event::AvailabilityChanged {
                availability: feed.availability(),
                at: Utc::now(),
            };
            println!("{}", serde_json::to_string(&probe)?);
            db.kv_set(AVAILABILITY_KEY, &feed.availability().to_string())?;

            let readings = Rc::new(RefCell::new(Vec::new()));
            let sink = readings.clone();
            let mut subscription =
                feed.subscribe(Box::new(move |r| sink.borrow_mut().push(r)))?;

            let mut events = Vec::new();
            for reading in readings.borrow().iter() {
                events.extend(engine.observe(i64::from(*reading)));
            }
            subscription.cancel();

            print_events(&events)?;
            save_engine(&db, &engine)?;
        }
        StepsAction::Reset => {
            db.kv_delete(ENGINE_KEY)?;
            db.kv_set(AVAILABILITY_KEY, "checking")?;
            println!("{{\"type\": \"session_reset\"}}");
        }
    }
    Ok(())
}
