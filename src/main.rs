//! Carnival Wheel demo driver
//!
//! Plays the role of the host render loop: calls `update()` once per
//! tick, shows the segment under the pointer while the wheel turns, and
//! resolves + records each outcome. Pass `--seed N` for a replayable run;
//! without it the OS crypto source decides.

use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use carnival_wheel::config::{SegmentConfig, SpinPhysics, WheelConfig};
use carnival_wheel::consts::TICKS_PER_SECOND;
use carnival_wheel::history::SpinHistory;
use carnival_wheel::rng::{OsRandom, RandomSource, SeededRandom};
use carnival_wheel::sim::{SegmentMap, SpinEngine};

const SPINS: u32 = 3;

fn main() {
    env_logger::init();
    log::info!("Carnival Wheel demo starting...");

    let seed = parse_seed();
    let rng: Box<dyn RandomSource> = match seed {
        Some(seed) => {
            log::info!("Using seeded RNG (seed {seed})");
            Box::new(SeededRandom::new(seed))
        }
        None => match OsRandom::new() {
            Ok(source) => Box::new(source),
            Err(err) => {
                eprintln!("fatal: no secure random source available: {err}");
                std::process::exit(1);
            }
        },
    };

    let wheel = halloween_wheel();
    let map = SegmentMap::from_config(&wheel).expect("demo wheel config is valid");
    let mut engine =
        SpinEngine::new(SpinPhysics::default(), rng).expect("default physics is valid");
    let mut history = SpinHistory::new();

    println!("The wheel has {} segments. Spinning {SPINS} times.\n", map.len());

    for round in 1..=SPINS {
        println!("--- Spin {round} ---");
        spin_once(&mut engine, &map, &mut history);
        println!();
    }

    let stats = history.statistics();
    println!("{} spins recorded.", stats.total_spins);
    if let Some((label, count)) = stats.most_common {
        println!("Most common outcome: {label} ({count}x)");
    }
}

fn spin_once(
    engine: &mut SpinEngine<Box<dyn RandomSource>>,
    map: &SegmentMap,
    history: &mut SpinHistory,
) {
    let tick_duration = Duration::from_millis(1000 / TICKS_PER_SECOND as u64);

    let reported = Rc::new(Cell::new(None));
    let sink = reported.clone();
    let accepted = engine.start_spin(Some(Box::new(move |deg| sink.set(Some(deg)))));
    assert!(accepted, "engine was idle, spin must be accepted");

    let mut ticks = 0u32;
    while engine.is_spinning() {
        let angle = engine.update();
        ticks += 1;
        if ticks % 30 == 0 {
            let live = map.segment_at(angle);
            println!(
                "  tick {ticks:4}  velocity {:5.2} rad/tick  under pointer: {}",
                engine.angular_velocity(),
                live.label
            );
        }
        std::thread::sleep(tick_duration);
    }

    let final_deg = reported.get().expect("completion callback fired");
    let hit = map.segment_at(engine.current_angle());
    println!(
        "  settled at {final_deg:.1}° after {ticks} ticks -> {} (segment {}, #{:06X})",
        hit.label, hit.index, hit.color
    );
    history.record(&hit, unix_millis());
}

/// The original carnival wheel layout.
fn halloween_wheel() -> WheelConfig {
    WheelConfig::new(vec![
        SegmentConfig::new("Vampire", 0x8B0000),
        SegmentConfig::new("Witch", 0x4B0082),
        SegmentConfig::new("Ghost", 0x708090),
        SegmentConfig::new("Zombie", 0x556B2F),
        SegmentConfig::new("Pumpkin", 0xFF8C00),
        SegmentConfig::new("Skeleton", 0xF5F5DC),
        SegmentConfig::new("Frankenstein", 0x228B22),
        SegmentConfig::new("Werewolf", 0x2F4F4F),
    ])
}

fn parse_seed() -> Option<u64> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--seed" {
            return args.next().and_then(|value| value.parse().ok());
        }
    }
    None
}

fn unix_millis() -> f64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as f64)
        .unwrap_or(0.0)
}
