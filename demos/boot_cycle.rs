//! Boot cycle example.
//!
//! Simulates two power cycles of a controller: a first boot on blank
//! storage, a few parameter changes and realtime position saves, then a
//! second boot that restores everything.
//!
//! This example uses in-memory storage instead of a real EEPROM.

use machine_settings::{
    AlarmFlags, AlarmState, AxisController, CascadeTargets, KinematicsSolver, MachineFlags,
    MemoryStorage, PidGains, Persistence, SettingsRecord, SharedStorage, Steps,
};

/// Axis stand-in that prints what it is told.
struct PrintingAxis(&'static str);

impl AxisController for PrintingAxis {
    fn change_encoder_resolution(&mut self, steps_per_revolution: f32) {
        println!("  [{}] encoder resolution -> {}", self.0, steps_per_revolution);
    }

    fn change_pitch(&mut self, distance_per_revolution: f32) {
        println!("  [{}] pitch -> {:.3}", self.0, distance_per_revolution);
    }

    fn set_pid_values(&mut self, gains: &PidGains) {
        println!("  [{}] gains -> {:?}", self.0, gains.as_array());
    }
}

/// Kinematics stand-in that prints what it is told.
struct PrintingKinematics;

impl KinematicsSolver for PrintingKinematics {
    fn finalize_machine_settings(&mut self, settings: &SettingsRecord) {
        println!("  [kinematics] finalize, width {}", settings.machine_width);
    }

    fn recompute_geometry(&mut self, _settings: &SettingsRecord) {
        println!("  [kinematics] recompute geometry");
    }

    fn set_drive_radius(&mut self, radius: f32) {
        println!("  [kinematics] drive radius -> {:.3}", radius);
    }
}

static STORAGE: SharedStorage<MemoryStorage<4096>> = SharedStorage::new(MemoryStorage::new());

fn main() -> Result<(), machine_settings::Error> {
    println!("=== Boot Cycle Example ===\n");

    // First power-up: blank EEPROM
    let alarms = AlarmState::new();
    let mut persistence = Persistence::new();
    let report = persistence.init(&STORAGE, &alarms);
    println!("Boot 1: {:?}", report);
    println!(
        "Position lost: {}\n",
        alarms.is_raised(AlarmFlags::POSITION_LOST)
    );

    // Host sends a few settings
    let mut kinematics = PrintingKinematics;
    let mut left = PrintingAxis("left");
    let mut right = PrintingAxis("right");
    let mut z = PrintingAxis("z");
    let mut flags = MachineFlags::empty();
    {
        let targets = CascadeTargets {
            kinematics: &mut kinematics,
            left_axis: &mut left,
            right_axis: &mut right,
            z_axis: &mut z,
            flags: &mut flags,
        };
        let mut dispatcher = persistence.dispatcher(&STORAGE, targets);
        for (id, value) in [(0u8, 3048.0f32), (12, 8148.0), (13, 12.0), (21, 1500.0), (37, 1.0)] {
            println!("store({}, {})", id, value);
            let status = dispatcher.store(id, value)?;
            println!("  -> status {}", status.code());
        }
    }
    println!("Flags: {:?}\n", flags);

    // Realtime loop: axes move, position saved every cycle
    for cycle in 0..5 {
        persistence
            .steps_mut()
            .set_position(Steps(cycle * 100), Steps(cycle * -80), Steps(cycle * 3));
        persistence.save_steps(&STORAGE)?;
    }
    println!("Saved position: {:?}\n", persistence.steps().record());

    // Second power-up: everything comes back
    let alarms = AlarmState::new();
    let mut rebooted = Persistence::new();
    let report = rebooted.init(&STORAGE, &alarms);
    println!("Boot 2: {:?}", report);
    println!("Machine width: {}", rebooted.settings().record().machine_width);
    println!("Gear teeth: {}", rebooted.settings().record().gear_teeth);
    println!("Position: {:?}", rebooted.steps().record());
    println!(
        "Position lost: {}",
        alarms.is_raised(AlarmFlags::POSITION_LOST)
    );

    let writes = STORAGE.transaction(|s| s.write_count());
    println!("\nEEPROM writes: {}", writes);

    Ok(())
}
