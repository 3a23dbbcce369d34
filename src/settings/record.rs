//! The persisted machine settings record.

use serde::Deserialize;

use crate::storage::layout::VALID_MARKER;
use crate::storage::{ByteReader, ByteWriter};

/// Position and velocity loop gains for one axis group.
///
/// The two weights blend proportional-on-error against
/// proportional-on-measurement (1.0 = pure error).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PidGains {
    /// Position loop proportional gain.
    pub pos_p: f32,
    /// Position loop integral gain.
    pub pos_i: f32,
    /// Position loop derivative gain.
    pub pos_d: f32,
    /// Position loop proportional weighting.
    pub pos_weight: f32,
    /// Velocity loop proportional gain.
    pub vel_p: f32,
    /// Velocity loop integral gain.
    pub vel_i: f32,
    /// Velocity loop derivative gain.
    pub vel_d: f32,
    /// Velocity loop proportional weighting.
    pub vel_weight: f32,
}

impl PidGains {
    /// Size of the packed gain set in bytes.
    pub const SIZE: usize = 8 * 4;

    /// Stock gains for the reference machine's motors.
    pub const fn stock() -> Self {
        Self {
            pos_p: 1300.0,
            pos_i: 0.0,
            pos_d: 34.0,
            pos_weight: 1.0,
            vel_p: 7.0,
            vel_i: 0.0,
            vel_d: 0.28,
            vel_weight: 1.0,
        }
    }

    fn encode(&self, w: &mut ByteWriter<'_>) {
        for gain in self.as_array() {
            w.put_f32(gain);
        }
    }

    fn decode(r: &mut ByteReader<'_>) -> Self {
        Self {
            pos_p: r.f32(),
            pos_i: r.f32(),
            pos_d: r.f32(),
            pos_weight: r.f32(),
            vel_p: r.f32(),
            vel_i: r.f32(),
            vel_d: r.f32(),
            vel_weight: r.f32(),
        }
    }

    /// Gains in wire order: position P/I/D/weight, velocity P/I/D/weight.
    pub fn as_array(&self) -> [f32; 8] {
        [
            self.pos_p,
            self.pos_i,
            self.pos_d,
            self.pos_weight,
            self.vel_p,
            self.vel_i,
            self.vel_d,
            self.vel_weight,
        ]
    }
}

impl Default for PidGains {
    fn default() -> Self {
        Self::stock()
    }
}

/// Machine geometry, kinematics tuning, drivetrain, and loop gains.
///
/// Lengths are millimetres. The field order is the storage order.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SettingsRecord {
    /// Work area width.
    pub machine_width: f32,
    /// Work area height.
    pub machine_height: f32,
    /// Distance between the two motor shafts.
    pub motor_spacing: f32,
    /// Height of the motors above the top of the work area.
    pub motor_offset_y: f32,
    /// Sled width.
    pub sled_width: f32,
    /// Sled height.
    pub sled_height: f32,
    /// Sled centre of gravity above the bit.
    pub sled_cg: f32,
    /// 1 = quadrilateral, 2 = triangular.
    pub kinematics_mode: u8,
    /// Chain attachment radius for triangular kinematics.
    pub rotation_disk_radius: f32,
    /// Time an idle axis holds position, ms.
    pub axis_hold_time: i16,
    /// Iteration cap of the inverse kinematics solver.
    pub solver_guess_limit: i16,
    /// Chain length used by the pre-calibration firmware.
    pub legacy_chain_length: i16,
    /// Encoder steps per sprocket revolution.
    pub encoder_steps: f32,
    /// Sprocket teeth.
    pub gear_teeth: u8,
    /// Chain pitch.
    pub chain_pitch: f32,
    /// Feed rate cap, mm/min.
    pub max_feed: i16,
    /// A z-axis motor is fitted.
    pub z_attached: bool,
    /// The z-axis is driven automatically.
    pub z_auto: bool,
    /// Z motor speed cap.
    pub z_max_rpm: f32,
    /// Z travel per leadscrew rotation.
    pub z_dist_per_rotation: f32,
    /// Z encoder steps per rotation.
    pub z_encoder_steps: f32,
    /// Gains shared by the left and right axes.
    pub xy_pid: PidGains,
    /// Z axis gains.
    pub z_pid: PidGains,
    /// Trailing validity marker; never taken from a profile.
    #[serde(skip, default = "valid_marker")]
    pub valid_marker: u8,
}

fn valid_marker() -> u8 {
    VALID_MARKER
}

impl SettingsRecord {
    /// Size of the packed record in bytes.
    pub const SIZE: usize = 7 * 4 + 1 + 4 + 3 * 2 + 4 + 1 + 4 + 2 + 2 + 3 * 4 + 2 * PidGains::SIZE + 1;

    /// Factory defaults, approximating a stock frame.
    pub const fn factory_defaults() -> Self {
        Self {
            machine_width: 2438.4,
            machine_height: 1219.2,
            motor_spacing: 2978.4,
            motor_offset_y: 463.0,
            sled_width: 310.0,
            sled_height: 139.0,
            sled_cg: 79.0,
            kinematics_mode: 1,
            rotation_disk_radius: 100.0,
            axis_hold_time: 2000,
            solver_guess_limit: 200,
            legacy_chain_length: 1650,
            encoder_steps: 8113.7,
            gear_teeth: 10,
            chain_pitch: 6.35,
            max_feed: 1000,
            z_attached: true,
            z_auto: false,
            z_max_rpm: 12.60,
            z_dist_per_rotation: 3.17,
            z_encoder_steps: 7560.0,
            xy_pid: PidGains::stock(),
            z_pid: PidGains::stock(),
            valid_marker: VALID_MARKER,
        }
    }

    /// Sprocket circumference: teeth × chain pitch.
    #[inline]
    pub fn drive_pitch(&self) -> f32 {
        f32::from(self.gear_teeth) * self.chain_pitch
    }

    /// Sprocket pitch radius used by the kinematics solver.
    #[inline]
    pub fn drive_radius(&self) -> f32 {
        self.drive_pitch() / (2.0 * core::f32::consts::PI)
    }

    /// Serialize to the packed storage layout.
    pub fn to_bytes(&self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        let mut w = ByteWriter::new(&mut buf);
        w.put_f32(self.machine_width);
        w.put_f32(self.machine_height);
        w.put_f32(self.motor_spacing);
        w.put_f32(self.motor_offset_y);
        w.put_f32(self.sled_width);
        w.put_f32(self.sled_height);
        w.put_f32(self.sled_cg);
        w.put_u8(self.kinematics_mode);
        w.put_f32(self.rotation_disk_radius);
        w.put_i16(self.axis_hold_time);
        w.put_i16(self.solver_guess_limit);
        w.put_i16(self.legacy_chain_length);
        w.put_f32(self.encoder_steps);
        w.put_u8(self.gear_teeth);
        w.put_f32(self.chain_pitch);
        w.put_i16(self.max_feed);
        w.put_bool(self.z_attached);
        w.put_bool(self.z_auto);
        w.put_f32(self.z_max_rpm);
        w.put_f32(self.z_dist_per_rotation);
        w.put_f32(self.z_encoder_steps);
        self.xy_pid.encode(&mut w);
        self.z_pid.encode(&mut w);
        w.put_u8(self.valid_marker);
        debug_assert_eq!(w.position(), Self::SIZE);
        buf
    }

    /// Deserialize from the packed storage layout.
    pub fn from_bytes(buf: &[u8; Self::SIZE]) -> Self {
        let mut r = ByteReader::new(buf);
        Self {
            machine_width: r.f32(),
            machine_height: r.f32(),
            motor_spacing: r.f32(),
            motor_offset_y: r.f32(),
            sled_width: r.f32(),
            sled_height: r.f32(),
            sled_cg: r.f32(),
            kinematics_mode: r.u8(),
            rotation_disk_radius: r.f32(),
            axis_hold_time: r.i16(),
            solver_guess_limit: r.i16(),
            legacy_chain_length: r.i16(),
            encoder_steps: r.f32(),
            gear_teeth: r.u8(),
            chain_pitch: r.f32(),
            max_feed: r.i16(),
            z_attached: r.bool(),
            z_auto: r.bool(),
            z_max_rpm: r.f32(),
            z_dist_per_rotation: r.f32(),
            z_encoder_steps: r.f32(),
            xy_pid: PidGains::decode(&mut r),
            z_pid: PidGains::decode(&mut r),
            valid_marker: r.u8(),
        }
    }
}

impl Default for SettingsRecord {
    fn default() -> Self {
        Self::factory_defaults()
    }
}
