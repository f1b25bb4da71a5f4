//! Synthetic flight data for running the panel without a simulator.

use cockpit::snapshot::{
    AltimeterInput, AttitudeInput, NdbInput, RadioInput, TurnInput, VorInput,
};
use cockpit::StateSnapshot;
use rand::rngs::ThreadRng;
use rand::Rng;
use std::io::{self, BufRead};
use std::sync::mpsc::{self, Receiver};
use std::thread;
use std::time::Duration;

const RETARGET_INTERVAL: Duration = Duration::from_millis(200);

fn lerp(current: f64, target: f64) -> f64 {
    const LERP_FACTOR: f64 = 0.1;
    current + (target - current) * LERP_FACTOR
}

#[derive(Debug, Clone, Copy, Default)]
struct FlightState {
    altitude: f64,
    airspeed: f64,
    vertical_speed: f64,
    heading: f64,
    pitch: f64,
    roll: f64,
    turn_rate: f64,
    slip_skid: f64,
}

impl FlightState {
    fn approach(&mut self, target: &FlightState) {
        self.altitude = lerp(self.altitude, target.altitude);
        self.airspeed = lerp(self.airspeed, target.airspeed);
        self.vertical_speed = lerp(self.vertical_speed, target.vertical_speed);
        self.heading = lerp(self.heading, target.heading);
        self.pitch = lerp(self.pitch, target.pitch);
        self.roll = lerp(self.roll, target.roll);
        self.turn_rate = lerp(self.turn_rate, target.turn_rate);
        self.slip_skid = lerp(self.slip_skid, target.slip_skid);
    }
}

/// Gentle climbing turns with a little turbulence, eased every frame.
pub struct FlightDataSource {
    rng: ThreadRng,
    current: FlightState,
    target: FlightState,
    next_retarget: Duration,
    /// Standby COM picked since the last frame, sent once so a swap sticks.
    pending_standby: Option<f64>,
}

impl FlightDataSource {
    pub fn new() -> Self {
        let start = FlightState {
            altitude: 1000.0,
            airspeed: 120.0,
            ..Default::default()
        };
        Self {
            rng: rand::rng(),
            current: start,
            target: start,
            next_retarget: Duration::ZERO,
            pending_standby: Some(121.5),
        }
    }

    fn retarget(&mut self, elapsed: Duration) {
        let t = elapsed.as_secs_f64();
        let bump = |rng: &mut ThreadRng, spread: f64| rng.random_range(-spread..spread);

        // heading is left unwrapped so easing never swings the long way round
        self.target = FlightState {
            altitude: 1000.0 + (t * 0.5).sin() * 500.0,
            airspeed: 120.0 + (t * 0.3).sin() * 20.0,
            vertical_speed: (t * 0.5).cos() * 250.0,
            heading: self.target.heading + 0.5,
            pitch: (t * 0.5).sin() * 5.0 + bump(&mut self.rng, 0.8),
            roll: (t * 0.2).sin() * 15.0 + bump(&mut self.rng, 1.5),
            turn_rate: (t * 0.2).sin() * 3.0,
            slip_skid: (t * 0.4).sin() * 0.3 + bump(&mut self.rng, 0.05),
        };

        if self.rng.random_bool(0.01) {
            let standby = 118.0 + 0.025 * self.rng.random_range(0..760) as f64;
            tracing::debug!(standby, "new standby frequency");
            self.pending_standby = Some(standby);
        }
    }

    pub fn next(&mut self, elapsed: Duration) -> StateSnapshot {
        if elapsed >= self.next_retarget {
            self.retarget(elapsed);
            self.next_retarget = elapsed + RETARGET_INTERVAL;
        }
        self.current.approach(&self.target);

        let s = self.current;
        let t = elapsed.as_secs_f64();
        StateSnapshot {
            airspeed: Some(s.airspeed),
            attitude: Some(AttitudeInput {
                pitch: Some(s.pitch),
                roll: Some(s.roll),
            }),
            altimeter: Some(AltimeterInput::Setting {
                altitude: Some(s.altitude),
                pressure: None,
            }),
            turn_indicator: Some(TurnInput {
                turn_rate: Some(s.turn_rate),
                slip_skid: Some(s.slip_skid),
            }),
            heading: Some(s.heading),
            magnetic_compass: Some(s.heading + (t * 1.3).sin() * 2.0),
            vsi: Some(s.vertical_speed),
            vor: Some(VorInput {
                course: Some(90.0),
                bearing: Some(90.0 + (t * 0.1).sin() * 20.0),
                deviation: Some((t * 0.1).sin() * 0.8),
                from_flag: Some((t * 0.05).sin() > 0.0),
                is_valid: Some(true),
            }),
            ndb: Some(NdbInput::Full {
                bearing: Some(45.0 + t * 2.0),
                heading: Some(s.heading),
            }),
            radio: self.pending_standby.take().map(|standby| RadioInput {
                standby_freq: Some(standby),
                ..Default::default()
            }),
        }
    }
}

impl Default for FlightDataSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Everything queued since the last frame, oldest first.
///
/// Snapshots are partial, so each one is applied in turn rather than keeping
/// only the newest.
pub fn drain_pending(receiver: &Receiver<StateSnapshot>) -> Vec<StateSnapshot> {
    receiver.try_iter().collect()
}

/// Reads one JSON snapshot per line from stdin on a background thread.
pub fn spawn_stdin_reader() -> Receiver<StateSnapshot> {
    let (sender, receiver) = mpsc::channel();
    thread::spawn(move || {
        let stdin = io::stdin();
        for (number, line) in stdin.lock().lines().enumerate() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    tracing::error!(%err, "stdin closed");
                    break;
                }
            };
            if line.trim().is_empty() {
                continue;
            }
            match serde_json::from_str::<StateSnapshot>(&line) {
                Ok(snapshot) => {
                    if sender.send(snapshot).is_err() {
                        break;
                    }
                }
                Err(err) => tracing::warn!(line = number + 1, %err, "skipping malformed snapshot"),
            }
        }
        tracing::info!("stdin reader finished");
    });
    receiver
}
