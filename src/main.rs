//! Bullet Heck demo driver
//!
//! Runs one shape/bullet pattern pair headless at a fixed 60 Hz step and logs
//! every shot. Usage: `bullet-heck [preset.json]`
//!
//! A preset is a JSON object with optional `shape`, `bullet`, `seconds`,
//! `origin` and `target` fields; anything missing takes its default.

#[cfg(not(target_arch = "wasm32"))]
mod demo {
    use std::path::Path;
    use std::rc::Rc;

    use bullet_heck::consts::FRAME_DT;
    use bullet_heck::{
        BulletPattern, BulletResolver, FireBullets, FiringSequence, Geometry, Pattern,
        SequencerEvent, ShapePattern, ShapeResolver, Shot,
    };
    use glam::Vec2;
    use serde::{Deserialize, Serialize};

    /// Longest run accepted from a preset (seconds)
    const MAX_SECONDS: f32 = 600.0;

    #[derive(Debug, thiserror::Error)]
    pub enum PresetError {
        #[error("cannot read preset: {0}")]
        Io(#[from] std::io::Error),
        #[error("invalid preset: {0}")]
        Json(#[from] serde_json::Error),
    }

    #[derive(Debug, Clone, Serialize, Deserialize)]
    #[serde(default)]
    pub struct Preset {
        pub shape: ShapePattern,
        pub bullet: BulletPattern,
        /// Simulated run time
        pub seconds: f32,
        pub origin: Vec2,
        pub target: Option<Vec2>,
    }

    impl Default for Preset {
        fn default() -> Self {
            Self {
                shape: ShapePattern {
                    geometry: Geometry::NGon,
                    point_count: 5,
                    subdivisions_per_edge: 1,
                    max_radius: 2.0,
                    rotation_degrees_per_second: 45.0,
                    ..Default::default()
                },
                bullet: BulletPattern {
                    firing_sequence: FiringSequence::CenterToOutside,
                    burst_per_shot: 1,
                    ..Default::default()
                },
                seconds: 2.0,
                origin: Vec2::ZERO,
                target: None,
            }
        }
    }

    impl Preset {
        pub fn load(path: &Path) -> Result<Self, PresetError> {
            let text = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&text)?)
        }

        /// Copy with every value inside its authoring range
        pub fn clamped(&self) -> Self {
            Self {
                shape: self.shape.clamped(),
                bullet: self.bullet.clamped(),
                seconds: self.seconds.clamp(0.0, MAX_SECONDS),
                ..self.clone()
            }
        }
    }

    /// Logs shots instead of spawning projectiles
    #[derive(Debug, Default)]
    struct ConsoleLauncher {
        time: f32,
        fired: usize,
    }

    impl FireBullets for ConsoleLauncher {
        fn fire(&mut self, shot: Shot) {
            self.fired += 1;
            log::info!(
                "t={:.3}s point {:>2} at ({:6.2}, {:6.2}) dir ({:5.2}, {:5.2}) speed {} damage {}",
                self.time,
                shot.index,
                shot.position.x,
                shot.position.y,
                shot.direction.x,
                shot.direction.y,
                shot.speed,
                shot.damage
            );
        }
    }

    pub fn load_preset(arg: Option<String>) -> Preset {
        let Some(path) = arg else {
            log::info!("No preset given, using the built-in pattern");
            return Preset::default();
        };
        match Preset::load(Path::new(&path)) {
            Ok(preset) => {
                log::info!("Loaded preset from {path}");
                preset
            }
            Err(e) => {
                log::warn!("{e}; using the built-in pattern");
                Preset::default()
            }
        }
    }

    pub fn run(preset: &Preset) {
        let preset = preset.clamped();
        log::info!(
            "{} with {} points, {} firing, {:.1}s",
            preset.shape.geometry.as_str(),
            preset.shape.built_point_count(),
            preset.bullet.firing_sequence.as_str(),
            preset.seconds
        );

        let shape = Pattern::shared(preset.shape.clone());
        let bullet = Pattern::shared(preset.bullet.clone());

        let mut shape_resolver = ShapeResolver::new(preset.origin);
        shape_resolver.initialize(Rc::clone(&shape));
        let mut resolver = BulletResolver::new(shape_resolver);
        resolver.initialize(Rc::clone(&bullet));
        resolver.set_target(preset.target);

        let mut launcher = ConsoleLauncher::default();
        let frames = (preset.seconds / FRAME_DT).ceil() as u32;
        let mut activations = 0;

        for frame in 0..frames {
            launcher.time = frame as f32 * FRAME_DT;
            if resolver.can_fire() {
                match resolver.try_fire(&mut launcher) {
                    Ok(()) => activations += 1,
                    Err(e) => log::warn!("{e}"),
                }
            }

            launcher.time = (frame + 1) as f32 * FRAME_DT;
            resolver.tick(FRAME_DT, &mut launcher);

            for event in resolver.drain_events() {
                if !matches!(event, SequencerEvent::FiringShot { .. }) {
                    log::debug!("t={:.3}s {event:?}", launcher.time);
                }
            }
        }

        log::info!(
            "Done: {} shots from {} activations in {:.2}s",
            launcher.fired,
            activations,
            preset.seconds
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Bullet Heck demo starting...");

    let preset = demo::load_preset(std::env::args().nth(1));
    demo::run(&preset);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host on the web; there is no demo loop
}
