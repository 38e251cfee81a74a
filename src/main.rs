//! Play Area entry point
//!
//! Runs a session against a simulated OpenXR runtime and walks the headset
//! out of the boundary and back. Pass a JSON config path as the first argument
//! to override the defaults.

#[cfg(not(target_arch = "wasm32"))]
mod simulated {
    use glam::Vec3;

    use play_area::runtime::DeviceProvider;
    use play_area::source::{DeviceRole, XrInputSubsystem};

    /// L-shaped room, 4m x 3m with a 2m x 1m notch cut out
    pub struct Room;

    impl XrInputSubsystem for Room {
        fn boundary_points(&self) -> Option<Vec<Vec3>> {
            Some(vec![
                Vec3::new(-2.0, 0.0, -1.5),
                Vec3::new(-2.0, 0.0, 1.5),
                Vec3::new(0.0, 0.0, 1.5),
                Vec3::new(0.0, 0.0, 0.5),
                Vec3::new(2.0, 0.0, 0.5),
                Vec3::new(2.0, 0.0, -1.5),
            ])
        }
    }

    pub struct Devices;

    impl DeviceProvider for Devices {
        fn device_name(&self, role: DeviceRole) -> Option<String> {
            let name = match role {
                DeviceRole::Headset => "Simulated HMD",
                DeviceRole::LeftController | DeviceRole::RightController => "Simulated Controller",
            };
            Some(name.to_string())
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use glam::Vec3;

    use play_area::runtime::{CancelToken, NoIntegration};
    use play_area::source::OpenXrSource;
    use play_area::{FrameInput, PlayArea, PlayAreaConfig};

    env_logger::init();
    log::info!("Play Area v{} (native) starting...", play_area::VERSION);

    let config = match std::env::args().nth(1) {
        Some(path) => match PlayAreaConfig::load(std::path::Path::new(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::error!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => PlayAreaConfig::default(),
    };

    let mut source = OpenXrSource::new(Some(simulated::Room));
    let mut play_area = match PlayArea::start(
        config,
        &mut source,
        &simulated::Devices,
        &NoIntegration,
        &CancelToken::new(),
    ) {
        Ok(play_area) => play_area,
        Err(e) => {
            log::error!("Play area startup failed: {}", e);
            std::process::exit(1);
        }
    };

    if let Some(reason) = play_area.inactive_reason() {
        log::warn!("Play area inactive: {:?}", reason);
        return;
    }

    if let Some(tracker) = play_area.tracker() {
        let mesh = &tracker.geometry().mesh;
        log::info!(
            "Boundary mesh: {} quads, {} vertices, {} bytes",
            mesh.quad_count(),
            mesh.vertices.len(),
            mesh.vertex_bytes().len()
        );
    }

    // Walk from the center out into the notch and back, 2s each way at 90Hz
    let dt = 1.0 / 90.0;
    let frames = 180;
    for frame in 0..frames * 2 {
        let t = if frame < frames {
            frame as f32 / frames as f32
        } else {
            (frames * 2 - frame) as f32 / frames as f32
        };
        let headset = Vec3::new(t, 1.7, t * 1.2);
        let input = FrameInput {
            dt,
            headset_position: headset,
            headset_forward: Vec3::Z,
            left_controller_position: headset + Vec3::new(-0.3, -0.5, 0.2),
            right_controller_position: headset + Vec3::new(0.3, -0.5, 0.2),
        };

        let Some(output) = play_area.update(&input) else {
            break;
        };

        for event in play_area.drain_events() {
            log::info!("Frame {}: {:?} at ({:.2}, {:.2})", frame, event, headset.x, headset.z);
        }

        if frame % 30 == 0 {
            if let Some(shader) = output.shader {
                log::debug!(
                    "Frame {}: {:?}, cell {:.2}, alpha {:.2}",
                    frame,
                    output.bounds,
                    shader.cell_visibility,
                    shader.inside_cell_alpha
                );
            }
        }
    }

    log::info!("Walk finished");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The library is driven by the host engine on wasm; nothing to run here
}
