use std::time::{Duration, Instant};

use eosbridge_rs::command::Profile;
use eosbridge_rs::effects::PointPayload;
use eosbridge_rs::{config, host, session};

/// Sweeps a point effect back and forth over the first dozen channels.
fn main() -> std::io::Result<()> {
    env_logger::init();

    let config_root = config::Root {
        osc: config::Osc {
            local: true,
            remote_host: "127.0.0.1".to_string(),
            remote_port: 8000,
            local_port: 8001,
        },
        eos: config::Eos {
            user: config::User::Background,
            user_id: 0,
            start_channel: 1,
            profile: Profile::Classic,
        },
    };

    let transport = host::UdpOsc::new(&config_root.osc)?;
    let mut session = session::Session::new(transport, config_root);
    session.start()?;

    let started = Instant::now();
    loop {
        let t = Instant::now().duration_since(started).as_secs_f32();

        let speed = 0.5;
        let position = (t * speed).sin() * 0.5 + 0.5;

        session.point(0, 11, position, 0.25, 1.0, PointPayload::Level(1.0))?;

        std::thread::sleep(Duration::from_millis(250));
    }
}
