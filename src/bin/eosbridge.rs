use eosbridge_rs::{config, host, server, session};

fn main() -> std::io::Result<()> {
    env_logger::init();

    let config_root = config::read_config_yaml("./config.yaml")?;

    let transport = host::UdpOsc::new(&config_root.osc)?;
    let socket = transport.try_clone_socket()?;

    let mut session = session::Session::new(transport, config_root);
    session.start()?;

    server::serve(socket, session)?;

    Ok(())
}
