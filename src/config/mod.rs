//! Bridge configuration.

use std::path::Path;
use std::{fs, io};

use serde::{Deserialize, Serialize};

use crate::command::Profile;

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Root {
    /// OSC transport endpoints.
    pub osc: Osc,
    /// Console-facing settings.
    pub eos: Eos,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Osc {
    /// Whether the console runs on this machine.
    #[serde(default)]
    pub local: bool,
    /// Console host address.
    pub remote_host: String,
    /// Port the console listens on.
    pub remote_port: u16,
    /// Port this bridge receives console replies on.
    pub local_port: u16,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Eos {
    /// Which console user to operate as.
    pub user: User,
    /// User number for the explicit setting. Real console users are >= 1.
    #[serde(rename = "userID", default)]
    pub user_id: i32,
    /// First real console channel; added to every logical channel id.
    pub start_channel: u32,
    /// Wire dialect to speak.
    #[serde(default = "default_profile")]
    pub profile: Profile,
}

/// Console user selector. Console and background are reserved sentinels
/// on the wire (-1 and 0).
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum User {
    Console,
    Background,
    Explicit,
}

fn default_profile() -> Profile {
    Profile::Classic
}

pub fn read_config_yaml<T: AsRef<Path>>(path: T) -> io::Result<Root> {
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    let root: Root = serde_yaml::from_reader(reader).map_err(|err| {
        eprintln!("Error reading config file: {:?}", err);
        io::Error::from(io::ErrorKind::InvalidData)
    })?;
    check(root)
}

pub fn read_config_json<T: AsRef<Path>>(path: T) -> io::Result<Root> {
    let file = fs::File::open(path)?;
    let reader = io::BufReader::new(file);
    let root: Root = serde_json::from_reader(reader).map_err(|err| {
        eprintln!("Error reading config file: {:?}", err);
        io::Error::from(io::ErrorKind::InvalidData)
    })?;
    check(root)
}

/// Quick sanity check for the configuration.
fn check(root: Root) -> io::Result<Root> {
    // Explicit user ids must not collide with the reserved sentinels.
    if root.eos.user == User::Explicit && root.eos.user_id < 1 {
        eprintln!("Explicit user id must be >= 1, got {}", root.eos.user_id);
        return Err(io::Error::from(io::ErrorKind::InvalidData));
    }
    Ok(root)
}
