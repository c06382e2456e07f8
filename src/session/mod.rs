//! Console session: wires configuration, commands and the status feed.

use std::io;

use log::{debug, info};
use rosc::{OscMessage, OscType};

use crate::command::{self, Color, Selection};
use crate::config;
use crate::effects::{self, PointPayload};
use crate::host::Transport;
use crate::osc::{Handler, Registry};
use crate::status::{self, OutputValues, Value};

/// The console user this session operates as.
///
/// Console and background map to reserved wire ids; real users start at 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActiveUser {
    Console,
    Background,
    Explicit(i32),
}

impl ActiveUser {
    /// Derive the active user from the current configuration snapshot.
    pub fn from_config(eos: &config::Eos) -> ActiveUser {
        match eos.user {
            config::User::Console => ActiveUser::Console,
            config::User::Background => ActiveUser::Background,
            config::User::Explicit => ActiveUser::Explicit(eos.user_id),
        }
    }

    /// The id announced to the console.
    pub fn announce_id(&self) -> i32 {
        match self {
            ActiveUser::Console => -1,
            ActiveUser::Background => 0,
            ActiveUser::Explicit(id) => *id,
        }
    }
}

/// One bridge session against a console.
///
/// Every entry point runs to completion synchronously; the only state is
/// the configuration snapshot and the output-value cache.
pub struct Session<T: Transport> {
    transport: T,
    config: config::Root,
    registry: Registry,
    values: OutputValues,
}

impl<T: Transport> Session<T> {
    pub fn new(transport: T, config: config::Root) -> Session<T> {
        Session {
            transport,
            config,
            registry: Registry::new(),
            values: OutputValues::default(),
        }
    }

    /// Register the status patterns, announce the user and subscribe to
    /// the console's status feed.
    pub fn start(&mut self) -> io::Result<()> {
        info!("initializing eos session");

        self.registry.register("/eos/out/cmd", Handler::CommandLine);
        for pattern in self.config.eos.profile.cue_patterns() {
            self.registry.register(pattern, Handler::Cue);
        }
        self.registry.register("/eos/out/*/cue/text", Handler::CueText);

        self.announce_user()?;
        self.transport.send("/eos/subscribe", vec![OscType::Int(1)])?;

        info!("eos session ready");
        Ok(())
    }

    /// React to a host-side parameter change.
    ///
    /// User and endpoint parameters require re-announcing the user; the
    /// start channel is re-read at every resolve and needs nothing here.
    pub fn parameter_changed(&mut self, name: &str) -> io::Result<()> {
        debug!("{} parameter changed", name);
        match name {
            "user" | "userID" | "local" | "localPort" | "remoteHost" | "remotePort" => {
                self.announce_user()
            }
            _ => Ok(()),
        }
    }

    /// The current configuration, for host-side mutation followed by
    /// `parameter_changed`.
    pub fn config_mut(&mut self) -> &mut config::Root {
        &mut self.config
    }

    /// The current output-value cache.
    pub fn values(&self) -> &OutputValues {
        &self.values
    }

    /// Look up a named output value.
    pub fn value(&self, name: &str) -> Option<Value> {
        self.values.get(name)
    }

    fn announce_user(&mut self) -> io::Result<()> {
        let user = ActiveUser::from_config(&self.config.eos);
        info!("change eos user: {}", user.announce_id());
        self.transport
            .send("/eos/user", vec![OscType::Int(user.announce_id())])
    }

    /// Type a raw command on the console's command line.
    ///
    /// `terminate` appends `#`; `clear` wipes the console's buffer first
    /// by using the newcmd address instead of appending.
    pub fn command(&mut self, text: &str, terminate: bool, clear: bool) -> io::Result<()> {
        self.send_command(text, terminate, clear)
    }

    fn send_command(&mut self, text: &str, terminate: bool, clear: bool) -> io::Result<()> {
        let mut cmd = text.to_string();
        if terminate {
            cmd.push('#');
        }
        let address = if clear { "/eos/newcmd" } else { "/eos/cmd" };
        debug!("command: {}", cmd);
        self.transport.send(address, vec![OscType::String(cmd)])
    }

    fn resolve(&self, selection: Selection) -> String {
        command::resolve(
            selection,
            self.config.eos.start_channel,
            self.config.eos.profile,
        )
    }

    /// Set a selection to a 0..1 intensity level.
    pub fn set_level(&mut self, selection: Selection, value: f32) -> io::Result<()> {
        let target = self.resolve(selection);
        let cmd = format!("{} @ {}", target, command::level(value));
        self.send_command(&cmd, true, true)
    }

    /// Set a selection to a color, using the dialect's color channel.
    pub fn set_color(&mut self, selection: Selection, color: Color) -> io::Result<()> {
        let target = self.resolve(selection);
        let profile = self.config.eos.profile;

        if profile.inline_color() {
            let clause = command::color_clause(color, profile.other_emitters());
            self.send_command(&format!("{} {}", target, clause), true, true)
        } else {
            self.send_command(&target, true, true)?;
            self.transport.send(
                "/eos/color/rgb",
                vec![
                    OscType::Float(color.red),
                    OscType::Float(color.green),
                    OscType::Float(color.blue),
                ],
            )
        }
    }

    /// Zero a selection's color and intensity.
    pub fn blackout(&mut self, selection: Selection) -> io::Result<()> {
        let target = self.resolve(selection);
        let profile = self.config.eos.profile;

        if profile.other_emitters() {
            let clause = command::color_clause(Color::BLACK, true);
            self.send_command(&format!("{} {}", target, clause), true, true)?;
        } else {
            self.send_command(&format!("{} Color 0", target), true, true)?;
        }
        self.send_command(&format!("{} @ Out", target), true, true)
    }

    /// Fire a console macro by number.
    pub fn fire_macro(&mut self, number: u32) -> io::Result<()> {
        info!("macro: {}", number);
        self.transport
            .send("/eos/macro/fire", vec![OscType::Int(number as i32)])
    }

    /// Paint a linear color gradient over a channel range, one command
    /// per channel in ascending order.
    pub fn gradient(
        &mut self,
        start: u32,
        end: u32,
        from: Color,
        to: Color,
    ) -> io::Result<()> {
        debug!("gradient: chan {} thru {}", start, end);
        for (id, color) in effects::gradient_stops(start, end, from, to) {
            self.set_color(Selection::One(id), color)?;
        }
        Ok(())
    }

    /// Paint a point effect over a channel range: a triangular-falloff
    /// spot at `position`, blanking everything outside its footprint.
    pub fn point(
        &mut self,
        start: u32,
        end: u32,
        position: f32,
        size: f32,
        fade: f32,
        payload: PointPayload,
    ) -> io::Result<()> {
        debug!("point: chan {} thru {}", start, end);
        for (id, fac) in effects::point_factors(start, end, position, size, fade) {
            match payload {
                PointPayload::Level(value) => {
                    self.set_level(Selection::One(id), value * fac)?;
                }
                PointPayload::Rgb(color) => {
                    self.set_color(Selection::One(id), color.scaled(fac))?;
                }
            }
        }
        Ok(())
    }

    /// Dispatch one inbound console message to the status decoders.
    pub fn take_msg(&mut self, msg: &OscMessage) {
        for handler in self.registry.dispatch(&msg.addr) {
            match handler {
                Handler::CommandLine => status::command_line(&mut self.values, msg),
                Handler::Cue => status::cue(&mut self.values, msg),
                Handler::CueText => status::cue_text(&mut self.values, msg),
            }
        }
    }
}
