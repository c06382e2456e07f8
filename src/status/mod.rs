//! Decodes the console's OSC status feed into named output values.

use log::debug;
use rosc::{OscMessage, OscType};

use crate::osc;

/// Last known state of one cue slot (active or pending).
#[derive(Debug, Default, Clone, PartialEq)]
pub struct CueStatus {
    /// Cue list number.
    pub cuelist: u32,
    /// Cue number, decimal because of sub-cue notation ("2.3").
    pub cue_number: f64,
    /// Raw cue text as reported by the console.
    pub name: String,
    /// Label recovered from the cue text.
    pub label: String,
    /// Elapsed cue time in seconds.
    pub time_seconds: f64,
    /// Completion percent; the console only reports this for active cues.
    pub percent: u32,
}

/// Current-value cache of the console state the bridge mirrors.
///
/// Everything here is a last-write-wins projection; no history is kept.
#[derive(Debug, Default, Clone)]
pub struct OutputValues {
    /// The console's command-line buffer, echoed verbatim.
    pub command_line: String,
    pub active: CueStatus,
    pub pending: CueStatus,
}

/// A named output value, as served to the embedding host.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
}

impl OutputValues {
    /// Look up an output by its host-facing name.
    pub fn get(&self, name: &str) -> Option<Value> {
        match name {
            "commandLine" => Some(Value::Text(self.command_line.clone())),
            "activeCueNo" => Some(Value::Float(self.active.cue_number)),
            "activeCuelistNo" => Some(Value::Int(i64::from(self.active.cuelist))),
            "activeCueName" => Some(Value::Text(self.active.name.clone())),
            "activeCueLabel" => Some(Value::Text(self.active.label.clone())),
            "activeCueTime" => Some(Value::Float(self.active.time_seconds)),
            "activeCuePercent" => Some(Value::Int(i64::from(self.active.percent))),
            "pendingCueNo" => Some(Value::Float(self.pending.cue_number)),
            "pendingCuelistNo" => Some(Value::Int(i64::from(self.pending.cuelist))),
            "pendingCueName" => Some(Value::Text(self.pending.name.clone())),
            "pendingCueLabel" => Some(Value::Text(self.pending.label.clone())),
            "pendingCueTime" => Some(Value::Float(self.pending.time_seconds)),
            _ => None,
        }
    }
}

/// Store a command-line echo.
pub fn command_line(values: &mut OutputValues, msg: &OscMessage) {
    if !osc::matches(&msg.addr, "/eos/out/cmd") {
        return;
    }
    if let Some(text) = first_string(msg) {
        debug!("command line: {:?}", text);
        values.command_line = text.to_string();
    }
}

/// Store an active/pending cue locator.
///
/// The category sits at address segment 3. The numeric shape
/// `/eos/out/<category>/cue/<list>/<number>` also carries the cue list and
/// number; the bare shapes reset both to zero.
pub fn cue(values: &mut OutputValues, msg: &OscMessage) {
    let parts: Vec<&str> = msg.addr.split('/').collect();
    let category = parts.get(3).copied().unwrap_or("");

    let mut cuelist = 0;
    let mut cue_number = 0.0;
    if osc::matches(&msg.addr, "/eos/out/*/cue/*/*") {
        cuelist = parts.get(5).and_then(|s| s.parse().ok()).unwrap_or(0);
        cue_number = parts.get(6).and_then(|s| s.parse().ok()).unwrap_or(0.0);
    }

    match category {
        "active" => {
            debug!("active cue: list {} cue {}", cuelist, cue_number);
            values.active.cuelist = cuelist;
            values.active.cue_number = cue_number;
        }
        "pending" => {
            debug!("pending cue: list {} cue {}", cuelist, cue_number);
            values.pending.cuelist = cuelist;
            values.pending.cue_number = cue_number;
        }
        _ => {}
    }
}

/// Decode an active/pending cue text payload.
///
/// The payload is a single free-text argument shaped like
/// `"<list>/<cue> Label With Spaces <mm:ss> <percent>"`; the trailing
/// fields are recovered positionally from the back of the token list.
/// Pending cues carry no percent.
pub fn cue_text(values: &mut OutputValues, msg: &OscMessage) {
    if !osc::matches(&msg.addr, "/eos/out/*/cue/text") {
        return;
    }
    let parts: Vec<&str> = msg.addr.split('/').collect();
    let category = parts.get(3).copied().unwrap_or("");

    let raw = match first_string(msg) {
        Some(text) => text,
        None => return,
    };
    let tokens: Vec<&str> = if raw.is_empty() {
        vec![]
    } else {
        raw.split(' ').collect()
    };

    match category {
        "active" => {
            let slot = &mut values.active;
            slot.name = raw.to_string();
            slot.label = join_label(&tokens, 2);
            slot.time_seconds = match tokens.len().checked_sub(2) {
                Some(i) => eos_time_to_seconds(tokens[i]),
                None => 0.0,
            };
            slot.percent = tokens.last().map_or(0, |t| leading_int(t));
            debug!(
                "active cue text: label {:?} time {} percent {}",
                slot.label, slot.time_seconds, slot.percent
            );
        }
        "pending" => {
            let slot = &mut values.pending;
            slot.name = raw.to_string();
            slot.label = join_label(&tokens, 1);
            slot.time_seconds = tokens.last().map_or(0.0, |t| eos_time_to_seconds(t));
            debug!(
                "pending cue text: label {:?} time {}",
                slot.label, slot.time_seconds
            );
        }
        _ => {}
    }
}

/// Rejoin the label tokens, skipping the locator prefix at the front and
/// `trailing` status tokens at the back.
fn join_label(tokens: &[&str], trailing: usize) -> String {
    if tokens.len() <= trailing + 1 {
        return String::new();
    }
    tokens[1..tokens.len() - trailing].join(" ")
}

/// Convert an Eos time string to seconds.
///
/// Accepts plain seconds, `mm:ss` and `h:mm:ss`; unparseable parts count
/// as zero.
pub fn eos_time_to_seconds(time: &str) -> f64 {
    let parts: Vec<&str> = time.split(':').collect();
    let num = |s: &str| s.parse::<f64>().unwrap_or(0.0);

    match parts.len() {
        2 => num(parts[0]) * 60.0 + num(parts[1]),
        3 => num(parts[0]) * 3600.0 + num(parts[1]) * 60.0 + num(parts[2]),
        _ => num(time),
    }
}

/// Parse the leading digits of a token, tolerating trailing junk like a
/// percent sign. Defaults to zero.
fn leading_int(token: &str) -> u32 {
    let digits: String = token.chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

fn first_string(msg: &OscMessage) -> Option<&str> {
    match msg.args.get(0) {
        Some(OscType::String(text)) => Some(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn msg(addr: &str, text: Option<&str>) -> OscMessage {
        OscMessage {
            addr: addr.to_string(),
            args: text.map(|t| OscType::String(t.to_string())).into_iter().collect(),
        }
    }

    #[test]
    fn command_line_echo_is_stored_verbatim() {
        let mut values = OutputValues::default();
        command_line(&mut values, &msg("/eos/out/cmd", Some("Chan 1 @ 50#")));
        assert_eq!(values.command_line, "Chan 1 @ 50#");
        assert_eq!(
            values.get("commandLine"),
            Some(Value::Text("Chan 1 @ 50#".to_string()))
        );
    }

    #[test]
    fn command_line_ignores_other_addresses() {
        let mut values = OutputValues::default();
        command_line(&mut values, &msg("/eos/out/ping", Some("nope")));
        assert_eq!(values.command_line, "");
    }

    #[test]
    fn cue_numeric_shape_carries_list_and_number() {
        let mut values = OutputValues::default();
        cue(&mut values, &msg("/eos/out/active/cue/1/2.3", None));
        assert_eq!(values.active.cuelist, 1);
        assert_eq!(values.active.cue_number, 2.3);
        assert_eq!(values.pending.cuelist, 0);
    }

    #[test]
    fn cue_pending_shape_resets_fields() {
        let mut values = OutputValues::default();
        cue(&mut values, &msg("/eos/out/pending/cue/9/8.7", None));
        assert_eq!(values.pending.cuelist, 9);

        cue(&mut values, &msg("/eos/out/pending/cue", None));
        assert_eq!(values.pending.cuelist, 0);
        assert_eq!(values.pending.cue_number, 0.0);
    }

    #[test]
    fn cue_unparseable_segments_default_to_zero() {
        let mut values = OutputValues::default();
        cue(&mut values, &msg("/eos/out/active/cue/x/y", None));
        assert_eq!(values.active.cuelist, 0);
        assert_eq!(values.active.cue_number, 0.0);
    }

    #[test]
    fn active_cue_text_decodes_from_the_back() {
        let mut values = OutputValues::default();
        cue_text(
            &mut values,
            &msg("/eos/out/active/cue/text", Some("1/2.3 My Label 0:05 75")),
        );
        assert_eq!(values.active.name, "1/2.3 My Label 0:05 75");
        assert_eq!(values.active.label, "My Label");
        assert_eq!(values.active.time_seconds, 5.0);
        assert_eq!(values.active.percent, 75);
    }

    #[test]
    fn active_cue_text_tolerates_percent_sign() {
        let mut values = OutputValues::default();
        cue_text(
            &mut values,
            &msg("/eos/out/active/cue/text", Some("1/1 Opening 1:30 75%")),
        );
        assert_eq!(values.active.label, "Opening");
        assert_eq!(values.active.time_seconds, 90.0);
        assert_eq!(values.active.percent, 75);
    }

    #[test]
    fn pending_cue_text_has_no_percent() {
        let mut values = OutputValues::default();
        cue_text(
            &mut values,
            &msg("/eos/out/pending/cue/text", Some("1/2.3 My Label 1:02:03")),
        );
        assert_eq!(values.pending.label, "My Label");
        assert_eq!(values.pending.time_seconds, 3723.0);
        assert_eq!(values.pending.percent, 0);
    }

    #[test]
    fn empty_cue_text_defaults_everything() {
        let mut values = OutputValues::default();
        cue_text(&mut values, &msg("/eos/out/active/cue/text", Some("")));
        assert_eq!(values.active.label, "");
        assert_eq!(values.active.time_seconds, 0.0);
        assert_eq!(values.active.percent, 0);
    }

    #[test]
    fn short_cue_text_has_empty_label() {
        let mut values = OutputValues::default();
        cue_text(
            &mut values,
            &msg("/eos/out/active/cue/text", Some("1/1 0:10 50")),
        );
        assert_eq!(values.active.label, "");
        assert_eq!(values.active.time_seconds, 10.0);
        assert_eq!(values.active.percent, 50);
    }

    #[test]
    fn time_parse_shapes() {
        assert_eq!(eos_time_to_seconds("5"), 5.0);
        assert_eq!(eos_time_to_seconds("1:30"), 90.0);
        assert_eq!(eos_time_to_seconds("1:01:01"), 3661.0);
        assert_eq!(eos_time_to_seconds("garbage"), 0.0);
    }

    #[test]
    fn value_names_cover_the_host_contract() {
        let values = OutputValues::default();
        for name in &[
            "commandLine",
            "activeCueNo",
            "activeCuelistNo",
            "pendingCueNo",
            "pendingCuelistNo",
            "activeCueName",
            "activeCueLabel",
            "activeCueTime",
            "activeCuePercent",
            "pendingCueName",
            "pendingCueLabel",
            "pendingCueTime",
        ] {
            assert!(values.get(name).is_some(), "missing output: {}", name);
        }
        assert_eq!(values.get("somethingElse"), None);
    }
}
