//! Scalar input values as written in preset files.

use branches_core::{InputRef, SignalKind};

/// A parsed value for a float, int, or bool input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalarValue {
    /// Float value, after unit conversion.
    Float(f32),
    /// Integer value.
    Int(i32),
    /// Boolean value.
    Bool(bool),
}

impl ScalarValue {
    /// Parse `value` as the given input kind.
    ///
    /// Returns `None` for audio and trigger kinds and for text that does not
    /// parse. Float inputs accept the unit suffixes of [`parse_input_value`].
    /// Int inputs accept integers only. Bool inputs accept
    /// `true`/`false`, `on`/`off`, `yes`/`no`, and `1`/`0`.
    pub fn parse(value: &str, kind: SignalKind) -> Option<Self> {
        let value = value.trim();
        match kind {
            SignalKind::Float => parse_input_value(value).map(ScalarValue::Float),
            SignalKind::Int => value.parse::<i32>().ok().map(ScalarValue::Int),
            SignalKind::Bool => parse_bool(value).map(ScalarValue::Bool),
            SignalKind::Audio | SignalKind::Trigger => None,
        }
    }

    /// Binding for [`BlockInputs`](branches_core::BlockInputs).
    pub fn as_input(self) -> InputRef<'static> {
        match self {
            ScalarValue::Float(v) => InputRef::Float(v),
            ScalarValue::Int(v) => InputRef::Int(v),
            ScalarValue::Bool(v) => InputRef::Bool(v),
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Parse a float input value string.
///
/// Supports:
/// - Plain numbers: "0.5", "440", "-0.3"
/// - Percentages: "50%" (divided by 100)
/// - Decibels: "-6dB" (converted to linear gain)
/// - Time in ms: "10ms" (converted to seconds)
/// - Time in s: "1.5s"
/// - Frequency in Hz: "440Hz"
/// - Frequency in kHz: "1.2kHz" (converted to Hz)
///
/// Time-valued node inputs are in seconds.
pub fn parse_input_value(value: &str) -> Option<f32> {
    let value = value.trim();

    if let Some(pct) = value.strip_suffix('%') {
        return pct.trim().parse::<f32>().ok().map(|v| v / 100.0);
    }

    if let Some(db) = value
        .strip_suffix("dB")
        .or_else(|| value.strip_suffix("db"))
    {
        return db
            .trim()
            .parse::<f32>()
            .ok()
            .map(|v| libm::powf(10.0, v / 20.0));
    }

    if let Some(ms) = value.strip_suffix("ms") {
        return ms.trim().parse::<f32>().ok().map(|v| v / 1000.0);
    }

    if let Some(s) = value.strip_suffix('s') {
        return s.trim().parse::<f32>().ok();
    }

    if let Some(khz) = value
        .strip_suffix("kHz")
        .or_else(|| value.strip_suffix("khz"))
    {
        return khz.trim().parse::<f32>().ok().map(|v| v * 1000.0);
    }

    if let Some(hz) = value
        .strip_suffix("Hz")
        .or_else(|| value.strip_suffix("hz"))
    {
        return hz.trim().parse::<f32>().ok();
    }

    value.parse::<f32>().ok()
}
