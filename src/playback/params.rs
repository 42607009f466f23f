use std::ops::RangeInclusive;

use derive_builder::Builder;

use crate::{Utterance, VoiceHandle};

/// Accepted speech rate multipliers.
pub const RATE_RANGE: RangeInclusive<f32> = 0.1..=3.0;
/// Accepted pitch values.
pub const PITCH_RANGE: RangeInclusive<f32> = 0.0..=2.0;
/// Accepted volume values.
pub const VOLUME_RANGE: RangeInclusive<f32> = 0.0..=1.0;

/// Parameters for the next utterance.
///
/// The controller uses the values as given. Use [`ParameterModelBuilder`] to get range
/// checks when values come from user input.
///
/// ```rust
/// use tts_playback::playback::ParameterModelBuilder;
///
/// let params = ParameterModelBuilder::default()
///     .text("Hello from Zira")
///     .voice("Microsoft Zira")
///     .rate(1.2)
///     .build()?;
/// assert_eq!(params.pitch, 1.0);
///
/// assert!(ParameterModelBuilder::default().rate(5.0).build().is_err());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct ParameterModel {
    #[builder(setter(into))]
    pub text: String,
    /// Voice to speak with. `None` uses the engine default.
    #[builder(setter(into, strip_option))]
    pub voice: Option<VoiceHandle>,
    /// Speech rate multiplier, see [`RATE_RANGE`].
    pub rate: f32,
    /// See [`PITCH_RANGE`].
    pub pitch: f32,
    /// See [`VOLUME_RANGE`].
    pub volume: f32,
}

impl Default for ParameterModel {
    fn default() -> Self {
        Self {
            text: String::new(),
            voice: None,
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

impl ParameterModel {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Default::default()
        }
    }

    pub fn with_voice(mut self, voice: Option<VoiceHandle>) -> Self {
        self.voice = voice;
        self
    }

    /// False for empty or whitespace-only text.
    pub fn has_text(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// Snapshot of the current values as an engine utterance.
    pub fn utterance(&self) -> Utterance {
        Utterance {
            text: self.text.clone(),
            voice: self.voice.clone(),
            rate: self.rate,
            pitch: self.pitch,
            volume: self.volume,
        }
    }
}

impl ParameterModelBuilder {
    fn validate(&self) -> Result<(), String> {
        check_range("rate", self.rate, &RATE_RANGE)?;
        check_range("pitch", self.pitch, &PITCH_RANGE)?;
        check_range("volume", self.volume, &VOLUME_RANGE)
    }
}

fn check_range(
    field: &str,
    value: Option<f32>,
    range: &RangeInclusive<f32>,
) -> Result<(), String> {
    match value {
        Some(v) if !range.contains(&v) => Err(format!(
            "{field} {v} is outside {}..={}",
            range.start(),
            range.end()
        )),
        _ => Ok(()),
    }
}
