use std::thread;
use std::time::{Duration, Instant};

use tts_playback::{
    catalog::{RawVoice, VoiceCatalogBuilder},
    EngineEventAdapter, PlaybackState, SpeechEngine, TextToVoice, Utterance, VoiceSource,
};

/// Engine that "speaks" on a background thread for 40ms per word.
#[derive(Default)]
struct TimedEngine {
    speaking: bool,
    paused: bool,
}

impl SpeechEngine for TimedEngine {
    fn submit(&mut self, utterance: Utterance, callbacks: EngineEventAdapter) {
        self.speaking = true;
        self.paused = false;
        let words = utterance.text.split_whitespace().count() as u64;
        let duration = Duration::from_millis(40 * words);
        thread::spawn(move || {
            callbacks.on_start();
            thread::sleep(duration);
            callbacks.on_end();
        });
    }

    fn cancel_all(&mut self) {
        self.speaking = false;
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = self.speaking;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_speaking(&self) -> bool {
        self.speaking
    }

    fn is_paused(&self) -> bool {
        self.paused
    }
}

struct FixedVoices(Vec<RawVoice>);

impl VoiceSource for FixedVoices {
    fn list_voices(&self) -> Vec<RawVoice> {
        self.0.clone()
    }

    fn on_voices_changed(&mut self, _callback: Box<dyn FnMut() + Send>) {}
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let source = FixedVoices(vec![
        RawVoice::new("Microsoft David - English (United States)", "en-US"),
        RawVoice::new("Microsoft Zira - English (United States)", "en-US"),
        RawVoice::new("Google UK English Male", "en-GB"),
        RawVoice::new("Amelie", "fr-CA"),
        RawVoice::new("Google Deutsch", "de-DE"),
    ]);

    let mut widget = TextToVoice::new(source, TimedEngine::default(), VoiceCatalogBuilder::new());

    for group in widget.catalog().groups() {
        println!("{}:", group.language);
        for voice in widget.catalog().group_entries(group) {
            println!("  {} [{} / {}]", voice.label, voice.gender, voice.region);
        }
    }
    println!("Default voice: {:?}", widget.params().voice);

    widget.set_text("Hello! This widget drives a shared speech engine through play, pause and stop.");
    let started = Instant::now();
    widget.speak()?;

    // Stop and restart immediately: the first utterance's end callback must not end the second.
    widget.stop();
    widget.speak()?;

    while widget.state() != PlaybackState::Idle {
        widget.poll()?;
        thread::sleep(Duration::from_millis(10));
    }
    println!("Finished in {:.2?}", started.elapsed());

    widget.set_text("   ");
    if let Err(e) = widget.speak() {
        println!("Rejected: {e}");
    }
    Ok(())
}
