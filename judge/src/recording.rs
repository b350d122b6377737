use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::Object;

/// Collects the actions of one match and writes them to a JSON file.
pub struct Recorder {
    directory: PathBuf,
    messages: Vec<RecordedMessage>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            directory,
            messages: Vec::new(),
        })
    }

    pub fn store_message(&mut self, object: &Object, verdict: &str) {
        self.messages.push(RecordedMessage {
            player: object.key.name.clone(),
            owner: object.meta.owner.clone(),
            value: object.value.clone(),
            verdict: String::from(verdict),
        });
    }

    /// Writes `match_<room_id>.json` and returns its path.
    pub fn write_match_recording(&mut self, room_id: &str) -> anyhow::Result<PathBuf> {
        let filepath = self.directory.join(format!("match_{}.json", room_id));
        let mut writer = BufWriter::new(File::create(&filepath)?);
        let recording = MatchRecording {
            room_id: String::from(room_id),
            messages: std::mem::take(&mut self.messages),
        };
        serde_json::to_writer_pretty(&mut writer, &recording)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(filepath)
    }
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchRecording {
    pub room_id: String,
    pub messages: Vec<RecordedMessage>,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedMessage {
    pub player: String,
    pub owner: String,
    /// The payload as it was received, which need not be valid JSON.
    pub value: String,
    pub verdict: String,
}
