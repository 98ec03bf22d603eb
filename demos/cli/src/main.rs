use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use dischargex_core::{
    DocumentSource, ExtractConfig, ExtractError, ExtractedRecord, RecordSink,
};
use dischargex_extract::extract_record;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(
    name = "dischargex-cli",
    about = "Extract structured records from discharge-summary text files."
)]
struct Args {
    /// Directory containing the .txt discharge summaries.
    #[arg(short, long)]
    input: PathBuf,

    /// Directory receiving one JSON record per summary.
    #[arg(short, long)]
    output: PathBuf,

    /// Trim the leading space off cleaned medication names.
    #[arg(long)]
    trim_medication_names: bool,
}

/// Yields one `(file stem, full text)` pair per `.txt` file in a directory.
struct DirSource {
    dir: PathBuf,
}

impl DocumentSource for DirSource {
    fn documents(&mut self) -> Result<Vec<(String, String)>, ExtractError> {
        let entries =
            fs::read_dir(&self.dir).map_err(|err| ExtractError::Source(err.to_string()))?;

        let mut documents = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|err| ExtractError::Source(err.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("txt") {
                warn!(path = %path.display(), "skipping file without .txt extension");
                continue;
            }
            let Some(id) = path.file_stem().and_then(|stem| stem.to_str()) else {
                warn!(path = %path.display(), "skipping file with unusable name");
                continue;
            };
            let text =
                fs::read_to_string(&path).map_err(|err| ExtractError::Source(err.to_string()))?;
            documents.push((id.to_string(), text));
        }
        Ok(documents)
    }
}

/// Writes `<output>/<id>.json`, creating the directory on first use.
struct JsonDirSink {
    dir: PathBuf,
    created: bool,
}

impl RecordSink for JsonDirSink {
    fn write_record(&mut self, id: &str, record: &ExtractedRecord) -> Result<(), ExtractError> {
        if !self.created {
            fs::create_dir_all(&self.dir).map_err(|err| ExtractError::Sink(err.to_string()))?;
            self.created = true;
        }
        let json = serde_json::to_string_pretty(record)
            .map_err(|err| ExtractError::Serialize(err.to_string()))?;
        let path = self.dir.join(format!("{id}.json"));
        fs::write(&path, json).map_err(|err| ExtractError::Sink(err.to_string()))
    }
}

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    let config = ExtractConfig {
        trim_medication_names: args.trim_medication_names,
    };

    let mut source = DirSource {
        dir: args.input.clone(),
    };
    let mut sink = JsonDirSink {
        dir: args.output.clone(),
        created: false,
    };

    let documents = source
        .documents()
        .with_context(|| format!("could not read summaries from {:?}", args.input))?;

    for (id, text) in &documents {
        let record = extract_record(text, &config);
        sink.write_record(id, &record)
            .with_context(|| format!("could not write record for {id}"))?;
        info!(document = %id, diseases = record.diseases.len(), "record written");
    }

    println!("Extracted {} record(s) into {:?}", documents.len(), args.output);

    Ok(())
}
