//! Replays landmark observations recorded as JSON lines.
//!
//! Each non-blank line is one `LandmarkObservation`:
//!
//! ```text
//! {"frame_index":0,"width":640,"height":480,"mesh":{"space":"normalized","points":[[0.41,0.38],...]}}
//! {"frame_index":1,"width":640,"height":480,"mesh":null}
//! ```

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::detection::domain::landmark_source::{LandmarkObservation, LandmarkSource};

#[derive(Error, Debug)]
pub enum TraceError {
    #[error("failed to open trace {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read trace line {line}: {source}")]
    Read {
        line: usize,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid observation on trace line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

pub struct TraceLandmarkSource {
    reader: Box<dyn BufRead + Send>,
}

impl TraceLandmarkSource {
    pub fn open(path: &Path) -> Result<Self, TraceError> {
        let file = File::open(path).map_err(|source| TraceError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_reader(BufReader::new(file)))
    }

    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
        }
    }
}

impl LandmarkSource for TraceLandmarkSource {
    fn observations(
        &mut self,
    ) -> Box<dyn Iterator<Item = Result<LandmarkObservation, Box<dyn std::error::Error>>> + '_>
    {
        Box::new(
            (&mut self.reader)
                .lines()
                .enumerate()
                .filter_map(|(i, line)| parse_line(i + 1, line).transpose()),
        )
    }
}

fn parse_line(
    line: usize,
    text: std::io::Result<String>,
) -> Result<Option<LandmarkObservation>, Box<dyn std::error::Error>> {
    let text = text.map_err(|source| TraceError::Read { line, source })?;
    if text.trim().is_empty() {
        return Ok(None);
    }
    let observation =
        serde_json::from_str(&text).map_err(|source| TraceError::Parse { line, source })?;
    Ok(Some(observation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    const TRACE: &str = r#"{"frame_index":0,"width":640,"height":480,"mesh":{"space":"pixel","points":[[1.0,2.0]]}}

{"frame_index":1,"width":640,"height":480,"mesh":null}
{"frame_index":2,"width":640,"height":480}
"#;

    #[test]
    fn test_reads_observations_and_skips_blank_lines() {
        let mut source = TraceLandmarkSource::from_reader(Cursor::new(TRACE));
        let observations: Vec<_> = source.observations().map(|o| o.unwrap()).collect();
        assert_eq!(observations.len(), 3);
        assert_eq!(observations[0].mesh.as_ref().unwrap().len(), 1);
        assert!(observations[1].mesh.is_none());
        assert!(observations[2].mesh.is_none());
        assert_eq!(observations[2].frame_index, 2);
    }

    #[test]
    fn test_parse_error_reports_line_number() {
        let text = "{\"frame_index\":0,\"width\":1,\"height\":1}\n\nnot json\n";
        let mut source = TraceLandmarkSource::from_reader(Cursor::new(text));
        let results: Vec<_> = source.observations().collect();
        assert!(results[0].is_ok());
        let err = results[1].as_ref().unwrap_err().to_string();
        assert!(err.starts_with("invalid observation on trace line 3"), "{err}");
    }

    #[test]
    fn test_open_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(TRACE.as_bytes()).unwrap();
        let mut source = TraceLandmarkSource::open(file.path()).unwrap();
        assert_eq!(source.observations().count(), 3);
    }

    #[test]
    fn test_open_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = TraceLandmarkSource::open(&dir.path().join("missing.jsonl"))
            .err()
            .unwrap();
        assert!(matches!(err, TraceError::Open { .. }));
    }
}
