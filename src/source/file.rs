//! Fleet fixture file source.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::{DataSource, FleetSnapshot};

/// What the fixture looked like at the last poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stamp {
    Missing,
    Modified(SystemTime),
}

impl Stamp {
    fn of(path: &Path) -> Self {
        match fs::metadata(path).and_then(|m| m.modified()) {
            Ok(time) => Stamp::Modified(time),
            Err(_) => Stamp::Missing,
        }
    }
}

/// Watches a JSON fleet fixture and yields a snapshot each time it changes.
///
/// The file is only read when its modification time differs from the last
/// poll, so a broken or missing fixture is reported once rather than on
/// every refresh. A failed read keeps the previously loaded fleet on screen.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
    last_error: Option<String>,
    last_stamp: Option<Stamp>,
}

impl FileSource {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        Self {
            description: format!("file: {}", path.display()),
            path,
            last_error: None,
            last_stamp: None,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileSource {
    fn poll(&mut self) -> Option<FleetSnapshot> {
        let stamp = Stamp::of(&self.path);
        if self.last_stamp == Some(stamp) {
            return None;
        }
        self.last_stamp = Some(stamp);

        match FleetSnapshot::load(&self.path) {
            Ok(snapshot) => {
                tracing::debug!(path = %self.path.display(), buoys = snapshot.buoys.len(), "loaded fleet file");
                self.description =
                    format!("file: {} ({} buoys)", self.path.display(), snapshot.buoys.len());
                self.last_error = None;
                Some(snapshot)
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "fleet file unusable");
                self.last_error = Some(e.to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const ONE_BUOY: &str = r#"{
        "buoys": [
            {
                "id": "BOY-010",
                "name": "Test Buoy",
                "location": { "lat": 1.5, "lng": -2.5 },
                "status": "online",
                "battery": 61,
                "signal": 30,
                "last_update": "just now",
                "sensors": { "temperature": 20.0, "humidity": 50, "wave_height": 1.0, "wind_speed": 5.0 }
            }
        ]
    }"#;

    /// Write `content` and pin the file's mtime so change detection does not
    /// depend on filesystem timestamp resolution.
    fn write_at(path: &Path, content: &str, secs: u64) {
        fs::write(path, content).unwrap();
        let file = fs::File::options().write(true).open(path).unwrap();
        file.set_modified(SystemTime::UNIX_EPOCH + Duration::from_secs(secs)).unwrap();
    }

    #[test]
    fn test_description_tracks_loaded_fleet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.json");
        let mut source = FileSource::new(&path);
        assert_eq!(source.path(), path.as_path());
        assert_eq!(source.description(), format!("file: {}", path.display()));

        write_at(&path, ONE_BUOY, 1_000);
        let snapshot = source.poll().unwrap();
        assert_eq!(snapshot.buoys[0].id, "BOY-010");
        assert_eq!(source.description(), format!("file: {} (1 buoys)", path.display()));
    }

    #[test]
    fn test_reloads_only_when_mtime_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.json");
        write_at(&path, ONE_BUOY, 1_000);

        let mut source = FileSource::new(&path);
        assert_eq!(source.poll().unwrap().buoys.len(), 1);
        assert!(source.poll().is_none());

        write_at(&path, r#"{ "buoys": [] }"#, 2_000);
        assert!(source.poll().unwrap().buoys.is_empty());
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_missing_file_reported_once_then_recovers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.json");
        let mut source = FileSource::new(&path);

        assert!(source.poll().is_none());
        assert!(source.error().unwrap().starts_with("Read error:"));
        // Still missing: nothing re-read, error kept
        assert!(source.poll().is_none());
        assert!(source.error().unwrap().starts_with("Read error:"));

        write_at(&path, ONE_BUOY, 1_000);
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }

    #[test]
    fn test_invalid_json_keeps_error_until_fixed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fleet.json");
        write_at(&path, "{\n  \"buoys\": [ nope ]\n}", 1_000);

        let mut source = FileSource::new(&path);
        assert!(source.poll().is_none());
        let error = source.error().unwrap().to_string();
        assert!(error.starts_with("Parse error:"));
        assert!(error.contains("line 2"));

        write_at(&path, ONE_BUOY, 2_000);
        assert!(source.poll().is_some());
        assert!(source.error().is_none());
    }
}
