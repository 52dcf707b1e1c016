//! JSON export of the processed fleet.

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use serde_json::{json, Value};

use crate::data::{FleetData, History};

/// Build the export document: fleet summary, every buoy with its derived
/// tiers, and every chart with its trend.
pub fn export_document(data: &FleetData, history: Option<&History>) -> Value {
    let counts = data.status_counts();

    let buoys: Vec<Value> = data
        .devices
        .iter()
        .map(|d| {
            let mut entry = json!({
                "id": d.record.id,
                "name": d.record.name,
                "location": d.record.location,
                "status": d.record.status,
                "label": d.display.label,
                "badge": d.display.badge,
                "indicator": d.display.indicator,
                "battery": d.record.battery,
                "battery_tier": d.battery_tier,
                "signal": d.record.signal,
                "signal_tier": d.signal_tier,
                "last_update": d.record.last_update,
                "sensors": d.record.sensors,
            });
            if let Some(history) = history {
                entry["battery_trend"] = json!(history.battery_trend(d.id()));
            }
            entry
        })
        .collect();

    let charts: Vec<Value> = data
        .charts
        .iter()
        .map(|c| {
            json!({
                "title": c.series.title,
                "unit": c.series.unit,
                "samples": c.series.samples.len(),
                "trend": c.trend,
            })
        })
        .collect();

    json!({
        "summary": {
            "total_buoys": data.devices.len(),
            "online": counts.online,
            "warning": counts.warning,
            "offline": counts.offline,
        },
        "buoys": buoys,
        "charts": charts,
        "alerts": data.alerts,
    })
}

/// Write the export document to `path` as pretty-printed JSON.
pub fn write_export(data: &FleetData, history: Option<&History>, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(&export_document(data, history))?;
    let mut file = std::fs::File::create(path)?;
    file.write_all(json.as_bytes())?;
    tracing::info!(path = %path.display(), buoys = data.devices.len(), "exported fleet state");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{mock, Thresholds};

    #[test]
    fn test_export_document() {
        let data = FleetData::from_snapshot(mock::fleet_snapshot(), &Thresholds::default());
        let doc = export_document(&data, None);

        assert_eq!(doc["summary"]["total_buoys"], 5);
        assert_eq!(doc["summary"]["online"], 3);
        assert_eq!(doc["summary"]["warning"], 1);
        assert_eq!(doc["summary"]["offline"], 1);

        let arctic = &doc["buoys"][2];
        assert_eq!(arctic["id"], "BOY-003");
        assert_eq!(arctic["status"], "offline");
        assert_eq!(arctic["badge"], "destructive");
        assert_eq!(arctic["battery_tier"], "red");
        assert!(arctic.get("battery_trend").is_none());

        let temperature = &doc["charts"][0];
        assert_eq!(temperature["trend"]["direction"], "up");
        assert_eq!(temperature["trend"]["percent"], 1.8);
    }

    #[test]
    fn test_write_export() {
        let data = FleetData::from_snapshot(mock::fleet_snapshot(), &Thresholds::default());
        let mut history = History::new();
        history.record(&data);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        write_export(&data, Some(&history), &path).unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["buoys"][0]["battery_trend"]["direction"], "stable");
    }
}
