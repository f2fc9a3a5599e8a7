//! Check command: audit an exported mission file.

use std::path::Path;

use crate::export;

use super::format::describe_export;

pub(super) fn cmd_check(path: &Path) -> Result<(), String> {
    let document =
        export::load(path).map_err(|e| format!("failed to load {}: {e}", path.display()))?;

    let findings = export::inspect(&document);
    if findings.is_empty() {
        println!("{}: ok ({})", path.display(), describe_export(&document));
        return Ok(());
    }

    for finding in &findings {
        eprintln!("{}: {finding}", path.display());
    }
    Err(format!(
        "{} finding(s) in {}",
        findings.len(),
        path.display()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use tempfile::TempDir;

    use crate::geometry::LatLng;
    use crate::model::{Event, NodeKind, NodeRequest};
    use crate::session::Session;

    fn saved_mission(dir: &TempDir) -> std::path::PathBuf {
        let mut session = Session::default();
        session.handle(&Event::ToggleMission).unwrap();
        session
            .handle(&Event::DoubleClick {
                at: LatLng::new(1.0, 1.0),
            })
            .unwrap();
        session
            .handle(&Event::Submit(NodeRequest {
                kind: Some(NodeKind::Home),
                id: "HOME".into(),
                name: "Base".into(),
                task: "park".into(),
                ..NodeRequest::default()
            }))
            .unwrap();
        export::save(&session.export().unwrap(), dir.path()).unwrap()
    }

    #[test]
    fn clean_export_passes() {
        let dir = TempDir::new().unwrap();
        let path = saved_mission(&dir);
        cmd_check(&path).unwrap();
    }

    #[test]
    fn edited_export_fails() {
        let dir = TempDir::new().unwrap();
        let path = saved_mission(&dir);
        let text = fs::read_to_string(&path).unwrap().replace("\"HOME\"", "\"HO ME\"");
        fs::write(&path, text).unwrap();

        let err = cmd_check(&path).unwrap_err();
        assert!(err.starts_with("1 finding(s)"), "{err}");
    }

    #[test]
    fn unreadable_file_fails() {
        let dir = TempDir::new().unwrap();
        let err = cmd_check(&dir.path().join("missing.json")).unwrap_err();
        assert!(err.starts_with("failed to load"), "{err}");
    }
}
