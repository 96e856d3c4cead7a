use crate::commands::{CmdMessage, CmdResult, DeckzPaths};
use crate::config::DeckzConfig;
use crate::error::Result;
use crate::model::Scope;
use std::fs;

pub fn run(paths: &DeckzPaths, scope: Scope) -> Result<CmdResult> {
    let dir = paths.scope_dir(scope)?;
    fs::create_dir_all(&dir)?;

    // Keep an existing config, write defaults otherwise.
    let config = DeckzConfig::load(&dir)?;
    config.save(&dir)?;

    let mut result = CmdResult::default().with_config(config);
    result.add_message(CmdMessage::success(format!(
        "Initialized deckz store at {}",
        dir.display()
    )));
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn creates_directory_and_config() {
        let dir = tempdir().unwrap();
        let paths = DeckzPaths {
            project: Some(dir.path().join(".deckz")),
            global: dir.path().join("global"),
        };

        let result = run(&paths, Scope::Project).unwrap();
        assert!(dir.path().join(".deckz").join("config.json").exists());
        assert_eq!(result.config, Some(DeckzConfig::default()));
    }

    #[test]
    fn keeps_existing_config() {
        let dir = tempdir().unwrap();
        let paths = DeckzPaths {
            project: None,
            global: dir.path().to_path_buf(),
        };
        let mut config = DeckzConfig::default();
        config.set("repair_titles", "false").unwrap();
        config.save(dir.path()).unwrap();

        run(&paths, Scope::Global).unwrap();
        assert!(!DeckzConfig::load(dir.path()).unwrap().repair_titles);
        assert!(run(&paths, Scope::Project).is_err());
    }
}
