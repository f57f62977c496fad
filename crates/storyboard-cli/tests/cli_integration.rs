use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tempfile::{tempdir, TempDir};

/// A board file in a scratch directory, with user config and remote
/// credentials kept out of the way.
struct Board {
    dir: TempDir,
}

impl Board {
    fn new() -> Self {
        Self {
            dir: tempdir().unwrap(),
        }
    }

    fn file(&self) -> std::path::PathBuf {
        self.dir.path().join("board.json")
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("storyboard").unwrap();
        cmd.env("XDG_CONFIG_HOME", self.dir.path().join("config"))
            .env("XDG_DATA_HOME", self.dir.path().join("data"))
            .env_remove("STORYBOARD_FILE")
            .env_remove("STORYBOARD_REMOTE_URL")
            .env_remove("STORYBOARD_REMOTE_KEY")
            .env_remove("STORYBOARD_DEBUG_LOG")
            .env_remove("RUST_LOG")
            .arg("--file")
            .arg(self.file());
        cmd
    }

    fn run(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        parse_json_output(&String::from_utf8_lossy(&output))
    }

    fn fail(&self, args: &[&str]) -> Value {
        let output = self
            .cmd()
            .args(args)
            .assert()
            .failure()
            .get_output()
            .stderr
            .clone();
        last_json_line(&String::from_utf8_lossy(&output))
    }

    fn add(&self, args: &[&str]) -> String {
        let mut full = vec!["card", "add"];
        full.extend_from_slice(args);
        let json = self.run(&full);
        extract_id(&json)
    }
}

fn parse_json_output(output: &str) -> Value {
    serde_json::from_str(output.trim()).expect("Failed to parse JSON output")
}

/// Warnings may precede the error envelope on stderr.
fn last_json_line(output: &str) -> Value {
    let line = output
        .lines()
        .rev()
        .find(|l| l.trim_start().starts_with('{'))
        .expect("No JSON on stderr");
    parse_json_output(line)
}

fn extract_id(json: &Value) -> String {
    json["data"]["id"].as_str().unwrap().to_string()
}

fn column<'a>(board: &'a Value, id: &str) -> &'a Value {
    board["data"]["columns"]
        .as_array()
        .unwrap()
        .iter()
        .find(|c| c["column"]["id"] == id)
        .unwrap()
}

fn titles(column: &Value) -> Vec<String> {
    column["cards"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect()
}

mod board_tests {
    use super::*;

    #[test]
    fn test_fresh_board_is_seeded_and_saved() {
        let board = Board::new();
        assert!(!board.file().exists());

        let json = board.run(&["board", "show"]);
        assert!(json["success"].as_bool().unwrap());
        assert_eq!(json["data"]["columns"].as_array().unwrap().len(), 6);
        assert_eq!(json["data"]["active"], 4);
        assert_eq!(column(&json, "ideation")["count"], 2);
        assert_eq!(column(&json, "posted")["count"], 0);

        assert!(board.file().exists());
        let stored: Value = serde_json::from_str(&fs::read_to_string(board.file()).unwrap()).unwrap();
        assert_eq!(stored.as_array().unwrap().len(), 4);
    }

    #[test]
    fn test_seed_ids_are_stable_across_runs() {
        let board = Board::new();
        let first = board.run(&["card", "list"]);
        let second = board.run(&["card", "list"]);
        assert_eq!(first["data"]["items"], second["data"]["items"]);
    }

    #[test]
    fn test_corrupt_file_is_reseeded() {
        let board = Board::new();
        fs::write(board.file(), "{ definitely not a board").unwrap();

        let json = board.run(&["card", "list"]);
        assert_eq!(json["data"]["count"], 4);
    }

    #[test]
    fn test_empty_board_stays_empty() {
        let board = Board::new();
        fs::write(board.file(), "[]").unwrap();

        let json = board.run(&["board", "show"]);
        assert_eq!(json["data"]["active"], 0);
        assert_eq!(fs::read_to_string(board.file()).unwrap().trim(), "[]");
    }

    #[test]
    fn test_show_sorted_by_priority() {
        let board = Board::new();
        board.add(&["--title", "Quick poll", "--priority", "low"]);

        let by_position = board.run(&["board", "show"]);
        assert_eq!(
            titles(column(&by_position, "ideation")),
            vec!["Quick poll", "Behind the Scenes #4", "3 Editing Mistakes to Avoid"]
        );

        let by_priority = board.run(&["board", "show", "--sort", "priority"]);
        assert_eq!(
            titles(column(&by_priority, "ideation")),
            vec!["Behind the Scenes #4", "3 Editing Mistakes to Avoid", "Quick poll"]
        );
    }

    #[test]
    fn test_show_rejects_unknown_sort() {
        let board = Board::new();
        let json = board.fail(&["board", "show", "--sort", "alphabetical"]);
        assert!(!json["success"].as_bool().unwrap());
        assert!(json["error"].as_str().unwrap().contains("Invalid sort"));
    }
}

mod column_tests {
    use super::*;

    #[test]
    fn test_column_list_is_fixed() {
        let board = Board::new();
        let json = board.run(&["column", "list"]);
        assert_eq!(json["data"]["count"], 6);
        let ids: Vec<_> = json["data"]["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|c| c["id"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(
            ids,
            vec!["ideation", "needs_editing", "ready_review", "approved", "scheduled", "posted"]
        );
        assert!(!board.file().exists());
    }
}

mod card_tests {
    use super::*;

    #[test]
    fn test_card_add_and_get() {
        let board = Board::new();
        let id = board.add(&[
            "--title",
            "Product teaser",
            "--status",
            "ready-review",
            "--priority",
            "high",
            "--owner",
            "editor",
            "--platform",
            "tiktok",
            "--due",
            "2025-03-01",
            "--tag",
            "launch",
            "--link",
            "https://www.canva.com/design/ABC123/edit",
        ]);

        let json = board.run(&["card", "get", "--id", &id]);
        assert_eq!(json["data"]["title"], "Product teaser");
        assert_eq!(json["data"]["status"], "ready_review");
        assert_eq!(json["data"]["priority"], "High");
        assert_eq!(json["data"]["owner"], "Editor");
        assert_eq!(json["data"]["platform"], "TikTok");
        assert_eq!(json["data"]["tags"][0], "launch");
        assert_eq!(
            json["data"]["design_url"],
            "https://www.canva.com/design/ABC123/edit"
        );
    }

    #[test]
    fn test_card_add_defaults_to_ideation_front() {
        let board = Board::new();
        let id = board.add(&["--title", "Newest"]);

        let json = board.run(&["card", "list", "--status", "ideation"]);
        assert_eq!(json["data"]["count"], 3);
        assert_eq!(json["data"]["items"][0]["id"], id.as_str());
        assert_eq!(json["data"]["items"][0]["priority"], "Medium");
    }

    #[test]
    fn test_card_add_blank_title_fails() {
        let board = Board::new();
        let json = board.fail(&["card", "add", "--title", "   "]);
        assert!(!json["success"].as_bool().unwrap());
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("title must not be empty"));
    }

    #[test]
    fn test_card_get_missing() {
        let board = Board::new();
        board
            .cmd()
            .args(["card", "get", "--id", "00000000-0000-0000-0000-000000000000"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Not found"));
    }

    #[test]
    fn test_card_update_sets_and_clears() {
        let board = Board::new();
        let id = board.add(&["--title", "Draft", "--notes", "first pass", "--slides", "6"]);

        let json = board.run(&[
            "card",
            "update",
            "--id",
            &id,
            "--title",
            "Final",
            "--clear-notes",
            "--approved-by",
            "Sam",
        ]);
        assert_eq!(json["data"]["title"], "Final");
        assert!(json["data"]["notes"].is_null());
        assert_eq!(json["data"]["slides"], "6");
        assert_eq!(json["data"]["approved_by"], "Sam");
    }

    #[test]
    fn test_card_update_bumps_updated_at() {
        let board = Board::new();
        let id = board.add(&["--title", "Draft"]);
        let before = board.run(&["card", "get", "--id", &id]);

        let after = board.run(&["card", "update", "--id", &id, "--priority", "low"]);
        assert_eq!(after["data"]["created_at"], before["data"]["created_at"]);
        assert_ne!(after["data"]["updated_at"], before["data"]["updated_at"]);
    }

    #[test]
    fn test_card_update_invalid_link_fails() {
        let board = Board::new();
        let id = board.add(&["--title", "Draft"]);
        let json = board.fail(&["card", "update", "--id", &id, "--link", "not a url"]);
        assert!(json["error"].as_str().unwrap().contains("design link"));

        let unchanged = board.run(&["card", "get", "--id", &id]);
        assert!(unchanged["data"]["design_url"].is_null());
    }

    #[test]
    fn test_card_move() {
        let board = Board::new();
        let id = board.add(&["--title", "Mover"]);

        let json = board.run(&["card", "move", "--id", &id, "--status", "posted"]);
        assert_eq!(json["data"]["status"], "posted");

        let shown = board.run(&["board", "show"]);
        assert_eq!(titles(column(&shown, "posted")), vec!["Mover"]);
        assert_eq!(shown["data"]["active"], 4);
    }

    #[test]
    fn test_card_move_invalid_status() {
        let board = Board::new();
        let id = board.add(&["--title", "Mover"]);
        board
            .cmd()
            .args(["card", "move", "--id", &id, "--status", "archived"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid status"));
    }

    #[test]
    fn test_card_reorder() {
        let board = Board::new();
        let first = board.add(&["--title", "First"]);
        let second = board.add(&["--title", "Second"]);

        // Collection order is now: Second, First, seeds...
        let json = board.run(&["card", "reorder", "--id", &first, "--before", &second]);
        assert_eq!(json["data"]["position"], 0);

        let list = board.run(&["card", "list"]);
        assert_eq!(list["data"]["items"][0]["title"], "First");
        assert_eq!(list["data"]["items"][1]["title"], "Second");
        assert_eq!(list["data"]["count"], 6);
    }

    #[test]
    fn test_card_delete_with_yes() {
        let board = Board::new();
        let id = board.add(&["--title", "Doomed"]);

        let json = board.run(&["card", "delete", "--id", &id, "--yes"]);
        assert_eq!(json["data"]["deleted"], true);

        board
            .cmd()
            .args(["card", "get", "--id", &id])
            .assert()
            .failure();
    }

    #[test]
    fn test_card_delete_declined() {
        let board = Board::new();
        let id = board.add(&["--title", "Survivor"]);

        let output = board
            .cmd()
            .args(["card", "delete", "--id", &id])
            .write_stdin("n\n")
            .assert()
            .success()
            .get_output()
            .stdout
            .clone();
        let json = parse_json_output(&String::from_utf8_lossy(&output));
        assert_eq!(json["data"]["deleted"], false);

        board.run(&["card", "get", "--id", &id]);
    }

    #[test]
    fn test_card_delete_confirmed_on_stdin() {
        let board = Board::new();
        let id = board.add(&["--title", "Doomed"]);

        board
            .cmd()
            .args(["card", "delete", "--id", &id])
            .write_stdin("y\n")
            .assert()
            .success()
            .stdout(predicate::str::contains("\"deleted\":true"));
    }

    #[test]
    fn test_card_list_filters() {
        let board = Board::new();
        board.add(&["--title", "Tagged", "--tag", "collab", "--owner", "editor"]);

        let json = board.run(&["card", "list", "--tag", "collab"]);
        assert_eq!(json["data"]["count"], 1);

        let json = board.run(&["card", "list", "--owner", "editor"]);
        assert_eq!(json["data"]["count"], 1);

        let json = board.run(&["card", "list", "--priority", "high"]);
        assert_eq!(json["data"]["count"], 2);
    }

    #[test]
    fn test_card_list_sorted_by_due() {
        let board = Board::new();
        fs::write(board.file(), "[]").unwrap();
        board.add(&["--title", "Someday", "--due", "Next week"]);
        board.add(&["--title", "March", "--due", "2026-03-01"]);
        board.add(&["--title", "February", "--due", "2026-02-06"]);

        let titles = |json: &Value| -> Vec<String> {
            json["data"]["items"]
                .as_array()
                .unwrap()
                .iter()
                .map(|c| c["title"].as_str().unwrap().to_string())
                .collect()
        };

        let json = board.run(&["card", "list", "--sort", "due"]);
        assert_eq!(titles(&json), vec!["February", "March", "Someday"]);

        let json = board.run(&["card", "list", "--sort", "due", "--desc"]);
        assert_eq!(titles(&json), vec!["Someday", "March", "February"]);
    }

    #[test]
    fn test_file_from_env() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("env-board.json");

        Command::cargo_bin("storyboard")
            .unwrap()
            .env("STORYBOARD_FILE", &file)
            .env("XDG_CONFIG_HOME", dir.path())
            .env_remove("STORYBOARD_REMOTE_URL")
            .env_remove("STORYBOARD_REMOTE_KEY")
            .args(["card", "list"])
            .assert()
            .success();

        assert!(Path::new(&file).exists());
    }
}

mod link_tests {
    use super::*;

    #[test]
    fn test_normalize_edit_link() {
        let board = Board::new();
        let json = board.run(&[
            "link",
            "normalize",
            "https://www.canva.com/design/ABC123/edit",
        ]);
        assert_eq!(
            json["data"]["normalized"],
            "https://www.canva.com/design/ABC123/view?embed"
        );
    }

    #[test]
    fn test_normalize_share_token() {
        let board = Board::new();
        let json = board.run(&[
            "link",
            "normalize",
            "https://www.canva.com/design/ABC123/shareTok9/view",
        ]);
        assert_eq!(
            json["data"]["normalized"],
            "https://www.canva.com/design/ABC123/shareTok9/view?embed"
        );
    }

    #[test]
    fn test_normalize_iframe_snippet() {
        let board = Board::new();
        let json = board.run(&[
            "link",
            "normalize",
            r#"<iframe src="https://www.canva.com/design/XYZ/view?embed&amp;foo=1"></iframe>"#,
        ]);
        assert_eq!(
            json["data"]["extracted"],
            "https://www.canva.com/design/XYZ/view?embed&foo=1"
        );
        assert_eq!(
            json["data"]["normalized"],
            "https://www.canva.com/design/XYZ/view?embed"
        );
    }

    #[test]
    fn test_normalize_blank() {
        let board = Board::new();
        let json = board.run(&["link", "normalize", "   "]);
        assert_eq!(json["data"]["normalized"], "");
    }

    #[test]
    fn test_preview_input() {
        let board = Board::new();
        let json = board.run(&[
            "link",
            "preview",
            "https://www.canva.com/design/ABC123/edit",
        ]);
        assert_eq!(json["data"]["src"], "https://www.canva.com/design/ABC123/view?embed");
        assert_eq!(json["data"]["title"], "Design preview");
        let html = json["data"]["html"].as_str().unwrap();
        assert!(html.contains("referrerpolicy=\"no-referrer\""));
        assert!(!html.contains("allow-top-navigation"));
        assert!(!board.file().exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_preview_metadata_failure_is_not_an_error() {
        let board = Board::new();
        let config_dir = board.dir.path().join("config/storyboard");
        fs::create_dir_all(&config_dir).unwrap();
        fs::write(
            config_dir.join("config.toml"),
            "[metadata]\nendpoint = \"not a url\"\ntimeout_secs = 1\n",
        )
        .unwrap();

        let json = board.run(&[
            "link",
            "preview",
            "--metadata",
            "https://www.canva.com/design/ABC123/edit",
        ]);
        assert_eq!(json["success"], true);
        assert!(json["data"].get("metadata").is_none());
    }

    #[test]
    fn test_preview_card_link() {
        let board = Board::new();
        let id = board.add(&[
            "--title",
            "Linked",
            "--link",
            "https://www.canva.com/design/DEF456/view",
        ]);

        let json = board.run(&["link", "preview", "--id", &id]);
        assert_eq!(json["data"]["title"], "Linked");
        assert_eq!(json["data"]["src"], "https://www.canva.com/design/DEF456/view?embed");
    }

    #[test]
    fn test_preview_card_without_link_fails() {
        let board = Board::new();
        let id = board.add(&["--title", "Unlinked"]);
        let json = board.fail(&["link", "preview", "--id", &id]);
        assert!(json["error"].as_str().unwrap().contains("no design link"));
    }
}

mod sync_tests {
    use super::*;

    #[test]
    fn test_sync_without_remote_fails() {
        let board = Board::new();
        let json = board.fail(&["sync", "pull"]);
        assert!(json["error"]
            .as_str()
            .unwrap()
            .contains("No remote store configured"));

        board.fail(&["sync", "push"]);
    }
}

mod completions_tests {
    use super::*;

    #[test]
    fn test_bash_completions() {
        Command::cargo_bin("storyboard")
            .unwrap()
            .args(["completions", "bash"])
            .assert()
            .success()
            .stdout(predicate::str::contains("storyboard"));
    }
}
