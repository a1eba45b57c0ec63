//! Shared testing utilities for copyforge CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");

        Self { root, work_dir }
    }

    /// Absolute path to the emulated `$HOME` directory.
    pub fn home(&self) -> &Path {
        self.root.path()
    }

    /// Path to the project directory used for CLI invocations.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `copyforge` binary within the work directory.
    ///
    /// The API key and log filter are cleared so the host environment cannot leak in.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("copyforge").expect("Failed to locate copyforge binary");
        cmd.current_dir(self.work_dir())
            .env("HOME", self.home())
            .env_remove("GEMINI_API_KEY")
            .env_remove("COPYFORGE_LOG");
        cmd
    }

    /// Path to the `.copyforge` directory in the work directory.
    pub fn copyforge_path(&self) -> PathBuf {
        self.work_dir.join(".copyforge")
    }

    /// Path to the persisted trial state.
    pub fn state_path(&self) -> PathBuf {
        self.copyforge_path().join("state.toml")
    }

    /// Write `.copyforge/config.toml`.
    pub fn write_config(&self, content: &str) {
        fs::create_dir_all(self.copyforge_path()).expect("Failed to create .copyforge");
        fs::write(self.copyforge_path().join("config.toml"), content)
            .expect("Failed to write config");
    }

    /// Point the backend at a local mock server.
    pub fn write_backend_config(&self, server_url: &str) {
        self.write_config(&format!(
            "[backend]\napi_url = \"{}/v1beta/\"\nmodel = \"test-model\"\ntimeout_secs = 5\n",
            server_url
        ));
    }

    /// Assert whether the free trial has been recorded as used.
    pub fn assert_trial_consumed(&self, consumed: bool) {
        let content = fs::read_to_string(self.state_path()).unwrap_or_default();
        assert_eq!(
            content.contains("consumed_at"),
            consumed,
            "unexpected trial state: {:?}",
            content
        );
    }
}

/// Gemini-style reply wrapping `text` as the only candidate.
#[allow(dead_code)]
pub fn candidate_body(text: &str) -> String {
    serde_json::json!({"candidates": [{"content": {"parts": [{"text": text}]}}]}).to_string()
}

/// `-i name=value` arguments for the comment-exploder feature.
#[allow(dead_code)]
pub fn comment_exploder_args() -> Vec<&'static str> {
    vec![
        "run",
        "comment-exploder",
        "-i",
        "comment=How do you stay consistent?",
        "-i",
        "topic=fitness coaching",
        "-i",
        "platform=youtube",
    ]
}
