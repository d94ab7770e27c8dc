use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run medidesk commands in an isolated temp directory
pub struct MedideskTest {
    pub temp_dir: TempDir,
    binary_path: PathBuf,
}

impl MedideskTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        MedideskTest {
            temp_dir,
            binary_path: PathBuf::from(env!("CARGO_BIN_EXE_medidesk")),
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            // Host configuration must not leak into the tests
            .env_remove("MEDIDESK_API_URL")
            .env_remove("MEDIDESK_API_TOKEN")
            .output()
            .expect("Failed to execute medidesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    #[allow(dead_code)]
    pub fn config_exists(&self) -> bool {
        self.temp_dir
            .path()
            .join(".medidesk")
            .join("config.yaml")
            .exists()
    }

    #[allow(dead_code)]
    pub fn write_snapshot(&self, file_name: &str, content: &str) {
        let dir = self.temp_dir.path().join(".medidesk").join("cache");
        fs::create_dir_all(&dir).expect("Failed to create cache dir");
        fs::write(dir.join(file_name), content).expect("Failed to write snapshot");
    }
}
