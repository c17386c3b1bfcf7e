//! Shared fixtures for the CLI integration tests.
//!
//! Each [`TestRepo`] is a throwaway git repository on branch `dev` with a
//! pinned identity and clock, so commit output is stable across machines.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

/// Whether a usable `git` is on PATH. Tests skip themselves when it is not.
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// Pin identity, dates, and config sources on a git (or gitstate) command.
fn configure_env(cmd: &mut Command, home: &Path) {
    cmd.env("HOME", home)
        .env("GIT_CONFIG_NOSYSTEM", "1")
        .env("GIT_CONFIG_GLOBAL", home.join(".gitconfig"))
        .env("GIT_AUTHOR_NAME", "Test User")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "Test User")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .env("GIT_AUTHOR_DATE", "2025-01-01T00:00:00Z")
        .env("GIT_COMMITTER_DATE", "2025-01-01T00:00:00Z")
        .env("GIT_TERMINAL_PROMPT", "0")
        .env("GIT_CEILING_DIRECTORIES", home.parent().unwrap_or(home))
        .env("LC_ALL", "C");
    for (key, _) in std::env::vars() {
        if key.starts_with("GITSTATE_") {
            cmd.env_remove(key);
        }
    }
}

pub struct TestRepo {
    // Held for its Drop.
    _temp: TempDir,
    root: PathBuf,
    home: PathBuf,
}

impl TestRepo {
    /// An empty repository on branch `dev`.
    pub fn new() -> Self {
        let temp = tempfile::tempdir().expect("create temp dir");
        let root = temp.path().join("repo");
        let home = temp.path().join("home");
        fs::create_dir_all(&root).expect("create repo dir");
        fs::create_dir_all(&home).expect("create home dir");

        let repo = Self {
            _temp: temp,
            root,
            home,
        };
        repo.git(&["init", "--quiet"]);
        repo.git(&["symbolic-ref", "HEAD", "refs/heads/dev"]);
        repo
    }

    /// A repository with one commit holding `file-1.txt` and `file-2.txt`.
    pub fn with_initial_commit() -> Self {
        let repo = Self::new();
        repo.write("file-1.txt", "one\n");
        repo.write("file-2.txt", "two\n");
        repo.git(&["add", "."]);
        repo.commit("Initial commit");
        repo
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// A directory next to the repository that is not inside any repository.
    pub fn outside(&self) -> &Path {
        &self.home
    }

    pub fn write(&self, name: &str, contents: &str) {
        let path = self.root.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create parent dir");
        }
        fs::write(path, contents).expect("write file");
    }

    pub fn read(&self, name: &str) -> String {
        fs::read_to_string(self.root.join(name)).expect("read file")
    }

    /// Run git in the repository, panicking on failure. Returns stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.root);
        configure_env(&mut cmd, &self.home);
        let output = cmd.output().expect("spawn git");
        assert!(
            output.status.success(),
            "git {} failed:\n{}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).into_owned()
    }

    pub fn commit(&self, message: &str) {
        self.git(&["commit", "--quiet", "-m", message]);
    }

    pub fn stash(&self, message: &str) {
        self.git(&["stash", "push", "--quiet", "-m", message]);
    }

    /// Run the gitstate binary in the repository with colour off and the
    /// events log disabled.
    pub fn gitstate(&self, args: &[&str]) -> Output {
        self.gitstate_with_stdin(args, None)
    }

    pub fn gitstate_with_stdin(&self, args: &[&str], stdin: Option<&str>) -> Output {
        self.gitstate_with_env(args, stdin, &[])
    }

    pub fn gitstate_with_env(
        &self,
        args: &[&str],
        stdin: Option<&str>,
        env: &[(&str, &str)],
    ) -> Output {
        self.gitstate_in(&self.root, args, stdin, env)
    }

    /// Run the gitstate binary with `cwd` as its working directory.
    pub fn gitstate_in(
        &self,
        cwd: &Path,
        args: &[&str],
        stdin: Option<&str>,
        env: &[(&str, &str)],
    ) -> Output {
        use std::io::Write;
        use std::process::Stdio;

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_gitstate"));
        cmd.arg("--color")
            .arg("never")
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        configure_env(&mut cmd, &self.home);
        cmd.env("GITSTATE_LOGGING", "0");
        cmd.envs(env.iter().copied());

        let mut child = cmd.spawn().expect("spawn gitstate");
        {
            let mut pipe = child.stdin.take().expect("stdin piped");
            if let Some(input) = stdin {
                pipe.write_all(input.as_bytes()).expect("write stdin");
            }
        }
        child.wait_with_output().expect("wait for gitstate")
    }
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
