//! End-to-end tests for the gitstate binary against throwaway repositories.
//!
//! Every test returns early when `git` is not installed.

mod common;

use common::{TestRepo, git_available, stderr, stdout};

macro_rules! require_git {
    () => {
        if !git_available() {
            eprintln!("git not found on PATH; skipping");
            return;
        }
    };
}

// ---------------------------------------------------------------------------
// state / render
// ---------------------------------------------------------------------------

#[test]
fn state_groups_changes_by_section() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-1.txt", "one, edited\n");
    repo.write("file-2.txt", "two, edited\n");
    repo.git(&["add", "file-2.txt"]);
    repo.write("new.txt", "new\n");

    let output = repo.gitstate(&["state"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Branch: dev\n\
         \n\
         Unstaged:\n \
         M file-1.txt    modified file\n\
         ?? new.txt       untracked file\n\
         \n\
         Staged:\n\
         M  file-2.txt    modified file\n"
    );
}

#[test]
fn state_without_branch_heading() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-1.txt", "edited\n");

    let output = repo.gitstate(&["state", "--no-branch"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\nUnstaged:\n M file-1.txt    modified file\n"
    );
}

#[test]
fn clean_tree_shows_only_the_branch() {
    require_git!();
    let repo = TestRepo::with_initial_commit();

    let output = repo.gitstate(&["state"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "Branch: dev\n");
}

#[test]
fn partially_staged_file_shows_in_both_sections() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-1.txt", "staged edit\n");
    repo.git(&["add", "file-1.txt"]);
    repo.write("file-1.txt", "staged edit\nplus more\n");

    let output = repo.gitstate(&["state", "--no-branch"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\nUnstaged:\n M file-1.txt    modified file\n\
         \nStaged:\nM  file-1.txt    modified file\n"
    );
}

#[test]
fn margin_comes_from_the_environment() {
    require_git!();
    let repo = TestRepo::new();

    let output = repo.gitstate_with_env(
        &["render"],
        Some(" M a.txt\n?? b\n"),
        &[("GITSTATE_MARGIN", "1")],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "\nUnstaged:\n M a.txt modified file\n?? b     untracked file\n"
    );
}

#[test]
fn project_config_follows_the_dash_c_directory() {
    require_git!();
    let repo = TestRepo::new();
    repo.write(".gitstate.toml", "[state]\nmargin = 1\n");
    let root = repo.root().to_string_lossy().into_owned();

    let output = repo.gitstate_in(
        repo.outside(),
        &["-C", &root, "render"],
        Some(" M a.txt\n"),
        &[],
    );
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "\nUnstaged:\n M a.txt modified file\n");
}

#[test]
fn render_reads_status_from_stdin() {
    require_git!();
    let repo = TestRepo::new();

    let output = repo.gitstate_with_stdin(&["render"], Some("## main\n M a.txt\nUU b.txt\n"));
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Branch: main\n\
         \n\
         Conflicts:\n\
         UU b.txt    both modified\n\
         \n\
         Unstaged:\n \
         M a.txt    modified file\n"
    );
}

#[test]
fn render_of_empty_input_prints_nothing() {
    require_git!();
    let repo = TestRepo::new();

    let output = repo.gitstate_with_stdin(&["render"], Some(""));
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "");
}

#[test]
fn state_outside_a_repository_fails() {
    require_git!();
    let repo = TestRepo::new();
    let outside = repo.outside().to_string_lossy().into_owned();

    let output = repo.gitstate(&["-C", &outside, "state"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("git status"), "{}", stderr(&output));
}

// ---------------------------------------------------------------------------
// pluck
// ---------------------------------------------------------------------------

#[test]
fn pluck_without_stashes_prints_usage() {
    require_git!();
    let repo = TestRepo::with_initial_commit();

    let output = repo.gitstate(&["pluck"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "Usage: gitstate pluck <index>\n");
}

fn repo_with_two_stashes() -> TestRepo {
    let repo = TestRepo::with_initial_commit();
    repo.write("file-1.txt", "first stash\n");
    repo.stash("First Stash");
    repo.write("file-2.txt", "second stash\n");
    repo.stash("Second Stash");
    repo
}

#[test]
fn pluck_without_index_lists_stashes() {
    require_git!();
    let repo = repo_with_two_stashes();

    let output = repo.gitstate(&["pluck"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Available stashes:\n\
         stash@{0}: On dev: Second Stash\n\
         stash@{1}: On dev: First Stash\n\
         \n\
         Usage: gitstate pluck <index>\n"
    );
}

#[test]
fn pluck_pops_the_chosen_stash() {
    require_git!();
    let repo = repo_with_two_stashes();

    let output = repo.gitstate(&["pluck", "1"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "Plucking: stash@{1}: On dev: First Stash\n\
         \n\
         Remaining stashes:\n\
         stash@{0}: On dev: Second Stash\n"
    );
    assert_eq!(repo.read("file-1.txt"), "first stash\n");
    assert_eq!(repo.read("file-2.txt"), "two\n");
}

#[test]
fn pluck_reports_a_blocked_pop() {
    require_git!();
    let repo = repo_with_two_stashes();
    repo.write("file-1.txt", "local edit\n");

    let output = repo.gitstate(&["pluck", "1"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Plucking: stash@{1}: On dev: First Stash\n"));
    assert!(out.contains("file-1.txt"), "{out}");
    assert!(out.contains("stash@{0}: On dev: Second Stash"));
    assert!(out.contains("stash@{1}: On dev: First Stash\n"));
    assert_eq!(repo.read("file-1.txt"), "local edit\n");
}

#[test]
fn pluck_unknown_index_fails() {
    require_git!();
    let repo = repo_with_two_stashes();

    let output = repo.gitstate(&["pluck", "5"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("no stash at index 5"));
}

// ---------------------------------------------------------------------------
// hide / hidden / unhide
// ---------------------------------------------------------------------------

#[test]
fn hide_and_unhide_round_trip_unstaged_changes() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-1.txt", "work in progress\n");

    let hidden = repo.gitstate(&["hide"]);
    assert!(hidden.status.success(), "{}", stderr(&hidden));
    assert_eq!(stdout(&hidden), "  Hidden: file-1.txt\n");
    assert_eq!(repo.read("file-1.txt"), "one\n");

    let listed = repo.gitstate(&["hidden"]);
    assert_eq!(stdout(&listed), "  Hidden: file-1.txt\n");

    let restored = repo.gitstate(&["unhide"]);
    assert!(restored.status.success(), "{}", stderr(&restored));
    assert_eq!(stdout(&restored), "  Unhidden: file-1.txt\n");
    assert_eq!(repo.read("file-1.txt"), "work in progress\n");

    let after = repo.gitstate(&["hidden"]);
    assert_eq!(stdout(&after), "");
}

#[test]
fn hiding_twice_folds_into_one_stash() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-1.txt", "first\n");
    assert!(repo.gitstate(&["hide"]).status.success());

    repo.write("file-2.txt", "second\n");
    let output = repo.gitstate(&["hide"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(
        stdout(&output),
        "  Hidden: file-1.txt\n  Hidden: file-2.txt\n"
    );
    assert_eq!(repo.git(&["stash", "list"]).lines().count(), 1);
}

#[test]
fn hide_warns_when_earlier_hidden_changes_cannot_be_merged() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-1.txt", "first\n");
    assert!(repo.gitstate(&["hide"]).status.success());

    // Touches the same file as the hidden stash, so popping it is refused.
    repo.write("file-1.txt", "second\n");
    let output = repo.gitstate(&["hide"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert!(
        stderr(&output).contains("could not fold in earlier hidden changes"),
        "{}",
        stderr(&output)
    );
    assert_eq!(stdout(&output), "  Hidden: file-1.txt\n");
    assert_eq!(repo.git(&["stash", "list"]).lines().count(), 2);
    assert_eq!(repo.read("file-1.txt"), "one\n");
}

#[test]
fn unhide_with_nothing_hidden_is_quiet() {
    require_git!();
    let repo = TestRepo::with_initial_commit();

    let output = repo.gitstate(&["unhide"]);
    assert!(output.status.success(), "{}", stderr(&output));
    assert_eq!(stdout(&output), "");
}

// ---------------------------------------------------------------------------
// last / uncommit
// ---------------------------------------------------------------------------

#[test]
fn last_truncates_to_width() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-3.txt", "three\n");
    repo.git(&["add", "file-3.txt"]);
    repo.commit("A very long commit subject that will not fit in forty columns");

    let output = repo.gitstate(&["last", "--width", "40"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].chars().count(), 40);
    assert!(lines[0].ends_with("..."));
    assert!(lines[1].ends_with(" Initial commit"));
}

#[test]
fn last_honours_count() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-3.txt", "three\n");
    repo.git(&["add", "file-3.txt"]);
    repo.commit("Add file three");

    let output = repo.gitstate(&["last", "-n", "1", "--width", "80"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert_eq!(out.lines().count(), 1);
    assert!(out.trim_end().ends_with(" Add file three"));
}

#[test]
fn uncommit_keeps_changes_staged() {
    require_git!();
    let repo = TestRepo::with_initial_commit();
    repo.write("file-3.txt", "three\n");
    repo.git(&["add", "file-3.txt"]);
    repo.commit("Add file three");

    let output = repo.gitstate(&["uncommit"]);
    assert!(output.status.success(), "{}", stderr(&output));
    let out = stdout(&output);
    assert!(out.starts_with("Uncommitted: "));
    assert!(out.trim_end().ends_with(" Add file three"));

    assert_eq!(repo.git(&["log", "--format=%s"]), "Initial commit\n");
    assert_eq!(repo.git(&["status", "--short"]), "A  file-3.txt\n");
}

#[test]
fn uncommit_of_root_commit_fails() {
    require_git!();
    let repo = TestRepo::with_initial_commit();

    let output = repo.gitstate(&["uncommit"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("cannot uncommit the root commit"));
    assert_eq!(repo.git(&["log", "--format=%s"]), "Initial commit\n");
}

// ---------------------------------------------------------------------------
// feature
// ---------------------------------------------------------------------------

#[test]
fn feature_switches_to_a_suffixed_branch() {
    require_git!();
    let repo = TestRepo::with_initial_commit();

    let output = repo.gitstate(&["feature"]);
    assert!(output.status.success(), "{}", stderr(&output));

    let branch = repo.git(&["rev-parse", "--abbrev-ref", "HEAD"]);
    let suffix = branch
        .trim_end()
        .strip_prefix("feature-dev-")
        .expect("branch named after dev");
    assert_eq!(suffix.len(), 8);
    assert!(suffix.chars().all(|c| c.is_ascii_hexdigit()));
}
