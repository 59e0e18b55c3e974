// Copyright 2026 Oxide Computer Company

//! End-to-end publish tests against a real git repository.

use anyhow::Result;
use camino::Utf8Path;
use camino_tempfile::Utf8TempDir;
use gh_pusher_publish::{
    DiskWorkspace, PublishOutcome, Publisher, SystemGit,
};
use std::{fs, process::Command};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Returns a `Command` for git, respecting the `$GIT` environment variable.
fn git_command() -> Command {
    let bin = std::env::var("GIT").unwrap_or_else(|_| "git".to_string());
    Command::new(bin)
}

/// Runs a git command in `repo_root` and asserts success.
fn git_ok(repo_root: &Utf8Path, args: &[&str]) -> Result<()> {
    let output =
        git_command().args(args).current_dir(repo_root).output()?;
    anyhow::ensure!(
        output.status.success(),
        "git {:?} failed ({}): {}",
        args,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim(),
    );
    Ok(())
}

/// Runs a git command in `repo_root` and returns trimmed stdout.
fn git_stdout(repo_root: &Utf8Path, args: &[&str]) -> Result<String> {
    let output =
        git_command().args(args).current_dir(repo_root).output()?;
    anyhow::ensure!(
        output.status.success(),
        "git {:?} failed ({}): {}",
        args,
        output.status,
        String::from_utf8_lossy(&output.stderr).trim(),
    );
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

// ---------------------------------------------------------------------------
// Repository setup helpers
// ---------------------------------------------------------------------------

/// A source repository on branch `main`, with a `gh-pages` branch and a
/// bare `origin` remote, ready for publishing.
struct PublishFixture {
    _temp: Utf8TempDir,
    repo_root: camino::Utf8PathBuf,
}

impl PublishFixture {
    fn new() -> Result<Self> {
        let temp = Utf8TempDir::with_prefix("gh-pusher-")?;
        let repo_root = temp.path().join("repo");
        let remote_root = temp.path().join("origin.git");
        fs::create_dir(&repo_root)?;
        fs::create_dir(&remote_root)?;

        git_ok(&remote_root, &["init", "--bare"])?;

        git_ok(&repo_root, &["init", "--initial-branch=main"])?;
        git_ok(
            &repo_root,
            &["config", "user.email", "committer@example.com"],
        )?;
        git_ok(&repo_root, &["config", "user.name", "Committer"])?;
        git_ok(
            &repo_root,
            &["remote", "add", "origin", remote_root.as_str()],
        )?;

        // Source history on main, authored by the person whose metadata
        // the publish commit must reuse.
        fs::write(repo_root.join("page.typ"), "= Hello")?;
        git_ok(&repo_root, &["add", "."])?;
        git_ok(
            &repo_root,
            &[
                "commit",
                "-m",
                "Update page: add greeting",
                "--author=Jane Doe <jane@example.com>",
            ],
        )?;
        git_ok(&repo_root, &["push", "origin", "main"])?;

        // An empty-ish publish branch that shares no content with main.
        git_ok(&repo_root, &["checkout", "--orphan", "gh-pages"])?;
        git_ok(&repo_root, &["rm", "-rf", "."])?;
        fs::write(repo_root.join(".nojekyll"), "")?;
        git_ok(&repo_root, &["add", "."])?;
        git_ok(&repo_root, &["commit", "-m", "Init pages"])?;
        git_ok(&repo_root, &["push", "origin", "gh-pages"])?;
        git_ok(&repo_root, &["checkout", "main"])?;

        Ok(PublishFixture { _temp: temp, repo_root })
    }

    /// Writes a fresh build tree under `build/` in the working tree.
    fn generate_build(&self, body: &str) -> Result<()> {
        let build = self.repo_root.join("build");
        fs::create_dir_all(build.join("assets"))?;
        fs::write(build.join("index.html"), body)?;
        fs::write(build.join("assets").join("site.css"), "body {}")?;
        Ok(())
    }

    fn publisher(&self) -> Result<Publisher<SystemGit, DiskWorkspace>> {
        let git = SystemGit::new(self.repo_root.clone())?;
        Ok(Publisher::new(
            git,
            DiskWorkspace::new(),
            self.repo_root.join("build"),
            self.repo_root.clone(),
            "gh-pages",
        ))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_publish_end_to_end() -> Result<()> {
    let fixture = PublishFixture::new()?;
    fixture.generate_build("<h1>Hello</h1>")?;

    let outcome = fixture.publisher()?.publish()?;
    assert_eq!(outcome, PublishOutcome::Pushed);

    let root = &fixture.repo_root;

    // Back on the original branch, with a clean tree: the build dir was
    // consumed by the sync.
    assert_eq!(
        git_stdout(root, &["rev-parse", "--abbrev-ref", "HEAD"])?,
        "main"
    );
    assert!(!root.join("build").exists(), "build dir should be gone");
    assert_eq!(
        git_stdout(root, &["status", "--porcelain"])?,
        "",
        "working tree should be clean after publishing"
    );

    // The publish branch holds the generated tree.
    let published = git_stdout(
        root,
        &["show", "gh-pages:index.html"],
    )?;
    assert_eq!(published, "<h1>Hello</h1>");
    let css = git_stdout(root, &["show", "gh-pages:assets/site.css"])?;
    assert_eq!(css, "body {}");

    // The commit reuses the source commit's authorship and message.
    let meta = git_stdout(
        root,
        &["log", "-1", "--pretty=format:%an:%ae:%s", "gh-pages"],
    )?;
    assert_eq!(
        meta,
        "Jane Doe:jane@example.com:Update page: add greeting"
    );

    // And it reached the remote.
    let local = git_stdout(root, &["rev-parse", "gh-pages"])?;
    let remote = git_stdout(root, &["rev-parse", "origin/gh-pages"])?;
    assert_eq!(local, remote, "push should update origin");

    Ok(())
}

#[test]
fn test_publish_unchanged_build_is_a_noop() -> Result<()> {
    let fixture = PublishFixture::new()?;

    fixture.generate_build("<h1>v1</h1>")?;
    assert_eq!(fixture.publisher()?.publish()?, PublishOutcome::Pushed);
    let first = git_stdout(&fixture.repo_root, &["rev-parse", "gh-pages"])?;

    // Regenerating identical output must not create a new commit.
    fixture.generate_build("<h1>v1</h1>")?;
    assert_eq!(
        fixture.publisher()?.publish()?,
        PublishOutcome::NothingToPublish
    );
    let second = git_stdout(&fixture.repo_root, &["rev-parse", "gh-pages"])?;
    assert_eq!(first, second, "no new commit for an unchanged build");
    assert_eq!(
        git_stdout(&fixture.repo_root, &["rev-parse", "--abbrev-ref", "HEAD"])?,
        "main"
    );

    Ok(())
}

#[test]
fn test_publish_replaces_stale_output() -> Result<()> {
    let fixture = PublishFixture::new()?;

    fixture.generate_build("<h1>v1</h1>")?;
    fixture.publisher()?.publish()?;

    fixture.generate_build("<h1>v2</h1>")?;
    assert_eq!(fixture.publisher()?.publish()?, PublishOutcome::Pushed);

    let published = git_stdout(
        &fixture.repo_root,
        &["show", "gh-pages:index.html"],
    )?;
    assert_eq!(published, "<h1>v2</h1>", "same-named entries overwrite");

    Ok(())
}

#[test]
fn test_publish_missing_branch_restores_nothing_but_fails_cleanly()
-> Result<()> {
    let fixture = PublishFixture::new()?;
    fixture.generate_build("<h1>Hello</h1>")?;

    let git = SystemGit::new(fixture.repo_root.clone())?;
    let publisher = Publisher::new(
        git,
        DiskWorkspace::new(),
        fixture.repo_root.join("build"),
        fixture.repo_root.clone(),
        "no-such-branch",
    );

    assert!(publisher.publish().is_err());
    // The checkout never succeeded, so the repository is still on main.
    assert_eq!(
        git_stdout(&fixture.repo_root, &["rev-parse", "--abbrev-ref", "HEAD"])?,
        "main"
    );
    // And the build tree is untouched, ready for a retry.
    assert!(fixture.repo_root.join("build").join("index.html").exists());

    Ok(())
}
