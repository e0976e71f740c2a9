use std::fs as stdfs;

use folderkit_fs::{
    CancellationSource, CancellationToken, CreationCollisionOption, ExistenceCheckResult, Folder,
    FsError,
};
use tempfile::TempDir;

fn scratch() -> (TempDir, Folder) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let folder = Folder::from_path(dir.path());
    (dir, folder)
}

const NONE: CancellationToken = CancellationToken::none();

#[tokio::test]
async fn get_missing_items_is_not_found() {
    let (_dir, folder) = scratch();

    let err = folder.get_file("missing.txt", &NONE).await.unwrap_err();
    assert!(err.is_not_found());

    let err = folder.get_folder("missing", &NONE).await.unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn try_get_missing_items_is_none() {
    let (_dir, folder) = scratch();

    assert!(folder.try_get_file("missing.txt", &NONE).await.unwrap().is_none());
    assert!(folder.try_get_folder("missing", &NONE).await.unwrap().is_none());
}

#[tokio::test]
async fn get_distinguishes_files_from_folders() {
    let (dir, folder) = scratch();
    stdfs::create_dir(dir.path().join("sub")).unwrap();
    stdfs::write(dir.path().join("note.txt"), b"hi").unwrap();

    assert!(folder.get_file("sub", &NONE).await.unwrap_err().is_not_found());
    assert!(folder.try_get_folder("note.txt", &NONE).await.unwrap().is_none());

    let file = folder.get_file("note.txt", &NONE).await.unwrap();
    assert_eq!(file.name(), "note.txt");
    assert_eq!(file.path(), dir.path().join("note.txt"));

    let sub = folder.try_get_folder("sub", &NONE).await.unwrap().unwrap();
    assert_eq!(sub.name(), "sub");
    assert!(sub.can_delete());
}

#[tokio::test]
async fn fail_if_exists_reports_already_exists() {
    let (dir, folder) = scratch();
    stdfs::write(dir.path().join("a.txt"), b"old").unwrap();
    stdfs::create_dir(dir.path().join("b")).unwrap();

    let err = folder
        .create_file("a.txt", CreationCollisionOption::FailIfExists, &NONE)
        .await
        .unwrap_err();
    assert!(matches!(err, FsError::AlreadyExists { .. }));

    let err = folder
        .create_folder("b", CreationCollisionOption::FailIfExists, &NONE)
        .await
        .unwrap_err();
    assert!(matches!(err, FsError::AlreadyExists { .. }));
}

#[tokio::test]
async fn replace_existing_discards_prior_content() {
    let (dir, folder) = scratch();
    stdfs::write(dir.path().join("a.txt"), b"old content").unwrap();
    stdfs::create_dir(dir.path().join("b")).unwrap();
    stdfs::write(dir.path().join("b").join("inner.txt"), b"x").unwrap();

    let file = folder
        .create_file("a.txt", CreationCollisionOption::ReplaceExisting, &NONE)
        .await
        .unwrap();
    assert_eq!(file.name(), "a.txt");
    assert!(stdfs::read(file.path()).unwrap().is_empty());

    let sub = folder
        .create_folder("b", CreationCollisionOption::ReplaceExisting, &NONE)
        .await
        .unwrap();
    assert!(sub.get_files(&NONE).await.unwrap().is_empty());
}

#[tokio::test]
async fn open_if_exists_keeps_content() {
    let (dir, folder) = scratch();
    stdfs::write(dir.path().join("a.txt"), b"keep").unwrap();
    stdfs::create_dir(dir.path().join("b")).unwrap();
    stdfs::write(dir.path().join("b").join("inner.txt"), b"x").unwrap();

    let file = folder
        .create_file("a.txt", CreationCollisionOption::OpenIfExists, &NONE)
        .await
        .unwrap();
    assert_eq!(stdfs::read(file.path()).unwrap(), b"keep");

    let sub = folder
        .create_folder("b", CreationCollisionOption::OpenIfExists, &NONE)
        .await
        .unwrap();
    assert_eq!(sub.get_files(&NONE).await.unwrap().len(), 1);

    let fresh = folder
        .create_folder("c", CreationCollisionOption::OpenIfExists, &NONE)
        .await
        .unwrap();
    assert!(fresh.path().is_dir());
}

#[tokio::test]
async fn open_if_exists_folder_over_file_collides() {
    let (dir, folder) = scratch();
    stdfs::write(dir.path().join("taken"), b"").unwrap();

    let err = folder
        .create_folder("taken", CreationCollisionOption::OpenIfExists, &NONE)
        .await
        .unwrap_err();
    assert!(matches!(err, FsError::AlreadyExists { .. }));
}

#[tokio::test]
async fn generate_unique_name_picks_a_new_name() {
    let (dir, folder) = scratch();
    stdfs::write(dir.path().join("report.txt"), b"first").unwrap();

    let second = folder
        .create_file("report.txt", CreationCollisionOption::GenerateUniqueName, &NONE)
        .await
        .unwrap();
    assert_eq!(second.name(), "report (2).txt");

    let third = folder
        .create_file("report.txt", CreationCollisionOption::GenerateUniqueName, &NONE)
        .await
        .unwrap();
    assert_eq!(third.name(), "report (3).txt");
    assert_eq!(stdfs::read(dir.path().join("report.txt")).unwrap(), b"first");

    let first_folder = folder
        .create_folder("Photos", CreationCollisionOption::GenerateUniqueName, &NONE)
        .await
        .unwrap();
    assert_eq!(first_folder.name(), "Photos");
    let second_folder = folder
        .create_folder("Photos", CreationCollisionOption::GenerateUniqueName, &NONE)
        .await
        .unwrap();
    assert_eq!(second_folder.name(), "Photos (2)");

    stdfs::create_dir(dir.path().join("release.v1")).unwrap();
    let release = folder
        .create_folder("release.v1", CreationCollisionOption::GenerateUniqueName, &NONE)
        .await
        .unwrap();
    assert_eq!(release.name(), "release.v1 (2)");
}

#[tokio::test]
async fn create_file_over_folder_collides() {
    let (dir, folder) = scratch();
    stdfs::create_dir(dir.path().join("taken")).unwrap();
    stdfs::write(dir.path().join("taken").join("inner.txt"), b"kept").unwrap();

    for option in [
        CreationCollisionOption::ReplaceExisting,
        CreationCollisionOption::OpenIfExists,
    ] {
        let err = folder.create_file("taken", option, &NONE).await.unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists { .. }), "{option:?}: {err:?}");
    }
    assert!(dir.path().join("taken").is_dir());
    assert_eq!(stdfs::read(dir.path().join("taken").join("inner.txt")).unwrap(), b"kept");
}

#[cfg(unix)]
#[tokio::test]
async fn listings_skip_dangling_symlinks() {
    let (dir, folder) = scratch();
    stdfs::write(dir.path().join("real.txt"), b"").unwrap();
    std::os::unix::fs::symlink(dir.path().join("gone.txt"), dir.path().join("broken.txt"))
        .unwrap();

    let files = folder.get_files(&NONE).await.unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name()).collect();
    assert_eq!(names, ["real.txt"]);
    assert!(folder.get_folders(&NONE).await.unwrap().is_empty());
}

#[tokio::test]
async fn check_exists_reports_kind() {
    let (dir, folder) = scratch();
    stdfs::create_dir(dir.path().join("x")).unwrap();
    stdfs::write(dir.path().join("y"), b"").unwrap();

    assert_eq!(
        folder.check_exists("x", &NONE).await.unwrap(),
        ExistenceCheckResult::FolderExists
    );
    assert_eq!(
        folder.check_exists("y", &NONE).await.unwrap(),
        ExistenceCheckResult::FileExists
    );
    assert_eq!(
        folder.check_exists("z", &NONE).await.unwrap(),
        ExistenceCheckResult::NotFound
    );
}

#[tokio::test]
async fn listings_are_materialized_and_sorted() {
    let (dir, folder) = scratch();
    for name in ["c.txt", "a.txt", "b.txt"] {
        stdfs::write(dir.path().join(name), b"").unwrap();
    }
    for name in ["zeta", "alpha"] {
        stdfs::create_dir(dir.path().join(name)).unwrap();
    }

    let files = folder.get_files(&NONE).await.unwrap();
    let names: Vec<_> = files.iter().map(|f| f.name()).collect();
    assert_eq!(names, ["a.txt", "b.txt", "c.txt"]);

    let folders = folder.get_folders(&NONE).await.unwrap();
    let names: Vec<_> = folders.iter().map(|f| f.name()).collect();
    assert_eq!(names, ["alpha", "zeta"]);
}

#[tokio::test]
async fn protected_folder_refuses_delete() {
    let dir = tempfile::tempdir().unwrap();
    stdfs::write(dir.path().join("keep.txt"), b"data").unwrap();
    let root = Folder::protected(dir.path());

    let err = root.delete(&NONE).await.unwrap_err();
    assert!(matches!(err, FsError::Forbidden { .. }));
    assert_eq!(stdfs::read(dir.path().join("keep.txt")).unwrap(), b"data");
}

#[tokio::test]
async fn delete_removes_folder_tree_and_files() {
    let (dir, folder) = scratch();
    let sub = folder
        .create_folder("sub", CreationCollisionOption::FailIfExists, &NONE)
        .await
        .unwrap();
    let file = sub
        .create_file("inner.txt", CreationCollisionOption::FailIfExists, &NONE)
        .await
        .unwrap();

    file.delete(&NONE).await.unwrap();
    assert!(!file.path().exists());
    assert!(file.delete(&NONE).await.unwrap_err().is_not_found());

    sub.delete(&NONE).await.unwrap();
    assert!(!dir.path().join("sub").exists());
}

#[tokio::test]
async fn delete_child_handles_both_kinds() {
    let (dir, folder) = scratch();
    stdfs::create_dir_all(dir.path().join("tree").join("leaf")).unwrap();
    stdfs::write(dir.path().join("loose.txt"), b"").unwrap();

    folder.delete_child("tree", &NONE).await.unwrap();
    folder.delete_child("loose.txt", &NONE).await.unwrap();
    folder.delete_child("never-existed", &NONE).await.unwrap();

    assert!(folder.get_folders(&NONE).await.unwrap().is_empty());
    assert!(folder.get_files(&NONE).await.unwrap().is_empty());
}

#[tokio::test]
async fn blank_names_are_invalid() {
    let (_dir, folder) = scratch();

    for name in ["", "  ", "../escape"] {
        let err = folder
            .create_file(name, CreationCollisionOption::FailIfExists, &NONE)
            .await
            .unwrap_err();
        assert!(matches!(err, FsError::InvalidArgument(_)), "{name:?}");
    }
}

#[tokio::test]
async fn cancelled_token_skips_native_calls() {
    let (dir, folder) = scratch();
    let source = CancellationSource::new();
    let token = source.token();
    source.cancel();

    let err = folder
        .create_file("new.txt", CreationCollisionOption::FailIfExists, &token)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(!dir.path().join("new.txt").exists());

    let err = folder
        .create_folder("new", CreationCollisionOption::FailIfExists, &token)
        .await
        .unwrap_err();
    assert!(err.is_cancelled());
    assert!(!dir.path().join("new").exists());

    assert!(folder.try_get_file("x", &token).await.unwrap_err().is_cancelled());
    assert!(folder.get_folders(&token).await.unwrap_err().is_cancelled());
    assert!(folder.check_exists("x", &token).await.unwrap_err().is_cancelled());
    assert!(folder.delete(&token).await.unwrap_err().is_cancelled());
    assert!(dir.path().exists());
}

#[tokio::test]
async fn open_requires_an_existing_directory() {
    let (dir, _folder) = scratch();
    stdfs::write(dir.path().join("file"), b"").unwrap();

    let opened = Folder::open(dir.path(), &NONE).await.unwrap();
    assert_eq!(opened.path(), dir.path());

    assert!(
        Folder::open(dir.path().join("file"), &NONE)
            .await
            .unwrap_err()
            .is_not_found()
    );
    assert!(
        Folder::open(dir.path().join("nope"), &NONE)
            .await
            .unwrap_err()
            .is_not_found()
    );
}
