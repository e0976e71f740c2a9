//! Prints the special folders of this machine and the contents of each.

use folderkit_fs::{CancellationToken, SpecialFolders};

#[tokio::main]
async fn main() {
    env_logger::init();

    let folders = SpecialFolders::detect();
    println!("Special folders ({}):", folders.platform());

    let resolved = match folders.resolve_all() {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Failed to resolve special folders: {e}");
            return;
        }
    };

    let cancel = CancellationToken::none();
    for (role, folder) in resolved {
        let Some(folder) = folder else {
            println!("{role:>10}: <unsupported>");
            continue;
        };

        match (folder.get_folders(&cancel).await, folder.get_files(&cancel).await) {
            (Ok(folders), Ok(files)) => println!(
                "{role:>10}: {} ({} folders, {} files)",
                folder.path().display(),
                folders.len(),
                files.len()
            ),
            (Err(e), _) | (_, Err(e)) => {
                println!("{role:>10}: {} ({e})", folder.path().display());
            }
        }
    }
}
