use std::io;
use std::path::PathBuf;

mod schema;
pub(crate) mod settings;
mod storage;

pub use schema::SchemaManager;
pub use settings::{Auth, Database, Push, Settings};
pub use storage::Storage;

pub fn normalize_path(path: &str) -> io::Result<PathBuf> {
    let path_buf = PathBuf::from(path);

    Ok(if path_buf.is_absolute() {
        path_buf
    } else {
        std::env::current_dir()?.as_path().join(&path_buf)
    })
}
