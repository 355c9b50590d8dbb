//! Asset storage for uploaded product images.
//!
//! The catalog only ever handles asset *names*; the bytes live here. Names
//! are generated on upload so that two uploads of `photo.png` never collide.

use std::ffi::OsStr;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};

use chrono::Utc;
use tokio::io::AsyncWriteExt;
use tracing::{debug, instrument};
use uuid::Uuid;

use shop_catalog_core::{AssetName, AssetNameError};

/// Longest original extension carried over to a generated name.
const MAX_EXTENSION_LEN: usize = 10;

/// Errors from asset storage.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    /// File system operation failed.
    #[error("asset I/O error at {path}: {source}")]
    Io {
        /// Path that was being accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// A generated name was rejected as an asset name.
    #[error("invalid asset name {name:?}: {source}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        #[source]
        source: AssetNameError,
    },
}

impl AssetError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the error means the asset did not exist.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Io { source, .. } => source.kind() == io::ErrorKind::NotFound,
            Self::InvalidName { .. } => false,
        }
    }
}

/// Storage for uploaded binary assets, addressed by generated name.
pub trait AssetStore: Send + Sync {
    /// Persist an upload and return the unique name it was stored under.
    ///
    /// `original_filename` is only used to carry over the file extension.
    fn store(
        &self,
        original_filename: &str,
        bytes: &[u8],
    ) -> impl Future<Output = Result<AssetName, AssetError>> + Send;

    /// Delete a stored asset.
    fn remove(&self, name: &AssetName) -> impl Future<Output = Result<(), AssetError>> + Send;

    /// Names of every stored asset.
    fn list(&self) -> impl Future<Output = Result<Vec<AssetName>, AssetError>> + Send;
}

/// Assets kept as files in a single directory.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    /// Create a store rooted at `root`. The directory is created lazily.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Full path of an asset.
    #[must_use]
    pub fn path_for(&self, name: &AssetName) -> PathBuf {
        self.root.join(name.as_str())
    }

    /// Create the asset directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AssetError::Io` if the directory cannot be created.
    pub async fn ensure_root(&self) -> Result<(), AssetError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AssetError::io(&self.root, e))
    }
}

impl AssetStore for FsAssetStore {
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    async fn store(&self, original_filename: &str, bytes: &[u8]) -> Result<AssetName, AssetError> {
        self.ensure_root().await?;

        let name = generate_name(original_filename)?;
        let path = self.path_for(&name);

        // create_new: a name clash must fail rather than overwrite another product's image
        let mut file = tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
            .map_err(|e| AssetError::io(&path, e))?;
        file.write_all(bytes)
            .await
            .map_err(|e| AssetError::io(&path, e))?;
        file.flush().await.map_err(|e| AssetError::io(&path, e))?;

        debug!(asset = %name, "Stored asset");
        Ok(name)
    }

    #[instrument(skip(self), fields(asset = %name))]
    async fn remove(&self, name: &AssetName) -> Result<(), AssetError> {
        let path = self.path_for(name);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| AssetError::io(&path, e))?;

        debug!("Removed asset");
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AssetName>, AssetError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(AssetError::io(&self.root, e)),
        };

        let mut names = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| AssetError::io(&self.root, e))?
        {
            let is_file = entry
                .file_type()
                .await
                .map_err(|e| AssetError::io(&entry.path(), e))?
                .is_file();
            if !is_file {
                continue;
            }
            if let Some(name) = entry
                .file_name()
                .to_str()
                .and_then(|s| AssetName::parse(s).ok())
            {
                names.push(name);
            }
        }

        names.sort();
        Ok(names)
    }
}

/// Build a unique asset name: `<unix-millis>-<8 hex>[.<ext>]`.
fn generate_name(original_filename: &str) -> Result<AssetName, AssetError> {
    let millis = Utc::now().timestamp_millis();
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();

    let name = match extension_of(original_filename) {
        Some(ext) => format!("{millis}-{suffix}.{ext}"),
        None => format!("{millis}-{suffix}"),
    };

    AssetName::parse(&name).map_err(|source| AssetError::InvalidName { name, source })
}

/// Lower-cased extension of an uploaded file name, if it is short and alphanumeric.
fn extension_of(original_filename: &str) -> Option<String> {
    Path::new(original_filename)
        .extension()
        .and_then(OsStr::to_str)
        .filter(|ext| {
            !ext.is_empty()
                && ext.len() <= MAX_EXTENSION_LEN
                && ext.chars().all(|c| c.is_ascii_alphanumeric())
        })
        .map(str::to_ascii_lowercase)
}
