//! Disk-backed datastore implementation.

use crate::dirs::DataDirs;
use crate::error::{DatastoreError, DatastoreResult};
use crate::traits::{
    Datastore, DatastoreFile, DeleteOutcome, DeleteRef, DeleteResult, DocMetaLookup, DocMetaRef,
    FileMeta,
};
use async_trait::async_trait;
use bytes::Bytes;
use margin_core::{Backend, DOC_META_FILE, FileName, Fingerprint, META_SUFFIX};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{instrument, warn};
use url::Url;
use uuid::Uuid;

/// Disk-backed datastore rooted at a resolved [`DataDirs`].
///
/// The store is the sole writer of its directory tree; callers pass
/// logical identifiers (fingerprint, backend, name) and receive opaque
/// descriptors. No mutual exclusion is imposed across concurrent
/// operations: writes to the same path race at the filesystem level and
/// the last rename wins.
pub struct DiskDatastore {
    dirs: DataDirs,
}

impl DiskDatastore {
    /// Create a datastore over the given roots. [`Datastore::init`] must
    /// run before any other operation.
    pub fn new(dirs: DataDirs) -> Self {
        Self { dirs }
    }

    /// The resolved root directories.
    pub fn dirs(&self) -> &DataDirs {
        &self.dirs
    }

    /// Directory holding a document's files.
    fn doc_dir(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.dirs.data_dir().join(fingerprint.as_str())
    }

    /// Path of a document's state file.
    fn doc_meta_path(&self, fingerprint: &Fingerprint) -> PathBuf {
        self.doc_dir(fingerprint).join(DOC_META_FILE)
    }

    /// Directory holding one backend's attachment files.
    fn backend_dir(&self, backend: Backend) -> PathBuf {
        self.dirs.files_dir().join(backend.as_str())
    }

    fn payload_path(&self, backend: Backend, name: &FileName) -> PathBuf {
        self.backend_dir(backend).join(name.as_str())
    }

    fn sidecar_path(&self, backend: Backend, name: &FileName) -> PathBuf {
        self.backend_dir(backend)
            .join(format!("{}{META_SUFFIX}", name.as_str()))
    }

    /// Write `data` to `path` atomically: temp file, fsync, then rename.
    ///
    /// The temp name carries a UUID so concurrent writers to the same
    /// path cannot collide on the intermediate file.
    async fn write_atomic(path: &Path, data: &[u8]) -> DatastoreResult<()> {
        let temp_name = format!(".tmp.{}", Uuid::new_v4());
        let temp_path = path.with_file_name(
            path.file_name()
                .map(|n| format!("{}{}", n.to_string_lossy(), temp_name))
                .unwrap_or_else(|| temp_name.clone()),
        );
        {
            let mut file = fs::File::create(&temp_path).await?;
            file.write_all(data).await?;
            file.sync_all().await?;
        }
        fs::rename(&temp_path, path).await?;
        Ok(())
    }

    /// Build the `file://` URL for an absolute payload path.
    fn file_url(path: &Path) -> DatastoreResult<Url> {
        Url::from_file_path(path).map_err(|()| {
            DatastoreError::InvalidPath(format!("not an absolute path: {}", path.display()))
        })
    }
}

#[async_trait]
impl Datastore for DiskDatastore {
    #[instrument(skip(self))]
    async fn init(&self) -> DatastoreResult<()> {
        self.dirs.init().await
    }

    #[instrument(skip(self))]
    async fn contains(&self, fingerprint: &Fingerprint) -> DatastoreResult<bool> {
        let dir = self.doc_dir(fingerprint);
        if !fs::try_exists(&dir).await? {
            return Ok(false);
        }
        Ok(fs::try_exists(&self.doc_meta_path(fingerprint)).await?)
    }

    #[instrument(skip(self))]
    async fn get_doc_meta(&self, fingerprint: &Fingerprint) -> DatastoreResult<DocMetaLookup> {
        if !self.contains(fingerprint).await? {
            return Ok(DocMetaLookup::NotFound);
        }

        let path = self.doc_meta_path(fingerprint);
        let metadata = match fs::metadata(&path).await {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(%fingerprint, "state file vanished between existence check and stat");
                return Ok(DocMetaLookup::NotFound);
            }
            Err(e) => return Err(e.into()),
        };
        if !metadata.is_file() {
            warn!(%fingerprint, path = %path.display(), "state path is not a regular file");
            return Ok(DocMetaLookup::NotFound);
        }

        // Explicit read+write access probe, separate from the read itself.
        match fs::OpenOptions::new()
            .read(true)
            .write(true)
            .open(&path)
            .await
        {
            Ok(file) => drop(file),
            Err(e) if e.kind() == ErrorKind::PermissionDenied => {
                warn!(%fingerprint, path = %path.display(), "no read/write access to state file");
                return Ok(DocMetaLookup::AccessDenied);
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(%fingerprint, "state file vanished between stat and access probe");
                return Ok(DocMetaLookup::NotFound);
            }
            Err(e) => return Err(e.into()),
        }

        let text = fs::read_to_string(&path).await?;
        Ok(DocMetaLookup::Found(text))
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn sync(&self, fingerprint: &Fingerprint, data: &str) -> DatastoreResult<()> {
        if data.is_empty() {
            return Err(DatastoreError::InvalidDocMeta(
                "doc meta cannot be empty".to_string(),
            ));
        }
        if !data.starts_with('{') {
            return Err(DatastoreError::InvalidDocMeta(
                "doc meta must be a JSON object (expected leading '{')".to_string(),
            ));
        }

        let dir = self.doc_dir(fingerprint);
        if !fs::try_exists(&dir).await? {
            fs::create_dir_all(&dir).await?;
        }
        if !fs::metadata(&dir).await?.is_dir() {
            return Err(DatastoreError::NotADirectory(dir.display().to_string()));
        }

        Self::write_atomic(&self.doc_meta_path(fingerprint), data.as_bytes()).await
    }

    #[instrument(skip(self))]
    async fn get_doc_meta_files(&self) -> DatastoreResult<Vec<DocMetaRef>> {
        let data_dir = self.dirs.data_dir();
        match fs::try_exists(data_dir).await {
            Ok(true) => {}
            Ok(false) => return Ok(Vec::new()),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }

        let mut refs = Vec::new();
        let mut entries = fs::read_dir(data_dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_dir() {
                continue;
            }
            if !fs::try_exists(&entry.path().join(DOC_META_FILE)).await? {
                continue;
            }
            // Subarea roots (stash, files, logs) fail the state-file check
            // above; anything else that is not a usable fingerprint is
            // foreign to the store and skipped.
            let name = entry.file_name();
            if let Ok(fingerprint) = Fingerprint::new(name.to_string_lossy()) {
                refs.push(DocMetaRef { fingerprint });
            }
        }
        Ok(refs)
    }

    #[instrument(skip(self))]
    async fn delete(&self, doc_ref: &DeleteRef) -> DatastoreResult<DeleteResult> {
        let doc_meta_file = remove_outcome(&self.doc_meta_path(&doc_ref.fingerprint)).await;
        let data_file =
            remove_outcome(&self.dirs.stash_dir().join(doc_ref.filename.as_str())).await;
        Ok(DeleteResult {
            doc_meta_file,
            data_file,
        })
    }

    #[instrument(skip(self, data, meta), fields(size = data.len()))]
    async fn add_file(
        &self,
        backend: Backend,
        name: &FileName,
        data: Bytes,
        meta: FileMeta,
    ) -> DatastoreResult<DatastoreFile> {
        fs::create_dir_all(&self.backend_dir(backend)).await?;

        let payload_path = self.payload_path(backend, name);
        Self::write_atomic(&payload_path, &data).await?;

        let sidecar = serde_json::to_vec_pretty(&meta)?;
        Self::write_atomic(&self.sidecar_path(backend, name), &sidecar).await?;

        Ok(DatastoreFile {
            name: name.clone(),
            url: Self::file_url(&payload_path)?,
            meta,
        })
    }

    #[instrument(skip(self))]
    async fn get_file(
        &self,
        backend: Backend,
        name: &FileName,
    ) -> DatastoreResult<Option<DatastoreFile>> {
        let payload_path = self.payload_path(backend, name);
        if !fs::try_exists(&payload_path).await? {
            return Ok(None);
        }

        let sidecar = fs::read(&self.sidecar_path(backend, name)).await?;
        let meta: FileMeta = serde_json::from_slice(&sidecar)?;

        Ok(Some(DatastoreFile {
            name: name.clone(),
            url: Self::file_url(&payload_path)?,
            meta,
        }))
    }

    #[instrument(skip(self))]
    async fn contains_file(&self, backend: Backend, name: &FileName) -> DatastoreResult<bool> {
        Ok(fs::try_exists(&self.payload_path(backend, name)).await?)
    }

    #[instrument(skip(self))]
    async fn list_files(&self, backend: Backend) -> DatastoreResult<Vec<FileName>> {
        let dir = self.backend_dir(backend);
        match fs::try_exists(&dir).await {
            Ok(true) => {}
            Ok(false) => return Ok(Vec::new()),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        }

        let mut names = Vec::new();
        let mut entries = fs::read_dir(&dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if name.ends_with(META_SUFFIX) {
                continue;
            }
            // Temp files and other non-conforming names are not payloads.
            if let Ok(name) = FileName::new(name.as_ref()) {
                names.push(name);
            }
        }
        Ok(names)
    }

    #[instrument(skip(self, data), fields(size = data.len()))]
    async fn stash(&self, filename: &FileName, data: Bytes) -> DatastoreResult<PathBuf> {
        let path = self.dirs.stash_dir().join(filename.as_str());
        Self::write_atomic(&path, &data).await?;
        Ok(path)
    }

    #[instrument(skip(self))]
    async fn health_check(&self) -> DatastoreResult<()> {
        let metadata = fs::metadata(self.dirs.data_dir()).await.map_err(|e| {
            DatastoreError::Io(std::io::Error::new(
                e.kind(),
                format!("data root not accessible: {e}"),
            ))
        })?;
        if !metadata.is_dir() {
            return Err(DatastoreError::NotADirectory(
                self.dirs.data_dir().display().to_string(),
            ));
        }
        Ok(())
    }
}

/// Attempt one removal, capturing the outcome instead of failing the call.
async fn remove_outcome(path: &Path) -> DeleteOutcome {
    match fs::remove_file(path).await {
        Ok(()) => DeleteOutcome::Removed,
        Err(e) if e.kind() == ErrorKind::NotFound => DeleteOutcome::NotFound,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "removal failed");
            DeleteOutcome::Failed(e.to_string())
        }
    }
}
