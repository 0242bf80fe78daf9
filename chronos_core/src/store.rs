//! Profile persistence with file locking.
//!
//! The store holds exactly one profile record per installation. Access is
//! guarded by a sibling `.lock` file so that a second process never reads a
//! half-written profile; writes go through a temp file and an atomic rename.

use crate::{Error, Result, UserProfile};
use fs2::FileExt;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};
use tempfile::NamedTempFile;

/// File name of the profile record inside the data directory
pub const PROFILE_FILE_NAME: &str = "profile.json";

const LOCK_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Durable home for the single user profile
pub trait ProfileStore: Send {
    /// `Ok(None)` when nothing has been stored yet
    fn load(&self) -> Result<Option<UserProfile>>;

    fn save(&mut self, profile: &UserProfile) -> Result<()>;
}

/// JSON file store guarded by an advisory lock file
pub struct JsonFileStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock_timeout: Duration,
}

#[derive(Clone, Copy)]
enum LockMode {
    Shared,
    Exclusive,
}

impl JsonFileStore {
    /// Store backed by `path`, with a `<path>.lock` guard next to it
    pub fn new(path: impl Into<PathBuf>, lock_timeout: Duration) -> Self {
        let path = path.into();
        let lock_path = path.with_extension("lock");
        Self {
            path,
            lock_path,
            lock_timeout,
        }
    }

    /// Store at `<data_dir>/profile.json`
    pub fn in_dir(data_dir: &Path, lock_timeout: Duration) -> Self {
        Self::new(data_dir.join(PROFILE_FILE_NAME), lock_timeout)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn open_lock_file(&self) -> Result<File> {
        if let Some(parent) = self.lock_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.lock_path)?;
        Ok(file)
    }

    /// Poll for the lock until `lock_timeout` has passed
    fn acquire(&self, file: &File, mode: LockMode) -> Result<()> {
        let deadline = Instant::now() + self.lock_timeout;
        let contended = fs2::lock_contended_error().raw_os_error();

        loop {
            let attempt = match mode {
                LockMode::Shared => FileExt::try_lock_shared(file),
                LockMode::Exclusive => FileExt::try_lock_exclusive(file),
            };

            match attempt {
                Ok(()) => return Ok(()),
                Err(e) if e.raw_os_error() == contended => {}
                Err(e) => return Err(Error::Io(e)),
            }

            if Instant::now() >= deadline {
                return Err(Error::LockTimeout {
                    path: self.lock_path.clone(),
                    waited_ms: self.lock_timeout.as_millis() as u64,
                });
            }
            thread::sleep(LOCK_POLL_INTERVAL);
        }
    }

    fn read_locked(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let mut file = File::open(&self.path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        Ok(Some(contents))
    }

    fn write_locked(&self, profile: &UserProfile) -> Result<()> {
        let parent = self.path.parent().ok_or_else(|| {
            Error::Other(format!("profile path {:?} has no parent directory", self.path))
        })?;
        std::fs::create_dir_all(parent)?;

        // Temp file in the same directory so the rename stays atomic
        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            serde_json::to_writer(&mut writer, profile)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl ProfileStore for JsonFileStore {
    fn load(&self) -> Result<Option<UserProfile>> {
        if !self.path.exists() {
            tracing::info!("No profile found at {:?}", self.path);
            return Ok(None);
        }

        let lock = self.open_lock_file()?;
        self.acquire(&lock, LockMode::Shared)?;
        let contents = self.read_locked();
        FileExt::unlock(&lock)?;

        let Some(contents) = contents? else {
            return Ok(None);
        };
        let profile: UserProfile = serde_json::from_str(&contents)?;
        profile.validate()?;

        tracing::debug!(
            "Loaded profile with {} cycles from {:?}",
            profile.cycle_history.len(),
            self.path
        );
        Ok(Some(profile))
    }

    fn save(&mut self, profile: &UserProfile) -> Result<()> {
        let lock = self.open_lock_file()?;
        self.acquire(&lock, LockMode::Exclusive)?;
        let written = self.write_locked(profile);
        FileExt::unlock(&lock)?;
        written?;

        tracing::debug!("Saved profile to {:?}", self.path);
        Ok(())
    }
}

/// In-process store, for tests and embedders that persist elsewhere
#[derive(Debug, Default)]
pub struct MemoryStore {
    profile: Option<UserProfile>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that already holds `profile`
    pub fn with_profile(profile: UserProfile) -> Self {
        Self {
            profile: Some(profile),
            saves: 0,
        }
    }

    pub fn stored(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Number of successful `save` calls
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl ProfileStore for MemoryStore {
    fn load(&self) -> Result<Option<UserProfile>> {
        Ok(self.profile.clone())
    }

    fn save(&mut self, profile: &UserProfile) -> Result<()> {
        self.profile = Some(profile.clone());
        self.saves += 1;
        Ok(())
    }
}
