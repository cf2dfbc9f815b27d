use std::fs;
use std::io::{self, Write};
use std::path::{Component, Path, PathBuf};

use log::{debug, error, info};
use tempfile::NamedTempFile;

use crate::errors::WikiError;
use crate::types::PageName;

/// Storage of page sources, one entry per page name.
///
/// Implementations never cache: every call goes to the backing store, which
/// is the only serialization point between concurrent writers.
pub trait PageStore: Send + Sync {
    /// Page source, or `None` if the page was never saved.
    fn read(&self, name: &PageName) -> Result<Option<String>, WikiError>;

    fn write(&self, name: &PageName, content: &str) -> Result<(), WikiError>;

    /// Remove a page. Removing a missing page succeeds.
    fn delete(&self, name: &PageName) -> Result<(), WikiError>;

    fn exists(&self, name: &PageName) -> Result<bool, WikiError>;
}

/// Page store keeping `<name>.md` files in one directory
#[derive(Clone)]
pub struct FileService {
    base_dir: PathBuf,
}

impl FileService {
    /// Create a new file service
    pub fn new(base_dir: PathBuf) -> Self {
        debug!("Creating FileService with base directory: {:?}", base_dir);
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create the page directory if it does not exist yet.
    pub fn ensure_dir(&self) -> Result<(), WikiError> {
        if !self.base_dir.is_dir() {
            info!("Creating page directory {:?}", self.base_dir);
            fs::create_dir_all(&self.base_dir)?;
        }
        Ok(())
    }

    /// Cleaned location of a page file.
    ///
    /// Fails if the cleaned path would not sit directly inside the cleaned
    /// page directory.
    pub fn page_path(&self, name: &PageName) -> Result<PathBuf, WikiError> {
        let dir = clean_path(&self.base_dir);
        let path = clean_path(&dir.join(format!("{name}.md")));
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        if parent != dir {
            return Err(WikiError::InvalidPath(name.to_string()));
        }
        Ok(path)
    }
}

impl PageStore for FileService {
    fn read(&self, name: &PageName) -> Result<Option<String>, WikiError> {
        let path = self.page_path(name)?;
        debug!("Reading page {} from {:?}", name, path);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Page {} does not exist", name);
                Ok(None)
            }
            Err(e) => {
                error!("Failed to read page file {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    fn write(&self, name: &PageName, content: &str) -> Result<(), WikiError> {
        let path = self.page_path(name)?;
        let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

        // Write beside the target and rename over it so readers never see a partial page.
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.as_file().sync_all()?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            tmp.as_file().set_permissions(fs::Permissions::from_mode(0o640))?;
        }
        tmp.persist(&path).map_err(|e| {
            error!("Failed to replace page file {:?}: {}", path, e.error);
            WikiError::Io(e.error)
        })?;

        info!("Saved page {}, {} bytes", name, content.len());
        Ok(())
    }

    fn delete(&self, name: &PageName) -> Result<(), WikiError> {
        let path = self.page_path(name)?;
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted page {}", name);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("Delete of missing page {}", name);
                Ok(())
            }
            Err(e) => {
                error!("Failed to delete page file {:?}: {}", path, e);
                Err(WikiError::Io(e))
            }
        }
    }

    fn exists(&self, name: &PageName) -> Result<bool, WikiError> {
        let path = self.page_path(name)?;
        match fs::metadata(&path) {
            Ok(meta) => Ok(meta.is_file()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(WikiError::Io(e)),
        }
    }
}

/// Lexically normalize a path: drop `.`, resolve `..` against preceding
/// components, collapse repeated separators.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for comp in path.components() {
        match comp {
            Component::CurDir => {}
            Component::ParentDir => match out.components().next_back() {
                Some(Component::Normal(_)) => {
                    out.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_os_str()),
        }
    }
    if out.as_os_str().is_empty() {
        out.push(".");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn page(name: &str) -> PageName {
        PageName::new(name).unwrap()
    }

    fn service() -> (TempDir, FileService) {
        let dir = TempDir::new().unwrap();
        let service = FileService::new(dir.path().to_path_buf());
        (dir, service)
    }

    #[test]
    fn clean_path_normalizes() {
        assert_eq!(clean_path(Path::new("./pages/")), PathBuf::from("pages"));
        assert_eq!(clean_path(Path::new("pages//About.md")), PathBuf::from("pages/About.md"));
        assert_eq!(clean_path(Path::new("pages/../../etc/passwd")), PathBuf::from("../etc/passwd"));
        assert_eq!(clean_path(Path::new("/../etc")), PathBuf::from("/etc"));
        assert_eq!(clean_path(Path::new(".")), PathBuf::from("."));
        assert_eq!(clean_path(Path::new("")), PathBuf::from("."));
    }

    #[test]
    fn page_path_stays_in_directory() {
        let service = FileService::new(PathBuf::from("./pages/"));
        assert_eq!(service.page_path(&page("About")).unwrap(), PathBuf::from("pages/About.md"));

        let service = FileService::new(PathBuf::from("."));
        assert_eq!(service.page_path(&page("About")).unwrap(), PathBuf::from("About.md"));

        let service = FileService::new(PathBuf::from("/srv/wiki/../pages"));
        assert_eq!(service.page_path(&page("home")).unwrap(), PathBuf::from("/srv/pages/home.md"));
    }

    #[test]
    fn read_missing_page_is_none() {
        let (_dir, service) = service();
        assert_eq!(service.read(&page("Missing")).unwrap(), None);
        assert!(!service.exists(&page("Missing")).unwrap());
    }

    #[test]
    fn write_then_read() {
        let (dir, service) = service();
        service.write(&page("About"), "# About\n").unwrap();
        assert_eq!(service.read(&page("About")).unwrap().as_deref(), Some("# About\n"));
        assert!(service.exists(&page("About")).unwrap());
        assert_eq!(fs::read_to_string(dir.path().join("About.md")).unwrap(), "# About\n");
    }

    #[test]
    fn write_overwrites_and_leaves_no_temp_files() {
        let (dir, service) = service();
        service.write(&page("About"), "first").unwrap();
        service.write(&page("About"), "second").unwrap();
        assert_eq!(service.read(&page("About")).unwrap().as_deref(), Some("second"));

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["About.md".to_string()]);
    }

    #[cfg(unix)]
    #[test]
    fn written_pages_are_not_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let (dir, service) = service();
        service.write(&page("Secret"), "x").unwrap();
        let mode = fs::metadata(dir.path().join("Secret.md")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[test]
    fn delete_removes_file() {
        let (dir, service) = service();
        service.write(&page("Gone"), "bye").unwrap();
        service.delete(&page("Gone")).unwrap();
        assert!(!dir.path().join("Gone.md").exists());
        assert_eq!(service.read(&page("Gone")).unwrap(), None);
    }

    #[test]
    fn delete_missing_page_succeeds() {
        let (_dir, service) = service();
        service.delete(&page("Never")).unwrap();
    }

    #[test]
    fn unreadable_page_is_an_error_not_absence() {
        let (dir, service) = service();
        // A directory where the page file should be cannot be read as text.
        fs::create_dir(dir.path().join("Broken.md")).unwrap();
        assert!(matches!(service.read(&page("Broken")), Err(WikiError::Io(_))));
    }

    #[test]
    fn ensure_dir_creates_missing_directory() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("pages");
        let service = FileService::new(nested.clone());
        service.ensure_dir().unwrap();
        assert!(nested.is_dir());
        assert_eq!(service.base_dir(), nested.as_path());
    }
}
