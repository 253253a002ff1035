use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Mutex;

/// Where serialized content lives. `Ok(None)` means nothing stored yet.
pub trait ContentProvider {
    fn get_content(&self) -> Result<Option<String>, String>;
    fn set_content(&self, content: &str) -> Result<(), String>;
    fn clear_content(&self) -> Result<(), String>;
}

pub struct FileContentProvider {
    path: PathBuf,
}

impl FileContentProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl ContentProvider for FileContentProvider {
    fn get_content(&self) -> Result<Option<String>, String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Ok(Some(content)),
            Err(err) => match err.kind() {
                ErrorKind::NotFound => Ok(None),
                _ => Err(format!("Failed to read {}: {}", self.path.display(), err)),
            },
        }
    }

    fn set_content(&self, content: &str) -> Result<(), String> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {}", parent.display(), e))?;
        }
        std::fs::write(&self.path, content)
            .map_err(|e| format!("Failed to write {}: {}", self.path.display(), e))
    }

    fn clear_content(&self) -> Result<(), String> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(format!("Failed to remove {}: {}", self.path.display(), err)),
        }
    }
}

#[derive(Default)]
pub struct MemoryContentProvider {
    content: Mutex<Option<String>>,
}

impl MemoryContentProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_content(content: &str) -> Self {
        Self {
            content: Mutex::new(Some(content.to_string())),
        }
    }
}

impl ContentProvider for MemoryContentProvider {
    fn get_content(&self) -> Result<Option<String>, String> {
        let content = self.content.lock().map_err(|e| format!("Store poisoned: {}", e))?;
        Ok(content.clone())
    }

    fn set_content(&self, content: &str) -> Result<(), String> {
        let mut current = self.content.lock().map_err(|e| format!("Store poisoned: {}", e))?;
        *current = Some(content.to_string());
        Ok(())
    }

    fn clear_content(&self) -> Result<(), String> {
        let mut current = self.content.lock().map_err(|e| format!("Store poisoned: {}", e))?;
        *current = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_provider_missing_file_is_none() {
        let path = std::env::temp_dir().join(format!("seeds-missing-{}.yaml", std::process::id()));
        let provider = FileContentProvider::new(&path);

        assert_eq!(provider.get_content().unwrap(), None);
    }

    #[test]
    fn test_file_provider_write_read_clear() {
        let path = std::env::temp_dir()
            .join(format!("seeds-provider-{}", std::process::id()))
            .join("content.yaml");
        let provider = FileContentProvider::new(&path);

        provider.set_content("a: 1").unwrap();
        assert_eq!(provider.get_content().unwrap().as_deref(), Some("a: 1"));

        provider.clear_content().unwrap();
        assert_eq!(provider.get_content().unwrap(), None);
        provider.clear_content().unwrap();
    }

    #[test]
    fn test_memory_provider() {
        let provider = MemoryContentProvider::new();
        assert_eq!(provider.get_content().unwrap(), None);

        provider.set_content("x").unwrap();
        assert_eq!(provider.get_content().unwrap().as_deref(), Some("x"));

        provider.clear_content().unwrap();
        assert_eq!(provider.get_content().unwrap(), None);
    }
}
