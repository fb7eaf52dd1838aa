//! Persistent mapping from category name to its learned keywords.
//!
//! The file is a JSON object of `name -> [keyword, ...]`. Categories keep
//! the order in which they were created, and that order is written back to
//! disk, because keyword matching resolves overlaps by creation order.

use std::fmt;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::{debug, info};

use crate::errors::{CategoryError, CategoryResult, PersistenceError, PersistenceResult};
use crate::types::UNCATEGORIZED;

/// Default file name for the category store.
pub const DEFAULT_STORE_FILE: &str = "categories.json";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub name: String,
    pub keywords: Vec<String>,
}

impl Category {
    fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            keywords: Vec::new(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.name == UNCATEGORIZED
    }

    /// Case-insensitive keyword membership.
    pub fn has_keyword(&self, keyword: &str) -> bool {
        let keyword = keyword.to_lowercase();
        self.keywords.iter().any(|k| k.to_lowercase() == keyword)
    }

    /// Appends `keyword` unless it is already present ignoring case.
    fn push_keyword(&mut self, keyword: String) -> bool {
        if self.has_keyword(&keyword) {
            return false;
        }
        self.keywords.push(keyword);
        true
    }
}

/// Ordered list of categories with its on-disk JSON object form.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Categories(Vec<Category>);

impl Default for Categories {
    fn default() -> Self {
        Self(vec![Category::new(UNCATEGORIZED)])
    }
}

impl Serialize for Categories {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for category in &self.0 {
            map.serialize_entry(&category.name, &category.keywords)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Categories {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CategoriesVisitor;

        impl<'de> Visitor<'de> for CategoriesVisitor {
            type Value = Categories;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object mapping category names to keyword arrays")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut categories: Vec<Category> = Vec::new();
                while let Some((name, keywords)) = access.next_entry::<String, Vec<String>>()? {
                    let index = match categories.iter().position(|c| c.name == name) {
                        Some(index) => index,
                        None => {
                            categories.push(Category::new(name));
                            categories.len() - 1
                        }
                    };
                    for keyword in keywords {
                        categories[index].push_keyword(keyword);
                    }
                }
                Ok(Categories(categories))
            }
        }

        deserializer.deserialize_map(CategoriesVisitor)
    }
}

/// Category rules shared by matching (read) and learning (write).
///
/// Every successful mutation is written to disk before it returns. If the
/// write fails the in-memory change is undone, so memory never holds
/// learning that the file does not.
#[derive(Debug)]
pub struct CategoryStore {
    path: Option<PathBuf>,
    categories: Categories,
}

impl CategoryStore {
    /// Reads the store at `path`.
    ///
    /// A missing file yields a store holding only the sentinel category. A
    /// file that exists but cannot be read or decoded is an error: learned
    /// keywords are never thrown away to start fresh.
    pub fn load(path: impl AsRef<Path>) -> PersistenceResult<Self> {
        let path = path.as_ref().to_path_buf();

        let categories = match fs::read_to_string(&path) {
            Ok(content) => {
                let mut categories: Categories = serde_json::from_str(&content)
                    .map_err(|source| PersistenceError::Corrupt {
                        path: path.clone(),
                        source,
                    })?;
                if !categories.0.iter().any(Category::is_sentinel) {
                    categories.0.insert(0, Category::new(UNCATEGORIZED));
                }
                debug!(path = %path.display(), categories = categories.0.len(), "loaded category store");
                categories
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no category store on disk, starting with defaults");
                Categories::default()
            }
            Err(source) => return Err(PersistenceError::Io { path, source }),
        };

        Ok(Self {
            path: Some(path),
            categories,
        })
    }

    /// A store that is never written to disk.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            categories: Categories::default(),
        }
    }

    /// Rewrites the whole file.
    ///
    /// The JSON goes to a sibling temp file which is synced and then renamed
    /// over the target, so a crash leaves either the old or the new mapping.
    pub fn save(&self) -> PersistenceResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_string_pretty(&self.categories)?;
        let io_err = |source: std::io::Error| PersistenceError::Io {
            path: path.clone(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| DEFAULT_STORE_FILE.to_string());
        let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));

        let mut file = File::create(&tmp_path).map_err(io_err)?;
        file.write_all(json.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&tmp_path, path).map_err(io_err)?;

        debug!(path = %path.display(), "saved category store");
        Ok(())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories.0
    }

    /// Category names in creation order, for selection lists.
    pub fn names(&self) -> Vec<&str> {
        self.categories.0.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn get(&self, name: &str) -> Option<&Category> {
        self.categories.0.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Creates an empty category. Returns `false` if the name is blank or
    /// already taken.
    pub fn add_category(&mut self, name: &str) -> PersistenceResult<bool> {
        let name = name.trim();
        if name.is_empty() || self.contains(name) {
            return Ok(false);
        }

        self.categories.0.push(Category::new(name));
        if let Err(err) = self.save() {
            self.categories.0.pop();
            return Err(err);
        }

        info!(category = name, "created category");
        Ok(true)
    }

    /// Records `keyword` under `category`.
    ///
    /// Surrounding whitespace is trimmed and the original casing is stored.
    /// Blank keywords, keywords already present (ignoring case) and keywords
    /// for the sentinel category are no-ops returning `false`.
    pub fn add_keyword(&mut self, category: &str, keyword: &str) -> CategoryResult<bool> {
        let keyword = keyword.trim();

        let index = self
            .categories
            .0
            .iter()
            .position(|c| c.name == category)
            .ok_or_else(|| CategoryError::UnknownCategory(category.to_string()))?;

        let entry = &mut self.categories.0[index];
        if keyword.is_empty() || entry.is_sentinel() || !entry.push_keyword(keyword.to_string()) {
            return Ok(false);
        }

        if let Err(err) = self.save() {
            self.categories.0[index].keywords.pop();
            return Err(err.into());
        }

        info!(category, keyword, "learned keyword");
        Ok(true)
    }
}
