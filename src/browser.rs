//! Navigation history
//!
//! Keeps every resource opened while clicking through links. The last
//! entry is the current page. Reopening a loaded path moves it to the end
//! instead of fetching it again.

use crate::resource::resolver::absolute_path;
use crate::resource::Resource;
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct History {
    entries: Vec<Resource>,
}

impl History {
    /// Start a history at one resource
    pub fn new(start: Resource) -> Self {
        Self {
            entries: vec![start],
        }
    }

    /// The page being viewed
    pub fn current(&self) -> &Resource {
        // entries is never empty: it starts with one and nothing removes
        &self.entries[self.entries.len() - 1]
    }

    pub fn current_mut(&mut self) -> &mut Resource {
        let last = self.entries.len() - 1;
        &mut self.entries[last]
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loaded resources, oldest first
    pub fn entries(&self) -> &[Resource] {
        &self.entries
    }

    /// Where a path sits in the history
    pub fn position(&self, path: &str) -> Option<usize> {
        let path = absolute_path(path);
        self.entries.iter().position(|r| r.path() == path)
    }

    /// Make a path current, fetching it with the current page's client when
    /// it is not loaded yet
    pub async fn open(&mut self, path: &str) -> Result<&Resource> {
        match self.position(path) {
            Some(i) => {
                tracing::debug!("{} already loaded, moving it to the front", path);
                self.promote(i);
            }
            None => {
                let resource = self.current().follow(path).await?;
                self.entries.push(resource);
            }
        }
        Ok(self.current())
    }

    /// Push an already built resource and make it current
    pub fn push(&mut self, resource: Resource) {
        match self.position(resource.path()) {
            Some(i) => {
                self.entries[i] = resource;
                self.promote(i);
            }
            None => self.entries.push(resource),
        }
    }

    /// Rotate so the current page moves to the front and the previous one
    /// becomes current
    pub fn back(&mut self) -> &Resource {
        self.entries.rotate_right(1);
        self.current()
    }

    fn promote(&mut self, i: usize) {
        let resource = self.entries.remove(i);
        self.entries.push(resource);
    }
}
