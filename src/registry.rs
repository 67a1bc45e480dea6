//! Named handles to owned images.
//!
//! The registry is the only place images live between commands. Each entry
//! owns its image outright; replacing an entry drops the previous image
//! before the new one is installed, and removing an entry drops it.

use crate::imaging::Image;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Token {0} exists")]
    DuplicateName(String),
    #[error("Token {0} not found!")]
    NotFound(String),
}

#[derive(Debug, Default)]
pub struct Registry {
    entries: BTreeMap<String, Image>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new handle. Existing names are never overwritten.
    pub fn insert(&mut self, name: &str, image: Image) -> Result<(), RegistryError> {
        if self.entries.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_string()));
        }
        self.entries.insert(name.to_string(), image);
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Result<&Image, RegistryError> {
        self.entries
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    pub fn get_mut(&mut self, name: &str) -> Result<&mut Image, RegistryError> {
        self.entries
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Run a consuming transformation on the image behind `name`.
    ///
    /// The entry is emptied while `f` runs and refilled with its result, so
    /// a conversion can take the image by value.
    pub fn replace_with(
        &mut self,
        name: &str,
        f: impl FnOnce(Image) -> Image,
    ) -> Result<(), RegistryError> {
        let slot = self.get_mut(name)?;
        let old = std::mem::take(slot);
        *slot = f(old);
        Ok(())
    }

    pub fn remove(&mut self, name: &str) -> Result<Image, RegistryError> {
        self.entries
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_string()))
    }

    /// Drop every image.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Image)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::{GrayPolicy, Variant};
    use crate::test_helpers::{gradient_rgb, gray_raster};

    #[test]
    fn insert_rejects_duplicate_name() {
        let mut reg = Registry::new();
        reg.insert("$a", Image::default()).unwrap();
        assert_eq!(
            reg.insert("$a", Image::default()),
            Err(RegistryError::DuplicateName("$a".into()))
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn lookup_missing_name_is_typed() {
        let mut reg = Registry::new();
        assert_eq!(
            reg.get("$nope").unwrap_err(),
            RegistryError::NotFound("$nope".into())
        );
        assert!(reg.get_mut("$nope").is_err());
        assert!(reg.remove("$nope").is_err());
    }

    #[test]
    fn replace_with_changes_variant_in_place() {
        let mut reg = Registry::new();
        reg.insert("$img", Image::from(gradient_rgb(3, 2))).unwrap();
        reg.replace_with("$img", |img| Image::from(img.into_grayscale(GrayPolicy::Luma)))
            .unwrap();
        let img = reg.get("$img").unwrap();
        assert_eq!(img.variant(), Variant::Grayscale);
        assert_eq!((img.width(), img.height()), (3, 2));
    }

    #[test]
    fn remove_returns_owned_image() {
        let mut reg = Registry::new();
        let raster = gray_raster(1, 1, &[5]);
        reg.insert("$x", Image::from(raster.clone())).unwrap();
        assert_eq!(reg.remove("$x").unwrap(), Image::from(raster));
        assert!(!reg.contains("$x"));
    }

    #[test]
    fn clear_empties_and_iter_is_sorted() {
        let mut reg = Registry::new();
        reg.insert("$b", Image::default()).unwrap();
        reg.insert("$a", Image::default()).unwrap();
        let names: Vec<&str> = reg.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["$a", "$b"]);
        reg.clear();
        assert!(reg.is_empty());
    }
}
