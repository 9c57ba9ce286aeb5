//! Per-category attribute table

use super::category::{Category, RefinerKind};
use std::collections::BTreeMap;

/// Ordered attribute → refiner kind mapping for each category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeCatalog {
    entries: BTreeMap<Category, Vec<(String, RefinerKind)>>,
}

impl AttributeCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces an attribute, keeping its first position.
    pub fn insert(&mut self, category: Category, attribute: impl Into<String>, kind: RefinerKind) {
        let attribute = attribute.into();
        let list = self.entries.entry(category).or_default();
        match list.iter_mut().find(|(name, _)| *name == attribute) {
            Some(entry) => entry.1 = kind,
            None => list.push((attribute, kind)),
        }
    }

    pub fn with(mut self, category: Category, attribute: &str, kind: RefinerKind) -> Self {
        self.insert(category, attribute, kind);
        self
    }

    /// Attribute names of `category`, in declaration order
    pub fn attributes(&self, category: Category) -> Vec<&str> {
        self.entries
            .get(&category)
            .map(|list| list.iter().map(|(name, _)| name.as_str()).collect())
            .unwrap_or_default()
    }

    pub fn kind(&self, category: Category, attribute: &str) -> Option<RefinerKind> {
        self.entries
            .get(&category)?
            .iter()
            .find(|(name, _)| name == attribute)
            .map(|(_, kind)| *kind)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.values().all(Vec::is_empty)
    }

    /// Attribute table used when no configuration provides one.
    pub fn builtin() -> Self {
        use Category::*;
        use RefinerKind::*;
        Self::new()
            .with(Company, "設立年月日", Date)
            .with(Company, "本社所在地", Geo)
            .with(Company, "従業員数", Number)
            .with(Company, "代表者", Free)
            .with(Airport, "開港日", Date)
            .with(Airport, "所在地", Geo)
            .with(Airport, "運営者", Free)
            .with(Person, "生年月日", Date)
            .with(Person, "出身地", Geo)
            .with(Person, "没年月日", Date)
            .with(Person, "職業", Free)
            .with(City, "設置日", Date)
            .with(City, "所在地", Geo)
            .with(City, "人口", Number)
            .with(Compound, "発見日", Date)
            .with(Compound, "化学式", Data)
            .with(Compound, "分子量", Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_keeps_order_and_replaces() {
        let mut catalog = AttributeCatalog::new();
        catalog.insert(Category::Person, "生年月日", RefinerKind::Free);
        catalog.insert(Category::Person, "出身地", RefinerKind::Geo);
        catalog.insert(Category::Person, "生年月日", RefinerKind::Date);
        assert_eq!(catalog.attributes(Category::Person), vec!["生年月日", "出身地"]);
        assert_eq!(
            catalog.kind(Category::Person, "生年月日"),
            Some(RefinerKind::Date)
        );
        assert_eq!(catalog.kind(Category::Person, "身長"), None);
        assert!(catalog.attributes(Category::City).is_empty());
    }

    #[test]
    fn test_builtin_covers_every_category() {
        let catalog = AttributeCatalog::builtin();
        for category in Category::all() {
            assert!(!catalog.attributes(category).is_empty(), "{}", category);
        }
    }
}
