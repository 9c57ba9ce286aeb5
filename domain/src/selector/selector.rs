//! CategorySelector - picks the category, lists its attributes and hands out
//! refiners.

use super::catalog::AttributeCatalog;
use super::category::{Category, RefinerKind};
use crate::candidate::{Candidate, CandidateError, CandidateSet};
use crate::date::{DateBounds, DateParser};
use crate::phonetic::PhoneticReader;
use crate::query::Query;
use crate::refiner::{DateRefiner, GeoRefiner, PlaceDirectory, Refiner};
use std::sync::Arc;
use thiserror::Error;

pub const CATEGORY_TITLE: &str = "カテゴリの選択";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Category already selected: {0}")]
    AlreadySet(Category),

    #[error("No category selected")]
    CategoryNotSet,

    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    #[error("Refiner kind {kind} for '{attribute}' is not supported yet")]
    NotSupported { attribute: String, kind: RefinerKind },

    #[error(transparent)]
    Candidate(#[from] CandidateError),
}

/// Shared handles every refiner may need.
#[derive(Clone)]
pub struct RefinerContext {
    pub places: Arc<dyn PlaceDirectory>,
    pub reader: Arc<dyn PhoneticReader>,
    pub dates: Arc<DateParser>,
    pub bounds: DateBounds,
    pub max_bucket: Option<usize>,
}

impl RefinerContext {
    pub fn new(
        places: Arc<dyn PlaceDirectory>,
        reader: Arc<dyn PhoneticReader>,
        dates: Arc<DateParser>,
    ) -> Self {
        Self {
            places,
            reader,
            dates,
            bounds: DateBounds::default(),
            max_bucket: None,
        }
    }

    pub fn with_bounds(mut self, bounds: DateBounds) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_max_bucket(mut self, max_bucket: Option<usize>) -> Self {
        self.max_bucket = max_bucket;
        self
    }
}

impl std::fmt::Debug for RefinerContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RefinerContext")
            .field("bounds", &self.bounds)
            .field("max_bucket", &self.max_bucket)
            .finish_non_exhaustive()
    }
}

/// Root of a refinement session.
///
/// The category is chosen exactly once; afterwards each attribute is
/// dispatched to its refiner and finished queries are collected here.
#[derive(Debug)]
pub struct CategorySelector {
    catalog: AttributeCatalog,
    context: RefinerContext,
    category: Option<Category>,
    queries: Vec<(String, Query)>,
}

impl CategorySelector {
    pub fn new(catalog: AttributeCatalog, context: RefinerContext) -> Self {
        Self {
            catalog,
            context,
            category: None,
            queries: Vec::new(),
        }
    }

    /// Category choices; fails once a category has been chosen.
    pub fn categories(&self) -> Result<CandidateSet, SelectorError> {
        if let Some(category) = self.category {
            return Err(SelectorError::AlreadySet(category));
        }
        let items = Category::all()
            .into_iter()
            .map(|c| Candidate::with_reference(c.label(), c.name()))
            .collect();
        Ok(CandidateSet::flat(CATEGORY_TITLE, items)?)
    }

    /// Fixes the category by display label or configuration name.
    pub fn set_category(&mut self, name: &str) -> Result<Category, SelectorError> {
        if let Some(category) = self.category {
            return Err(SelectorError::AlreadySet(category));
        }
        let category: Category = name
            .parse()
            .map_err(|_| SelectorError::InvalidCategory(name.to_string()))?;
        self.category = Some(category);
        Ok(category)
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    /// Configured attributes of the chosen category
    pub fn attributes(&self) -> Result<Vec<String>, SelectorError> {
        let category = self.category.ok_or(SelectorError::CategoryNotSet)?;
        Ok(self.attributes_of(category, false))
    }

    /// Attributes configured for any category; `supported_only` keeps those
    /// whose kind has a refiner.
    pub fn attributes_of(&self, category: Category, supported_only: bool) -> Vec<String> {
        self.catalog
            .attributes(category)
            .into_iter()
            .filter(|attribute| {
                !supported_only
                    || self
                        .catalog
                        .kind(category, attribute)
                        .is_some_and(|kind| kind.is_supported())
            })
            .map(str::to_string)
            .collect()
    }

    /// Returns `true` if `attribute` is configured and its kind has a refiner.
    pub fn is_supported(&self, attribute: &str) -> bool {
        self.kind_of(attribute).is_ok_and(|kind| kind.is_supported())
    }

    fn kind_of(&self, attribute: &str) -> Result<RefinerKind, SelectorError> {
        let category = self.category.ok_or(SelectorError::CategoryNotSet)?;
        self.catalog
            .kind(category, attribute)
            .ok_or_else(|| SelectorError::UnknownAttribute(attribute.to_string()))
    }

    /// Builds a fresh refiner for `attribute`.
    pub fn dispatch(&self, attribute: &str) -> Result<Refiner, SelectorError> {
        let ctx = &self.context;
        match self.kind_of(attribute)? {
            RefinerKind::Date => Ok(Refiner::Date(DateRefiner::new(
                attribute,
                Arc::clone(&ctx.dates),
                ctx.bounds,
            ))),
            RefinerKind::Geo => Ok(Refiner::Geo(
                GeoRefiner::new(attribute, Arc::clone(&ctx.places), Arc::clone(&ctx.reader))
                    .with_max_bucket(ctx.max_bucket),
            )),
            kind @ (RefinerKind::Free | RefinerKind::Number | RefinerKind::Data) => {
                Err(SelectorError::NotSupported {
                    attribute: attribute.to_string(),
                    kind,
                })
            }
        }
    }

    /// Records a finished query; a later query for the same attribute
    /// replaces the earlier one.
    pub fn add_query(&mut self, attribute: impl Into<String>, query: Query) {
        let attribute = attribute.into();
        match self.queries.iter_mut().find(|(name, _)| *name == attribute) {
            Some(entry) => entry.1 = query,
            None => self.queries.push((attribute, query)),
        }
    }

    pub fn queries(&self) -> &[(String, Query)] {
        &self.queries
    }

    pub fn into_queries(self) -> Vec<(String, Query)> {
        self.queries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::{DONE, Selection};
    use crate::phonetic::KanaOnlyReader;
    use crate::refiner::geo::tests::FakeDirectory;
    use crate::refiner::{Refine, Step};

    fn selector() -> CategorySelector {
        let context = RefinerContext::new(
            Arc::new(FakeDirectory::default()),
            Arc::new(KanaOnlyReader),
            Arc::new(DateParser::japanese().unwrap()),
        );
        CategorySelector::new(AttributeCatalog::builtin(), context)
    }

    #[test]
    fn test_categories_offered_once() {
        let mut s = selector();
        let mut set = s.categories().unwrap();
        assert_eq!(set.title(), "カテゴリの選択");
        assert_eq!(
            set.paginate(10),
            vec!["企業名", "空港名", "人名", "市区町村名", "化合物名"]
        );
        let chosen = match set.select(10, "人名").unwrap() {
            Selection::Chosen(c) => c,
            other => panic!("unexpected {:?}", other),
        };
        assert_eq!(chosen.reference(), "PERSON");
        assert_eq!(s.set_category(chosen.key()).unwrap(), Category::Person);

        assert_eq!(
            s.categories().unwrap_err(),
            SelectorError::AlreadySet(Category::Person)
        );
        assert_eq!(
            s.set_category("CITY").unwrap_err(),
            SelectorError::AlreadySet(Category::Person)
        );
    }

    #[test]
    fn test_invalid_category() {
        let mut s = selector();
        assert_eq!(
            s.set_category("動物").unwrap_err(),
            SelectorError::InvalidCategory("動物".to_string())
        );
        assert_eq!(s.category(), None);
    }

    #[test]
    fn test_attributes_require_category() {
        let mut s = selector();
        assert_eq!(s.attributes().unwrap_err(), SelectorError::CategoryNotSet);
        s.set_category("PERSON").unwrap();
        assert_eq!(
            s.attributes().unwrap(),
            vec!["生年月日", "出身地", "没年月日", "職業"]
        );
    }

    #[test]
    fn test_attributes_of_unchosen_category() {
        let s = selector();
        assert_eq!(
            s.attributes_of(Category::Person, true),
            vec!["生年月日", "出身地", "没年月日"]
        );
        assert_eq!(s.attributes_of(Category::Person, false).len(), 4);
        assert_eq!(s.category(), None);
    }

    #[test]
    fn test_dispatch_by_kind() {
        let mut s = selector();
        s.set_category("人名").unwrap();
        assert!(matches!(s.dispatch("生年月日"), Ok(Refiner::Date(_))));
        assert!(matches!(s.dispatch("出身地"), Ok(Refiner::Geo(_))));
        assert_eq!(
            s.dispatch("職業").unwrap_err(),
            SelectorError::NotSupported {
                attribute: "職業".to_string(),
                kind: RefinerKind::Free
            }
        );
        assert_eq!(
            s.dispatch("身長").unwrap_err(),
            SelectorError::UnknownAttribute("身長".to_string())
        );
        assert!(s.is_supported("出身地"));
        assert!(!s.is_supported("職業"));
        assert!(!s.is_supported("身長"));
    }

    fn choose(set: &mut CandidateSet, labels: &[&str]) -> Candidate {
        set.paginate(50);
        labels
            .iter()
            .find_map(|l| match set.select(50, l).unwrap() {
                Selection::Chosen(c) => Some(c),
                Selection::Options(_) => None,
            })
            .unwrap()
    }

    #[test]
    fn test_geo_dispatch_end_to_end() {
        let mut s = selector();
        s.set_category("PERSON").unwrap();
        let mut refiner = s.dispatch("出身地").unwrap();

        let Step::Continue(mut countries) = refiner.refine(None).unwrap() else {
            panic!("expected countries");
        };
        assert_eq!(countries.issuer(), "出身地");
        let japan = choose(&mut countries, &["日", "日本"]);
        let Step::Continue(mut prefs) = refiner.refine(Some(&japan)).unwrap() else {
            panic!("expected prefectures");
        };
        let tokyo = choose(&mut prefs, &["東", "東京都"]);
        let Step::Continue(mut wards) = refiner.refine(Some(&tokyo)).unwrap() else {
            panic!("expected wards");
        };
        let done = choose(&mut wards, &[DONE]);
        let Step::Finish(query) = refiner.refine(Some(&done)).unwrap() else {
            panic!("expected a query");
        };

        s.add_query(refiner.attribute(), query);
        let (attribute, query) = &s.queries()[0];
        assert_eq!(attribute, "出身地");
        assert!(query.matches("東京都出身"));
        assert!(!query.matches("大阪出身"));
        assert_eq!(query.render("夏目漱石"), "夏目漱石の出身地は?");
    }

    #[test]
    fn test_add_query_replaces_same_attribute() {
        let mut s = selector();
        s.add_query("出身地", Query::place("出身地", vec!["東京都".into()]));
        s.add_query("出身地", Query::place("出身地", vec!["大阪府".into()]));
        assert_eq!(s.queries().len(), 1);
        assert!(s.queries()[0].1.matches("大阪府"));
    }
}
