//! Refinement session use case
//!
//! Drives a [`CategorySelector`] through plain-text choices so that a caller
//! (REPL, test, another front end) only ever deals with a title and a list of
//! labels.
//!
//! # Stages
//!
//! 1. Category selection (`カテゴリの選択`)
//! 2. Attribute selection (`属性の選択`), with `完了` once a query exists
//! 3. Refinement steps of the chosen attribute's refiner
//! 4. Back to attribute selection after each finished query
//!
//! Choosing `完了` ends the session with the collected queries. Any error
//! leaves the session at the stage it was in, so the caller can re-prompt.

use crate::config::RefinementSettings;
use refiner_domain::{
    CandidateError, CandidateSet, Category, CategorySelector, Query, Refine, RefineError, Refiner,
    RefinerState, SelectorError, Selection, Step,
};
use thiserror::Error;
use tracing::{debug, info, warn};

pub const ATTRIBUTE_TITLE: &str = "属性の選択";
/// Label that ends attribute selection.
pub const COMPLETE_LABEL: &str = "完了";

#[derive(Error, Debug)]
pub enum SessionError {
    #[error(transparent)]
    Candidate(#[from] CandidateError),

    #[error(transparent)]
    Selector(#[from] SelectorError),

    #[error("{attribute}: {source}")]
    Refine {
        attribute: String,
        #[source]
        source: RefineError,
    },

    #[error("No attributes to refine for {0}")]
    NoAttributes(Category),

    #[error("Session has not started; step without a choice first")]
    NotStarted,

    #[error("Session already completed")]
    Completed,
}

impl SessionError {
    /// The same prompt can be answered again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            SessionError::Candidate(e) => e.is_recoverable(),
            SessionError::Selector(SelectorError::NotSupported { .. })
            | SessionError::Selector(SelectorError::UnknownAttribute(_))
            | SessionError::Selector(SelectorError::InvalidCategory(_)) => true,
            SessionError::Selector(_) => false,
            SessionError::Refine { source, .. } => source.is_recoverable(),
            SessionError::NoAttributes(_) | SessionError::NotStarted => true,
            SessionError::Completed => false,
        }
    }
}

/// What the caller should show next.
#[derive(Debug, Clone)]
pub enum StepOutput {
    Prompt { title: String, options: Vec<String> },
    Complete(Vec<(String, Query)>),
}

enum Stage {
    Start,
    Category(CandidateSet),
    Attribute(CandidateSet),
    Refining {
        refiner: Refiner,
        set: CandidateSet,
    },
    Complete,
}

/// Step-driven refinement session.
pub struct RefinementSession {
    selector: CategorySelector,
    settings: RefinementSettings,
    stage: Stage,
}

impl RefinementSession {
    pub fn new(selector: CategorySelector, settings: RefinementSettings) -> Self {
        Self {
            selector,
            settings,
            stage: Stage::Start,
        }
    }

    pub fn category(&self) -> Option<Category> {
        self.selector.category()
    }

    pub fn queries(&self) -> &[(String, Query)] {
        self.selector.queries()
    }

    pub fn is_complete(&self) -> bool {
        matches!(self.stage, Stage::Complete)
    }

    /// Attribute being refined, if any
    pub fn active_attribute(&self) -> Option<&str> {
        match &self.stage {
            Stage::Refining { refiner, .. } => Some(refiner.attribute()),
            _ => None,
        }
    }

    pub fn into_selector(self) -> CategorySelector {
        self.selector
    }

    /// Advances the session.
    ///
    /// `None` starts the session, or repeats the current prompt once started.
    pub fn step(&mut self, choice: Option<&str>) -> Result<StepOutput, SessionError> {
        let Some(choice) = choice else {
            return self.current_prompt();
        };
        let page_size = self.settings.page_size;
        match &mut self.stage {
            Stage::Start => Err(SessionError::NotStarted),
            Stage::Complete => Err(SessionError::Completed),
            Stage::Category(set) => match set.select(page_size, choice)? {
                Selection::Options(options) => Ok(prompt(set, options)),
                Selection::Chosen(candidate) => {
                    let name = candidate.reference();
                    let category: Category = name
                        .parse()
                        .map_err(|_| SelectorError::InvalidCategory(name.to_string()))?;
                    if self
                        .selector
                        .attributes_of(category, self.settings.omit_unsupported)
                        .is_empty()
                    {
                        warn!("{} has no attributes to refine", category.name());
                        return Err(SessionError::NoAttributes(category));
                    }
                    let category = self.selector.set_category(name)?;
                    info!("Category selected: {}", category.name());
                    self.enter_attributes()
                }
            },
            Stage::Attribute(set) => match set.select(page_size, choice)? {
                Selection::Options(options) => Ok(prompt(set, options)),
                Selection::Chosen(candidate) if candidate.key() == COMPLETE_LABEL => {
                    info!("Refinement complete: {} queries", self.selector.queries().len());
                    self.stage = Stage::Complete;
                    Ok(StepOutput::Complete(self.selector.queries().to_vec()))
                }
                Selection::Chosen(candidate) => self.start_refiner(candidate.reference()),
            },
            Stage::Refining { refiner, set } => {
                let candidate = match set.select(page_size, choice)? {
                    Selection::Options(options) => return Ok(prompt(set, options)),
                    Selection::Chosen(candidate) => candidate,
                };
                debug!("{}: chose '{}'", refiner.attribute(), candidate.key());
                match refiner.refine(Some(&candidate)) {
                    Ok(Step::Continue(mut next)) => {
                        let options = next.paginate(page_size);
                        let output = prompt(&next, options);
                        *set = next;
                        Ok(output)
                    }
                    Ok(Step::Finish(query)) => {
                        let attribute = refiner.attribute().to_string();
                        info!("Query finished: {}", query);
                        self.selector.add_query(attribute, query);
                        self.enter_attributes()
                    }
                    Err(source) => {
                        let attribute = refiner.attribute().to_string();
                        let failed = refiner.state() == RefinerState::Error;
                        if failed {
                            warn!("{}: refiner failed, back to attribute selection", attribute);
                            self.enter_attributes()?;
                        }
                        Err(SessionError::Refine { attribute, source })
                    }
                }
            }
        }
    }

    fn current_prompt(&mut self) -> Result<StepOutput, SessionError> {
        match &self.stage {
            Stage::Start => {
                let mut set = self.selector.categories()?;
                let options = set.paginate(self.settings.page_size);
                let output = prompt(&set, options);
                self.stage = Stage::Category(set);
                Ok(output)
            }
            Stage::Category(set) | Stage::Attribute(set) | Stage::Refining { set, .. } => {
                Ok(prompt(set, set.offered().to_vec()))
            }
            Stage::Complete => Ok(StepOutput::Complete(self.selector.queries().to_vec())),
        }
    }

    fn enter_attributes(&mut self) -> Result<StepOutput, SessionError> {
        let category = self.selector.category().ok_or(SelectorError::CategoryNotSet)?;
        let mut labels = self
            .selector
            .attributes_of(category, self.settings.omit_unsupported);
        if !self.selector.queries().is_empty() {
            labels.push(COMPLETE_LABEL.to_string());
        }
        let mut set = CandidateSet::from_labels(ATTRIBUTE_TITLE, labels)?;
        let options = set.paginate(self.settings.page_size);
        let output = prompt(&set, options);
        self.stage = Stage::Attribute(set);
        Ok(output)
    }

    fn start_refiner(&mut self, attribute: &str) -> Result<StepOutput, SessionError> {
        let mut refiner = self.selector.dispatch(attribute)?;
        info!("Refining attribute: {}", attribute);
        let step = refiner
            .refine(None)
            .map_err(|source| SessionError::Refine {
                attribute: attribute.to_string(),
                source,
            })?;
        match step {
            Step::Continue(mut set) => {
                let options = set.paginate(self.settings.page_size);
                let output = prompt(&set, options);
                self.stage = Stage::Refining { refiner, set };
                Ok(output)
            }
            Step::Finish(query) => {
                self.selector.add_query(attribute, query);
                self.enter_attributes()
            }
        }
    }
}

fn prompt(set: &CandidateSet, options: Vec<String>) -> StepOutput {
    StepOutput::Prompt {
        title: set.title().to_string(),
        options,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refiner_domain::{
        AttributeCatalog, DONE, DateParser, KanaOnlyReader, NEXT, Place, PlaceDirectory,
        PlaceLookupError, RefinerContext, RefinerKind, SKIP,
    };
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};

    /// 日本 → 東京都; fails while `offline` is set.
    #[derive(Default)]
    struct Places {
        offline: AtomicBool,
    }

    impl PlaceDirectory for Places {
        fn countries(&self) -> Result<Vec<Place>, PlaceLookupError> {
            Ok(vec![Place::new("jp", "日本")])
        }

        fn subdivisions(&self, subject: &str) -> Result<Vec<Place>, PlaceLookupError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(PlaceLookupError::Unavailable("timeout".into()));
            }
            Ok(match subject {
                "jp" => vec![Place::new("tokyo", "東京都")],
                _ => vec![],
            })
        }
    }

    fn session_with(places: Arc<Places>, page_size: usize) -> RefinementSession {
        let catalog = AttributeCatalog::new()
            .with(Category::Person, "生年月日", RefinerKind::Date)
            .with(Category::Person, "出身地", RefinerKind::Geo)
            .with(Category::Person, "職業", RefinerKind::Free);
        let context = RefinerContext::new(
            places,
            Arc::new(KanaOnlyReader),
            Arc::new(DateParser::japanese().unwrap()),
        );
        RefinementSession::new(
            CategorySelector::new(catalog, context),
            RefinementSettings::default().with_page_size(page_size),
        )
    }

    fn session() -> RefinementSession {
        session_with(Arc::new(Places::default()), 5000)
    }

    fn options(output: StepOutput) -> (String, Vec<String>) {
        match output {
            StepOutput::Prompt { title, options } => (title, options),
            StepOutput::Complete(_) => panic!("unexpected completion"),
        }
    }

    fn feed(session: &mut RefinementSession, choices: &[&str]) -> StepOutput {
        let mut last = session.step(None).unwrap();
        for choice in choices {
            last = session.step(Some(choice)).unwrap();
        }
        last
    }

    #[test]
    fn test_walk_through_to_completion() {
        let mut s = session();
        let (title, opts) = options(s.step(None).unwrap());
        assert_eq!(title, "カテゴリの選択");
        assert!(opts.contains(&"人名".to_string()));

        let (title, opts) = options(s.step(Some("人名")).unwrap());
        assert_eq!(title, ATTRIBUTE_TITLE);
        assert_eq!(opts, vec!["生年月日", "出身地", "職業"]);

        let (title, _) = options(s.step(Some("生年月日")).unwrap());
        assert_eq!(title, "日付の選択/方法の選択");
        assert_eq!(s.active_attribute(), Some("生年月日"));

        for choice in ["日付指定", SKIP, "9"] {
            s.step(Some(choice)).unwrap();
        }
        let (title, opts) = options(s.step(Some("1")).unwrap());
        assert_eq!(title, ATTRIBUTE_TITLE);
        assert_eq!(opts.last().map(String::as_str), Some(COMPLETE_LABEL));

        let StepOutput::Complete(queries) = s.step(Some(COMPLETE_LABEL)).unwrap() else {
            panic!("expected completion");
        };
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].0, "生年月日");
        assert!(queries[0].1.matches("2021-09-01"));
        assert!(s.is_complete());
        assert!(matches!(s.step(Some("人名")), Err(SessionError::Completed)));
    }

    #[test]
    fn test_geo_attribute() {
        let mut s = session();
        let out = feed(&mut s, &["人名", "出身地", "日", "日本", "東", "東京都", DONE]);
        let (title, _) = options(out);
        assert_eq!(title, ATTRIBUTE_TITLE);
        let query = &s.queries()[0].1;
        assert!(query.matches("東京都出身"));
        assert!(!query.matches("大阪出身"));
    }

    #[test]
    fn test_invalid_choice_keeps_stage() {
        let mut s = session();
        s.step(None).unwrap();
        let err = s.step(Some("動物")).unwrap_err();
        assert!(matches!(err, SessionError::Candidate(CandidateError::InvalidChoice(_))));
        assert!(err.is_recoverable());
        let (title, _) = options(s.step(None).unwrap());
        assert_eq!(title, "カテゴリの選択");
    }

    #[test]
    fn test_not_supported_keeps_attribute_stage() {
        let mut s = session();
        feed(&mut s, &["人名"]);
        let err = s.step(Some("職業")).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Selector(SelectorError::NotSupported { .. })
        ));
        let (title, _) = options(s.step(None).unwrap());
        assert_eq!(title, ATTRIBUTE_TITLE);
        assert!(s.step(Some("生年月日")).is_ok());
    }

    #[test]
    fn test_omit_unsupported_attributes() {
        let places = Arc::new(Places::default());
        let mut s = session_with(places, 5000);
        s.settings = RefinementSettings::default()
            .with_page_size(5000)
            .with_omit_unsupported(true);
        let (_, opts) = options(feed(&mut s, &["人名"]));
        assert_eq!(opts, vec!["生年月日", "出身地"]);
    }

    #[test]
    fn test_category_without_attributes_is_not_fixed() {
        let mut s = session();
        s.step(None).unwrap();

        let err = s.step(Some("企業名")).unwrap_err();
        assert!(matches!(err, SessionError::NoAttributes(Category::Company)));
        assert!(err.is_recoverable());
        assert_eq!(s.category(), None);

        let (title, _) = options(s.step(Some("人名")).unwrap());
        assert_eq!(title, ATTRIBUTE_TITLE);
        assert_eq!(s.category(), Some(Category::Person));
    }

    #[test]
    fn test_only_unsupported_attributes_counts_as_empty() {
        let catalog = AttributeCatalog::new().with(Category::City, "人口", RefinerKind::Number);
        let context = RefinerContext::new(
            Arc::new(Places::default()),
            Arc::new(KanaOnlyReader),
            Arc::new(DateParser::japanese().unwrap()),
        );
        let mut s = RefinementSession::new(
            CategorySelector::new(catalog, context),
            RefinementSettings::default().with_omit_unsupported(true),
        );
        s.step(None).unwrap();
        assert!(matches!(
            s.step(Some("市区町村名")),
            Err(SessionError::NoAttributes(Category::City))
        ));
        assert!(!s.is_complete());
    }

    #[test]
    fn test_source_unavailable_allows_retry() {
        let places = Arc::new(Places::default());
        let mut s = session_with(Arc::clone(&places), 5000);
        feed(&mut s, &["人名", "出身地", "日"]);

        places.offline.store(true, Ordering::SeqCst);
        let err = s.step(Some("日本")).unwrap_err();
        assert!(matches!(
            err,
            SessionError::Refine {
                source: RefineError::SourceUnavailable(_),
                ..
            }
        ));
        assert!(err.is_recoverable());
        assert_eq!(s.active_attribute(), Some("出身地"));

        places.offline.store(false, Ordering::SeqCst);
        let (title, _) = options(s.step(Some("日本")).unwrap());
        assert_eq!(title, "場所の選択/日本");
    }

    #[test]
    fn test_small_pages_offer_next() {
        let mut s = session_with(Arc::new(Places::default()), 3);
        let (_, first) = options(s.step(None).unwrap());
        assert_eq!(first.len(), 3);
        assert_eq!(first.last().map(String::as_str), Some(NEXT));
        let (_, second) = options(s.step(Some(NEXT)).unwrap());
        assert_eq!(second[0], "人名");
    }

    #[test]
    fn test_choice_before_start() {
        let mut s = session();
        assert!(matches!(s.step(Some("人名")), Err(SessionError::NotStarted)));
    }
}
