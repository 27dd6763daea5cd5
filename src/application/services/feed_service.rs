//! Read-only access to the article catalogue.

use crate::domain::entities::{Article, ArticleId, Highlight, Section};

use crate::application::sample_articles::{HIGHLIGHTS, SECTIONS};

/// Number of related articles shown at the end of the detail view.
pub const RELATED_LIMIT: usize = 3;

/// Serves articles to the feed and detail screens.
#[derive(Debug, Clone)]
pub struct FeedService {
    articles: Vec<Article>,
}

impl FeedService {
    /// Creates a service over a fixed article set.
    #[must_use]
    pub const fn new(articles: Vec<Article>) -> Self {
        Self { articles }
    }

    /// All articles in feed order.
    #[must_use]
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Number of articles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.articles.len()
    }

    /// Returns true if the feed is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.articles.is_empty()
    }

    /// Looks up an article by id.
    #[must_use]
    pub fn find(&self, id: &ArticleId) -> Option<&Article> {
        self.articles.iter().find(|a| a.id() == id)
    }

    /// Up to [`RELATED_LIMIT`] other articles, in feed order.
    #[must_use]
    pub fn related(&self, id: &ArticleId) -> Vec<&Article> {
        self.articles
            .iter()
            .filter(|a| a.id() != id)
            .take(RELATED_LIMIT)
            .collect()
    }

    /// "Key Highlights" bullets.
    #[must_use]
    pub const fn highlights(&self) -> &'static [Highlight] {
        HIGHLIGHTS
    }

    /// Extra prose sections.
    #[must_use]
    pub const fn sections(&self) -> &'static [Section] {
        SECTIONS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sample_articles::sample_articles;
    use chrono::Utc;

    fn service() -> FeedService {
        FeedService::new(sample_articles(Utc::now()))
    }

    #[test]
    fn test_find() {
        let service = service();
        let found = service.find(&ArticleId::new("a2"));
        assert_eq!(
            found.map(Article::title),
            Some("Climate Solutions Take Center Stage")
        );
        assert!(service.find(&ArticleId::new("missing")).is_none());
    }

    #[test]
    fn test_related_excludes_selected() {
        let service = service();
        let related = service.related(&ArticleId::new("a1"));

        assert_eq!(related.len(), RELATED_LIMIT);
        assert!(related.iter().all(|a| a.id().as_str() != "a1"));
    }

    #[test]
    fn test_related_on_small_feed() {
        let service = FeedService::new(sample_articles(Utc::now()).into_iter().take(2).collect());
        let related = service.related(&ArticleId::new("a1"));
        assert_eq!(related.len(), 1);
        assert_eq!(related[0].id().as_str(), "a2");
    }
}
