//! News article entity.

use chrono::{DateTime, Utc};

/// Stable identifier for an article, unique for the session.
///
/// The same id keys both the feed card and the detail view, which is what
/// anchors the zoom transition to the right card.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ArticleId(String);

impl ArticleId {
    /// Creates a new article id.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ArticleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Accent used for a highlight glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightTone {
    /// Green accent.
    Green,
    /// Blue accent.
    Blue,
    /// Orange accent.
    Orange,
    /// Purple accent.
    Purple,
}

/// A bullet shown in the "Key Highlights" section of the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Highlight {
    /// Leading glyph.
    pub icon: &'static str,
    /// Highlight text.
    pub text: &'static str,
    /// Glyph accent.
    pub tone: HighlightTone,
}

/// Titled block of prose in the detail view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Section heading.
    pub title: &'static str,
    /// Section body, paragraphs separated by blank lines.
    pub body: &'static str,
}

/// Immutable news article.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    id: ArticleId,
    title: String,
    subtitle: String,
    body: String,
    image_url: Option<String>,
    author: String,
    published_at: DateTime<Utc>,
}

impl Article {
    /// Creates a new article without an image.
    #[must_use]
    pub fn new(
        id: impl Into<ArticleId>,
        title: impl Into<String>,
        subtitle: impl Into<String>,
        body: impl Into<String>,
        author: impl Into<String>,
        published_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            subtitle: subtitle.into(),
            body: body.into(),
            image_url: None,
            author: author.into(),
            published_at,
        }
    }

    /// Sets the hero image URL.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Returns the article id.
    #[must_use]
    pub const fn id(&self) -> &ArticleId {
        &self.id
    }

    /// Returns the headline.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the subtitle.
    #[must_use]
    pub fn subtitle(&self) -> &str {
        &self.subtitle
    }

    /// Returns the article body.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Returns the hero image URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the author name.
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Returns the publication timestamp.
    #[must_use]
    pub const fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    /// Formats the publication time relative to `now`, e.g. "2 hr ago".
    #[must_use]
    pub fn relative_age(&self, now: DateTime<Utc>) -> String {
        let elapsed = now.signed_duration_since(self.published_at);
        if elapsed.num_seconds() < 60 {
            "just now".to_string()
        } else if elapsed.num_minutes() < 60 {
            format!("{} min ago", elapsed.num_minutes())
        } else if elapsed.num_hours() < 24 {
            format!("{} hr ago", elapsed.num_hours())
        } else {
            format!("{} days ago", elapsed.num_days())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn article(published_at: DateTime<Utc>) -> Article {
        Article::new("a1", "Title", "Sub", "Body", "Author", published_at)
    }

    #[test]
    fn test_builder_sets_image_url() {
        let now = Utc::now();
        let plain = article(now);
        assert_eq!(plain.image_url(), None);

        let with_image = article(now).with_image_url("https://x/1.png");
        assert_eq!(with_image.image_url(), Some("https://x/1.png"));
        assert_eq!(with_image.id().as_str(), "a1");
    }

    #[test]
    fn test_relative_age() {
        let now = Utc::now();
        assert_eq!(article(now).relative_age(now), "just now");
        assert_eq!(
            article(now - Duration::minutes(5)).relative_age(now),
            "5 min ago"
        );
        assert_eq!(
            article(now - Duration::hours(2)).relative_age(now),
            "2 hr ago"
        );
        assert_eq!(
            article(now - Duration::days(3)).relative_age(now),
            "3 days ago"
        );
    }
}
