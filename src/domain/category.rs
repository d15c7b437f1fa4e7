use std::fmt;
use std::str::FromStr;

/// Which upstream serves a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Server-rendered HTML listing on the forum host.
    Forum,
    /// Date-ordered JSON search index.
    SearchIndex,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoryQueryType {
    Top,
    Ask,
    Show,
    New,
    Job,
    Best,
    Active,
}

impl StoryQueryType {
    pub const ALL: [StoryQueryType; 7] = [
        Self::Top,
        Self::Ask,
        Self::Show,
        Self::New,
        Self::Job,
        Self::Best,
        Self::Active,
    ];

    pub fn source(self) -> Source {
        match self {
            Self::Top | Self::Ask | Self::Show | Self::Best | Self::Active => Source::Forum,
            Self::New | Self::Job => Source::SearchIndex,
        }
    }

    /// Upstream path, relative to the category's host.
    pub fn path(self) -> &'static str {
        match self {
            Self::Top => "/news",
            Self::Ask => "/ask",
            Self::Show => "/show",
            Self::Best => "/best",
            Self::Active => "/active",
            Self::New | Self::Job => "/api/v1/search_by_date",
        }
    }

    /// Content tag for search-index categories.
    pub fn tag(self) -> Option<&'static str> {
        match self {
            Self::New => Some("story"),
            Self::Job => Some("job"),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Ask => "ask",
            Self::Show => "show",
            Self::New => "new",
            Self::Job => "job",
            Self::Best => "best",
            Self::Active => "active",
        }
    }
}

impl fmt::Display for StoryQueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StoryQueryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Unknown category: {}. Use one of: top, ask, show, new, job, best, active",
                    s
                )
            })
    }
}
