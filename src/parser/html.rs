//! Forum story-listing scraper.
//!
//! A listing is a container holding "athing" rows (rank, title, link) and,
//! in the same order, "subtext" rows (score, author, age, comment link).
//! The two are paired by position.

use std::sync::LazyLock;

use chrono::{DateTime, NaiveDateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::app::{HacklineError, Result};
use crate::domain::{Cursor, Page};
use crate::request::DEFAULT_FORUM_URL;

/// `yyyy-MM-dd'T'HH:mm:ss`
const AGE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// One story row as scraped, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct HtmlStory {
    pub id: Option<i64>,
    pub rank: Option<String>,
    pub title: Option<String>,
    /// Link target exactly as written in the page; may be forum-relative.
    pub url: Option<String>,
    pub vote_link: Option<String>,
    pub score: Option<i64>,
    pub age: Option<String>,
    pub date: DateTime<Utc>,
    pub by: Option<String>,
    pub descendants: Option<i64>,
}

impl HtmlStory {
    fn new() -> Self {
        Self {
            id: None,
            rank: None,
            title: None,
            url: None,
            vote_link: None,
            score: None,
            age: None,
            date: Utc::now(),
            by: None,
            descendants: None,
        }
    }
}

struct Selectors {
    item_list: Selector,
    athing: Selector,
    subtext: Selector,
    rank: Selector,
    title_link: Selector,
    vote_link: Selector,
    more_link: Selector,
    anchor: Selector,
}

static SELECTORS: LazyLock<std::result::Result<Selectors, String>> = LazyLock::new(|| {
    Selectors::new().map_err(|e| {
        tracing::error!("Listing selectors failed to compile: {}", e);
        e.to_string()
    })
});

impl Selectors {
    fn new() -> Result<Self> {
        Ok(Self {
            item_list: selector(".itemlist, #bigbox")?,
            athing: selector(".athing")?,
            subtext: selector(".subtext")?,
            rank: selector(".rank")?,
            title_link: selector("a.storylink, .titleline > a")?,
            vote_link: selector(".votelinks a")?,
            more_link: selector(".morelink")?,
            anchor: selector("a")?,
        })
    }
}

fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| HacklineError::Parsing(format!("{}: {:?}", css, e)))
}

/// Parse a listing page into story rows and the cursor for the next page.
///
/// A page without a listing container is an empty page, not an error.
pub fn parse_story_page(html: &str) -> Result<Page<HtmlStory>> {
    let selectors = SELECTORS
        .as_ref()
        .map_err(|e| HacklineError::Parsing(e.clone()))?;
    let document = Html::parse_document(html);

    let Some(list) = document.select(&selectors.item_list).next() else {
        tracing::debug!("No listing container in page");
        return Ok(Page::empty());
    };

    let next_cursor = more_link_cursor(list, selectors);
    let things: Vec<ElementRef> = list.select(&selectors.athing).collect();
    let subtexts: Vec<ElementRef> = list.select(&selectors.subtext).collect();

    if things.len() != subtexts.len() {
        tracing::warn!(
            "Unrecognized listing layout: {} item rows, {} subtext rows",
            things.len(),
            subtexts.len()
        );
        return Ok(Page {
            items: Vec::new(),
            next_cursor,
        });
    }

    let items = things
        .into_iter()
        .zip(subtexts)
        .map(|(thing, subtext)| {
            let mut story = HtmlStory::new();
            read_item_row(thing, selectors, &mut story);
            read_subtext_row(subtext, &mut story);
            story
        })
        .collect();

    Ok(Page { items, next_cursor })
}

fn read_item_row(row: ElementRef, selectors: &Selectors, story: &mut HtmlStory) {
    story.id = row.value().id().and_then(|id| id.parse().ok());
    story.rank = row.select(&selectors.rank).next().map(element_text);

    if let Some(link) = row.select(&selectors.title_link).next() {
        story.title = Some(element_text(link));
        story.url = link.value().attr("href").map(String::from);
    }

    story.vote_link = row
        .select(&selectors.vote_link)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(String::from);
}

fn read_subtext_row(row: ElementRef, story: &mut HtmlStory) {
    for el in row.descendants().skip(1).filter_map(ElementRef::wrap) {
        let value = el.value();
        if has_class(el, "score") {
            story.score = leading_int(&element_text(el));
        } else if has_class(el, "age") {
            story.age = Some(element_text(el));
            story.date = value
                .attr("title")
                .and_then(parse_age_date)
                .unwrap_or_else(|| {
                    tracing::warn!("Unparsable age timestamp on story {:?}", story.id);
                    Utc::now()
                });
        } else if has_class(el, "hnuser") {
            story.by = Some(element_text(el));
        } else if value.name() == "a" && value.attr("class").unwrap_or("").is_empty() {
            if let Some(count) = comment_count(&element_text(el)) {
                story.descendants = Some(count);
            }
        }
    }
}

/// Comment count from the subtext link text.
///
/// "discussion" means no comments yet; "12\u{a0}comments" means 12.
/// Any other link ("hide", "past", the age link) yields `None`.
fn comment_count(text: &str) -> Option<i64> {
    if text == "discussion" {
        return Some(0);
    }
    let cleaned = text.replace('\u{a0}', " ");
    let number = cleaned
        .strip_suffix("comments")
        .or_else(|| cleaned.strip_suffix("comment"))?;
    number.trim().parse().ok()
}

fn leading_int(text: &str) -> Option<i64> {
    let digits: String = text.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().ok()
}

/// Age titles look like `2024-01-01T12:00:00`, sometimes followed by the epoch.
fn parse_age_date(title: &str) -> Option<DateTime<Utc>> {
    let stamp = title.split_whitespace().next()?;
    NaiveDateTime::parse_from_str(stamp, AGE_DATE_FORMAT)
        .ok()
        .map(|naive| naive.and_utc())
}

fn more_link_cursor(list: ElementRef, selectors: &Selectors) -> Option<Cursor> {
    let more = list.select(&selectors.more_link).next()?;
    let href = if more.value().name() == "a" {
        more.value().attr("href")
    } else {
        more.select(&selectors.anchor)
            .next()
            .and_then(|a| a.value().attr("href"))
    }?;

    let url = Url::parse(DEFAULT_FORUM_URL).ok()?.join(href).ok()?;
    if url.query().is_none() {
        return None;
    }
    Some(url.query_pairs().into_owned().collect())
}

fn has_class(el: ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

fn element_text(el: ElementRef) -> String {
    el.text().collect::<String>().trim().to_string()
}
