use html_escape::decode_html_entities;

use crate::app::{AppContext, Result};
use crate::domain::{Comment, Story, StoryQueryType};

pub async fn list_stories(ctx: &AppContext, category: StoryQueryType, pages: usize) -> Result<()> {
    let mut rank = 0;

    for page in 0..pages.max(1) {
        let stories = ctx.stories.stories(category, page == 0).await?;
        for story in &stories {
            rank += 1;
            print_story(rank, story);
        }

        if !ctx.stories.has_more(category) {
            break;
        }
    }

    if rank == 0 {
        println!("No stories");
    }
    Ok(())
}

pub async fn search(ctx: &AppContext, text: &str) -> Result<()> {
    let stories = ctx.client.search_stories(text).await?;

    if stories.is_empty() {
        println!("No results for {:?}", text);
        return Ok(());
    }

    for (i, story) in stories.iter().enumerate() {
        print_story(i + 1, story);
    }
    Ok(())
}

pub async fn show_comments(ctx: &AppContext, story_id: i64) -> Result<()> {
    let roots = ctx.client.comments(story_id).await?;

    let lines: Vec<String> = roots
        .iter()
        .flat_map(Comment::flatten)
        .filter(|c| c.by.is_some())
        .map(comment_line)
        .collect();

    if lines.is_empty() {
        println!("No comments");
        return Ok(());
    }

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}

fn print_story(rank: usize, story: &Story) {
    println!(
        "{:>3}. [{}] {}",
        rank,
        story.story_type().as_str(),
        story.title
    );
    println!("     {} | {} comments", story.info(), story.descendants);
    if let Some(url) = &story.url {
        println!("     {}", url);
    }
}

fn comment_line(comment: &Comment) -> String {
    let indent = "  ".repeat(comment.tier);
    let text = comment.text.as_deref().map(plain_text).unwrap_or_default();
    format!("{}{}\n{}  {}", indent, comment.info(), indent, text)
}

/// Comment bodies arrive as HTML fragments; flatten them to one line of text.
fn plain_text(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.replace("<p>", " ").chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    decode_html_entities(out.trim()).to_string()
}
