use pulldown_cmark::{html, Event, Options, Parser};

const WORDS_PER_MINUTE: f32 = 200.0;

/// Convert Markdown into HTML with common extensions enabled.
pub fn markdown_to_html(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(content, options);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Minutes at 200 words per minute, never less than one.
pub fn estimate_read_minutes(content: &str) -> u32 {
    let words = content.split_whitespace().count();
    let minutes = (words as f32 / WORDS_PER_MINUTE).ceil() as u32;
    minutes.max(1)
}

pub fn reading_time_label(minutes: u32) -> String {
    format!("{} min read", minutes.max(1))
}

/// First `max_chars` characters of the rendered text, cut at a word boundary.
pub fn plain_excerpt(content: &str, max_chars: usize) -> String {
    let mut text = String::new();
    for event in Parser::new(content) {
        match event {
            Event::Text(value) | Event::Code(value) => text.push_str(&value),
            Event::SoftBreak | Event::HardBreak | Event::End(_) => text.push(' '),
            _ => {},
        }
    }
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }

    let cut: String = collapsed.chars().take(max_chars).collect();
    let trimmed = match cut.rfind(' ') {
        Some(index) if index > 0 => &cut[..index],
        _ => cut.as_str(),
    };
    format!("{}...", trimmed.trim_end())
}

#[cfg(test)]
mod tests {
    use super::{estimate_read_minutes, markdown_to_html, plain_excerpt, reading_time_label};

    #[test]
    fn estimate_read_minutes_rounds_up() {
        assert_eq!(estimate_read_minutes(""), 1);
        assert_eq!(estimate_read_minutes("word"), 1);
        let words = vec!["word"; 201].join(" ");
        assert_eq!(estimate_read_minutes(&words), 2);
    }

    #[test]
    fn reading_time_label_never_shows_zero() {
        assert_eq!(reading_time_label(0), "1 min read");
        assert_eq!(reading_time_label(5), "5 min read");
    }

    #[test]
    fn markdown_renders_headings_and_tables() {
        let html = markdown_to_html("# Title\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<table>"));
        assert!(markdown_to_html("   ").is_empty());
    }

    #[test]
    fn plain_excerpt_strips_markup_and_truncates() {
        assert_eq!(plain_excerpt("## Hello *world*", 50), "Hello world");
        let excerpt = plain_excerpt("one two three four five", 12);
        assert_eq!(excerpt, "one two...");
    }
}
