use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use super::app::{MessageType, StatusMessage};
use super::layout::AppLayout;
use super::timestamps::{format_date, format_timestamp};
use crate::loader::Catalog;
use crate::models::{ArxivPaper, RepoEntry};
use crate::sort::SortState;
use crate::utils::{abs_url, single_line, strip_ansi_codes};

/// Everything the renderer needs besides the catalog itself
pub struct RenderState<'a> {
    pub input: &'a str,
    pub selected_idx: usize,
    pub sort: SortState,
    pub status_message: Option<&'a StatusMessage>,
}

/// Render the entire UI
pub fn render_ui(frame: &mut Frame, catalog: &Catalog, visible: &[usize], state: &RenderState) {
    let layout = AppLayout::new(frame.area());

    render_input(frame, layout.input_area, state.input);
    render_results_list(frame, layout.results_area, catalog, visible, state.selected_idx);

    let selected = visible.get(state.selected_idx).map(|&i| &catalog.entries[i]);
    let paper = selected.and_then(|entry| catalog.paper_for(entry));
    render_detail(frame, layout.detail_area, selected, paper);

    render_status_bar(frame, layout.status_area, visible.len(), catalog.len(), state);
}

fn render_input(frame: &mut Frame, area: Rect, input: &str) {
    let content = if input.is_empty() {
        Line::from(Span::styled(
            "type to search, or conditions | text",
            Style::default().fg(Color::Rgb(113, 113, 122)),
        ))
    } else {
        Line::from(Span::raw(input))
    };

    let paragraph = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
            .title(" Search "),
    );

    frame.render_widget(paragraph, area);
}

fn render_results_list(
    frame: &mut Frame,
    area: Rect,
    catalog: &Catalog,
    visible: &[usize],
    selected_idx: usize,
) {
    let items: Vec<ListItem> = visible
        .iter()
        .enumerate()
        .map(|(idx, &entry_idx)| {
            let entry = &catalog.entries[entry_idx];
            let content = result_row(entry, catalog.paper_for(entry));

            let style = if idx == selected_idx {
                Style::default()
                    .fg(Color::Rgb(250, 250, 250)) // Bright text
                    .bg(Color::Rgb(16, 185, 129)) // Emerald background
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Rgb(113, 113, 122)) // Muted text
            };

            ListItem::new(content).style(style)
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
            .title(" Repositories "),
    );

    frame.render_widget(list, area);
}

/// One list row: key, stars, language, tags, arXiv marker, starred-at age
fn result_row(entry: &RepoEntry, paper: Option<&ArxivPaper>) -> String {
    let meta = &entry.repo.metadata;
    let mut segments = vec![format!("★{}", meta.stars)];

    segments.push(meta.language.as_deref().map(single_line).unwrap_or_else(|| "-".to_string()));

    if !entry.repo.lists.is_empty() {
        segments.push(format!("[{}]", single_line(&entry.repo.lists.join(","))));
    }

    if let Some(paper) = paper {
        match paper.primary_category() {
            Some(category) => segments.push(format!("arXiv:{}", single_line(category))),
            None => segments.push("arXiv".to_string()),
        }
    }

    if let Some(starred_at) = &meta.starred_at {
        segments.push(format_timestamp(starred_at));
    }

    format!("{} | {}", single_line(&entry.key), segments.join(" | "))
}

fn render_detail(
    frame: &mut Frame,
    area: Rect,
    entry: Option<&RepoEntry>,
    paper: Option<&ArxivPaper>,
) {
    let content = if let Some(entry) = entry {
        let meta = &entry.repo.metadata;
        let mut lines = vec![
            Line::from(Span::styled(
                single_line(&entry.key),
                Style::default().fg(Color::Rgb(250, 250, 250)).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            label_line(
                "Language",
                meta.language.as_deref().map(single_line).unwrap_or_else(|| "-".to_string()),
            ),
            label_line("Stars", meta.stars.to_string()),
            label_line("Forks", meta.forks.to_string()),
            label_line("Open issues", meta.open_issues.to_string()),
        ];

        if let Some(homepage) = &meta.homepage
            && !homepage.is_empty()
        {
            lines.push(label_line("Homepage", single_line(homepage)));
        }

        lines.push(label_line("Created", optional_date(&meta.created_at)));
        lines.push(label_line("Updated", optional_date(&meta.updated_at)));
        lines.push(label_line("Pushed", optional_date(&meta.pushed_at)));
        lines.push(label_line("Starred", optional_date(&meta.starred_at)));

        if !entry.repo.lists.is_empty() {
            lines.push(label_line("Lists", single_line(&entry.repo.lists.join(", "))));
        }

        if let Some(description) = &meta.description
            && !description.is_empty()
        {
            lines.push(Line::from(""));
            for line in strip_ansi_codes(description).lines() {
                lines.push(Line::from(line.to_string()));
            }
        }

        if let Some(paper) = paper {
            append_paper_section(&mut lines, entry, paper);
        }

        Text::from(lines)
    } else {
        Text::from("No repository selected")
    };

    let paragraph = Paragraph::new(content)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Rgb(113, 113, 122)))
                .title(" Details "),
        )
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

fn append_paper_section(lines: &mut Vec<Line<'static>>, entry: &RepoEntry, paper: &ArxivPaper) {
    lines.push(Line::from(""));

    let id = entry.arxiv_id.clone().unwrap_or_default();
    lines.push(Line::from(Span::styled(
        format!("arXiv {}", id),
        Style::default().fg(Color::Rgb(16, 185, 129)).add_modifier(Modifier::BOLD),
    )));

    if !paper.title.is_empty() {
        lines.push(label_line("Title", single_line(&paper.title)));
    }
    if !paper.authors.is_empty() {
        lines.push(label_line("Authors", single_line(&paper.authors.join(", "))));
    }
    if let Some(published) = &paper.published {
        lines.push(label_line("Published", format_date(published)));
    }
    if let Some(updated) = &paper.updated {
        lines.push(label_line("Updated", format_date(updated)));
    }
    if !paper.categories.is_empty() {
        lines.push(label_line("Categories", single_line(&paper.categories.join(", "))));
    }
    if !id.is_empty() {
        lines.push(label_line("Link", abs_url(&id)));
    }

    if !paper.summary.is_empty() {
        lines.push(Line::from(""));
        for line in strip_ansi_codes(&paper.summary).lines() {
            lines.push(Line::from(line.to_string()));
        }
    }
}

fn label_line(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}: ", label), Style::default().fg(Color::Rgb(113, 113, 122))),
        Span::raw(value),
    ])
}

fn optional_date(timestamp: &Option<chrono::DateTime<chrono::Utc>>) -> String {
    timestamp.as_ref().map(format_date).unwrap_or_else(|| "-".to_string())
}

fn render_status_bar(
    frame: &mut Frame,
    area: Rect,
    visible_count: usize,
    total_count: usize,
    state: &RenderState,
) {
    let (status_text, style) = if let Some(message) = state.status_message {
        let color = match message.message_type {
            MessageType::Error => Color::Rgb(239, 68, 68), // Red
            MessageType::Info => Color::Rgb(250, 250, 250),
        };
        (
            format!(" {} ", message.text),
            Style::default().fg(color).bg(Color::Rgb(24, 24, 27)),
        )
    } else {
        let mut parts = vec![
            format!("{}/{} repositories", visible_count, total_count),
            format!("sort: {} {}", state.sort.field.as_str(), state.sort.direction.as_str()),
        ];

        if visible_count > 0 {
            parts.push(format!("entry {}/{}", state.selected_idx + 1, visible_count));
        }

        parts.push("Enter: conditions".to_string());
        parts.push("^S: sort".to_string());
        parts.push("^D: direction".to_string());
        parts.push("^Y: copy".to_string());
        parts.push("^C: quit".to_string());

        (
            format!(" {} ", parts.join(" | ")),
            Style::default().fg(Color::Rgb(250, 250, 250)).bg(Color::Rgb(24, 24, 27)),
        )
    };

    let paragraph = Paragraph::new(status_text).style(style);

    frame.render_widget(paragraph, area);
}
