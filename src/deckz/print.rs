use crate::styles;
use chrono::{DateTime, Utc};
use colored::Colorize;
use deckz::api::{CmdMessage, MessageLevel, RenderedSlide};
use deckz::config::DeckzConfig;
use deckz::deck::DeckState;
use deckz::dispatch::{Axis, Instruction, ListStyle, TextRole};
use deckz::index::DisplayDeck;
use deckz::themes::Theme;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const COUNTS_WIDTH: usize = 22;
const CURRENT_MARKER: &str = "▸";
const INDENT: &str = "  ";

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(crate) fn print_decks(decks: &[DisplayDeck]) {
    if decks.is_empty() {
        println!("No decks found.");
        return;
    }

    for dd in decks {
        let idx_str = format!("{}. ", dd.index);
        let state = &dd.deck.state;
        let counts = format!(
            "{:>width$}",
            format!("{} cards {} slides", state.outlines.len(), state.slides.len()),
            width = COUNTS_WIDTH
        );
        let time_ago = format_time_ago(dd.deck.metadata.updated_at);

        let fixed_width = INDENT.width() + idx_str.width() + COUNTS_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);
        let title = truncate_to_width(&dd.deck.metadata.title, available);
        let padding = available.saturating_sub(title.width());

        println!(
            "{}{}{}{}{}{}",
            INDENT,
            styles::INDEX.apply_to(&idx_str),
            title,
            " ".repeat(padding),
            counts.dimmed(),
            styles::TIME.apply_to(time_ago)
        );
    }
}

pub(crate) fn print_deck_header(dd: &DisplayDeck) {
    println!(
        "{} {}",
        styles::INDEX.apply_to(format!("{}.", dd.index)),
        styles::TITLE.apply_to(&dd.deck.metadata.title)
    );
}

pub(crate) fn print_outlines(state: &DeckState) {
    if state.outlines.is_empty() {
        println!("{}", "No outline cards.".dimmed());
        return;
    }
    for card in &state.outlines {
        let idx_str = format!("{:>3}. ", card.order);
        let available = LINE_WIDTH.saturating_sub(INDENT.width() + idx_str.width());
        println!(
            "{}{}{}",
            INDENT,
            styles::INDEX.apply_to(idx_str),
            truncate_to_width(&card.title, available)
        );
    }
}

pub(crate) fn print_slides(state: &DeckState) {
    if state.slides.is_empty() {
        println!("{}", "No slides.".dimmed());
        return;
    }
    for (i, slide) in state.ordered_slides().iter().enumerate() {
        let is_current = i == state.current_slide;
        let marker = if is_current { CURRENT_MARKER } else { " " };
        let idx_str = format!("{:>3}. ", i + 1);
        let layout = format!(" [{}]", slide.layout);
        let available =
            LINE_WIDTH.saturating_sub(2 + idx_str.width() + layout.width());
        let name = truncate_to_width(&slide.slide_name, available);

        if is_current {
            println!(
                "{} {}{}{}",
                styles::CURRENT.apply_to(marker),
                styles::INDEX.apply_to(idx_str),
                styles::CURRENT.apply_to(name),
                layout.dimmed()
            );
        } else {
            println!(
                "{} {}{}{}",
                marker,
                styles::INDEX.apply_to(idx_str),
                name,
                layout.dimmed()
            );
        }
    }
}

pub(crate) fn print_instruction(rendered: &RenderedSlide) {
    println!(
        "{} {}",
        styles::INDEX.apply_to(format!("{}.", rendered.position)),
        styles::TITLE.apply_to(&rendered.slide_name)
    );
    let mut lines = Vec::new();
    instruction_lines(&rendered.instruction, 1, &mut lines);
    for line in lines {
        println!("{}", line);
    }
}

fn instruction_lines(instruction: &Instruction, depth: usize, out: &mut Vec<String>) {
    let pad = INDENT.repeat(depth);
    let available = LINE_WIDTH.saturating_sub(pad.width());
    let id = |id: &str| styles::NODE_ID.apply_to(format!("#{}", id)).to_string();

    match instruction {
        Instruction::Stack {
            id: node_id,
            axis,
            resizable,
            children,
        } => {
            let label = match (axis, resizable) {
                (Axis::Vertical, _) => "column",
                (Axis::Horizontal, false) => "row",
                (Axis::Horizontal, true) => "resizable row",
            };
            out.push(format!(
                "{}{} {}",
                pad,
                styles::CONTAINER.apply_to(label),
                id(node_id)
            ));
            for child in children {
                instruction_lines(child, depth + 1, out);
            }
        }
        Instruction::DropZone {
            container_id,
            index,
        } => out.push(format!(
            "{}{}",
            pad,
            styles::DROP_ZONE.apply_to(format!("┄ drop {}@{}", container_id, index))
        )),
        Instruction::TextBlock {
            id: node_id,
            role,
            text,
            placeholder,
        } => {
            let body = if text.is_empty() {
                let hint = placeholder.as_deref().unwrap_or("(empty)");
                styles::PLACEHOLDER.apply_to(hint.to_string()).to_string()
            } else {
                let text = truncate_to_width(&text.replace('\n', " "), available);
                match role {
                    TextRole::Title | TextRole::Heading(_) => {
                        styles::TITLE.apply_to(text).to_string()
                    }
                    TextRole::Quote | TextRole::Blockquote => format!("“{}”", text),
                    TextRole::Text | TextRole::Paragraph => text,
                }
            };
            out.push(format!("{}{} {} {}", pad, role_label(role), body, id(node_id)));
        }
        Instruction::Image {
            id: node_id,
            src,
            alt,
        } => out.push(format!(
            "{}image {} {}{}",
            pad,
            truncate_to_width(src, available / 2),
            alt.as_deref().map(|a| format!("({}) ", a)).unwrap_or_default(),
            id(node_id)
        )),
        Instruction::Table { id: node_id, rows } => {
            out.push(format!("{}table {}", pad, id(node_id)));
            let cell_pad = INDENT.repeat(depth + 1);
            for row in rows {
                out.push(format!(
                    "{}│ {} │",
                    cell_pad,
                    truncate_to_width(&row.join(" │ "), available)
                ));
            }
        }
        Instruction::List {
            id: node_id,
            style,
            items,
        } => {
            out.push(format!("{}list {}", pad, id(node_id)));
            let item_pad = INDENT.repeat(depth + 1);
            for (i, item) in items.iter().enumerate() {
                let bullet = match style {
                    ListStyle::Numbered => format!("{}.", i + 1),
                    ListStyle::Bulleted => "•".to_string(),
                    ListStyle::Todo => "☐".to_string(),
                };
                out.push(format!(
                    "{}{} {}",
                    item_pad,
                    bullet,
                    truncate_to_width(item, available)
                ));
            }
        }
        Instruction::Code {
            id: node_id,
            language,
            code,
        } => {
            out.push(format!(
                "{}code{} {}",
                pad,
                language.as_deref().map(|l| format!(" ({})", l)).unwrap_or_default(),
                id(node_id)
            ));
            let code_pad = INDENT.repeat(depth + 1);
            for line in code.lines() {
                out.push(format!(
                    "{}{}",
                    code_pad,
                    truncate_to_width(line, available).dimmed()
                ));
            }
        }
        Instruction::Link {
            id: node_id,
            href,
            text,
        } => out.push(format!(
            "{}link {} <{}> {}",
            pad,
            text.underline(),
            href,
            id(node_id)
        )),
        Instruction::Divider { id: node_id } => out.push(format!(
            "{}{} {}",
            pad,
            "─".repeat(available.min(40)).dimmed(),
            id(node_id)
        )),
        Instruction::Callout {
            id: node_id,
            kind,
            text,
        } => out.push(format!(
            "{}[{}] {} {}",
            pad,
            kind.as_str(),
            truncate_to_width(text, available),
            id(node_id)
        )),
        Instruction::Button {
            id: node_id,
            label,
            link,
        } => out.push(format!(
            "{}[ {} ]{} {}",
            pad,
            label,
            link.as_deref().map(|l| format!(" → {}", l)).unwrap_or_default(),
            id(node_id)
        )),
        Instruction::TableOfContents {
            id: node_id,
            entries,
        } => {
            out.push(format!("{}contents {}", pad, id(node_id)));
            let entry_pad = INDENT.repeat(depth + 1);
            for (i, entry) in entries.iter().enumerate() {
                out.push(format!("{}{}. {}", entry_pad, i + 1, entry));
            }
        }
        Instruction::Empty => out.push(format!("{}{}", pad, styles::EMPTY.apply_to("(empty)"))),
    }
}

fn role_label(role: &TextRole) -> String {
    match role {
        TextRole::Title => "title".to_string(),
        TextRole::Heading(level) => format!("h{}", level),
        TextRole::Text => "text".to_string(),
        TextRole::Paragraph => "paragraph".to_string(),
        TextRole::Quote => "quote".to_string(),
        TextRole::Blockquote => "blockquote".to_string(),
    }
}

pub(crate) fn print_themes(themes: &[Theme]) {
    for theme in themes {
        println!(
            "{}{} {} {}",
            INDENT,
            styles::TITLE.apply_to(format!("{:<10}", theme.name)),
            format!("{:<5}", theme.theme_type.to_string()).dimmed(),
            format!(
                "font {} on {}, accent {}",
                theme.font_color, theme.slide_background_color, theme.accent_color
            )
            .dimmed()
        );
    }
}

pub(crate) fn print_config(config: &DeckzConfig) {
    for key in DeckzConfig::KEYS {
        let value = config.get(key).unwrap_or_default();
        println!("{} = {}", key, value);
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
