//! Panels for the interactive shell.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};
use ratatui::Frame;

use crate::formula::{DamageInputs, DamageKind};

use super::{display_name, SelectList, StatField};

fn panel_block(title: &str, focused: bool) -> Block<'_> {
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Blue)
    };
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style)
}

/// Render one selection list. `prettify` swaps stored underscores for
/// spaces; the underlying items keep their stored form.
pub fn render_select_list(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    list: &mut SelectList,
    focused: bool,
    prettify: bool,
) {
    let items: Vec<ListItem> = list
        .items
        .iter()
        .map(|name| {
            let shown = if prettify {
                display_name(name)
            } else {
                name.clone()
            };
            ListItem::new(shown)
        })
        .collect();

    let widget = List::new(items)
        .block(panel_block(title, focused))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    frame.render_stateful_widget(widget, area, &mut list.state);
}

/// Render the stat entry form. The cursor row is highlighted only while
/// the form has focus.
pub fn render_stats(
    frame: &mut Frame,
    area: Rect,
    inputs: &DamageInputs,
    cursor: StatField,
    focused: bool,
) {
    let rows: [(StatField, &str, String); 6] = [
        (
            StatField::CutDamage,
            "Cut Damage",
            format!("{:.3}", inputs.cut_damage),
        ),
        (
            StatField::BluntDamage,
            "Blunt Damage",
            format!("{:.3}", inputs.blunt_damage),
        ),
        (
            StatField::Strength,
            "Strength",
            inputs.strength.to_string(),
        ),
        (
            StatField::Dexterity,
            "Dexterity",
            inputs.dexterity.to_string(),
        ),
        (
            StatField::WeaponSkill,
            "Weapon Skill",
            inputs.weapon_skill.to_string(),
        ),
        (
            StatField::RacialMultiplier,
            "Racial Multiplier",
            format!("{:.2}", inputs.racial_multiplier),
        ),
    ];

    let lines: Vec<Line> = rows
        .iter()
        .map(|(field, label, value)| {
            let style = if focused && *field == cursor {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!(" {label:<18} {value:>8} "), style))
        })
        .collect();

    let paragraph = Paragraph::new(lines).block(panel_block(" Stats ", focused));
    frame.render_widget(paragraph, area);
}

/// Render the computed damage, or a hint while there is none.
pub fn render_result(frame: &mut Frame, area: Rect, result: Option<(DamageKind, f32)>) {
    let lines = match result {
        Some((kind, value)) => vec![
            Line::from(""),
            Line::from(Span::styled(
                format!(" {kind} damage "),
                Style::default().fg(Color::Gray),
            )),
            Line::from(Span::styled(
                format!(" {value:.4} "),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            )),
        ],
        None => vec![
            Line::from(""),
            Line::from(Span::styled(
                " press c to calculate ",
                Style::default().fg(Color::DarkGray),
            )),
        ],
    };

    let paragraph = Paragraph::new(lines).block(panel_block(" Result ", false));
    frame.render_widget(paragraph, area);
}

/// Scrollable history of store errors and load notices.
pub struct ActivityLog {
    entries: Vec<String>,
    max_entries: usize,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            max_entries: 100,
        }
    }

    pub fn add(&mut self, message: impl Into<String>) {
        self.entries.push(message.into());
        if self.entries.len() > self.max_entries {
            self.entries.remove(0);
        }
    }

    #[cfg(test)]
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        let visible_height = area.height.saturating_sub(2) as usize;
        let start = self.entries.len().saturating_sub(visible_height);

        let items: Vec<ListItem> = self.entries[start..]
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let style = if i == self.entries.len() - start - 1 {
                    Style::default().fg(Color::White)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                ListItem::new(Span::styled(format!(" {entry}"), style))
            })
            .collect();

        let list = List::new(items).block(panel_block(" Activity ", false));
        frame.render_widget(list, area);
    }
}
