//! Interactive terminal shell.
//!
//! Three selection lists (class, weapon, quality), a stat entry form, a
//! computed damage line, and an activity log where store errors surface.
//! All store calls run on this thread and block the frame; the data is
//! small and local.

mod components;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEventKind};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::ExecutableCommand;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::widgets::ListState;
use ratatui::Terminal;

use crate::formula::{DamageInputs, DamageKind};
use crate::store::{StoreError, WeaponStore};

use components::{render_result, render_select_list, render_stats, ActivityLog};

/// One selectable list of names with its own cursor state.
pub struct SelectList {
    pub items: Vec<String>,
    pub state: ListState,
}

impl SelectList {
    pub fn new(items: Vec<String>) -> Self {
        let mut state = ListState::default();
        if !items.is_empty() {
            state.select(Some(0));
        }
        Self { items, state }
    }

    /// Replace the whole list; the cursor resets to the first entry.
    pub fn replace(&mut self, items: Vec<String>) {
        self.state = ListState::default();
        if !items.is_empty() {
            self.state.select(Some(0));
        }
        self.items = items;
    }

    pub fn selected(&self) -> Option<&str> {
        self.state
            .selected()
            .and_then(|i| self.items.get(i))
            .map(String::as_str)
    }

    pub fn next(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.items.len() => i + 1,
            Some(i) => i,
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.items.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.state.select(Some(i));
    }
}

/// Which panel receives key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Classes,
    Weapons,
    Qualities,
    Stats,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Classes => Focus::Weapons,
            Focus::Weapons => Focus::Qualities,
            Focus::Qualities => Focus::Stats,
            Focus::Stats => Focus::Classes,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Classes => Focus::Stats,
            Focus::Weapons => Focus::Classes,
            Focus::Qualities => Focus::Weapons,
            Focus::Stats => Focus::Qualities,
        }
    }
}

/// Cursor position within the stat entry form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatField {
    CutDamage,
    BluntDamage,
    Strength,
    Dexterity,
    WeaponSkill,
    RacialMultiplier,
}

impl StatField {
    fn next(self) -> Self {
        match self {
            StatField::CutDamage => StatField::BluntDamage,
            StatField::BluntDamage => StatField::Strength,
            StatField::Strength => StatField::Dexterity,
            StatField::Dexterity => StatField::WeaponSkill,
            StatField::WeaponSkill => StatField::RacialMultiplier,
            StatField::RacialMultiplier => StatField::CutDamage,
        }
    }

    fn previous(self) -> Self {
        match self {
            StatField::CutDamage => StatField::RacialMultiplier,
            StatField::BluntDamage => StatField::CutDamage,
            StatField::Strength => StatField::BluntDamage,
            StatField::Dexterity => StatField::Strength,
            StatField::WeaponSkill => StatField::Dexterity,
            StatField::RacialMultiplier => StatField::WeaponSkill,
        }
    }
}

/// Shell state: the store handle, the three lists, and the calculator form.
pub struct ShellApp {
    store: Option<WeaponStore>,
    pub classes: SelectList,
    pub weapons: SelectList,
    pub qualities: SelectList,
    pub inputs: DamageInputs,
    pub stat_cursor: StatField,
    pub result: Option<(DamageKind, f32)>,
    pub focus: Focus,
    log: ActivityLog,
    should_quit: bool,
}

impl ShellApp {
    /// Build the shell around an open attempt. A failed open is logged and
    /// the shell starts with empty lists instead of exiting.
    pub fn new(store: Result<WeaponStore, StoreError>) -> Self {
        let mut app = Self {
            store: None,
            classes: SelectList::new(Vec::new()),
            weapons: SelectList::new(Vec::new()),
            qualities: SelectList::new(Vec::new()),
            inputs: DamageInputs::default(),
            stat_cursor: StatField::CutDamage,
            result: None,
            focus: Focus::Classes,
            log: ActivityLog::new(),
            should_quit: false,
        };

        match store {
            Ok(store) => {
                app.store = Some(store);
                app.reload_lookups();
            }
            Err(err) => app.log.add(err.to_string()),
        }
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Up => self.move_cursor_up(),
            KeyCode::Down => self.move_cursor_down(),
            KeyCode::Left | KeyCode::Char('-') => self.adjust_stat(-1.0),
            KeyCode::Right | KeyCode::Char('+') => self.adjust_stat(1.0),
            KeyCode::Enter => self.activate(),
            KeyCode::Char('c') => self.compute(),
            _ => {}
        }
    }

    fn move_cursor_up(&mut self) {
        match self.focus {
            Focus::Classes => {
                self.classes.previous();
                self.reload_weapons();
            }
            Focus::Weapons => self.weapons.previous(),
            Focus::Qualities => self.qualities.previous(),
            Focus::Stats => self.stat_cursor = self.stat_cursor.previous(),
        }
    }

    fn move_cursor_down(&mut self) {
        match self.focus {
            Focus::Classes => {
                self.classes.next();
                self.reload_weapons();
            }
            Focus::Weapons => self.weapons.next(),
            Focus::Qualities => self.qualities.next(),
            Focus::Stats => self.stat_cursor = self.stat_cursor.next(),
        }
    }

    fn activate(&mut self) {
        match self.focus {
            Focus::Classes => self.reload_weapons(),
            Focus::Weapons => self.load_selected_weapon(),
            Focus::Qualities => {}
            Focus::Stats => self.compute(),
        }
    }

    fn compute(&mut self) {
        self.result = Some(self.inputs.primary());
    }

    /// Step the stat under the cursor. Levels move by 1 within 1-100,
    /// multipliers by 0.1 and never below zero.
    fn adjust_stat(&mut self, direction: f32) {
        if self.focus != Focus::Stats {
            return;
        }
        match self.stat_cursor {
            StatField::CutDamage => {
                self.inputs.cut_damage = (self.inputs.cut_damage + direction * 0.1).max(0.0);
            }
            StatField::BluntDamage => {
                self.inputs.blunt_damage = (self.inputs.blunt_damage + direction * 0.1).max(0.0);
            }
            StatField::Strength => {
                self.inputs.strength = step_level(self.inputs.strength, direction);
            }
            StatField::Dexterity => {
                self.inputs.dexterity = step_level(self.inputs.dexterity, direction);
            }
            StatField::WeaponSkill => {
                self.inputs.weapon_skill = step_level(self.inputs.weapon_skill, direction);
            }
            StatField::RacialMultiplier => {
                self.inputs.racial_multiplier =
                    (self.inputs.racial_multiplier + direction * 0.1).max(0.0);
            }
        }
    }

    /// Fetch all lookup lists from the store.
    fn reload_lookups(&mut self) {
        let classes = self.fetch(|s| s.weapon_classes());
        self.classes.replace(classes);
        let qualities = self.fetch(|s| s.weapon_qualities());
        self.qualities.replace(qualities);
        self.reload_weapons();
    }

    /// Refetch the weapon list for the selected class, replacing the
    /// displayed list entirely.
    fn reload_weapons(&mut self) {
        let Some(class) = self.classes.selected().map(str::to_owned) else {
            self.weapons.replace(Vec::new());
            return;
        };
        let names = self.fetch(|s| s.weapon_names_by_class(&class));
        self.weapons.replace(names);
    }

    /// Load the selected weapon's multipliers into the calculator form.
    fn load_selected_weapon(&mut self) {
        let Some(name) = self.weapons.selected().map(str::to_owned) else {
            return;
        };
        let Some(store) = &self.store else {
            return;
        };
        match store.weapon_by_name(&name) {
            Ok(Some(weapon)) => {
                self.inputs.cut_damage = weapon.cut_damage;
                self.inputs.blunt_damage = weapon.blunt_damage;
                self.log
                    .add(format!("Loaded stats for {}", display_name(&name)));
            }
            Ok(None) => self
                .log
                .add(format!("No stats stored for {}", display_name(&name))),
            Err(err) => self.log.add(err.to_string()),
        }
    }

    /// Run a list query against the store, degrading to an empty list on
    /// failure. The error itself lands in the activity log.
    fn fetch(
        &mut self,
        query: impl FnOnce(&WeaponStore) -> Result<Vec<String>, StoreError>,
    ) -> Vec<String> {
        let Some(store) = &self.store else {
            return Vec::new();
        };
        match query(store) {
            Ok(items) => items,
            Err(err) => {
                self.log.add(err.to_string());
                Vec::new()
            }
        }
    }

    #[cfg(test)]
    fn log_messages(&self) -> &[String] {
        self.log.entries()
    }
}

/// Weapon names are stored with underscores; show them with spaces.
pub fn display_name(raw: &str) -> String {
    raw.replace('_', " ")
}

fn step_level(level: u8, direction: f32) -> u8 {
    if direction > 0.0 {
        level.saturating_add(1).min(100)
    } else {
        level.saturating_sub(1).max(1)
    }
}

/// Terminal wrapper: raw mode and the alternate screen, restored on drop.
pub struct Shell {
    terminal: Terminal<CrosstermBackend<Stdout>>,
}

impl Shell {
    pub fn new() -> Result<Self> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }

    pub fn run(&mut self, app: &mut ShellApp) -> Result<()> {
        while !app.should_quit() {
            self.draw(app)?;
            if event::poll(Duration::from_millis(100))? {
                if let CrosstermEvent::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        app.handle_key(key.code);
                    }
                }
            }
        }
        Ok(())
    }

    fn draw(&mut self, app: &mut ShellApp) -> Result<()> {
        self.terminal.draw(|frame| {
            let area = frame.area();
            let rows = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Min(8),    // Selection lists
                    Constraint::Length(9), // Stats and result
                    Constraint::Length(6), // Activity log
                ])
                .split(area);

            let lists = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([
                    Constraint::Percentage(33),
                    Constraint::Percentage(34),
                    Constraint::Percentage(33),
                ])
                .split(rows[0]);

            render_select_list(
                frame,
                lists[0],
                " Class ",
                &mut app.classes,
                app.focus == Focus::Classes,
                false,
            );
            render_select_list(
                frame,
                lists[1],
                " Weapon ",
                &mut app.weapons,
                app.focus == Focus::Weapons,
                true,
            );
            render_select_list(
                frame,
                lists[2],
                " Quality ",
                &mut app.qualities,
                app.focus == Focus::Qualities,
                false,
            );

            let form = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
                .split(rows[1]);

            render_stats(
                frame,
                form[0],
                &app.inputs,
                app.stat_cursor,
                app.focus == Focus::Stats,
            );
            render_result(frame, form[1], app.result);

            app.log.render(frame, rows[2]);
        })?;
        Ok(())
    }

    pub fn restore(mut self) -> Result<()> {
        terminal::disable_raw_mode()?;
        self.terminal.backend_mut().execute(LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for Shell {
    fn drop(&mut self) {
        // Best effort cleanup
        terminal::disable_raw_mode().ok();
        self.terminal
            .backend_mut()
            .execute(LeaveAlternateScreen)
            .ok();
        self.terminal.show_cursor().ok();
    }
}

/// Launch the shell around an open attempt and block until the user quits.
pub fn run(store: Result<WeaponStore, StoreError>) -> Result<()> {
    let mut app = ShellApp::new(store);
    let mut shell = Shell::new()?;
    let res = shell.run(&mut app);
    shell.restore()?;
    res
}
