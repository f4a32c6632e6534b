use anyhow::{Context, Result, bail};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::warn;
use pagecraft_config::Config;
use pagecraft_engine::editing::{Direction as MoveDirection, InsertAt};
use pagecraft_engine::views::OutlineLine;
use pagecraft_engine::{
    BlockTemplate, FsPageStore, Language, PageEditor, PageStore, PageSummary, Registry,
    builtin_templates, io, outline, render_page,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use std::{
    env,
    io::{Stdout, stdout},
    path::PathBuf,
    process,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Pages,
    Blocks,
}

struct App {
    store: FsPageStore,
    registry: Registry,
    pages: Vec<PageSummary>,
    page_list_state: ListState,
    editor: Option<PageEditor>,
    language: Language,
    outline: Vec<OutlineLine>,
    block_list_state: ListState,
    focus: Focus,
    templates: Vec<BlockTemplate>,
    next_template: usize,
    status: String,
}

impl App {
    fn new(store: FsPageStore, language: Language) -> Result<Self> {
        let pages = store.list_pages()?;

        let mut app = Self {
            store,
            registry: Registry::builtin(),
            pages,
            page_list_state: ListState::default(),
            editor: None,
            language,
            outline: Vec::new(),
            block_list_state: ListState::default(),
            focus: Focus::Pages,
            templates: builtin_templates(),
            next_template: 0,
            status: String::new(),
        };

        // Select first page if available
        if !app.pages.is_empty() {
            app.page_list_state.select(Some(0));
            app.load_selected_page();
        }

        Ok(app)
    }

    fn next_page(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        let i = match self.page_list_state.selected() {
            Some(i) => (i + 1) % self.pages.len(),
            None => 0,
        };
        self.page_list_state.select(Some(i));
        self.load_selected_page();
    }

    fn previous_page(&mut self) {
        if self.pages.is_empty() {
            return;
        }
        let i = match self.page_list_state.selected() {
            Some(0) | None => self.pages.len() - 1,
            Some(i) => i - 1,
        };
        self.page_list_state.select(Some(i));
        self.load_selected_page();
    }

    fn load_selected_page(&mut self) {
        if let Some(editor) = &self.editor
            && editor.is_dirty()
        {
            warn!("Discarding unsaved edits to page {}", editor.page().id);
            self.status = format!("Discarded unsaved edits to '{}'", editor.page().id);
        }
        self.editor = None;

        let Some(summary) = self
            .page_list_state
            .selected()
            .and_then(|index| self.pages.get(index))
        else {
            self.refresh_outline();
            return;
        };
        match self.store.get_page(&summary.id) {
            Ok(Some(page)) => self.editor = Some(PageEditor::new(page, self.language)),
            Ok(None) => self.status = format!("Page '{}' no longer exists", summary.id),
            Err(e) => self.status = format!("Error reading page: {e}"),
        }
        self.block_list_state.select(None);
        self.refresh_outline();
    }

    /// Rebuild the block outline and point the list at the editor's selection.
    fn refresh_outline(&mut self) {
        let Some(editor) = &self.editor else {
            self.outline.clear();
            self.block_list_state.select(None);
            return;
        };
        self.outline = outline(editor.blocks(), editor.language());
        let selected = editor
            .selected_id()
            .and_then(|id| self.outline.iter().position(|line| &line.id == id));
        self.block_list_state.select(selected);
    }

    fn select_block(&mut self, step: isize) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if self.outline.is_empty() {
            return;
        }
        let len = self.outline.len() as isize;
        let current = self.block_list_state.selected().map_or(-1, |i| i as isize);
        let next = if current < 0 {
            0
        } else {
            (current + step).rem_euclid(len)
        } as usize;
        editor.select(Some(self.outline[next].id.clone()));
        self.block_list_state.select(Some(next));
    }

    /// Move within the focused pane; switching pages only happens from the
    /// pages pane.
    fn step(&mut self, step: isize) {
        match self.focus {
            Focus::Pages if step > 0 => self.next_page(),
            Focus::Pages => self.previous_page(),
            Focus::Blocks => self.select_block(step),
        }
    }

    fn toggle_focus(&mut self) {
        if self.focus == Focus::Blocks || self.editor.is_none() {
            self.focus = Focus::Pages;
            return;
        }
        if self.block_list_state.selected().is_none() {
            self.select_block(1);
        }
        self.focus = Focus::Blocks;
    }

    fn edit(&mut self, f: impl FnOnce(&mut PageEditor) -> bool, done: &str) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        if editor.selected_id().is_none() {
            self.status = "Select a block first (Tab, J/K)".to_string();
            return;
        }
        self.status = if f(editor) {
            done.to_string()
        } else {
            "Nothing to change".to_string()
        };
        self.refresh_outline();
    }

    fn change_columns(&mut self, delta: isize) {
        let count = self
            .editor
            .as_ref()
            .and_then(PageEditor::selected)
            .and_then(|block| block.content.column_count());
        let Some(count) = count else {
            self.status = "Selected block has no columns".to_string();
            return;
        };
        let target = count.saturating_add_signed(delta).max(1);
        self.edit(
            |editor| editor.set_columns(target).applied,
            &format!("Columns: {target}"),
        );
    }

    /// Append the next built-in template, cycling through the catalogue.
    fn insert_next_template(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let Some(template) = self.templates.get(self.next_template) else {
            return;
        };
        self.next_template = (self.next_template + 1) % self.templates.len();
        let patch = editor.insert_template(template, InsertAt::End);
        self.status = if patch.applied {
            format!("Inserted template '{}'", template.name(self.language))
        } else {
            "Nothing to change".to_string()
        };
        self.refresh_outline();
    }

    fn toggle_language(&mut self) {
        self.language = self.language.other();
        if let Some(editor) = self.editor.as_mut() {
            editor.set_language(self.language);
        }
        self.status = format!("Editing language: {}", self.language);
        self.refresh_outline();
    }

    fn copy_other_language(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        let from = editor.language().other();
        editor.copy_from_language(from);
        self.status = format!("Copied {from} blocks into {}", editor.language());
        self.refresh_outline();
    }

    fn save(&mut self) {
        let Some(editor) = self.editor.as_mut() else {
            return;
        };
        match editor.save(&mut self.store) {
            Ok(()) => {
                self.status = format!("Saved '{}'", editor.page().id);
                match self.store.list_pages() {
                    Ok(pages) => self.pages = pages,
                    Err(e) => warn!("Failed to refresh page list: {e}"),
                }
            }
            Err(e) => self.status = format!("Save failed, edits kept: {e}"),
        }
    }

    /// Current values of the selected block's editor fields.
    fn selected_fields(&self) -> String {
        let Some(form) = self
            .editor
            .as_ref()
            .and_then(|editor| editor.selected_form(&self.registry))
        else {
            return String::new();
        };
        let fields: Vec<String> = form
            .fields
            .iter()
            .filter(|field| !field.value.is_null())
            .map(|field| match field.value.as_str() {
                Some(text) => format!("{}: {text}", field.label),
                None => format!("{}: {}", field.label, field.value),
            })
            .collect();
        format!("{} | {}", form.kind, fields.join(" | "))
    }

    fn title(&self) -> String {
        match &self.editor {
            Some(editor) => format!(
                "{}{} [{}]",
                editor.page().title(self.language),
                if editor.is_dirty() { " *" } else { "" },
                self.language
            ),
            None => "Blocks".to_string(),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    if args.get(1).map(String::as_str) == Some("render") {
        return render_command(&args);
    }

    // Determine pages path from CLI args or config file
    let config_path = Config::config_path();

    let pages_path;
    let from_config;
    let mut language = Language::PRIMARY;

    if args.len() == 2 {
        // CLI argument provided - use it
        pages_path = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        // No CLI argument - try config file
        match Config::load() {
            Ok(Some(config)) => {
                language = config.language.parse().unwrap_or_else(|_| {
                    warn!("Unknown language '{}' in config, using ar", config.language);
                    Language::PRIMARY
                });
                pages_path = config.pages_path;
                from_config = true;
            }
            Ok(None) => {
                eprintln!("Error: No pages path provided and no config file found");
                eprintln!("Usage: {} <pages-folder-path>", args[0]);
                eprintln!("Or create a config file at {}", config_path.display());
                process::exit(1);
            }
            Err(e) => {
                eprintln!("Error: Failed to load config file: {e}");
                eprintln!("Usage: {} <pages-folder-path>", args[0]);
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [pages-folder-path]", args[0]);
        eprintln!("       {} render <pages-folder-path> <page-id> [ar|en]", args[0]);
        process::exit(1);
    };

    // Validate pages directory using engine
    if let Err(e) = io::validate_pages_dir(&pages_path) {
        let source = if from_config {
            format!(" from config file '{}'", config_path.display())
        } else {
            String::new()
        };
        eprintln!(
            "Error: Pages path '{}'{} is invalid: {e}",
            pages_path.display(),
            source
        );
        process::exit(1);
    }

    let store = FsPageStore::open(&pages_path)?;
    let mut app = App::new(store, language)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// `render <pages-dir> <page-id> [ar|en]`: print the page HTML.
fn render_command(args: &[String]) -> Result<()> {
    let (Some(pages_path), Some(page_id)) = (args.get(2), args.get(3)) else {
        bail!("Usage: {} render <pages-folder-path> <page-id> [ar|en]", args[0]);
    };
    let language = match args.get(4) {
        Some(code) => code
            .parse::<Language>()
            .with_context(|| format!("Unknown language '{code}'"))?,
        None => Language::PRIMARY,
    };

    let store = FsPageStore::open(pages_path)?;
    let page = store
        .get_page(page_id)?
        .with_context(|| format!("Page '{page_id}' not found in {pages_path}"))?;
    println!("{}", render_page(&page, language, &Registry::builtin()));
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Tab => app.toggle_focus(),
                KeyCode::Down | KeyCode::Char('j') => app.step(1),
                KeyCode::Up | KeyCode::Char('k') => app.step(-1),
                KeyCode::Char('J') => app.select_block(1),
                KeyCode::Char('K') => app.select_block(-1),
                KeyCode::Char('u') => app.edit(
                    |editor| editor.move_selected(MoveDirection::Up).applied,
                    "Moved up",
                ),
                KeyCode::Char('d') => app.edit(
                    |editor| editor.move_selected(MoveDirection::Down).applied,
                    "Moved down",
                ),
                KeyCode::Char('y') => {
                    app.edit(|editor| editor.duplicate_selected().applied, "Duplicated")
                }
                KeyCode::Char('x') => app.edit(|editor| editor.remove().applied, "Deleted"),
                KeyCode::Char('+') => app.change_columns(1),
                KeyCode::Char('-') => app.change_columns(-1),
                KeyCode::Char('l') => app.toggle_language(),
                KeyCode::Char('c') => app.copy_other_language(),
                KeyCode::Char('t') => app.insert_next_template(),
                KeyCode::Char('s') => app.save(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(0), Constraint::Length(4)].as_ref())
        .split(f.area());

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(rows[0]);

    let focused = |focus: Focus| {
        if app.focus == focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };

    // Page list panel
    let page_items: Vec<ListItem> = app
        .pages
        .iter()
        .map(|page| {
            let title = match app.language {
                Language::Ar => page.title_ar.as_str(),
                Language::En => page.title_en.as_deref().unwrap_or(&page.title_ar),
            };
            ListItem::new(vec![Line::from(vec![
                Span::raw(format!("📄 {title} ")),
                Span::styled(
                    format!("({})", page.block_count),
                    Style::default().fg(Color::DarkGray),
                ),
            ])])
        })
        .collect();

    let pages_list = List::new(page_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused(Focus::Pages))
                .title("Pages"),
        )
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(pages_list, chunks[0], &mut app.page_list_state);

    // Block outline panel
    let block_items: Vec<ListItem> = if app.outline.is_empty() {
        vec![ListItem::new("No blocks")]
    } else {
        app.outline
            .iter()
            .map(|line| ListItem::new(Line::from(line.render())))
            .collect()
    };

    let blocks_list = List::new(block_items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(focused(Focus::Blocks))
                .title(app.title()),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Cyan)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        );

    f.render_stateful_widget(blocks_list, chunks[1], &mut app.block_list_state);

    // Instructions and status
    let help_text = Line::from(vec![
        Span::raw("q: Quit | ↑↓/jk: Move in pane | Tab: Focus | J/K: Block | u/d: Move | "),
        Span::raw("y: Duplicate | x: Delete | +/-: Columns | t: Template | l: Language | "),
        Span::raw("c: Copy | s: Save"),
    ]);
    let status = Line::from(Span::styled(
        app.status.clone(),
        Style::default().fg(Color::Green),
    ));

    let fields = Line::from(Span::styled(
        app.selected_fields(),
        Style::default().fg(Color::DarkGray),
    ));

    let help = Paragraph::new(vec![help_text, fields, status]).block(Block::default());
    f.render_widget(help, rows[1]);
}
