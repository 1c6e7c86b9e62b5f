use std::fmt::Display;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use image::GrayImage;
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame, Terminal,
};
use textorizer::{DetectOptions, Document, ExportOptions, IRect, PageRegions};

use super::canvas::{PageCanvas, Viewport};
use super::keymap::{self, Action};
use super::theme;
use crate::paths;

/// Smallest drawn region, in points, that is kept.
const MIN_DRAWN_EDGE: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromptKind {
    SaveRegions,
    LoadRegions,
    Export,
    OpenPdf,
}

impl PromptKind {
    fn title(self) -> &'static str {
        match self {
            PromptKind::SaveRegions => "Save regions to",
            PromptKind::LoadRegions => "Load regions from",
            PromptKind::Export => "Export text to",
            PromptKind::OpenPdf => "Open PDF",
        }
    }
}

/// Action that would drop unsaved region edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Discard {
    Quit,
    OpenPdf,
}

#[derive(Debug, Clone, PartialEq)]
enum Popup {
    Help,
    Confirm(Discard),
    Message { level: Level, text: String },
    Text { title: String, text: String, scroll: u16 },
    Prompt { kind: PromptKind, input: String },
}

/// Mouse gesture in progress, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Drag {
    Draw {
        start: (i32, i32),
        current: (i32, i32),
    },
    Move {
        index: usize,
        origin: IRect,
        start: (i32, i32),
    },
    Resize {
        index: usize,
        origin: IRect,
    },
}

/// Rendered preview of the current page.
struct Preview {
    page: usize,
    scale: f32,
    image: GrayImage,
}

/// State of the interactive view.
pub struct AppState {
    /// Whether the app is still running.
    pub running: bool,
    doc: Option<Document>,
    detect: DetectOptions,
    export: ExportOptions,
    /// Current page, 0-based.
    page: usize,
    /// Selected region on the current page.
    selected: Option<usize>,
    /// Regions changed since the last save or load.
    modified: bool,
    regions_path: Option<PathBuf>,
    popup: Option<Popup>,
    drag: Option<Drag>,
    preview: Option<Preview>,
    viewport: Option<Viewport>,
    /// Page whose preview failed, so the error is not repeated every frame.
    broken_page: Option<usize>,
}

impl AppState {
    pub fn new(detect: DetectOptions, export: ExportOptions) -> Self {
        Self {
            running: true,
            doc: None,
            detect,
            export,
            page: 0,
            selected: None,
            modified: false,
            regions_path: None,
            popup: None,
            drag: None,
            preview: None,
            viewport: None,
            broken_page: None,
        }
    }

    /// Replace the open document.
    pub fn open_pdf(&mut self, path: &Path) -> textorizer::Result<()> {
        let mut doc = Document::open(path)?;
        doc.set_detect_options(self.detect);
        log::info!("Opened {} ({} pages)", path.display(), doc.page_count());

        self.doc = Some(doc);
        self.page = 0;
        self.selected = None;
        self.modified = false;
        self.regions_path = None;
        self.drag = None;
        self.preview = None;
        self.broken_page = None;
        Ok(())
    }

    /// Replace the regions of the open document with those of a file.
    pub fn load_regions(&mut self, path: &Path) -> textorizer::Result<()> {
        let Some(doc) = self.doc.as_mut() else {
            return Ok(());
        };
        doc.load_regions(path)?;
        log::info!("Loaded regions from {}", path.display());

        // Margins come from the file and carry over to the next open
        self.detect = *doc.detect_options();

        self.selected = None;
        self.modified = false;
        self.regions_path = Some(path.to_path_buf());
        Ok(())
    }

    /// Report an error in a popup.
    pub fn error(&mut self, err: impl Display) {
        log::warn!("{}", err);
        self.popup = Some(Popup::Message {
            level: Level::Error,
            text: err.to_string(),
        });
    }

    fn message(&mut self, level: Level, text: impl Into<String>) {
        self.popup = Some(Popup::Message {
            level,
            text: text.into(),
        });
    }

    // ── Event loop ──────────────────────────────────────────────────────

    /// Main loop: prepare → render → wait for input → update.
    pub fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
        tick_rate: Duration,
    ) -> io::Result<()> {
        while self.running {
            let size = terminal.size()?;
            self.prepare(Rect::new(0, 0, size.width, size.height));
            terminal.draw(|frame| self.render(frame))?;

            if event::poll(tick_rate)? {
                self.handle_event(event::read()?);
            }
        }
        Ok(())
    }

    /// Detect the current page if needed and render its preview for a
    /// screen of `area`.
    pub fn prepare(&mut self, area: Rect) {
        self.viewport = None;
        if self.broken_page == Some(self.page) {
            return;
        }
        if let Err(e) = self.refresh(canvas_area(area)) {
            self.preview = None;
            self.broken_page = Some(self.page);
            self.error(e);
        }
    }

    fn refresh(&mut self, canvas: Rect) -> textorizer::Result<()> {
        let page = self.page;
        let Some(doc) = self.doc.as_mut() else {
            return Ok(());
        };

        let count = doc.regions(page)?.len();
        if self.selected.is_some_and(|i| i >= count) {
            self.selected = None;
        }

        let rect = doc.page_rect(page)?;
        let Some(scale) = Viewport::fit_scale(canvas, rect.width(), rect.height()) else {
            return Ok(());
        };
        let stale = self
            .preview
            .as_ref()
            .map_or(true, |p| p.page != page || p.scale != scale);
        if stale {
            let image = doc.render_page(page, scale)?;
            self.preview = Some(Preview { page, scale, image });
        }

        if let Some(preview) = &self.preview {
            self.viewport = Some(Viewport::new(canvas, preview.scale, preview.image.dimensions()));
        }
        Ok(())
    }

    pub fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                if self.popup.is_some() {
                    self.handle_popup_key(key);
                } else if let Some(action) = keymap::map_key(key) {
                    self.handle_action(action);
                }
            }
            Event::Mouse(mouse) if self.popup.is_none() => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_popup_key(&mut self, key: KeyEvent) {
        let Some(popup) = self.popup.take() else {
            return;
        };
        match popup {
            // Any key closes these
            Popup::Help | Popup::Message { .. } => {}
            Popup::Confirm(discard) => match (discard, keymap::map_key(key)) {
                _ if key.code == KeyCode::Esc => {}
                (Discard::Quit, Some(Action::Quit)) => self.running = false,
                (Discard::OpenPdf, Some(Action::OpenPdf)) => self.open_prompt(),
                (_, Some(Action::SaveRegions)) => self.handle_action(Action::SaveRegions),
                _ => {}
            },
            Popup::Text {
                title,
                text,
                scroll,
            } => {
                let max = u16::try_from(text.lines().count().saturating_sub(1))
                    .unwrap_or(u16::MAX);
                let scroll = match key.code {
                    KeyCode::Down | KeyCode::Char('j') => scroll.saturating_add(1),
                    KeyCode::Up | KeyCode::Char('k') => scroll.saturating_sub(1),
                    KeyCode::PageDown => scroll.saturating_add(10),
                    KeyCode::PageUp => scroll.saturating_sub(10),
                    _ => return,
                };
                self.popup = Some(Popup::Text {
                    title,
                    text,
                    scroll: scroll.min(max),
                });
            }
            Popup::Prompt { kind, mut input } => match key.code {
                KeyCode::Enter => self.submit(kind, input.trim()),
                KeyCode::Esc => {}
                KeyCode::Backspace => {
                    input.pop();
                    self.popup = Some(Popup::Prompt { kind, input });
                }
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    input.push(c);
                    self.popup = Some(Popup::Prompt { kind, input });
                }
                _ => self.popup = Some(Popup::Prompt { kind, input }),
            },
        }
    }

    // ── Actions ─────────────────────────────────────────────────────────

    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                if self.has_unsaved_edits() {
                    self.popup = Some(Popup::Confirm(Discard::Quit));
                } else {
                    self.running = false;
                }
                return;
            }
            Action::Help => {
                self.popup = Some(Popup::Help);
                return;
            }
            Action::OpenPdf => {
                if self.has_unsaved_edits() {
                    self.popup = Some(Popup::Confirm(Discard::OpenPdf));
                } else {
                    self.open_prompt();
                }
                return;
            }
            Action::ToggleConcat => {
                self.export.concat_paragraphs = !self.export.concat_paragraphs;
                return;
            }
            _ => {}
        }

        let Some(doc) = self.doc.as_ref() else {
            self.message(Level::Info, "No PDF open. Press O to open one.");
            return;
        };
        let page_count = doc.page_count();
        let region_count = doc.cached_regions(self.page).map_or(0, PageRegions::len);
        let pdf_path = doc.path().map(Path::to_path_buf);

        match action {
            Action::NextPage => self.set_page((self.page + 1).min(page_count.saturating_sub(1))),
            Action::PrevPage => self.set_page(self.page.saturating_sub(1)),
            Action::FirstPage => self.set_page(0),
            Action::LastPage => self.set_page(page_count.saturating_sub(1)),
            Action::SelectNext if region_count > 0 => {
                self.selected = Some(self.selected.map_or(0, |i| (i + 1) % region_count));
            }
            Action::SelectPrev if region_count > 0 => {
                self.selected = Some(
                    self.selected
                        .map_or(region_count - 1, |i| (i + region_count - 1) % region_count),
                );
            }

            Action::Move { dx, dy } => {
                if let Some(index) = self.selected {
                    self.edit(|r| r.move_by(index, dx, dy).map(|_| Some(index)));
                }
            }
            Action::Resize { dw, dh } => {
                if let Some(index) = self.selected {
                    self.edit(|r| r.resize_by(index, dw, dh).map(|_| Some(index)));
                }
            }
            Action::OrderEarlier => {
                if let Some(index) = self.selected {
                    self.edit(|r| r.reorder(index, -1).map(Some));
                }
            }
            Action::OrderLater => {
                if let Some(index) = self.selected {
                    self.edit(|r| r.reorder(index, 1).map(Some));
                }
            }
            Action::AddRegion => self.edit(|r| {
                let b = r.bounds();
                let (dx, dy) = (b.width() / 10, b.height() / 10);
                r.add(IRect::new(b.x0 + dx, b.y0 + dy, b.x1 - dx, b.y1 - dy))
                    .map(Some)
            }),
            Action::DeleteRegion => {
                if let Some(index) = self.selected {
                    self.edit(|r| {
                        r.delete(index)?;
                        Ok((!r.is_empty()).then(|| index.min(r.len() - 1)))
                    });
                }
            }

            Action::Redetect => self.page_edit(|doc, page| doc.redetect(page).map(|_| ())),
            Action::MarkPageEmpty => self.page_edit(|doc, page| doc.mark_page_empty(page)),
            Action::MarkAllEmpty => self.page_edit(|doc, _| {
                doc.mark_all_pages_empty();
                Ok(())
            }),

            Action::SaveRegions | Action::LoadRegions => {
                let path = self
                    .regions_path
                    .clone()
                    .or_else(|| pdf_path.as_deref().map(paths::regions_path));
                let kind = if action == Action::SaveRegions {
                    PromptKind::SaveRegions
                } else {
                    PromptKind::LoadRegions
                };
                self.prompt(kind, display(path));
            }
            Action::Export => {
                let path = pdf_path.as_deref().map(paths::text_path);
                self.prompt(PromptKind::Export, display(path));
            }
            Action::PreviewText => self.preview_text(),

            _ => {}
        }
    }

    fn has_unsaved_edits(&self) -> bool {
        self.modified && self.doc.is_some()
    }

    fn open_prompt(&mut self) {
        let input = self
            .doc
            .as_ref()
            .and_then(|d| d.path())
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        self.prompt(PromptKind::OpenPdf, input);
    }

    fn set_page(&mut self, page: usize) {
        if page != self.page {
            self.page = page;
            self.selected = None;
            self.drag = None;
        }
    }

    /// Apply an edit to the regions of the current page. The closure
    /// returns the region to select afterwards.
    fn edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut PageRegions) -> textorizer::Result<Option<usize>>,
    {
        let page = self.page;
        let Some(doc) = self.doc.as_mut() else {
            return;
        };
        match doc.regions_mut(page).and_then(f) {
            Ok(selected) => {
                self.selected = selected;
                self.modified = true;
            }
            Err(e) => self.error(e),
        }
    }

    /// Apply a change that replaces whole region lists.
    fn page_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Document, usize) -> textorizer::Result<()>,
    {
        let page = self.page;
        let Some(doc) = self.doc.as_mut() else {
            return;
        };
        match f(doc, page) {
            Ok(()) => {
                self.selected = None;
                self.modified = true;
            }
            Err(e) => self.error(e),
        }
    }

    fn prompt(&mut self, kind: PromptKind, input: String) {
        self.popup = Some(Popup::Prompt { kind, input });
    }

    fn submit(&mut self, kind: PromptKind, input: &str) {
        if input.is_empty() {
            self.message(Level::Error, "No file name given");
            return;
        }
        let path = PathBuf::from(input);

        match kind {
            PromptKind::OpenPdf => {
                if let Err(e) = self.open_pdf(&path) {
                    self.error(e);
                }
            }
            PromptKind::LoadRegions => match self.load_regions(&path) {
                Ok(()) => self.message(
                    Level::Success,
                    format!("Loaded regions from {}", path.display()),
                ),
                Err(e) => self.error(e),
            },
            PromptKind::SaveRegions => {
                let Some(doc) = self.doc.as_ref() else {
                    return;
                };
                match doc.save_regions(&path) {
                    Ok(()) => {
                        log::info!("Saved regions to {}", path.display());
                        self.modified = false;
                        self.message(Level::Success, format!("Saved regions to {}", path.display()));
                        self.regions_path = Some(path);
                    }
                    Err(e) => self.error(e),
                }
            }
            PromptKind::Export => {
                let Some(doc) = self.doc.as_mut() else {
                    return;
                };
                let pages = self.export.page_selection.indices(doc.page_count()).len();
                let result = doc
                    .document_text(&self.export)
                    .map_err(|e| e.to_string())
                    .and_then(|text| fs::write(&path, text).map_err(|e| e.to_string()));
                match result {
                    Ok(()) => {
                        log::info!("Exported {} pages to {}", pages, path.display());
                        self.message(
                            Level::Success,
                            format!("Exported {} pages to {}", pages, path.display()),
                        );
                    }
                    Err(e) => self.error(e),
                }
            }
        }
    }

    fn preview_text(&mut self) {
        let page = self.page;
        let selected = self.selected;
        let Some(doc) = self.doc.as_mut() else {
            return;
        };
        let (title, result) = match selected {
            Some(index) => (
                format!("Region {} of page {}", index + 1, page + 1),
                doc.region_text(page, index, &self.export),
            ),
            None => (
                format!("Page {}", page + 1),
                doc.page_text(page, &self.export),
            ),
        };
        match result {
            Ok(text) => {
                self.popup = Some(Popup::Text {
                    title,
                    text,
                    scroll: 0,
                })
            }
            Err(e) => self.error(e),
        }
    }

    // ── Mouse ───────────────────────────────────────────────────────────

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(viewport) = self.viewport else {
            return;
        };
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(point) = viewport.screen_to_page(mouse.column, mouse.row) {
                    self.press(point);
                }
            }
            MouseEventKind::Down(MouseButton::Right) => {
                if viewport.screen_to_page(mouse.column, mouse.row).is_none() {
                    return;
                }
                if let (Some(index), Some(origin)) = (self.selected, self.selected_rect()) {
                    self.drag = Some(Drag::Resize { index, origin });
                }
            }
            MouseEventKind::Drag(MouseButton::Left | MouseButton::Right) => {
                self.drag_to(viewport.clamp_to_page(mouse.column, mouse.row));
            }
            MouseEventKind::Up(MouseButton::Left | MouseButton::Right) => self.release(),
            _ => {}
        }
    }

    fn selected_rect(&self) -> Option<IRect> {
        let regions = self.doc.as_ref()?.cached_regions(self.page)?;
        regions.get(self.selected?).map(|r| r.rect)
    }

    /// Select the region under a point, preferring the selected one, or
    /// start drawing when there is none.
    fn press(&mut self, (x, y): (i32, i32)) {
        let page = self.page;
        let Some(regions) = self.doc.as_ref().and_then(|d| d.cached_regions(page)) else {
            return;
        };
        let hit = self
            .selected
            .filter(|&i| regions.get(i).is_some_and(|r| r.rect.contains_point(x, y)))
            .or_else(|| regions.find(x, y));

        match hit.and_then(|i| regions.get(i).map(|r| (i, r.rect))) {
            Some((index, origin)) => {
                self.selected = Some(index);
                self.drag = Some(Drag::Move {
                    index,
                    origin,
                    start: (x, y),
                });
            }
            None => {
                self.selected = None;
                self.drag = Some(Drag::Draw {
                    start: (x, y),
                    current: (x, y),
                });
            }
        }
    }

    fn drag_to(&mut self, point: (i32, i32)) {
        match self.drag {
            Some(Drag::Draw { start, .. }) => {
                self.drag = Some(Drag::Draw {
                    start,
                    current: point,
                })
            }
            Some(Drag::Move {
                index,
                origin,
                start,
            }) => self.edit(|r| {
                r.set_rect(index, origin)?;
                r.move_by(index, point.0 - start.0, point.1 - start.1)?;
                Ok(Some(index))
            }),
            Some(Drag::Resize { index, origin }) => self.edit(|r| {
                r.set_rect(index, origin)?;
                r.resize_by(index, point.0 - origin.x1, point.1 - origin.y1)?;
                Ok(Some(index))
            }),
            None => {}
        }
    }

    fn release(&mut self) {
        if let Some(Drag::Draw { start, current }) = self.drag.take() {
            let rect = span_rect(start, current);
            if rect.width() >= MIN_DRAWN_EDGE && rect.height() >= MIN_DRAWN_EDGE {
                self.edit(|r| r.add(rect).map(Some));
            }
        }
    }

    fn drawing_rect(&self) -> Option<IRect> {
        match self.drag {
            Some(Drag::Draw { start, current }) => Some(span_rect(start, current)),
            _ => None,
        }
    }

    // ── Rendering ───────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();
        let (main, status) = split(area);

        let title = match &self.doc {
            Some(doc) => format!("{} · page {}/{}", doc.name(), self.page + 1, doc.page_count()),
            None => "textorizer".to_string(),
        };
        let block = theme::block(&title);
        let inner = block.inner(main);
        frame.render_widget(block, main);

        self.render_page(frame, inner);
        self.render_status_bar(frame, status);

        match &self.popup {
            Some(Popup::Help) => render_help(frame, area),
            Some(Popup::Confirm(discard)) => render_confirm(frame, area, *discard),
            Some(Popup::Message { level, text }) => render_message(frame, area, *level, text),
            Some(Popup::Text {
                title,
                text,
                scroll,
            }) => render_text(frame, area, title, text, *scroll),
            Some(Popup::Prompt { kind, input }) => render_prompt(frame, area, *kind, input),
            None => {}
        }
    }

    fn render_page(&self, frame: &mut Frame, area: Rect) {
        let Some(doc) = &self.doc else {
            let lines = vec![
                Line::raw(""),
                Line::from(Span::styled("No PDF open", theme::title())),
                Line::raw(""),
                Line::from(vec![
                    Span::raw("Press "),
                    Span::styled("O", theme::key()),
                    Span::raw(" to open a PDF or "),
                    Span::styled("?", theme::key()),
                    Span::raw(" for help"),
                ]),
            ];
            frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
            return;
        };

        if let (Some(preview), Some(viewport)) = (&self.preview, self.viewport) {
            if preview.page == self.page {
                let rects = doc
                    .cached_regions(self.page)
                    .map(PageRegions::rects)
                    .unwrap_or_default();
                let canvas = PageCanvas::new(&preview.image, viewport, &rects)
                    .selected(self.selected)
                    .drawing(self.drawing_rect());
                frame.render_widget(canvas, area);
            }
        }
    }

    fn render_status_bar(&self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(" textorizer ", theme::brand_badge()), Span::raw(" ")];
        if self.modified {
            spans.push(Span::styled(" MODIFIED ", theme::modified_badge()));
            spans.push(Span::raw(" "));
        }

        if let Some(doc) = &self.doc {
            let count = doc.cached_regions(self.page).map_or(0, PageRegions::len);
            let selection = match self.selected {
                Some(i) => format!("region {}/{}", i + 1, count),
                None => format!("{} regions", count),
            };
            spans.push(Span::styled(
                selection,
                Style::default()
                    .fg(theme::REGION)
                    .add_modifier(Modifier::BOLD),
            ));
            spans.push(Span::raw(" │ "));
        }

        let concat = if self.export.concat_paragraphs {
            "on"
        } else {
            "off"
        };
        spans.extend([
            Span::styled("paragraphs:", theme::key_hint()),
            Span::raw(format!(" {} │ ", concat)),
            Span::styled("?", theme::key_hint()),
            Span::raw(":help "),
            Span::styled("q", theme::key_hint()),
            Span::raw(":quit"),
        ]);

        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn display(path: Option<PathBuf>) -> String {
    path.map(|p| p.display().to_string()).unwrap_or_default()
}

fn span_rect(a: (i32, i32), b: (i32, i32)) -> IRect {
    IRect::new(a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
}

/// Page area and status line.
fn split(area: Rect) -> (Rect, Rect) {
    let [main, status] = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(area);
    (main, status)
}

/// Cells available to the page preview.
fn canvas_area(area: Rect) -> Rect {
    let (main, _) = split(area);
    theme::block("").inner(main)
}

fn render_help(frame: &mut Frame, area: Rect) {
    let modal = centered_rect(60, 80, area);
    let mut lines = vec![
        Line::raw(""),
        Line::from(Span::styled(" Keybindings", theme::title())),
        Line::raw(""),
    ];

    for (key, desc) in keymap::HELP {
        if key.is_empty() {
            lines.push(Line::raw(""));
        } else if desc.is_empty() {
            lines.push(Line::from(Span::styled(format!("  {key}"), theme::title())));
        } else {
            lines.push(Line::from(vec![
                Span::raw("  "),
                Span::styled(format!("{:<22}", key), theme::key()),
                Span::raw(*desc),
            ]));
        }
    }

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines).block(theme::popup("Help", theme::SELECTED)),
        modal,
    );
}

fn render_message(frame: &mut Frame, area: Rect, level: Level, text: &str) {
    let (title, color) = match level {
        Level::Info => ("Info", theme::INFO),
        Level::Success => ("Done", theme::SUCCESS),
        Level::Error => ("Error", theme::ERROR),
    };
    let modal = centered_box(60, 5, area);
    let lines = vec![
        Line::raw(text.to_string()),
        Line::raw(""),
        Line::from(Span::styled("Press any key", theme::muted())),
    ];

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(theme::popup(title, color)),
        modal,
    );
}

fn render_confirm(frame: &mut Frame, area: Rect, discard: Discard) {
    let again = match discard {
        Discard::Quit => "q to quit",
        Discard::OpenPdf => "O to open another PDF",
    };
    let modal = centered_box(60, 5, area);
    let lines = vec![
        Line::raw("Region edits are not saved."),
        Line::raw(""),
        Line::from(vec![
            Span::styled("s", theme::key()),
            Span::styled(" save  ", theme::muted()),
            Span::styled(again, theme::muted()),
            Span::styled("  any other key cancels", theme::muted()),
        ]),
    ];

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(theme::popup("Unsaved changes", theme::ERROR)),
        modal,
    );
}

fn render_text(frame: &mut Frame, area: Rect, title: &str, text: &str, scroll: u16) {
    let modal = centered_rect(80, 80, area);
    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(text.to_string())
            .scroll((scroll, 0))
            .block(theme::popup(title, theme::REGION)),
        modal,
    );
}

fn render_prompt(frame: &mut Frame, area: Rect, kind: PromptKind, input: &str) {
    let modal = centered_box(60, 4, area);
    let lines = vec![
        Line::from(vec![
            Span::styled(input.to_string(), Style::default().fg(theme::TEXT)),
            Span::styled("█", Style::default().fg(theme::SELECTED)),
        ]),
        Line::from(vec![
            Span::styled("Enter", theme::key()),
            Span::styled(": confirm  ", theme::muted()),
            Span::styled("Esc", theme::key()),
            Span::styled(": cancel", theme::muted()),
        ]),
    ];

    frame.render_widget(Clear, modal);
    frame.render_widget(
        Paragraph::new(lines).block(theme::popup(kind.title(), theme::SELECTED)),
        modal,
    );
}

/// Calculate a centered rect using percentage of parent area.
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .split(area);

    Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .split(popup_layout[1])[1]
}

/// Centered rect of a fixed height.
fn centered_box(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let row = Rect::new(area.x, area.y + (area.height - height) / 2, area.width, height);
    centered_rect(percent_x, 100, row)
}
