use std::io::{self, Stdout};
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use feed_core::{update, AppState, CatalogKey, Msg, Page, PageId, VisibilityEntry};
use feed_logging::feed_info;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use super::cli::Args;
use super::config;
use super::effects::EffectRunner;
use super::logging;
use super::persistence;
use super::ui::render::{self, FeedViewport};

const TICK_RATE: Duration = Duration::from_millis(75);
const PAGE_STEP: i32 = 5;

pub fn run_app(args: Args) -> anyhow::Result<()> {
    let mut config = config::load(args.config.as_deref())?;
    config.apply_args(&args);
    config.validate()?;

    logging::initialize(config.log);
    feed_info!(
        "Starting catalog feed: base_url={} batch_size={} overlap={:?}",
        config.base_url,
        config.batch_size,
        config.overlap
    );

    let remembered = persistence::load_selection(&config.state_dir);
    let page = initial_page(&args, remembered.as_ref())?;
    let runner = EffectRunner::new(&config)?;

    let mut app = FeedApp::new(runner);
    if let Some(key) = remembered {
        app.dispatch(Msg::RestoreSelection(key));
    }
    app.dispatch(Msg::PageRequested(page));
    app.run()
}

fn initial_page(args: &Args, remembered: Option<&CatalogKey>) -> anyhow::Result<Page> {
    if let Some(key) = &args.key {
        return Ok(Page::Detail {
            key: CatalogKey::new(key.clone()),
        });
    }
    if args.last {
        let Some(key) = remembered else {
            bail!("--last given but no selection has been saved yet");
        };
        return Ok(Page::Detail { key: key.clone() });
    }
    Ok(Page::Index)
}

struct FeedApp {
    state: AppState,
    runner: EffectRunner,
    offset: usize,
    rendered_page: PageId,
    last_report: Option<SentinelReport>,
    needs_redraw: bool,
}

impl FeedApp {
    fn new(runner: EffectRunner) -> Self {
        Self {
            state: AppState::new(),
            runner,
            offset: 0,
            rendered_page: 0,
            last_report: None,
            needs_redraw: true,
        }
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            self.needs_redraw = true;
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let mut stdout = io::stdout();
        enable_raw_mode().context("failed to enable raw mode")?;
        stdout.execute(EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;

        let result = self.event_loop(&mut terminal);

        disable_raw_mode()?;
        terminal.backend_mut().execute(LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        let mut last_tick = Instant::now();

        loop {
            for msg in self.runner.poll_events() {
                self.dispatch(msg);
            }

            if self.needs_redraw {
                self.redraw(terminal)?;
            }

            let timeout = TICK_RATE
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_millis(16));

            if event::poll(timeout)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if self.handle_key(key.code) {
                            break;
                        }
                    }
                    Event::Resize(..) => self.needs_redraw = true,
                    _ => {}
                }
            }

            if last_tick.elapsed() >= TICK_RATE {
                last_tick = Instant::now();
                self.dispatch(Msg::Tick);
            }
        }

        feed_info!("Quit requested");
        Ok(())
    }

    fn redraw(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        let view = self.state.view();
        if view.page_id != self.rendered_page {
            self.offset = 0;
            self.rendered_page = view.page_id;
        }

        let offset = self.offset;
        let mut viewport = FeedViewport::default();
        terminal.draw(|frame| {
            viewport = render::draw(frame, &view, offset);
        })?;
        self.offset = viewport.offset;
        self.needs_redraw = false;

        // Until the first batch lands, the sentinel sits on an empty page.
        if self.state.page().is_some() && view.batches_completed > 0 {
            self.report_sentinel(SentinelReport {
                page_id: view.page_id,
                batches: view.batches_completed,
                visible: viewport.sentinel_visible,
            });
        }
        Ok(())
    }

    fn report_sentinel(&mut self, report: SentinelReport) {
        if !report.is_news_after(self.last_report) {
            return;
        }
        self.last_report = Some(report);
        let entry = if report.visible {
            VisibilityEntry::visible()
        } else {
            VisibilityEntry::hidden()
        };
        self.dispatch(Msg::SentinelVisibility(vec![entry]));
    }

    /// Returns true when the app should quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        let msg = match code {
            KeyCode::Char('q') => return true,
            KeyCode::Esc => match self.state.page() {
                Some(Page::Detail { .. }) => Msg::BackRequested,
                _ => return true,
            },
            KeyCode::Down | KeyCode::Char('j') => Msg::SelectionMoved(1),
            KeyCode::Up | KeyCode::Char('k') => Msg::SelectionMoved(-1),
            KeyCode::PageDown => Msg::SelectionMoved(PAGE_STEP),
            KeyCode::PageUp => Msg::SelectionMoved(-PAGE_STEP),
            KeyCode::Home => Msg::SelectionMoved(i32::MIN),
            KeyCode::End => Msg::SelectionMoved(i32::MAX),
            KeyCode::Enter => Msg::ItemActivated,
            KeyCode::Backspace | KeyCode::Left | KeyCode::Char('h') => Msg::BackRequested,
            _ => Msg::NoOp,
        };
        self.dispatch(msg);
        false
    }
}

/// Sentinel visibility as measured after one redraw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SentinelReport {
    page_id: PageId,
    batches: usize,
    visible: bool,
}

impl SentinelReport {
    /// A crossing of the viewport edge is news. So is a sentinel still on
    /// screen after another batch rendered above it.
    fn is_news_after(self, previous: Option<SentinelReport>) -> bool {
        let Some(previous) = previous else {
            return true;
        };
        if previous.page_id != self.page_id || previous.visible != self.visible {
            return true;
        }
        self.visible && previous.batches != self.batches
    }
}
