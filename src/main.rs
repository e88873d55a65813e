//! city-weather: look up current conditions for a city

use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use city_weather::action::Action;
use city_weather::api::WeatherClient;
use city_weather::components::{Component, WeatherWidget, WeatherWidgetProps};
use city_weather::config::{self, FileConfig, Overrides, Settings};
use city_weather::effect::Effect;
use city_weather::logging;
use city_weather::reducer::reducer;
use city_weather::state::AppState;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Frame, Terminal, backend::CrosstermBackend, layout::Rect};
use tui_dispatch::{
    EffectContext, EffectStoreLike, EffectStoreWithMiddleware, EventBus, EventContext, EventKind,
    EventRoutingState, HandlerResponse, Keybindings, RenderContext, TaskKey,
};
use tui_dispatch_debug::debug::DebugLayer;
use tui_dispatch_debug::{
    DebugCliArgs, DebugRunOutput, DebugSession, DebugSessionError, ReplayItem,
};

/// Search the current weather for a city
#[derive(Parser, Debug)]
#[command(name = "city-weather")]
#[command(about = "Look up the current weather for a city (OpenWeatherMap)")]
struct Args {
    /// City to look up on startup
    #[arg(long, short)]
    city: Option<String>,

    /// OpenWeatherMap API key
    #[arg(long, env = "OPENWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Provider base URL (the `/weather` endpoint is appended)
    #[arg(long, env = "OPENWEATHER_BASE_URL")]
    base_url: Option<String>,

    /// Config file (defaults to <config dir>/city-weather/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Diagnostic log file
    #[arg(long)]
    log_file: Option<PathBuf>,

    #[command(flatten)]
    debug: DebugCliArgs,
}

#[derive(tui_dispatch::ComponentId, Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum WeatherComponentId {
    Widget,
}

#[derive(tui_dispatch::BindingContext, Clone, Copy, PartialEq, Eq, Hash)]
enum WeatherContext {
    Main,
}

impl EventRoutingState<WeatherComponentId, WeatherContext> for AppState {
    fn focused(&self) -> Option<WeatherComponentId> {
        Some(WeatherComponentId::Widget)
    }

    fn modal(&self) -> Option<WeatherComponentId> {
        None
    }

    fn binding_context(&self, _id: WeatherComponentId) -> WeatherContext {
        WeatherContext::Main
    }

    fn default_context(&self) -> WeatherContext {
        WeatherContext::Main
    }
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let Args {
        city,
        api_key,
        base_url,
        config: config_path,
        log_file,
        debug: debug_args,
    } = Args::parse();

    let config_path = config_path.unwrap_or_else(config::default_config_path);
    let settings = FileConfig::load(&config_path).and_then(|file| {
        Settings::resolve(
            Overrides {
                api_key,
                base_url,
                log_file,
            },
            file,
            &config_path,
        )
    });
    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(2);
        }
    };

    logging::init(&settings.log_file)?;
    tracing::info!(
        base_url = %settings.api.base_url,
        log_file = %settings.log_file.display(),
        "starting city-weather"
    );

    let debug = DebugSession::new(debug_args);

    // Export JSON schemas if requested
    debug.save_state_schema::<AppState>().map_err(debug_error)?;
    debug.save_actions_schema::<Action>().map_err(debug_error)?;

    let state = debug
        .load_state_or_else_async(|| async { Ok::<AppState, io::Error>(AppState::new()) })
        .await
        .map_err(debug_error)?;

    let replay_actions = debug.load_replay_items().map_err(debug_error)?;

    let (middleware, action_recorder) = debug.middleware_with_recorder();
    let store = EffectStoreWithMiddleware::new(state, reducer, middleware);

    // ===== Terminal setup =====
    let use_alt_screen = debug.use_alt_screen();
    let mut stdout = io::stdout();
    if use_alt_screen {
        enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let client = WeatherClient::new(settings.api);
    let result = run_app(
        &mut terminal,
        &debug,
        store,
        client,
        city.map(Action::CitySubmit),
        replay_actions,
    )
    .await;

    // ===== Cleanup =====
    if use_alt_screen {
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
    }

    let run_output = result?;
    run_output.write_render_output()?;
    debug
        .save_actions(action_recorder.as_ref())
        .map_err(debug_error)?;

    tracing::info!("city-weather exited");
    Ok(())
}

struct WeatherUi {
    widget: WeatherWidget,
}

impl WeatherUi {
    fn new() -> Self {
        Self {
            widget: WeatherWidget::new(),
        }
    }

    fn render(
        &mut self,
        frame: &mut Frame,
        area: Rect,
        state: &AppState,
        render_ctx: RenderContext,
        event_ctx: &mut EventContext<WeatherComponentId>,
    ) {
        event_ctx.set_component_area(WeatherComponentId::Widget, area);

        let props = WeatherWidgetProps {
            state,
            is_focused: render_ctx.is_focused(),
        };
        self.widget.render(frame, area, props);
    }

    fn handle_widget_event(
        &mut self,
        event: &EventKind,
        state: &AppState,
    ) -> HandlerResponse<Action> {
        let props = WeatherWidgetProps {
            state,
            is_focused: true,
        };
        let actions: Vec<_> = self
            .widget
            .handle_event(event, props)
            .into_iter()
            .collect();
        if actions.is_empty() {
            HandlerResponse::ignored()
        } else {
            HandlerResponse {
                actions,
                consumed: true,
                needs_render: false,
            }
        }
    }
}

fn debug_error(error: DebugSessionError) -> io::Error {
    io::Error::other(format!("debug session error: {error}"))
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    debug: &DebugSession,
    store: impl EffectStoreLike<AppState, Action, Effect>,
    client: WeatherClient,
    initial_action: Option<Action>,
    replay_actions: Vec<ReplayItem<Action>>,
) -> io::Result<DebugRunOutput<AppState>> {
    let ui = Rc::new(RefCell::new(WeatherUi::new()));
    let mut bus: EventBus<AppState, Action, WeatherComponentId, WeatherContext> = EventBus::new();
    let keybindings: Keybindings<WeatherContext> = Keybindings::new();

    let ui_widget = Rc::clone(&ui);
    bus.register(WeatherComponentId::Widget, move |event, state| {
        ui_widget
            .borrow_mut()
            .handle_widget_event(&event.kind, state)
    });

    // Re-render on terminal resize (no action needed, just redraw)
    bus.register_global(|event, _state| match event.kind {
        EventKind::Resize(_, _) => HandlerResponse::ignored().with_render(),
        _ => HandlerResponse::ignored(),
    });

    debug
        .run_effect_app_with_bus(
            terminal,
            store,
            DebugLayer::simple(),
            replay_actions,
            initial_action,
            Some(Action::Quit),
            |_runtime| {},
            &mut bus,
            &keybindings,
            |frame, area, state, render_ctx, event_ctx| {
                ui.borrow_mut()
                    .render(frame, area, state, render_ctx, event_ctx);
            },
            |action| matches!(action, Action::Quit),
            move |effect, ctx| handle_effect(effect, ctx, &client),
        )
        .await
}

/// Handle effects by spawning tasks
fn handle_effect(effect: Effect, ctx: &mut EffectContext<Action>, client: &WeatherClient) {
    match effect {
        Effect::FetchWeather { city, request_id } => {
            let client = client.clone();
            // One key per request: a newer search never cancels an older one
            let key = format!("weather_{request_id}");
            ctx.tasks().spawn(TaskKey::new(key), async move {
                match client.current_weather(&city).await {
                    Ok(report) => {
                        tracing::info!(%city, request_id, "weather loaded");
                        Action::WeatherDidLoad(report)
                    }
                    Err(error) => {
                        tracing::error!(%city, request_id, %error, "error fetching weather data");
                        Action::WeatherDidError(error.to_string())
                    }
                }
            });
        }
    }
}
