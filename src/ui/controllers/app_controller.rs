//! # Application Controller
//!
//! Owns the [`AppState`] and runs the event loop. Key presses go through the
//! command registry into the reducer, the effects it returns are handed to
//! the [`ApiService`], and finished API calls are fed back into the reducer
//! as [`Action::Api`]. The screen is redrawn whenever the state may have
//! changed.

use crate::ui::{
    commands::{CommandContext, CommandEvent, CommandRegistry},
    io::{EventStream, RenderStream, TerminalEventStream, TerminalRenderStream},
    services::{ApiService, StudentClient},
    state::{update, Action, AppState},
    views::{TerminalRenderer, ViewRenderer},
};
use crate::{cmd_args::CommandLineArgs, config};
use anyhow::Result;
use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::io;
use std::time::Duration;

/// How long one loop iteration waits for terminal input
const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct AppController<ES: EventStream, RS: RenderStream> {
    state: AppState,
    view_renderer: TerminalRenderer<RS>,
    command_registry: CommandRegistry,
    api: ApiService,
    event_stream: ES,
    should_quit: bool,
    needs_render: bool,
}

impl AppController<TerminalEventStream, TerminalRenderStream<io::Stdout>> {
    /// Create a controller bound to the real terminal
    pub fn new(cmd_args: CommandLineArgs) -> Result<Self> {
        Self::with_io_streams(
            cmd_args,
            TerminalEventStream::new(),
            TerminalRenderStream::new(),
        )
    }
}

impl<ES: EventStream, RS: RenderStream> AppController<ES, RS> {
    /// Create a controller from command line arguments and the profile file
    pub fn with_io_streams(
        cmd_args: CommandLineArgs,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let profile_name = cmd_args.profile();
        let profile_path = config::get_profile_path();
        tracing::debug!("Loading profile '{}' from '{}'", profile_name, profile_path);

        let profile = config::IniProfileStore::new(&profile_path).load_or_blank(profile_name)?;
        let server = profile.resolve_server(cmd_args.server())?;
        let client = StudentClient::new(server.as_str())?;
        tracing::info!("Using server {}", client.base_url());

        let state = match profile.username() {
            Some(username) => AppState::with_login_username(username),
            None => AppState::new(),
        };
        Self::with_client(client, state, event_stream, render_stream)
    }

    /// Create a controller around an existing client and initial state
    pub fn with_client(
        client: StudentClient,
        state: AppState,
        event_stream: ES,
        render_stream: RS,
    ) -> Result<Self> {
        let view_renderer = TerminalRenderer::with_render_stream(render_stream)?;

        Ok(Self {
            state,
            view_renderer,
            command_registry: CommandRegistry::new(),
            api: ApiService::new(client),
            event_stream,
            should_quit: false,
            needs_render: true,
        })
    }

    pub fn state(&self) -> &AppState {
        &self.state
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Run the reducer and start whatever remote calls it asks for
    ///
    /// Must be called from within a tokio runtime.
    pub fn dispatch(&mut self, action: Action) {
        tracing::debug!("Dispatching {:?}", action);
        for effect in update(&mut self.state, action) {
            tracing::debug!("Starting {:?}", effect);
            self.api.dispatch(effect);
        }
        self.needs_render = true;
    }

    /// Apply one terminal event
    pub fn handle_terminal_event(&mut self, event: Event) -> Result<()> {
        match event {
            Event::Key(key_event) => self.handle_key_event(key_event),
            Event::Resize(width, height) => {
                self.view_renderer.update_size(width, height);
                self.needs_render = true;
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn handle_key_event(&mut self, key_event: KeyEvent) -> Result<()> {
        // Release and repeat events are reported on some platforms
        if key_event.kind != KeyEventKind::Press {
            return Ok(());
        }

        let context = CommandContext::from_state(&self.state);
        let events = self.command_registry.process_event(key_event, &context)?;
        for event in events {
            match event {
                CommandEvent::Dispatch(action) => self.dispatch(action),
                CommandEvent::QuitRequested => self.should_quit = true,
            }
        }
        Ok(())
    }

    /// Feed every finished API call into the reducer without waiting
    pub fn drain_api_events(&mut self) {
        while let Some(event) = self.api.poll_event() {
            self.dispatch(Action::Api(event));
        }
    }

    /// Wait up to `timeout` for the next finished API call
    ///
    /// Returns whether one arrived.
    pub async fn await_api_event(&mut self, timeout: Duration) -> bool {
        match tokio::time::timeout(timeout, self.api.next_event()).await {
            Ok(Some(event)) => {
                self.dispatch(Action::Api(event));
                true
            }
            _ => false,
        }
    }

    /// Redraw if anything changed since the last render
    pub fn render_if_needed(&mut self) -> Result<()> {
        if self.needs_render && !self.should_quit {
            self.view_renderer.render(&self.state)?;
            self.needs_render = false;
        }
        Ok(())
    }

    /// One loop iteration: at most one terminal event, then finished API
    /// calls, then a redraw
    pub fn tick(&mut self, timeout: Duration) -> Result<()> {
        if self.event_stream.poll(timeout)? {
            let event = self.event_stream.read()?;
            self.handle_terminal_event(event)?;
        }
        self.drain_api_events();
        self.render_if_needed()
    }

    /// Run the main application loop until quit
    pub async fn run(&mut self) -> Result<()> {
        self.view_renderer.initialize()?;

        let result = self.event_loop().await;

        // Hand the terminal back even when the loop failed
        self.view_renderer.cleanup()?;
        result
    }

    async fn event_loop(&mut self) -> Result<()> {
        while !self.should_quit {
            self.tick(POLL_INTERVAL)?;
            tokio::task::yield_now().await;
        }
        tracing::info!("Quit requested");
        Ok(())
    }
}
