use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::ConsoleLine;
use crate::infrastructure::RuntimeEvent;

/// Where the routine currently is, shown in the console panel title
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InitStatus {
    Idle,
    Connecting,
    Connected { endpoint: String, chain: Option<String> },
    Done,
    Failed,
}

/// Root component state
#[derive(Debug)]
pub struct App {
    pub should_quit: bool,
    pub console_open: bool,
    pub status: InitStatus,
    console: Vec<ConsoleLine>,
    mounted: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            should_quit: false,
            console_open: false,
            status: InitStatus::Idle,
            console: Vec::new(),
            mounted: false,
        }
    }

    /// Returns true only on the first call; the caller fires the mount effect then
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.status = InitStatus::Connecting;
        true
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn console(&self) -> &[ConsoleLine] {
        &self.console
    }

    pub fn apply_event(&mut self, event: RuntimeEvent) {
        match event {
            RuntimeEvent::Connected { endpoint, chain } => {
                self.status = InitStatus::Connected { endpoint, chain };
            }
            RuntimeEvent::Console(line) => self.console.push(line),
            RuntimeEvent::Finished => self.status = InitStatus::Done,
            RuntimeEvent::Error { message } => {
                self.status = InitStatus::Failed;
                self.console
                    .push(ConsoleLine::error(format!("init failed: {message}")));
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') | KeyCode::F(12) => self.console_open = !self.console_open,
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_mount_fires_once() {
        let mut app = App::new();
        assert!(!app.is_mounted());
        assert!(app.mount());
        assert!(!app.mount());
        assert!(!app.mount());
        assert_eq!(app.status, InitStatus::Connecting);
    }

    #[test]
    fn test_events_fill_console() {
        let mut app = App::new();
        app.mount();
        app.apply_event(RuntimeEvent::Connected {
            endpoint: "wss://rpc.polkadot.io".into(),
            chain: Some("Polkadot".into()),
        });
        app.apply_event(RuntimeEvent::Console(ConsoleLine::info("0xaa")));
        app.apply_event(RuntimeEvent::Console(ConsoleLine::info(
            "1000: balance of 500 and a nonce of 0",
        )));
        app.apply_event(RuntimeEvent::Finished);

        assert_eq!(app.status, InitStatus::Done);
        let texts: Vec<&str> = app.console().iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["0xaa", "1000: balance of 500 and a nonce of 0"]);
    }

    #[test]
    fn test_error_event_is_logged_not_fatal() {
        let mut app = App::new();
        app.mount();
        app.apply_event(RuntimeEvent::Error {
            message: "connection refused".into(),
        });

        assert_eq!(app.status, InitStatus::Failed);
        assert!(!app.should_quit);
        let line = &app.console()[0];
        assert!(line.is_error());
        assert_eq!(line.text, "init failed: connection refused");
    }

    #[test]
    fn test_keys() {
        let mut app = App::new();
        app.handle_key(press(KeyCode::F(12), KeyModifiers::NONE));
        assert!(app.console_open);
        app.handle_key(press(KeyCode::Char('c'), KeyModifiers::NONE));
        assert!(!app.console_open);
        assert!(!app.should_quit);

        app.handle_key(press(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);

        let mut app = App::new();
        app.handle_key(press(KeyCode::Char('q'), KeyModifiers::NONE));
        assert!(app.should_quit);
    }
}
